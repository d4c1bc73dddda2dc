// Data structures for wikirelated

pub mod artist;
pub mod wiki;

pub use artist::{ArtistCandidate, ArtistReport, ComparisonResult, RankedTitle, SeedOutcome};
pub use wiki::{Claims, WikipediaPage};
