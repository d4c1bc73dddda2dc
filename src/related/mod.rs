//! Related-artist discovery built on the API helpers

pub mod classifier;
pub mod comparator;
pub mod expander;
pub mod ranker;
pub mod suggester;

pub use suggester::{collect_seed_names, report_lines, Suggester};
