use std::fmt;
use serde::{Deserialize, Serialize};

use crate::helpers::pageviews::NO_DATA;

/// Result of classifying one Wikipedia title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistCandidate {
    /// Title as it was looked up
    pub title: String,
    /// Whether the linked Wikidata entity carries an artist-indicating claim
    pub is_artist: bool,
    /// Spotify artist id, when requested and present
    pub spotify_id: Option<String>,
}

impl ArtistCandidate {
    pub fn not_an_artist(title: &str) -> Self {
        ArtistCandidate {
            title: title.to_string(),
            is_artist: false,
            spotify_id: None,
        }
    }
}

/// A title with its summed monthly page views, `-1` when unknown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedTitle {
    pub title: String,
    pub views: i64,
}

impl RankedTitle {
    pub fn has_views(&self) -> bool {
        self.views > NO_DATA
    }
}

/// Overlap between the wiki-derived suggestions and Spotify's list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub overlap_count: usize,
    /// Share of Spotify's list that was suggested, 0 to 100
    pub overlap_percent: f64,
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2}%)", self.overlap_count, self.overlap_percent)
    }
}

/// Everything computed for one seed artist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistReport {
    pub artist: String,
    pub spotify_id: Option<String>,
    /// Linked artists, most viewed first
    pub suggestions: Vec<RankedTitle>,
    pub spotify_related: Vec<String>,
    /// Present only when Spotify returned related artists
    pub comparison: Option<ComparisonResult>,
}

impl ArtistReport {
    /// Suggested titles that have page view data, in rank order
    pub fn suggested_names(&self) -> Vec<String> {
        self.suggestions
            .iter()
            .filter(|s| s.has_views())
            .map(|s| s.title.clone())
            .collect()
    }
}

/// Outcome of evaluating one seed name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SeedOutcome {
    Report(ArtistReport),
    NotAnArtist { name: String },
}

impl SeedOutcome {
    pub fn name(&self) -> &str {
        match self {
            SeedOutcome::Report(report) => &report.artist,
            SeedOutcome::NotAnArtist { name } => name,
        }
    }
}
