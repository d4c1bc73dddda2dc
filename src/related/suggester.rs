//! Per-seed pipeline: classify, expand, rank, fetch Spotify's list, compare.

use std::collections::HashSet;
use log::{info, warn};

use crate::data::{ArtistReport, SeedOutcome};
use crate::helpers::gateway::ApiGateway;
use crate::helpers::spotify;
use crate::related::{classifier, comparator, expander, ranker};

/// Seed names from `--artist` and the lines of an artists file.
///
/// Names are trimmed, blank lines skipped, and duplicates dropped keeping the
/// first occurrence.
pub fn collect_seed_names(artist: Option<&str>, file_contents: Option<&str>) -> Vec<String> {
    let mut seen = HashSet::new();
    artist
        .into_iter()
        .chain(file_contents.into_iter().flat_map(|contents| contents.lines()))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.to_string()))
        .map(|name| name.to_string())
        .collect()
}

/// Runs the suggestion pipeline for seed artists
#[derive(Debug, Clone)]
pub struct Suggester {
    gateway: ApiGateway,
}

impl Suggester {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &ApiGateway {
        &self.gateway
    }

    /// Evaluate one seed. A seed that is not a musical artist ends after the
    /// classification lookups.
    pub fn evaluate(&self, name: &str) -> SeedOutcome {
        let seed = classifier::classify(&self.gateway, name, true);
        if !seed.is_artist {
            info!("{} is not a musical artist", name);
            return SeedOutcome::NotAnArtist { name: name.to_string() };
        }

        let linked = expander::linked_artists(&self.gateway, name);
        let suggestions = ranker::rank_by_page_views(&self.gateway, &linked);

        let spotify_related = spotify::related_artists(&self.gateway, seed.spotify_id.as_deref());
        let mut report = ArtistReport {
            artist: name.to_string(),
            spotify_id: seed.spotify_id,
            suggestions,
            spotify_related,
            comparison: None,
        };

        if !report.spotify_related.is_empty() {
            match comparator::compare(&report.suggested_names(), &report.spotify_related) {
                Ok(result) => report.comparison = Some(result),
                Err(e) => warn!("Comparison for {} failed: {}", name, e),
            }
        }

        SeedOutcome::Report(report)
    }

    /// Evaluate every seed in order
    pub fn evaluate_all(&self, names: &[String]) -> Vec<SeedOutcome> {
        names.iter().map(|name| self.evaluate(name)).collect()
    }
}

/// Console lines describing an outcome
pub fn report_lines(outcome: &SeedOutcome) -> Vec<String> {
    match outcome {
        SeedOutcome::NotAnArtist { name } => vec![format!(
            "{} is not a valid article title, or has no listed discography (is this a musical artist?)",
            name
        )],
        SeedOutcome::Report(report) => {
            let mut lines = vec![format!(
                "If you like {}, you should try: {}",
                report.artist,
                report.suggested_names().join(", ")
            )];
            match &report.comparison {
                Some(result) => lines.push(format!(
                    "Wiki-Related Artists suggested {} of Spotify's related artists for {}",
                    result, report.artist
                )),
                None => lines.push(format!(
                    "Unfortunately, {} is not on Spotify, so these suggestions are as good as it gets.",
                    report.artist
                )),
            }
            lines
        }
    }
}
