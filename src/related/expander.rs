use std::collections::HashSet;
use log::{debug, info, warn};

use crate::helpers::associated_acts::extract_associated_acts;
use crate::helpers::gateway::ApiGateway;
use crate::helpers::wikipedia;
use crate::related::classifier::classify;

/// Candidate titles for `artist`: its page links (optionally capped at
/// `link_limit`) followed by its associated acts, first occurrence kept
pub fn candidate_titles(links: &[String], associated_acts: &[String], link_limit: Option<usize>) -> Vec<String> {
    let link_count = link_limit.unwrap_or(links.len()).min(links.len());
    let mut seen = HashSet::new();

    links[..link_count]
        .iter()
        .chain(associated_acts.iter())
        .filter(|title| seen.insert(title.as_str()))
        .cloned()
        .collect()
}

/// Titles linked from `artist`'s page that are themselves musical artists.
///
/// Candidates are the page's outbound links plus the titles in its
/// `associated_acts` infobox field. A page that cannot be fetched yields no
/// candidates.
pub fn linked_artists(gateway: &ApiGateway, artist: &str) -> Vec<String> {
    let expander = &gateway.config().expander;
    let params = [
        ("pllimit", expander.pllimit.to_string()),
        ("rvprop", "content".to_string()),
    ];

    let page = match wikipedia::get_page(gateway, artist, "links|revisions", &params) {
        Ok(Some(page)) => page,
        Ok(None) => {
            warn!("No Wikipedia page to expand for {}", artist);
            return Vec::new();
        }
        Err(e) => {
            warn!("Could not fetch links of {}: {}", artist, e);
            return Vec::new();
        }
    };

    let acts = page
        .content
        .as_deref()
        .map(extract_associated_acts)
        .unwrap_or_default();
    let candidates = candidate_titles(&page.links, &acts, expander.link_limit);
    debug!(
        "{}: {} links, {} associated acts, {} candidates",
        artist,
        page.links.len(),
        acts.len(),
        candidates.len()
    );

    let artists: Vec<String> = candidates
        .into_iter()
        .filter(|title| classify(gateway, title, false).is_artist)
        .collect();

    info!("Found {} linked artists for {}", artists.len(), artist);
    artists
}
