use std::collections::HashSet;
use log::debug;

use crate::data::RankedTitle;
use crate::helpers::gateway::ApiGateway;
use crate::helpers::pageviews;

/// Look up the views of each distinct title and order them, most viewed first.
///
/// Duplicates are dropped (first occurrence kept) and ties keep input order.
pub fn rank_by_views<F>(titles: &[String], mut views: F) -> Vec<RankedTitle>
where
    F: FnMut(&str) -> i64,
{
    let mut seen = HashSet::new();
    let mut ranked: Vec<RankedTitle> = titles
        .iter()
        .filter(|title| seen.insert(title.as_str()))
        .map(|title| RankedTitle {
            title: title.clone(),
            views: views(title),
        })
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.views.cmp(&a.views));
    ranked
}

/// Rank `titles` by their Wikimedia page views over the configured window
pub fn rank_by_page_views(gateway: &ApiGateway, titles: &[String]) -> Vec<RankedTitle> {
    let ranked = rank_by_views(titles, |title| pageviews::monthly_views(gateway, title));
    debug!("Ranked {} titles by page views", ranked.len());
    ranked
}
