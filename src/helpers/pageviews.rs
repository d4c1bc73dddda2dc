use log::{debug, warn};

use crate::helpers::gateway::ApiGateway;
use crate::helpers::wikipedia::normalize_title;

/// Views reported for a title whose lookup failed
pub const NO_DATA: i64 = -1;

/// REST path of the monthly per-article user page views for `title`
pub fn pageviews_url(gateway: &ApiGateway, title: &str) -> String {
    let wikimedia = &gateway.config().wikimedia;
    let title = urlencoding::encode(&normalize_title(title)).into_owned();
    let segments = [
        "metrics",
        "pageviews",
        "per-article",
        wikimedia.project.as_str(),
        "all-access",
        "user",
        title.as_str(),
        "monthly",
        wikimedia.date_start.as_str(),
        wikimedia.date_end.as_str(),
    ];
    format!("{}/{}", wikimedia.endpoint.trim_end_matches('/'), segments.join("/"))
}

/// Total monthly page views of `title` over the configured window.
///
/// Months without a `views` count contribute zero. Returns [`NO_DATA`] when
/// the lookup fails or yields nothing.
pub fn monthly_views(gateway: &ApiGateway, title: &str) -> i64 {
    let url = pageviews_url(gateway, title);
    let response = match gateway.get_json(&url, &[], false, &format!("Wikimedia {}", title)) {
        Ok(Some(response)) => response,
        Ok(None) => return NO_DATA,
        Err(e) => {
            warn!("No page views for {}: {}", title, e);
            return NO_DATA;
        }
    };

    let total: i64 = response
        .get("items")
        .and_then(|items| items.as_array())
        .map(|items| {
            items
                .iter()
                .map(|item| item.get("views").and_then(|v| v.as_i64()).unwrap_or(0))
                .sum::<i64>()
        })
        .unwrap_or(0);

    debug!("{} has {} page views", title, total);
    total
}
