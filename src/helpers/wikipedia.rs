use log::debug;
use serde_json::Value;
use thiserror::Error;

use crate::data::wiki::WikipediaPage;
use crate::helpers::gateway::ApiGateway;
use crate::helpers::http_client::HttpClientError;

#[derive(Debug, Error)]
pub enum WikiError {
    #[error(transparent)]
    Http(#[from] HttpClientError),

    #[error("Expected exactly one page in query response, got {0}")]
    UnexpectedPageCount(usize),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, WikiError>;

/// Wikipedia titles use underscores as word separators in URLs
pub fn normalize_title(title: &str) -> String {
    title.replace(' ', "_")
}

/// Fetch the page properties named by `prop` for a single title.
///
/// Redirects are followed. Returns `Ok(None)` for pages the wiki reports as
/// missing.
pub fn get_page(
    gateway: &ApiGateway,
    title: &str,
    prop: &str,
    extra_params: &[(&str, String)],
) -> Result<Option<WikipediaPage>> {
    let title = normalize_title(title);
    let mut params: Vec<(&str, String)> = vec![
        ("format", "json".to_string()),
        ("action", "query".to_string()),
        ("prop", prop.to_string()),
        ("titles", title.clone()),
    ];
    params.extend(extra_params.iter().cloned());

    let endpoint = &gateway.config().wikipedia.endpoint;
    let response = match gateway.get_json(endpoint, &params, true, &format!("Wikipedia {}", title))? {
        Some(response) => response,
        None => return Ok(None),
    };

    let page = single_page(&response)?;
    if page.get("missing").is_some() {
        debug!("Wikipedia page {} is missing", title);
        return Ok(None);
    }

    Ok(Some(WikipediaPage::from_json(page)))
}

/// The query API keys pages by an opaque page id; exactly one is expected.
fn single_page(response: &Value) -> Result<&Value> {
    let pages = response
        .get("query")
        .and_then(|q| q.get("pages"))
        .and_then(|p| p.as_object())
        .ok_or_else(|| WikiError::Malformed("no query.pages object".to_string()))?;

    if pages.len() != 1 {
        return Err(WikiError::UnexpectedPageCount(pages.len()));
    }
    pages
        .values()
        .next()
        .ok_or(WikiError::UnexpectedPageCount(0))
}
