use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wikidata claims of one entity, keyed by property id (e.g. "P1902")
pub type Claims = HashMap<String, Vec<Value>>;

/// The parts of a Wikipedia query response page that lookups use
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WikipediaPage {
    /// Page title after redirects
    pub title: String,
    /// Titles of outbound links, in API order
    pub links: Vec<String>,
    /// Raw wikitext of the latest revision, if revisions were requested
    pub content: Option<String>,
    /// Wikidata entity id from the page props, if requested and linked
    pub wikibase_item: Option<String>,
}

impl WikipediaPage {
    /// Build a page from one entry of `query.pages`
    pub fn from_json(page: &Value) -> Self {
        let title = page
            .get("title")
            .and_then(|t| t.as_str())
            .unwrap_or_default()
            .to_string();

        let links = page
            .get("links")
            .and_then(|l| l.as_array())
            .map(|links| {
                links
                    .iter()
                    .filter_map(|link| link.get("title").and_then(|t| t.as_str()))
                    .map(|t| t.to_string())
                    .collect()
            })
            .unwrap_or_default();

        let content = page
            .get("revisions")
            .and_then(|r| r.get(0))
            .and_then(revision_content)
            .map(|c| c.to_string());

        let wikibase_item = page
            .get("pageprops")
            .and_then(|p| p.get("wikibase_item"))
            .and_then(|w| w.as_str())
            .filter(|w| !w.is_empty())
            .map(|w| w.to_string());

        WikipediaPage { title, links, content, wikibase_item }
    }
}

// Legacy responses carry the text in "*"; slot-based ones nest it under slots.main
fn revision_content(revision: &Value) -> Option<&str> {
    if let Some(text) = revision.get("*").and_then(|c| c.as_str()) {
        return Some(text);
    }
    let main = revision.get("slots")?.get("main")?;
    main.get("*")
        .or_else(|| main.get("content"))
        .and_then(|c| c.as_str())
}
