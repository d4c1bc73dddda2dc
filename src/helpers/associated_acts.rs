//! Associated acts extraction
//!
//! Mines the `associated_acts` infobox field out of raw wikitext. This is a
//! pattern match over the list template that usually holds the field
//! (`{{flatlist|`, `{{hlist|`, `{{ubl|` ...), not a wikitext parser.

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

const FIELD_MARKER: &str = "associated_acts";

// Body of the first `{{name|...}}` template following the field marker
static ACTS_TEMPLATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)associated_acts.+?\{\{\w+?\|(.+?)\}\}").expect("valid associated acts regex")
});

// List bullets and link/template brackets
static MARKUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\* |[\*\[\]\{\}]").expect("valid markup regex")
});

/// Extract the associated act titles from the wikitext of an artist page
///
/// # Returns
/// Link targets in source order. Empty when the page has no
/// `associated_acts` field or the field does not hold a list template.
///
/// # Example
/// ```
/// use wikirelated::helpers::associated_acts::extract_associated_acts;
///
/// let wikitext = "| associated_acts = {{flatlist|\n* [[Wings (band)|Wings]]\n* [[The Beatles]]\n}}";
/// assert_eq!(extract_associated_acts(wikitext), vec!["Wings (band)", "The Beatles"]);
/// ```
pub fn extract_associated_acts(content: &str) -> Vec<String> {
    if !content.contains(FIELD_MARKER) {
        return Vec::new();
    }

    let body = match ACTS_TEMPLATE.captures(content).and_then(|c| c.get(1)) {
        Some(body) => body.as_str(),
        None => {
            warn!("Regex could not find associated_acts titles");
            return Vec::new();
        }
    };

    let acts: Vec<String> = body
        .lines()
        .map(|line| MARKUP.replace_all(line, "").replace("&nbsp;", " "))
        .map(|line| match line.split_once('|') {
            Some((target, _)) => target.trim().to_string(),
            None => line.trim().to_string(),
        })
        .filter(|title| !title.is_empty())
        .collect();

    debug!("Found {} associated acts", acts.len());
    acts
}
