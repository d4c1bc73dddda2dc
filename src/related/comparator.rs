use std::collections::HashSet;
use thiserror::Error;

use crate::data::ComparisonResult;

#[derive(Debug, Error, PartialEq)]
pub enum CompareError {
    #[error("Cannot compare against an empty reference list")]
    EmptyReference,
}

/// Case-insensitive overlap of `suggested` with `reference`.
///
/// The percentage is relative to the length of `reference`, which must not be
/// empty.
///
/// # Example
/// ```
/// use wikirelated::related::comparator::compare;
///
/// let result = compare(&["A", "B"], &["a", "c"]).unwrap();
/// assert_eq!(result.overlap_count, 1);
/// assert_eq!(result.overlap_percent, 50.0);
/// ```
pub fn compare<S: AsRef<str>, T: AsRef<str>>(
    suggested: &[S],
    reference: &[T],
) -> Result<ComparisonResult, CompareError> {
    if reference.is_empty() {
        return Err(CompareError::EmptyReference);
    }

    let suggested: HashSet<String> = suggested.iter().map(|s| s.as_ref().to_lowercase()).collect();
    let reference_set: HashSet<String> = reference.iter().map(|s| s.as_ref().to_lowercase()).collect();

    let overlap_count = suggested.intersection(&reference_set).count();
    let overlap_percent = 100.0 * overlap_count as f64 / reference.len() as f64;

    Ok(ComparisonResult { overlap_count, overlap_percent })
}
