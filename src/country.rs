//! Country search for the billing address country picker.
//!
//! Names are supplied by the host, already localized.

/// Filters country names by a search query.
///
/// An empty query returns every name. Otherwise names containing the query,
/// compared case-insensitively, are returned. The query is not trimmed, so
/// `" "` keeps only names with a space in them. The result is always sorted.
///
/// # Example
///
/// ```
/// use cardform::country::filter_countries;
///
/// let names = ["United Kingdom", "France", "United States", "Germany"];
/// assert_eq!(filter_countries(&names, "united"), vec!["United Kingdom", "United States"]);
/// assert_eq!(filter_countries(&names, "").len(), 4);
/// assert_eq!(filter_countries(&names, " "), vec!["United Kingdom", "United States"]);
/// ```
pub fn filter_countries<'a, S: AsRef<str>>(names: &'a [S], query: &str) -> Vec<&'a str> {
    let query = query.to_lowercase();
    let mut matches: Vec<&str> = names
        .iter()
        .map(|name| name.as_ref())
        .filter(|name| query.is_empty() || name.to_lowercase().contains(&query))
        .collect();
    matches.sort_unstable();
    matches
}
