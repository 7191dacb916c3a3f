//! URL extraction from free-form note content.

use regex::Regex;
use std::sync::LazyLock;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"https?://[-\w.]+(?::\d+)?(?:/[\w/.]*(?:\?[\w&=%.]*)?(?:#[\w.]*)?)?",
    )
    .expect("URL pattern is valid")
});

/// Returns every `http://` or `https://` URL embedded in `text`, in order of
/// appearance.
///
/// # Examples
///
/// ```
/// use jotter::domain::extract_urls;
///
/// let found = extract_urls("docs at https://docs.rs/regex, mirror http://example.org");
/// assert_eq!(found, vec!["https://docs.rs/regex", "http://example.org"]);
/// ```
pub fn extract_urls(text: &str) -> Vec<&str> {
    URL_PATTERN.find_iter(text).map(|m| m.as_str()).collect()
}
