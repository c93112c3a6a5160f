//! Path helpers for matching routes against the current location.

/// Default prefix marking a route path as an external link.
pub const EXTERNAL_LINK_PREFIX: &str = "https://";

/// Default delimiter whose last occurrence starts a strippable suffix.
pub const SUFFIX_DELIMITER: &str = ".";

/// Remove everything from the last occurrence of `delimiter`.
///
/// Returns `path` unchanged when the delimiter does not occur (or is empty).
///
/// # Examples
///
/// ```
/// use rw_nav::path::remove_from_last;
///
/// assert_eq!(remove_from_last("/learn/install.md", "."), "/learn/install");
/// assert_eq!(remove_from_last("/learn/install", "."), "/learn/install");
/// assert_eq!(remove_from_last(".md", "."), "");
/// ```
pub fn remove_from_last<'a>(path: &'a str, delimiter: &str) -> &'a str {
    if delimiter.is_empty() {
        return path;
    }
    match path.rfind(delimiter) {
        Some(idx) => &path[..idx],
        None => path,
    }
}

/// Strip the query string and fragment from a location path.
///
/// ```
/// use rw_nav::path::clean_path;
///
/// assert_eq!(clean_path("/learn?tab=1#intro"), "/learn");
/// assert_eq!(clean_path("/learn#intro?x"), "/learn");
/// ```
pub fn clean_path(as_path: &str) -> &str {
    match as_path.find(['?', '#']) {
        Some(idx) => &as_path[..idx],
        None => as_path,
    }
}

/// Check whether `path` points outside the site.
pub fn is_external(path: &str, prefix: &str) -> bool {
    !prefix.is_empty() && path.starts_with(prefix)
}
