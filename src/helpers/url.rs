//! URL helper functions

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_ALNUM_RUN: Regex = Regex::new(r"[^\p{L}\p{N}]+").unwrap();
}

/// Slug used when nothing alphanumeric survives normalization
pub const FALLBACK_SLUG: &str = "post";

/// Normalize a title or file name into a URL segment
///
/// Letters and digits from any script are kept, every other run of
/// characters becomes a single hyphen.
///
/// # Examples
/// ```ignore
/// slugify("Hello, World!") // -> "hello-world"
/// slugify("  ---  ")       // -> "post"
/// ```
pub fn slugify(s: &str) -> String {
    let lowered = s.trim().to_lowercase();
    let slug = NON_ALNUM_RUN.replace_all(&lowered, "-");
    let slug = slug.trim_start_matches('-').trim_end_matches('-');
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// Whether a URL carries its own http(s) scheme
pub fn is_absolute(url: &str) -> bool {
    let lower = url.get(..8).unwrap_or(url).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Resolve a possibly relative URL against the site base URL
///
/// # Examples
/// ```ignore
/// absolute_url("/public/og.jpg", "https://example.com") // -> "https://example.com/public/og.jpg"
/// absolute_url("img/a.png", "https://example.com")      // -> "https://example.com/img/a.png"
/// ```
pub fn absolute_url(src: &str, base_url: &str) -> String {
    if src.is_empty() {
        base_url.to_string()
    } else if is_absolute(src) {
        src.to_string()
    } else if src.starts_with('/') {
        format!("{}{}", base_url, src)
    } else {
        format!("{}/{}", base_url, src)
    }
}
