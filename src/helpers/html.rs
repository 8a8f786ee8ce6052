//! HTML helper functions

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref EXTERNAL_ANCHOR: Regex =
        Regex::new(r#"(?i)<a\s+([^>]*href="https?://[^"]+"[^>]*)>"#).unwrap();
    static ref HAS_REL: Regex = Regex::new(r"rel=").unwrap();
    static ref HAS_TARGET: Regex = Regex::new(r"target=").unwrap();
}

/// `rel` value put on every outbound link
pub const EXTERNAL_REL: &str = "sponsored nofollow ugc";

/// Escape the three characters that change HTML structure.
///
/// Quotes are left alone; values that end up in attributes come either from
/// the site owner or from URLs that were already matched without quotes.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape XML special characters
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Plain-text excerpt of an HTML fragment
///
/// Tags become spaces, whitespace runs collapse to one space, and the result
/// is cut to `limit` characters.
///
/// # Examples
/// ```ignore
/// excerpt("<p>Hello <b>World</b></p>", 160) // -> "Hello World"
/// ```
pub fn excerpt(html: &str, limit: usize) -> String {
    let text = TAG.replace_all(html, " ");
    let text = WHITESPACE.replace_all(&text, " ");
    text.trim().chars().take(limit).collect()
}

/// Add `target` and `rel` to outbound anchors that are missing them.
///
/// Only anchors whose `href` is a double-quoted http(s) URL are touched.
/// Attributes already present are kept as they are.
pub fn ensure_rel_target(html: &str) -> String {
    EXTERNAL_ANCHOR
        .replace_all(html, |caps: &Captures| {
            let attrs = &caps[1];
            let mut tag = format!("<a {}", attrs);
            if !HAS_TARGET.is_match(attrs) {
                tag.push_str(r#" target="_blank""#);
            }
            if !HAS_REL.is_match(attrs) {
                tag.push_str(&format!(r#" rel="{}""#, EXTERNAL_REL));
            }
            tag.push('>');
            tag
        })
        .into_owned()
}
