//! Markdown rendering
//!
//! A deliberately small subset of Markdown, rendered by running a fixed list
//! of regex rewrites over the whole text. There is no syntax tree: each pass
//! sees the output of the one before it, so the order of [`PASSES`] is part
//! of the output format.
//!
//! Fenced code is escaped by the first pass but is not shielded from the
//! later ones. A `**word**` inside a fence still turns bold.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::helpers::{escape_html, EXTERNAL_REL};

lazy_static! {
    static ref CODE_FENCE: Regex = Regex::new(r"(?s)```(.*?)```").unwrap();
    static ref IMAGE: Regex = Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap();
    static ref LINK: Regex = Regex::new(r"\[([^\]]+)\]\((https?://[^)\s]+)\)").unwrap();
    static ref BOLD: Regex = Regex::new(r"\*\*([^*]+)\*\*").unwrap();
    static ref ITALIC: Regex = Regex::new(r"\*([^*]+)\*").unwrap();
    /// Six down to one; a shorter prefix must never claim a longer heading.
    static ref HEADINGS: Vec<(Regex, String)> = (1..=6)
        .rev()
        .map(|level| {
            let pattern = format!(r"(?m)^[ \t]*#{{{}}}[ \t]+(.+)$", level);
            let replacement = format!("<h{0}>${{1}}</h{0}>", level);
            (Regex::new(&pattern).unwrap(), replacement)
        })
        .collect();
    static ref LIST_RUN: Regex =
        Regex::new(r"(^|\n)([ \t]*[-*][ \t].+(?:\n[ \t]*[-*][ \t].+)*)").unwrap();
    static ref LIST_MARKER: Regex = Regex::new(r"^\s*[-*]\s+").unwrap();
    static ref BLANK_LINES: Regex = Regex::new(r"\n{2,}").unwrap();
    static ref BLOCK_TAG: Regex = Regex::new(r"(?i)^\s*<(h\d|ul|ol|pre|img|blockquote)").unwrap();
}

/// One text-to-text rewrite of the pipeline
pub struct Pass {
    pub name: &'static str,
    pub apply: fn(&str) -> String,
}

/// The rewrites, in the order they run
pub const PASSES: &[Pass] = &[
    Pass {
        name: "code_fences",
        apply: code_fences,
    },
    Pass {
        name: "images",
        apply: images,
    },
    Pass {
        name: "links",
        apply: links,
    },
    Pass {
        name: "emphasis",
        apply: emphasis,
    },
    Pass {
        name: "headings",
        apply: headings,
    },
    Pass {
        name: "lists",
        apply: lists,
    },
    Pass {
        name: "paragraphs",
        apply: paragraphs,
    },
];

/// Render markdown to HTML
///
/// Never fails: syntax outside the supported subset passes through as text.
pub fn render(markdown: &str) -> String {
    let normalized = markdown.replace("\r\n", "\n");
    PASSES.iter().fold(normalized, |html, pass| {
        tracing::trace!("markdown pass: {}", pass.name);
        (pass.apply)(&html)
    })
}

/// ```` ```code``` ```` → `<pre><code>` with `&`, `<`, `>` escaped
fn code_fences(text: &str) -> String {
    CODE_FENCE
        .replace_all(text, |caps: &Captures| {
            format!("<pre><code>{}</code></pre>", escape_html(&caps[1]))
        })
        .into_owned()
}

/// `![alt](src)` → `<img>` with lazy loading; no title support
fn images(text: &str) -> String {
    IMAGE
        .replace_all(text, |caps: &Captures| {
            format!(
                r#"<img src="{}" alt="{}" loading="lazy">"#,
                &caps[2],
                escape_html(&caps[1])
            )
        })
        .into_owned()
}

/// `[text](http(s)://...)` → outbound anchor; other targets stay literal
fn links(text: &str) -> String {
    LINK.replace_all(text, |caps: &Captures| {
        format!(
            r#"<a href="{}" target="_blank" rel="{}">{}</a>"#,
            &caps[2],
            EXTERNAL_REL,
            escape_html(&caps[1])
        )
    })
    .into_owned()
}

/// `**bold**` first, then `*italic*`
fn emphasis(text: &str) -> String {
    let bold = BOLD.replace_all(text, "<strong>${1}</strong>");
    ITALIC.replace_all(&bold, "<em>${1}</em>").into_owned()
}

/// `######` through `#` at line start
fn headings(text: &str) -> String {
    HEADINGS
        .iter()
        .fold(text.to_string(), |html, (re, replacement)| {
            re.replace_all(&html, replacement.as_str()).into_owned()
        })
}

/// Consecutive `-` / `*` lines → one `<ul>`
fn lists(text: &str) -> String {
    LIST_RUN
        .replace_all(text, |caps: &Captures| {
            let items: String = caps[2]
                .trim()
                .split('\n')
                .map(|line| LIST_MARKER.replace(line, ""))
                .map(|item| format!("<li>{}</li>", item.trim()))
                .collect();
            format!("{}<ul>{}</ul>", &caps[1], items)
        })
        .into_owned()
}

/// Wrap loose blocks in `<p>`, single newlines become `<br>`
///
/// A blank block still becomes `<p></p>`.
fn paragraphs(text: &str) -> String {
    BLANK_LINES
        .split(text)
        .map(|block| {
            let trimmed = block.trim();
            if BLOCK_TAG.is_match(trimmed) {
                block.to_string()
            } else {
                format!("<p>{}</p>", trimmed.replace('\n', "<br>"))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_order() {
        let names: Vec<_> = PASSES.iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            vec![
                "code_fences",
                "images",
                "links",
                "emphasis",
                "headings",
                "lists",
                "paragraphs"
            ]
        );
    }

    #[test]
    fn test_render_paragraph_with_bold() {
        assert_eq!(render("Hello **world**"), "<p>Hello <strong>world</strong></p>");
    }

    #[test]
    fn test_render_italic() {
        assert_eq!(render("an *aside* here"), "<p>an <em>aside</em> here</p>");
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(render("### Title"), "<h3>Title</h3>");
        assert_eq!(render("###### Six"), "<h6>Six</h6>");
        assert_eq!(render("  # Indented"), "<h1>Indented</h1>");
        assert_eq!(render("#NoSpace"), "<p>#NoSpace</p>");
    }

    #[test]
    fn test_heading_between_paragraphs() {
        let html = render("Intro\n\n## Section\n\nText");
        assert_eq!(html, "<p>Intro</p>\n<h2>Section</h2>\n<p>Text</p>");
    }

    #[test]
    fn test_external_link() {
        let html = render("[site](https://example.com)");
        assert_eq!(
            html,
            r#"<p><a href="https://example.com" target="_blank" rel="sponsored nofollow ugc">site</a></p>"#
        );
    }

    #[test]
    fn test_relative_link_is_literal() {
        let html = render("[about](/relative/path)");
        assert!(!html.contains("<a"));
        assert!(html.contains("[about](/relative/path)"));
    }

    #[test]
    fn test_link_text_is_escaped() {
        let html = render("[a <b> & c](http://x.io/p)");
        assert!(html.contains(">a &lt;b&gt; &amp; c</a>"));
    }

    #[test]
    fn test_image() {
        let html = render("![a \"cat\" & dog](/img/cat.png)");
        assert_eq!(
            html,
            r#"<img src="/img/cat.png" alt="a "cat" &amp; dog" loading="lazy">"#
        );
    }

    #[test]
    fn test_image_is_not_a_link() {
        let html = render("![logo](https://example.com/logo.png)");
        assert!(html.starts_with(r#"<img src="https://example.com/logo.png""#));
        assert!(!html.contains("<a "));
    }

    #[test]
    fn test_unordered_list() {
        let html = render("Shopping:\n\n- eggs\n-   milk  \n- **bread**\n\nDone.");
        assert_eq!(
            html,
            "<p>Shopping:</p>\n<ul><li>eggs</li><li>milk</li><li><strong>bread</strong></li></ul>\n<p>Done.</p>"
        );
    }

    #[test]
    fn test_list_at_start() {
        assert_eq!(render("- a\n- b"), "<ul><li>a</li><li>b</li></ul>");
    }

    #[test]
    fn test_line_breaks_inside_paragraph() {
        assert_eq!(render("one\ntwo\n\nthree"), "<p>one<br>two</p>\n<p>three</p>");
    }

    #[test]
    fn test_code_fence_escaped() {
        let html = render("```\nif a < b && c > d {}\n```");
        assert_eq!(
            html,
            "<pre><code>\nif a &lt; b &amp;&amp; c &gt; d {}\n</code></pre>"
        );
    }

    #[test]
    fn test_code_fence_not_shielded_from_emphasis() {
        let html = render("```\nlet x = **y**;\n```");
        assert!(html.contains("<strong>y</strong>"));
    }

    #[test]
    fn test_crlf_input() {
        assert_eq!(render("a\r\n\r\nb"), "<p>a</p>\n<p>b</p>");
    }

    #[test]
    fn test_unknown_syntax_passes_through() {
        assert_eq!(render("> quote | table |"), "<p>> quote | table |</p>");
    }

    #[test]
    fn test_blank_blocks_become_empty_paragraphs() {
        assert_eq!(render(""), "<p></p>");
        assert_eq!(render("Hello\n\n"), "<p>Hello</p>\n<p></p>");
        assert_eq!(render("\n\n\n"), "<p></p>\n<p></p>");
    }
}
