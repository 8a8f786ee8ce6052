//! Front-matter parsing
//!
//! Posts open with a small `---` delimited block of `key: value` lines. The
//! block is not YAML: only scalars, inline lists, and dash lists under
//! `keywords` and `products` are understood. Anything else is skipped, so a
//! malformed header never stops a build.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

lazy_static! {
    static ref BLOCK: Regex =
        Regex::new(r"(?s)\A---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n|\z)\s*(.*)\z")
            .unwrap();
    static ref INLINE_LIST: Regex = Regex::new(r"^([A-Za-z0-9_]+)\s*:\s*\[(.*)\]\s*$").unwrap();
    static ref KEY_VALUE: Regex = Regex::new(r"^([A-Za-z0-9_]+)\s*:\s*(.*)$").unwrap();
    static ref LIST_ITEM: Regex = Regex::new(r"^\s*-\s+(.*)$").unwrap();
    static ref CHUNK_SEPARATOR: Regex = Regex::new(r"\s*,\s*").unwrap();
    static ref NUMERIC: Regex = Regex::new(r"^\d+(\.\d+)?$").unwrap();
}

/// A single field of a product record
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => write!(f, "{}", n),
        }
    }
}

/// A product declared under `products:`
///
/// Fields keep their declaration order. `name`, `url`, `image`, `price` and
/// `currency` are the ones the generator reads; others are carried along.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Product {
    pub fields: IndexMap<String, FieldValue>,
}

impl Product {
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Field rendered as trimmed text, `None` when absent or blank
    pub fn text(&self, field: &str) -> Option<String> {
        let value = self.get(field)?.to_string();
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    pub fn name(&self) -> Option<String> {
        self.text("name")
    }

    pub fn url(&self) -> Option<String> {
        self.text("url")
    }

    pub fn image(&self) -> Option<String> {
        self.text("image")
    }

    pub fn price(&self) -> Option<String> {
        self.text("price")
    }

    pub fn currency(&self) -> Option<String> {
        self.text("currency")
    }
}

/// A front-matter value
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    Text(String),
    List(Vec<String>),
    Products(Vec<Product>),
}

/// Keys that may open a dash list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKey {
    Keywords,
    Products,
}

impl ListKey {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "keywords" => Some(ListKey::Keywords),
            "products" => Some(ListKey::Products),
            _ => None,
        }
    }

    fn key(self) -> &'static str {
        match self {
            ListKey::Keywords => "keywords",
            ListKey::Products => "products",
        }
    }

    fn empty(self) -> MetaValue {
        match self {
            ListKey::Keywords => MetaValue::List(Vec::new()),
            ListKey::Products => MetaValue::Products(Vec::new()),
        }
    }
}

/// Front-matter data from a post
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    entries: IndexMap<String, MetaValue>,
}

/// Accumulator threaded through the lines of one block
#[derive(Default)]
struct BlockParser {
    entries: IndexMap<String, MetaValue>,
    active: Option<ListKey>,
}

impl BlockParser {
    fn line(mut self, raw: &str) -> Self {
        let line = raw.trim_end();
        if line.is_empty() {
            return self;
        }

        if let Some(caps) = INLINE_LIST.captures(line) {
            let items = caps[2]
                .split(',')
                .map(|s| unquote(s.trim()).to_string())
                .filter(|s| !s.is_empty())
                .collect();
            self.entries.insert(caps[1].to_string(), MetaValue::List(items));
            self.active = None;
            return self;
        }

        if let Some(caps) = KEY_VALUE.captures(line) {
            let key = caps[1].to_string();
            let value = unquote(caps[2].trim());
            match ListKey::from_key(&key).filter(|_| value.is_empty()) {
                Some(list_key) => {
                    self.entries.insert(key, list_key.empty());
                    self.active = Some(list_key);
                }
                None => {
                    self.entries.insert(key, MetaValue::Text(value.to_string()));
                    self.active = None;
                }
            }
            return self;
        }

        if let (Some(caps), Some(list_key)) = (LIST_ITEM.captures(line), self.active) {
            let item = caps[1].trim();
            match self.entries.get_mut(list_key.key()) {
                Some(MetaValue::List(items)) => items.push(unquote(item).to_string()),
                Some(MetaValue::Products(products)) => products.push(parse_product(item)),
                _ => {}
            }
        }

        self
    }
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> (Self, &str) {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        match BLOCK.captures(content) {
            Some(caps) => {
                let block = caps.get(1).map_or("", |m| m.as_str());
                let body = caps.get(2).map_or("", |m| m.as_str());
                (Self::parse_block(block), body)
            }
            None => (FrontMatter::default(), content),
        }
    }

    /// Parse the lines between the delimiters
    pub fn parse_block(block: &str) -> Self {
        let parser = block.lines().fold(BlockParser::default(), BlockParser::line);
        Self {
            entries: parser.entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries.get(key)
    }

    /// All entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Value of a key as trimmed text; `None` when missing or blank
    ///
    /// Inline lists read as their comma-joined items.
    pub fn text(&self, key: &str) -> Option<String> {
        let value = match self.get(key)? {
            MetaValue::Text(s) => s.trim().to_string(),
            MetaValue::List(items) => items.join(","),
            MetaValue::Products(_) => return None,
        };
        (!value.is_empty()).then_some(value)
    }

    pub fn title(&self) -> Option<String> {
        self.text("title")
    }

    pub fn description(&self) -> Option<String> {
        self.text("description")
    }

    pub fn date(&self) -> Option<String> {
        self.text("date")
    }

    pub fn updated(&self) -> Option<String> {
        self.text("updated")
    }

    pub fn slug(&self) -> Option<String> {
        self.text("slug")
    }

    pub fn cover(&self) -> Option<String> {
        self.text("cover")
    }

    /// Keywords joined with commas, whether written as a list or as text
    pub fn keywords(&self) -> String {
        self.text("keywords").unwrap_or_default()
    }

    /// Declared products; empty unless `products` was a dash list
    pub fn products(&self) -> &[Product] {
        match self.get("products") {
            Some(MetaValue::Products(products)) => products,
            _ => &[],
        }
    }
}

/// Parse `name: "X", url: "https://...", price: 1000` into a record
fn parse_product(item: &str) -> Product {
    let fields = CHUNK_SEPARATOR
        .split(item)
        .filter_map(|pair| {
            let caps = KEY_VALUE.captures(pair)?;
            let value = unquote(caps[2].trim());
            let value = if NUMERIC.is_match(value) {
                value
                    .parse::<f64>()
                    .map(FieldValue::Number)
                    .unwrap_or_else(|_| FieldValue::Text(value.to_string()))
            } else {
                FieldValue::Text(value.to_string())
            };
            Some((caps[1].to_string(), value))
        })
        .collect();

    Product { fields }
}

/// Strip one leading and one trailing quote character
fn unquote(s: &str) -> &str {
    let s = s.strip_prefix(['"', '\'']).unwrap_or(s);
    s.strip_suffix(['"', '\'']).unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalars() {
        let content = r#"---
title: "Hello World"
description: 'A first post'
date: 2024-01-15
updated: 2024-02-01
slug: hello
cover: /img/cover.jpg
---

This is the content.
"#;

        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title(), Some("Hello World".to_string()));
        assert_eq!(fm.description(), Some("A first post".to_string()));
        assert_eq!(fm.date(), Some("2024-01-15".to_string()));
        assert_eq!(fm.updated(), Some("2024-02-01".to_string()));
        assert_eq!(fm.slug(), Some("hello".to_string()));
        assert_eq!(fm.cover(), Some("/img/cover.jpg".to_string()));
        assert_eq!(body, "This is the content.\n");
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just markdown\n\ntext";
        let (fm, body) = FrontMatter::parse(content);
        assert!(fm.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_unclosed_block_is_body() {
        let content = "---\ntitle: Oops\n\nno closing line";
        let (fm, body) = FrontMatter::parse(content);
        assert!(fm.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_delimiter_must_be_alone_on_line() {
        let content = "--- title: x ---\nbody";
        let (fm, body) = FrontMatter::parse(content);
        assert!(fm.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_empty_block() {
        let (fm, body) = FrontMatter::parse("---\n---\nbody");
        assert!(fm.is_empty());
        assert_eq!(body, "body");
    }

    #[test]
    fn test_inline_list() {
        let (fm, _) = FrontMatter::parse("---\nkeywords: [\"rust\", 'blog', , ssg ]\n---\n");
        assert_eq!(
            fm.get("keywords"),
            Some(&MetaValue::List(vec![
                "rust".to_string(),
                "blog".to_string(),
                "ssg".to_string()
            ]))
        );
        assert_eq!(fm.keywords(), "rust,blog,ssg");
    }

    #[test]
    fn test_block_keywords_survive_blank_lines() {
        let content = "---\nkeywords:\n- rust\n\n  - \"static site\"\ntitle: T\n- ignored\n---\n";
        let (fm, _) = FrontMatter::parse(content);
        assert_eq!(
            fm.get("keywords"),
            Some(&MetaValue::List(vec![
                "rust".to_string(),
                "static site".to_string()
            ]))
        );
        assert_eq!(fm.title(), Some("T".to_string()));
    }

    #[test]
    fn test_products() {
        let content = r#"---
products:
- name: "Coffee Grinder", url: "https://shop.example.com/g", image: /img/g.jpg, price: 45000, currency: KRW
- name: Kettle, price: 19.5, color: red
- name: Filter, price: "1,000"
---
"#;
        let (fm, _) = FrontMatter::parse(content);
        let products = fm.products();
        assert_eq!(products.len(), 3);

        assert_eq!(products[0].name(), Some("Coffee Grinder".to_string()));
        assert_eq!(
            products[0].url(),
            Some("https://shop.example.com/g".to_string())
        );
        assert_eq!(products[0].get("price"), Some(&FieldValue::Number(45000.0)));
        assert_eq!(products[0].price(), Some("45000".to_string()));

        assert_eq!(products[1].get("price"), Some(&FieldValue::Number(19.5)));
        assert_eq!(products[1].price(), Some("19.5".to_string()));
        assert_eq!(
            products[1].get("color"),
            Some(&FieldValue::Text("red".to_string()))
        );
        assert_eq!(products[1].url(), None);

        // Chunks are comma separated, so a comma inside a value splits it.
        assert_eq!(products[2].get("price"), Some(&FieldValue::Number(1.0)));
        assert_eq!(products[2].fields.len(), 2);
    }

    #[test]
    fn test_list_item_without_active_key_is_ignored() {
        let (fm, _) = FrontMatter::parse("---\n- orphan\ntitle: x\n---\n");
        assert_eq!(fm.iter().count(), 1);
        assert_eq!(fm.title(), Some("x".to_string()));
    }

    #[test]
    fn test_scalar_resets_active_list() {
        let (fm, _) = FrontMatter::parse("---\nkeywords:\n- a\ndate: 2024-01-01\n- b\n---\n");
        assert_eq!(fm.keywords(), "a");
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let content = "---\n!!! not a key\ntitle: Kept\n  nested: ignored\n: empty\n---\nbody";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.iter().count(), 1);
        assert_eq!(fm.title(), Some("Kept".to_string()));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_unknown_keys_preserved_in_order() {
        let (fm, _) = FrontMatter::parse("---\nauthor: Kim\ntitle: x\nlayout: wide\n---\n");
        let keys: Vec<_> = fm.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["author", "title", "layout"]);
        assert_eq!(fm.text("author"), Some("Kim".to_string()));
    }

    #[test]
    fn test_crlf_matches_lf() {
        let lf = "---\ntitle: Same\nkeywords:\n- a\n- b\n---\n\nBody\n";
        let crlf = lf.replace('\n', "\r\n");
        let (fm_lf, body_lf) = FrontMatter::parse(lf);
        let (fm_crlf, body_crlf) = FrontMatter::parse(&crlf);
        assert_eq!(fm_lf, fm_crlf);
        assert_eq!(body_lf, "Body\n");
        assert_eq!(body_crlf, "Body\r\n");
    }

    #[test]
    fn test_empty_scalar_falls_back() {
        let (fm, _) = FrontMatter::parse("---\ntitle: \"\"\nslug:\n---\n");
        assert_eq!(fm.get("title"), Some(&MetaValue::Text(String::new())));
        assert_eq!(fm.title(), None);
        assert_eq!(fm.slug(), None);
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"a\""), "a");
        assert_eq!(unquote("'a"), "a");
        assert_eq!(unquote("\""), "");
        assert_eq!(unquote("it's"), "it's");
    }
}
