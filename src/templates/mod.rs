//! Page templates
//!
//! Templates are plain HTML with `{{NAME}}` tokens. Rendering is one regex
//! pass over the template, so text coming from a substituted value is never
//! scanned for tokens again.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Layout written by `init`
pub const DEFAULT_LAYOUT: &str = include_str!("layout.html");

/// Post body template written by `init`
pub const DEFAULT_POST: &str = include_str!("post.html");

/// Stylesheet written by `init`
pub const DEFAULT_STYLES: &str = include_str!("styles.css");

/// File names inside the template directory
pub const LAYOUT_FILE: &str = "layout.html";
pub const POST_FILE: &str = "post.html";
pub const STYLES_FILE: &str = "styles.css";

lazy_static! {
    static ref TOKEN: Regex = Regex::new(r"\{\{([A-Z_]+)\}\}").unwrap();
}

/// Errors raised while reading templates
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("template not found: {0:?}")]
    NotFound(PathBuf),

    #[error("failed to read template {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The named slots a template may contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    // Layout
    Base,
    Title,
    Description,
    Keywords,
    Canonical,
    OgImage,
    JsonLd,
    SiteName,
    Disclosure,
    Year,
    Content,
    // Post body
    PostTitle,
    Date,
    Updated,
    ProductCards,
    PostHtml,
}

/// The first `LAYOUT_SLOTS` entries of [`Placeholder::ALL`] belong to the layout
const LAYOUT_SLOTS: usize = 11;

impl Placeholder {
    pub const ALL: [Placeholder; 16] = [
        Placeholder::Base,
        Placeholder::Title,
        Placeholder::Description,
        Placeholder::Keywords,
        Placeholder::Canonical,
        Placeholder::OgImage,
        Placeholder::JsonLd,
        Placeholder::SiteName,
        Placeholder::Disclosure,
        Placeholder::Year,
        Placeholder::Content,
        Placeholder::PostTitle,
        Placeholder::Date,
        Placeholder::Updated,
        Placeholder::ProductCards,
        Placeholder::PostHtml,
    ];

    /// Name as written between the braces
    pub fn name(self) -> &'static str {
        match self {
            Placeholder::Base => "BASE",
            Placeholder::Title => "TITLE",
            Placeholder::Description => "DESCRIPTION",
            Placeholder::Keywords => "KEYWORDS",
            Placeholder::Canonical => "CANONICAL",
            Placeholder::OgImage => "OG_IMAGE",
            Placeholder::JsonLd => "JSON_LD",
            Placeholder::SiteName => "SITENAME",
            Placeholder::Disclosure => "DISCLOSURE",
            Placeholder::Year => "YEAR",
            Placeholder::Content => "CONTENT",
            Placeholder::PostTitle => "POST_TITLE",
            Placeholder::Date => "DATE",
            Placeholder::Updated => "UPDATED",
            Placeholder::ProductCards => "PRODUCT_CARDS",
            Placeholder::PostHtml => "POST_HTML",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// `{{NAME}}`
    pub fn token(self) -> String {
        format!("{{{{{}}}}}", self.name())
    }
}

/// Values for one render
#[derive(Debug, Clone, Default)]
pub struct Substitutions {
    values: HashMap<Placeholder, String>,
}

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, placeholder: Placeholder, value: impl Into<String>) -> Self {
        self.values.insert(placeholder, value.into());
        self
    }

    pub fn get(&self, placeholder: Placeholder) -> Option<&str> {
        self.values.get(&placeholder).map(String::as_str)
    }
}

/// A loaded template
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    source: String,
}

impl Template {
    pub fn from_source(name: &str, source: &str) -> Self {
        Self {
            name: name.to_string(),
            source: source.to_string(),
        }
    }

    /// Read a template file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(TemplateError::NotFound(path.to_path_buf()));
        }
        let source = fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self { name, source })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Known placeholders this template uses, in order of first appearance
    pub fn placeholders(&self) -> Vec<Placeholder> {
        let mut found = Vec::new();
        for caps in TOKEN.captures_iter(&self.source) {
            if let Some(p) = Placeholder::from_name(&caps[1]) {
                if !found.contains(&p) {
                    found.push(p);
                }
            }
        }
        found
    }

    /// Replace every `{{NAME}}` token
    ///
    /// Tokens without a value, known or not, are replaced by the empty
    /// string so no token survives into the output.
    pub fn render(&self, substitutions: &Substitutions) -> String {
        TOKEN
            .replace_all(&self.source, |caps: &Captures| {
                match Placeholder::from_name(&caps[1]).and_then(|p| substitutions.get(p)) {
                    Some(value) => value.to_string(),
                    None => {
                        tracing::debug!("{}: no value for {}", self.name, &caps[0]);
                        String::new()
                    }
                }
            })
            .into_owned()
    }
}

/// The two templates a build needs
#[derive(Debug, Clone)]
pub struct Templates {
    /// Outer page layout
    pub layout: Template,
    /// Post body, inserted into the layout's content slot
    pub post: Template,
}

impl Templates {
    /// Load `layout.html` and `post.html` from the template directory
    pub fn load<P: AsRef<Path>>(template_dir: P) -> Result<Self, TemplateError> {
        let dir = template_dir.as_ref();
        Ok(Self {
            layout: Template::load(dir.join(LAYOUT_FILE))?,
            post: Template::load(dir.join(POST_FILE))?,
        })
    }

    /// Contract slots a template never mentions, as `(template name, slot)`
    pub fn missing_slots(&self) -> Vec<(&str, Placeholder)> {
        let (layout_slots, post_slots) = Placeholder::ALL.split_at(LAYOUT_SLOTS);
        [(&self.layout, layout_slots), (&self.post, post_slots)]
            .into_iter()
            .flat_map(|(template, slots)| {
                let used = template.placeholders();
                slots
                    .iter()
                    .filter(move |slot| !used.contains(slot))
                    .map(move |slot| (template.name(), *slot))
            })
            .collect()
    }

    /// The templates `init` writes
    pub fn builtin() -> Self {
        Self {
            layout: Template::from_source(LAYOUT_FILE, DEFAULT_LAYOUT),
            post: Template::from_source(POST_FILE, DEFAULT_POST),
        }
    }
}
