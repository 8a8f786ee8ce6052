//! Post model

use super::FrontMatter;
use crate::config::SiteConfig;
use crate::helpers::{date_segments, excerpt, slugify, BuildDate};

/// A blog post, resolved from its front-matter and rendered body
///
/// Every field is final: defaults have already been applied, so the
/// generator never has to look at the raw front-matter again except for
/// products.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// Source file name, e.g. `hello-world.md`
    pub source: String,

    pub title: String,

    /// Description from front-matter; may be empty
    pub description: String,

    /// Plain-text opening of the rendered body
    pub excerpt: String,

    /// Comma-separated keywords
    pub keywords: String,

    /// Publication date, `YYYY-MM-DD` by convention
    pub date: String,

    /// Last update, falls back to `date`
    pub updated: String,

    pub slug: String,

    /// Cover image as written (relative or absolute)
    pub cover: String,

    pub year: String,
    pub month: String,

    /// Output path relative to the output directory
    pub path: String,

    /// Absolute URL of the generated page
    pub url: String,
}

impl Post {
    /// Resolve a post from a parsed document
    ///
    /// `stem` is the source file name without its `.md` extension; it stands
    /// in for a missing title and slug.
    pub fn resolve(
        source: &str,
        stem: &str,
        fm: &FrontMatter,
        body_html: &str,
        config: &SiteConfig,
        build_date: &BuildDate,
    ) -> Self {
        let title = fm.title().unwrap_or_else(|| stem.trim().to_string());
        let date = fm.date().unwrap_or_else(|| build_date.today.clone());
        let updated = fm.updated().unwrap_or_else(|| date.clone());
        let slug = slugify(&fm.slug().unwrap_or_else(|| stem.to_string()));
        let cover = fm
            .cover()
            .unwrap_or_else(|| config.default_image.trim().to_string());

        let (year, month) = date_segments(&date);
        let path = [year.as_str(), month.as_str(), slug.as_str(), "index.html"]
            .iter()
            .filter(|segment| !segment.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("/");
        let url = format!("{}/{}", config.base_url, path);

        Self {
            source: source.to_string(),
            title,
            description: fm.description().unwrap_or_default(),
            excerpt: excerpt(body_html, config.excerpt_length),
            keywords: fm.keywords(),
            date,
            updated,
            slug,
            cover,
            year,
            month,
            path,
            url,
        }
    }

    /// Description for meta tags: the declared one, else the excerpt
    pub fn summary(&self) -> &str {
        if self.description.is_empty() {
            &self.excerpt
        } else {
            &self.description
        }
    }
}
