//! postpress: a small static blog builder
//!
//! Markdown posts with a frontmatter block go in; a plain HTML site with a
//! home listing, sitemap and robots file comes out.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod templates;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use content::{ContentLoader, Post};
use generator::{BuildPaths, BuildReport};
use helpers::BuildDate;

/// A site rooted at one directory
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown posts
    pub content_dir: PathBuf,
    /// `layout.html`, `post.html` and `styles.css`
    pub template_dir: PathBuf,
    /// Generated site
    pub output_dir: PathBuf,
    /// Copied verbatim into the output
    pub static_dir: PathBuf,
}

impl Site {
    /// Open the site in `base_dir`, using the first config file found there
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config = config::SiteConfig::discover(&base_dir)
            .with_context(|| format!("Failed to load config from {:?}", base_dir))?;
        Ok(Self::from_config(base_dir, config))
    }

    /// Open the site in `base_dir` with an explicit config file
    pub fn with_config_file<P: AsRef<Path>, C: AsRef<Path>>(base_dir: P, config_file: C) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(config_file.as_ref());
        let config = config::SiteConfig::load(&config_path)
            .with_context(|| format!("Failed to load config {:?}", config_path))?;
        Ok(Self::from_config(base_dir, config))
    }

    pub fn from_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let content_dir = base_dir.join(&config.content_dir);
        let template_dir = base_dir.join(&config.template_dir);
        let output_dir = base_dir.join(&config.output_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Self {
            config,
            base_dir,
            content_dir,
            template_dir,
            output_dir,
            static_dir,
        }
    }

    /// Today in the configured timezone
    pub fn build_date(&self) -> Result<BuildDate> {
        let tz = self.config.tz()?;
        Ok(BuildDate::now(tz.as_ref()))
    }

    pub fn build_paths(&self) -> BuildPaths {
        BuildPaths {
            template_dir: self.template_dir.clone(),
            output_dir: self.output_dir.clone(),
            static_dir: self.static_dir.clone(),
        }
    }

    /// Resolve every post without rendering pages, newest update first
    pub fn load_posts(&self, build_date: &BuildDate) -> Result<Vec<Post>> {
        let documents = ContentLoader::new(&self.content_dir).load_documents()?;
        let posts: Vec<Post> = documents
            .iter()
            .map(|doc| generator::resolve_document(doc, &self.config, build_date).post)
            .collect();
        Ok(generator::sort_by_updated(&posts)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Build the static site
    pub fn build(&self) -> Result<BuildReport> {
        commands::build::run(self)
    }

    /// Clean the output directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str, slug: Option<&str>) -> Result<PathBuf> {
        commands::new::run(self, title, slug)
    }

    /// List posts in home-listing order
    pub fn list(&self) -> Result<()> {
        commands::list::run(self)
    }
}
