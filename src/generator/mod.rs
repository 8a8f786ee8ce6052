//! Generator module - turns loaded documents into the finished site
//!
//! Every input is read and every page rendered in memory before the first
//! file is written, so a failed setup leaves the output directory untouched.

mod aggregate;
mod assemble;
mod jsonld;
mod products;

pub use aggregate::{home_listing, robots, sitemap, sort_by_updated};
pub use assemble::{assemble, resolve_document, Assembler, RenderedPost, ResolvedDocument};
pub use jsonld::{post_json_ld, site_json_ld};
pub use products::product_cards;

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::config::SiteConfig;
use crate::content::Document;
use crate::helpers::BuildDate;
use crate::templates::{Templates, STYLES_FILE};

/// Where a build reads its inputs and writes its outputs
#[derive(Debug, Clone)]
pub struct BuildPaths {
    pub template_dir: PathBuf,
    pub output_dir: PathBuf,
    pub static_dir: PathBuf,
}

/// What a build produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub posts: usize,
    /// Every file written, relative to the output directory
    pub files: Vec<PathBuf>,
    pub static_files: usize,
}

/// A page waiting to be written, relative to the output directory
struct Output {
    path: PathBuf,
    contents: String,
}

/// Static site generator
pub struct Generator<'a> {
    config: &'a SiteConfig,
    paths: BuildPaths,
    build_date: BuildDate,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a SiteConfig, paths: BuildPaths, build_date: BuildDate) -> Self {
        Self {
            config,
            paths,
            build_date,
        }
    }

    /// Build the whole site from the given documents
    pub fn generate(&self, documents: &[Document]) -> Result<BuildReport> {
        let templates = Templates::load(&self.paths.template_dir)
            .with_context(|| format!("Failed to load templates from {:?}", self.paths.template_dir))?;
        for (template, slot) in templates.missing_slots() {
            tracing::warn!("{} has no {} slot", template, slot.token());
        }

        let styles_path = self.paths.template_dir.join(STYLES_FILE);
        let styles = if styles_path.is_file() {
            Some(
                fs::read(&styles_path)
                    .with_context(|| format!("Failed to read {:?}", styles_path))?,
            )
        } else {
            None
        };

        let (posts, outputs) = self.render(documents, &templates);
        tracing::info!("Rendered {} posts", posts);

        fs::create_dir_all(&self.paths.output_dir)
            .with_context(|| format!("Failed to create dir {:?}", self.paths.output_dir))?;

        let mut report = BuildReport {
            posts,
            ..BuildReport::default()
        };

        for output in outputs {
            self.write(&output.path, output.contents.as_bytes())?;
            report.files.push(output.path);
        }

        if let Some(styles) = styles {
            let path = PathBuf::from(STYLES_FILE);
            self.write(&path, &styles)?;
            report.files.push(path);
        }

        report.static_files = self.copy_static_dir()?;

        Ok(report)
    }

    /// Render every page in memory
    fn render(&self, documents: &[Document], templates: &Templates) -> (usize, Vec<Output>) {
        let assembler = Assembler::new(self.config, templates, &self.build_date);
        let mut outputs = Vec::with_capacity(documents.len() + 3);
        let mut seen: HashMap<String, String> = HashMap::new();
        let mut posts = Vec::with_capacity(documents.len());

        for document in documents {
            let rendered = assembler.assemble(document);
            if let Some(previous) = seen.insert(rendered.post.path.clone(), rendered.post.source.clone())
            {
                tracing::warn!(
                    "{} and {} both map to {}; the later file wins",
                    previous,
                    rendered.post.source,
                    rendered.post.path
                );
            }
            outputs.push(Output {
                path: PathBuf::from(&rendered.post.path),
                contents: rendered.html,
            });
            posts.push(rendered.post);
        }

        let sorted = sort_by_updated(&posts);
        let listing = home_listing(&sorted, self.config);

        outputs.push(Output {
            path: PathBuf::from("index.html"),
            contents: assembler.home_page(&listing),
        });
        outputs.push(Output {
            path: PathBuf::from("sitemap.xml"),
            contents: sitemap(&sorted, self.config, &self.build_date),
        });
        outputs.push(Output {
            path: PathBuf::from("robots.txt"),
            contents: robots(self.config),
        });

        (posts.len(), outputs)
    }

    fn write(&self, relative: &Path, contents: &[u8]) -> Result<()> {
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            anyhow::bail!("Refusing to write outside the output directory: {:?}", relative);
        }
        let output_path = self.paths.output_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {:?}", parent))?;
        }
        fs::write(&output_path, contents)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }

    /// Copy the static directory into the output under its own name
    fn copy_static_dir(&self) -> Result<usize> {
        let static_dir = &self.paths.static_dir;
        if !static_dir.is_dir() {
            return Ok(0);
        }

        let target = match static_dir.file_name() {
            Some(name) => self.paths.output_dir.join(name),
            None => self.paths.output_dir.clone(),
        };

        let mut copied = 0;
        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.with_context(|| format!("Failed to walk {:?}", static_dir))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            let dest = target.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create dir {:?}", parent))?;
            }
            fs::copy(path, &dest)
                .with_context(|| format!("Failed to copy {:?} to {:?}", path, dest))?;
            copied += 1;
        }

        tracing::info!("Copied {} static files from {:?}", copied, static_dir);
        Ok(copied)
    }
}
