//! Content loader - reads markdown documents from the content directory

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A source document, read but not yet parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// File name including extension
    pub file_name: String,
    /// File name without the `.md` extension
    pub stem: String,
    /// Full file contents
    pub raw: String,
}

impl Document {
    pub fn new(file_name: &str, raw: String) -> Self {
        Self {
            file_name: file_name.to_string(),
            stem: strip_md_extension(file_name).to_string(),
            raw,
        }
    }
}

/// Loads documents from a single directory (not recursive)
pub struct ContentLoader {
    content_dir: PathBuf,
}

impl ContentLoader {
    pub fn new<P: AsRef<Path>>(content_dir: P) -> Self {
        Self {
            content_dir: content_dir.as_ref().to_path_buf(),
        }
    }

    /// Load every `*.md` file, sorted by file name
    ///
    /// A missing directory yields no documents. A file that exists but
    /// cannot be read is an error.
    pub fn load_documents(&self) -> Result<Vec<Document>> {
        if !self.content_dir.is_dir() {
            tracing::info!("Content directory {:?} not found", self.content_dir);
            return Ok(Vec::new());
        }

        let pattern = format!(
            "{}/*.md",
            glob::Pattern::escape(&self.content_dir.to_string_lossy())
        );

        let mut documents = Vec::new();
        for entry in glob::glob(&pattern)
            .with_context(|| format!("Invalid content pattern {:?}", pattern))?
        {
            let path = entry.with_context(|| {
                format!("Failed to list content directory {:?}", self.content_dir)
            })?;
            if !path.is_file() {
                continue;
            }

            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                tracing::warn!("Skipping file with non UTF-8 name: {:?}", path);
                continue;
            };

            let raw = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read post {:?}", path))?;
            documents.push(Document::new(file_name, raw));
        }

        documents.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        tracing::debug!("Loaded {} documents from {:?}", documents.len(), self.content_dir);

        Ok(documents)
    }
}

/// Remove a trailing `.md`, any case
fn strip_md_extension(file_name: &str) -> &str {
    match file_name.len().checked_sub(3) {
        Some(cut)
            if file_name.is_char_boundary(cut)
                && file_name[cut..].eq_ignore_ascii_case(".md") =>
        {
            &file_name[..cut]
        }
        _ => file_name,
    }
}
