//! Initialize a new site

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::DEFAULT_CONFIG_FILES;
use crate::templates::{
    DEFAULT_LAYOUT, DEFAULT_POST, DEFAULT_STYLES, LAYOUT_FILE, POST_FILE, STYLES_FILE,
};

const DEFAULT_CONFIG: &str = r#"{
  "siteName": "My Blog",
  "baseUrl": "https://example.com",
  "defaultImage": "/public/og.jpg",
  "disclosure": "This post contains affiliate links. We may earn a commission on purchases.",
  "timezone": "UTC"
}
"#;

const WELCOME_POST: &str = r#"---
title: "Hello, world"
description: "The first post on a fresh site."
date: "2024-01-01"
keywords: [welcome, getting started]
---

Welcome to your new blog. Edit `content/posts/hello-world.md` or run
`postpress new "My first post"` to start writing.

## What you can use

- **bold** and *italic* text
- [outbound links](https://example.com)
"#;

/// Write a skeleton site into `target_dir`
///
/// Files that already exist are left alone. Returns the files written.
pub fn init_site(target_dir: &Path) -> Result<Vec<PathBuf>> {
    let files: [(PathBuf, &str); 5] = [
        (PathBuf::from(DEFAULT_CONFIG_FILES[0]), DEFAULT_CONFIG),
        (Path::new("src").join(LAYOUT_FILE), DEFAULT_LAYOUT),
        (Path::new("src").join(POST_FILE), DEFAULT_POST),
        (Path::new("src").join(STYLES_FILE), DEFAULT_STYLES),
        (PathBuf::from("content/posts/hello-world.md"), WELCOME_POST),
    ];

    fs::create_dir_all(target_dir.join("public"))
        .with_context(|| format!("Failed to create dir {:?}", target_dir))?;

    let mut written = Vec::new();
    for (relative, contents) in files {
        let path = target_dir.join(&relative);
        if path.exists() {
            tracing::info!("Skipped existing {:?}", path);
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {:?}", parent))?;
        }
        fs::write(&path, contents).with_context(|| format!("Failed to write {:?}", path))?;
        tracing::debug!("Created: {:?}", path);
        written.push(relative);
    }

    Ok(written)
}
