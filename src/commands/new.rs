//! Create a new post

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::helpers::slugify;
use crate::Site;

/// Scaffold `{content_dir}/{slug}.md`, refusing to overwrite
pub fn run(site: &Site, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let build_date = site.build_date()?;
    let slug = slugify(slug.unwrap_or(title));

    fs::create_dir_all(&site.content_dir)
        .with_context(|| format!("Failed to create dir {:?}", site.content_dir))?;

    let file_path = site.content_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    fs::write(&file_path, scaffold(title, &build_date.today))
        .with_context(|| format!("Failed to write {:?}", file_path))?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

fn scaffold(title: &str, today: &str) -> String {
    // quotes keep a title with `:` or `#` in one value
    let title = title.replace('"', "'");
    format!(
        "---\ntitle: \"{title}\"\ndescription: \"\"\ndate: \"{today}\"\nkeywords: []\n---\n\nWrite your post here.\n"
    )
}
