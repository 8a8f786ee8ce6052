//! Build the static site

use anyhow::Result;

use crate::content::ContentLoader;
use crate::generator::{BuildReport, Generator};
use crate::Site;

/// Full build: load every document, render every page, write everything
pub fn run(site: &Site) -> Result<BuildReport> {
    let start = std::time::Instant::now();

    let build_date = site.build_date()?;
    let documents = ContentLoader::new(&site.content_dir).load_documents()?;
    tracing::info!(
        "Loaded {} documents from {:?}",
        documents.len(),
        site.content_dir
    );

    let generator = Generator::new(&site.config, site.build_paths(), build_date);
    let report = generator.generate(&documents)?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} files in {:.2}s",
        report.files.len() + report.static_files,
        duration.as_secs_f64()
    );

    Ok(report)
}
