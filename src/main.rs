//! CLI entry point for postpress

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postpress::Site;

#[derive(Parser)]
#[command(name = "postpress")]
#[command(version)]
#[command(about = "Build a static blog from Markdown posts", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Config file, relative to the site directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to the site directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// File name slug (defaults to the slugified title)
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Build the site
    #[command(visible_alias = "generate", alias = "g")]
    Build,

    /// Remove the output folder
    Clean,

    /// List posts, most recently updated first
    List,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "postpress=debug,info"
    } else {
        "postpress=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let open_site = || -> Result<Site> {
        match &cli.config {
            Some(file) => Site::with_config_file(&base_dir, file),
            None => Site::new(&base_dir),
        }
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            let written = postpress::commands::init::init_site(&target_dir)?;
            println!(
                "Initialized site in {:?} ({} files written)",
                target_dir,
                written.len()
            );
        }

        Commands::New { title, slug } => {
            let site = open_site()?;
            let path = site.new_post(&title, slug.as_deref())?;
            println!("Created: {:?}", path);
        }

        Commands::Build => {
            let site = open_site()?;
            tracing::info!("Building site...");
            let report = site.build()?;
            println!(
                "Built {} posts into {:?} ({} pages, {} static files)",
                report.posts,
                site.output_dir,
                report.files.len(),
                report.static_files
            );
        }

        Commands::Clean => {
            let site = open_site()?;
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List => {
            let site = open_site()?;
            site.list()?;
        }

        Commands::Version => {
            println!("postpress version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
