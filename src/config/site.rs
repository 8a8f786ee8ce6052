//! Site configuration (site.config.json)

use chrono_tz::Tz;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file names looked up in the site root, in order
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "site.config.json",
    "site.config.yaml",
    "site.config.yml",
    "site.config.toml",
];

/// Errors raised while loading the site configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid YAML in {path:?}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("invalid TOML in {path:?}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("unsupported config format: {0:?}")]
    UnsupportedFormat(PathBuf),

    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),
}

/// Site-wide configuration, read once per build
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    // Site
    pub site_name: String,
    pub base_url: String,
    pub default_image: String,
    pub disclosure: String,
    pub timezone: Option<String>,

    // Directory
    pub content_dir: String,
    pub template_dir: String,
    pub output_dir: String,
    pub static_dir: String,

    // Home page
    pub home_limit: usize,
    pub excerpt_length: usize,
    pub empty_message: String,

    // Products
    pub default_currency: String,
    pub product_cta: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "My Blog".to_string(),
            base_url: String::new(),
            default_image: "/public/og.jpg".to_string(),
            disclosure: String::new(),
            timezone: None,

            content_dir: "content/posts".to_string(),
            template_dir: "src".to_string(),
            output_dir: "docs".to_string(),
            static_dir: "public".to_string(),

            home_limit: 10,
            excerpt_length: 160,
            empty_message: "No posts yet. Publish your first post.".to_string(),

            default_currency: "KRW".to_string(),
            product_cta: "Check the lowest price".to_string(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file, picking the format by extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let config: SiteConfig = match extension.as_deref() {
            Some("json") => serde_json::from_str(&content).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?,
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            Some("toml") => toml::from_str(&content).map_err(|source| ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            })?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };

        Ok(config.normalized())
    }

    /// Load the first default config file present in `base_dir`, or defaults
    pub fn discover<P: AsRef<Path>>(base_dir: P) -> Result<Self, ConfigError> {
        for name in DEFAULT_CONFIG_FILES {
            let path = base_dir.as_ref().join(name);
            if path.exists() {
                tracing::debug!("Loading config from {:?}", path);
                return Self::load(&path);
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Apply invariants that hold regardless of how the config was written
    fn normalized(mut self) -> Self {
        self.base_url = self.base_url.trim_end_matches('/').to_string();
        self
    }

    /// Parsed timezone for computing the build date
    pub fn tz(&self) -> Result<Option<Tz>, ConfigError> {
        match self.timezone.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(name) => name
                .parse::<Tz>()
                .map(Some)
                .map_err(|_| ConfigError::UnknownTimezone(name.to_string())),
        }
    }
}
