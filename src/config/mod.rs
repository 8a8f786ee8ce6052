//! Configuration module

mod site;

pub use site::{ConfigError, SiteConfig, DEFAULT_CONFIG_FILES};
