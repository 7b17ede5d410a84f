//! Error types for site versioning.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for versioning operations.
pub type VersionResult<T> = Result<T, VersionError>;

/// Errors that can occur while versioning a site.
#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Error parsing configuration {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid version in configuration: {0}")]
    InvalidVersion(String),

    #[error("{0} doesn't follow versioning pattern")]
    MalformedName(PathBuf),

    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid substitution rule {rule}: {source}")]
    InvalidRule {
        rule: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Copy failed: {0}")]
    Copy(#[from] fs_extra::error::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VersionError {
    /// Whether this error comes from loading the site configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound(_) | Self::ConfigParse { .. } | Self::InvalidVersion(_)
        )
    }
}
