//! Site configuration loading.
//!
//! Only the `version` key of `_config.yml` is read; every other key is left
//! to the site generator.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use serde_yaml::Value;
use tracing::{debug, info};

use crate::error::{VersionError, VersionResult};
use crate::version::Version;

/// Settings read from the site configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Path the configuration was read from.
    pub path: PathBuf,
    /// Site version, defaulted when the key is absent.
    pub version: Version,
}

#[derive(Debug, Default, Deserialize)]
struct RawSiteConfig {
    /// `None` when the key is absent, `Some(Value::Null)` when it is empty.
    #[serde(default, deserialize_with = "present")]
    version: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl SiteConfig {
    /// Default configuration file name, relative to the site root.
    pub const FILE_NAME: &'static str = "_config.yml";

    /// Load the configuration file at `path`.
    pub fn load(path: impl AsRef<Path>) -> VersionResult<Self> {
        let path = path.as_ref();
        debug!("Loading site configuration from {:?}", path);

        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => VersionError::ConfigNotFound(path.to_path_buf()),
            _ => VersionError::Io(e),
        })?;

        let config = Self::parse(&content, path)?;
        info!("Site version: {}", config.version);
        Ok(config)
    }

    /// Parse configuration text. `path` is only used for error reporting.
    pub fn parse(content: &str, path: impl Into<PathBuf>) -> VersionResult<Self> {
        let path = path.into();
        let parse_error = |source: serde_yaml::Error| VersionError::ConfigParse {
            path: path.clone(),
            source,
        };

        let document: Value = serde_yaml::from_str(content).map_err(parse_error)?;

        // An empty document carries no keys at all.
        let raw = if document.is_null() {
            RawSiteConfig::default()
        } else {
            serde_yaml::from_value(document).map_err(parse_error)?
        };

        let version = match raw.version {
            None => Version::default(),
            Some(value) => version_from_value(&value)?,
        };

        Ok(Self { path, version })
    }
}

/// Null, `false`, zero and blank strings are all treated as no version.
fn version_from_value(value: &Value) -> VersionResult<Version> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Bool(false) => {
            return Err(VersionError::InvalidVersion("version is false".to_string()));
        }
        Value::Number(n) if n.as_f64() == Some(0.0) => {
            return Err(VersionError::InvalidVersion("version is zero".to_string()));
        }
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => {
            return Err(VersionError::InvalidVersion("version is empty".to_string()));
        }
        _ => {
            return Err(VersionError::InvalidVersion(
                "version must be a string or a number".to_string(),
            ));
        }
    };

    if text.trim().is_empty() {
        return Err(VersionError::InvalidVersion("version is empty".to_string()));
    }

    Ok(Version::new(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_string_version() {
        let config = SiteConfig::parse("title: Hyde\nversion: \"2.0\"\n", "_config.yml").unwrap();
        assert_eq!(config.version.as_str(), "2.0");
    }

    #[test]
    fn test_numeric_versions() {
        let config = SiteConfig::parse("version: 3\n", "_config.yml").unwrap();
        assert_eq!(config.version.as_str(), "3");

        let config = SiteConfig::parse("version: 1.5\n", "_config.yml").unwrap();
        assert_eq!(config.version.as_str(), "1.5");
    }

    #[test]
    fn test_missing_version_uses_default() {
        let config = SiteConfig::parse("title: Hyde\nbaseurl: /\n", "_config.yml").unwrap();
        assert_eq!(config.version, Version::default());
    }

    #[test]
    fn test_empty_document_uses_default() {
        let config = SiteConfig::parse("# nothing here\n", "_config.yml").unwrap();
        assert_eq!(config.version.as_str(), Version::DEFAULT);
    }

    #[test]
    fn test_null_version_is_rejected() {
        let err = SiteConfig::parse("version:\n", "_config.yml").unwrap_err();
        assert!(matches!(err, VersionError::InvalidVersion(_)));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_zero_and_false_versions_are_rejected() {
        for content in ["version: 0\n", "version: 0.0\n", "version: false\n"] {
            let err = SiteConfig::parse(content, "_config.yml").unwrap_err();
            assert!(matches!(err, VersionError::InvalidVersion(_)), "{}", content);
            assert!(err.is_config_error());
        }

        // Quoted text is kept as written.
        let config = SiteConfig::parse("version: \"0\"\n", "_config.yml").unwrap();
        assert_eq!(config.version.as_str(), "0");
    }

    #[test]
    fn test_blank_version_is_rejected() {
        let err = SiteConfig::parse("version: \"  \"\n", "_config.yml").unwrap_err();
        assert!(matches!(err, VersionError::InvalidVersion(_)));
    }

    #[test]
    fn test_list_version_is_rejected() {
        let err = SiteConfig::parse("version: [1, 2]\n", "_config.yml").unwrap_err();
        assert!(matches!(err, VersionError::InvalidVersion(_)));
    }

    #[test]
    fn test_unparsable_config() {
        let err = SiteConfig::parse("version: [unclosed\n", "_config.yml").unwrap_err();
        assert!(matches!(err, VersionError::ConfigParse { .. }));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_non_mapping_config() {
        let err = SiteConfig::parse("just a title\n", "_config.yml").unwrap_err();
        assert!(matches!(err, VersionError::ConfigParse { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = tempdir().unwrap();
        let err = SiteConfig::load(temp.path().join(SiteConfig::FILE_NAME)).unwrap_err();
        assert!(matches!(err, VersionError::ConfigNotFound(_)));
    }

    #[test]
    fn test_load_from_disk() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(SiteConfig::FILE_NAME);
        fs::write(&path, "version: \"1.1\"\n").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.version.as_str(), "1.1");
        assert_eq!(config.path, path);
    }
}
