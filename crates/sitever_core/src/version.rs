//! The site version and the filename suffix derived from it.

use std::fmt;
use std::path::{Path, PathBuf};

/// A site version as written in the configuration file.
///
/// No format is imposed: `2.0`, `3` and `beta` are all valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version(String);

impl Version {
    /// Version used when the configuration has no `version` key.
    pub const DEFAULT: &'static str = "0.0.1";

    /// Separator between a file's base name and its version token.
    pub const SEPARATOR: &'static str = "_v";

    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The tag embedded in filenames, e.g. `v2.0`.
    pub fn tag(&self) -> String {
        format!("v{}", self.0)
    }

    /// Suffix appended to a base name, e.g. `_v2.0`.
    pub fn suffix(&self) -> String {
        format!("{}{}", Self::SEPARATOR, self.0)
    }

    /// Build `<base>_v<version><extension>`.
    ///
    /// `extension` includes its leading dot, or is empty.
    pub fn versioned_name(&self, base: &str, extension: &str) -> String {
        format!("{}{}{}", base, self.suffix(), extension)
    }

    /// Versioned twin of a canonical path: `dir/head.html` becomes
    /// `dir/head_v<version>.html`.
    pub fn versioned_path(&self, canonical: &Path) -> PathBuf {
        let stem = canonical
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let extension = extension_with_dot(canonical);
        canonical.with_file_name(self.versioned_name(&stem, &extension))
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Version {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// The final extension of `path` with its leading dot, or an empty string.
pub(crate) fn extension_with_dot(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}
