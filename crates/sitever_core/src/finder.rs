//! Discovery of files that already carry a version suffix.

use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::{debug, warn};

use crate::error::VersionResult;
use crate::manifest::{FileCategory, ScanTarget};
use crate::version::Version;

/// Versioned files grouped by category, in scan order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FoundFiles {
    groups: Vec<(FileCategory, Vec<PathBuf>)>,
}

impl FoundFiles {
    /// Add files under `category`, merging with an existing group.
    pub fn add(&mut self, category: FileCategory, files: Vec<PathBuf>) {
        match self.groups.iter_mut().find(|(c, _)| *c == category) {
            Some((_, existing)) => {
                existing.extend(files);
                existing.sort();
            }
            None => self.groups.push((category, files)),
        }
    }

    pub fn get(&self, category: FileCategory) -> &[PathBuf] {
        self.groups
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, files)| files.as_slice())
            .unwrap_or(&[])
    }

    /// Non-empty groups in scan order.
    pub fn iter(&self) -> impl Iterator<Item = (FileCategory, &[PathBuf])> {
        self.groups
            .iter()
            .filter(|(_, files)| !files.is_empty())
            .map(|(c, files)| (*c, files.as_slice()))
    }

    pub fn total(&self) -> usize {
        self.groups.iter().map(|(_, files)| files.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Scans site directories for `<base>_v<token>.<ext>` files.
pub struct VersionedFileFinder {
    root: PathBuf,
}

impl VersionedFileFinder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Scan every target. Missing directories are skipped.
    pub fn find(&self, targets: &[ScanTarget]) -> VersionResult<FoundFiles> {
        let mut found = FoundFiles::default();

        for target in targets {
            let files = self.scan(target)?;
            debug!(
                "Found {} versioned file(s) for {}",
                files.len(),
                target.category
            );
            found.add(target.category, files);
        }

        Ok(found)
    }

    /// Scan a single target, returning matches sorted by path.
    pub fn scan(&self, target: &ScanTarget) -> VersionResult<Vec<PathBuf>> {
        let dir = self.target_dir(&target.dir);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let escaped_dir = Pattern::escape(&dir.to_string_lossy());
        let mut files = Vec::new();

        for extension in &target.extensions {
            let pattern = format!(
                "{}/*{}*.{}",
                escaped_dir,
                Version::SEPARATOR,
                Pattern::escape(extension)
            );

            for entry in glob::glob(&pattern)? {
                match entry {
                    Ok(path) if path.is_file() && !target.is_excluded(&path) => files.push(path),
                    Ok(_) => {}
                    Err(e) => warn!("Cannot read {:?}: {}", e.path(), e.error()),
                }
            }
        }

        files.sort();
        Ok(files)
    }

    fn target_dir(&self, dir: &Path) -> PathBuf {
        if dir == Path::new(".") || dir.as_os_str().is_empty() {
            self.root.clone()
        } else {
            self.root.join(dir)
        }
    }
}
