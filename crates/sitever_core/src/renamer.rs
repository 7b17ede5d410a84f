//! Renaming of versioned files to the current version.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{VersionError, VersionResult};
use crate::finder::FoundFiles;
use crate::manifest::FileCategory;
use crate::version::{extension_with_dot, Version};

/// Successful result of renaming one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    /// The file now lives at `to`.
    Renamed { from: PathBuf, to: PathBuf },
    /// The file already carries the requested version.
    AlreadyCurrent(PathBuf),
}

/// Per-file status recorded in a [`RenameReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameStatus {
    Renamed(PathBuf),
    AlreadyCurrent,
    /// The stem does not split into exactly one base and one version.
    Malformed,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameEntry {
    pub category: FileCategory,
    pub path: PathBuf,
    pub status: RenameStatus,
}

/// Result of renaming every found file.
#[derive(Debug, Default)]
pub struct RenameReport {
    /// Entries in the order they were processed.
    pub entries: Vec<RenameEntry>,
}

impl RenameReport {
    pub fn renamed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.status, RenameStatus::Renamed(_)))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.status, RenameStatus::Failed(_)))
            .count()
    }

    /// Entries for one category, in processing order.
    pub fn for_category(&self, category: FileCategory) -> impl Iterator<Item = &RenameEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }
}

/// Moves `<base>_v<old><ext>` files to `<base>_v<new><ext>`.
pub struct VersionRenamer {
    version: Version,
}

impl VersionRenamer {
    pub fn new(version: Version) -> Self {
        Self { version }
    }

    /// Rename every found file; per-file problems are recorded, not raised.
    pub fn rename_all(&self, found: &FoundFiles) -> RenameReport {
        let mut report = RenameReport::default();

        for (category, files) in found.iter() {
            for path in files {
                let status = match self.rename(path) {
                    Ok(RenameOutcome::Renamed { to, .. }) => RenameStatus::Renamed(to),
                    Ok(RenameOutcome::AlreadyCurrent(_)) => RenameStatus::AlreadyCurrent,
                    Err(VersionError::MalformedName(_)) => {
                        warn!("{:?} doesn't follow versioning pattern, skipping", path);
                        RenameStatus::Malformed
                    }
                    Err(e) => {
                        warn!("Error renaming {:?}: {}", path, e);
                        RenameStatus::Failed(e.to_string())
                    }
                };
                report.entries.push(RenameEntry {
                    category,
                    path: path.clone(),
                    status,
                });
            }
        }

        report
    }

    /// Rename a single file to carry the current version.
    ///
    /// An existing file at the destination is replaced in one atomic step.
    pub fn rename(&self, path: &Path) -> VersionResult<RenameOutcome> {
        if !path.exists() {
            return Err(VersionError::NotFound(path.to_path_buf()));
        }

        let destination = self.destination_for(path)?;
        if destination == path {
            debug!("{:?} already at version {}", path, self.version);
            return Ok(RenameOutcome::AlreadyCurrent(destination));
        }

        if destination.exists() {
            debug!("Replacing existing {:?}", destination);
        }
        fs::rename(path, &destination)?;

        debug!("Renamed: {:?} -> {:?}", path, destination);
        Ok(RenameOutcome::Renamed {
            from: path.to_path_buf(),
            to: destination,
        })
    }

    /// Where `path` ends up for the current version.
    pub fn destination_for(&self, path: &Path) -> VersionResult<PathBuf> {
        let malformed = || VersionError::MalformedName(path.to_path_buf());

        let stem = path.file_stem().and_then(|s| s.to_str()).ok_or_else(malformed)?;
        let parts: Vec<&str> = stem.split(Version::SEPARATOR).collect();
        let [base, _old] = parts.as_slice() else {
            return Err(malformed());
        };

        let file_name = self
            .version
            .versioned_name(base, &extension_with_dot(path));
        Ok(path.with_file_name(file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finder::VersionedFileFinder;
    use crate::manifest::VersioningManifest;
    use tempfile::tempdir;

    #[test]
    fn test_destination_for() {
        let renamer = VersionRenamer::new(Version::new("1.1"));
        assert_eq!(
            renamer
                .destination_for(Path::new("site/blog_v1.0.html"))
                .unwrap(),
            PathBuf::from("site/blog_v1.1.html")
        );
        assert_eq!(
            renamer
                .destination_for(Path::new("public/css/hyde_v0.9.css"))
                .unwrap(),
            PathBuf::from("public/css/hyde_v1.1.css")
        );
    }

    #[test]
    fn test_destination_for_multiple_separators() {
        let renamer = VersionRenamer::new(Version::new("2"));
        let err = renamer
            .destination_for(Path::new("my_video_v1.md"))
            .unwrap_err();
        assert!(matches!(err, VersionError::MalformedName(_)));
    }

    #[test]
    fn test_rename_moves_file() {
        let temp = tempdir().unwrap();
        let old = temp.path().join("blog_v1.0.html");
        fs::write(&old, "blog").unwrap();

        let renamer = VersionRenamer::new(Version::new("1.1"));
        let outcome = renamer.rename(&old).unwrap();

        let new = temp.path().join("blog_v1.1.html");
        assert_eq!(
            outcome,
            RenameOutcome::Renamed {
                from: old.clone(),
                to: new.clone()
            }
        );
        assert!(!old.exists());
        assert_eq!(fs::read_to_string(new).unwrap(), "blog");
    }

    #[test]
    fn test_rename_replaces_existing_destination() {
        let temp = tempdir().unwrap();
        let old = temp.path().join("about_v1.md");
        let new = temp.path().join("about_v2.md");
        fs::write(&old, "from v1").unwrap();
        fs::write(&new, "stale v2").unwrap();

        let renamer = VersionRenamer::new(Version::new("2"));
        renamer.rename(&old).unwrap();

        assert!(!old.exists());
        assert_eq!(fs::read_to_string(new).unwrap(), "from v1");
    }

    #[test]
    fn test_rename_current_file_is_untouched() {
        let temp = tempdir().unwrap();
        let current = temp.path().join("about_v2.md");
        fs::write(&current, "keep me").unwrap();

        let renamer = VersionRenamer::new(Version::new("2"));
        let outcome = renamer.rename(&current).unwrap();

        assert_eq!(outcome, RenameOutcome::AlreadyCurrent(current.clone()));
        assert_eq!(fs::read_to_string(current).unwrap(), "keep me");
    }

    #[test]
    fn test_rename_missing_file() {
        let temp = tempdir().unwrap();
        let renamer = VersionRenamer::new(Version::new("2"));
        let err = renamer
            .rename(&temp.path().join("gone_v1.md"))
            .unwrap_err();
        assert!(matches!(err, VersionError::NotFound(_)));
    }

    #[test]
    fn test_rename_all_report() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("_layouts")).unwrap();
        fs::write(root.join("_layouts/post_v1.html"), "post").unwrap();
        fs::write(root.join("_layouts/page_v2.html"), "page").unwrap();
        fs::write(root.join("my_video_v1.md"), "video").unwrap();

        let found = VersionedFileFinder::new(root)
            .find(&VersioningManifest::jekyll_hyde().scan_targets)
            .unwrap();
        let report = VersionRenamer::new(Version::new("2")).rename_all(&found);

        assert_eq!(report.renamed_count(), 1);
        assert_eq!(report.failed_count(), 0);
        assert!(root.join("_layouts/post_v2.html").exists());
        assert!(root.join("my_video_v1.md").exists());

        let pages: Vec<_> = report.for_category(FileCategory::Pages).collect();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].status, RenameStatus::Malformed);

        let layouts: Vec<_> = report.for_category(FileCategory::Layouts).collect();
        assert_eq!(layouts.len(), 2);
        assert!(layouts
            .iter()
            .any(|e| e.status == RenameStatus::AlreadyCurrent));
    }

    #[test]
    fn test_failed_rename_does_not_stop_the_rest() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        let blocked = root.join("about_v1.md");
        let later = root.join("zeta_v1.md");
        fs::write(&blocked, "about").unwrap();
        fs::write(&later, "zeta").unwrap();
        // A non-empty directory sits where the renamed file would go.
        fs::create_dir_all(root.join("about_v2.md")).unwrap();
        fs::write(root.join("about_v2.md/keep.txt"), "x").unwrap();

        let mut found = FoundFiles::default();
        found.add(FileCategory::Pages, vec![blocked.clone(), later.clone()]);
        let report = VersionRenamer::new(Version::new("2")).rename_all(&found);

        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.renamed_count(), 1);
        assert!(matches!(report.entries[0].status, RenameStatus::Failed(_)));
        assert_eq!(report.entries[0].path, blocked);
        assert!(blocked.exists());
        assert!(!later.exists());
        assert_eq!(fs::read_to_string(root.join("zeta_v2.md")).unwrap(), "zeta");
    }
}
