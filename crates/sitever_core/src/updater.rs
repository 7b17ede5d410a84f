//! Rewriting of layout, include and stylesheet references in site sources.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::VersionResult;
use crate::manifest::VersioningManifest;
use crate::rules::RuleSet;
use crate::version::Version;

/// Result of updating a list of reference files.
#[derive(Debug, Default)]
pub struct UpdateReport {
    /// Files rewritten, relative to the site root.
    pub updated: Vec<PathBuf>,
    /// Files that needed no change.
    pub unchanged: Vec<PathBuf>,
    /// Listed files that do not exist.
    pub missing: Vec<PathBuf>,
    /// Files that could not be read or written, with the reason.
    pub failed: Vec<(PathBuf, String)>,
}

impl UpdateReport {
    pub fn updated_count(&self) -> usize {
        self.updated.len()
    }
}

/// Applies a [`RuleSet`] to files under a site root.
pub struct ReferenceUpdater {
    root: PathBuf,
    rules: RuleSet,
}

impl ReferenceUpdater {
    pub fn new(root: impl Into<PathBuf>, rules: RuleSet) -> Self {
        Self {
            root: root.into(),
            rules,
        }
    }

    /// Updater with the standard reference rules for `version`.
    pub fn for_version(root: impl Into<PathBuf>, version: &Version) -> VersionResult<Self> {
        Ok(Self::new(root, RuleSet::for_version(version)?))
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// The manifest's reference files followed by every Markdown file
    /// currently in its posts directory.
    pub fn reference_files(&self, manifest: &VersioningManifest) -> Vec<PathBuf> {
        let mut files = manifest.reference_files.clone();

        let posts_dir = self.root.join(&manifest.posts_dir);
        if !posts_dir.is_dir() {
            return files;
        }

        for entry in WalkDir::new(&posts_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Cannot read entry in {:?}: {}", posts_dir, e);
                    continue;
                }
            };
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
                files.push(manifest.posts_dir.join(entry.file_name()));
            }
        }

        files
    }

    /// Rewrite every listed file; per-file errors are recorded, not raised.
    pub fn update_all(&self, files: &[PathBuf]) -> UpdateReport {
        let mut report = UpdateReport::default();

        for file in files {
            if !self.root.join(file).exists() {
                report.missing.push(file.clone());
                continue;
            }

            match self.update_file(file) {
                Ok(true) => report.updated.push(file.clone()),
                Ok(false) => report.unchanged.push(file.clone()),
                Err(e) => {
                    warn!("Error updating {:?}: {}", file, e);
                    report.failed.push((file.clone(), e.to_string()));
                }
            }
        }

        report
    }

    /// Rewrite one file, relative to the root. Returns whether it changed.
    ///
    /// A missing file is not an error and is reported as unchanged.
    pub fn update_file(&self, file: &Path) -> VersionResult<bool> {
        let path = self.root.join(file);
        if !path.exists() {
            return Ok(false);
        }

        let content = fs::read_to_string(&path)?;
        let rewritten = self.rules.apply(&content);

        if rewritten == content {
            debug!("No reference changes in {:?}", file);
            return Ok(false);
        }

        fs::write(&path, rewritten)?;
        debug!("Updated: {:?}", file);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_update_file_rewrites_and_reports() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("index.html"), "---\nlayout: post\n---\n").unwrap();

        let updater = ReferenceUpdater::for_version(temp.path(), &Version::new("3")).unwrap();
        assert!(updater.update_file(Path::new("index.html")).unwrap());
        assert_eq!(
            fs::read_to_string(temp.path().join("index.html")).unwrap(),
            "---\nlayout: post_v3\n---\n"
        );

        // Second pass finds nothing to do.
        assert!(!updater.update_file(Path::new("index.html")).unwrap());
    }

    #[test]
    fn test_unchanged_file_is_not_written() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("about.md");
        fs::write(&path, "# About\n").unwrap();
        let before = fs::metadata(&path).unwrap().modified().unwrap();

        let updater = ReferenceUpdater::for_version(temp.path(), &Version::new("1")).unwrap();
        assert!(!updater.update_file(Path::new("about.md")).unwrap());

        let after = fs::metadata(&path).unwrap().modified().unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_update_all_report() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("index.html"), "layout: default").unwrap();
        fs::write(temp.path().join("about.md"), "plain").unwrap();
        fs::write(temp.path().join("bad.html"), b"\xff\xfe\x00").unwrap();

        let updater = ReferenceUpdater::for_version(temp.path(), &Version::new("2")).unwrap();
        let report = updater.update_all(&[
            PathBuf::from("index.html"),
            PathBuf::from("about.md"),
            PathBuf::from("missing.md"),
            PathBuf::from("bad.html"),
        ]);

        assert_eq!(report.updated, vec![PathBuf::from("index.html")]);
        assert_eq!(report.unchanged, vec![PathBuf::from("about.md")]);
        assert_eq!(report.missing, vec![PathBuf::from("missing.md")]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.updated_count(), 1);
    }

    #[test]
    fn test_reference_files_include_posts() {
        let temp = tempdir().unwrap();
        let posts = temp.path().join("_posts");
        fs::create_dir_all(posts.join("drafts")).unwrap();
        fs::write(posts.join("2024-02-01-second.md"), "").unwrap();
        fs::write(posts.join("2024-01-01-first.md"), "").unwrap();
        fs::write(posts.join("image.png"), "").unwrap();
        fs::write(posts.join("drafts/2024-03-01-draft.md"), "").unwrap();

        let manifest = VersioningManifest::empty().with_reference_file("index.html");
        let updater = ReferenceUpdater::for_version(temp.path(), &Version::new("1")).unwrap();

        assert_eq!(
            updater.reference_files(&manifest),
            vec![
                PathBuf::from("index.html"),
                PathBuf::from("_posts/2024-01-01-first.md"),
                PathBuf::from("_posts/2024-02-01-second.md"),
            ]
        );
    }
}
