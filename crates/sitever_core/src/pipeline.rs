//! The four-stage versioning run: load, create, rename, update.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::SiteConfig;
use crate::creator::{CreateReport, VersionedFileCreator};
use crate::error::VersionResult;
use crate::finder::VersionedFileFinder;
use crate::manifest::VersioningManifest;
use crate::renamer::{RenameReport, VersionRenamer};
use crate::updater::{ReferenceUpdater, UpdateReport};
use crate::version::Version;

/// Reports from a full run.
#[derive(Debug)]
pub struct RunSummary {
    pub version: Version,
    pub created: CreateReport,
    pub renamed: RenameReport,
    pub updated: UpdateReport,
}

impl RunSummary {
    /// Whether any stage touched the filesystem.
    pub fn changed_anything(&self) -> bool {
        self.created.created_count() > 0
            || self.renamed.renamed_count() > 0
            || self.updated.updated_count() > 0
    }
}

/// Runs the versioning stages against one site root.
pub struct Versioner {
    root: PathBuf,
    manifest: VersioningManifest,
}

impl Versioner {
    pub fn new(root: impl Into<PathBuf>, manifest: VersioningManifest) -> Self {
        Self {
            root: root.into(),
            manifest,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest(&self) -> &VersioningManifest {
        &self.manifest
    }

    /// Read the site configuration named by the manifest.
    pub fn load_config(&self) -> VersionResult<SiteConfig> {
        SiteConfig::load(self.root.join(&self.manifest.config_file))
    }

    /// Stage 1: create missing versioned twins.
    pub fn create(&self, version: &Version) -> CreateReport {
        let mappings = self.manifest.file_mappings(version);
        VersionedFileCreator::new(&self.root).create_all(&mappings)
    }

    /// Stage 2: move previously versioned files to `version`.
    pub fn rename(&self, version: &Version) -> VersionResult<RenameReport> {
        let found = VersionedFileFinder::new(&self.root).find(&self.manifest.scan_targets)?;
        Ok(VersionRenamer::new(version.clone()).rename_all(&found))
    }

    /// Stage 3: rewrite references in the site sources.
    pub fn update(&self, version: &Version) -> VersionResult<UpdateReport> {
        let updater = ReferenceUpdater::for_version(&self.root, version)?;
        let files = updater.reference_files(&self.manifest);
        Ok(updater.update_all(&files))
    }

    /// Run every stage in order for `version`.
    pub fn run(&self, version: &Version) -> VersionResult<RunSummary> {
        info!("Versioning {:?} to {}", self.root, version.tag());

        let created = self.create(version);
        info!("Created {} new versioned files", created.created_count());

        let renamed = self.rename(version)?;
        info!("Renamed {} files", renamed.renamed_count());

        let updated = self.update(version)?;
        info!("Updated {} files", updated.updated_count());

        Ok(RunSummary {
            version: version.clone(),
            created,
            renamed,
            updated,
        })
    }

    /// Load the configured version, then run every stage.
    ///
    /// Nothing on disk is touched if the configuration cannot be loaded.
    pub fn run_configured(&self) -> VersionResult<RunSummary> {
        let config = self.load_config()?;
        self.run(&config.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VersionError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_run_configured_requires_config() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("about.md"), "layout: page").unwrap();

        let versioner = Versioner::new(temp.path(), VersioningManifest::jekyll_hyde());
        let err = versioner.run_configured().unwrap_err();

        assert!(matches!(err, VersionError::ConfigNotFound(_)));
        assert!(!temp.path().join("about_v0.0.1.md").exists());
        assert_eq!(
            fs::read_to_string(temp.path().join("about.md")).unwrap(),
            "layout: page"
        );
    }

    #[test]
    fn test_run_reports_each_stage() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::write(root.join("_config.yml"), "version: \"2.0\"\n").unwrap();
        fs::write(root.join("about.md"), "---\nlayout: page\n---\n").unwrap();
        fs::write(root.join("blog_v1.0.html"), "old blog").unwrap();

        let versioner = Versioner::new(root, VersioningManifest::jekyll_hyde());
        let summary = versioner.run_configured().unwrap();

        assert_eq!(summary.version.as_str(), "2.0");
        assert_eq!(summary.created.created_count(), 1);
        assert_eq!(summary.renamed.renamed_count(), 1);
        assert_eq!(summary.updated.updated_count(), 1);
        assert!(summary.changed_anything());
    }
}
