//! Versioning manifest definitions.
//!
//! The manifest names every path the versioning stages touch: which canonical
//! files get versioned twins, which directories hold versioned files, and
//! which sources carry references to them. Stages receive it as data so that
//! a different site layout (or a scratch directory in tests) can be swapped in.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::SiteConfig;
use crate::version::Version;

/// A canonical file and the versioned twin it should have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMapping {
    /// Canonical file, relative to the site root.
    pub source: PathBuf,
    /// Versioned copy, relative to the site root.
    pub destination: PathBuf,
}

impl FileMapping {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// Map `source` to `<stem>_v<version><ext>` in the same directory.
    pub fn versioned(source: impl Into<PathBuf>, version: &Version) -> Self {
        let source = source.into();
        let destination = version.versioned_path(&source);
        Self {
            source,
            destination,
        }
    }
}

/// Kind of site file found by a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileCategory {
    Layouts,
    Includes,
    Pages,
    Posts,
    Css,
}

impl FileCategory {
    /// Human-readable heading, e.g. `Layouts`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Layouts => "Layouts",
            Self::Includes => "Includes",
            Self::Pages => "Pages",
            Self::Posts => "Posts",
            Self::Css => "Css",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A directory scanned for versioned files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTarget {
    pub category: FileCategory,
    /// Directory relative to the site root; `.` for the root itself.
    pub dir: PathBuf,
    /// Extensions without the leading dot.
    pub extensions: Vec<String>,
    /// File names never returned from this directory.
    pub excluded_names: Vec<String>,
}

impl ScanTarget {
    pub fn new(category: FileCategory, dir: impl Into<PathBuf>, extensions: &[&str]) -> Self {
        Self {
            category,
            dir: dir.into(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
            excluded_names: Vec::new(),
        }
    }

    pub fn excluding(mut self, names: &[&str]) -> Self {
        self.excluded_names
            .extend(names.iter().map(|n| n.to_string()));
        self
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| {
                let name = name.to_string_lossy();
                self.excluded_names.iter().any(|e| *e == name)
            })
            .unwrap_or(false)
    }
}

/// Everything the versioning stages need to know about a site's layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersioningManifest {
    /// Configuration file holding the `version` key.
    pub config_file: PathBuf,
    /// Files that always get a versioned twin.
    pub canonical_files: Vec<PathBuf>,
    /// Where previously versioned files live.
    pub scan_targets: Vec<ScanTarget>,
    /// Sources whose references are rewritten.
    pub reference_files: Vec<PathBuf>,
    /// Every Markdown file in here is also a reference source.
    pub posts_dir: PathBuf,
}

impl Default for VersioningManifest {
    fn default() -> Self {
        Self::jekyll_hyde()
    }
}

impl VersioningManifest {
    /// An empty manifest reading `_config.yml` and `_posts`.
    pub fn empty() -> Self {
        Self {
            config_file: PathBuf::from(SiteConfig::FILE_NAME),
            canonical_files: Vec::new(),
            scan_targets: Vec::new(),
            reference_files: Vec::new(),
            posts_dir: PathBuf::from("_posts"),
        }
    }

    /// Layout of a Jekyll site built on the Hyde theme.
    pub fn jekyll_hyde() -> Self {
        let canonical_files = [
            "_layouts/default.html",
            "_layouts/page.html",
            "_layouts/post.html",
            "_includes/head.html",
            "_includes/sidebar.html",
            "about.md",
            "career.md",
            "projects.md",
            "stories.md",
            "blog.html",
            "public/css/hyde.css",
        ];

        let reference_files = [
            "index.html",
            "404.html",
            "blog.html",
            "about.md",
            "career.md",
            "projects.md",
            "stories.md",
            "_layouts/page.html",
            "_layouts/post.html",
            "_includes/head.html",
            "_includes/sidebar.html",
        ];

        let scan_targets = vec![
            ScanTarget::new(FileCategory::Layouts, "_layouts", &["html"]),
            ScanTarget::new(FileCategory::Includes, "_includes", &["html"]),
            ScanTarget::new(FileCategory::Pages, ".", &["md", "html"])
                .excluding(&["README.md", "404.html"]),
            ScanTarget::new(FileCategory::Posts, "_posts", &["md"]),
            ScanTarget::new(FileCategory::Css, "public/css", &["css"]),
        ];

        Self {
            canonical_files: canonical_files.iter().map(PathBuf::from).collect(),
            scan_targets,
            reference_files: reference_files.iter().map(PathBuf::from).collect(),
            ..Self::empty()
        }
    }

    pub fn with_canonical_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.canonical_files.push(path.into());
        self
    }

    pub fn with_scan_target(mut self, target: ScanTarget) -> Self {
        self.scan_targets.push(target);
        self
    }

    pub fn with_reference_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.reference_files.push(path.into());
        self
    }

    pub fn with_posts_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.posts_dir = path.into();
        self
    }

    /// The canonical → versioned pairs for `version`.
    pub fn file_mappings(&self, version: &Version) -> Vec<FileMapping> {
        self.canonical_files
            .iter()
            .map(|source| FileMapping::versioned(source.clone(), version))
            .collect()
    }
}
