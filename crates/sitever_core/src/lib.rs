//! # sitever_core
//!
//! Version-suffixed file management for static sites.
//!
//! A run reads the site version from `_config.yml` and then, in order:
//!
//! - copies canonical layouts, includes, pages and stylesheets to
//!   `<name>_v<version>.<ext>` twins
//! - renames files already carrying an older `_v<token>` suffix
//! - rewrites layout, include and stylesheet references in the site sources
//!
//! ## Example
//!
//! ```rust,no_run
//! use sitever_core::{SiteConfig, Versioner, VersioningManifest};
//!
//! let root = std::env::current_dir().unwrap();
//! let manifest = VersioningManifest::jekyll_hyde();
//! let config = SiteConfig::load(root.join(&manifest.config_file)).unwrap();
//!
//! let versioner = Versioner::new(&root, manifest);
//! let summary = versioner.run(&config.version).unwrap();
//! println!("{} files updated", summary.updated.updated_count());
//! ```

pub mod config;
pub mod creator;
pub mod error;
pub mod finder;
pub mod manifest;
pub mod pipeline;
pub mod renamer;
pub mod rules;
pub mod updater;
pub mod version;

pub use config::SiteConfig;
pub use creator::{CreateOutcome, CreateReport, VersionedFileCreator};
pub use error::{VersionError, VersionResult};
pub use finder::{FoundFiles, VersionedFileFinder};
pub use manifest::{FileCategory, FileMapping, ScanTarget, VersioningManifest};
pub use pipeline::{RunSummary, Versioner};
pub use renamer::{RenameEntry, RenameOutcome, RenameReport, RenameStatus, VersionRenamer};
pub use rules::{RuleSet, SubstitutionRule};
pub use updater::{ReferenceUpdater, UpdateReport};
pub use version::Version;
