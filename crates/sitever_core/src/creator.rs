//! Creation of versioned twins for canonical files.

use std::fs::{self, FileTimes, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use fs_extra::file::CopyOptions;
use tracing::{debug, warn};

use crate::error::VersionResult;
use crate::manifest::FileMapping;

/// What happened to a single mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The versioned copy was written.
    Created,
    /// The canonical file does not exist.
    SourceMissing,
    /// The versioned copy is already present and was left alone.
    DestinationExists,
}

/// Result of running the creator over a mapping table.
#[derive(Debug, Default)]
pub struct CreateReport {
    /// Destinations written, relative to the site root.
    pub created: Vec<PathBuf>,
    /// Mappings skipped because the source is missing or the copy exists.
    pub skipped: Vec<PathBuf>,
    /// Destinations that could not be written, with the reason.
    pub failed: Vec<(PathBuf, String)>,
}

impl CreateReport {
    pub fn created_count(&self) -> usize {
        self.created.len()
    }
}

/// Copies canonical files to their versioned destinations.
pub struct VersionedFileCreator {
    root: PathBuf,
}

impl VersionedFileCreator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Process every mapping; a failed copy does not stop the others.
    pub fn create_all(&self, mappings: &[FileMapping]) -> CreateReport {
        let mut report = CreateReport::default();

        for mapping in mappings {
            match self.create(mapping) {
                Ok(CreateOutcome::Created) => report.created.push(mapping.destination.clone()),
                Ok(_) => report.skipped.push(mapping.destination.clone()),
                Err(e) => {
                    warn!("Error creating {:?}: {}", mapping.destination, e);
                    report
                        .failed
                        .push((mapping.destination.clone(), e.to_string()));
                }
            }
        }

        report
    }

    /// Copy one canonical file if its versioned twin is missing.
    pub fn create(&self, mapping: &FileMapping) -> VersionResult<CreateOutcome> {
        let source = self.root.join(&mapping.source);
        let destination = self.root.join(&mapping.destination);

        if !source.exists() {
            debug!("Source {:?} missing, skipping", source);
            return Ok(CreateOutcome::SourceMissing);
        }
        if destination.exists() {
            debug!("{:?} already exists, skipping", destination);
            return Ok(CreateOutcome::DestinationExists);
        }

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }

        fs_extra::file::copy(&source, &destination, &CopyOptions::new())?;
        if let Err(e) = copy_metadata(&source, &destination) {
            warn!("Could not preserve metadata on {:?}: {}", destination, e);
        }

        debug!("Created: {:?}", mapping.destination);
        Ok(CreateOutcome::Created)
    }
}

/// Carry timestamps and permissions over from `source`.
fn copy_metadata(source: &Path, destination: &Path) -> io::Result<()> {
    let metadata = fs::metadata(source)?;

    let times = FileTimes::new()
        .set_accessed(metadata.accessed()?)
        .set_modified(metadata.modified()?);
    OpenOptions::new()
        .write(true)
        .open(destination)?
        .set_times(times)?;

    // Permissions last: a read-only source would otherwise block the above.
    fs::set_permissions(destination, metadata.permissions())
}
