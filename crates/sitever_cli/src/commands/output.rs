//! Console output for stage reports.

use std::path::Path;

use sitever_core::{CreateReport, RenameReport, RenameStatus, UpdateReport, Version};

/// Prints progress to stdout; in quiet mode only problems get through.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    quiet: bool,
}

impl Printer {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// A progress line, hidden in quiet mode.
    pub fn line(&self, message: impl AsRef<str>) {
        if !self.quiet {
            println!("{}", message.as_ref());
        }
    }

    /// A problem line, always shown.
    pub fn problem(&self, message: impl AsRef<str>) {
        println!("{}", message.as_ref());
    }

    pub fn banner(&self, version: &Version) {
        self.line("🔄 Site Versioning");
        self.line("=".repeat(50));
        self.line(format!("📋 Current version: {}", version));
        self.line(format!("📋 Version string: {}", version.tag()));
        self.line("");
    }

    pub fn created(&self, report: &CreateReport) {
        for path in &report.created {
            self.line(format!("✓ Created: {}", path.display()));
        }
        for (path, reason) in &report.failed {
            self.problem(format!("✗ Error creating {}: {}", path.display(), reason));
        }
        self.line(format!(
            "   Created {} new versioned files",
            report.created_count()
        ));
        self.line("");
    }

    pub fn renamed(&self, report: &RenameReport) {
        let mut current_category = None;

        for entry in &report.entries {
            if current_category != Some(entry.category) {
                if current_category.is_some() {
                    self.line("");
                }
                self.line(format!("   {}:", entry.category));
                current_category = Some(entry.category);
            }

            let name = file_name(&entry.path);
            match &entry.status {
                RenameStatus::Renamed(to) => {
                    self.line(format!("✓ Renamed: {} → {}", name, file_name(to)));
                }
                RenameStatus::AlreadyCurrent => {
                    self.line(format!("  Current: {}", name));
                }
                RenameStatus::Malformed => self.problem(format!(
                    "Warning: {} doesn't follow versioning pattern, skipping...",
                    entry.path.display()
                )),
                RenameStatus::Failed(reason) => {
                    self.problem(format!("✗ Error renaming {}: {}", name, reason));
                }
            }
        }
        if current_category.is_some() {
            self.line("");
        }

        self.line(format!("   Renamed {} files", report.renamed_count()));
        self.line("");
    }

    pub fn updated(&self, report: &UpdateReport) {
        for path in &report.updated {
            self.line(format!("✓ Updated: {}", path.display()));
        }
        for (path, reason) in &report.failed {
            self.problem(format!("✗ Error updating {}: {}", path.display(), reason));
        }
        self.line(format!("   Updated {} files", report.updated_count()));
        self.line("");
    }

    pub fn next_steps(&self) {
        self.line("💡 Next steps:");
        self.line("   1. Review the changes");
        self.line("   2. Test your site with: bundle exec jekyll build");
        self.line("   3. Commit the changes to git");
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
