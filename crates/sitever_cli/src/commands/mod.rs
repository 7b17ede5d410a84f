//! CLI command definitions.
//!
//! Every command works on the site in the current working directory and
//! reads its version from `_config.yml` before touching anything.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use sitever_core::{SiteConfig, Versioner, VersioningManifest};

pub mod create;
pub mod output;
pub mod rename;
pub mod run;
pub mod show;
pub mod update;

/// sitever - version-suffixed layouts, includes and stylesheets for static sites
#[derive(Parser)]
#[command(name = "sitever")]
#[command(version, about = "Version-suffixed layouts, includes and stylesheets for static sites")]
#[command(long_about = r#"
sitever reads `version` from _config.yml in the current directory and keeps
the site's versioned files in step with it.

STAGES:
  create   → Copy canonical layouts, includes, pages and CSS to name_v<version>.ext
  rename   → Move existing name_v<old>.ext files to name_v<version>.ext
  update   → Point layout, include and stylesheet references at the new names

Running without a command runs all three stages in order.

EXIT CODES:
  0 - Success (per-file problems are reported but not fatal)
  1 - General error
  2 - Invalid arguments
  3 - Configuration error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run every stage: create, rename, update (default)
    Run,

    /// Create missing versioned copies of canonical files
    Create,

    /// Rename previously versioned files to the current version
    Rename,

    /// Rewrite layout, include and stylesheet references
    Update,

    /// Show the configured version without changing anything
    Show,
}

/// State shared by every command.
pub struct CommandContext {
    pub versioner: Versioner,
    pub quiet: bool,
}

impl CommandContext {
    pub fn from_current_dir(quiet: bool) -> Result<Self> {
        let root = std::env::current_dir().context("Failed to determine current directory")?;
        Ok(Self {
            versioner: Versioner::new(root, VersioningManifest::jekyll_hyde()),
            quiet,
        })
    }

    /// Load the site configuration; failure aborts the command.
    pub fn load_config(&self) -> Result<SiteConfig> {
        let config = self.versioner.load_config()?;
        Ok(config)
    }
}
