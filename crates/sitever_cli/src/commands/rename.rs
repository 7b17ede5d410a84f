//! Rename command - move old versioned files to the current version.

use anyhow::{Context, Result};

use super::output::Printer;
use super::CommandContext;

pub fn execute(ctx: &CommandContext) -> Result<()> {
    let config = ctx.load_config()?;
    let printer = Printer::new(ctx.quiet);

    printer.line(format!(
        "🔄 Renaming versioned files to {}...",
        config.version.tag()
    ));
    let report = ctx
        .versioner
        .rename(&config.version)
        .context("Failed to scan for versioned files")?;
    printer.renamed(&report);

    Ok(())
}
