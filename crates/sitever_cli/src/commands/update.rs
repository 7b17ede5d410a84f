//! Update command - rewrite references to versioned files.

use anyhow::{Context, Result};

use super::output::Printer;
use super::CommandContext;

pub fn execute(ctx: &CommandContext) -> Result<()> {
    let config = ctx.load_config()?;
    let printer = Printer::new(ctx.quiet);

    printer.line(format!(
        "🔧 Updating references to {}...",
        config.version.tag()
    ));
    let report = ctx
        .versioner
        .update(&config.version)
        .context("Failed to prepare reference rules")?;
    printer.updated(&report);

    Ok(())
}
