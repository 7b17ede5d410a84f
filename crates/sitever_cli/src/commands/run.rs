//! Run command - every stage in order.

use anyhow::{Context, Result};
use tracing::info;

use super::output::Printer;
use super::CommandContext;

pub fn execute(ctx: &CommandContext) -> Result<()> {
    let config = ctx.load_config()?;
    let version = &config.version;
    let versioner = &ctx.versioner;
    let printer = Printer::new(ctx.quiet);

    info!("Running all stages for {:?}", versioner.root());
    printer.banner(version);

    let summary = versioner
        .run(version)
        .context("Failed to run versioning stages")?;

    printer.line("📁 Step 1: Creating new versioned files...");
    printer.created(&summary.created);

    printer.line("🔄 Step 2: Renaming existing versioned files...");
    printer.renamed(&summary.renamed);

    printer.line("🔧 Step 3: Updating layout references...");
    printer.updated(&summary.updated);

    printer.line("✅ Versioning complete!");
    printer.line(format!("📝 All files now use version: {}", version.tag()));
    printer.line("");
    printer.next_steps();

    if !summary.changed_anything() {
        info!("Site already at {}", version.tag());
    }

    if ctx.quiet {
        println!(
            "✅ {}: created {}, renamed {}, updated {}",
            version.tag(),
            summary.created.created_count(),
            summary.renamed.renamed_count(),
            summary.updated.updated_count()
        );
    }

    Ok(())
}
