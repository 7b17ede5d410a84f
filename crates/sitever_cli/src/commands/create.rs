//! Create command - copy canonical files to versioned twins.

use anyhow::Result;

use super::output::Printer;
use super::CommandContext;

pub fn execute(ctx: &CommandContext) -> Result<()> {
    let config = ctx.load_config()?;
    let printer = Printer::new(ctx.quiet);

    printer.line(format!(
        "📁 Creating versioned files for {}...",
        config.version.tag()
    ));
    let report = ctx.versioner.create(&config.version);
    printer.created(&report);

    Ok(())
}
