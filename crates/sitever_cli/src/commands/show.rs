//! Show command - print the configured version.

use anyhow::Result;

use super::CommandContext;

pub fn execute(ctx: &CommandContext) -> Result<()> {
    let config = ctx.load_config()?;

    println!("📋 Config: {}", config.path.display());
    println!("📋 Current version: {}", config.version);
    println!("📋 Version string: {}", config.version.tag());

    Ok(())
}
