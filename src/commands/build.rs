use anyhow::Result;

use spartan::BuildEvent;

use super::CommandContext;

pub fn cmd_build(ctx: &CommandContext) -> Result<()> {
    let pipeline = ctx.pipeline()?;
    pipeline.run_with_events(&|event: BuildEvent| ctx.emit(&event))?;
    Ok(())
}
