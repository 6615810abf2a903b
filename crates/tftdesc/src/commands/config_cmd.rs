//! `tftdesc config` -- print the effective configuration.

use anyhow::Result;

use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `tftdesc config` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let config = ctx.config()?;
    if ctx.json {
        output_json(&config);
    } else {
        print!("{}", config.to_yaml()?);
    }
    Ok(())
}
