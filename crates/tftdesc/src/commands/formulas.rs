//! `tftdesc formulas` -- list a champion's spell formulas per tier.

use anyhow::Result;

use crate::cli::FormulasArgs;
use crate::context::{self, RuntimeContext};
use crate::output::{output_json, output_table};

/// Execute the `tftdesc formulas` command.
pub fn run(ctx: &RuntimeContext, args: &FormulasArgs) -> Result<()> {
    let mut config = ctx.config()?;
    if let Some(dir) = &args.characters_dir {
        config.characters_dir = dir.clone();
    }
    let rows = context::orchestrator(&config).formula_rows(&args.api_name)?;

    if ctx.json {
        output_json(&rows);
        return Ok(());
    }
    if rows.is_empty() {
        if !ctx.quiet {
            println!("{} has no spell formulas", args.api_name);
        }
        return Ok(());
    }

    let tier_headers: Vec<String> = config
        .render
        .tiers
        .iter()
        .map(|tier| format!("TIER {}", tier))
        .collect();
    let mut headers = vec!["KEY"];
    headers.extend(tier_headers.iter().map(String::as_str));

    let table: Vec<Vec<String>> = rows
        .into_iter()
        .map(|row| std::iter::once(row.key).chain(row.tiers).collect())
        .collect();
    output_table(&headers, &table);
    Ok(())
}
