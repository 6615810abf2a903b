//! `tftdesc show` -- render one champion, item or trait.

use anyhow::Result;
use serde_json::json;
use tftdesc_render::Outcome;

use crate::cli::ShowArgs;
use crate::context::{self, RuntimeContext};
use crate::output::output_json;

/// Execute the `tftdesc show` command.
pub fn run(ctx: &RuntimeContext, args: &ShowArgs) -> Result<()> {
    let config = ctx.config_with(&args.source)?;
    let dataset = context::load_dataset(&config)?;
    let entity = context::orchestrator(&config).render_named(&dataset, &args.api_name)?;

    if ctx.json {
        output_json(&json!({
            "kind": entity.kind,
            "outcome": outcome_label(&entity.outcome),
            "record": entity.record,
        }));
        return Ok(());
    }

    println!("{} {} [{}]", entity.kind, args.api_name, outcome_label(&entity.outcome));
    println!();
    match entity.outcome.text() {
        Some(text) => println!("{}", text),
        None => println!("(no description)"),
    }
    Ok(())
}

fn outcome_label(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Rendered(_) => "rendered",
        Outcome::Unchanged(_) => "unchanged",
        Outcome::PassedThrough(_) => "passed through",
        Outcome::Skipped(_) => "skipped",
    }
}
