//! `tftdesc champions|items|traits|all` -- the batch render passes.

use anyhow::{Context, Result};
use serde::Serialize;
use tftdesc_config::TftdescConfig;
use tftdesc_core::dataset::DataSet;
use tftdesc_core::jsonfile::write_json_pretty;
use tftdesc_render::batch::{self, BatchOutput};
use tftdesc_render::{BatchReport, RenderOrchestrator, SpellDirectory};

use crate::cli::PassArgs;
use crate::context::{self, RuntimeContext};
use crate::output::output_json;

/// One batch pass over the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Champions,
    Items,
    Traits,
}

impl Pass {
    const ALL: [Pass; 3] = [Pass::Champions, Pass::Items, Pass::Traits];

    fn name(self) -> &'static str {
        match self {
            Self::Champions => "champions",
            Self::Items => "items",
            Self::Traits => "traits",
        }
    }

    fn output_name(self, config: &TftdescConfig) -> &str {
        match self {
            Self::Champions => &config.outputs.champions,
            Self::Items => &config.outputs.items,
            Self::Traits => &config.outputs.traits,
        }
    }

    fn render(
        self,
        orch: &RenderOrchestrator<SpellDirectory>,
        dataset: &DataSet,
    ) -> BatchOutput {
        match self {
            Self::Champions => batch::render_champions(orch, dataset),
            Self::Items => batch::render_items(orch, dataset),
            Self::Traits => batch::render_traits(orch, dataset),
        }
    }
}

/// Report line for one finished pass.
#[derive(Debug, Serialize)]
struct PassSummary {
    pass: &'static str,
    #[serde(flatten)]
    report: BatchReport,
    /// Written file; absent on a dry run.
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
}

/// Execute `tftdesc champions`.
pub fn run_champions(ctx: &RuntimeContext, args: &PassArgs) -> Result<()> {
    run_passes(ctx, args, &[Pass::Champions])
}

/// Execute `tftdesc items`.
pub fn run_items(ctx: &RuntimeContext, args: &PassArgs) -> Result<()> {
    run_passes(ctx, args, &[Pass::Items])
}

/// Execute `tftdesc traits`.
pub fn run_traits(ctx: &RuntimeContext, args: &PassArgs) -> Result<()> {
    run_passes(ctx, args, &[Pass::Traits])
}

/// Execute `tftdesc all`.
pub fn run_all(ctx: &RuntimeContext, args: &PassArgs) -> Result<()> {
    run_passes(ctx, args, &Pass::ALL)
}

fn run_passes(ctx: &RuntimeContext, args: &PassArgs, passes: &[Pass]) -> Result<()> {
    let mut config = ctx.config_with(&args.source)?;
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }

    let dataset = context::load_dataset(&config)?;
    let orch = context::orchestrator(&config);

    let mut summaries = Vec::with_capacity(passes.len());
    for &pass in passes {
        let BatchOutput { document, report } = pass.render(&orch, &dataset);
        let output = if args.dry_run {
            None
        } else {
            let path = config.output_path(pass.output_name(&config));
            write_json_pretty(&path, &document)
                .with_context(|| format!("cannot write {} output", pass.name()))?;
            Some(path.display().to_string())
        };
        summaries.push(PassSummary {
            pass: pass.name(),
            report,
            output,
        });
    }

    if ctx.json {
        output_json(&summaries);
    } else if !ctx.quiet {
        for summary in &summaries {
            match &summary.output {
                Some(path) => println!("{}: {} -> {}", summary.pass, summary.report, path),
                None => println!("{}: {} (dry run)", summary.pass, summary.report),
            }
        }
    }
    Ok(())
}
