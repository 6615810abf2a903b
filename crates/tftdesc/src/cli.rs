//! Clap CLI definitions for the `tftdesc` command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// tftdesc -- render tactical-battler descriptions.
///
/// Reads a localized dataset export, substitutes every placeholder in
/// champion, item and trait descriptions, and writes the augmented records
/// next to the originals.
#[derive(Parser, Debug)]
#[command(
    name = "tftdesc",
    about = "Render tactical-battler descriptions",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Configuration file (default: ./tftdesc.yaml when present).
    #[arg(long, global = true, env = "TFTDESC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render every champion ability and write the augmented dataset.
    Champions(PassArgs),

    /// Render every item description and write the item list.
    Items(PassArgs),

    /// Render every trait description and write the trait sets.
    Traits(PassArgs),

    /// Run the champion, item and trait passes over one dataset load.
    All(PassArgs),

    /// Render a single champion, item or trait and print it.
    Show(ShowArgs),

    /// List the spell formulas of a champion, evaluated per tier.
    Formulas(FormulasArgs),

    /// Print the effective configuration.
    Config,

    /// Print version information.
    Version,
}

/// Overrides shared by the data-reading commands.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Dataset file (overrides `dataset`).
    #[arg(long)]
    pub dataset: Option<PathBuf>,

    /// Spell file directory (overrides `characters_dir`).
    #[arg(long)]
    pub characters_dir: Option<PathBuf>,
}

/// Arguments for the batch passes.
#[derive(Args, Debug, Clone, Default)]
pub struct PassArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output directory (overrides `output_dir`).
    #[arg(long, short = 'o')]
    pub output_dir: Option<PathBuf>,

    /// Render and report without writing any file.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for `tftdesc show`.
#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// The entity's apiName, e.g. TFT14_Ahri or TFT_Item_Deathblade.
    pub api_name: String,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for `tftdesc formulas`.
#[derive(Args, Debug, Clone)]
pub struct FormulasArgs {
    /// The champion's apiName.
    pub api_name: String,

    /// Spell file directory (overrides `characters_dir`).
    #[arg(long)]
    pub characters_dir: Option<PathBuf>,
}
