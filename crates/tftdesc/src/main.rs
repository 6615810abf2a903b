//! `tftdesc` -- render tactical-battler descriptions.
//!
//! Parses CLI arguments with clap, builds the runtime context, and
//! dispatches to command handlers.

mod cli;
mod commands;
mod context;
mod output;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use context::RuntimeContext;

/// Debug filter installed by `--verbose`.
const VERBOSE_FILTER: &str = "tftdesc=debug,tftdesc_core=debug,tftdesc_config=debug,\
                              tftdesc_formula=debug,tftdesc_template=debug,tftdesc_render=debug";

fn main() {
    let cli = Cli::parse();

    let ctx = RuntimeContext::from_global_args(&cli.global);

    // --verbose wins over RUST_LOG; without either, nothing is logged.
    if !ctx.quiet {
        if ctx.verbose {
            tracing_subscriber::fmt()
                .with_env_filter(VERBOSE_FILTER)
                .with_writer(std::io::stderr)
                .init();
        } else if std::env::var_os("RUST_LOG").is_some() {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_writer(std::io::stderr)
                .init();
        }
    }

    let result = match cli.command {
        Some(Commands::Champions(args)) => commands::render::run_champions(&ctx, &args),
        Some(Commands::Items(args)) => commands::render::run_items(&ctx, &args),
        Some(Commands::Traits(args)) => commands::render::run_traits(&ctx, &args),
        Some(Commands::All(args)) => commands::render::run_all(&ctx, &args),
        Some(Commands::Show(args)) => commands::show::run(&ctx, &args),
        Some(Commands::Formulas(args)) => commands::formulas::run(&ctx, &args),
        Some(Commands::Config) => commands::config_cmd::run(&ctx),
        Some(Commands::Version) => commands::version::run(&ctx),
        None => {
            let _ = Cli::command().print_help();
            println!();
            Ok(())
        }
    };

    if let Err(e) = result {
        if ctx.json {
            let err_json = serde_json::json!({ "error": format!("{:#}", e) });
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&err_json).unwrap_or_default()
            );
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}
