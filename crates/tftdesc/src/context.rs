//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] carries the global flags and the config location.
//! Configuration is loaded on demand so `tftdesc version` works anywhere.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tftdesc_config::TftdescConfig;
use tftdesc_core::dataset::DataSet;
use tftdesc_render::{RenderOrchestrator, RenderSettings, SpellDirectory};
use tracing::debug;

use crate::cli::{GlobalArgs, SourceArgs};

/// Runtime context passed to every command handler.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Explicit `--config` file, if any.
    pub config_path: Option<PathBuf>,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Verbose output.
    pub verbose: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    pub fn from_global_args(global: &GlobalArgs) -> Self {
        Self {
            config_path: global.config.clone(),
            json: global.json,
            verbose: global.verbose,
            quiet: global.quiet,
        }
    }

    /// Load the effective configuration.
    pub fn config(&self) -> Result<TftdescConfig> {
        let config = tftdesc_config::load_config(self.config_path.as_deref())?;
        debug!(dataset = %config.dataset.display(), "configuration loaded");
        Ok(config)
    }

    /// Load the configuration with command-line source overrides applied.
    pub fn config_with(&self, source: &SourceArgs) -> Result<TftdescConfig> {
        let mut config = self.config()?;
        if let Some(dataset) = &source.dataset {
            config.dataset = dataset.clone();
        }
        if let Some(dir) = &source.characters_dir {
            config.characters_dir = dir.clone();
        }
        Ok(config)
    }
}

/// Read the dataset named by `config`.
pub fn load_dataset(config: &TftdescConfig) -> Result<DataSet> {
    DataSet::load(&config.dataset)
        .with_context(|| format!("cannot load dataset {}", config.dataset.display()))
}

/// Render settings derived from `config`.
pub fn render_settings(config: &TftdescConfig) -> RenderSettings {
    RenderSettings {
        source_field: config.render.source_field.clone(),
        target_field: config.render.target_field.clone(),
        max_formula_depth: config.render.max_formula_depth,
        tiers: config.render.tiers.clone(),
        skip_augments: config.items.skip_augments,
    }
}

/// An orchestrator reading spell files from `config.characters_dir`.
pub fn orchestrator(config: &TftdescConfig) -> RenderOrchestrator<SpellDirectory> {
    RenderOrchestrator::new(
        SpellDirectory::new(config.characters_dir.clone()),
        render_settings(config),
    )
}
