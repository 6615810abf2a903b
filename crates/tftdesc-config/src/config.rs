//! Configuration types and loading.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default configuration file name, looked up from the working directory.
pub const CONFIG_FILE: &str = "tftdesc.yaml";

/// Prefix of environment overrides. Nested keys are separated by `__`,
/// e.g. `TFTDESC_RENDER__MAX_FORMULA_DEPTH=16`.
pub const ENV_PREFIX: &str = "TFTDESC_";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist.
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A layer could not be read or did not match the expected shape.
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    /// The effective configuration could not be serialized.
    #[error("failed to encode configuration: {0}")]
    Encode(#[from] serde_yaml::Error),

    /// A configuration value was invalid.
    #[error("invalid configuration value for key '{key}': {reason}")]
    InvalidValue {
        /// The configuration key that had an invalid value.
        key: String,
        /// Why the value is invalid.
        reason: String,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        Self::Load(Box::new(e))
    }
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Rendering settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Record field holding the raw template.
    #[serde(default = "default_source_field")]
    pub source_field: String,

    /// Field inserted after `source_field` with the rendered text.
    #[serde(default = "default_target_field")]
    pub target_field: String,

    /// Bound on nested formula evaluation.
    #[serde(default = "default_max_formula_depth")]
    pub max_formula_depth: usize,

    /// Star levels rendered in slash-joined series.
    #[serde(default = "default_tiers")]
    pub tiers: Vec<i64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            source_field: default_source_field(),
            target_field: default_target_field(),
            max_formula_depth: default_max_formula_depth(),
            tiers: default_tiers(),
        }
    }
}

fn default_source_field() -> String {
    "desc".to_string()
}

fn default_target_field() -> String {
    "modifiedDesc".to_string()
}

fn default_max_formula_depth() -> usize {
    32
}

fn default_tiers() -> Vec<i64> {
    vec![1, 2, 3]
}

/// Item pass settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsConfig {
    /// Emit items whose `apiName` contains `Augment` unmodified.
    #[serde(default = "default_true")]
    pub skip_augments: bool,
}

impl Default for ItemsConfig {
    fn default() -> Self {
        Self {
            skip_augments: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Output file names, relative to `output_dir`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputsConfig {
    #[serde(default = "default_champions_output")]
    pub champions: String,

    #[serde(default = "default_items_output")]
    pub items: String,

    #[serde(default = "default_traits_output")]
    pub traits: String,
}

impl Default for OutputsConfig {
    fn default() -> Self {
        Self {
            champions: default_champions_output(),
            items: default_items_output(),
            traits: default_traits_output(),
        }
    }
}

fn default_champions_output() -> String {
    "sets-modified.json".to_string()
}

fn default_items_output() -> String {
    "items-modified.json".to_string()
}

fn default_traits_output() -> String {
    "traits-modified.json".to_string()
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Effective tftdesc configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TftdescConfig {
    /// Localized dataset file.
    #[serde(default = "default_dataset")]
    pub dataset: PathBuf,

    /// Directory of per-champion spell files.
    #[serde(default = "default_characters_dir")]
    pub characters_dir: PathBuf,

    /// Where batch outputs are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub items: ItemsConfig,

    #[serde(default)]
    pub outputs: OutputsConfig,
}

impl Default for TftdescConfig {
    fn default() -> Self {
        Self {
            dataset: default_dataset(),
            characters_dir: default_characters_dir(),
            output_dir: default_output_dir(),
            render: RenderConfig::default(),
            items: ItemsConfig::default(),
            outputs: OutputsConfig::default(),
        }
    }
}

fn default_dataset() -> PathBuf {
    PathBuf::from("web/tft-ko_kr.json")
}

fn default_characters_dir() -> PathBuf {
    PathBuf::from("characters")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("web/src/data")
}

impl TftdescConfig {
    /// Reject values no render pass can work with.
    pub fn validate(&self) -> Result<()> {
        if self.render.max_formula_depth == 0 {
            return Err(invalid("render.max_formula_depth", "must be at least 1"));
        }
        if self.render.tiers.is_empty() {
            return Err(invalid("render.tiers", "at least one tier is required"));
        }
        if self.render.source_field.is_empty() {
            return Err(invalid("render.source_field", "must not be empty"));
        }
        if self.render.target_field.is_empty() {
            return Err(invalid("render.target_field", "must not be empty"));
        }
        if self.render.source_field == self.render.target_field {
            return Err(invalid(
                "render.target_field",
                "must differ from render.source_field",
            ));
        }
        for (key, name) in [
            ("outputs.champions", &self.outputs.champions),
            ("outputs.items", &self.outputs.items),
            ("outputs.traits", &self.outputs.traits),
        ] {
            if name.is_empty() {
                return Err(invalid(key, "must not be empty"));
            }
        }
        Ok(())
    }

    /// Full path of an output file.
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    /// The configuration as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

fn invalid(key: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// The layered provider stack, without extraction.
///
/// With `explicit` set, that file replaces the default `tftdesc.yaml`
/// lookup.
pub fn figment(explicit: Option<&Path>) -> Figment {
    let file = explicit.map_or_else(|| PathBuf::from(CONFIG_FILE), Path::to_path_buf);
    Figment::from(Serialized::defaults(TftdescConfig::default()))
        .merge(Yaml::file(file))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load and validate the effective configuration.
///
/// A missing default file is not an error; a missing explicit file is.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] for a missing explicit file,
/// [`ConfigError::Load`] when a layer cannot be decoded, and
/// [`ConfigError::InvalidValue`] when validation fails.
pub fn load_config(explicit: Option<&Path>) -> Result<TftdescConfig> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
    }
    let config: TftdescConfig = figment(explicit).extract()?;
    config.validate()?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
