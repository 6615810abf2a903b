//! Configuration for tftdesc.
//!
//! Settings are layered: built-in defaults, then `tftdesc.yaml` (or an
//! explicit `--config` file), then `TFTDESC_*` environment variables. See
//! [`config::load_config`].

pub mod config;

pub use config::{ConfigError, Result, TftdescConfig, load_config};
