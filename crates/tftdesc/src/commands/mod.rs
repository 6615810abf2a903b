//! Command handlers, one module per subcommand.

pub mod config_cmd;
pub mod formulas;
pub mod render;
pub mod show;
pub mod version;
