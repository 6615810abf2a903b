//! Error types for entity lookup.
//!
//! Rendering an entity never fails; these errors come from finding one.

use tftdesc_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("no champion, item or trait named '{0}'")]
    UnknownEntity(String),

    #[error("no spell data for champion '{0}'")]
    NoSpell(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;
