//! Description rendering for tftdesc.
//!
//! [`RenderOrchestrator`] builds the right value source for each entity kind
//! and runs the template engine over it:
//!
//! - champion abilities resolve against the champion's spell file,
//! - items against their flat `effects` map,
//! - traits against their ordered effect thresholds, one row per threshold.
//!
//! The rendered text is inserted right after the raw template field. The
//! [`batch`] module runs a whole dataset through one kind at a time.

pub mod batch;
pub mod error;
pub mod orchestrator;
pub mod source;
pub mod values;

pub use batch::BatchReport;
pub use error::{RenderError, Result};
pub use orchestrator::{EntityKind, Outcome, RenderOrchestrator, RenderSettings, RenderedEntity};
pub use source::{SpellDirectory, SpellSource};
