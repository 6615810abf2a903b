//! Description templates for tftdesc.
//!
//! Raw descriptions are markup with placeholder tokens (`@Name@`,
//! `@Name*100@`, `{1a2b3c}`) and icon markers (`%i:scaleAP%`). The
//! [`TemplateEngine`] strips the markup, substitutes every token through a
//! [`TokenResolver`], and normalizes the result. Trait descriptions
//! additionally expand `<row>` / `<expandRow>` blocks once per effect
//! threshold.

pub mod cleanup;
pub mod engine;
pub mod icon;
pub mod markup;
pub mod resolve;
pub mod token;

pub use engine::{RenderOptions, TemplateEngine};
pub use resolve::{TokenResolver, VariableResolver};
