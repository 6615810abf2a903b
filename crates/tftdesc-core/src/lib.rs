//! Core types for tftdesc.
//!
//! This crate holds the entity-record plumbing shared by every renderer:
//! the load-once [`dataset::DataSet`] context, trait effect thresholds,
//! ordered field insertion on records, and JSON file helpers.

pub mod dataset;
pub mod error;
pub mod jsonfile;
pub mod lenient;
pub mod record;
pub mod threshold;

pub use error::{CoreError, Result};
