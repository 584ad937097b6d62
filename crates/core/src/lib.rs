//! # modgen-core
//!
//! Core data model for the modgen build tool.
//!
//! This crate defines the types shared across the pipeline:
//! - [`manifest`] — the per-library descriptor (`library.json`) and instance
//!   configuration (`config.json`) shapes
//! - [`schema`] — field-level validation rules (`config.schema.json`)
//! - [`aggregate`] — the merged cross-module view handed from discovery to
//!   validation and code generation
//!
//! The aggregate is built once per run and is read-only afterwards; later
//! pipeline stages never mutate data owned by earlier ones.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod aggregate;
pub mod manifest;
pub mod schema;

pub use aggregate::{Aggregate, ProtocolInterfaceEntry};
pub use manifest::{InstanceConfig, InstanceConfigFile, Keywords, LibraryManifest};
pub use schema::{FieldRule, FieldType, Schema, value_type_name};
