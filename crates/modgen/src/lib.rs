//! # modgen
//!
//! Build-time tool for modular embedded firmware projects: discovers modules
//! under a project's library directory, validates every module instance's
//! configuration against its type's schema, and generates the C++ headers the
//! firmware consumes.
//!
//! The library surface is the [`pipeline`] module; the binary in `main.rs` is
//! a thin CLI over it that maps the pipeline outcome onto exit codes.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod pipeline;

pub use pipeline::{BuildContext, Outcome, PipelineError, run_pipeline};
