//! # modgen-codegen
//!
//! Rendering and writing of the generated source artifacts.
//!
//! Two artifacts exist:
//! - `generated_config.h` — sorted unique include directives, the full
//!   aggregated configuration embedded as a JSON raw string, and the
//!   `registerAllModuleTypes()` registration procedure
//! - `generated_mqtt_interfaces.h` — one binding declaration per protocol
//!   interface entry; skipped entirely when there are none
//!
//! Rendering is a pure function of the aggregate: identical aggregates always
//! produce byte-identical text. The [`Generator`] handles the filesystem side
//! (directory creation, writes, and a CI check mode that fails when an
//! artifact on disk is missing or stale).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

mod generator;
mod render;

pub use generator::{GenerateOptions, GeneratedArtifact, Generator};
pub use render::{CONFIG_HEADER_FILE, MQTT_HEADER_FILE, render_config_header, render_mqtt_header};

/// Result type for codegen operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while materializing artifacts.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// The output directory could not be created.
    #[error("Failed to create output directory {path}")]
    #[diagnostic(
        code(modgen::codegen::create_dir_failed),
        help("Check permissions on the output location")
    )]
    CreateDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An artifact could not be written.
    #[error("Failed to write artifact {path}")]
    #[diagnostic(code(modgen::codegen::write_failed))]
    Write {
        /// The artifact path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Check mode: an expected artifact does not exist on disk.
    #[error("Missing artifact {path}")]
    #[diagnostic(
        code(modgen::codegen::missing_artifact),
        help("Run `modgen generate` to create the artifacts")
    )]
    Missing {
        /// The artifact path.
        path: PathBuf,
    },

    /// Check mode: an artifact on disk differs from what would be generated.
    #[error("Artifact {path} is out of date")]
    #[diagnostic(
        code(modgen::codegen::stale_artifact),
        help("Run `modgen generate` to refresh the artifacts")
    )]
    OutOfDate {
        /// The artifact path.
        path: PathBuf,
    },

    /// Check mode: an existing artifact could not be read back.
    #[error("Failed to read artifact {path}")]
    #[diagnostic(code(modgen::codegen::read_failed))]
    Read {
        /// The artifact path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
