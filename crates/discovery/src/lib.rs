//! # modgen-discovery
//!
//! Module discovery and configuration aggregation.
//!
//! The locator walks a project's library root and identifies which library
//! directories are modgen modules (marker keyword in `library.json`). The
//! aggregator then extracts each module's implementation header, instance
//! configurations, protocol interfaces, and validation schema into one
//! [`Aggregate`].
//!
//! Discovery is tolerant by design: a malformed descriptor, config, or schema
//! file only disables that file for that module (with a warning naming the
//! offending path); it never aborts the scan. The only fatal condition is an
//! I/O failure listing an existing library root.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

mod aggregator;
mod locator;

pub use aggregator::aggregate_modules;
pub use locator::{ModuleDir, find_modules};

/// Result type for discovery operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during module discovery.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// The library root exists but could not be listed.
    #[error("Failed to scan library directory {path}")]
    #[diagnostic(
        code(modgen::discovery::scan_failed),
        help("Check that the library directory exists and is readable")
    )]
    Scan {
        /// The directory being scanned.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
