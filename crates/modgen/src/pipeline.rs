//! Pipeline orchestration
//!
//! Runs the three stages in order — discovery/aggregation, validation, and
//! artifact generation — with validation strictly gating generation: a
//! failing aggregate produces an [`Outcome::Invalid`] and nothing is written.
//!
//! The pipeline takes an explicit [`BuildContext`] rather than reading any
//! process-global build environment, and reports failure as data so the
//! caller decides how to surface it.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use modgen_codegen::{GenerateOptions, GeneratedArtifact, Generator};
use modgen_discovery::aggregate_modules;
use modgen_validate::{ValidationReport, validate};

/// The two directory paths the pipeline operates between.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Project library directory scanned for modules.
    pub lib_dir: PathBuf,
    /// Directory the generated headers are materialized into.
    pub output_dir: PathBuf,
}

/// Result of a full pipeline run.
#[derive(Debug)]
pub enum Outcome {
    /// Validation passed; these artifacts were written (or verified, in
    /// check mode).
    Generated(Vec<GeneratedArtifact>),
    /// Validation failed; nothing was written.
    Invalid(ValidationReport),
}

/// Errors from the fallible stages of the pipeline.
///
/// Validation violations are not an error variant: they are expected output,
/// carried in [`Outcome::Invalid`].
#[derive(Debug, Error, Diagnostic)]
pub enum PipelineError {
    /// Module discovery failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Discovery(#[from] modgen_discovery::Error),
    /// Artifact generation failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Codegen(#[from] modgen_codegen::Error),
}

/// Run discovery, validation, and generation for one project.
///
/// With `check` set, artifacts are compared against disk instead of written;
/// the gating behavior is identical.
///
/// # Errors
///
/// Returns an error if the library root cannot be scanned or artifacts cannot
/// be written (or, in check mode, are missing or stale).
pub fn run_pipeline(context: &BuildContext, check: bool) -> Result<Outcome, PipelineError> {
    let aggregate = aggregate_modules(&context.lib_dir)?;

    let report = validate(&aggregate);
    if !report.is_valid() {
        return Ok(Outcome::Invalid(report));
    }

    let generator = Generator::new(aggregate);
    let artifacts = generator.generate(&GenerateOptions {
        output_dir: context.output_dir.clone(),
        check,
    })?;

    Ok(Outcome::Generated(artifacts))
}
