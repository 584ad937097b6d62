//! modgen CLI
//!
//! Thin command-line front end over the pipeline: parses arguments, runs the
//! requested stage(s), prints every validation violation when the aggregate
//! is rejected, and maps the outcome onto the process exit code.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use modgen::{BuildContext, Outcome, run_pipeline};
use modgen_discovery::aggregate_modules;
use modgen_validate::validate;

#[derive(Parser)]
#[command(name = "modgen")]
#[command(about = "Module discovery, config validation, and header generation for firmware projects")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan modules, validate configs, and write the generated headers
    Generate {
        /// Project library directory to scan for modules
        #[arg(short, long, default_value = "lib")]
        lib_dir: PathBuf,
        /// Output directory for the generated headers
        #[arg(short, long, default_value = "include")]
        output: PathBuf,
    },
    /// Scan modules and validate configs without writing anything
    Validate {
        /// Project library directory to scan for modules
        #[arg(short, long, default_value = "lib")]
        lib_dir: PathBuf,
    },
    /// Verify the generated headers on disk are up to date (for CI)
    Check {
        /// Project library directory to scan for modules
        #[arg(short, long, default_value = "lib")]
        lib_dir: PathBuf,
        /// Directory holding the previously generated headers
        #[arg(short, long, default_value = "include")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { lib_dir, output } => run(&BuildContext { lib_dir, output_dir: output }, false),
        Commands::Check { lib_dir, output } => run(&BuildContext { lib_dir, output_dir: output }, true),
        Commands::Validate { lib_dir } => validate_only(&lib_dir),
    }
}

/// Run the full pipeline and map its outcome onto success or failure.
fn run(context: &BuildContext, check: bool) -> Result<()> {
    match run_pipeline(context, check)? {
        Outcome::Generated(artifacts) => {
            if check {
                for artifact in &artifacts {
                    info!("Up to date: {}", artifact.path.display());
                }
            } else {
                info!(
                    "Generated {} artifact(s) in {}",
                    artifacts.len(),
                    context.output_dir.display()
                );
            }
            Ok(())
        }
        Outcome::Invalid(report) => reject(&report),
    }
}

/// Discovery plus validation only, writing nothing.
fn validate_only(lib_dir: &Path) -> Result<()> {
    let aggregate = aggregate_modules(lib_dir)?;
    let report = validate(&aggregate);

    if report.is_valid() {
        info!(
            "All {} instance configuration(s) are valid",
            aggregate.configs.len()
        );
        Ok(())
    } else {
        reject(&report)
    }
}

/// Print every violation, then fail the run.
fn reject(report: &modgen_validate::ValidationReport) -> Result<()> {
    for violation in &report.violations {
        error!("{violation}");
    }
    anyhow::bail!(
        "Configuration validation failed with {} error(s); no artifacts written",
        report.violations.len()
    )
}
