//! Artifact materialization
//!
//! Takes rendered header text and puts it on disk (or, in check mode,
//! verifies that what is on disk matches what would be written).

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use modgen_core::aggregate::Aggregate;

use crate::render::{CONFIG_HEADER_FILE, MQTT_HEADER_FILE, render_config_header, render_mqtt_header};
use crate::{Error, Result};

/// Options for artifact generation.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Directory the artifacts are written into (created if absent).
    pub output_dir: PathBuf,
    /// Check mode: write nothing, fail if artifacts are missing or stale.
    pub check: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            check: false,
        }
    }
}

/// A generated artifact: where it goes and what it contains.
#[derive(Debug, Clone)]
pub struct GeneratedArtifact {
    /// Path the artifact was (or would be) written to.
    pub path: PathBuf,
    /// Rendered content.
    pub content: String,
}

/// Renders an aggregate into artifacts and materializes them.
#[derive(Debug)]
pub struct Generator {
    aggregate: Aggregate,
}

impl Generator {
    /// Create a generator for one aggregate.
    #[must_use]
    pub fn new(aggregate: Aggregate) -> Self {
        Self { aggregate }
    }

    /// Generate all artifacts for the aggregate.
    ///
    /// The primary header is always produced; the MQTT header only when
    /// protocol interface entries exist (no empty file is ever written).
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory cannot be created, an
    /// artifact cannot be written, or (in check mode) an artifact is missing
    /// or out of date.
    pub fn generate(&self, options: &GenerateOptions) -> Result<Vec<GeneratedArtifact>> {
        let mut artifacts = vec![GeneratedArtifact {
            path: options.output_dir.join(CONFIG_HEADER_FILE),
            content: render_config_header(&self.aggregate),
        }];

        if !self.aggregate.mqtt_interfaces.is_empty() {
            artifacts.push(GeneratedArtifact {
                path: options.output_dir.join(MQTT_HEADER_FILE),
                content: render_mqtt_header(&self.aggregate.mqtt_interfaces),
            });
        }

        if options.check {
            for artifact in &artifacts {
                check_file(&artifact.path, &artifact.content)?;
            }
        } else {
            fs::create_dir_all(&options.output_dir).map_err(|source| Error::CreateDir {
                path: options.output_dir.clone(),
                source,
            })?;
            for artifact in &artifacts {
                write_file(&artifact.path, &artifact.content)?;
            }
        }

        Ok(artifacts)
    }
}

/// Write one artifact, fully replacing any previous content.
fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Generated: {}", path.display());
    Ok(())
}

/// Check-mode comparison of an artifact against its on-disk state.
fn check_file(path: &Path, expected_content: &str) -> Result<()> {
    if !path.exists() {
        return Err(Error::Missing {
            path: path.to_path_buf(),
        });
    }

    let actual_content = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if actual_content != expected_content {
        return Err(Error::OutOfDate {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use modgen_core::aggregate::ProtocolInterfaceEntry;
    use serde_json::json;
    use tempfile::TempDir;

    fn aggregate_without_mqtt() -> Aggregate {
        let mut aggregate = Aggregate::default();
        aggregate.headers.insert("LedModule.h".to_string());
        aggregate.class_names.insert("LedModule".to_string());
        aggregate
    }

    fn aggregate_with_mqtt() -> Aggregate {
        let mut aggregate = aggregate_without_mqtt();
        aggregate.mqtt_interfaces.push(ProtocolInterfaceEntry {
            instance_name: "main_light".to_string(),
            module_type: "LedModule".to_string(),
            interface: json!({"topic": "home/light"}),
        });
        aggregate
    }

    fn options_for(dir: &TempDir) -> GenerateOptions {
        GenerateOptions {
            output_dir: dir.path().to_path_buf(),
            check: false,
        }
    }

    #[test]
    fn test_generate_writes_config_header() {
        let temp = TempDir::new().unwrap();
        let generator = Generator::new(aggregate_without_mqtt());

        let artifacts = generator.generate(&options_for(&temp)).unwrap();
        assert_eq!(artifacts.len(), 1);
        assert!(temp.path().join(CONFIG_HEADER_FILE).exists());
    }

    #[test]
    fn test_no_mqtt_entries_means_no_mqtt_artifact() {
        let temp = TempDir::new().unwrap();
        let generator = Generator::new(aggregate_without_mqtt());

        generator.generate(&options_for(&temp)).unwrap();
        assert!(!temp.path().join(MQTT_HEADER_FILE).exists());
    }

    #[test]
    fn test_mqtt_entries_produce_second_artifact() {
        let temp = TempDir::new().unwrap();
        let generator = Generator::new(aggregate_with_mqtt());

        let artifacts = generator.generate(&options_for(&temp)).unwrap();
        assert_eq!(artifacts.len(), 2);
        let content = fs::read_to_string(temp.path().join(MQTT_HEADER_FILE)).unwrap();
        assert!(content.contains("MODGEN_MQTT_IFACE_main_light"));
    }

    #[test]
    fn test_output_directory_created_if_absent() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("build").join("include");
        let generator = Generator::new(aggregate_without_mqtt());

        let options = GenerateOptions {
            output_dir: nested.clone(),
            check: false,
        };
        generator.generate(&options).unwrap();
        assert!(nested.join(CONFIG_HEADER_FILE).exists());
    }

    #[test]
    fn test_existing_artifact_fully_overwritten() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_HEADER_FILE);
        fs::write(&path, "stale content that is much longer than the new one".repeat(10)).unwrap();

        let generator = Generator::new(aggregate_without_mqtt());
        generator.generate(&options_for(&temp)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("#pragma once"));
        assert!(!content.contains("stale content"));
    }

    #[test]
    fn test_two_runs_produce_identical_bytes() {
        let temp = TempDir::new().unwrap();
        let generator = Generator::new(aggregate_with_mqtt());
        let options = options_for(&temp);

        generator.generate(&options).unwrap();
        let first = fs::read_to_string(temp.path().join(CONFIG_HEADER_FILE)).unwrap();
        generator.generate(&options).unwrap();
        let second = fs::read_to_string(temp.path().join(CONFIG_HEADER_FILE)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_check_mode_missing_artifact() {
        let temp = TempDir::new().unwrap();
        let generator = Generator::new(aggregate_without_mqtt());

        let options = GenerateOptions {
            output_dir: temp.path().to_path_buf(),
            check: true,
        };
        let err = generator.generate(&options).unwrap_err();
        assert!(matches!(err, Error::Missing { .. }));
    }

    #[test]
    fn test_check_mode_stale_artifact() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_HEADER_FILE), "old").unwrap();
        let generator = Generator::new(aggregate_without_mqtt());

        let options = GenerateOptions {
            output_dir: temp.path().to_path_buf(),
            check: true,
        };
        let err = generator.generate(&options).unwrap_err();
        assert!(matches!(err, Error::OutOfDate { .. }));
    }

    #[test]
    fn test_check_mode_passes_after_generate() {
        let temp = TempDir::new().unwrap();
        let generator = Generator::new(aggregate_with_mqtt());

        generator.generate(&options_for(&temp)).unwrap();

        let check = GenerateOptions {
            output_dir: temp.path().to_path_buf(),
            check: true,
        };
        assert!(generator.generate(&check).is_ok());
    }

    #[test]
    fn test_check_mode_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let generator = Generator::new(aggregate_without_mqtt());

        let options = GenerateOptions {
            output_dir: temp.path().join("untouched"),
            check: true,
        };
        let _ = generator.generate(&options);
        assert!(!temp.path().join("untouched").exists());
    }
}
