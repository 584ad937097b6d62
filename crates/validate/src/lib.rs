//! # modgen-validate
//!
//! Validation of aggregated instance configurations against their module
//! types' schemas.
//!
//! The validator is pure over the aggregate: it performs no I/O and never
//! fails fast. Every violation across every instance is enumerated so the
//! operator sees the full picture in one run, and the overall verdict is the
//! AND over all instances.
//!
//! Schema semantics are open and permissive: types without a registered
//! schema always pass, and config fields a schema does not declare are
//! ignored.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::fmt;

use tracing::debug;

use modgen_core::aggregate::Aggregate;
use modgen_core::manifest::InstanceConfig;
use modgen_core::schema::{FieldType, Schema, value_type_name};

/// Placeholder used in diagnostics for instances without a name.
const UNNAMED_INSTANCE: &str = "unnamed";

/// A single validation failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Name of the offending instance (or `unnamed`).
    pub instance: String,
    /// The instance's declared module type.
    pub module_type: String,
    /// The config field the rule applies to.
    pub field: String,
    /// What went wrong.
    pub kind: ViolationKind,
}

/// The ways a config field can violate its rule.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationKind {
    /// A field marked `required` is absent from the instance's config.
    MissingRequired,
    /// A declared field is present with the wrong runtime type.
    TypeMismatch {
        /// The type tag the schema declares.
        expected: FieldType,
        /// The runtime type actually observed.
        observed: &'static str,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::MissingRequired => write!(
                f,
                "Missing required key '{}' for instance '{}' of type '{}'",
                self.field, self.instance, self.module_type
            ),
            ViolationKind::TypeMismatch { expected, observed } => write!(
                f,
                "Invalid type for key '{}' in instance '{}' of type '{}': expected '{}', got '{}'",
                self.field,
                self.instance,
                self.module_type,
                expected.name(),
                observed
            ),
        }
    }
}

/// Outcome of validating a whole aggregate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    /// Every violation found, in instance order then schema field order.
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Whether the whole batch passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Validate every instance configuration in the aggregate against the schema
/// registered for its module type.
#[must_use]
pub fn validate(aggregate: &Aggregate) -> ValidationReport {
    let mut report = ValidationReport::default();

    for instance in &aggregate.configs {
        let Some(module_type) = instance.module_type.as_deref() else {
            continue;
        };
        let Some(schema) = aggregate.schema_for(module_type) else {
            continue;
        };

        debug!(
            "Validating '{}' ({module_type})",
            instance.instance_name.as_deref().unwrap_or(UNNAMED_INSTANCE)
        );
        check_instance(instance, module_type, schema, &mut report);
    }

    report
}

/// Apply one schema to one instance, appending violations to the report.
fn check_instance(
    instance: &InstanceConfig,
    module_type: &str,
    schema: &Schema,
    report: &mut ValidationReport,
) {
    let instance_name = instance
        .instance_name
        .as_deref()
        .unwrap_or(UNNAMED_INSTANCE);

    for (field, rule) in schema {
        let value = instance.config.get(field);

        if rule.required && value.is_none() {
            report.violations.push(Violation {
                instance: instance_name.to_string(),
                module_type: module_type.to_string(),
                field: field.clone(),
                kind: ViolationKind::MissingRequired,
            });
            continue;
        }

        if let (Some(value), Some(expected)) = (value, rule.field_type)
            && !expected.matches(value)
        {
            report.violations.push(Violation {
                instance: instance_name.to_string(),
                module_type: module_type.to_string(),
                field: field.clone(),
                kind: ViolationKind::TypeMismatch {
                    expected,
                    observed: value_type_name(value),
                },
            });
        }
    }
}
