//! The merged cross-module view produced once per run
//!
//! Discovery builds one [`Aggregate`] from all qualifying modules; validation
//! and code generation only ever read it. Headers and class names live in
//! sorted sets because generated output must not depend on filesystem listing
//! order; instance configs and protocol entries keep discovery order because
//! their order is semantically meaningful.

use std::collections::{BTreeSet, HashMap};

use serde_json::Value;

use crate::manifest::InstanceConfig;
use crate::schema::Schema;

/// MQTT interface descriptor owned by one module instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolInterfaceEntry {
    /// Name of the owning instance.
    pub instance_name: String,
    /// Implementation class name of the instance's module type.
    pub module_type: String,
    /// The interface descriptor as declared in `config.json`.
    pub interface: Value,
}

/// The merged, cross-module view of all configs, headers, class names,
/// schemas, and protocol interfaces.
#[derive(Debug, Clone, Default)]
pub struct Aggregate {
    /// Instance configurations in discovery order.
    pub configs: Vec<InstanceConfig>,
    /// Implementation header file names, sorted and deduplicated.
    pub headers: BTreeSet<String>,
    /// Implementation class names, sorted and deduplicated.
    pub class_names: BTreeSet<String>,
    /// Protocol interface entries in discovery order.
    pub mqtt_interfaces: Vec<ProtocolInterfaceEntry>,
    /// Validation schemas keyed by implementation class name.
    pub schemas: HashMap<String, Schema>,
}

impl Aggregate {
    /// Whether discovery found nothing at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty() && self.class_names.is_empty()
    }

    /// Look up the schema registered for a module type, if any.
    #[must_use]
    pub fn schema_for(&self, module_type: &str) -> Option<&Schema> {
        self.schemas.get(module_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_default_is_empty() {
        let aggregate = Aggregate::default();
        assert!(aggregate.is_empty());
        assert!(aggregate.schema_for("LedModule").is_none());
    }

    #[test]
    fn test_headers_deduplicate_and_sort() {
        let mut aggregate = Aggregate::default();
        aggregate.headers.insert("LedModule.h".to_string());
        aggregate.headers.insert("ButtonModule.h".to_string());
        aggregate.headers.insert("LedModule.h".to_string());

        let headers: Vec<_> = aggregate.headers.iter().collect();
        assert_eq!(headers, vec!["ButtonModule.h", "LedModule.h"]);
    }

    #[test]
    fn test_schema_for_registered_type() {
        let mut aggregate = Aggregate::default();
        aggregate.schemas.insert("LedModule".to_string(), Schema::new());
        assert!(aggregate.schema_for("LedModule").is_some());
        assert!(aggregate.schema_for("ButtonModule").is_none());
    }
}
