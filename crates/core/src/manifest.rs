//! Library descriptor and instance configuration types
//!
//! A module library carries up to three JSON files that modgen reads:
//! `library.json` (the descriptor that marks it as a module), `config.json`
//! (one or many instance configurations), and `config.schema.json` (handled
//! in [`crate::schema`]).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Keyword that marks a library as a modgen module in its `library.json`.
pub const MODULE_KEYWORD: &str = "modgen-module";

/// Descriptor file name looked up in each library directory.
pub const MANIFEST_FILE: &str = "library.json";

/// Instance configuration file name looked up in each module directory.
pub const CONFIG_FILE: &str = "config.json";

/// Validation schema file name looked up in each module directory.
pub const SCHEMA_FILE: &str = "config.schema.json";

/// Subdirectory of a module that holds its implementation header.
pub const MODULE_SRC_DIR: &str = "src";

/// The per-library descriptor (`library.json`) consulted during discovery.
///
/// Only the fields modgen cares about are modeled; everything else in the
/// descriptor is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LibraryManifest {
    /// Library name (informational; diagnostics use the directory name).
    #[serde(default)]
    pub name: Option<String>,
    /// Declared keywords. A library qualifies as a module when these contain
    /// [`MODULE_KEYWORD`], checked case-insensitively.
    #[serde(default)]
    pub keywords: Keywords,
}

impl LibraryManifest {
    /// Whether this descriptor marks its library as a modgen module.
    #[must_use]
    pub fn is_module(&self) -> bool {
        self.keywords.contains(MODULE_KEYWORD)
    }
}

/// Descriptor keywords: either a single comma-separated string or a list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Keywords {
    /// A comma-separated keyword string, e.g. `"embedded, modgen-module"`.
    One(String),
    /// An explicit keyword list.
    Many(Vec<String>),
}

impl Default for Keywords {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl Keywords {
    /// Case-insensitive membership check.
    #[must_use]
    pub fn contains(&self, keyword: &str) -> bool {
        match self {
            Self::One(s) => s
                .split(',')
                .map(str::trim)
                .any(|k| k.eq_ignore_ascii_case(keyword)),
            Self::Many(list) => list
                .iter()
                .any(|k| k.trim().eq_ignore_ascii_case(keyword)),
        }
    }
}

/// One configured occurrence of a module type.
///
/// All fields are optional at parse time; the aggregator and validator are
/// tolerant of partially specified instances, and the protocol-interface
/// extraction only fires when name, type, and interface are all present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceConfig {
    /// Unique-by-convention name of this instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_name: Option<String>,
    /// Implementation class name of the module type.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub module_type: Option<String>,
    /// The instance's configuration payload, validated against the type's
    /// schema when one is registered.
    #[serde(default)]
    pub config: serde_json::Map<String, Value>,
    /// Optional MQTT interface descriptor for this instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mqtt_interface: Option<Value>,
}

/// Shape of a module's `config.json`: a single instance or an ordered list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum InstanceConfigFile {
    /// A list of instances, order preserved.
    Many(Vec<InstanceConfig>),
    /// A single instance object.
    One(Box<InstanceConfig>),
}

impl InstanceConfigFile {
    /// Normalize both shapes into a flat ordered sequence.
    #[must_use]
    pub fn into_instances(self) -> Vec<InstanceConfig> {
        match self {
            Self::Many(instances) => instances,
            Self::One(instance) => vec![*instance],
        }
    }
}
