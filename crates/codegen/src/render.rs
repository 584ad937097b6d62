//! Pure renderers for the generated headers
//!
//! Everything here is a function from aggregate data to text. Determinism
//! comes from the aggregate itself: headers and class names are sorted sets,
//! JSON object keys are serialized in sorted order, and instance sequences
//! carry their own meaningful order.

use std::fmt::Write as _;

use modgen_core::aggregate::{Aggregate, ProtocolInterfaceEntry};

/// File name of the primary configuration/registration header.
pub const CONFIG_HEADER_FILE: &str = "generated_config.h";

/// File name of the MQTT interface bindings header.
pub const MQTT_HEADER_FILE: &str = "generated_mqtt_interfaces.h";

/// Banner placed at the top of every generated file.
const GENERATED_BANNER: &str = "// AUTO-GENERATED by modgen. Do not edit; changes will be overwritten.";

/// Render the primary header: sorted unique includes, the aggregated
/// configuration as a raw JSON string constant, and the module registration
/// procedure.
#[must_use]
pub fn render_config_header(aggregate: &Aggregate) -> String {
    let mut out = String::new();

    out.push_str("#pragma once\n");
    out.push_str(GENERATED_BANNER);
    out.push_str("\n\n");

    for header in &aggregate.headers {
        let _ = writeln!(out, "#include <{header}>");
    }
    if !aggregate.headers.is_empty() {
        out.push('\n');
    }

    let config_json = serde_json::to_string_pretty(&aggregate.configs)
        .unwrap_or_else(|_| "[]".to_string());
    let _ = writeln!(
        out,
        "static const char MODGEN_CONFIG_JSON[] = R\"json(\n{config_json}\n)json\";"
    );
    out.push('\n');

    out.push_str("inline void registerAllModuleTypes() {\n");
    for class_name in &aggregate.class_names {
        let _ = writeln!(
            out,
            "    ModuleFactory::getInstance().registerModule(\"{class_name}\", \
             [](const JsonObject& config) -> BaseModule* {{ return new {class_name}(config); }});"
        );
    }
    out.push_str("}\n");

    out
}

/// Render the MQTT interface bindings header, one declaration per entry.
///
/// Callers are expected to skip this artifact entirely when there are no
/// entries; rendering an empty slice still yields a valid (but pointless)
/// header.
#[must_use]
pub fn render_mqtt_header(entries: &[ProtocolInterfaceEntry]) -> String {
    let mut out = String::new();

    out.push_str("#pragma once\n");
    out.push_str(GENERATED_BANNER);
    out.push('\n');

    for entry in entries {
        let interface_json = serde_json::to_string_pretty(&entry.interface)
            .unwrap_or_else(|_| "null".to_string());
        let identifier = sanitize_identifier(&entry.instance_name);
        let _ = write!(
            out,
            "\n// MQTT interface for instance '{}' ({})\n\
             static const char MODGEN_MQTT_IFACE_{identifier}[] = R\"json(\n{interface_json}\n)json\";\n",
            entry.instance_name, entry.module_type
        );
    }

    out
}

/// Map an instance name onto a valid C identifier fragment.
fn sanitize_identifier(name: &str) -> String {
    let mut identifier: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if identifier.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        identifier.insert(0, '_');
    }
    identifier
}
