//! Configuration aggregator
//!
//! Transforms the set of qualifying module directories into one
//! [`Aggregate`]: implementation headers and class names (deduplicated),
//! instance configurations and protocol interfaces (discovery order), and
//! validation schemas keyed by class name.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::warn;

use modgen_core::aggregate::{Aggregate, ProtocolInterfaceEntry};
use modgen_core::manifest::{CONFIG_FILE, InstanceConfigFile, MODULE_SRC_DIR, SCHEMA_FILE};
use modgen_core::schema::Schema;

use crate::locator::{ModuleDir, find_modules};
use crate::Result;

/// Header-file extension that identifies a module's implementation.
const HEADER_EXTENSION: &str = "h";

/// The implementation found inside a module's source subdirectory.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ModuleImplementation {
    /// Class name, derived from the header file stem.
    class_name: String,
    /// Header file name, e.g. `LedModule.h`.
    header: String,
}

/// Discover all modules under `lib_root` and aggregate their configuration.
///
/// # Errors
///
/// Returns an error only if an existing library root cannot be listed;
/// per-module problems are warnings and leave the rest of the aggregate
/// intact.
pub fn aggregate_modules(lib_root: &Path) -> Result<Aggregate> {
    let modules = find_modules(lib_root)?;

    let mut aggregate = Aggregate::default();
    for module in &modules {
        process_module(module, &mut aggregate);
    }

    Ok(aggregate)
}

/// Fold one module's files into the aggregate.
fn process_module(module: &ModuleDir, aggregate: &mut Aggregate) {
    let Some(implementation) = find_implementation(module) else {
        warn!(
            "Module '{}' has no header in its {MODULE_SRC_DIR}/ directory, skipping",
            module.name
        );
        return;
    };

    aggregate.headers.insert(implementation.header.clone());
    aggregate.class_names.insert(implementation.class_name.clone());

    if let Some(config) = load_json::<InstanceConfigFile>(&module.path.join(CONFIG_FILE)) {
        let instances = config.into_instances();
        for instance in &instances {
            if let (Some(name), Some(module_type), Some(interface)) = (
                &instance.instance_name,
                &instance.module_type,
                &instance.mqtt_interface,
            ) {
                aggregate.mqtt_interfaces.push(ProtocolInterfaceEntry {
                    instance_name: name.clone(),
                    module_type: module_type.clone(),
                    interface: interface.clone(),
                });
            }
        }
        aggregate.configs.extend(instances);
    }

    if let Some(schema) = load_json::<Schema>(&module.path.join(SCHEMA_FILE)) {
        aggregate
            .schemas
            .insert(implementation.class_name, schema);
    }
}

/// Find the module's implementation header: the first `*.h` file inside its
/// source subdirectory, in name order. One implementation per module; extra
/// headers are ignored.
fn find_implementation(module: &ModuleDir) -> Option<ModuleImplementation> {
    let src_dir = module.path.join(MODULE_SRC_DIR);
    let entries = fs::read_dir(&src_dir).ok()?;

    let mut headers: Vec<_> = entries
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some(HEADER_EXTENSION)
        })
        .collect();
    headers.sort();

    let header_path = headers.into_iter().next()?;
    let header = header_path.file_name()?.to_string_lossy().into_owned();
    let class_name = header_path.file_stem()?.to_string_lossy().into_owned();

    Some(ModuleImplementation { class_name, header })
}

/// Load an optional JSON file, treating parse failures as "file absent".
///
/// Missing files are silent; unreadable or malformed ones warn with the
/// offending path so the operator can fix them.
fn load_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    if !path.exists() {
        return None;
    }

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Could not read {}: {e}", path.display());
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Could not parse {}: {e}", path.display());
            None
        }
    }
}
