//! Module locator
//!
//! Identifies which immediate subdirectories of the library root are modgen
//! modules. A directory qualifies iff its `library.json` parses and declares
//! the marker keyword.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use modgen_core::manifest::{LibraryManifest, MANIFEST_FILE};

use crate::{Error, Result};

/// A library directory that qualified as a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDir {
    /// Directory name, used in diagnostics.
    pub name: String,
    /// Path to the module directory.
    pub path: PathBuf,
}

/// Scan `lib_root` for module directories.
///
/// An absent library root is not an error: module-less builds are valid and
/// yield an empty result. Entries are visited in name order so the scan is
/// stable across platforms and runs.
///
/// # Errors
///
/// Returns [`Error::Scan`] if an existing library root cannot be listed.
pub fn find_modules(lib_root: &Path) -> Result<Vec<ModuleDir>> {
    if !lib_root.is_dir() {
        debug!("Library root {} does not exist, nothing to discover", lib_root.display());
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(lib_root).map_err(|source| Error::Scan {
        path: lib_root.to_path_buf(),
        source,
    })?;

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    candidates.sort();

    let mut modules = Vec::new();
    for path in candidates {
        if !is_module(&path) {
            continue;
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!("Found module: {name}");
        modules.push(ModuleDir { name, path });
    }

    Ok(modules)
}

/// Whether a library directory's descriptor marks it as a module.
///
/// A missing descriptor means "not a module"; an unparseable one additionally
/// warns, but neither aborts the scan.
fn is_module(dir: &Path) -> bool {
    let manifest_path = dir.join(MANIFEST_FILE);
    let raw = match fs::read_to_string(&manifest_path) {
        Ok(raw) => raw,
        Err(_) => return false,
    };

    match serde_json::from_str::<LibraryManifest>(&raw) {
        Ok(manifest) => manifest.is_module(),
        Err(e) => {
            warn!("Could not parse {}: {e}", manifest_path.display());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_library(root: &Path, name: &str, manifest: &str) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(MANIFEST_FILE), manifest).unwrap();
        dir
    }

    #[test]
    fn test_missing_lib_root_yields_empty() {
        let temp = TempDir::new().unwrap();
        let modules = find_modules(&temp.path().join("does-not-exist")).unwrap();
        assert!(modules.is_empty());
    }

    #[test]
    fn test_finds_marked_modules_only() {
        let temp = TempDir::new().unwrap();
        write_library(
            temp.path(),
            "LedFlasher",
            r#"{"keywords": ["modgen-module"]}"#,
        );
        write_library(temp.path(), "PlainLib", r#"{"keywords": ["arduino"]}"#);
        fs::create_dir_all(temp.path().join("NoManifest")).unwrap();

        let modules = find_modules(temp.path()).unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "LedFlasher");
    }

    #[test]
    fn test_marker_is_case_insensitive() {
        let temp = TempDir::new().unwrap();
        write_library(
            temp.path(),
            "Button",
            r#"{"keywords": "embedded, MODGEN-MODULE"}"#,
        );

        let modules = find_modules(temp.path()).unwrap();
        assert_eq!(modules.len(), 1);
    }

    #[test]
    fn test_unparseable_manifest_is_skipped_not_fatal() {
        let temp = TempDir::new().unwrap();
        write_library(temp.path(), "Broken", "{ not json");
        write_library(temp.path(), "Good", r#"{"keywords": ["modgen-module"]}"#);

        let modules = find_modules(temp.path()).unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "Good");
    }

    #[test]
    fn test_modules_returned_in_name_order() {
        let temp = TempDir::new().unwrap();
        for name in ["Zeta", "Alpha", "Mid"] {
            write_library(temp.path(), name, r#"{"keywords": ["modgen-module"]}"#);
        }

        let names: Vec<_> = find_modules(temp.path())
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "Mid", "Zeta"]);
    }

    #[test]
    fn test_plain_files_in_lib_root_are_ignored() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("stray.txt"), "not a directory").unwrap();

        let modules = find_modules(temp.path()).unwrap();
        assert!(modules.is_empty());
    }
}
