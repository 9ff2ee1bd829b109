//! Source tree scanning.
//!
//! Reads every input root named by the configuration and runs the
//! per-construct grammars over each file. Scanning is best-effort per file:
//! missing roots, unreadable files, and files without a recognizable shape
//! are recorded as diagnostics and skipped.

use crate::grammar::class::parse_classes;
use crate::grammar::endpoint::{ControllerSource, parse_controller};
use crate::grammar::value_object::parse_value_objects;
use crate::lexer::tokenize;
use apigen_core::{Diagnostic, GeneratorConfig, SourceClass, ValueObjectRegistry};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Everything read from the backend tree in one run.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Classes from the request, response, and shared DTO roots, in scan order
    pub classes: Vec<SourceClass>,
    /// Controllers in file-name order
    pub controllers: Vec<ControllerSource>,
    /// Identifier value objects
    pub registry: ValueObjectRegistry,
    /// Problems met while scanning
    pub diagnostics: Vec<Diagnostic>,
}

impl Extraction {
    /// Number of actions discovered across all controllers.
    #[must_use]
    pub fn action_count(&self) -> usize {
        self.controllers.iter().map(|c| c.endpoints.len()).sum()
    }
}

/// Scans the inputs described by a [`GeneratorConfig`].
#[derive(Debug, Clone, Copy)]
pub struct SourceScanner<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> SourceScanner<'a> {
    /// Creates a scanner over the configured backend tree.
    #[must_use]
    pub const fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Reads the value-object file, all class roots, and the controller
    /// root.
    #[must_use]
    pub fn scan(&self) -> Extraction {
        let mut diagnostics = Vec::new();

        let registry = load_value_objects(&self.config.value_objects_file(), &mut diagnostics);
        tracing::debug!("Registered {} value objects", registry.len());

        let mut classes = Vec::new();
        for dir in self.config.class_dirs() {
            classes.extend(scan_classes(&dir, &mut diagnostics));
        }

        let controllers = scan_controllers(&self.config.controllers_dir(), &mut diagnostics);

        Extraction {
            classes,
            controllers,
            registry,
            diagnostics,
        }
    }
}

/// Extracts classes from every `*.cs` file directly inside `dir`.
pub fn scan_classes(dir: &Path, diagnostics: &mut Vec<Diagnostic>) -> Vec<SourceClass> {
    tracing::info!("Parsing classes in {}", dir.display());
    let mut classes = Vec::new();
    for path in source_files(dir, ".cs", diagnostics) {
        let Some(text) = read_source(&path, diagnostics) else {
            continue;
        };
        let found = parse_classes(&tokenize(&text), &path);
        if found.is_empty() {
            tracing::debug!("No class declaration in {}", path.display());
            diagnostics.push(Diagnostic::unmatched_file(&path, "class declaration"));
            continue;
        }
        for class in &found {
            tracing::debug!(
                "Found {} ({} properties) in {}",
                class.name,
                class.properties.len(),
                path.display()
            );
        }
        classes.extend(found);
    }
    classes
}

/// Extracts controllers from every `*Controller.cs` file directly inside
/// `dir`.
pub fn scan_controllers(dir: &Path, diagnostics: &mut Vec<Diagnostic>) -> Vec<ControllerSource> {
    tracing::info!("Parsing controllers in {}", dir.display());
    let mut controllers = Vec::new();
    for path in source_files(dir, "Controller.cs", diagnostics) {
        let Some(text) = read_source(&path, diagnostics) else {
            continue;
        };
        match parse_controller(&tokenize(&text), &path) {
            Some(controller) => {
                tracing::debug!(
                    "Found {} actions on '{}' in {}",
                    controller.endpoints.len(),
                    controller.controller_name,
                    path.display()
                );
                controllers.push(controller);
            }
            None => {
                tracing::debug!("No controller class in {}", path.display());
                diagnostics.push(Diagnostic::unmatched_file(&path, "controller class"));
            }
        }
    }
    controllers
}

/// Loads the identifier value-object registry.
///
/// A missing file yields an empty registry and a
/// [`MissingDirectory`](apigen_core::DiagnosticKind::MissingDirectory)
/// warning.
pub fn load_value_objects(file: &Path, diagnostics: &mut Vec<Diagnostic>) -> ValueObjectRegistry {
    if !file.is_file() {
        tracing::warn!("Value object file not found: {}", file.display());
        diagnostics.push(Diagnostic::missing_directory(file));
        return ValueObjectRegistry::new();
    }
    read_source(file, diagnostics)
        .map(|text| parse_value_objects(&tokenize(&text)).into_iter().collect())
        .unwrap_or_default()
}

fn source_files(dir: &Path, suffix: &str, diagnostics: &mut Vec<Diagnostic>) -> Vec<PathBuf> {
    if !dir.is_dir() {
        tracing::warn!("Directory not found: {}", dir.display());
        diagnostics.push(Diagnostic::missing_directory(dir));
        return Vec::new();
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        match entry {
            Ok(entry) => {
                let matches = entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| name.ends_with(suffix));
                if entry.file_type().is_file() && matches {
                    files.push(entry.into_path());
                }
            }
            Err(err) => {
                let path = err.path().unwrap_or(dir).to_path_buf();
                let err = std::io::Error::from(err);
                tracing::warn!("Failed to list {}: {err}", path.display());
                diagnostics.push(Diagnostic::unreadable_file(&path, &err));
            }
        }
    }
    files
}

fn read_source(path: &Path, diagnostics: &mut Vec<Diagnostic>) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(err) => {
            tracing::warn!("Error reading {}: {err}", path.display());
            diagnostics.push(Diagnostic::unreadable_file(path, &err));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apigen_core::DiagnosticKind;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_directory_is_a_warning() {
        let temp = TempDir::new().unwrap();
        let mut diagnostics = Vec::new();
        let classes = scan_classes(&temp.path().join("Request"), &mut diagnostics);
        assert!(classes.is_empty());
        assert_eq!(diagnostics[0].kind, DiagnosticKind::MissingDirectory);
        assert!(diagnostics[0].is_warning());
    }

    #[test]
    fn test_scan_is_flat_and_sorted() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("B.cs"), "public class B { }").unwrap();
        fs::write(temp.path().join("A.cs"), "public class A { }").unwrap();
        fs::write(temp.path().join("notes.txt"), "public class Txt { }").unwrap();
        fs::create_dir(temp.path().join("Request")).unwrap();
        fs::write(temp.path().join("Request/C.cs"), "public class C { }").unwrap();

        let mut diagnostics = Vec::new();
        let classes = scan_classes(temp.path(), &mut diagnostics);
        let names: Vec<_> = classes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unmatched_file_is_informational() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Enums.cs"), "public enum Role { Admin }").unwrap();

        let mut diagnostics = Vec::new();
        assert!(scan_classes(temp.path(), &mut diagnostics).is_empty());
        assert_eq!(diagnostics[0].kind, DiagnosticKind::UnparsableFile);
        assert!(!diagnostics[0].is_warning());
    }

    #[test]
    fn test_controller_suffix_filter() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("TagsController.cs"),
            "public class TagsController { }",
        )
        .unwrap();
        fs::write(temp.path().join("Filters.cs"), "public class AuthFilter { }").unwrap();

        let mut diagnostics = Vec::new();
        let controllers = scan_controllers(temp.path(), &mut diagnostics);
        assert_eq!(controllers.len(), 1);
        assert_eq!(controllers[0].controller_name, "tags");
    }

    #[test]
    fn test_missing_value_object_file() {
        let temp = TempDir::new().unwrap();
        let mut diagnostics = Vec::new();
        let registry = load_value_objects(&temp.path().join("EntityKeyObject.cs"), &mut diagnostics);
        assert!(registry.is_empty());
        assert_eq!(diagnostics[0].kind, DiagnosticKind::MissingDirectory);
    }
}
