//! Typed, non-fatal diagnostics.
//!
//! Every recoverable problem a run meets becomes a [`Diagnostic`] in the
//! report instead of console text.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// An input root or the value-object file does not exist.
    MissingDirectory,
    /// A file could not be read or yielded nothing usable.
    UnparsableFile,
    /// A route placeholder fell through to the literal-name guess.
    AmbiguousPathParam,
    /// An action has no determinable response type and was skipped.
    UnresolvedResponseType,
    /// Actions in different controllers produce the same hook export.
    DuplicateHookName,
    /// Nothing at all was extracted; the run aborted.
    NothingExtracted,
}

impl DiagnosticKind {
    /// Stable identifier used in text output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissingDirectory => "missing-directory",
            Self::UnparsableFile => "unparsable-file",
            Self::AmbiguousPathParam => "ambiguous-path-param",
            Self::UnresolvedResponseType => "unresolved-response-type",
            Self::DuplicateHookName => "duplicate-hook-name",
            Self::NothingExtracted => "nothing-extracted",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Detail only shown in verbose output.
    Info,
    /// Something the user should look at.
    Warning,
    /// The run was aborted.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// A single diagnostic.
///
/// # Examples
///
/// ```
/// use apigen_core::{Diagnostic, DiagnosticKind, Severity};
///
/// let diag = Diagnostic::missing_directory("backend/Controller");
/// assert_eq!(diag.kind, DiagnosticKind::MissingDirectory);
/// assert_eq!(diag.severity, Severity::Warning);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Category
    pub kind: DiagnosticKind,
    /// Severity
    pub severity: Severity,
    /// File or directory involved, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Human-readable description
    pub message: String,
}

impl Diagnostic {
    /// An input root or file is absent.
    #[must_use]
    pub fn missing_directory(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            kind: DiagnosticKind::MissingDirectory,
            severity: Severity::Warning,
            message: format!("{} does not exist", path.display()),
            path: Some(path),
        }
    }

    /// A file could not be read.
    #[must_use]
    pub fn unreadable_file(path: &Path, error: &std::io::Error) -> Self {
        Self {
            kind: DiagnosticKind::UnparsableFile,
            severity: Severity::Warning,
            path: Some(path.to_path_buf()),
            message: format!("could not read file: {error}"),
        }
    }

    /// A file was read but did not match the expected shape.
    #[must_use]
    pub fn unmatched_file(path: &Path, expected: &str) -> Self {
        Self {
            kind: DiagnosticKind::UnparsableFile,
            severity: Severity::Info,
            path: Some(path.to_path_buf()),
            message: format!("no {expected} found"),
        }
    }

    /// A placeholder binding is an unverified guess.
    #[must_use]
    pub fn ambiguous_path_param(source: &Path, operation: &str, placeholder: &str) -> Self {
        Self {
            kind: DiagnosticKind::AmbiguousPathParam,
            severity: Severity::Warning,
            path: Some(source.to_path_buf()),
            message: format!(
                "{operation}: no request field matches placeholder '{{{placeholder}}}', using '{placeholder}'"
            ),
        }
    }

    /// An action was skipped because no response type could be found.
    #[must_use]
    pub fn unresolved_response_type(source: &Path, operation: &str) -> Self {
        Self {
            kind: DiagnosticKind::UnresolvedResponseType,
            severity: Severity::Warning,
            path: Some(source.to_path_buf()),
            message: format!("{operation}: no response type found"),
        }
    }

    /// Several controllers export a hook of the same name.
    #[must_use]
    pub fn duplicate_hook_name(hook: &str, controllers: &[&str]) -> Self {
        Self {
            kind: DiagnosticKind::DuplicateHookName,
            severity: Severity::Warning,
            path: None,
            message: format!(
                "{hook} is exported more than once (controllers: {}); rename one of the actions",
                controllers.join(", ")
            ),
        }
    }

    /// Nothing was extracted from any input.
    #[must_use]
    pub fn nothing_extracted(backend_root: &Path) -> Self {
        Self {
            kind: DiagnosticKind::NothingExtracted,
            severity: Severity::Error,
            path: Some(backend_root.to_path_buf()),
            message: "no classes or endpoints found; existing output left untouched".to_string(),
        }
    }

    /// The backend root itself is absent.
    #[must_use]
    pub fn backend_root_missing(backend_root: &Path) -> Self {
        Self {
            kind: DiagnosticKind::MissingDirectory,
            severity: Severity::Error,
            path: Some(backend_root.to_path_buf()),
            message: format!(
                "backend root {} does not exist; nothing was generated",
                backend_root.display()
            ),
        }
    }

    /// Returns `true` for warning or error severity.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        self.severity >= Severity::Warning
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.severity, self.kind)?;
        if let Some(path) = &self.path {
            write!(f, " {}", path.display())?;
        }
        write!(f, ": {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_hook_name_without_path() {
        let diag = Diagnostic::duplicate_hook_name("useGetAll", &["articles", "tags"]);
        assert!(diag.is_warning());
        assert_eq!(
            diag.to_string(),
            "warning [duplicate-hook-name]: useGetAll is exported more than once (controllers: articles, tags); rename one of the actions"
        );
    }

    #[test]
    fn test_display_includes_path() {
        let diag = Diagnostic::unresolved_response_type(Path::new("AuthController.cs"), "Refresh");
        let text = diag.to_string();
        assert!(text.starts_with("warning [unresolved-response-type]"));
        assert!(text.contains("AuthController.cs"));
        assert!(text.ends_with("Refresh: no response type found"));
    }

    #[test]
    fn test_ambiguous_message_names_placeholder() {
        let diag = Diagnostic::ambiguous_path_param(Path::new("x.cs"), "GetTag", "slug");
        assert!(diag.message.contains("{slug}"));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Diagnostic::nothing_extracted(Path::new("b")).is_warning());
        assert!(!Diagnostic::unmatched_file(Path::new("b.cs"), "class").is_warning());
    }

    #[test]
    fn test_serializes_kind_snake_case() {
        let diag = Diagnostic::missing_directory("Src/Controller");
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["kind"], "missing_directory");
        assert_eq!(json["severity"], "warning");
    }
}
