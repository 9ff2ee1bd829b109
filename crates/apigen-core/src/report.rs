//! Structured outcome of a generation run.
//!
//! The pipeline returns a [`GenerationReport`]; presentation and exit
//! codes are the caller's concern.

use crate::{Diagnostic, SkippedOperation};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Overall run status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Every discovered action was emitted and nothing needs attention.
    Success,
    /// Artifacts were produced, but something was skipped or warned about.
    Partial,
    /// Nothing was written.
    Aborted,
}

impl RunStatus {
    /// Lower-case name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Partial => "partial",
            Self::Aborted => "aborted",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a run aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AbortReason {
    /// The configured backend root does not exist.
    BackendRootMissing,
    /// Zero classes and zero endpoints were extracted.
    NothingExtracted,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BackendRootMissing => "backend root not found",
            Self::NothingExtracted => "no classes or endpoints found",
        })
    }
}

/// The four generated artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Interface declarations
    Types,
    /// Endpoint-call functions
    Endpoints,
    /// Query and mutation hooks
    Hooks,
    /// Server-only fetch wrappers
    Server,
}

impl ArtifactKind {
    /// All kinds in emission order.
    pub const ALL: [Self; 4] = [Self::Types, Self::Endpoints, Self::Hooks, Self::Server];

    /// Lower-case name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Types => "types",
            Self::Endpoints => "endpoints",
            Self::Hooks => "hooks",
            Self::Server => "server",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rendered artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactReport {
    /// Artifact kind
    pub kind: ArtifactKind,
    /// Destination path
    pub path: PathBuf,
    /// Rendered size in bytes
    pub bytes: usize,
    /// A previous version existed at `path`
    pub replaced_existing: bool,
    /// Written to disk (false in dry-run mode)
    pub written: bool,
}

/// Counts, skips, diagnostics, and artifacts of one run.
///
/// # Examples
///
/// ```
/// use apigen_core::{AbortReason, GenerationReport, RunStatus};
///
/// let report = GenerationReport::aborted(AbortReason::NothingExtracted, Vec::new());
/// assert_eq!(report.status, RunStatus::Aborted);
/// assert!(report.artifacts.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Overall status
    pub status: RunStatus,
    /// Set when `status` is [`RunStatus::Aborted`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abort_reason: Option<AbortReason>,
    /// Classes extracted across all class roots
    pub class_count: usize,
    /// Classes whose name ends in `Request`
    pub request_type_count: usize,
    /// Classes whose name ends in `Response`
    pub response_type_count: usize,
    /// Registered identifier value objects
    pub value_object_count: usize,
    /// Emitted endpoint descriptors
    pub endpoint_count: usize,
    /// Controllers with at least one emitted endpoint, sorted
    pub controllers: Vec<String>,
    /// Actions that were discovered but not emitted
    pub skipped: Vec<SkippedOperation>,
    /// Non-fatal diagnostics in the order they were raised
    pub diagnostics: Vec<Diagnostic>,
    /// Rendered artifacts in emission order
    pub artifacts: Vec<ArtifactReport>,
    /// Nothing was written to disk on purpose
    pub dry_run: bool,
}

impl GenerationReport {
    /// An aborted run: no counts, no artifacts.
    #[must_use]
    pub fn aborted(reason: AbortReason, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            status: RunStatus::Aborted,
            abort_reason: Some(reason),
            class_count: 0,
            request_type_count: 0,
            response_type_count: 0,
            value_object_count: 0,
            endpoint_count: 0,
            controllers: Vec::new(),
            skipped: Vec::new(),
            diagnostics,
            artifacts: Vec::new(),
            dry_run: false,
        }
    }

    /// Derives [`RunStatus::Success`] or [`RunStatus::Partial`] from the
    /// skips and diagnostics collected so far. Aborted reports are left
    /// alone.
    pub fn settle(&mut self) {
        if self.status == RunStatus::Aborted {
            return;
        }
        self.status = if self.skipped.is_empty() && !self.diagnostics.iter().any(Diagnostic::is_warning)
        {
            RunStatus::Success
        } else {
            RunStatus::Partial
        };
    }

    /// Returns `true` if the run aborted.
    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        matches!(self.status, RunStatus::Aborted)
    }

    /// Diagnostics of warning severity or above.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_warning())
    }

    /// Artifact entry of a kind, if it was rendered.
    #[must_use]
    pub fn artifact(&self, kind: ArtifactKind) -> Option<&ArtifactReport> {
        self.artifacts.iter().find(|a| a.kind == kind)
    }
}
