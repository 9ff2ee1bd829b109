//! Report formatters.
//!
//! All three formats render the same [`GenerationReport`]. `json` is the
//! serialized report; `text` and `pretty` share one layout, `pretty` adds
//! color.

use anyhow::Result;
use apigen_core::cli::OutputFormat;
use apigen_core::{GenerationReport, RunStatus, Severity};
use colored::{ColoredString, Colorize};
use serde::Serialize;

/// Formats a generation report.
///
/// Without `verbose` only warnings are listed and skipped operations are
/// counted; with it every skip and every diagnostic is listed.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Examples
///
/// ```
/// use apigen_cli::formatters::format_report;
/// use apigen_core::cli::OutputFormat;
/// use apigen_core::{AbortReason, GenerationReport};
///
/// let report = GenerationReport::aborted(AbortReason::NothingExtracted, Vec::new());
/// let text = format_report(&report, OutputFormat::Text, false)?;
/// assert!(text.starts_with("status: aborted (no classes or endpoints found)"));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_report(report: &GenerationReport, format: OutputFormat, verbose: bool) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(report),
        OutputFormat::Text => Ok(summary(report, verbose, &Plain)),
        OutputFormat::Pretty => Ok(summary(report, verbose, &Colored)),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Formats data as JSON with 2-space indentation.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}

trait Style {
    fn good(&self, text: &str) -> String;
    fn warn(&self, text: &str) -> String;
    fn bad(&self, text: &str) -> String;
    fn label(&self, text: &str) -> String;
    fn dim(&self, text: &str) -> String;
}

struct Plain;

impl Style for Plain {
    fn good(&self, text: &str) -> String {
        text.to_string()
    }
    fn warn(&self, text: &str) -> String {
        text.to_string()
    }
    fn bad(&self, text: &str) -> String {
        text.to_string()
    }
    fn label(&self, text: &str) -> String {
        text.to_string()
    }
    fn dim(&self, text: &str) -> String {
        text.to_string()
    }
}

struct Colored;

impl Colored {
    fn paint(text: &str, f: fn(ColoredString) -> ColoredString) -> String {
        f(text.normal()).to_string()
    }
}

impl Style for Colored {
    fn good(&self, text: &str) -> String {
        Self::paint(text, |s| s.green().bold())
    }
    fn warn(&self, text: &str) -> String {
        Self::paint(text, |s| s.yellow().bold())
    }
    fn bad(&self, text: &str) -> String {
        Self::paint(text, |s| s.red().bold())
    }
    fn label(&self, text: &str) -> String {
        Self::paint(text, |s| s.blue().bold())
    }
    fn dim(&self, text: &str) -> String {
        Self::paint(text, Colorize::dimmed)
    }
}

fn summary(report: &GenerationReport, verbose: bool, style: &dyn Style) -> String {
    let mut lines = Vec::new();

    let status = match report.status {
        RunStatus::Success => style.good(report.status.as_str()),
        RunStatus::Partial => style.warn(report.status.as_str()),
        RunStatus::Aborted => style.bad(report.status.as_str()),
    };
    let reason = report
        .abort_reason
        .map(|reason| format!(" ({reason})"))
        .unwrap_or_default();
    let dry_run = if report.dry_run { " [dry run]" } else { "" };
    lines.push(format!("{} {status}{reason}{dry_run}", style.label("status:")));

    if !report.is_aborted() {
        lines.push(format!(
            "{} {} ({} requests, {} responses), {} value objects",
            style.label("classes:"),
            report.class_count,
            report.request_type_count,
            report.response_type_count,
            report.value_object_count
        ));
        lines.push(format!(
            "{} {} in {} controllers: {}",
            style.label("endpoints:"),
            report.endpoint_count,
            report.controllers.len(),
            report.controllers.join(", ")
        ));

        lines.push(style.label("artifacts:"));
        for artifact in &report.artifacts {
            let mut notes = vec![format!("{} bytes", artifact.bytes)];
            if artifact.replaced_existing {
                notes.push("replaced".to_string());
            }
            if !artifact.written {
                notes.push("not written".to_string());
            }
            lines.push(format!(
                "  {:<10} {} {}",
                artifact.kind.as_str(),
                artifact.path.display(),
                style.dim(&format!("({})", notes.join(", ")))
            ));
        }
    }

    if !report.skipped.is_empty() {
        lines.push(format!(
            "{} {}",
            style.label("skipped:"),
            style.warn(&report.skipped.len().to_string())
        ));
        if verbose {
            for skipped in &report.skipped {
                lines.push(format!(
                    "  {}.{}: {}",
                    skipped.controller_name, skipped.operation_name, skipped.reason
                ));
            }
        }
    }

    let listed: Vec<_> = report
        .diagnostics
        .iter()
        .filter(|d| verbose || d.is_warning())
        .collect();
    if !listed.is_empty() {
        lines.push(style.label("diagnostics:"));
        for diagnostic in listed {
            let text = diagnostic.to_string();
            let painted = match diagnostic.severity {
                Severity::Error => style.bad(&text),
                Severity::Warning => style.warn(&text),
                Severity::Info => style.dim(&text),
            };
            lines.push(format!("  {painted}"));
        }
    }

    lines.join("\n")
}
