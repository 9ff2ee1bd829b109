//! Report formats and exit codes shared by the binary and its formatters.
//!
//! # Examples
//!
//! ```
//! use apigen_core::cli::{ExitCode, OutputFormat};
//! use apigen_core::RunStatus;
//!
//! let format: OutputFormat = "json".parse().unwrap();
//! assert!(format.is_machine_readable());
//!
//! // an aborted run still exits cleanly
//! assert!(ExitCode::for_status(RunStatus::Aborted).is_success());
//! ```

use crate::report::RunStatus;
use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// How the run report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// The serialized report
    Json,
    /// Summary without color, for logs and scripts
    Text,
    /// Colored summary
    #[default]
    Pretty,
}

impl OutputFormat {
    /// Every format, in the order listed by `--help`.
    pub const ALL: [Self; 3] = [Self::Json, Self::Text, Self::Pretty];

    /// Flag value of the format.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
            Self::Pretty => "pretty",
        }
    }

    /// Returns `true` for formats meant for other programs.
    #[must_use]
    pub const fn is_machine_readable(&self) -> bool {
        matches!(self, Self::Json)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let expected: Vec<_> = Self::ALL.iter().map(Self::as_str).collect();
                Error::InvalidArgument(format!(
                    "unknown report format '{s}' (expected one of: {})",
                    expected.join(", ")
                ))
            })
    }
}

/// Process exit code.
///
/// Only fatal errors fail the process. The protective abort exits with
/// [`ExitCode::SUCCESS`] so that a build script running the generator keeps
/// going with the previously generated client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Success, partial success, or abort (0).
    pub const SUCCESS: Self = Self(0);

    /// Fatal error (1).
    pub const ERROR: Self = Self(1);

    /// Exit code of a run that returned a report.
    #[must_use]
    pub const fn for_status(status: RunStatus) -> Self {
        match status {
            RunStatus::Success | RunStatus::Partial | RunStatus::Aborted => Self::SUCCESS,
        }
    }

    /// The raw code.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }

    /// Returns `true` for code 0.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 == 0
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse_ignores_case() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("Pretty".parse::<OutputFormat>().unwrap(), OutputFormat::Pretty);
    }

    #[test]
    fn test_format_parse_lists_choices() {
        let err = "yaml".parse::<OutputFormat>().unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("json, text, pretty"));
    }

    #[test]
    fn test_format_round_trips_through_display() {
        for format in OutputFormat::ALL {
            assert_eq!(format.to_string().parse::<OutputFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_every_status_exits_cleanly() {
        assert_eq!(ExitCode::default(), ExitCode::SUCCESS);
        assert!(ExitCode::for_status(RunStatus::Partial).is_success());
        assert!(ExitCode::for_status(RunStatus::Aborted).is_success());
        assert_eq!(i32::from(ExitCode::ERROR), 1);
    }
}
