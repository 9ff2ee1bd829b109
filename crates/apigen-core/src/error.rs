//! Error types for apigen.
//!
//! Only fatal conditions are represented here. Recoverable per-file and
//! per-method problems are reported as [`Diagnostic`](crate::Diagnostic)
//! values instead, so a single bad source file never aborts a run.
//!
//! # Examples
//!
//! ```
//! use apigen_core::{Error, Result};
//!
//! fn check_output_name(name: &str) -> Result<()> {
//!     if name.is_empty() {
//!         return Err(Error::ConfigError {
//!             message: "output file name cannot be empty".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = check_output_name("").unwrap_err();
//! assert!(err.is_config_error());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for apigen.
///
/// All fallible library operations use this type, providing consistent
/// error handling across the workspace crates.
#[derive(Error, Debug)]
pub enum Error {
    /// Filesystem operation failed.
    ///
    /// Raised when a configuration file cannot be read or a generated
    /// artifact cannot be written.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path the operation was working on
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    ///
    /// Raised when a configuration file is malformed or contains
    /// contradictory settings.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Template registration or rendering failed.
    #[error("Template error in '{template}': {message}")]
    TemplateError {
        /// Name of the template involved
        template: String,
        /// Description of the failure
        message: String,
    },

    /// Invalid argument error.
    ///
    /// Raised when CLI arguments or function parameters are invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Creates an I/O error bound to a path.
    ///
    /// # Examples
    ///
    /// ```
    /// use apigen_core::Error;
    ///
    /// let err = Error::io("out/types.ts", std::io::Error::other("disk full"));
    /// assert!(err.is_io_error());
    /// assert!(err.to_string().contains("out/types.ts"));
    /// ```
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if this is an I/O error.
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Returns `true` if this is a configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use apigen_core::Error;
    ///
    /// let err = Error::ConfigError {
    ///     message: "unknown key".to_string(),
    /// };
    /// assert!(err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` if this is a template error.
    #[must_use]
    pub const fn is_template_error(&self) -> bool {
        matches!(self, Self::TemplateError { .. })
    }

    /// Returns `true` if this is an invalid argument error.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

/// Result type alias for apigen operations.
///
/// # Examples
///
/// ```
/// use apigen_core::{Result, Error};
///
/// fn parse_port(value: &str) -> Result<u16> {
///     value
///         .parse()
///         .map_err(|_| Error::InvalidArgument(format!("not a port: {value}")))
/// }
///
/// assert!(parse_port("8080").is_ok());
/// assert!(parse_port("http").is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;
