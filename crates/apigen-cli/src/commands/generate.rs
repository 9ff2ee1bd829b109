//! Generate command implementation.
//!
//! Resolves the configuration (defaults, then the optional TOML file, then
//! path flags), runs one generation, and prints the report to stdout.

use crate::formatters::format_report;
use anyhow::{Context, Result};
use apigen_codegen::{GenerationPipeline, RunOptions};
use apigen_core::cli::{ExitCode, OutputFormat};
use apigen_core::{GenerationReport, GeneratorConfig};
use std::path::PathBuf;
use tracing::{debug, info};

/// Inputs of one `apigen` invocation.
#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
    /// TOML configuration file
    pub config: Option<PathBuf>,
    /// Overrides `backend_root`
    pub backend_root: Option<PathBuf>,
    /// Overrides `output_dir`
    pub output_dir: Option<PathBuf>,
    /// Suppress the overwrite notice
    pub force: bool,
    /// Render and report without writing
    pub dry_run: bool,
    /// List every skipped operation and diagnostic
    pub verbose: bool,
}

impl GenerateArgs {
    /// Builds the effective configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or parsed.
    pub fn resolve_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?,
            None => GeneratorConfig::default(),
        };
        if let Some(root) = &self.backend_root {
            config.backend_root.clone_from(root);
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir.clone_from(dir);
        }
        debug!(?config, "Resolved configuration");
        Ok(config)
    }

    const fn options(&self) -> RunOptions {
        RunOptions {
            force: self.force,
            dry_run: self.dry_run,
        }
    }
}

/// Runs one generation and returns its report.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, a template
/// fails to render, or an artifact cannot be written.
pub fn execute(args: &GenerateArgs) -> Result<GenerationReport> {
    let config = args.resolve_config()?;
    info!(
        "Generating from {} into {}",
        config.backend_root.display(),
        config.output_dir.display()
    );

    let report = GenerationPipeline::new(config)
        .with_options(args.options())
        .run()
        .context("Generation failed")?;
    Ok(report)
}

/// Runs the generate command and prints the report.
///
/// Success, partial success, and both abort conditions exit with
/// [`ExitCode::SUCCESS`].
///
/// # Errors
///
/// Returns an error if [`execute`] fails or the report cannot be
/// formatted.
///
/// # Examples
///
/// ```no_run
/// use apigen_cli::commands::generate::{self, GenerateArgs};
/// use apigen_core::cli::{ExitCode, OutputFormat};
///
/// let args = GenerateArgs {
///     dry_run: true,
///     ..GenerateArgs::default()
/// };
/// let code = generate::run(&args, OutputFormat::Text)?;
/// assert_eq!(code, ExitCode::SUCCESS);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn run(args: &GenerateArgs, format: OutputFormat) -> Result<ExitCode> {
    let report = execute(args)?;
    println!("{}", format_report(&report, format, args.verbose)?);
    Ok(ExitCode::for_status(report.status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_file() {
        let config = GenerateArgs::default().resolve_config().unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_flags_override_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("apigen.toml");
        fs::write(
            &path,
            "backend_root = \"from-file\"\noutput_dir = \"web/api\"\n",
        )
        .unwrap();

        let args = GenerateArgs {
            config: Some(path),
            backend_root: Some(PathBuf::from("from-flag")),
            ..GenerateArgs::default()
        };
        let config = args.resolve_config().unwrap();
        assert_eq!(config.backend_root, PathBuf::from("from-flag"));
        assert_eq!(config.output_dir, PathBuf::from("web/api"));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let args = GenerateArgs {
            config: Some(PathBuf::from("/nonexistent/apigen.toml")),
            ..GenerateArgs::default()
        };
        let err = args.resolve_config().unwrap_err();
        assert!(err.to_string().contains("Failed to load configuration"));
    }
}
