//! apigen: TypeScript API client generator.
//!
//! Reads ASP.NET Core controllers and DTO classes from a backend source tree
//! and writes the frontend's typed API layer: interfaces, endpoint calls,
//! react-query hooks, and server-only fetch wrappers.
//!
//! # Examples
//!
//! ```bash
//! # Run from the monorepo root with the default layout
//! apigen
//!
//! # Custom locations, machine-readable report
//! apigen --backend-root ../api/Src --output-dir web/src/lib/api --format json
//!
//! # See what would be written
//! apigen --dry-run --verbose
//! ```

use anyhow::Result;
use apigen_cli::commands::generate::{self, GenerateArgs};
use apigen_core::cli::OutputFormat;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Generate a typed TypeScript API client from ASP.NET Core sources.
#[derive(Parser, Debug)]
#[command(name = "apigen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress the notice about overwriting existing artifacts
    #[arg(short, long)]
    force: bool,

    /// Enable debug logging and list every skip and diagnostic
    #[arg(short, long)]
    verbose: bool,

    /// TOML configuration file
    #[arg(long, value_name = "FILE", env = "APIGEN_CONFIG")]
    config: Option<PathBuf>,

    /// Backend source root (overrides the configuration)
    #[arg(long, value_name = "DIR")]
    backend_root: Option<PathBuf>,

    /// Output directory for generated artifacts (overrides the configuration)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Run every phase but write nothing
    #[arg(long)]
    dry_run: bool,

    /// Report format (json, text, pretty)
    #[arg(long = "format", default_value = "pretty")]
    format: String,
}

impl Cli {
    fn generate_args(&self) -> GenerateArgs {
        GenerateArgs {
            config: self.config.clone(),
            backend_root: self.backend_root.clone(),
            output_dir: self.output_dir.clone(),
            force: self.force,
            dry_run: self.dry_run,
            verbose: self.verbose,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let output_format = cli
        .format
        .parse::<OutputFormat>()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let exit_code = generate::run(&cli.generate_args(), output_format)?;

    std::process::exit(exit_code.as_i32());
}

/// Installs the stderr log subscriber.
///
/// `--verbose` forces `debug`; otherwise `RUST_LOG` applies, defaulting to
/// `info`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_no_arguments() {
        let cli = Cli::parse_from(["apigen"]);
        assert!(!cli.force);
        assert!(!cli.verbose);
        assert!(!cli.dry_run);
        assert_eq!(cli.backend_root, None);
        assert_eq!(cli.format, "pretty");
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["apigen", "-f", "-v"]);
        assert!(cli.force);
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_paths() {
        let cli = Cli::parse_from([
            "apigen",
            "--config",
            "apigen.toml",
            "--backend-root",
            "api/Src",
            "--output-dir",
            "web/src/lib/api",
            "--dry-run",
        ]);
        let args = cli.generate_args();
        assert_eq!(args.config, Some(PathBuf::from("apigen.toml")));
        assert_eq!(args.backend_root, Some(PathBuf::from("api/Src")));
        assert_eq!(args.output_dir, Some(PathBuf::from("web/src/lib/api")));
        assert!(args.dry_run);
    }

    #[test]
    fn test_cli_output_format() {
        let cli = Cli::parse_from(["apigen", "--format", "json"]);
        assert_eq!(cli.format.parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    }

    #[test]
    fn test_cli_rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["apigen", "generate"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
