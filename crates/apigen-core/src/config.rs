//! Generator configuration.
//!
//! Input and output locations are passed into the pipeline at construction
//! time. Defaults reproduce the layout of the Nari Note monorepo, so running
//! the generator from the repository root needs no configuration at all.
//!
//! # Examples
//!
//! ```
//! use apigen_core::GeneratorConfig;
//! use std::path::Path;
//!
//! let config = GeneratorConfig::default();
//! assert_eq!(config.backend_root, Path::new("nari-note-backend/Src"));
//! assert_eq!(config.api_client_module, "./client");
//!
//! let custom = GeneratorConfig::from_toml_str(
//!     r#"
//!     backend_root = "backend"
//!
//!     [outputs]
//!     hooks = "queries.ts"
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(custom.outputs.hooks, "queries.ts");
//! assert_eq!(custom.outputs.types, "types.ts");
//! ```

use crate::report::ArtifactKind;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Root of the backend source tree.
    ///
    /// Every entry of [`SourceLayout`] is resolved against it.
    /// Default: `nari-note-backend/Src`
    pub backend_root: PathBuf,

    /// Directory receiving the generated artifacts.
    ///
    /// Created on first write if missing.
    /// Default: `nari-note-frontend/src/lib/api`
    pub output_dir: PathBuf,

    /// Input roots relative to the backend root.
    pub sources: SourceLayout,

    /// Artifact file names inside the output directory.
    pub outputs: OutputLayout,

    /// Import path of the HTTP client module used by emitted calls.
    ///
    /// Default: `./client`
    pub api_client_module: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            backend_root: PathBuf::from("nari-note-backend/Src"),
            output_dir: PathBuf::from("nari-note-frontend/src/lib/api"),
            sources: SourceLayout::default(),
            outputs: OutputLayout::default(),
            api_client_module: "./client".to_string(),
        }
    }
}

/// Source roots, relative to [`GeneratorConfig::backend_root`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceLayout {
    /// Directory of `*Controller.cs` files
    pub controllers: PathBuf,
    /// Directory of request DTO classes
    pub requests: PathBuf,
    /// Directory of response DTO classes
    pub responses: PathBuf,
    /// Directory of shared DTO classes
    pub dtos: PathBuf,
    /// File declaring the identifier value objects
    pub value_objects: PathBuf,
}

impl Default for SourceLayout {
    fn default() -> Self {
        Self {
            controllers: PathBuf::from("Controller"),
            requests: PathBuf::from("Application/Dto/Request"),
            responses: PathBuf::from("Application/Dto/Response"),
            dtos: PathBuf::from("Application/Dto"),
            value_objects: PathBuf::from("Domain/ValueObject/EntityKeyObject.cs"),
        }
    }
}

/// Artifact file names, relative to [`GeneratorConfig::output_dir`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputLayout {
    /// Interface declarations
    pub types: String,
    /// Endpoint-call functions
    pub endpoints: String,
    /// Query and mutation hooks
    pub hooks: String,
    /// Server-only fetch wrappers
    pub server: String,
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self {
            types: "types.ts".to_string(),
            endpoints: "endpoints.ts".to_string(),
            hooks: "hooks.ts".to_string(),
            server: "server.ts".to_string(),
        }
    }
}

impl OutputLayout {
    /// Returns the configured file name of an artifact.
    #[must_use]
    pub fn file_name(&self, kind: ArtifactKind) -> &str {
        match kind {
            ArtifactKind::Types => &self.types,
            ArtifactKind::Endpoints => &self.endpoints,
            ArtifactKind::Hooks => &self.hooks,
            ArtifactKind::Server => &self.server,
        }
    }

    /// Relative import specifier of an artifact, as used by its siblings.
    ///
    /// # Examples
    ///
    /// ```
    /// use apigen_core::{ArtifactKind, OutputLayout};
    ///
    /// let layout = OutputLayout::default();
    /// assert_eq!(layout.module_specifier(ArtifactKind::Types), "./types");
    /// ```
    #[must_use]
    pub fn module_specifier(&self, kind: ArtifactKind) -> String {
        let name = self.file_name(kind);
        let stem = [".d.ts", ".tsx", ".ts"]
            .iter()
            .find_map(|ext| name.strip_suffix(ext))
            .unwrap_or(name);
        format!("./{stem}")
    }
}

impl GeneratorConfig {
    /// Loads a configuration file.
    ///
    /// Keys missing from the file keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::ConfigError`] if it is not valid TOML, names unknown keys,
    /// or fails [`validate`](Self::validate).
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        tracing::debug!("Loading configuration from {}", path.display());
        Self::from_toml_str(&text).map_err(|e| match e {
            Error::ConfigError { message } => Error::ConfigError {
                message: format!("{}: {message}", path.display()),
            },
            other => other,
        })
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] on malformed TOML or invalid values.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| Error::ConfigError {
            message: e.message().to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if an artifact file name is empty or
    /// contains a path separator, if two artifacts share a file name, or if
    /// the client module path is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use apigen_core::GeneratorConfig;
    ///
    /// let mut config = GeneratorConfig::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.outputs.server = config.outputs.types.clone();
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        let mut seen: Vec<&str> = Vec::with_capacity(ArtifactKind::ALL.len());
        for kind in ArtifactKind::ALL {
            let name = self.outputs.file_name(kind);
            if name.trim().is_empty() {
                return Err(Error::ConfigError {
                    message: format!("output file name for {kind} cannot be empty"),
                });
            }
            if name.contains(['/', '\\']) {
                return Err(Error::ConfigError {
                    message: format!("output file name '{name}' must not contain a path separator"),
                });
            }
            if seen.contains(&name) {
                return Err(Error::ConfigError {
                    message: format!("output file name '{name}' is used by more than one artifact"),
                });
            }
            seen.push(name);
        }

        if self.api_client_module.trim().is_empty() {
            return Err(Error::ConfigError {
                message: "api_client_module cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Absolute (or working-directory relative) controller root.
    #[must_use]
    pub fn controllers_dir(&self) -> PathBuf {
        self.backend_root.join(&self.sources.controllers)
    }

    /// Class roots in scan order: requests, responses, shared DTOs.
    #[must_use]
    pub fn class_dirs(&self) -> [PathBuf; 3] {
        [
            self.backend_root.join(&self.sources.requests),
            self.backend_root.join(&self.sources.responses),
            self.backend_root.join(&self.sources.dtos),
        ]
    }

    /// Path of the value-object definitions file.
    #[must_use]
    pub fn value_objects_file(&self) -> PathBuf {
        self.backend_root.join(&self.sources.value_objects)
    }

    /// Destination path of an artifact.
    #[must_use]
    pub fn artifact_path(&self, kind: ArtifactKind) -> PathBuf {
        self.output_dir.join(self.outputs.file_name(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_layout() {
        let config = GeneratorConfig::default();
        assert_eq!(
            config.controllers_dir(),
            Path::new("nari-note-backend/Src/Controller")
        );
        assert_eq!(
            config.value_objects_file(),
            Path::new("nari-note-backend/Src/Domain/ValueObject/EntityKeyObject.cs")
        );
        assert_eq!(
            config.artifact_path(ArtifactKind::Server),
            Path::new("nari-note-frontend/src/lib/api/server.ts")
        );
    }

    #[test]
    fn test_module_specifier_drops_extension() {
        let layout = OutputLayout {
            hooks: "queries.tsx".to_string(),
            server: "server-api".to_string(),
            ..OutputLayout::default()
        };
        assert_eq!(layout.module_specifier(ArtifactKind::Endpoints), "./endpoints");
        assert_eq!(layout.module_specifier(ArtifactKind::Hooks), "./queries");
        assert_eq!(layout.module_specifier(ArtifactKind::Server), "./server-api");
    }

    #[test]
    fn test_class_dirs_order() {
        let config = GeneratorConfig::default();
        let dirs = config.class_dirs();
        assert!(dirs[0].ends_with("Application/Dto/Request"));
        assert!(dirs[1].ends_with("Application/Dto/Response"));
        assert!(dirs[2].ends_with("Application/Dto"));
    }

    #[test]
    fn test_partial_override() {
        let config = GeneratorConfig::from_toml_str(
            r#"
            output_dir = "web/api"

            [sources]
            controllers = "Api/Controllers"
            "#,
        )
        .unwrap();
        assert_eq!(config.output_dir, Path::new("web/api"));
        assert_eq!(config.sources.controllers, Path::new("Api/Controllers"));
        assert_eq!(config.sources.requests, Path::new("Application/Dto/Request"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = GeneratorConfig::from_toml_str("frontend = \"x\"").unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_separator_in_file_name_rejected() {
        let mut config = GeneratorConfig::default();
        config.outputs.hooks = "nested/hooks.ts".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_client_module_rejected() {
        let mut config = GeneratorConfig::default();
        config.api_client_module = " ".to_string();
        assert!(config.validate().unwrap_err().is_config_error());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_client_module = \"@/lib/http\"").unwrap();

        let config = GeneratorConfig::load(file.path()).unwrap();
        assert_eq!(config.api_client_module, "@/lib/http");
    }

    #[test]
    fn test_load_missing_file() {
        let err = GeneratorConfig::load(Path::new("/nonexistent/apigen.toml")).unwrap_err();
        assert!(err.is_io_error());
    }
}
