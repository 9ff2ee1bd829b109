//! TypeScript client generation for apigen.
//!
//! Renders the extracted model into four artifacts using Handlebars
//! templates:
//!
//! - **types**: one interface per data class
//! - **endpoints**: one `{controller}Api` object of typed HTTP calls
//! - **hooks**: react-query `useQuery`/`useMutation` bindings
//! - **server**: `fetch`-based wrappers for `GET` endpoints, server only
//!
//! [`GenerationPipeline`] drives a whole run from a
//! [`GeneratorConfig`](apigen_core::GeneratorConfig) and returns a
//! [`GenerationReport`](apigen_core::GenerationReport).
//!
//! # Examples
//!
//! ```no_run
//! use apigen_codegen::GenerationPipeline;
//! use apigen_core::GeneratorConfig;
//!
//! # fn example() -> apigen_core::Result<()> {
//! let report = GenerationPipeline::new(GeneratorConfig::default()).run()?;
//! for artifact in &report.artifacts {
//!     println!("{} -> {}", artifact.kind, artifact.path.display());
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod common;
pub mod context;
pub mod generator;
pub mod output;
pub mod path_params;
pub mod pipeline;
pub mod plan;
pub mod template_engine;

pub use common::{GeneratedCode, GeneratedFile};
pub use generator::{ApiGenerator, Generation, GenerationInput};
pub use path_params::{PathBinding, PathParamResolver};
pub use pipeline::{GenerationPipeline, RunOptions};
pub use template_engine::TemplateEngine;
