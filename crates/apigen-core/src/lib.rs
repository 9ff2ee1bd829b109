//! Core types, configuration, and errors for apigen.
//!
//! apigen reads C# data classes and ASP.NET controller actions and emits a
//! matching TypeScript client: interfaces, endpoint calls, react-query hooks,
//! and server-only fetch wrappers.
//!
//! # Architecture
//!
//! This crate holds what every stage shares:
//! - Error type for fatal failures
//! - Typed non-fatal [`Diagnostic`]s and the [`GenerationReport`]
//! - The normalized source model ([`SourceClass`], [`EndpointDescriptor`], ...)
//! - [`TypeExpr`], the parsed form of a declared type
//! - [`GeneratorConfig`]

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod diagnostics;
mod error;
mod model;
mod registry;
mod report;
mod types;

pub mod cli;
pub mod route;
pub mod type_expr;

pub use config::{GeneratorConfig, OutputLayout, SourceLayout};
pub use diagnostics::{Diagnostic, DiagnosticKind, Severity};
pub use error::{Error, Result};
pub use model::{
    ActionParameter, ClassIndex, EndpointDescriptor, SkippedOperation, SourceClass,
    SourceProperty, VOID,
};
pub use registry::ValueObjectRegistry;
pub use report::{AbortReason, ArtifactKind, ArtifactReport, GenerationReport, RunStatus};
pub use route::RoutePlaceholder;
pub use type_expr::{CollectionShape, TypeExpr};
pub use types::HttpMethod;
