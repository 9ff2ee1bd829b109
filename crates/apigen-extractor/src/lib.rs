//! Source model extraction for apigen.
//!
//! Turns C# source text into the normalized model of `apigen-core`:
//!
//! 1. [`lexer`] tokenizes a file, dropping comments and keeping literals whole.
//! 2. [`grammar`] matches class headers, auto-properties, controller actions,
//!    and value-object declarations over the tokens.
//! 3. [`scanner`] walks the configured input roots and collects everything,
//!    recording per-file problems as diagnostics.
//! 4. [`descriptor`] infers request and response types for each action and
//!    yields an `EndpointDescriptor` or a `SkippedOperation`.
//!
//! # Examples
//!
//! ```no_run
//! use apigen_core::GeneratorConfig;
//! use apigen_extractor::{DescriptorBuilder, SourceScanner, TypeNames};
//!
//! let config = GeneratorConfig::default();
//! let extraction = SourceScanner::new(&config).scan();
//! let names = TypeNames::from_classes(&extraction.classes);
//! let built = DescriptorBuilder::new(&names).build(&extraction.controllers);
//! println!("{} endpoints, {} skipped", built.descriptors.len(), built.skipped.len());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod descriptor;
pub mod grammar;
pub mod lexer;
pub mod scanner;

pub use descriptor::{BuiltEndpoints, DescriptorBuilder, Resolution, TypeNames};
pub use grammar::endpoint::{ControllerSource, RawEndpoint};
pub use scanner::{Extraction, SourceScanner};
