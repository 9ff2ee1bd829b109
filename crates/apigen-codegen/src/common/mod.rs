//! Helpers shared by every emitter.

pub mod types;
pub mod typescript;

pub use types::{GeneratedCode, GeneratedFile};
