//! apigen CLI library.
//!
//! The binary is a thin wrapper over [`commands::generate`]; keeping the
//! command and the report formatters in a library makes both testable
//! without spawning a process.

pub mod commands;
pub mod formatters;
