//! Command implementations for the apigen CLI.

pub mod generate;
