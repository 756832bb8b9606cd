//! CLI subcommand implementations.

pub mod analyze;
pub mod catalog;
pub mod windows;
