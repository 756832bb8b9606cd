//! Replay statistics CLI library.
//!
//! This crate provides the CLI interface for the replay statistics engine.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::{Config, dirs_config_path};
