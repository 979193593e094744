//! Legalytics CLI library.
//!
//! This library provides the core functionality for the `legalytics`
//! command-line tool: configuration loading, input discovery, and the
//! `extract`, `parse` and `prompt` commands.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod input;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
