//! Gatekeeper CLI library crate.
//!
//! # Purpose
//! Exposes the command-line parser, command execution, and tracing setup so
//! the binary stays a thin wrapper and commands are testable in-process.
pub mod cli;
pub mod commands;
pub mod observability;

pub use cli::{Cli, Command};
pub use commands::{load_config, run};
