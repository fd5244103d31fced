//! Study tracker CLI library.
//!
//! This crate provides the interactive shell for the study tracker.

mod cli;
pub mod commands;
mod config;
pub mod shell;

pub use cli::{Cli, Commands, ShellCommand, ShellLine};
pub use config::{Config, QuickStart};
