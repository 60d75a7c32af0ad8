//! Spanbench CLI library
//!
//! This library provides the command-line interface for the spanbench
//! span-labeling benchmark utilities.

pub mod commands;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
