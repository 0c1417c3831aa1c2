#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`cli`]: clap argument definitions
//! - [`commands`]: one handler per subcommand
//! - [`error`]: CLI error type and exit-code mapping
//! - [`logging`]: tracing subscriber setup
//! - [`output`]: text/JSON rendering behind [`output::OutputWriter`]

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;
