//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Aegis -- supply-chain security scanner.
///
/// Use `aegis <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "aegis", version, about, long_about = None)]
pub struct Cli {
    /// Path to the aegis.toml configuration file.
    #[arg(short, long, default_value = "aegis.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table / text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full scan pipeline (SBOM + code analysis + risk score).
    Scan(ScanArgs),

    /// Generate a software bill of materials only.
    Sbom(SbomArgs),

    /// Inspect the built-in detection rules.
    Rules(RulesArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- scan ----

/// Run a one-shot scan on a project directory.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Path to scan (default: current directory).
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Smoke-test mode: skip the filesystem and emit one fixed finding.
    #[arg(long)]
    pub sample: bool,

    /// Pull request number recorded in the report.
    #[arg(long, default_value_t = 0)]
    pub pr: u64,

    /// Commit SHA recorded in the report.
    #[arg(long, default_value = "local")]
    pub commit: String,
}

// ---- sbom ----

/// Generate an SBOM from the manifests in a directory tree.
#[derive(Args, Debug)]
pub struct SbomArgs {
    /// Path to scan (default: current directory).
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

// ---- rules ----

/// Inspect detection rules.
#[derive(Args, Debug)]
pub struct RulesArgs {
    #[command(subcommand)]
    pub action: RulesAction,
}

#[derive(Subcommand, Debug)]
pub enum RulesAction {
    /// List the built-in detection rules.
    List {
        /// Filter by language (python, javascript).
        #[arg(long)]
        language: Option<String>,
    },
}

// ---- config ----

/// Manage aegis configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, sbom, analyzer, risk, fetch, notify).
        #[arg(long)]
        section: Option<String>,
    },
}
