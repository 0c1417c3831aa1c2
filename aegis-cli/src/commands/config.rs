//! `aegis config` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use aegis_core::config::AegisConfig;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `config` command.
pub async fn execute(
    args: ConfigArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(config_path, writer).await,
        ConfigAction::Show { section } => execute_show(config_path, section, writer).await,
    }
}

/// Execute the config validate subcommand.
///
/// Attempts to load and validate the configuration file, reporting any
/// errors. Unlike other commands, a missing file is an error here; the
/// point of `validate` is to check the file that exists.
///
/// # Errors
///
/// Returns `CliError::Config` if validation fails (missing file, invalid
/// values, parse errors).
async fn execute_validate(config_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    info!(path = %config_path.display(), "validating configuration");

    let result = AegisConfig::load(config_path).await;

    let report = match result {
        Ok(_) => ConfigValidationOutput {
            source: config_path.display().to_string(),
            valid: true,
            errors: Vec::new(),
        },
        Err(e) => ConfigValidationOutput {
            source: config_path.display().to_string(),
            valid: false,
            errors: vec![e.to_string()],
        },
    };

    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Config("configuration is invalid".to_owned()));
    }

    Ok(())
}

/// Execute the config show subcommand.
///
/// Loads and displays the effective configuration (file + env overrides +
/// defaults). A missing file falls back to defaults.
///
/// # Errors
///
/// Returns `CliError::Config` if loading fails or `CliError::Command` if
/// the section name is invalid.
async fn execute_show(
    config_path: &Path,
    section: Option<String>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    info!(path = %config_path.display(), "loading configuration");

    let config = super::load_config(config_path).await?;

    let report = if let Some(section_name) = section {
        let config_toml = match section_name.as_str() {
            "general" => section_toml(&config.general),
            "sbom" => section_toml(&config.sbom),
            "analyzer" => section_toml(&config.analyzer),
            "risk" => section_toml(&config.risk),
            "fetch" => section_toml(&config.fetch),
            "notify" => section_toml(&config.notify),
            _ => {
                return Err(CliError::Command(format!(
                    "unknown section: {} (expected: general, sbom, analyzer, risk, fetch, notify)",
                    section_name
                )));
            }
        };
        ConfigShowOutput {
            source: config_path.display().to_string(),
            section: Some(section_name),
            config_toml,
        }
    } else {
        ConfigShowOutput {
            source: config_path.display().to_string(),
            section: None,
            config_toml: section_toml(&config),
        }
    };

    writer.render(&report)?;

    Ok(())
}

fn section_toml<T: Serialize>(section: &T) -> String {
    toml::to_string_pretty(section).unwrap_or_else(|e| format!("(serialization error: {})", e))
}

#[derive(Serialize)]
pub struct ConfigValidationOutput {
    pub source: String,
    pub valid: bool,
    pub errors: Vec<String>,
}

impl Render for ConfigValidationOutput {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Config: {}", self.source)?;
        if self.valid {
            writeln!(w, "{}", "Configuration is valid.".green())?;
        } else {
            writeln!(w, "{}", "Configuration is invalid:".red().bold())?;
            for error in &self.errors {
                writeln!(w, "  - {}", error)?;
            }
        }
        Ok(())
    }
}

#[derive(Serialize)]
pub struct ConfigShowOutput {
    pub source: String,
    pub section: Option<String>,
    pub config_toml: String,
}

impl Render for ConfigShowOutput {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        match &self.section {
            Some(section) => writeln!(w, "Config: {} [{}]", self.source.bold(), section)?,
            None => writeln!(w, "Config: {}", self.source.bold())?,
        }
        writeln!(w)?;
        writeln!(w, "{}", self.config_toml)?;
        Ok(())
    }
}
