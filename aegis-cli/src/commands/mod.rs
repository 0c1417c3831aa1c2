//! Command handlers -- one module per subcommand

use std::path::Path;

use tracing::debug;

use aegis_core::config::AegisConfig;
use aegis_core::error::{AegisError, ConfigError};

use crate::error::CliError;

pub mod config;
pub mod rules;
pub mod sbom;
pub mod scan;

/// Load the configuration, falling back to defaults when the file is absent.
///
/// Commands other than `config validate` should work without an aegis.toml;
/// env overrides still apply in that case.
pub async fn load_config(path: &Path) -> Result<AegisConfig, CliError> {
    match AegisConfig::load(path).await {
        Ok(config) => Ok(config),
        Err(AegisError::Config(ConfigError::FileNotFound { .. })) => {
            debug!(path = %path.display(), "config file not found, using defaults");
            let mut config = AegisConfig::default();
            config.apply_env_overrides();
            config
                .validate()
                .map_err(|e| CliError::Config(e.to_string()))?;
            Ok(config)
        }
        Err(e) => Err(CliError::Config(e.to_string())),
    }
}
