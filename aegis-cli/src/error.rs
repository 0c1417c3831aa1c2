//! CLI-specific error types and exit code mapping

use aegis_core::error::{AegisError, AnalysisError, SbomError};

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to standard Unix exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// Scan finished with high risk (non-zero exit for CI gating).
    #[error("scan failed: {0}")]
    Scan(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from aegis-core.
    #[error("{0}")]
    Core(#[from] AegisError),

    /// SBOM generation domain error.
    #[error("sbom error: {0}")]
    Sbom(String),

    /// Code analysis domain error.
    #[error("analysis error: {0}")]
    Analysis(String),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                               |
    /// |------|---------------------------------------|
    /// | 0    | Success                               |
    /// | 1    | General / command error               |
    /// | 2    | Configuration error                   |
    /// | 4    | Scan finished with high risk          |
    /// | 10   | IO error                              |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Scan(_) => 4,
            Self::Io(_) => 10,
            Self::JsonSerialize(_) | Self::Command(_) | Self::Core(_) | Self::Sbom(_)
            | Self::Analysis(_) => 1,
        }
    }
}

impl From<SbomError> for CliError {
    fn from(e: SbomError) -> Self {
        Self::Sbom(e.to_string())
    }
}

impl From<AnalysisError> for CliError {
    fn from(e: AnalysisError) -> Self {
        Self::Analysis(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_config_error() {
        let err = CliError::Config("test error".to_owned());
        assert_eq!(err.exit_code(), 2, "config error should return exit code 2");
    }

    #[test]
    fn test_exit_code_scan_error() {
        let err = CliError::Scan("risk level high".to_owned());
        assert_eq!(err.exit_code(), 4, "scan error should return exit code 4");
    }

    #[test]
    fn test_exit_code_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = CliError::Io(io_err);
        assert_eq!(err.exit_code(), 10, "io error should return exit code 10");
    }

    #[test]
    fn test_exit_code_command_error() {
        let err = CliError::Command("test error".to_owned());
        assert_eq!(
            err.exit_code(),
            1,
            "command error should return exit code 1"
        );
    }

    #[test]
    fn test_exit_code_json_serialize_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid json")
            .expect_err("should fail parsing");
        let err = CliError::JsonSerialize(json_err);
        assert_eq!(
            err.exit_code(),
            1,
            "json serialize error should return exit code 1"
        );
    }

    #[test]
    fn test_exit_code_sbom_error() {
        let err = CliError::Sbom("bad manifest".to_owned());
        assert_eq!(err.exit_code(), 1, "sbom error should return exit code 1");
    }

    #[test]
    fn test_exit_code_analysis_error() {
        let err = CliError::Analysis("bad root".to_owned());
        assert_eq!(
            err.exit_code(),
            1,
            "analysis error should return exit code 1"
        );
    }

    #[test]
    fn test_error_display_config() {
        let err = CliError::Config("invalid TOML syntax".to_owned());
        let display_str = format!("{}", err);
        assert!(
            display_str.contains("configuration error"),
            "should include error context"
        );
        assert!(
            display_str.contains("invalid TOML syntax"),
            "should include error message"
        );
    }

    #[test]
    fn test_error_display_command() {
        let err = CliError::Command("execution failed".to_owned());
        let display_str = format!("{}", err);
        assert_eq!(display_str, "execution failed");
    }

    #[test]
    fn test_error_display_scan() {
        let err = CliError::Scan("risk level HIGH (score 8.5)".to_owned());
        let display_str = format!("{}", err);
        assert!(display_str.contains("scan failed"));
        assert!(display_str.contains("risk level HIGH"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let cli_err: CliError = io_err.into();
        match cli_err {
            CliError::Io(e) => {
                assert_eq!(e.kind(), std::io::ErrorKind::PermissionDenied);
            }
            _ => panic!("expected Io error variant"),
        }
    }

    #[test]
    fn test_from_core_error() {
        use aegis_core::error::ConfigError;
        let config_err = ConfigError::FileNotFound {
            path: "test.toml".to_owned(),
        };
        let core_err = AegisError::Config(config_err);
        let cli_err: CliError = core_err.into();
        match cli_err {
            CliError::Core(_) => {}
            _ => panic!("expected Core error variant"),
        }
    }

    #[test]
    fn test_from_sbom_error() {
        let sbom_err = SbomError::InvalidRoot {
            path: "/nope".to_owned(),
            reason: "missing".to_owned(),
        };
        let cli_err: CliError = sbom_err.into();
        match cli_err {
            CliError::Sbom(msg) => assert!(msg.contains("/nope")),
            _ => panic!("expected Sbom error variant"),
        }
    }

    #[test]
    fn test_error_debug_format() {
        let err = CliError::Config("test".to_owned());
        let debug_str = format!("{:?}", err);
        assert!(
            debug_str.contains("Config"),
            "debug format should show variant name"
        );
    }
}
