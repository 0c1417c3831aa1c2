//! 설정 관리 — aegis.toml 파싱 및 런타임 설정
//!
//! [`AegisConfig`]는 모든 크레이트의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`AEGIS_RISK_HIGH_THRESHOLD=10.0` 형식)
//! 3. 설정 파일 (`aegis.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), aegis_core::error::AegisError> {
//! use aegis_core::config::AegisConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = AegisConfig::load("aegis.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = AegisConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{AegisError, ConfigError};

/// Aegis 통합 설정
///
/// `aegis.toml` 파일의 최상위 구조를 나타냅니다.
/// 각 크레이트는 자기 섹션만 읽어 사용합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AegisConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// SBOM 생성 설정
    #[serde(default)]
    pub sbom: SbomConfig,
    /// 코드 분석 설정
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
    /// 위험도 산정 설정
    #[serde(default)]
    pub risk: RiskConfig,
    /// 아카이브 가져오기 설정
    #[serde(default)]
    pub fetch: FetchConfig,
    /// 알림 설정
    #[serde(default)]
    pub notify: NotifyConfig,
}

impl AegisConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, AegisError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, AegisError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AegisError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                AegisError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, AegisError> {
        toml::from_str(toml_str).map_err(|e| {
            AegisError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `AEGIS_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "AEGIS_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "AEGIS_GENERAL_LOG_FORMAT");

        // SBOM
        override_u64(
            &mut self.sbom.max_manifest_bytes,
            "AEGIS_SBOM_MAX_MANIFEST_BYTES",
        );

        // Analyzer
        override_u64(
            &mut self.analyzer.max_file_bytes,
            "AEGIS_ANALYZER_MAX_FILE_BYTES",
        );

        // Risk
        override_f64(&mut self.risk.high_threshold, "AEGIS_RISK_HIGH_THRESHOLD");
        override_f64(
            &mut self.risk.medium_threshold,
            "AEGIS_RISK_MEDIUM_THRESHOLD",
        );

        // Fetch
        override_u64(
            &mut self.fetch.max_archive_bytes,
            "AEGIS_FETCH_MAX_ARCHIVE_BYTES",
        );
        override_u64(&mut self.fetch.timeout_secs, "AEGIS_FETCH_TIMEOUT_SECS");

        // Notify
        override_bool(&mut self.notify.enabled, "AEGIS_NOTIFY_ENABLED");
        override_string(&mut self.notify.api_base, "AEGIS_NOTIFY_API_BASE");
        override_string(&mut self.notify.app_id, "AEGIS_NOTIFY_APP_ID");
        override_u64(
            &mut self.notify.installation_id,
            "AEGIS_NOTIFY_INSTALLATION_ID",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), AegisError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        if self.sbom.max_manifest_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sbom.max_manifest_bytes".to_owned(),
                reason: "must be greater than 0".to_owned(),
            }
            .into());
        }

        if self.analyzer.max_file_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "analyzer.max_file_bytes".to_owned(),
                reason: "must be greater than 0".to_owned(),
            }
            .into());
        }

        // 임계값 검증: high > medium > 0
        if self.risk.medium_threshold <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "risk.medium_threshold".to_owned(),
                reason: "must be greater than 0".to_owned(),
            }
            .into());
        }
        if self.risk.high_threshold <= self.risk.medium_threshold {
            return Err(ConfigError::InvalidValue {
                field: "risk.high_threshold".to_owned(),
                reason: "must be greater than risk.medium_threshold".to_owned(),
            }
            .into());
        }

        if self.fetch.max_archive_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "fetch.max_archive_bytes".to_owned(),
                reason: "must be greater than 0".to_owned(),
            }
            .into());
        }
        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "fetch.timeout_secs".to_owned(),
                reason: "must be greater than 0".to_owned(),
            }
            .into());
        }

        if self.notify.enabled && self.notify.api_base.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "notify.api_base".to_owned(),
                reason: "must not be empty when notify is enabled".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "json".to_owned(),
        }
    }
}

/// SBOM 생성 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SbomConfig {
    /// 매니페스트 파일 최대 크기 (바이트)
    pub max_manifest_bytes: u64,
}

impl Default for SbomConfig {
    fn default() -> Self {
        Self {
            max_manifest_bytes: 1024 * 1024, // 1MB
        }
    }
}

/// 코드 분석 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// 소스 파일 최대 크기 (바이트)
    pub max_file_bytes: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 1024 * 1024, // 1MB
        }
    }
}

/// 위험도 산정 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// high 등급 임계값 (점수 >= 이 값이면 high)
    pub high_threshold: f64,
    /// medium 등급 임계값 (점수 >= 이 값이면 medium)
    pub medium_threshold: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            high_threshold: 8.0,
            medium_threshold: 4.0,
        }
    }
}

/// 아카이브 가져오기 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// 아카이브 최대 크기 (바이트)
    pub max_archive_bytes: u64,
    /// 다운로드 시간 제한 (초)
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_archive_bytes: 500 * 1024 * 1024, // 500MB
            timeout_secs: 300,
        }
    }
}

/// 알림 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// 활성화 여부
    pub enabled: bool,
    /// 리뷰 시스템 API 베이스 URL
    pub api_base: String,
    /// App ID
    pub app_id: String,
    /// Installation ID
    pub installation_id: u64,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_base: "https://api.github.com".to_owned(),
            app_id: String::new(),
            installation_id: 0,
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_u64(target: &mut u64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u64 from env var, ignoring"
            ),
        }
    }
}

fn override_f64(target: &mut f64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<f64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse f64 from env var, ignoring"
            ),
        }
    }
}
