//! 위험도 산정
//!
//! CVE 수, 위험 프리미티브 탐지 수, 영향 파일 수를 고정 가중치로
//! 선형 결합해 점수를 만들고 임계값으로 등급을 정합니다.

use serde::{Deserialize, Serialize};
use tracing::debug;

use aegis_core::config::RiskConfig;
use aegis_core::types::{CorrelatedComponent, Finding, RiskLevel, Severity};

/// critical CVE 1건당 가중치
pub const WEIGHT_CVE_CRITICAL: f64 = 3.0;
/// high CVE 1건당 가중치
pub const WEIGHT_CVE_HIGH: f64 = 2.0;
/// medium CVE 1건당 가중치
pub const WEIGHT_CVE_MEDIUM: f64 = 1.0;
/// low CVE 1건당 가중치
pub const WEIGHT_CVE_LOW: f64 = 0.5;
/// high 심각도 시맨틱 탐지 1건당 가중치
pub const WEIGHT_DANGEROUS_FINDING: f64 = 2.0;
/// 영향 파일 1개당 가중치
pub const WEIGHT_AFFECTED_FILE: f64 = 0.5;
/// 점수에 반영하는 영향 파일 수 상한
pub const MAX_COUNTED_FILES: usize = 10;

/// 등급 임계값
///
/// 점수가 `high` 이상이면 high, `medium` 이상이면 medium, 그 외 low입니다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    pub high: f64,
    pub medium: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            high: 8.0,
            medium: 4.0,
        }
    }
}

impl From<&RiskConfig> for RiskThresholds {
    fn from(config: &RiskConfig) -> Self {
        Self {
            high: config.high_threshold,
            medium: config.medium_threshold,
        }
    }
}

/// 심각도별 CVE 수
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    /// info는 집계는 하되 점수에는 반영하지 않습니다.
    pub info: usize,
}

impl SeverityCounts {
    /// 상관 결과의 취약점을 심각도별로 셉니다.
    pub fn from_correlated(components: &[CorrelatedComponent]) -> Self {
        let mut counts = Self::default();
        for comp in components {
            for vuln in &comp.vulnerabilities {
                match vuln.severity {
                    Severity::Critical => counts.critical += 1,
                    Severity::High => counts.high += 1,
                    Severity::Medium => counts.medium += 1,
                    Severity::Low => counts.low += 1,
                    Severity::Info => counts.info += 1,
                }
            }
        }
        counts
    }

    /// 점수에 반영되는 CVE 총 수 (info 제외가 아니라 전체)
    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low + self.info
    }
}

/// 점수 구성 내역
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskBreakdown {
    /// CVE 기여분
    pub cve_score: f64,
    /// 위험 프리미티브 기여분
    pub primitive_score: f64,
    /// 영향 파일 기여분
    pub files_score: f64,
    /// 심각도별 CVE 수
    pub cve_counts: SeverityCounts,
    /// high 심각도 시맨틱 탐지 수
    pub dangerous_findings: usize,
    /// 탐지가 있는 파일 수 (상한 적용 전)
    pub affected_files: usize,
}

/// 위험도 점수
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScore {
    pub score: f64,
    pub level: RiskLevel,
    pub breakdown: RiskBreakdown,
}

/// 집계된 입력으로 점수를 계산합니다.
pub fn calculate_risk_score(
    cve_counts: SeverityCounts,
    dangerous_findings: usize,
    affected_files: usize,
    thresholds: &RiskThresholds,
) -> RiskScore {
    let cve_score = cve_counts.critical as f64 * WEIGHT_CVE_CRITICAL
        + cve_counts.high as f64 * WEIGHT_CVE_HIGH
        + cve_counts.medium as f64 * WEIGHT_CVE_MEDIUM
        + cve_counts.low as f64 * WEIGHT_CVE_LOW;

    let primitive_score = dangerous_findings as f64 * WEIGHT_DANGEROUS_FINDING;
    let files_score = affected_files.min(MAX_COUNTED_FILES) as f64 * WEIGHT_AFFECTED_FILE;

    let score = cve_score + primitive_score + files_score;

    // 임계값과 같으면 높은 쪽 등급
    let level = if score >= thresholds.high {
        RiskLevel::High
    } else if score >= thresholds.medium {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    debug!(
        score,
        level = level.as_str(),
        cve_score,
        primitive_score,
        files_score,
        "calculated risk score"
    );

    RiskScore {
        score,
        level,
        breakdown: RiskBreakdown {
            cve_score,
            primitive_score,
            files_score,
            cve_counts,
            dangerous_findings,
            affected_files,
        },
    }
}

/// 스캔 탐지 결과와 상관 결과를 집계해 점수를 계산합니다.
pub fn aggregate(
    findings: &[Finding],
    correlated: &[CorrelatedComponent],
    thresholds: &RiskThresholds,
) -> RiskScore {
    let cve_counts = SeverityCounts::from_correlated(correlated);

    let dangerous_findings = findings
        .iter()
        .filter(|f| f.severity == Severity::High)
        .count();

    let affected_files = {
        let mut files: Vec<&str> = findings
            .iter()
            .map(|f| f.file_path.as_str())
            .filter(|p| !p.is_empty())
            .collect();
        files.sort_unstable();
        files.dedup();
        files.len()
    };

    calculate_risk_score(cve_counts, dangerous_findings, affected_files, thresholds)
}
