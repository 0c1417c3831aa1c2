//! 도메인 타입 — 시스템 전역에서 사용되는 공통 타입
//!
//! 스캔 파이프라인의 모든 단계가 공유하는 데이터 구조를 정의합니다.
//! 각 크레이트는 이 타입들을 사용하여 스캔 결과를 교환합니다.

use std::fmt;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// 심각도 레벨
///
/// 탐지된 보안 이슈의 심각도를 나타냅니다.
/// `Ord` 구현으로 심각도 비교가 가능합니다 (`Info < Low < Medium < High < Critical`).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// 정보성 이벤트
    #[default]
    Info,
    /// 낮은 심각도
    Low,
    /// 중간 심각도
    Medium,
    /// 높은 심각도
    High,
    /// 치명적 — 즉시 대응 필요
    Critical,
}

impl Severity {
    /// 문자열에서 심각도를 파싱합니다.
    ///
    /// 대소문자를 구분하지 않습니다.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "info" | "informational" => Some(Self::Info),
            "low" => Some(Self::Low),
            "medium" | "med" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" | "crit" => Some(Self::Critical),
            _ => None,
        }
    }

    /// 직렬화에 사용되는 소문자 표기를 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 패키지 에코시스템
///
/// 컴포넌트가 속한 패키지 관리 시스템을 나타냅니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    /// npm (package.json)
    Npm,
    /// PyPI (requirements.txt)
    PyPi,
}

impl Ecosystem {
    /// purl 스킴에 사용되는 타입 문자열을 반환합니다.
    pub fn purl_type(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::PyPi => "pypi",
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.purl_type())
    }
}

/// SBOM 컴포넌트
///
/// 의존성 매니페스트에서 추출된 단일 서드파티 패키지를 나타냅니다.
/// (name, version, ecosystem) 트리플은 한 번의 SBOM 생성 내에서 유일합니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SbomComponent {
    /// 패키지명
    pub name: String,
    /// 정규화된 버전 문자열
    pub version: String,
    /// 에코시스템
    pub ecosystem: Ecosystem,
    /// Package URL (예: pkg:npm/left-pad@1.3.0)
    pub purl: Option<String>,
}

impl SbomComponent {
    /// purl을 계산하여 컴포넌트를 생성합니다.
    pub fn new(name: impl Into<String>, version: impl Into<String>, ecosystem: Ecosystem) -> Self {
        let name = name.into();
        let version = version.into();
        let purl = format!("pkg:{}/{}@{}", ecosystem.purl_type(), name, version);
        Self {
            name,
            version,
            ecosystem,
            purl: Some(purl),
        }
    }

    /// 중복 제거에 사용되는 복합 키를 반환합니다.
    pub fn dedup_key(&self) -> (String, String, Ecosystem) {
        (self.name.clone(), self.version.clone(), self.ecosystem)
    }
}

impl fmt::Display for SbomComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{} ({})", self.name, self.version, self.ecosystem)
    }
}

/// 탐지 결과
///
/// 소스 파일의 특정 위치에서 탐지된 보안 관련 코드 패턴 하나를 나타냅니다.
/// 생성 후 변경되지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Finding {
    /// 규칙 식별자 (예: PY001) — 릴리스 간 안정적으로 유지됨
    pub rule_id: String,
    /// 심각도
    pub severity: Severity,
    /// 설명 메시지
    pub message: String,
    /// 파일 경로
    pub file_path: String,
    /// 1부터 시작하는 행 번호
    pub line_number: usize,
    /// 매칭된 코드 조각 (트림 후 100자 이내)
    pub code_snippet: Option<String>,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {}:{} {}",
            self.severity, self.rule_id, self.file_path, self.line_number, self.message,
        )
    }
}

/// 위험도 등급
///
/// 가중 합산 점수를 임계값으로 버킷팅한 결과입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// 낮음
    Low,
    /// 중간
    Medium,
    /// 높음 — 체크 실패 처리
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 스캔 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    /// 모든 단계 완료 (단계별 축소 결과 포함)
    Completed,
    /// 스캔 자체가 실패함
    Failed,
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => f.write_str("completed"),
            Self::Failed => f.write_str("failed"),
        }
    }
}

/// 스캔 결과 문서
///
/// 한 번의 파이프라인 실행이 만들어내는 전체 결과입니다.
/// 영속화 협력자([`crate::pipeline::ReportStore`])가 이 문서를 저장합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// 보고서 ID
    pub id: String,
    /// PR 번호
    pub pr_number: u64,
    /// 커밋 SHA
    pub commit_sha: String,
    /// 아카이브 URL (있을 경우)
    pub archive_url: Option<String>,
    /// 스캔 상태
    pub status: ScanStatus,
    /// SBOM 컴포넌트 목록
    pub sbom_components: Vec<SbomComponent>,
    /// 탐지 결과 목록
    pub findings: Vec<Finding>,
    /// 스캔 시각
    pub scanned_at: SystemTime,
}

impl ScanReport {
    /// 새 보고서를 생성합니다. ID는 랜덤 UUID입니다.
    pub fn new(pr_number: u64, commit_sha: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            pr_number,
            commit_sha: commit_sha.into(),
            archive_url: None,
            status: ScanStatus::Completed,
            sbom_components: Vec::new(),
            findings: Vec::new(),
            scanned_at: SystemTime::now(),
        }
    }

    /// 저장소 중복 제거 키를 반환합니다.
    pub fn key(&self) -> ReportKey {
        ReportKey {
            pr_number: self.pr_number,
            commit_sha: self.commit_sha.clone(),
        }
    }
}

/// 보고서 식별 키
///
/// 재시도된 호출의 중복 저장을 막기 위해 (PR 번호, 커밋 SHA) 쌍으로
/// 보고서를 식별합니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportKey {
    /// PR 번호
    pub pr_number: u64,
    /// 커밋 SHA
    pub commit_sha: String,
}

impl ReportKey {
    /// 문서 ID 문자열 (`{pr_number}_{commit_sha}`)을 반환합니다.
    pub fn doc_id(&self) -> String {
        format!("{}_{}", self.pr_number, self.commit_sha)
    }
}

/// 취약점 참조
///
/// 외부 취약점 데이터베이스에서 매칭된 항목의 식별자와 심각도입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnerabilityRef {
    /// 취약점 ID (예: GHSA-..., CVE-...)
    pub id: String,
    /// 심각도
    pub severity: Severity,
}

/// 취약점이 주석된 SBOM 컴포넌트
///
/// 취약점 상관 협력자([`crate::pipeline::VulnCorrelator`])의 출력입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelatedComponent {
    /// 원본 컴포넌트
    pub component: SbomComponent,
    /// 매칭된 취약점 목록 (없으면 빈 목록)
    pub vulnerabilities: Vec<VulnerabilityRef>,
}

/// 가져온 아카이브
///
/// 아카이브 가져오기 협력자([`crate::pipeline::ArchiveFetcher`])의 출력입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedArchive {
    /// 압축 해제된 루트 디렉토리
    pub root_dir: std::path::PathBuf,
    /// 아카이브 SHA-256 해시
    pub sha256: String,
    /// 아카이브 크기 (바이트)
    pub size_bytes: u64,
}
