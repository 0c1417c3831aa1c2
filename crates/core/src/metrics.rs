//! 메트릭 상수 및 설명 등록
//!
//! 모든 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 각 크레이트는 이 상수를 사용하여 `metrics::counter!()`, `metrics::gauge!()`,
//! `metrics::histogram!()` 매크로를 호출합니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `aegis_`
//! - 모듈명: `sbom_`, `analyzer_`, `scan_`
//! - 접미어: `_total` (counter), `_seconds` (histogram/latency), 없음 (gauge)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(aegis_core::metrics::ANALYZER_FINDINGS_TOTAL).increment(1);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 심각도 레이블 키 (info, low, medium, high, critical)
pub const LABEL_SEVERITY: &str = "severity";

/// 에코시스템 레이블 키 (npm, pypi)
pub const LABEL_ECOSYSTEM: &str = "ecosystem";

/// 언어 레이블 키 (python, javascript)
pub const LABEL_LANGUAGE: &str = "language";

/// 결과 레이블 키 (success, failure)
pub const LABEL_RESULT: &str = "result";

// ─── SBOM 메트릭 ────────────────────────────────────────────────────

/// SBOM: 파싱된 매니페스트 파일 수 (counter, label: ecosystem)
pub const SBOM_MANIFESTS_PARSED_TOTAL: &str = "aegis_sbom_manifests_parsed_total";

/// SBOM: 매니페스트 파싱 실패 수 (counter)
pub const SBOM_PARSE_ERRORS_TOTAL: &str = "aegis_sbom_parse_errors_total";

/// SBOM: 추출된 컴포넌트 수 (counter, label: ecosystem)
pub const SBOM_COMPONENTS_TOTAL: &str = "aegis_sbom_components_total";

/// SBOM: 중복 제거로 탈락한 컴포넌트 수 (counter)
pub const SBOM_DUPLICATES_DROPPED_TOTAL: &str = "aegis_sbom_duplicates_dropped_total";

/// SBOM: 생성 소요 시간 (histogram, 초)
pub const SBOM_BUILD_DURATION_SECONDS: &str = "aegis_sbom_build_duration_seconds";

// ─── Analyzer 메트릭 ────────────────────────────────────────────────

/// Analyzer: 스캔된 소스 파일 수 (counter, label: language)
pub const ANALYZER_FILES_SCANNED_TOTAL: &str = "aegis_analyzer_files_scanned_total";

/// Analyzer: 읽기/파싱 실패로 건너뛴 파일 수 (counter)
pub const ANALYZER_FILES_SKIPPED_TOTAL: &str = "aegis_analyzer_files_skipped_total";

/// Analyzer: 탐지 결과 수 (counter, label: severity)
pub const ANALYZER_FINDINGS_TOTAL: &str = "aegis_analyzer_findings_total";

/// Analyzer: 구문 파싱 실패 수 (counter)
pub const ANALYZER_SYNTAX_ERRORS_TOTAL: &str = "aegis_analyzer_syntax_errors_total";

/// Analyzer: 분석 소요 시간 (histogram, 초)
pub const ANALYZER_SCAN_DURATION_SECONDS: &str = "aegis_analyzer_scan_duration_seconds";

// ─── Scan 파이프라인 메트릭 ─────────────────────────────────────────

/// Scan: 완료된 스캔 수 (counter, label: result)
pub const SCAN_COMPLETED_TOTAL: &str = "aegis_scan_completed_total";

/// Scan: 위험도 점수 (gauge)
pub const SCAN_RISK_SCORE: &str = "aegis_scan_risk_score";

/// Scan: 전체 파이프라인 소요 시간 (histogram, 초)
pub const SCAN_DURATION_SECONDS: &str = "aegis_scan_duration_seconds";

// ─── 설명 등록 함수 ─────────────────────────────────────────────────

/// 모든 메트릭의 설명(description)을 등록합니다.
///
/// 이 함수는 전역 레코더 설치 후 한 번만 호출해야 합니다.
pub fn describe_all() {
    use metrics::{describe_counter, describe_gauge, describe_histogram};

    // SBOM
    describe_counter!(
        SBOM_MANIFESTS_PARSED_TOTAL,
        "Total number of manifest files successfully parsed"
    );
    describe_counter!(
        SBOM_PARSE_ERRORS_TOTAL,
        "Total number of manifest parse failures"
    );
    describe_counter!(
        SBOM_COMPONENTS_TOTAL,
        "Total number of SBOM components extracted"
    );
    describe_counter!(
        SBOM_DUPLICATES_DROPPED_TOTAL,
        "Total number of duplicate components dropped during deduplication"
    );
    describe_histogram!(
        SBOM_BUILD_DURATION_SECONDS,
        "Time to build an SBOM for one directory tree in seconds"
    );

    // Analyzer
    describe_counter!(
        ANALYZER_FILES_SCANNED_TOTAL,
        "Total number of source files scanned"
    );
    describe_counter!(
        ANALYZER_FILES_SKIPPED_TOTAL,
        "Total number of source files skipped due to read failures"
    );
    describe_counter!(
        ANALYZER_FINDINGS_TOTAL,
        "Total number of findings emitted by all scanners"
    );
    describe_counter!(
        ANALYZER_SYNTAX_ERRORS_TOTAL,
        "Total number of files whose syntax tree failed to parse"
    );
    describe_histogram!(
        ANALYZER_SCAN_DURATION_SECONDS,
        "Time to analyze one directory tree in seconds"
    );

    // Scan pipeline
    describe_counter!(SCAN_COMPLETED_TOTAL, "Total number of scans completed");
    describe_gauge!(SCAN_RISK_SCORE, "Risk score of the most recent scan");
    describe_histogram!(
        SCAN_DURATION_SECONDS,
        "End-to-end pipeline duration in seconds"
    );
}
