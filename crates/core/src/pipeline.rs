//! 파이프라인 trait — 외부 협력자 확장 포인트 정의
//!
//! 네트워크/영속화 구현은 코어 밖에 있습니다. 코어는 이 trait들로만
//! 협력자와 대화하며, 재시도/백오프 정책도 구현체의 몫입니다.

use crate::error::{FetchError, NotifyError, StoreError};
use crate::types::{CorrelatedComponent, FetchedArchive, ReportKey, ScanReport, SbomComponent};

/// 아카이브 가져오기 trait
///
/// URL에서 아카이브를 내려받아 압축을 해제한 로컬 디렉토리를 반환합니다.
/// 구현체는 최대 크기와 시간 제한을 강제해야 하며, 위반 시
/// [`FetchError::TooLarge`] / [`FetchError::Timeout`]으로 실패합니다.
pub trait ArchiveFetcher: Send + Sync {
    /// 아카이브를 가져와 압축 해제합니다.
    fn fetch(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<FetchedArchive, FetchError>> + Send;
}

/// 취약점 상관 trait
///
/// SBOM 컴포넌트를 외부 취약점 데이터와 대조하여 주석을 달아 돌려줍니다.
pub trait VulnCorrelator: Send + Sync {
    /// 컴포넌트별 취약점 목록을 조회합니다.
    ///
    /// 매칭이 없는 컴포넌트도 빈 목록으로 결과에 포함되어야 합니다.
    fn correlate(
        &self,
        components: &[SbomComponent],
    ) -> impl Future<Output = Result<Vec<CorrelatedComponent>, StoreError>> + Send;
}

/// 보고서 저장 trait
///
/// 같은 키로 재호출되면 덮어쓰기되어야 합니다 (재시도 중복 제거).
pub trait ReportStore: Send + Sync {
    /// 보고서를 저장합니다.
    fn store(
        &self,
        key: &ReportKey,
        report: &ScanReport,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// 알림 trait
///
/// 리뷰 시스템에 요약을 게시하고 pass/fail 체크 결과를 기록합니다.
pub trait Notifier: Send + Sync {
    /// PR에 요약 코멘트를 게시합니다.
    fn post_summary(
        &self,
        key: &ReportKey,
        body: &str,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;

    /// 체크 결과를 기록합니다.
    fn record_check(
        &self,
        key: &ReportKey,
        passed: bool,
        summary: &str,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;
}
