//! 버전 정규화 — 범위 표현식을 단일 버전 문자열로 변환
//!
//! `^1.2.3`, `>=1.2.3,<2.0.0` 같은 범위 표현식에서 대표 버전 하나를
//! 추출합니다. 실패하지 않는 함수입니다 — 패턴이 없으면 정리된 입력을
//! 그대로 돌려줍니다.

use std::sync::LazyLock;

use regex::Regex;

/// 세 자리 점 구분 숫자 패턴 (1.2.3)
static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+\.\d+").expect("valid regex"));

/// 범위 연산자 문자
const RANGE_OPS: &[char] = &['^', '~', '>', '=', '<'];

/// 버전 범위 표현식을 단일 버전 문자열로 정규화합니다.
///
/// 1. 앞뒤 공백을 제거합니다.
/// 2. 선행 범위 연산자(`^ ~ > = <`)를 제거합니다.
/// 3. 콤마가 있으면 첫 번째 절만 취하고 연산자를 다시 제거합니다.
/// 4. `digits.digits.digits` 패턴의 첫 매치를 반환합니다.
/// 5. 패턴이 없으면 정리된 문자열을 그대로 반환합니다 (에러 아님).
///
/// # Examples
///
/// ```
/// use aegis_sbom::version::normalize_version_range;
///
/// assert_eq!(normalize_version_range("^1.2.3"), "1.2.3");
/// assert_eq!(normalize_version_range(">=1.2.3,<2.0.0"), "1.2.3");
/// assert_eq!(normalize_version_range("latest"), "latest");
/// ```
pub fn normalize_version_range(version_spec: &str) -> String {
    let mut cleaned = version_spec.trim().trim_start_matches(RANGE_OPS);

    // 다중 절 범위는 첫 절만 사용
    if let Some(first_clause) = cleaned.split(',').next() {
        cleaned = first_clause.trim().trim_start_matches(RANGE_OPS);
    }

    match VERSION_RE.find(cleaned) {
        Some(m) => m.as_str().to_owned(),
        None => cleaned.to_owned(),
    }
}
