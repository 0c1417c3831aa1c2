//! PR 코멘트 및 체크 요약 텍스트 생성
//!
//! 위험도 점수와 상관 결과로 GitHub에 올릴 마크다운을 만듭니다.
//! 실제 전송은 알림 협력자([`aegis_core::pipeline::Notifier`])의 몫입니다.

use std::fmt::Write as _;

use aegis_core::types::{CorrelatedComponent, RiskLevel};

use crate::risk::RiskScore;

/// PR 코멘트에 싣는 취약 패키지 수 상한
pub const MAX_REPORTED_PACKAGES: usize = 10;
/// 패키지당 OSV 링크 수 상한
pub const MAX_LINKS_PER_PACKAGE: usize = 3;

/// 등급별 이모지
fn level_emoji(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::High => "\u{1f534}",
        RiskLevel::Medium => "\u{1f7e1}",
        RiskLevel::Low => "\u{1f7e2}",
    }
}

/// PR 코멘트 마크다운을 만듭니다.
///
/// 취약점이 있는 패키지만 싣고, 패키지 상위 10개 / 패키지당 OSV 링크
/// 3개로 자릅니다. CVE 총 수는 전체 상관 결과 기준입니다.
pub fn format_pr_comment(
    risk: &RiskScore,
    correlated: &[CorrelatedComponent],
    findings_count: usize,
) -> String {
    let cve_count: usize = correlated.iter().map(|c| c.vulnerabilities.len()).sum();

    let mut comment = format!(
        "## {} Aegis Security Scan\n\n\
         **Risk Level:** {} (Score: {:.1})\n\n\
         ### Summary\n\
         - **CVEs Found:** {}\n\
         - **Semantic Findings:** {}\n\n\
         ### Key Packages with Vulnerabilities\n",
        level_emoji(risk.level),
        risk.level.as_str().to_uppercase(),
        risk.score,
        cve_count,
        findings_count,
    );

    let key_packages = correlated
        .iter()
        .filter(|c| !c.vulnerabilities.is_empty())
        .take(MAX_REPORTED_PACKAGES);

    for pkg in key_packages {
        let _ = writeln!(
            comment,
            "- **{}@{}**: {} vulnerability(ies)",
            pkg.component.name,
            pkg.component.version,
            pkg.vulnerabilities.len()
        );
        for vuln in pkg.vulnerabilities.iter().take(MAX_LINKS_PER_PACKAGE) {
            let _ = writeln!(
                comment,
                "  - [{id}](https://osv.dev/vulnerability/{id})",
                id = vuln.id
            );
        }
    }

    comment.push_str(
        "\n### Recommendations\n\
         - Review and update vulnerable dependencies\n\
         - Address high-severity semantic findings\n\
         - Consider using dependency scanning in CI/CD\n\n\
         ---\n\
         *Generated by Aegis Security Scanner*\n",
    );

    comment
}

/// 체크 런 요약 한 줄을 만듭니다.
pub fn format_check_summary(risk: &RiskScore, cve_count: usize, findings_count: usize) -> String {
    format!(
        "Risk Level: {} (Score: {:.1})\n\n{} CVEs found, {} semantic findings.",
        risk.level.as_str().to_uppercase(),
        risk.score,
        cve_count,
        findings_count
    )
}

/// 체크 통과 여부. high 등급만 실패 처리합니다.
pub fn check_passed(risk: &RiskScore) -> bool {
    risk.level != RiskLevel::High
}
