//! 구문 트리 기반 구조 스캐너
//!
//! 행 정규식으로 잡을 수 없는 패턴을 구문 트리 위에서 검사합니다.
//! 현재 Python만 지원합니다 (tree-sitter 문법이 있는 언어에만 적용).
//!
//! 파싱에 실패한 파일은 구조 분석만 조용히 건너뜁니다 — 행 단위
//! 스캐너의 결과는 그대로 유지되므로 에러가 아니라 커버리지 축소입니다.
//!
//! PY001은 정규식 규칙과 구조 규칙을 모두 갖고 있어, Loader 없는
//! `yaml.load()` 한 건이 두 번 보고됩니다. 문서화된 기존 동작입니다.

use metrics::counter;
use tracing::{debug, warn};
use tree_sitter::{Node, Parser};

use aegis_core::metrics as metric_names;
use aegis_core::types::Finding;

use crate::pattern::make_snippet;
use crate::rules::{Language, StructuralCheck, rules_for};

/// 구문 트리 스캐너
pub struct SyntaxScanner;

impl SyntaxScanner {
    /// 파일 내용을 구조 규칙으로 스캔합니다.
    ///
    /// 구문 문법이 없는 언어는 빈 결과를 반환합니다.
    pub fn scan(content: &str, language: Language, file_path: &str) -> Vec<Finding> {
        if language != Language::Python {
            return Vec::new();
        }

        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&tree_sitter_python::LANGUAGE.into()) {
            // 문법 버전 불일치 — 구조 분석 없이 진행
            warn!(error = %e, "failed to load python grammar, skipping syntax analysis");
            return Vec::new();
        }

        let Some(tree) = parser.parse(content, None) else {
            debug!(path = file_path, "syntax parse returned no tree, skipping");
            return Vec::new();
        };

        let root = tree.root_node();
        if root.has_error() {
            debug!(path = file_path, "source has syntax errors, skipping syntax analysis");
            counter!(metric_names::ANALYZER_SYNTAX_ERRORS_TOTAL).increment(1);
            return Vec::new();
        }

        let source = content.as_bytes();
        let lines: Vec<&str> = content.lines().collect();
        let mut findings = Vec::new();

        // 전위 순회
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if node.kind() == "call" {
                for rule in rules_for(language) {
                    let Some(check) = rule.structural else {
                        continue;
                    };
                    if check_matches(check, node, source) {
                        let row = node.start_position().row;
                        findings.push(Finding {
                            rule_id: rule.id.to_owned(),
                            severity: rule.severity,
                            message: rule.message.to_owned(),
                            file_path: file_path.to_owned(),
                            line_number: row + 1,
                            code_snippet: lines.get(row).map(|line| make_snippet(line)),
                        });
                    }
                }
            }

            for i in (0..node.child_count()).rev() {
                if let Some(child) = node.child(i) {
                    stack.push(child);
                }
            }
        }

        findings
    }
}

/// 구조 검사를 호출 노드에 적용합니다.
fn check_matches(check: StructuralCheck, call: Node<'_>, source: &[u8]) -> bool {
    match check {
        StructuralCheck::CallMissingKeyword {
            object,
            attribute,
            keyword,
        } => {
            is_attribute_call(call, source, object, attribute)
                && !has_keyword_argument(call, source, keyword)
        }
    }
}

/// 호출 대상이 `object.attribute` 형태인지 확인합니다.
fn is_attribute_call(call: Node<'_>, source: &[u8], object: &str, attribute: &str) -> bool {
    let Some(func) = call.child_by_field_name("function") else {
        return false;
    };
    if func.kind() != "attribute" {
        return false;
    }
    let (Some(obj), Some(attr)) = (
        func.child_by_field_name("object"),
        func.child_by_field_name("attribute"),
    ) else {
        return false;
    };

    obj.utf8_text(source) == Ok(object) && attr.utf8_text(source) == Ok(attribute)
}

/// 호출 인자 목록에 주어진 키워드 인자가 있는지 확인합니다.
fn has_keyword_argument(call: Node<'_>, source: &[u8], keyword: &str) -> bool {
    let Some(args) = call.child_by_field_name("arguments") else {
        return false;
    };

    for i in 0..args.named_child_count() {
        let Some(arg) = args.named_child(i) else {
            continue;
        };
        if arg.kind() == "keyword_argument"
            && let Some(name) = arg.child_by_field_name("name")
            && name.utf8_text(source) == Ok(keyword)
        {
            return true;
        }
    }
    false
}
