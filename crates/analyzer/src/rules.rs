//! 탐지 규칙 테이블 — 언어별 고정 규칙 정의
//!
//! 규칙은 코드가 아니라 데이터입니다. 언어 태그에서 규칙 목록으로 가는
//! 읽기 전용 테이블이며, 프로세스 시작 후 변경되지 않습니다.
//! 규칙 추가는 테이블에 행을 더하는 것으로 끝납니다.
//!
//! 규칙 ID(PY001 등)는 영속화된 탐지 결과에 남으므로 릴리스 간
//! 안정적으로 유지해야 합니다.

use std::sync::LazyLock;

use regex::Regex;

use aegis_core::types::Severity;

/// 지원 언어
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// Python (.py)
    Python,
    /// JavaScript 계열 (.js, .jsx, .ts, .tsx)
    JavaScript,
}

impl Language {
    /// 파일 확장자에서 언어를 판별합니다.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "py" => Some(Self::Python),
            "js" | "jsx" | "ts" | "tsx" => Some(Self::JavaScript),
            _ => None,
        }
    }

    /// 메트릭 레이블에 사용되는 소문자 표기를 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::JavaScript => "javascript",
        }
    }
}

/// 구조 규칙 변형 태그
///
/// 행 정규식으로 표현할 수 없는 검사를 나타냅니다. 새 구조 검사는
/// 새 변형으로 추가하며, 트리 순회 코드는 그대로 둡니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralCheck {
    /// `object.attribute(...)` 호출에 특정 키워드 인자가 없는 경우
    CallMissingKeyword {
        object: &'static str,
        attribute: &'static str,
        keyword: &'static str,
    },
}

/// 탐지 규칙 한 건
pub struct Rule {
    /// 안정적 규칙 식별자
    pub id: &'static str,
    /// 심각도
    pub severity: Severity,
    /// 행 단위 정규식 매처
    pub pattern: Regex,
    /// 고정 메시지
    pub message: &'static str,
    /// 구조 검사 (있을 경우, 구문 트리 스캐너가 사용)
    pub structural: Option<StructuralCheck>,
}

/// Python 규칙 테이블
static PYTHON_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule {
            id: "PY001",
            severity: Severity::High,
            pattern: Regex::new(r"yaml\.load\s*\(").expect("valid regex"),
            message: "Unsafe yaml.load() without Loader parameter",
            structural: Some(StructuralCheck::CallMissingKeyword {
                object: "yaml",
                attribute: "load",
                keyword: "Loader",
            }),
        },
        Rule {
            id: "PY002",
            severity: Severity::High,
            pattern: Regex::new(r"subprocess\.(call|run|Popen)\s*\([^)]*shell\s*=\s*True")
                .expect("valid regex"),
            message: "subprocess with shell=True is dangerous",
            structural: None,
        },
        Rule {
            id: "PY003",
            severity: Severity::High,
            pattern: Regex::new(r"requests\.(get|post|put|delete)\s*\([^)]*verify\s*=\s*False")
                .expect("valid regex"),
            message: "requests with verify=False disables SSL verification",
            structural: None,
        },
    ]
});

/// JavaScript 규칙 테이블
static JAVASCRIPT_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule {
            id: "JS001",
            severity: Severity::High,
            pattern: Regex::new(r"child_process\.(exec|execSync)\s*\(").expect("valid regex"),
            message: "child_process.exec() can execute arbitrary commands",
            structural: None,
        },
        Rule {
            id: "JS002",
            severity: Severity::High,
            pattern: Regex::new(r"\beval\s*\(").expect("valid regex"),
            message: "eval() can execute arbitrary code",
            structural: None,
        },
        Rule {
            id: "JS003",
            severity: Severity::Medium,
            pattern: Regex::new(r#"http://[^\s"']+"#).expect("valid regex"),
            message: "Insecure HTTP endpoint detected",
            structural: None,
        },
    ]
});

/// 언어의 규칙 목록을 반환합니다.
pub fn rules_for(language: Language) -> &'static [Rule] {
    match language {
        Language::Python => &PYTHON_RULES,
        Language::JavaScript => &JAVASCRIPT_RULES,
    }
}
