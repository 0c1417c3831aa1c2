//! requirements.txt 파서
//!
//! [`RequirementsTxtParser`]는 행 단위 핀 파일을 파싱하여 컴포넌트 목록을
//! 생성합니다. 주석/빈 행/include 지시자는 건너뜁니다.
//!
//! # requirements.txt 형식 예시
//!
//! ```text
//! # production pins
//! requests==2.25.1  # pinned for CVE
//! flask>=2.0,<3.0
//! -r dev-requirements.txt
//! pyyaml
//! ```

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use aegis_core::error::SbomError;
use aegis_core::types::{Ecosystem, SbomComponent};

use crate::parser::ManifestParser;
use crate::version::normalize_version_range;

/// 버전 지정자 문자의 첫 번째 연속 구간 (`==`, `>=`, `~=` 등)
static SPECIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[=<>~!]+").expect("valid regex"));

/// requirements.txt 파서
///
/// 지정자가 없는 행(`pyyaml` 단독)은 버전을 `latest`로 처리합니다.
pub struct RequirementsTxtParser;

impl ManifestParser for RequirementsTxtParser {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::PyPi
    }

    fn can_parse(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name == "requirements.txt")
    }

    fn parse(
        &self,
        content: &str,
        _source_path: &str,
    ) -> Result<Vec<SbomComponent>, SbomError> {
        let mut components = Vec::new();

        for raw_line in content.lines() {
            let mut line = raw_line.trim();

            // 빈 행과 주석 행
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // include 지시자 (-r other.txt / --requirement other.txt)
            if line.starts_with("-r") || line.starts_with("--requirement") {
                continue;
            }

            // 인라인 주석 제거
            if let Some(pos) = line.find('#') {
                line = line[..pos].trim();
            }
            if line.is_empty() {
                continue;
            }

            let (name, version) = match SPECIFIER_RE.find(line) {
                Some(m) => {
                    let name = line[..m.start()].trim();
                    let spec = &line[m.end()..];
                    (name, normalize_version_range(spec))
                }
                // 지정자가 없으면 버전 고정 없음
                None => (line, "latest".to_owned()),
            };

            if name.is_empty() {
                continue;
            }

            components.push(SbomComponent::new(name, version, Ecosystem::PyPi));
        }

        Ok(components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_parse_requirements_txt() {
        let parser = RequirementsTxtParser;
        assert!(parser.can_parse(Path::new("requirements.txt")));
        assert!(parser.can_parse(Path::new("/app/requirements.txt")));
        assert!(!parser.can_parse(Path::new("dev-requirements.txt")));
        assert!(!parser.can_parse(Path::new("package.json")));
    }

    #[test]
    fn ecosystem_is_pypi() {
        let parser = RequirementsTxtParser;
        assert_eq!(parser.ecosystem(), Ecosystem::PyPi);
    }

    #[test]
    fn parse_exact_pin() {
        let parser = RequirementsTxtParser;
        let components = parser.parse("requests==2.25.1", "requirements.txt").unwrap();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].name, "requests");
        assert_eq!(components[0].version, "2.25.1");
        assert_eq!(components[0].ecosystem, Ecosystem::PyPi);
        assert_eq!(
            components[0].purl.as_deref(),
            Some("pkg:pypi/requests@2.25.1")
        );
    }

    #[test]
    fn parse_pin_with_inline_comment() {
        let parser = RequirementsTxtParser;
        let components = parser
            .parse("requests==2.25.1  # pinned for CVE", "requirements.txt")
            .unwrap();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].name, "requests");
        assert_eq!(components[0].version, "2.25.1");
    }

    #[test]
    fn parse_skips_blank_and_comment_lines() {
        let parser = RequirementsTxtParser;
        let content = "\n# header comment\n\nflask==2.3.2\n   \n";
        let components = parser.parse(content, "requirements.txt").unwrap();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].name, "flask");
    }

    #[test]
    fn parse_skips_include_directives() {
        let parser = RequirementsTxtParser;
        let content = "-r base.txt\n--requirement dev.txt\nrequests==2.25.1\n";
        let components = parser.parse(content, "requirements.txt").unwrap();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].name, "requests");
    }

    #[test]
    fn parse_unpinned_package_uses_latest() {
        let parser = RequirementsTxtParser;
        let components = parser.parse("pyyaml", "requirements.txt").unwrap();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].name, "pyyaml");
        assert_eq!(components[0].version, "latest");
    }

    #[test]
    fn parse_range_specifier_normalized() {
        let parser = RequirementsTxtParser;
        let components = parser
            .parse("flask>=2.0.0,<3.0.0", "requirements.txt")
            .unwrap();
        assert_eq!(components[0].name, "flask");
        assert_eq!(components[0].version, "2.0.0");
    }

    #[test]
    fn parse_compatible_release_specifier() {
        let parser = RequirementsTxtParser;
        let components = parser.parse("django~=4.2.0", "requirements.txt").unwrap();
        assert_eq!(components[0].name, "django");
        assert_eq!(components[0].version, "4.2.0");
    }

    #[test]
    fn parse_preserves_line_order() {
        let parser = RequirementsTxtParser;
        let content = "zebra==1.0.0\nalpha==2.0.0\n";
        let components = parser.parse(content, "requirements.txt").unwrap();
        let names: Vec<&str> = components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["zebra", "alpha"]);
    }

    #[test]
    fn parse_empty_file_returns_empty_list() {
        let parser = RequirementsTxtParser;
        let components = parser.parse("", "requirements.txt").unwrap();
        assert!(components.is_empty());
    }

    #[test]
    fn parse_line_that_is_only_comment_after_strip() {
        let parser = RequirementsTxtParser;
        // 인라인 주석 제거 후 빈 행이 되는 케이스는 건너뜀
        let components = parser.parse("   # only a comment", "requirements.txt").unwrap();
        assert!(components.is_empty());
    }
}
