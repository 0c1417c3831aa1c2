//! 매니페스트 파서 — package.json, requirements.txt
//!
//! [`ManifestParser`] trait은 각 매니페스트 형식의 파서가 구현해야 하는
//! 인터페이스입니다. [`ManifestDetector`]는 파일명으로 지원 매니페스트를
//! 판별합니다 (확장자가 아니라 정확한 파일명 매칭).
//!
//! # 지원 형식
//!
//! - `package.json` (JSON) -- [`PackageJsonParser`]
//! - `requirements.txt` (행 단위 핀 파일) -- [`RequirementsTxtParser`]
//!
//! # 확장
//!
//! 새로운 형식을 지원하려면 `ManifestParser` trait을 구현하고
//! `ManifestDetector`에 파일명을 등록합니다.

pub mod npm;
pub mod pip;

use std::path::Path;

use aegis_core::error::SbomError;
use aegis_core::types::{Ecosystem, SbomComponent};

/// 매니페스트 파서 trait
///
/// 각 패키지 생태계의 매니페스트 형식을 파싱하여 컴포넌트 목록을 생성합니다.
pub trait ManifestParser: Send + Sync {
    /// 이 파서가 담당하는 생태계를 반환합니다.
    fn ecosystem(&self) -> Ecosystem;

    /// 주어진 경로의 파일을 이 파서가 처리할 수 있는지 확인합니다.
    ///
    /// 파일 이름으로 판별합니다 (예: "package.json", "requirements.txt").
    fn can_parse(&self, path: &Path) -> bool;

    /// 매니페스트 내용을 파싱하여 컴포넌트 목록을 반환합니다.
    ///
    /// # Arguments
    ///
    /// - `content`: 매니페스트 파일 내용 (UTF-8 문자열)
    /// - `source_path`: 원본 파일 경로 (에러 메시지용)
    fn parse(&self, content: &str, source_path: &str)
    -> Result<Vec<SbomComponent>, SbomError>;
}

/// 매니페스트 탐지기
///
/// 알려진 매니페스트 파일명 목록을 기반으로 파일명 매칭을 수행합니다.
pub struct ManifestDetector {
    /// 알려진 매니페스트 파일명 목록
    known_filenames: Vec<(String, Ecosystem)>,
}

impl ManifestDetector {
    /// 기본 매니페스트 패턴으로 탐지기를 생성합니다.
    pub fn new() -> Self {
        Self {
            known_filenames: vec![
                ("package.json".to_owned(), Ecosystem::Npm),
                ("requirements.txt".to_owned(), Ecosystem::PyPi),
            ],
        }
    }

    /// 알려진 매니페스트 파일명 목록을 반환합니다.
    pub fn known_filenames(&self) -> &[(String, Ecosystem)] {
        &self.known_filenames
    }

    /// 주어진 경로가 알려진 매니페스트인지 확인합니다.
    pub fn is_manifest(&self, path: &Path) -> bool {
        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return false,
        };

        self.known_filenames
            .iter()
            .any(|(known, _)| known == file_name)
    }

    /// 매니페스트의 생태계를 반환합니다.
    pub fn detect_ecosystem(&self, path: &Path) -> Option<Ecosystem> {
        let file_name = path.file_name().and_then(|n| n.to_str())?;

        self.known_filenames
            .iter()
            .find(|(known, _)| known == file_name)
            .map(|(_, eco)| *eco)
    }
}

impl Default for ManifestDetector {
    fn default() -> Self {
        Self::new()
    }
}
