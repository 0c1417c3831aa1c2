//! package.json 파서
//!
//! [`PackageJsonParser`]는 npm의 package.json 파일에서 의존성 세 종류를
//! 병합하여 컴포넌트 목록을 생성합니다.
//!
//! # package.json 형식 예시
//!
//! ```json
//! {
//!   "name": "my-app",
//!   "dependencies": { "left-pad": "^1.3.0" },
//!   "devDependencies": { "jest": "~29.0.0" },
//!   "peerDependencies": { "react": ">=17.0.0" }
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;

use aegis_core::error::SbomError;
use aegis_core::types::{Ecosystem, SbomComponent};

use crate::parser::ManifestParser;
use crate::version::normalize_version_range;

/// package.json 파서
///
/// dependencies, devDependencies, peerDependencies를 이 순서로 병합합니다.
/// 이름이 충돌하면 나중에 병합된 쪽이 이깁니다 (peer > dev > runtime).
pub struct PackageJsonParser;

/// package.json 구조 (파싱용)
#[derive(Deserialize)]
struct PackageJson {
    #[serde(default)]
    dependencies: Option<HashMap<String, String>>,
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: Option<HashMap<String, String>>,
    #[serde(default, rename = "peerDependencies")]
    peer_dependencies: Option<HashMap<String, String>>,
}

impl ManifestParser for PackageJsonParser {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Npm
    }

    fn can_parse(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name == "package.json")
    }

    fn parse(
        &self,
        content: &str,
        source_path: &str,
    ) -> Result<Vec<SbomComponent>, SbomError> {
        let manifest: PackageJson =
            serde_json::from_str(content).map_err(|e| SbomError::ManifestParse {
                path: source_path.to_owned(),
                reason: e.to_string(),
            })?;

        // 병합 순서: runtime -> dev -> peer. BTreeMap이라 출력은 이름순.
        let mut merged: BTreeMap<String, String> = BTreeMap::new();
        for deps in [
            manifest.dependencies,
            manifest.dev_dependencies,
            manifest.peer_dependencies,
        ]
        .into_iter()
        .flatten()
        {
            for (name, spec) in deps {
                merged.insert(name, spec);
            }
        }

        let components = merged
            .into_iter()
            .map(|(name, spec)| {
                SbomComponent::new(name, normalize_version_range(&spec), Ecosystem::Npm)
            })
            .collect();

        Ok(components)
    }
}
