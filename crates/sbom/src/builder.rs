//! SBOM 생성기 — 디렉토리 순회 + 파서 호출 + 중복 제거
//!
//! [`SbomBuilder`]는 루트 디렉토리를 재귀 순회하며 알려진 매니페스트를
//! 찾아 파싱하고, (name, version, ecosystem) 트리플로 중복을 제거한
//! 컴포넌트 목록을 만듭니다.
//!
//! 파일 한 개의 실패는 경고 후 건너뜁니다. 루트가 없거나 디렉토리가
//! 아닌 경우만 [`SbomError::InvalidRoot`]로 실패합니다.

use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;

use metrics::{counter, histogram};
use tracing::{debug, warn};
use walkdir::WalkDir;

use aegis_core::error::SbomError;
use aegis_core::metrics as metric_names;
use aegis_core::types::SbomComponent;

use crate::parser::npm::PackageJsonParser;
use crate::parser::pip::RequirementsTxtParser;
use crate::parser::{ManifestDetector, ManifestParser};

/// 매니페스트 파일 최대 크기 기본값 (1MB)
const DEFAULT_MAX_MANIFEST_BYTES: u64 = 1024 * 1024;

/// SBOM 생성기
pub struct SbomBuilder {
    detector: ManifestDetector,
    parsers: Vec<Box<dyn ManifestParser>>,
    max_manifest_bytes: u64,
}

impl SbomBuilder {
    /// 기본 파서(package.json, requirements.txt)로 생성기를 만듭니다.
    pub fn new() -> Self {
        Self {
            detector: ManifestDetector::new(),
            parsers: vec![Box::new(PackageJsonParser), Box::new(RequirementsTxtParser)],
            max_manifest_bytes: DEFAULT_MAX_MANIFEST_BYTES,
        }
    }

    /// 매니페스트 파일 크기 상한을 변경합니다.
    pub fn with_max_manifest_bytes(mut self, max: u64) -> Self {
        self.max_manifest_bytes = max;
        self
    }

    /// 디렉토리 트리에서 SBOM을 생성합니다.
    ///
    /// 매니페스트가 하나도 없으면 빈 목록을 반환합니다 (에러 아님).
    /// 순회는 파일명 정렬 순서라 같은 트리에 대해 항상 같은 결과를 냅니다.
    pub fn generate(&self, root: impl AsRef<Path>) -> Result<Vec<SbomComponent>, SbomError> {
        let root = root.as_ref();
        let started = Instant::now();

        let meta = std::fs::metadata(root).map_err(|e| SbomError::InvalidRoot {
            path: root.display().to_string(),
            reason: e.to_string(),
        })?;
        if !meta.is_dir() {
            return Err(SbomError::InvalidRoot {
                path: root.display().to_string(),
                reason: "not a directory".to_owned(),
            });
        }

        let mut raw_components = Vec::new();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!(error = %e, "failed to access directory entry, skipping");
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file() || !self.detector.is_manifest(path) {
                continue;
            }

            if let Ok(file_meta) = entry.metadata()
                && file_meta.len() > self.max_manifest_bytes
            {
                warn!(
                    path = %path.display(),
                    size = file_meta.len(),
                    max = self.max_manifest_bytes,
                    "manifest exceeds size limit, skipping"
                );
                continue;
            }

            let content = match std::fs::read_to_string(path) {
                Ok(c) => c,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to read manifest, skipping");
                    counter!(metric_names::SBOM_PARSE_ERRORS_TOTAL).increment(1);
                    continue;
                }
            };

            let Some(parser) = self.parsers.iter().find(|p| p.can_parse(path)) else {
                continue;
            };

            let source_path = path.display().to_string();
            match parser.parse(&content, &source_path) {
                Ok(components) => {
                    debug!(
                        path = %path.display(),
                        count = components.len(),
                        "parsed manifest"
                    );
                    counter!(
                        metric_names::SBOM_MANIFESTS_PARSED_TOTAL,
                        metric_names::LABEL_ECOSYSTEM => parser.ecosystem().purl_type()
                    )
                    .increment(1);
                    raw_components.extend(components);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to parse manifest, skipping");
                    counter!(metric_names::SBOM_PARSE_ERRORS_TOTAL).increment(1);
                }
            }
        }

        let components = dedup_components(raw_components);
        for component in &components {
            counter!(
                metric_names::SBOM_COMPONENTS_TOTAL,
                metric_names::LABEL_ECOSYSTEM => component.ecosystem.purl_type()
            )
            .increment(1);
        }
        histogram!(metric_names::SBOM_BUILD_DURATION_SECONDS)
            .record(started.elapsed().as_secs_f64());

        Ok(components)
    }
}

impl Default for SbomBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// (name, version, ecosystem) 트리플로 중복을 제거합니다. 최초 등장 순서 유지.
fn dedup_components(components: Vec<SbomComponent>) -> Vec<SbomComponent> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    let mut dropped = 0_u64;

    for component in components {
        if seen.insert(component.dedup_key()) {
            unique.push(component);
        } else {
            dropped += 1;
        }
    }

    if dropped > 0 {
        counter!(metric_names::SBOM_DUPLICATES_DROPPED_TOTAL).increment(dropped);
    }
    unique
}
