#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`version`]: 버전 범위 정규화 (`normalize_version_range`)
//! - [`parser`]: 매니페스트 파서 (`ManifestParser` trait, `PackageJsonParser`, `RequirementsTxtParser`)
//! - [`builder`]: SBOM 생성 오케스트레이터 (`SbomBuilder`)
//!
//! # Architecture
//!
//! ```text
//! root dir --> ManifestDetector --> ManifestParser --> Vec<SbomComponent>
//!                                                            |
//!                                                      dedup (name, version, ecosystem)
//!                                                            |
//!                                                      Vec<SbomComponent>
//! ```

pub mod builder;
pub mod parser;
pub mod version;

// --- Public API Re-exports ---

pub use builder::SbomBuilder;
pub use parser::npm::PackageJsonParser;
pub use parser::pip::RequirementsTxtParser;
pub use parser::{ManifestDetector, ManifestParser};
pub use version::normalize_version_range;
