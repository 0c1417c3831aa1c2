#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`rules`]: 언어별 규칙 테이블 (`Rule`, `Language`, `StructuralCheck`)
//! - [`pattern`]: 행 단위 정규식 스캐너 (`PatternScanner`)
//! - [`syntax`]: 구문 트리 스캐너 (`SyntaxScanner`)
//! - [`analyzer`]: 트리 오케스트레이터 (`CodebaseAnalyzer`)
//!
//! # Architecture
//!
//! ```text
//! root dir --> extension routing --> PatternScanner --+--> Vec<Finding>
//!                    (.py)      \--> SyntaxScanner ---+
//!                (.js .jsx .ts .tsx) --> PatternScanner
//! ```

pub mod analyzer;
pub mod pattern;
pub mod rules;
pub mod syntax;

// --- Public API Re-exports ---

pub use analyzer::CodebaseAnalyzer;
pub use pattern::PatternScanner;
pub use rules::{Language, Rule, StructuralCheck, rules_for};
pub use syntax::SyntaxScanner;
