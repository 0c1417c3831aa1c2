#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`risk`]: 가중치 기반 위험도 산정 (`aggregate`, `calculate_risk_score`)
//! - [`report`]: PR 코멘트/체크 요약 생성 (`format_pr_comment`)
//!
//! # Architecture
//!
//! ```text
//! Vec<Finding> --+--> aggregate --> RiskScore --> format_pr_comment --> markdown
//! correlation  --+                          \--> format_check_summary --> text
//! ```

pub mod report;
pub mod risk;

// --- Public API Re-exports ---

pub use report::{check_passed, format_check_summary, format_pr_comment};
pub use risk::{RiskBreakdown, RiskScore, RiskThresholds, SeverityCounts, aggregate,
    calculate_risk_score};
