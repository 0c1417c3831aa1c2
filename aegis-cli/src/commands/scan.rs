//! `aegis scan` command handler

use std::io::Write;
use std::path::Path;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use serde::Serialize;
use tracing::{info, warn};

use aegis_analyzer::CodebaseAnalyzer;
use aegis_core::metrics as metric_names;
use aegis_core::types::{ScanReport, Severity};
use aegis_sbom::SbomBuilder;
use aegis_triage::{RiskScore, RiskThresholds, aggregate, check_passed, format_check_summary};

use crate::cli::ScanArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render, table_header};

/// Execute the `scan` command.
///
/// Runs SBOM generation and code analysis over the target directory,
/// scores the combined result, and renders a report. Either stage may
/// fail independently; a failed stage degrades to an empty list so the
/// other stage's results still reach the user.
pub async fn execute(
    args: ScanArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let config = super::load_config(config_path).await?;
    let thresholds = RiskThresholds::from(&config.risk);
    let started = Instant::now();

    info!(path = %args.path.display(), sample = args.sample, "starting scan");

    // SBOM stage
    let sbom_root = args.path.clone();
    let max_manifest_bytes = config.sbom.max_manifest_bytes;
    let components = tokio::task::spawn_blocking(move || {
        SbomBuilder::new()
            .with_max_manifest_bytes(max_manifest_bytes)
            .generate(&sbom_root)
    })
    .await
    .map_err(|e| CliError::Command(format!("sbom task failed: {e}")))?
    .unwrap_or_else(|e| {
        warn!(error = %e, "sbom stage failed, continuing with empty component list");
        Vec::new()
    });

    // Analysis stage
    let analyze_root = args.path.clone();
    let max_file_bytes = config.analyzer.max_file_bytes;
    let sample_mode = args.sample;
    let findings = tokio::task::spawn_blocking(move || {
        CodebaseAnalyzer::new()
            .with_max_file_bytes(max_file_bytes)
            .analyze(&analyze_root, sample_mode)
    })
    .await
    .map_err(|e| CliError::Command(format!("analysis task failed: {e}")))?
    .unwrap_or_else(|e| {
        warn!(error = %e, "analysis stage failed, continuing with empty finding list");
        Vec::new()
    });

    // No vulnerability correlation in local mode; risk comes from findings alone
    let risk = aggregate(&findings, &[], &thresholds);

    let mut report = ScanReport::new(args.pr, args.commit.clone());
    report.sbom_components = components;
    report.findings = findings;

    counter!(
        metric_names::SCAN_COMPLETED_TOTAL,
        metric_names::LABEL_RESULT => report.status.to_string()
    )
    .increment(1);
    gauge!(metric_names::SCAN_RISK_SCORE).set(risk.score);
    histogram!(metric_names::SCAN_DURATION_SECONDS).record(started.elapsed().as_secs_f64());

    let check_summary = format_check_summary(&risk, 0, report.findings.len());
    let output = ScanOutput {
        path: args.path.display().to_string(),
        report,
        risk,
        check_summary,
    };

    writer.render(&output)?;

    // High risk gates CI (exit code 4)
    if !check_passed(&output.risk) {
        return Err(CliError::Scan(format!(
            "risk level {} (score {:.1})",
            output.risk.level.as_str().to_uppercase(),
            output.risk.score
        )));
    }

    Ok(())
}

#[derive(Serialize)]
pub struct ScanOutput {
    pub path: String,
    pub report: ScanReport,
    pub risk: RiskScore,
    pub check_summary: String,
}

impl Render for ScanOutput {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Scan: {}", self.path.bold())?;
        writeln!(
            w,
            "PR: #{}  Commit: {}",
            self.report.pr_number, self.report.commit_sha
        )?;
        writeln!(w, "Components: {}", self.report.sbom_components.len())?;
        writeln!(w)?;

        let risk_str = format!(
            "{} (score {:.1})",
            self.risk.level.as_str().to_uppercase(),
            self.risk.score
        );
        let risk_colored = match self.risk.level.as_str() {
            "high" => risk_str.red().bold(),
            "medium" => risk_str.yellow().bold(),
            _ => risk_str.green().bold(),
        };
        writeln!(w, "Risk: {}", risk_colored)?;
        writeln!(w)?;

        if self.report.findings.is_empty() {
            writeln!(w, "{}", "No findings.".green())?;
        } else {
            table_header(
                w,
                format_args!("{:<10} {:<10} {:<40} Message", "Rule", "Severity", "Location"),
                100,
            )?;

            for f in &self.report.findings {
                let severity = f.severity.as_str();
                let severity_colored = match f.severity {
                    Severity::Critical => severity.red().bold(),
                    Severity::High => severity.red(),
                    Severity::Medium => severity.yellow(),
                    Severity::Low => severity.normal(),
                    Severity::Info => severity.dimmed(),
                };
                let location = format!("{}:{}", f.file_path, f.line_number);

                writeln!(
                    w,
                    "{:<10} {:<10} {:<40} {}",
                    f.rule_id, severity_colored, location, f.message
                )?;
            }
        }

        Ok(())
    }
}
