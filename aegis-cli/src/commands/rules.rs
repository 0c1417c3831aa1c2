//! `aegis rules` command handler

use std::io::Write;

use serde::Serialize;

use aegis_analyzer::{Language, rules_for};

use crate::cli::{RulesAction, RulesArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render, table_header};

/// Execute the `rules` command.
pub async fn execute(args: RulesArgs, writer: &OutputWriter) -> Result<(), CliError> {
    match args.action {
        RulesAction::List { language } => execute_list(language, writer),
    }
}

fn execute_list(language_filter: Option<String>, writer: &OutputWriter) -> Result<(), CliError> {
    let languages: Vec<Language> = match language_filter {
        Some(name) => vec![parse_language(&name)?],
        None => vec![Language::Python, Language::JavaScript],
    };

    let rules: Vec<RuleEntry> = languages
        .iter()
        .flat_map(|language| {
            rules_for(*language).iter().map(|rule| RuleEntry {
                id: rule.id.to_owned(),
                language: language.as_str().to_owned(),
                severity: rule.severity.as_str().to_owned(),
                pattern: rule.pattern.as_str().to_owned(),
                structural: rule.structural.is_some(),
                message: rule.message.to_owned(),
            })
        })
        .collect();

    let report = RuleListOutput {
        total: rules.len(),
        rules,
    };

    writer.render(&report)?;

    Ok(())
}

fn parse_language(s: &str) -> Result<Language, CliError> {
    match s.to_lowercase().as_str() {
        "python" | "py" => Ok(Language::Python),
        "javascript" | "js" => Ok(Language::JavaScript),
        _ => Err(CliError::Command(format!(
            "invalid language: {} (expected: python, javascript)",
            s
        ))),
    }
}

#[derive(Serialize)]
pub struct RuleListOutput {
    pub total: usize,
    pub rules: Vec<RuleEntry>,
}

#[derive(Serialize)]
pub struct RuleEntry {
    pub id: String,
    pub language: String,
    pub severity: String,
    pub pattern: String,
    pub structural: bool,
    pub message: String,
}

impl Render for RuleListOutput {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Detection rules: {}", self.total)?;
        writeln!(w)?;
        table_header(
            w,
            format_args!(
                "{:<8} {:<12} {:<10} {:<12} Message",
                "ID", "Language", "Severity", "Structural"
            ),
            100,
        )?;

        for rule in &self.rules {
            let severity_colored = match rule.severity.as_str() {
                "critical" | "high" => rule.severity.red(),
                "medium" => rule.severity.yellow(),
                _ => rule.severity.normal(),
            };
            writeln!(
                w,
                "{:<8} {:<12} {:<10} {:<12} {}",
                rule.id,
                rule.language,
                severity_colored,
                if rule.structural { "yes" } else { "no" },
                rule.message
            )?;
        }

        Ok(())
    }
}
