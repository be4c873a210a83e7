//! Output formatting for snipcheck results.
//!
//! Supports three output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration

use colored::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::detect::{explain, explain_rule, Diagnostic, Language, Rule, Severity};

/// Diagnostics produced for one input.
#[derive(Debug, Clone)]
pub struct FileReport {
    /// Path of the input, or "-" for stdin.
    pub file: String,
    pub language: Language,
    pub diagnostics: Vec<Diagnostic>,
    /// Fixes applied before these diagnostics were computed.
    pub fixed: usize,
}

impl FileReport {
    /// Check if there are any error-severity diagnostics.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Diagnostics that are actual findings (not the success marker).
    pub fn findings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity != Severity::Success)
    }

    pub fn fixable_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_fixable()).count()
    }
}

// =============================================================================
// JSON Format
// =============================================================================

/// JSON report structure.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub files_checked: usize,
    pub errors: usize,
    pub warnings: usize,
    pub fixed: usize,
    pub files: Vec<JsonFile>,
}

/// Per-input entry of the JSON report.
#[derive(Serialize, Deserialize)]
pub struct JsonFile {
    pub file: String,
    pub language: String,
    pub diagnostics: Vec<JsonDiagnostic>,
}

/// JSON diagnostic structure.
#[derive(Serialize, Deserialize)]
pub struct JsonDiagnostic {
    pub rule: String,
    pub severity: String,
    pub line: usize,
    pub message: String,
    pub fixable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_line: Option<String>,
}

fn count_severity(files: &[FileReport], severity: Severity) -> usize {
    files
        .iter()
        .flat_map(|f| f.diagnostics.iter())
        .filter(|d| d.severity == severity)
        .count()
}

/// Build the JSON report for a set of results.
pub fn build_json(files: &[FileReport]) -> JsonReport {
    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        files_checked: files.len(),
        errors: count_severity(files, Severity::Error),
        warnings: count_severity(files, Severity::Warning),
        fixed: files.iter().map(|f| f.fixed).sum(),
        files: files
            .iter()
            .map(|f| JsonFile {
                file: f.file.clone(),
                language: f.language.to_string(),
                diagnostics: f.diagnostics.iter().map(diagnostic_to_json).collect(),
            })
            .collect(),
    }
}

/// Write results in JSON format.
pub fn write_json(files: &[FileReport]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&build_json(files))?;
    println!("{}", json);
    Ok(())
}

fn diagnostic_to_json(d: &Diagnostic) -> JsonDiagnostic {
    JsonDiagnostic {
        rule: d.rule.as_str().to_string(),
        severity: d.severity.to_string(),
        line: d.line,
        message: d.message.clone(),
        fixable: d.is_fixable(),
        original_line: d.original_line().map(str::to_string),
    }
}

// =============================================================================
// SARIF Format
// =============================================================================

const SARIF_VERSION: &str = "2.1.0";
const SARIF_SCHEMA: &str = "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";
const TOOL_NAME: &str = "snipcheck";

#[derive(Serialize, Deserialize)]
pub struct SarifReport {
    pub version: String,
    #[serde(rename = "$schema")]
    pub schema: String,
    pub runs: Vec<SarifRun>,
}

#[derive(Serialize, Deserialize)]
pub struct SarifRun {
    pub tool: SarifTool,
    pub results: Vec<SarifResult>,
}

#[derive(Serialize, Deserialize)]
pub struct SarifTool {
    pub driver: SarifDriver,
}

#[derive(Serialize, Deserialize)]
pub struct SarifDriver {
    pub name: String,
    pub version: String,
    pub rules: Vec<SarifRule>,
}

#[derive(Serialize, Deserialize)]
pub struct SarifRule {
    pub id: String,
    pub name: String,
    #[serde(rename = "shortDescription")]
    pub short_description: SarifMessage,
    #[serde(rename = "fullDescription")]
    pub full_description: SarifMessage,
    #[serde(rename = "defaultConfiguration")]
    pub default_config: SarifRuleConfig,
}

#[derive(Serialize, Deserialize)]
pub struct SarifRuleConfig {
    pub level: String,
}

#[derive(Serialize, Deserialize)]
pub struct SarifResult {
    #[serde(rename = "ruleId")]
    pub rule_id: String,
    pub level: String,
    pub message: SarifMessage,
    pub locations: Vec<SarifLocation>,
}

#[derive(Serialize, Deserialize)]
pub struct SarifMessage {
    pub text: String,
}

#[derive(Serialize, Deserialize)]
pub struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    pub physical_location: SarifPhysicalLocation,
}

#[derive(Serialize, Deserialize)]
pub struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    pub artifact_location: SarifArtifact,
    pub region: SarifRegion,
}

#[derive(Serialize, Deserialize)]
pub struct SarifArtifact {
    pub uri: String,
}

#[derive(Serialize, Deserialize)]
pub struct SarifRegion {
    #[serde(rename = "startLine")]
    pub start_line: usize,
}

/// Display name and one-line description for SARIF rule metadata.
fn rule_info(rule: Rule) -> (&'static str, &'static str) {
    match rule {
        Rule::MissingTerminator => (
            "MissingTerminator",
            "Statement is missing a trailing semicolon",
        ),
        Rule::UnusedDeclaration => ("UnusedDeclaration", "Variable is declared but never used"),
        Rule::MissingBlockColon => ("MissingBlockColon", "Block statement is missing its colon"),
        Rule::InvalidJson => ("InvalidJson", "Document is not valid JSON"),
        Rule::MissingDiscriminator => (
            "MissingDiscriminator",
            "Structured message root lacks the expected type tag",
        ),
        Rule::MissingRecommendedField => (
            "MissingRecommendedField",
            "Structured message lacks its alternative text",
        ),
        Rule::EmptyInput => ("EmptyInput", "Nothing to check"),
        Rule::Clean => ("Clean", "No problems found"),
    }
}

fn map_severity_to_level(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info | Severity::Success => "note",
    }
}

/// Build the SARIF report. Success markers are not results.
pub fn build_sarif(files: &[FileReport]) -> SarifReport {
    let findings: Vec<(&FileReport, &Diagnostic)> = files
        .iter()
        .flat_map(|f| f.findings().map(move |d| (f, d)))
        .collect();

    let rule_set: BTreeSet<&'static str> = findings.iter().map(|(_, d)| d.rule.as_str()).collect();

    let rules: Vec<SarifRule> = rule_set
        .iter()
        .filter_map(|id| Rule::parse(id))
        .map(|rule| {
            let (name, short) = rule_info(rule);
            SarifRule {
                id: rule.as_str().to_string(),
                name: name.to_string(),
                short_description: SarifMessage {
                    text: short.to_string(),
                },
                full_description: SarifMessage {
                    text: explain_rule(rule).to_string(),
                },
                default_config: SarifRuleConfig {
                    level: map_severity_to_level(rule.severity()).to_string(),
                },
            }
        })
        .collect();

    let results: Vec<SarifResult> = findings
        .iter()
        .map(|(f, d)| SarifResult {
            rule_id: d.rule.as_str().to_string(),
            level: map_severity_to_level(d.severity).to_string(),
            message: SarifMessage {
                text: d.message.clone(),
            },
            locations: vec![SarifLocation {
                physical_location: SarifPhysicalLocation {
                    artifact_location: SarifArtifact {
                        uri: f.file.replace('\\', "/"),
                    },
                    region: SarifRegion {
                        start_line: if d.line > 0 { d.line } else { 1 },
                    },
                },
            }],
        })
        .collect();

    SarifReport {
        version: SARIF_VERSION.to_string(),
        schema: SARIF_SCHEMA.to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: TOOL_NAME.to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    rules,
                },
            },
            results,
        }],
    }
}

/// Write results in SARIF format.
pub fn write_sarif(files: &[FileReport]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&build_sarif(files))?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in pretty (human-readable) format.
pub fn write_pretty(files: &[FileReport], show_explanations: bool) {
    println!();
    print!("  ");
    print!("{}", "snipcheck".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    for report in files {
        write_file(report, show_explanations);
        println!();
    }

    write_summary(files);
    println!();
}

fn write_file(report: &FileReport, show_explanations: bool) {
    print!("  {}", report.file.blue());
    println!("  {}", format!("({})", report.language).dimmed());

    if report.fixed > 0 {
        let plural = if report.fixed != 1 { "es" } else { "" };
        println!(
            "    {}",
            format!("applied {} fix{}", report.fixed, plural).green()
        );
    }

    for d in &report.diagnostics {
        write_severity_tag(d.severity);
        print!("{:<28}", d.rule.as_str().dimmed());
        if d.line > 0 {
            print!("{}", format!("line {}", d.line).dimmed());
        }
        if d.is_fixable() {
            print!("  {}", "[fixable]".cyan());
        }
        println!();
        println!("            {}", d.message);

        if show_explanations && d.severity != Severity::Success {
            println!("            {}", explain(d).italic().dimmed());
        }
    }
}

fn write_severity_tag(severity: Severity) {
    match severity {
        Severity::Error => print!("    {} ", "ERROR".red()),
        Severity::Warning => print!("    {} ", "WARN ".yellow()),
        Severity::Info => print!("    {} ", "INFO ".blue()),
        Severity::Success => print!("    {} ", "OK   ".green()),
    }
}

fn write_summary(files: &[FileReport]) {
    let errors = count_severity(files, Severity::Error);
    let warnings = count_severity(files, Severity::Warning);
    let fixable: usize = files.iter().map(FileReport::fixable_count).sum();

    if errors == 0 {
        print!("  {}", "✓ PASS".green());
    } else {
        print!("  {}", "✗ FAIL".red());
    }

    print!("  {} checked", files.len());
    print!("  {} errors", errors);
    print!("  {} warnings", warnings);
    if fixable > 0 {
        print!(
            "  {}",
            format!("({} fixable, rerun with --fix)", fixable).dimmed()
        );
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::FixKind;

    fn sample() -> Vec<FileReport> {
        vec![
            FileReport {
                file: "src\\app.js".to_string(),
                language: Language::JavaScript,
                diagnostics: vec![
                    Diagnostic::fixable(
                        Rule::MissingTerminator,
                        "missing",
                        2,
                        FixKind::AppendSemicolon,
                        "  x()",
                    ),
                    Diagnostic::new(Rule::UnusedDeclaration, "'y' is declared but never used", 3),
                ],
                fixed: 0,
            },
            FileReport {
                file: "ok.py".to_string(),
                language: Language::Python,
                diagnostics: vec![Diagnostic::clean()],
                fixed: 1,
            },
        ]
    }

    #[test]
    fn test_build_json() {
        let report = build_json(&sample());
        assert_eq!(report.files_checked, 2);
        assert_eq!(report.errors, 1);
        assert_eq!(report.warnings, 0);
        assert_eq!(report.fixed, 1);

        let first = &report.files[0].diagnostics[0];
        assert_eq!(first.rule, "missing_terminator");
        assert_eq!(first.severity, "error");
        assert!(first.fixable);
        assert_eq!(first.original_line.as_deref(), Some("  x()"));
        assert_eq!(report.files[1].diagnostics[0].severity, "success");
    }

    #[test]
    fn test_build_sarif_skips_success() {
        let sarif = build_sarif(&sample());
        let run = &sarif.runs[0];
        assert_eq!(run.results.len(), 2);
        assert_eq!(run.tool.driver.rules.len(), 2);
        assert_eq!(run.results[0].level, "error");
        assert_eq!(run.results[1].level, "note");
        assert_eq!(
            run.results[0].locations[0].physical_location.artifact_location.uri,
            "src/app.js"
        );
    }

    #[test]
    fn test_sarif_location_defaults_to_line_one() {
        let files = vec![FileReport {
            file: "-".to_string(),
            language: Language::Json,
            diagnostics: vec![Diagnostic::empty_input()],
            fixed: 0,
        }];
        let sarif = build_sarif(&files);
        assert_eq!(
            sarif.runs[0].results[0].locations[0].physical_location.region.start_line,
            1
        );
    }
}
