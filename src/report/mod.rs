// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report generation for audit and remediation results.
//!
//! Supports multiple output formats:
//! - Text: human-readable issues grouped by severity, plus applied fixes
//! - JSON: issues, summary, and fix records for downstream storage
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration

use crate::audit::{Issue, Severity};
use crate::pipeline::IssueSummary;
use crate::remediate::{FixOutcome, RemediationReport};
use serde::Serialize;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI integration
    Sarif,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Sarif => write!(f, "sarif"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "sarif" => Ok(OutputFormat::Sarif),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Results for one document
#[derive(Debug, Serialize)]
pub struct PageReport<'a> {
    /// File name or URL the document came from
    pub source: &'a str,
    pub summary: IssueSummary,
    pub issues: &'a [Issue],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<&'a RemediationReport>,
}

impl<'a> PageReport<'a> {
    pub fn new(source: &'a str, issues: &'a [Issue], remediation: Option<&'a RemediationReport>) -> Self {
        Self {
            source,
            summary: IssueSummary::from_issues(issues),
            issues,
            remediation,
        }
    }
}

/// Generate a report for one document
pub fn generate_report(page: &PageReport<'_>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => generate_text_report(page),
        OutputFormat::Json => generate_json_report(page),
        OutputFormat::Sarif => generate_sarif_report(page),
    }
}

/// Generate human-readable text report
fn generate_text_report(page: &PageReport<'_>) -> String {
    let mut output = String::new();

    output.push_str(&format!("=== Remedybot Accessibility Report: {} ===\n\n", page.source));

    if page.issues.is_empty() {
        output.push_str("No accessibility issues found. All checks passed.\n");
        return output;
    }

    let summary = page.summary;
    output.push_str(&format!(
        "Found {} issue(s): {} high, {} medium, {} low\n\n",
        summary.total(),
        summary.high,
        summary.medium,
        summary.low
    ));

    for severity in [Severity::High, Severity::Medium, Severity::Low] {
        let issues: Vec<&Issue> = page.issues.iter().filter(|i| i.severity == severity).collect();
        if issues.is_empty() {
            continue;
        }

        output.push_str(&format!("--- {} ({}) ---\n", severity, issues.len()));
        for issue in issues {
            output.push_str(&format!("[{}] {}\n", issue.kind, issue.source.path));
            for (key, value) in &issue.details {
                let value = value.as_str().map(str::to_string).unwrap_or_else(|| value.to_string());
                output.push_str(&format!("  {}: {}\n", key, value));
            }
        }
        output.push('\n');
    }

    if let Some(remediation) = page.remediation {
        output.push_str(&format!(
            "--- Remediation: {} applied, {} skipped ---\n",
            remediation.applied(),
            remediation.skipped()
        ));
        for record in &remediation.records {
            match &record.outcome {
                FixOutcome::Applied(detail) => {
                    output.push_str(&format!("  fixed   [{}] {}\n", record.kind, detail))
                }
                FixOutcome::Skipped(reason) => {
                    output.push_str(&format!("  skipped [{}] {}\n", record.kind, reason))
                }
            }
        }
    }

    output
}

/// Generate JSON report
fn generate_json_report(page: &PageReport<'_>) -> String {
    serde_json::to_string_pretty(page).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize report: {}\"}}", e)
    })
}

/// SARIF report structure (simplified)
#[derive(Debug, Serialize)]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Debug, Serialize)]
struct SarifDriver {
    name: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: String,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
}

#[derive(Debug, Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Debug, Serialize)]
struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    physical_location: SarifPhysicalLocation,
    #[serde(rename = "logicalLocations")]
    logical_locations: Vec<SarifLogicalLocation>,
}

#[derive(Debug, Serialize)]
struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: SarifArtifactLocation,
}

#[derive(Debug, Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

/// Structural path of the element within the document
#[derive(Debug, Serialize)]
struct SarifLogicalLocation {
    #[serde(rename = "fullyQualifiedName")]
    fully_qualified_name: String,
    kind: String,
}

/// Generate SARIF report
fn generate_sarif_report(page: &PageReport<'_>) -> String {
    let results: Vec<SarifResult> = page
        .issues
        .iter()
        .map(|issue| {
            let level = match issue.severity {
                Severity::High => "error",
                Severity::Medium => "warning",
                Severity::Low => "note",
            };
            let reason = issue.detail_str("reason");
            let text = if reason.is_empty() {
                format!("{} on <{}>", issue.kind, issue.source.role)
            } else {
                reason.to_string()
            };

            SarifResult {
                rule_id: issue.kind.to_string(),
                level: level.to_string(),
                message: SarifMessage { text },
                locations: vec![SarifLocation {
                    physical_location: SarifPhysicalLocation {
                        artifact_location: SarifArtifactLocation {
                            uri: page.source.to_string(),
                        },
                    },
                    logical_locations: vec![SarifLogicalLocation {
                        fully_qualified_name: issue.source.path.clone(),
                        kind: "element".to_string(),
                    }],
                }],
            }
        })
        .collect();

    let report = SarifReport {
        schema: "https://json.schemastore.org/sarif-2.1.0.json".to_string(),
        version: "2.1.0".to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "remedybot".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                },
            },
            results,
        }],
    };

    serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize SARIF report: {}\"}}", e)
    })
}
