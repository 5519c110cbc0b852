// SPDX-License-Identifier: PMPL-1.0-or-later
//! Remediation engine.
//!
//! Applies one structural patch per issue, in issue order, to the original
//! tree. Later fixes see the edits of earlier ones. Fixes only add or edit
//! attributes, wrap elements, insert elements, or rename tags. A target that
//! cannot be found (or is already fixed) is a logged no-op, never an error.

pub mod controls;
pub mod embeds;
pub mod headings;
pub mod images;
pub mod links;
pub mod locate;
pub mod page;

use crate::audit::{Issue, IssueKind};
use crate::config::Config;
use crate::dom::Document;
use crate::labels::LabelGenerator;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Result of applying the fix for one issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum FixOutcome {
    /// The tree was changed; the string describes the edit
    Applied(String),
    /// Nothing to do: target not found or already satisfied
    Skipped(String),
}

impl FixOutcome {
    pub(crate) fn applied(detail: impl Into<String>) -> Self {
        FixOutcome::Applied(detail.into())
    }

    pub(crate) fn skipped(reason: impl Into<String>) -> Self {
        FixOutcome::Skipped(reason.into())
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, FixOutcome::Applied(_))
    }
}

/// One line of the remediation report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixRecord {
    pub kind: IssueKind,
    /// Structural path of the issue's source chunk
    pub path: String,
    pub outcome: FixOutcome,
}

/// What the engine did for each issue, in issue order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemediationReport {
    pub records: Vec<FixRecord>,
}

impl RemediationReport {
    pub fn applied(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_applied()).count()
    }

    pub fn skipped(&self) -> usize {
        self.records.len() - self.applied()
    }
}

/// Shared context handed to every fixer
pub struct Remediator<'a> {
    pub config: &'a Config,
    pub generator: &'a dyn LabelGenerator,
}

impl Remediator<'_> {
    pub(crate) fn depth(&self) -> usize {
        self.config.extraction.path_depth
    }
}

/// Apply fixes for `issues` to `doc`, in order
pub async fn remediate(
    doc: &mut Document,
    issues: &[Issue],
    config: &Config,
    generator: &dyn LabelGenerator,
) -> RemediationReport {
    let ctx = Remediator { config, generator };
    let mut report = RemediationReport::default();

    for issue in issues {
        let outcome = match issue.kind {
            IssueKind::MissingAlt => images::fix_missing_alt(&ctx, doc, issue).await,
            IssueKind::BadHeadingOrder => headings::fix_heading_order(&ctx, doc, issue),
            IssueKind::PoorLinkText => links::fix_poor_link_text(&ctx, doc, issue),
            IssueKind::LinkNoName => links::fix_link_no_name(&ctx, doc, issue),
            IssueKind::BlankTargetNoRel => links::fix_blank_target(&ctx, doc, issue),
            IssueKind::AActsButton => links::fix_anchor_button(&ctx, doc, issue),
            IssueKind::ControlNoLabel => controls::fix_control_label(&ctx, doc, issue),
            IssueKind::IframeNoTitle => embeds::fix_iframe_title(&ctx, doc, issue),
            IssueKind::SvgNoName => embeds::fix_svg_name(&ctx, doc, issue),
            IssueKind::MissingTitle
            | IssueKind::MissingViewport
            | IssueKind::MissingCharset
            | IssueKind::MissingLang
            | IssueKind::MissingSkiplink
            | IssueKind::MissingLandmarks => page::fix_page(&ctx, doc, issue),
        };

        match &outcome {
            FixOutcome::Applied(detail) => {
                debug!(kind = %issue.kind, path = %issue.source.path, %detail, "Applied fix")
            }
            FixOutcome::Skipped(reason) => {
                debug!(kind = %issue.kind, path = %issue.source.path, %reason, "No-op fix")
            }
        }

        report.records.push(FixRecord {
            kind: issue.kind,
            path: issue.source.path.clone(),
            outcome,
        });
    }

    info!(
        applied = report.applied(),
        skipped = report.skipped(),
        "Remediation complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::audit;
    use crate::extract::extract;
    use crate::labels::DisabledGenerator;

    async fn fix(html: &str) -> (Document, RemediationReport) {
        let config = Config::default();
        let mut doc = Document::parse(html).unwrap();
        let issues = audit(&extract(&doc, &config.extraction));
        let report = remediate(&mut doc, &issues, &config, &DisabledGenerator).await;
        (doc, report)
    }

    #[tokio::test]
    async fn test_second_pass_finds_nothing_new() {
        let html = r#"<html><body><h1>A</h1><h3>B</h3><img src="a.png"><a href="/plans/pro-tier">more</a>
            <a href="/x" target="_blank">Docs</a><iframe src="/v"></iframe><input name="q"></body></html>"#;
        let (doc, report) = fix(html).await;
        assert!(report.applied() > 0);

        let config = Config::default();
        let remaining = audit(&extract(&doc, &config.extraction));
        assert!(remaining.is_empty(), "still flagged: {:?}", remaining.iter().map(|i| i.kind).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_duplicate_issue_is_noop() {
        let config = Config::default();
        let mut doc = Document::parse(r#"<iframe src="/v"></iframe>"#).unwrap();
        let mut issues = audit(&extract(&doc, &config.extraction));
        issues.retain(|i| i.kind == IssueKind::IframeNoTitle);
        issues.push(issues[0].clone());

        let report = remediate(&mut doc, &issues, &config, &DisabledGenerator).await;
        assert_eq!(report.applied(), 1);
        assert_eq!(report.skipped(), 1);
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_string(&FixOutcome::applied("title=\"x\"")).unwrap();
        assert_eq!(json, r#"{"status":"applied","detail":"title=\"x\""}"#);
    }
}
