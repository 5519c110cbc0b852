// SPDX-License-Identifier: PMPL-1.0-or-later
//! Issue vocabulary.
//!
//! Kind and severity strings are the contract with downstream storage and
//! reporting consumers. Do not rename a variant's wire name without a
//! compatibility note.

use crate::extract::Chunk;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Severity levels for issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "LOW"),
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::High => write!(f, "HIGH"),
        }
    }
}

/// Closed set of rule violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueKind {
    MissingAlt,
    BadHeadingOrder,
    PoorLinkText,
    LinkNoName,
    BlankTargetNoRel,
    ControlNoLabel,
    IframeNoTitle,
    SvgNoName,
    AActsButton,
    MissingTitle,
    MissingViewport,
    MissingCharset,
    MissingLang,
    MissingSkiplink,
    MissingLandmarks,
}

impl IssueKind {
    pub const ALL: [IssueKind; 15] = [
        IssueKind::MissingAlt,
        IssueKind::BadHeadingOrder,
        IssueKind::PoorLinkText,
        IssueKind::LinkNoName,
        IssueKind::BlankTargetNoRel,
        IssueKind::ControlNoLabel,
        IssueKind::IframeNoTitle,
        IssueKind::SvgNoName,
        IssueKind::AActsButton,
        IssueKind::MissingTitle,
        IssueKind::MissingViewport,
        IssueKind::MissingCharset,
        IssueKind::MissingLang,
        IssueKind::MissingSkiplink,
        IssueKind::MissingLandmarks,
    ];

    /// Wire name, e.g. `MISSING_ALT`
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::MissingAlt => "MISSING_ALT",
            IssueKind::BadHeadingOrder => "BAD_HEADING_ORDER",
            IssueKind::PoorLinkText => "POOR_LINK_TEXT",
            IssueKind::LinkNoName => "LINK_NO_NAME",
            IssueKind::BlankTargetNoRel => "BLANK_TARGET_NO_REL",
            IssueKind::ControlNoLabel => "CONTROL_NO_LABEL",
            IssueKind::IframeNoTitle => "IFRAME_NO_TITLE",
            IssueKind::SvgNoName => "SVG_NO_NAME",
            IssueKind::AActsButton => "A_ACTS_BUTTON",
            IssueKind::MissingTitle => "MISSING_TITLE",
            IssueKind::MissingViewport => "MISSING_VIEWPORT",
            IssueKind::MissingCharset => "MISSING_CHARSET",
            IssueKind::MissingLang => "MISSING_LANG",
            IssueKind::MissingSkiplink => "MISSING_SKIPLINK",
            IssueKind::MissingLandmarks => "MISSING_LANDMARKS",
        }
    }

    /// Severity every rule assigns to this kind
    pub fn severity(&self) -> Severity {
        match self {
            IssueKind::MissingAlt
            | IssueKind::LinkNoName
            | IssueKind::ControlNoLabel
            | IssueKind::MissingTitle
            | IssueKind::MissingLang => Severity::Medium,
            _ => Severity::Low,
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A flagged rule violation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub severity: Severity,
    /// Kind-specific diagnostic fields
    pub details: BTreeMap<String, Value>,
    /// Snapshot of the chunk that triggered the issue
    pub source: Chunk,
}

impl Issue {
    /// Create an issue with the kind's standard severity
    pub fn new(kind: IssueKind, source: &Chunk) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            details: BTreeMap::new(),
            source: source.clone(),
        }
    }

    pub fn with_detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }

    /// String detail, empty when absent or not a string
    pub fn detail_str(&self, key: &str) -> &str {
        self.details.get(key).and_then(Value::as_str).unwrap_or("")
    }
}
