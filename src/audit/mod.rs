// SPDX-License-Identifier: PMPL-1.0-or-later
//! Audit rules over the extracted chunk list.
//!
//! Each rule is a pure function of the chunk slice, so rules may run in any
//! order or in parallel. [`audit`] runs them in a fixed order and
//! concatenates their output, which keeps issue order deterministic.

pub mod controls;
pub mod embeds;
pub mod headings;
pub mod images;
pub mod issue;
pub mod links;
pub mod page;

pub use issue::{Issue, IssueKind, Severity};

use crate::extract::Chunk;
use tracing::debug;

/// Trait implemented by all audit rules
pub trait Rule: Send + Sync {
    /// Human-readable name of this rule
    fn name(&self) -> &str;

    /// Short description of what this rule checks
    fn description(&self) -> &str;

    /// Inspect the chunk list and return issues in chunk order
    fn check(&self, chunks: &[Chunk]) -> Vec<Issue>;
}

/// Every rule, in issue-emission order
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(images::MissingAlt),
        Box::new(headings::HeadingOrder),
        Box::new(links::PoorLinkText),
        Box::new(links::LinkNoName),
        Box::new(links::BlankTargetNoRel),
        Box::new(controls::ControlNoLabel),
        Box::new(embeds::IframeNoTitle),
        Box::new(embeds::SvgNoName),
        Box::new(links::AnchorActsButton),
        Box::new(page::PageRules),
    ]
}

/// Run all rules over a chunk list
pub fn audit(chunks: &[Chunk]) -> Vec<Issue> {
    audit_with(&default_rules(), chunks)
}

/// Run a specific rule set over a chunk list
pub fn audit_with(rules: &[Box<dyn Rule>], chunks: &[Chunk]) -> Vec<Issue> {
    let mut issues = Vec::new();
    for rule in rules {
        let found = rule.check(chunks);
        if !found.is_empty() {
            debug!(rule = rule.name(), issues = found.len(), "Rule flagged chunks");
        }
        issues.extend(found);
    }
    issues
}
