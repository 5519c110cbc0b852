// SPDX-License-Identifier: PMPL-1.0-or-later
//! Document-level rules, evaluated on the single `document` chunk.
//!
//! One issue per unmet condition; missing landmarks produce one issue per
//! landmark (`main`, then `nav`).

use super::{Issue, IssueKind, Rule};
use crate::extract::{Chunk, Role};

/// Landmarks every page should expose, in emission order
pub const LANDMARKS: &[&str] = &["main", "nav"];

pub struct PageRules;

impl Rule for PageRules {
    fn name(&self) -> &str {
        "Page Structure"
    }

    fn description(&self) -> &str {
        "Flags missing title, viewport, charset, lang, skip link, and landmarks"
    }

    fn check(&self, chunks: &[Chunk]) -> Vec<Issue> {
        let mut issues = Vec::new();
        let Some(page) = chunks.iter().find(|c| c.role == Role::Document) else {
            return issues;
        };

        let conditions = [
            ("has_title", IssueKind::MissingTitle, "Document has no <title>"),
            ("has_viewport", IssueKind::MissingViewport, "No viewport meta tag"),
            ("has_charset", IssueKind::MissingCharset, "No charset declaration"),
            ("has_lang", IssueKind::MissingLang, "Root element has no lang attribute"),
            ("has_skiplink", IssueKind::MissingSkiplink, "No skip-navigation link"),
        ];
        for (flag, kind, reason) in conditions {
            if !page.flag(flag) {
                issues.push(Issue::new(kind, page).with_detail("reason", reason));
            }
        }

        for landmark in LANDMARKS {
            if !page.flag(&format!("has_{}", landmark)) {
                issues.push(Issue::new(IssueKind::MissingLandmarks, page).with_detail("missing", *landmark));
            }
        }

        issues
    }
}
