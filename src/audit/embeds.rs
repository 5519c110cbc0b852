// SPDX-License-Identifier: PMPL-1.0-or-later
//! Embedded content rules: iframe titles and inline SVG names

use super::{Issue, IssueKind, Rule};
use crate::extract::{Chunk, Role};

pub struct IframeNoTitle;

impl Rule for IframeNoTitle {
    fn name(&self) -> &str {
        "Iframe Without Title"
    }

    fn description(&self) -> &str {
        "Flags iframes with no title"
    }

    fn check(&self, chunks: &[Chunk]) -> Vec<Issue> {
        chunks
            .iter()
            .filter(|c| c.role == Role::Iframe && c.attr("title").is_empty())
            .map(|c| Issue::new(IssueKind::IframeNoTitle, c).with_detail("src", c.attr("src")))
            .collect()
    }
}

/// Graphics named by `aria-label` or hidden with `aria-hidden="true"` are resolved
pub fn graphic_is_resolved(chunk: &Chunk) -> bool {
    !chunk.attr("aria-label").is_empty() || chunk.attr("aria-hidden").eq_ignore_ascii_case("true")
}

pub struct SvgNoName;

impl Rule for SvgNoName {
    fn name(&self) -> &str {
        "SVG Without Name"
    }

    fn description(&self) -> &str {
        "Flags inline graphics with no discernible name"
    }

    fn check(&self, chunks: &[Chunk]) -> Vec<Issue> {
        chunks
            .iter()
            .filter(|c| c.role == Role::Graphic && c.text.is_empty() && !graphic_is_resolved(c))
            .map(|c| {
                Issue::new(IssueKind::SvgNoName, c)
                    .with_detail("reason", "Inline graphic without text or label")
            })
            .collect()
    }
}
