// SPDX-License-Identifier: PMPL-1.0-or-later
//! Link rules: vague text, missing name, unsafe `target=_blank`, and anchors
//! used as buttons

use super::{Issue, IssueKind, Rule};
use crate::extract::{Chunk, Role};

/// Link texts that say nothing about the destination
pub const VAGUE_LINK_TEXT: &[&str] = &[
    "click here",
    "read more",
    "more",
    "here",
    "details",
    "link",
    "this",
    "go",
    "open",
    "continue",
];

/// Tokens `rel` must contain on links that open a new browsing context
pub const REQUIRED_REL: &[&str] = &["noopener", "noreferrer"];

pub fn is_vague_link_text(text: &str) -> bool {
    let text = text.trim().to_lowercase();
    VAGUE_LINK_TEXT.contains(&text.as_str())
}

fn links(chunks: &[Chunk]) -> impl Iterator<Item = &Chunk> {
    chunks.iter().filter(|c| c.role == Role::Link)
}

pub struct PoorLinkText;

impl Rule for PoorLinkText {
    fn name(&self) -> &str {
        "Poor Link Text"
    }

    fn description(&self) -> &str {
        "Flags links whose text does not describe the destination"
    }

    fn check(&self, chunks: &[Chunk]) -> Vec<Issue> {
        links(chunks)
            .filter(|c| is_vague_link_text(&c.text))
            .map(|c| Issue::new(IssueKind::PoorLinkText, c).with_detail("text", c.text.as_str()))
            .collect()
    }
}

pub struct LinkNoName;

impl Rule for LinkNoName {
    fn name(&self) -> &str {
        "Link Without Name"
    }

    fn description(&self) -> &str {
        "Flags links with no text, aria-label, title, or image alt"
    }

    fn check(&self, chunks: &[Chunk]) -> Vec<Issue> {
        links(chunks)
            .filter(|c| {
                c.text.is_empty()
                    && c.attr("aria-label").is_empty()
                    && c.attr("title").is_empty()
                    && c.attr("img-alt").is_empty()
            })
            .map(|c| Issue::new(IssueKind::LinkNoName, c).with_detail("href", c.attr("href")))
            .collect()
    }
}

pub struct BlankTargetNoRel;

impl Rule for BlankTargetNoRel {
    fn name(&self) -> &str {
        "Blank Target Without Rel"
    }

    fn description(&self) -> &str {
        "Flags target=_blank links missing rel=\"noopener noreferrer\""
    }

    fn check(&self, chunks: &[Chunk]) -> Vec<Issue> {
        links(chunks)
            .filter(|c| c.attr("target").eq_ignore_ascii_case("_blank"))
            .filter(|c| {
                let rel = c.tokens("rel");
                !REQUIRED_REL.iter().all(|req| rel.iter().any(|t| t == req))
            })
            .map(|c| {
                Issue::new(IssueKind::BlankTargetNoRel, c)
                    .with_detail("href", c.attr("href"))
                    .with_detail("rel", c.tokens("rel").join(" "))
            })
            .collect()
    }
}

pub struct AnchorActsButton;

impl Rule for AnchorActsButton {
    fn name(&self) -> &str {
        "Anchor Acting As Button"
    }

    fn description(&self) -> &str {
        "Flags anchors with no navigation target"
    }

    fn check(&self, chunks: &[Chunk]) -> Vec<Issue> {
        links(chunks)
            .filter(|c| c.attr("href").is_empty())
            .map(|c| Issue::new(IssueKind::AActsButton, c).with_detail("text", c.text.as_str()))
            .collect()
    }
}
