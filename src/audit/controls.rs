// SPDX-License-Identifier: PMPL-1.0-or-later
//! Form control labelling rule
//!
//! Button-like controls are named by their visible text or `aria-label`.
//! Every other control needs `aria-label`, `aria-labelledby`, or an `id`
//! (which a `<label for>` may reference). Hidden inputs are exempt.

use super::{Issue, IssueKind, Rule};
use crate::extract::{is_button_control, Chunk, Role};

/// Input types that are never presented to the user
const EXEMPT_INPUT_TYPES: &[&str] = &["hidden"];

pub struct ControlNoLabel;

fn is_unlabelled(chunk: &Chunk) -> bool {
    let tag = chunk.attr("tag");
    let input_type = chunk.attr("type");
    if tag == "input" && EXEMPT_INPUT_TYPES.contains(&input_type) {
        return false;
    }
    if is_button_control(tag, input_type) {
        return chunk.text.is_empty() && chunk.attr("aria-label").is_empty();
    }
    chunk.attr("aria-label").is_empty()
        && chunk.attr("aria-labelledby").is_empty()
        && chunk.attr("id").is_empty()
}

impl Rule for ControlNoLabel {
    fn name(&self) -> &str {
        "Control Without Label"
    }

    fn description(&self) -> &str {
        "Flags form controls with no accessible label"
    }

    fn check(&self, chunks: &[Chunk]) -> Vec<Issue> {
        chunks
            .iter()
            .filter(|c| c.role == Role::Control && is_unlabelled(c))
            .map(|c| {
                Issue::new(IssueKind::ControlNoLabel, c)
                    .with_detail("tag", c.attr("tag"))
                    .with_detail("type", c.attr("type"))
            })
            .collect()
    }
}
