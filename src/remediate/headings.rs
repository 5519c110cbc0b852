// SPDX-License-Identifier: PMPL-1.0-or-later
//! Heading demotion

use super::locate::{locate, non_empty};
use super::{FixOutcome, Remediator};
use crate::audit::headings::heading_level;
use crate::audit::Issue;
use crate::dom::{Document, NodeId};

/// Lowest level that is auto-demoted; h1/h2 are left alone
const MIN_DEMOTED_LEVEL: u8 = 3;

/// Rename a skipping heading one level lower (h4 becomes h3)
pub fn fix_heading_order(ctx: &Remediator<'_>, doc: &mut Document, issue: &Issue) -> FixOutcome {
    let Some(level) = heading_level(issue.source.attr("tag")) else {
        return FixOutcome::skipped("unknown heading level");
    };
    if level < MIN_DEMOTED_LEVEL {
        return FixOutcome::skipped(format!("h{} is never demoted", level));
    }

    let tag = format!("h{}", level);
    let target = {
        let doc: &Document = doc;
        let skipping = skipping_headings(doc);
        let key = non_empty(&issue.source.text).map(|text| move |id: NodeId| doc.text(id) == text);
        locate(doc, &doc.find_all(&tag), &issue.source.path, ctx.depth(), key, |id| {
            skipping.contains(&id)
        })
    };
    let Some(found) = target else {
        return FixOutcome::skipped(format!("no {} left to demote", tag));
    };

    let new_tag = format!("h{}", level - 1);
    doc.rename(found.id, &new_tag);
    FixOutcome::applied(format!("{} -> {}", tag, new_tag))
}

/// Live headings that still skip a level relative to the heading before them
fn skipping_headings(doc: &Document) -> Vec<NodeId> {
    let mut skipping = Vec::new();
    let mut last_level: Option<u8> = None;
    for id in doc.elements() {
        let Some(level) = doc.tag_name(id).and_then(heading_level) else {
            continue;
        };
        if last_level.is_some_and(|prev| level > prev + 1) {
            skipping.push(id);
        }
        last_level = Some(level);
    }
    skipping
}
