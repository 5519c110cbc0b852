// SPDX-License-Identifier: PMPL-1.0-or-later
//! Iframe titles and inline SVG names

use super::locate::{locate, non_empty};
use super::{FixOutcome, Remediator};
use crate::audit::Issue;
use crate::dom::{Document, NodeId};
use crate::labels::truncate_chars;

pub fn fix_iframe_title(ctx: &Remediator<'_>, doc: &mut Document, issue: &Issue) -> FixOutcome {
    let target = {
        let doc: &Document = doc;
        let key = non_empty(issue.source.attr("src")).map(|src| move |id: NodeId| doc.attr_trimmed(id, "src") == src);
        locate(
            doc,
            &doc.find_all("iframe"),
            &issue.source.path,
            ctx.depth(),
            key,
            |id| doc.attr_trimmed(id, "title").is_empty(),
        )
    };
    let Some(found) = target else {
        return FixOutcome::skipped("iframe already titled");
    };

    let title = &ctx.config.fallbacks.iframe_title;
    doc.set_attr(found.id, "title", title);
    FixOutcome::applied(format!("title=\"{}\"", title))
}

fn graphic_is_resolved(doc: &Document, id: NodeId) -> bool {
    !doc.attr_trimmed(id, "aria-label").is_empty()
        || doc.attr_trimmed(id, "aria-hidden").eq_ignore_ascii_case("true")
}

/// Hide a textless graphic; name one that carries text
pub fn fix_svg_name(ctx: &Remediator<'_>, doc: &mut Document, issue: &Issue) -> FixOutcome {
    let target = {
        let doc: &Document = doc;
        let no_key: Option<fn(NodeId) -> bool> = None;
        locate(
            doc,
            &doc.find_all("svg"),
            &issue.source.path,
            ctx.depth(),
            no_key,
            |id| !graphic_is_resolved(doc, id),
        )
    };
    let Some(found) = target else {
        return FixOutcome::skipped("graphic already named or hidden");
    };
    let id = found.id;

    let text = doc.text(id);
    if text.is_empty() {
        doc.set_attr(id, "aria-hidden", "true");
        return FixOutcome::applied("aria-hidden=\"true\"");
    }

    if doc.attr_trimmed(id, "role").is_empty() {
        doc.set_attr(id, "role", "img");
    }
    let name = truncate_chars(&text, ctx.config.labels.max_label_chars).trim().to_string();
    doc.set_attr(id, "aria-label", &name);
    FixOutcome::applied(format!("aria-label=\"{}\"", name))
}
