// SPDX-License-Identifier: PMPL-1.0-or-later
//! Link fixes: naming, `rel` hardening, and anchors used as buttons
//!
//! Link names come from, in order: `aria-label`, `title`, a label derived
//! from the last path segment of `href`, then a fixed default. When the link
//! wraps other elements its text is left alone and the name goes into
//! `aria-label` instead, so no markup is lost.

use super::locate::{locate, non_empty};
use super::{FixOutcome, Remediator};
use crate::audit::links::{is_vague_link_text, REQUIRED_REL};
use crate::audit::Issue;
use crate::dom::{Document, NodeId};

/// File extensions dropped from slugs (`pricing.html` reads as "Pricing")
const MAX_EXTENSION_CHARS: usize = 5;

/// Human-readable label from an href's last path segment.
///
/// `/plans/pro-tier?ref=nav` gives `"Pro Tier"`. Returns `None` for
/// fragment-only and `javascript:` hrefs, or when no segment is left.
pub fn label_from_href(href: &str) -> Option<String> {
    let href = href.trim();
    if href.starts_with('#') || href.to_ascii_lowercase().starts_with("javascript:") {
        return None;
    }

    let path = href.split(['?', '#']).next().unwrap_or("");
    // drop scheme and host so a bare origin yields nothing
    let path = match path.find("://") {
        Some(idx) => {
            let rest = &path[idx + 3..];
            rest.find('/').map(|slash| &rest[slash..]).unwrap_or("")
        }
        None => path,
    };

    let segment = path.trim_end_matches('/').rsplit('/').next().unwrap_or("");
    let segment = match segment.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_CHARS
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            stem
        }
        _ => segment,
    };

    let label = segment
        .split(['-', '_', '+', ' '])
        .filter(|word| !word.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ");
    (!label.is_empty()).then_some(label)
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Best available name for a live link
fn link_label(doc: &Document, id: NodeId, fallback: &str) -> String {
    [doc.attr_trimmed(id, "aria-label"), doc.attr_trimmed(id, "title")]
        .into_iter()
        .find(|value| !value.is_empty())
        .map(str::to_string)
        .or_else(|| label_from_href(doc.attr_trimmed(id, "href")))
        .unwrap_or_else(|| fallback.to_string())
}

/// Set the visible text, or `aria-label` when the link wraps elements
fn apply_name(doc: &mut Document, id: NodeId, label: &str) -> FixOutcome {
    if doc.has_element_children(id) {
        doc.set_attr(id, "aria-label", label);
        FixOutcome::applied(format!("aria-label=\"{}\"", label))
    } else {
        doc.set_text(id, label);
        FixOutcome::applied(format!("text \"{}\"", label))
    }
}

fn href_key<'a>(doc: &'a Document, issue: &'a Issue) -> Option<impl Fn(NodeId) -> bool + 'a> {
    non_empty(issue.source.attr("href")).map(move |href| move |id: NodeId| doc.attr_trimmed(id, "href") == href)
}

fn is_nameless(doc: &Document, id: NodeId) -> bool {
    doc.text(id).is_empty()
        && doc.attr_trimmed(id, "aria-label").is_empty()
        && doc.attr_trimmed(id, "title").is_empty()
        && doc
            .find_all_in(id, "img")
            .into_iter()
            .all(|img| doc.attr_trimmed(img, "alt").is_empty())
}

pub fn fix_poor_link_text(ctx: &Remediator<'_>, doc: &mut Document, issue: &Issue) -> FixOutcome {
    let target = {
        let doc: &Document = doc;
        locate(
            doc,
            &doc.find_all("a"),
            &issue.source.path,
            ctx.depth(),
            href_key(doc, issue),
            |id| {
                is_vague_link_text(&doc.text(id))
                    && !(doc.has_element_children(id) && !doc.attr_trimmed(id, "aria-label").is_empty())
            },
        )
    };
    let Some(found) = target else {
        return FixOutcome::skipped("link text already descriptive");
    };

    let label = link_label(doc, found.id, &ctx.config.fallbacks.poor_link);
    apply_name(doc, found.id, &label)
}

pub fn fix_link_no_name(ctx: &Remediator<'_>, doc: &mut Document, issue: &Issue) -> FixOutcome {
    let target = {
        let doc: &Document = doc;
        locate(
            doc,
            &doc.find_all("a"),
            &issue.source.path,
            ctx.depth(),
            href_key(doc, issue),
            |id| is_nameless(doc, id),
        )
    };
    let Some(found) = target else {
        return FixOutcome::skipped("link already named");
    };

    let label = link_label(doc, found.id, &ctx.config.fallbacks.link_name);
    apply_name(doc, found.id, &label)
}

/// Union `rel` with the required tokens, keeping existing tokens first
pub fn fix_blank_target(ctx: &Remediator<'_>, doc: &mut Document, issue: &Issue) -> FixOutcome {
    let missing_rel = |doc: &Document, id: NodeId| -> Vec<&'static str> {
        let rel = doc.attr(id, "rel").unwrap_or("");
        REQUIRED_REL
            .iter()
            .copied()
            .filter(|required| !rel.split_whitespace().any(|t| t.eq_ignore_ascii_case(required)))
            .collect()
    };

    let target = {
        let doc: &Document = doc;
        locate(
            doc,
            &doc.find_all("a"),
            &issue.source.path,
            ctx.depth(),
            href_key(doc, issue),
            |id| {
                doc.attr_trimmed(id, "target").eq_ignore_ascii_case("_blank") && !missing_rel(doc, id).is_empty()
            },
        )
    };
    let Some(found) = target else {
        return FixOutcome::skipped("rel already safe");
    };

    let mut tokens: Vec<String> = doc
        .attr(found.id, "rel")
        .unwrap_or("")
        .split_whitespace()
        .map(str::to_string)
        .collect();
    tokens.extend(missing_rel(doc, found.id).into_iter().map(str::to_string));
    let rel = tokens.join(" ");
    doc.set_attr(found.id, "rel", &rel);
    FixOutcome::applied(format!("rel=\"{}\"", rel))
}

/// Retag an hrefless anchor as a button
pub fn fix_anchor_button(ctx: &Remediator<'_>, doc: &mut Document, issue: &Issue) -> FixOutcome {
    let target = {
        let doc: &Document = doc;
        let key = non_empty(&issue.source.text).map(|text| move |id: NodeId| doc.text(id) == text);
        locate(
            doc,
            &doc.find_all("a"),
            &issue.source.path,
            ctx.depth(),
            key,
            |id| doc.attr_trimmed(id, "href").is_empty(),
        )
    };
    let Some(found) = target else {
        return FixOutcome::skipped("no hrefless anchor left");
    };

    let id = found.id;
    doc.rename(id, "button");
    doc.set_attr(id, "type", "button");
    if doc.text(id).is_empty() && doc.attr_trimmed(id, "aria-label").is_empty() {
        let label = ctx.config.fallbacks.anchor_button.clone();
        apply_name(doc, id, &label);
        return FixOutcome::applied(format!("retagged as button labelled \"{}\"", label));
    }
    FixOutcome::applied("retagged as button")
}
