// SPDX-License-Identifier: PMPL-1.0-or-later
//! Form control labels
//!
//! Button-like controls get visible text. Every other control gets an `id`
//! (synthesized when absent) and a `<label for>` inserted just before it.

use super::locate::{locate, non_empty};
use super::{FixOutcome, Remediator};
use crate::audit::Issue;
use crate::dom::{Document, NodeId};
use crate::extract::{control_text, is_button_control, CONTROL_TAGS};
use crate::labels::truncate_chars;

/// Prefix for synthesized control ids
const FIELD_ID_PREFIX: &str = "a11y-field";

fn input_type(doc: &Document, id: NodeId) -> String {
    doc.attr_trimmed(id, "type").to_ascii_lowercase()
}

/// Live counterpart of the audit's control check
fn is_unlabelled(doc: &Document, id: NodeId) -> bool {
    let tag = doc.tag_name(id).unwrap_or("");
    let kind = input_type(doc, id);
    if tag == "input" && kind == "hidden" {
        return false;
    }
    if is_button_control(tag, &kind) {
        return control_text(doc, id).is_empty() && doc.attr_trimmed(id, "aria-label").is_empty();
    }
    doc.attr_trimmed(id, "aria-label").is_empty()
        && doc.attr_trimmed(id, "aria-labelledby").is_empty()
        && doc.attr_trimmed(id, "id").is_empty()
}

/// First `a11y-field-{n}` not already used as an id
fn unique_field_id(doc: &Document) -> String {
    let taken: Vec<&str> = doc
        .elements()
        .into_iter()
        .map(|id| doc.attr_trimmed(id, "id"))
        .filter(|value| value.starts_with(FIELD_ID_PREFIX))
        .collect();
    (1..)
        .map(|n| format!("{}-{}", FIELD_ID_PREFIX, n))
        .find(|candidate| !taken.contains(&candidate.as_str()))
        .unwrap_or_else(|| FIELD_ID_PREFIX.to_string())
}

pub fn fix_control_label(ctx: &Remediator<'_>, doc: &mut Document, issue: &Issue) -> FixOutcome {
    let tag = issue.source.attr("tag");
    if !CONTROL_TAGS.contains(&tag) {
        return FixOutcome::skipped("not a form control");
    }

    let target = {
        let doc: &Document = doc;
        let key = non_empty(issue.source.attr("name")).map(|name| move |id: NodeId| doc.attr_trimmed(id, "name") == name);
        locate(
            doc,
            &doc.find_all(tag),
            &issue.source.path,
            ctx.depth(),
            key,
            |id| is_unlabelled(doc, id),
        )
    };
    let Some(found) = target else {
        return FixOutcome::skipped("control already labelled");
    };
    let id = found.id;
    let fallbacks = &ctx.config.fallbacks;

    if is_button_control(tag, &input_type(doc, id)) {
        if tag == "input" {
            doc.set_attr(id, "value", &fallbacks.button);
            return FixOutcome::applied(format!("value=\"{}\"", fallbacks.button));
        }
        if doc.has_element_children(id) {
            doc.set_attr(id, "aria-label", &fallbacks.button);
            return FixOutcome::applied(format!("aria-label=\"{}\"", fallbacks.button));
        }
        doc.set_text(id, &fallbacks.button);
        return FixOutcome::applied(format!("text \"{}\"", fallbacks.button));
    }

    let label_text = label_text_for(ctx, doc, id);
    let field_id = unique_field_id(doc);
    doc.set_attr(id, "id", &field_id);
    let label = doc.create_element("label", &[("for", field_id.as_str())]);
    doc.set_text(label, &label_text);
    doc.insert_before(id, label);
    FixOutcome::applied(format!("<label for=\"{}\">{}</label>", field_id, label_text))
}

/// Placeholder, else the container's text, else the generic fallback
fn label_text_for(ctx: &Remediator<'_>, doc: &Document, id: NodeId) -> String {
    let placeholder = doc.attr_trimmed(id, "placeholder");
    if !placeholder.is_empty() {
        return placeholder.to_string();
    }
    let nearby = doc.parent(id).map(|parent| doc.text(parent)).unwrap_or_default();
    let nearby = truncate_chars(&nearby, ctx.config.labels.max_label_chars).trim();
    if !nearby.is_empty() {
        return nearby.to_string();
    }
    ctx.config.fallbacks.field.clone()
}
