// SPDX-License-Identifier: PMPL-1.0-or-later
//! URL normalization.
//!
//! Makes a remediated page render correctly when served from another origin:
//! a `<base href>` is injected, image sources (including lazy-load fallbacks
//! and every `srcset` candidate) and anchor hrefs are resolved to absolute
//! URLs against the page's base URL. Running it twice changes nothing.

use crate::dom::{Document, NodeId};
use crate::extract::image_source;
use tracing::{debug, warn};
use url::Url;

/// Resolve relative URLs in `doc` against `base_url`.
///
/// A base URL that does not parse makes this a no-op.
pub fn normalize(doc: &mut Document, base_url: &str) {
    let base = match Url::parse(base_url.trim()) {
        Ok(base) => base,
        Err(e) => {
            warn!(base_url, "Skipping URL normalization, invalid base URL: {}", e);
            return;
        }
    };

    insert_base(doc, base_url.trim());

    let mut resolved = 0usize;
    for img in doc.find_all("img") {
        resolved += normalize_image(doc, img, &base);
    }
    for a in doc.find_all("a") {
        resolved += normalize_link(doc, a, &base);
    }
    debug!(resolved, "Normalized URLs");
}

fn insert_base(doc: &mut Document, href: &str) {
    if doc.find_first("base").is_some() {
        return;
    }
    let Some(head) = doc.head() else {
        return;
    };
    let base = doc.create_element("base", &[("href", href)]);
    doc.insert_child(head, 0, base);
}

/// Absolute form of `value`, or `None` when it cannot be resolved
pub fn resolve(base: &Url, value: &str) -> Option<String> {
    match base.join(value.trim()) {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            debug!(value, "Leaving unresolvable URL unchanged: {}", e);
            None
        }
    }
}

/// Resolve the URL of every `srcset` candidate, keeping descriptors
pub fn resolve_srcset(base: &Url, srcset: &str) -> String {
    srcset
        .split(',')
        .filter_map(|candidate| {
            let mut parts = candidate.split_whitespace();
            let url = parts.next()?;
            let url = resolve(base, url).unwrap_or_else(|| url.to_string());
            Some(std::iter::once(url).chain(parts.map(str::to_string)).collect::<Vec<_>>().join(" "))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Returns the number of attributes changed
fn normalize_image(doc: &mut Document, img: NodeId, base: &Url) -> usize {
    let mut changed = 0;

    let src = image_source(doc, img);
    if !src.is_empty() {
        if let Some(absolute) = resolve(base, src) {
            if doc.attr(img, "src") != Some(absolute.as_str()) {
                doc.set_attr(img, "src", &absolute);
                changed += 1;
            }
        }
    }

    if let Some(srcset) = doc.attr(img, "srcset") {
        let absolute = resolve_srcset(base, srcset);
        if absolute != srcset {
            doc.set_attr(img, "srcset", &absolute);
            changed += 1;
        }
    }
    changed
}

fn normalize_link(doc: &mut Document, a: NodeId, base: &Url) -> usize {
    let href = doc.attr_trimmed(a, "href");
    if href.is_empty() || href.to_ascii_lowercase().starts_with("javascript:") {
        return 0;
    }
    match resolve(base, href) {
        Some(absolute) if doc.attr(a, "href") != Some(absolute.as_str()) => {
            doc.set_attr(a, "href", &absolute);
            1
        }
        _ => 0,
    }
}
