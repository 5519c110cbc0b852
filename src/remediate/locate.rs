// SPDX-License-Identifier: PMPL-1.0-or-later
//! Re-locating live elements for issues.
//!
//! Chunks are snapshots, so each fixer finds its target again in the
//! (possibly already modified) tree. Only candidates that still exhibit the
//! flagged problem are considered, which makes every fix idempotent:
//!
//! 1. With a discriminating key captured at audit time (`src`, `href`,
//!    `name`, heading text), the first pending candidate matching the key
//!    wins; failing that, the element at the issue's structural path.
//! 2. Without a key, the element at the structural path if it is still
//!    pending; failing that, the first pending candidate of the role. This
//!    fallback is deliberate: paths may be ambiguous, and first-match is the
//!    accepted approximation.

use crate::dom::{Document, NodeId};
use tracing::debug;

/// How a target was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Key,
    Path,
    FirstPending,
}

pub struct Located {
    pub id: NodeId,
    pub strategy: Strategy,
}

/// Find the live element for an issue among `candidates` (document order)
pub fn locate<K, P>(
    doc: &Document,
    candidates: &[NodeId],
    path: &str,
    depth: usize,
    key: Option<K>,
    pending: P,
) -> Option<Located>
where
    K: Fn(NodeId) -> bool,
    P: Fn(NodeId) -> bool,
{
    let live: Vec<NodeId> = candidates.iter().copied().filter(|&id| pending(id)).collect();
    if live.is_empty() {
        return None;
    }

    let has_key = key.is_some();
    let keyed = key.and_then(|key| live.iter().copied().find(|&id| key(id)));
    let located = if let Some(id) = keyed {
        Located { id, strategy: Strategy::Key }
    } else if let Some(id) = doc.find_by_path(path, depth).filter(|id| live.contains(id)) {
        Located { id, strategy: Strategy::Path }
    } else if has_key {
        debug!(path, "Keyed target no longer present");
        return None;
    } else {
        Located { id: live[0], strategy: Strategy::FirstPending }
    };

    debug!(path, strategy = ?located.strategy, "Located target");
    Some(located)
}

/// Trimmed key value, `None` when blank (a blank key discriminates nothing)
pub fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_key() -> Option<fn(NodeId) -> bool> {
        None
    }

    #[test]
    fn test_key_beats_path() {
        let doc = Document::parse(r#"<img src="a.png"><img src="b.png">"#).unwrap();
        let imgs = doc.find_all("img");
        let path = doc.path_of(imgs[0], 12);
        let found = locate(
            &doc,
            &imgs,
            &path,
            12,
            Some(|id: NodeId| doc.attr(id, "src") == Some("b.png")),
            |_| true,
        )
        .unwrap();
        assert_eq!(found.id, imgs[1]);
        assert_eq!(found.strategy, Strategy::Key);
    }

    #[test]
    fn test_missing_key_falls_back_to_path_only() {
        let doc = Document::parse(r#"<img src="a.png"><img src="b.png">"#).unwrap();
        let imgs = doc.find_all("img");
        let path = doc.path_of(imgs[1], 12);
        let found = locate(&doc, &imgs, &path, 12, Some(|_: NodeId| false), |_| true).unwrap();
        assert_eq!(found.id, imgs[1]);
        assert_eq!(found.strategy, Strategy::Path);
        assert!(locate(&doc, &imgs, "html>body>p", 12, Some(|_: NodeId| false), |_| true).is_none());
    }

    #[test]
    fn test_keyless_first_pending() {
        let doc = Document::parse(r#"<iframe title="ok"></iframe><iframe></iframe>"#).unwrap();
        let frames = doc.find_all("iframe");
        let found = locate(&doc, &frames, "html>body>video", 12, no_key(), |id| {
            doc.attr_trimmed(id, "title").is_empty()
        })
        .unwrap();
        assert_eq!(found.id, frames[1]);
        assert_eq!(found.strategy, Strategy::FirstPending);
    }

    #[test]
    fn test_nothing_pending() {
        let doc = Document::parse(r#"<iframe title="ok"></iframe>"#).unwrap();
        let frames = doc.find_all("iframe");
        assert!(locate(&doc, &frames, "", 12, no_key(), |_| false).is_none());
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  "), None);
        assert_eq!(non_empty(" /a "), Some("/a"));
    }
}
