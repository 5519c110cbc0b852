// SPDX-License-Identifier: PMPL-1.0-or-later
//! Structural addresses for elements.
//!
//! A path reads root-to-leaf, e.g. `html>body>div:nth-of-type(2)>h2`. The
//! `:nth-of-type(k)` suffix appears only when the parent has more than one
//! child element with the same tag. Paths are capped at a fixed number of
//! ancestors, so two structurally identical subtrees can share a path; when
//! resolving, the first match in document order wins.

use super::document::Document;
use super::node::NodeId;

pub const PATH_SEPARATOR: &str = ">";

impl Document {
    /// 1-based position of `id` among same-tag element siblings, and the
    /// number of such siblings
    pub fn nth_of_type(&self, id: NodeId) -> (usize, usize) {
        let (Some(parent), Some(tag)) = (self.parent(id), self.tag_name(id)) else {
            return (1, 1);
        };
        let mut index = 1;
        let mut count = 0;
        for sibling in self.element_children(parent) {
            if self.tag_name(sibling) == Some(tag) {
                count += 1;
                if sibling == id {
                    index = count;
                }
            }
        }
        (index, count.max(1))
    }

    /// Path of an element through at most `max_depth` element ancestors
    /// (the element itself included)
    pub fn path_of(&self, id: NodeId, max_depth: usize) -> String {
        let mut parts = Vec::new();
        let mut cur = Some(id);
        while let Some(node) = cur {
            if parts.len() >= max_depth {
                break;
            }
            let Some(tag) = self.tag_name(node) else {
                break;
            };
            let (index, count) = self.nth_of_type(node);
            if count > 1 {
                parts.push(format!("{}:nth-of-type({})", tag, index));
            } else {
                parts.push(tag.to_string());
            }
            cur = self.parent(node);
        }
        parts.reverse();
        parts.join(PATH_SEPARATOR)
    }

    /// First element in document order whose path equals `path`
    pub fn find_by_path(&self, path: &str, max_depth: usize) -> Option<NodeId> {
        if path.is_empty() {
            return None;
        }
        let leaf_tag = path
            .rsplit(PATH_SEPARATOR)
            .next()
            .and_then(|seg| seg.split(':').next())
            .unwrap_or("");
        self.elements()
            .into_iter()
            .filter(|&id| self.is_tag(id, leaf_tag))
            .find(|&id| self.path_of(id, max_depth) == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_only_when_siblings_share_tag() {
        let doc = Document::parse(
            "<body><div><h2>a</h2></div><div><h2>b</h2><p>x</p></div></body>",
        )
        .unwrap();
        let h2s = doc.find_all("h2");
        let p = doc.find_first("p").unwrap();
        assert_eq!(doc.path_of(h2s[1], 12), "html>body>div:nth-of-type(2)>h2");
        assert_eq!(doc.path_of(p, 12), "html>body>div:nth-of-type(2)>p");
        assert_eq!(doc.path_of(h2s[0], 2), "div:nth-of-type(1)>h2");
    }

    #[test]
    fn test_find_by_path_round_trips() {
        let doc = Document::parse("<ul><li>a</li><li>b</li><li>c</li></ul>").unwrap();
        for li in doc.find_all("li") {
            let path = doc.path_of(li, 12);
            assert_eq!(doc.find_by_path(&path, 12), Some(li));
        }
        assert_eq!(doc.find_by_path("html>body>table", 12), None);
    }

    #[test]
    fn test_capped_paths_first_match_wins() {
        let doc = Document::parse(
            "<section><div><span>1</span></div></section><article><div><span>2</span></div></article>",
        )
        .unwrap();
        let spans = doc.find_all("span");
        let path = doc.path_of(spans[1], 2);
        assert_eq!(path, "div>span");
        assert_eq!(doc.find_by_path(&path, 2), Some(spans[0]));
    }
}
