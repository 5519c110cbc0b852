// SPDX-License-Identifier: PMPL-1.0-or-later
//! Arena-backed HTML document
//!
//! Efficient DOM storage with:
//! - Arena allocation for nodes
//! - `NodeId` indices for traversal and parent lookup
//! - Structural edits that preserve child order

use super::node::{ElementData, Node, NodeData, NodeId};
use super::HIDDEN_TEXT_TAGS;
use crate::error::{RemedyError, Result};
use scraper::{Html, Node as ParsedNode};
use tracing::debug;

/// An HTML document stored in arena format
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding only the synthetic root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Document)],
        }
    }

    /// Parse HTML text, recovering from malformed markup the way browsers do.
    ///
    /// Fails only when no element survives parsing.
    pub fn parse(input: &str) -> Result<Self> {
        let html = Html::parse_document(input);
        if !html.errors.is_empty() {
            debug!(errors = html.errors.len(), "Recovered from malformed markup");
        }

        let mut doc = Document::new();
        let mut stack = vec![(html.tree.root(), doc.root())];

        while let Some((source, dest)) = stack.pop() {
            for child in source.children() {
                let data = match child.value() {
                    ParsedNode::Element(el) => NodeData::Element(ElementData {
                        name: el.name().to_string(),
                        attrs: el
                            .attrs()
                            .map(|(k, v)| (k.to_string(), v.to_string()))
                            .collect(),
                    }),
                    ParsedNode::Text(text) => NodeData::Text((**text).to_string()),
                    ParsedNode::Comment(comment) => NodeData::Comment((**comment).to_string()),
                    ParsedNode::Doctype(doctype) => NodeData::Doctype(doctype.name().to_string()),
                    _ => continue,
                };
                let is_element = matches!(data, NodeData::Element(_));
                let id = doc.push(data);
                doc.attach(dest, id, None);
                if is_element {
                    stack.push((child, id));
                }
            }
        }

        if doc.document_element().is_none() {
            return Err(RemedyError::NoRootElement);
        }
        Ok(doc)
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0].data
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.nodes[id.0].data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match &mut self.nodes[id.0].data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|el| el.name.as_str())
    }

    /// Whether `id` is an element with the given tag name
    pub fn is_tag(&self, id: NodeId, tag: &str) -> bool {
        self.tag_name(id).is_some_and(|name| name.eq_ignore_ascii_case(tag))
    }

    pub fn attr(&self, id: NodeId, key: &str) -> Option<&str> {
        self.element(id).and_then(|el| el.attr(key))
    }

    /// Trimmed attribute value, empty when absent
    pub fn attr_trimmed(&self, id: NodeId, key: &str) -> &str {
        self.attr(id, key).map(str::trim).unwrap_or("")
    }

    pub fn set_attr(&mut self, id: NodeId, key: &str, value: &str) {
        if let Some(el) = self.element_mut(id) {
            el.set_attr(key, value);
        }
    }

    /// Change an element's tag name, keeping attributes and children
    pub fn rename(&mut self, id: NodeId, tag: &str) {
        if let Some(el) = self.element_mut(id) {
            el.name = tag.to_ascii_lowercase();
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| self.element(child).is_some())
    }

    pub fn has_element_children(&self, id: NodeId) -> bool {
        self.element_children(id).next().is_some()
    }

    /// Descendants of `id` in document order, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Every attached element in document order
    pub fn elements(&self) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|&id| self.element(id).is_some())
            .collect()
    }

    pub fn find_all(&self, tag: &str) -> Vec<NodeId> {
        self.find_all_in(self.root(), tag)
    }

    pub fn find_all_in(&self, scope: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&id| self.is_tag(id, tag))
            .collect()
    }

    pub fn find_first(&self, tag: &str) -> Option<NodeId> {
        self.find_first_in(self.root(), tag)
    }

    pub fn find_first_in(&self, scope: NodeId, tag: &str) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|&id| self.is_tag(id, tag))
    }

    /// The `<html>` element
    pub fn document_element(&self) -> Option<NodeId> {
        self.element_children(self.root()).next()
    }

    pub fn head(&self) -> Option<NodeId> {
        self.find_first("head")
    }

    pub fn body(&self) -> Option<NodeId> {
        self.find_first("body")
    }

    /// Whether `ancestor` is `id` or one of its ancestors
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cur = Some(id);
        while let Some(node) = cur {
            if node == ancestor {
                return true;
            }
            cur = self.parent(node);
        }
        false
    }

    /// Normalized visible text: descendant text outside script/style/noscript,
    /// whitespace collapsed to single spaces and trimmed.
    pub fn text(&self, id: NodeId) -> String {
        let mut words: Vec<&str> = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            match &self.nodes[next.0].data {
                NodeData::Text(text) => words.extend(text.split_whitespace()),
                NodeData::Element(el)
                    if next != id && HIDDEN_TEXT_TAGS.contains(&el.name.as_str()) => {}
                _ => stack.extend(self.children(next).iter().rev().copied()),
            }
        }
        words.join(" ")
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let mut el = ElementData::new(tag);
        for (key, value) in attrs {
            el.set_attr(key, value);
        }
        self.push(NodeData::Element(el))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.attach(parent, child, None);
    }

    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        self.attach(parent, child, Some(0));
    }

    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.attach(parent, child, Some(index));
    }

    /// Insert `node` as the previous sibling of `reference`
    pub fn insert_before(&mut self, reference: NodeId, node: NodeId) {
        let Some(parent) = self.parent(reference) else {
            return;
        };
        self.detach(node);
        if let Some(index) = self.position(parent, reference) {
            self.attach(parent, node, Some(index));
        }
    }

    /// Put `wrapper` where `target` is and move `target` inside it
    pub fn wrap(&mut self, target: NodeId, wrapper: NodeId) {
        if self.parent(target).is_none() || self.is_ancestor_or_self(wrapper, target) {
            return;
        }
        self.insert_before(target, wrapper);
        self.append_child(wrapper, target);
    }

    /// Replace all children of `id` with a single text node
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        for child in std::mem::take(&mut self.nodes[id.0].children) {
            self.nodes[child.0].parent = None;
        }
        let text_node = self.create_text(text);
        self.append_child(id, text_node);
    }

    /// Index of `child` among the children of `parent`
    pub fn position(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.children(parent).iter().position(|&c| c == child)
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        self.nodes.push(Node::new(data));
        NodeId(self.nodes.len() - 1)
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != id);
        }
    }

    /// Attach `child` under `parent`. Refuses to create a cycle.
    fn attach(&mut self, parent: NodeId, child: NodeId, index: Option<usize>) {
        if self.is_ancestor_or_self(child, parent) {
            debug!(?parent, ?child, "Refusing to attach a node under its own descendant");
            return;
        }
        self.detach(child);
        let children = &mut self.nodes[parent.0].children;
        let index = index.unwrap_or(children.len()).min(children.len());
        children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recovers_structure() {
        let doc = Document::parse("<p>unclosed <b>bold<p>next").unwrap();
        let html = doc.document_element().unwrap();
        assert!(doc.is_tag(html, "html"));
        assert!(doc.head().is_some());
        assert_eq!(doc.find_all("p").len(), 2);
    }

    #[test]
    fn test_empty_input_still_has_root() {
        let doc = Document::parse("").unwrap();
        assert!(doc.body().is_some());
    }

    #[test]
    fn test_parse_lossy_bytes() {
        let doc = Document::parse(&crate::dom::decode_lossy(b"<p>caf\xff</p>")).unwrap();
        let p = doc.find_first("p").unwrap();
        assert!(doc.text(p).starts_with("caf"));
    }

    #[test]
    fn test_text_skips_hidden_subtrees() {
        let doc = Document::parse(
            "<div id=x>  Hello\n<script>var a;</script><style>p{}</style> <b>world</b> </div>",
        )
        .unwrap();
        let div = doc.find_first("div").unwrap();
        assert_eq!(doc.text(div), "Hello world");
    }

    #[test]
    fn test_parent_links_follow_edits() {
        let mut doc = Document::parse("<body><p>a</p><p>b</p></body>").unwrap();
        let body = doc.body().unwrap();
        let ps = doc.find_all("p");
        let wrapper = doc.create_element("main", &[("id", "main")]);
        doc.wrap(ps[1], wrapper);

        assert_eq!(doc.parent(ps[1]), Some(wrapper));
        assert_eq!(doc.parent(wrapper), Some(body));
        assert_eq!(doc.position(body, wrapper), Some(1));
        assert_eq!(doc.position(body, ps[0]), Some(0));
    }

    #[test]
    fn test_attach_refuses_cycles() {
        let mut doc = Document::parse("<div><span>x</span></div>").unwrap();
        let div = doc.find_first("div").unwrap();
        let span = doc.find_first("span").unwrap();
        doc.append_child(span, div);
        assert_eq!(doc.parent(span), Some(div));
        assert_ne!(doc.parent(div), Some(span));
    }

    #[test]
    fn test_set_text_and_rename() {
        let mut doc = Document::parse("<a href=x><i>icon</i> here</a>").unwrap();
        let a = doc.find_first("a").unwrap();
        doc.set_text(a, "Pricing");
        doc.rename(a, "BUTTON");
        assert_eq!(doc.tag_name(a), Some("button"));
        assert_eq!(doc.text(a), "Pricing");
        assert!(doc.find_first("i").is_none());
    }

    #[test]
    fn test_insert_before_keeps_order() {
        let mut doc = Document::parse("<form><input name=q></form>").unwrap();
        let input = doc.find_first("input").unwrap();
        let label = doc.create_element("label", &[("for", "q")]);
        doc.insert_before(input, label);
        let form = doc.find_first("form").unwrap();
        assert_eq!(doc.children(form), &[label, input]);
    }
}
