// SPDX-License-Identifier: PMPL-1.0-or-later
//! HTML serialization of the arena tree

use super::document::Document;
use super::node::{NodeData, NodeId};

/// Elements that never have an end tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements whose text children are written without escaping
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext", "noscript",
];

enum Step {
    Open(NodeId),
    Close(NodeId),
}

impl Document {
    /// Serialize the whole document
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for &child in self.children(self.root()) {
            self.write_node(child, &mut out);
        }
        out
    }

    /// Serialize one node and its subtree
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let mut stack = vec![Step::Open(id)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Close(node) => {
                    if let Some(el) = self.element(node) {
                        out.push_str("</");
                        out.push_str(&el.name);
                        out.push('>');
                    }
                }
                Step::Open(node) => match self.data(node) {
                    NodeData::Document => {
                        stack.extend(self.children(node).iter().rev().map(|&c| Step::Open(c)));
                    }
                    NodeData::Doctype(name) => {
                        out.push_str("<!DOCTYPE ");
                        out.push_str(name);
                        out.push('>');
                    }
                    NodeData::Comment(text) => {
                        out.push_str("<!--");
                        out.push_str(text);
                        out.push_str("-->");
                    }
                    NodeData::Text(text) => {
                        let raw = self
                            .parent(node)
                            .and_then(|p| self.tag_name(p))
                            .is_some_and(|tag| RAW_TEXT_ELEMENTS.contains(&tag));
                        if raw {
                            out.push_str(text);
                        } else {
                            escape_text(text, out);
                        }
                    }
                    NodeData::Element(el) => {
                        out.push('<');
                        out.push_str(&el.name);
                        for (key, value) in &el.attrs {
                            out.push(' ');
                            out.push_str(key);
                            out.push_str("=\"");
                            escape_attr(value, out);
                            out.push('"');
                        }
                        out.push('>');
                        if VOID_ELEMENTS.contains(&el.name.as_str()) {
                            continue;
                        }
                        stack.push(Step::Close(node));
                        stack.extend(self.children(node).iter().rev().map(|&c| Step::Open(c)));
                    }
                },
            }
        }
    }
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}
