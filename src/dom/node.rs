// SPDX-License-Identifier: PMPL-1.0-or-later
//! Node representation for the document arena

/// Index of a node in its [`Document`](super::Document) arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

/// Payload of a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// The synthetic document root (always `NodeId(0)`)
    Document,
    /// `<!DOCTYPE name>`
    Doctype(String),
    Element(ElementData),
    Text(String),
    Comment(String),
}

/// Tag name plus attributes in source order. Keys are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    pub name: String,
    pub attrs: Vec<(String, String)>,
}

impl ElementData {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            attrs: Vec::new(),
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Insert or overwrite an attribute, keeping its original position
    pub fn set_attr(&mut self, key: &str, value: &str) {
        match self.attrs.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(key)) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attrs.push((key.to_string(), value.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub data: NodeData,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl Node {
    pub fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            children: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attr_overwrites_in_place() {
        let mut el = ElementData::new("A");
        el.set_attr("href", "/a");
        el.set_attr("rel", "noopener");
        el.set_attr("HREF", "/b");
        assert_eq!(el.name, "a");
        assert_eq!(el.attrs.len(), 2);
        assert_eq!(el.attrs[0], ("href".to_string(), "/b".to_string()));
        assert_eq!(el.attr("Rel"), Some("noopener"));
    }
}
