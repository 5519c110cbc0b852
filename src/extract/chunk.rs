// SPDX-License-Identifier: PMPL-1.0-or-later
//! Chunk types: immutable snapshots of accessibility-relevant elements

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Semantic role of a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Image,
    Heading,
    Link,
    Control,
    Iframe,
    /// Inline vector graphic (`<svg>`)
    Graphic,
    TextBlock,
    /// The single page-level summary chunk
    Document,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Image => write!(f, "image"),
            Role::Heading => write!(f, "heading"),
            Role::Link => write!(f, "link"),
            Role::Control => write!(f, "control"),
            Role::Iframe => write!(f, "iframe"),
            Role::Graphic => write!(f, "graphic"),
            Role::TextBlock => write!(f, "text-block"),
            Role::Document => write!(f, "document"),
        }
    }
}

/// Attribute snapshot value: a plain string or an ordered token list (`rel`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Text(String),
    Tokens(Vec<String>),
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Text(value.to_string())
    }
}

/// Immutable snapshot of one element, taken at extraction time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub role: Role,
    /// Structural address used to re-locate the element
    pub path: String,
    /// Normalized visible text (empty for non-text roles)
    pub text: String,
    pub attrs: BTreeMap<String, AttrValue>,
}

impl Chunk {
    pub fn new(role: Role, path: String, text: String) -> Self {
        Self {
            role,
            path,
            text,
            attrs: BTreeMap::new(),
        }
    }

    pub fn with_attr(mut self, key: &str, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(key.to_string(), value.into());
        self
    }

    /// String attribute, empty when absent or not a string
    pub fn attr(&self, key: &str) -> &str {
        match self.attrs.get(key) {
            Some(AttrValue::Text(value)) => value,
            _ => "",
        }
    }

    /// Token-list attribute, empty when absent
    pub fn tokens(&self, key: &str) -> &[String] {
        match self.attrs.get(key) {
            Some(AttrValue::Tokens(tokens)) => tokens,
            _ => &[],
        }
    }

    /// Boolean fact recorded as `"true"` / `"false"`
    pub fn flag(&self, key: &str) -> bool {
        self.attr(key) == "true"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_never_fail() {
        let chunk = Chunk::new(Role::Link, "html>body>a".into(), "Docs".into())
            .with_attr("href", "/docs")
            .with_attr("rel", AttrValue::Tokens(vec!["noopener".into()]))
            .with_attr("has_title", true);
        assert_eq!(chunk.attr("href"), "/docs");
        assert_eq!(chunk.attr("rel"), "");
        assert_eq!(chunk.attr("missing"), "");
        assert_eq!(chunk.tokens("rel"), &["noopener".to_string()]);
        assert!(chunk.tokens("href").is_empty());
        assert!(chunk.flag("has_title"));
    }

    #[test]
    fn test_role_wire_names() {
        assert_eq!(serde_json::to_string(&Role::TextBlock).unwrap(), "\"text-block\"");
        assert_eq!(Role::Graphic.to_string(), "graphic");
    }
}
