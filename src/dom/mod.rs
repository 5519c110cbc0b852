// SPDX-License-Identifier: PMPL-1.0-or-later
//! In-memory HTML tree used by every pipeline stage.
//!
//! Nodes live in an arena owned by [`Document`] and are addressed by
//! [`NodeId`]. Parent links are plain indices, so structural edits (wrap,
//! rename, insert-before) never fight the borrow checker. Parsing is
//! delegated to `scraper` (html5ever), which performs the usual HTML error
//! recovery before the tree is copied into the arena.

mod document;
mod node;
mod path;
mod serialize;

pub use document::Document;
pub use node::{ElementData, NodeData, NodeId};
pub use path::PATH_SEPARATOR;

/// Decode page bytes as UTF-8, replacing invalid sequences
pub fn decode_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Subtrees whose text never counts as visible content
pub const HIDDEN_TEXT_TAGS: &[&str] = &["script", "style", "noscript", "template"];
