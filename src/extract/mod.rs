// SPDX-License-Identifier: PMPL-1.0-or-later
//! Chunk extraction.
//!
//! Walks the document once, in document order, and emits one typed
//! [`Chunk`] per accessibility-relevant element, followed by a single
//! synthetic `document` chunk with page-level facts. Extraction never
//! mutates the tree and never fails: absent attributes become empty values.

mod chunk;

pub use chunk::{AttrValue, Chunk, Role};

use crate::config::ExtractionConfig;
use crate::dom::{Document, NodeId};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Image source attributes, in fallback priority order (lazy-loaders last)
pub const IMAGE_SOURCE_ATTRS: &[&str] = &["src", "data-src", "data-original", "data-lazy"];

/// Form controls
pub const CONTROL_TAGS: &[&str] = &["input", "select", "textarea", "button"];

/// Input types that behave like buttons; their visible text is `value`
pub const BUTTON_INPUT_TYPES: &[&str] = &["submit", "reset", "button"];

/// Always chunked as text blocks (subject to the minimum length)
const TEXT_BLOCK_TAGS: &[&str] = &["p", "li", "article", "section"];

/// Generic wrappers, chunked only when they hold enough text
const CONTAINER_TAGS: &[&str] = &["div"];

static SKIP_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)skip").expect("valid skip-link regex"));

/// Extract the ordered chunk list for a document
pub fn extract(doc: &Document, config: &ExtractionConfig) -> Vec<Chunk> {
    let mut chunks = Vec::new();

    for id in doc.elements() {
        let Some(tag) = doc.tag_name(id) else {
            continue;
        };
        let chunk = match tag {
            "img" => Some(image_chunk(doc, id, config)),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Some(heading_chunk(doc, id, tag, config)),
            "a" => Some(link_chunk(doc, id, config)),
            "iframe" => Some(iframe_chunk(doc, id, config)),
            "svg" => Some(graphic_chunk(doc, id, config)),
            t if CONTROL_TAGS.contains(&t) => Some(control_chunk(doc, id, t, config)),
            t if TEXT_BLOCK_TAGS.contains(&t) || CONTAINER_TAGS.contains(&t) => {
                text_block_chunk(doc, id, t, config)
            }
            _ => None,
        };
        chunks.extend(chunk);
    }

    chunks.push(document_chunk(doc));
    debug!(chunks = chunks.len(), "Extracted chunks");
    chunks
}

/// Resolved image source: `src`, then the lazy-load fallbacks
pub fn image_source(doc: &Document, id: NodeId) -> &str {
    IMAGE_SOURCE_ATTRS
        .iter()
        .map(|key| doc.attr_trimmed(id, key))
        .find(|value| !value.is_empty())
        .unwrap_or("")
}

/// `rel` as an ordered list of lowercase tokens
pub fn rel_tokens(doc: &Document, id: NodeId) -> Vec<String> {
    doc.attr(id, "rel")
        .unwrap_or("")
        .split_whitespace()
        .map(str::to_ascii_lowercase)
        .collect()
}

/// Whether a control is labelled by its own visible text
pub fn is_button_control(tag: &str, input_type: &str) -> bool {
    tag == "button" || (tag == "input" && BUTTON_INPUT_TYPES.contains(&input_type))
}

/// Visible text of a control: inner text for `<button>`, `value` for
/// button-like inputs, empty otherwise
pub fn control_text(doc: &Document, id: NodeId) -> String {
    let tag = doc.tag_name(id).unwrap_or("");
    let input_type = doc.attr_trimmed(id, "type").to_ascii_lowercase();
    match tag {
        "button" => doc.text(id),
        "input" if is_button_control(tag, &input_type) => doc.attr_trimmed(id, "value").to_string(),
        _ => String::new(),
    }
}

fn image_chunk(doc: &Document, id: NodeId, config: &ExtractionConfig) -> Chunk {
    Chunk::new(Role::Image, doc.path_of(id, config.path_depth), String::new())
        .with_attr("src", image_source(doc, id))
        .with_attr("alt", doc.attr_trimmed(id, "alt"))
        .with_attr("width", doc.attr_trimmed(id, "width"))
        .with_attr("height", doc.attr_trimmed(id, "height"))
}

fn heading_chunk(doc: &Document, id: NodeId, tag: &str, config: &ExtractionConfig) -> Chunk {
    Chunk::new(Role::Heading, doc.path_of(id, config.path_depth), doc.text(id)).with_attr("tag", tag)
}

fn link_chunk(doc: &Document, id: NodeId, config: &ExtractionConfig) -> Chunk {
    // images inside the anchor name it through their alt text
    let image_alts: Vec<&str> = doc
        .find_all_in(id, "img")
        .into_iter()
        .map(|img| doc.attr_trimmed(img, "alt"))
        .filter(|alt| !alt.is_empty())
        .collect();
    Chunk::new(Role::Link, doc.path_of(id, config.path_depth), doc.text(id))
        .with_attr("img-alt", image_alts.join(" ").as_str())
        .with_attr("href", doc.attr_trimmed(id, "href"))
        .with_attr("aria-label", doc.attr_trimmed(id, "aria-label"))
        .with_attr("title", doc.attr_trimmed(id, "title"))
        .with_attr("target", doc.attr_trimmed(id, "target"))
        .with_attr("rel", AttrValue::Tokens(rel_tokens(doc, id)))
}

fn control_chunk(doc: &Document, id: NodeId, tag: &str, config: &ExtractionConfig) -> Chunk {
    let input_type = doc.attr_trimmed(id, "type").to_ascii_lowercase();
    Chunk::new(Role::Control, doc.path_of(id, config.path_depth), control_text(doc, id))
        .with_attr("tag", tag)
        .with_attr("type", input_type.as_str())
        .with_attr("id", doc.attr_trimmed(id, "id"))
        .with_attr("name", doc.attr_trimmed(id, "name"))
        .with_attr("aria-label", doc.attr_trimmed(id, "aria-label"))
        .with_attr("aria-labelledby", doc.attr_trimmed(id, "aria-labelledby"))
        .with_attr("placeholder", doc.attr_trimmed(id, "placeholder"))
}

fn iframe_chunk(doc: &Document, id: NodeId, config: &ExtractionConfig) -> Chunk {
    Chunk::new(Role::Iframe, doc.path_of(id, config.path_depth), String::new())
        .with_attr("title", doc.attr_trimmed(id, "title"))
        .with_attr("src", doc.attr_trimmed(id, "src"))
}

fn graphic_chunk(doc: &Document, id: NodeId, config: &ExtractionConfig) -> Chunk {
    Chunk::new(Role::Graphic, doc.path_of(id, config.path_depth), doc.text(id))
        .with_attr("aria-label", doc.attr_trimmed(id, "aria-label"))
        .with_attr("aria-hidden", doc.attr_trimmed(id, "aria-hidden"))
        .with_attr("role", doc.attr_trimmed(id, "role"))
}

fn text_block_chunk(
    doc: &Document,
    id: NodeId,
    tag: &str,
    config: &ExtractionConfig,
) -> Option<Chunk> {
    let text = doc.text(id);
    let length = text.chars().count();
    if CONTAINER_TAGS.contains(&tag) && length < config.container_min_chars {
        return None;
    }
    if length < config.block_min_chars {
        return None;
    }
    Some(Chunk::new(Role::TextBlock, doc.path_of(id, config.path_depth), text).with_attr("tag", tag))
}

/// The document `<title>`: only a title in `<head>` counts, not one inside
/// inline graphics
pub(crate) fn document_title(doc: &Document) -> Option<NodeId> {
    doc.head().and_then(|head| doc.find_first_in(head, "title"))
}

pub(crate) fn has_viewport(doc: &Document) -> bool {
    doc.find_all("meta")
        .into_iter()
        .any(|m| doc.attr_trimmed(m, "name").eq_ignore_ascii_case("viewport"))
}

/// `<meta charset>`, or an http-equiv content type that names a charset
pub(crate) fn has_charset(doc: &Document) -> bool {
    doc.find_all("meta").into_iter().any(|m| {
        doc.attr(m, "charset").is_some()
            || (doc.attr_trimmed(m, "http-equiv").eq_ignore_ascii_case("content-type")
                && doc.attr_trimmed(m, "content").to_ascii_lowercase().contains("charset="))
    })
}

/// Page-level facts, recorded as `"true"`/`"false"` flags
fn document_chunk(doc: &Document) -> Chunk {
    let html = doc.document_element();
    let lang = html.map(|id| doc.attr_trimmed(id, "lang")).unwrap_or("");

    let has_title = document_title(doc).is_some_and(|title| !doc.text(title).is_empty());
    let has_viewport = has_viewport(doc);
    let has_charset = has_charset(doc);

    let has_skiplink = doc.find_all("a").into_iter().any(|a| {
        doc.attr_trimmed(a, "href").eq_ignore_ascii_case("#main") || SKIP_TEXT.is_match(&doc.text(a))
    });

    Chunk::new(Role::Document, "html".to_string(), String::new())
        .with_attr("has_title", has_title)
        .with_attr("has_viewport", has_viewport)
        .with_attr("has_charset", has_charset)
        .with_attr("has_lang", !lang.is_empty())
        .with_attr("lang", lang)
        .with_attr("has_skiplink", has_skiplink)
        .with_attr("has_main", doc.find_first("main").is_some())
        .with_attr("has_nav", doc.find_first("nav").is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunks_of(html: &str) -> Vec<Chunk> {
        let doc = Document::parse(html).unwrap();
        extract(&doc, &ExtractionConfig::default())
    }

    fn by_role(chunks: &[Chunk], role: Role) -> Vec<&Chunk> {
        chunks.iter().filter(|c| c.role == role).collect()
    }

    #[test]
    fn test_image_source_fallbacks() {
        let chunks = chunks_of(
            r#"<img src="" data-src=" lazy.png " data-original="orig.png"><img data-lazy="z.png" alt=" Logo ">"#,
        );
        let images = by_role(&chunks, Role::Image);
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].attr("src"), "lazy.png");
        assert_eq!(images[1].attr("src"), "z.png");
        assert_eq!(images[1].attr("alt"), "Logo");
        assert_eq!(images[0].text, "");
    }

    #[test]
    fn test_headings_in_document_order() {
        let chunks = chunks_of("<h2>Second</h2><h1>First <script>x()</script>title</h1><h4>Deep</h4>");
        let headings: Vec<_> = by_role(&chunks, Role::Heading)
            .into_iter()
            .map(|c| (c.attr("tag").to_string(), c.text.clone()))
            .collect();
        assert_eq!(
            headings,
            vec![
                ("h2".to_string(), "Second".to_string()),
                ("h1".to_string(), "First title".to_string()),
                ("h4".to_string(), "Deep".to_string()),
            ]
        );
    }

    #[test]
    fn test_link_attributes() {
        let chunks = chunks_of(
            r#"<a href=" /pricing " target="_blank" rel="NoOpener  external" title="Plans">  Click   here </a><a>bare</a>"#,
        );
        let links = by_role(&chunks, Role::Link);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].text, "Click here");
        assert_eq!(links[0].attr("href"), "/pricing");
        assert_eq!(links[0].attr("target"), "_blank");
        assert_eq!(links[0].tokens("rel"), &["noopener".to_string(), "external".to_string()]);
        assert_eq!(links[1].attr("href"), "");
        assert_eq!(links[1].attr("img-alt"), "");
    }

    #[test]
    fn test_link_image_alt() {
        let chunks = chunks_of(r#"<a href="/"><img src="logo.png" alt="Home"></a>"#);
        let links = by_role(&chunks, Role::Link);
        assert_eq!(links[0].text, "");
        assert_eq!(links[0].attr("img-alt"), "Home");
    }

    #[test]
    fn test_controls() {
        let chunks = chunks_of(
            r#"<form><input name="q" placeholder="Search"><input type="Submit" value="Go"><button> Send </button><select id="s"></select><textarea aria-label="Note"></textarea></form>"#,
        );
        let controls = by_role(&chunks, Role::Control);
        assert_eq!(controls.len(), 5);
        assert_eq!(controls[0].attr("placeholder"), "Search");
        assert_eq!(controls[0].attr("tag"), "input");
        assert_eq!(controls[1].attr("type"), "submit");
        assert_eq!(controls[1].text, "Go");
        assert_eq!(controls[2].text, "Send");
        assert_eq!(controls[3].attr("id"), "s");
        assert_eq!(controls[4].attr("aria-label"), "Note");
    }

    #[test]
    fn test_text_block_thresholds() {
        let long = "word ".repeat(30);
        let medium = "x".repeat(80);
        let html = format!(
            "<p>short</p><p>{medium}</p><div>{medium}</div><div>{long}</div><section>{long}</section>"
        );
        let chunks = chunks_of(&html);
        let blocks: Vec<_> = by_role(&chunks, Role::TextBlock)
            .into_iter()
            .map(|c| c.attr("tag").to_string())
            .collect();
        // the medium div is below the container threshold
        assert_eq!(blocks, vec!["p", "div", "section"]);
    }

    #[test]
    fn test_single_document_chunk() {
        let chunks = chunks_of(
            r##"<html lang="en"><head><meta charset="utf-8"><title>T</title></head><body><a href="#main">Jump</a><nav></nav></body></html>"##,
        );
        let docs = by_role(&chunks, Role::Document);
        assert_eq!(docs.len(), 1);
        let page = docs[0];
        assert_eq!(chunks.last(), Some(page));
        assert!(page.flag("has_title"));
        assert!(page.flag("has_charset"));
        assert!(!page.flag("has_viewport"));
        assert!(page.flag("has_lang"));
        assert!(page.flag("has_skiplink"));
        assert!(page.flag("has_nav"));
        assert!(!page.flag("has_main"));
    }

    #[test]
    fn test_graphic_title_is_not_document_title() {
        let chunks = chunks_of(
            r#"<html lang="en"><head></head><body><svg><title>Chart</title></svg></body></html>"#,
        );
        assert!(!chunks.last().unwrap().flag("has_title"));
    }

    #[test]
    fn test_content_type_without_charset() {
        let chunks = chunks_of(r#"<head><meta http-equiv="Content-Type" content="text/html"></head>"#);
        assert!(!chunks.last().unwrap().flag("has_charset"));
        let chunks = chunks_of(r#"<head><meta http-equiv="content-type" content="text/html; Charset=UTF-8"></head>"#);
        assert!(chunks.last().unwrap().flag("has_charset"));
    }

    #[test]
    fn test_skip_text_heuristic() {
        let chunks = chunks_of(r#"<a href="/content">SKIP navigation</a>"#);
        assert!(chunks.last().unwrap().flag("has_skiplink"));
    }

    #[test]
    fn test_extraction_is_stable_and_pure() {
        let html = r#"<h1>A</h1><img src="a.png"><a href="/x">more</a><svg><title>Chart</title></svg><iframe src="/v"></iframe>"#;
        let doc = Document::parse(html).unwrap();
        let before = doc.to_html();
        let first = extract(&doc, &ExtractionConfig::default());
        let second = extract(&doc, &ExtractionConfig::default());
        assert_eq!(first, second);
        assert_eq!(doc.to_html(), before);
        assert_eq!(by_role(&first, Role::Graphic)[0].text, "Chart");
        assert_eq!(by_role(&first, Role::Iframe)[0].attr("src"), "/v");
    }
}
