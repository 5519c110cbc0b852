// SPDX-License-Identifier: PMPL-1.0-or-later
//! Page-level fixes: head metadata, `lang`, skip link, and landmarks.
//!
//! Each fix re-checks the live tree first and does nothing when the element
//! or attribute is already present, so repeated issues are harmless. A
//! missing `<head>` or `<body>` is created under the root element.

use super::{FixOutcome, Remediator};
use crate::audit::{Issue, IssueKind};
use crate::dom::{Document, NodeData, NodeId};
use crate::extract::{document_title, has_charset, has_viewport};

/// Inline style that moves the skip link off-screen until focused
pub const SKIP_LINK_STYLE: &str =
    "position:absolute;left:-9999px;top:auto;width:1px;height:1px;overflow:hidden;";

/// Anchor target of the skip link
const MAIN_ID: &str = "main";

/// Body children never wrapped into `<main>`
const CHROME_TAGS: &[&str] = &[
    "header", "footer", "nav", "aside", "script", "style", "noscript", "template",
];

/// Containers that may be promoted to the main region
const REGION_TAGS: &[&str] = &["div", "article", "section"];

/// Regions holding page chrome are not the primary content
const NON_CONTENT_TAGS: &[&str] = &["nav", "header", "footer"];

pub fn fix_page(ctx: &Remediator<'_>, doc: &mut Document, issue: &Issue) -> FixOutcome {
    let Some(html) = doc.document_element() else {
        return FixOutcome::skipped("document has no root element");
    };
    let fallbacks = &ctx.config.fallbacks;

    match issue.kind {
        IssueKind::MissingTitle => {
            let head = ensure_head(doc, html);
            match document_title(doc) {
                Some(title) if !doc.text(title).is_empty() => FixOutcome::skipped("title present"),
                Some(title) => {
                    doc.set_text(title, &fallbacks.title);
                    FixOutcome::applied(format!("<title>{}</title>", fallbacks.title))
                }
                None => {
                    let title = doc.create_element("title", &[]);
                    doc.set_text(title, &fallbacks.title);
                    doc.append_child(head, title);
                    FixOutcome::applied(format!("<title>{}</title>", fallbacks.title))
                }
            }
        }
        IssueKind::MissingViewport => {
            let head = ensure_head(doc, html);
            if has_viewport(doc) {
                return FixOutcome::skipped("viewport present");
            }
            let meta = doc.create_element(
                "meta",
                &[("name", "viewport"), ("content", fallbacks.viewport.as_str())],
            );
            doc.append_child(head, meta);
            FixOutcome::applied("<meta name=\"viewport\">")
        }
        IssueKind::MissingCharset => {
            let head = ensure_head(doc, html);
            if has_charset(doc) {
                return FixOutcome::skipped("charset present");
            }
            // charset must come early in the head
            let meta = doc.create_element("meta", &[("charset", "utf-8")]);
            doc.prepend_child(head, meta);
            FixOutcome::applied("<meta charset=\"utf-8\">")
        }
        IssueKind::MissingLang => {
            if !doc.attr_trimmed(html, "lang").is_empty() {
                return FixOutcome::skipped("lang present");
            }
            doc.set_attr(html, "lang", &fallbacks.lang);
            FixOutcome::applied(format!("lang=\"{}\"", fallbacks.lang))
        }
        IssueKind::MissingSkiplink => add_skip_link(ctx, doc, html),
        IssueKind::MissingLandmarks => match issue.detail_str("missing") {
            "main" => add_main(ctx, doc, html),
            "nav" => add_nav(doc, html),
            other => FixOutcome::skipped(format!("unknown landmark {:?}", other)),
        },
        _ => FixOutcome::skipped("not a page-level issue"),
    }
}

fn ensure_head(doc: &mut Document, html: NodeId) -> NodeId {
    if let Some(head) = doc.head() {
        return head;
    }
    let head = doc.create_element("head", &[]);
    doc.prepend_child(html, head);
    head
}

fn ensure_body(doc: &mut Document, html: NodeId) -> NodeId {
    if let Some(body) = doc.body() {
        return body;
    }
    let body = doc.create_element("body", &[]);
    doc.append_child(html, body);
    body
}

fn is_skip_link(doc: &Document, id: NodeId) -> bool {
    doc.is_tag(id, "a") && doc.attr_trimmed(id, "href").eq_ignore_ascii_case("#main")
}

fn id_taken(doc: &Document, value: &str) -> bool {
    doc.elements().into_iter().any(|id| doc.attr_trimmed(id, "id") == value)
}

/// Point an existing `<main>` at the skip link target
fn ensure_main_target(doc: &mut Document) {
    if id_taken(doc, MAIN_ID) {
        return;
    }
    if let Some(main) = doc.find_first("main") {
        doc.set_attr(main, "id", MAIN_ID);
    }
}

fn add_skip_link(ctx: &Remediator<'_>, doc: &mut Document, html: NodeId) -> FixOutcome {
    if doc.find_all("a").into_iter().any(|a| is_skip_link(doc, a)) {
        return FixOutcome::skipped("skip link present");
    }
    let body = ensure_body(doc, html);
    let link = doc.create_element(
        "a",
        &[("href", "#main"), ("class", "skip-link"), ("style", SKIP_LINK_STYLE)],
    );
    doc.set_text(link, &ctx.config.fallbacks.skip_link);
    doc.prepend_child(body, link);
    ensure_main_target(doc);
    FixOutcome::applied("skip link to #main")
}

/// Whether a body child is page chrome rather than content
fn is_chrome(doc: &Document, id: NodeId) -> bool {
    match doc.data(id) {
        NodeData::Text(text) => text.trim().is_empty(),
        NodeData::Element(el) => CHROME_TAGS.contains(&el.name.as_str()) || is_skip_link(doc, id),
        _ => true,
    }
}

/// First container with enough text that holds no nav/header/footer
fn primary_region(doc: &Document, body: NodeId, min_chars: usize) -> Option<NodeId> {
    doc.descendants(body).into_iter().find(|&id| {
        doc.tag_name(id).is_some_and(|tag| REGION_TAGS.contains(&tag))
            && doc.text(id).chars().count() >= min_chars
            && !NON_CONTENT_TAGS.iter().any(|tag| doc.find_first_in(id, tag).is_some())
            && !doc
                .parent(id)
                .into_iter()
                .flat_map(|p| std::iter::successors(Some(p), |&n| doc.parent(n)))
                .any(|a| doc.tag_name(a).is_some_and(|tag| CHROME_TAGS.contains(&tag)))
    })
}

fn add_main(ctx: &Remediator<'_>, doc: &mut Document, html: NodeId) -> FixOutcome {
    if doc.find_first("main").is_some() {
        return FixOutcome::skipped("main present");
    }
    let body = ensure_body(doc, html);
    let attrs: &[(&str, &str)] = if id_taken(doc, MAIN_ID) { &[] } else { &[("id", MAIN_ID)] };
    let main = doc.create_element("main", attrs);

    if let Some(region) = primary_region(doc, body, ctx.config.extraction.container_min_chars) {
        let tag = doc.tag_name(region).unwrap_or("").to_string();
        doc.wrap(region, main);
        return FixOutcome::applied(format!("wrapped <{}> in <main>", tag));
    }

    // otherwise the span from the first to the last content child
    let children = doc.children(body).to_vec();
    let first = children.iter().position(|&c| !is_chrome(doc, c));
    let last = children.iter().rposition(|&c| !is_chrome(doc, c));
    let (Some(first), Some(last)) = (first, last) else {
        doc.append_child(body, main);
        return FixOutcome::applied("appended empty <main>");
    };

    doc.insert_before(children[first], main);
    for &child in &children[first..=last] {
        doc.append_child(main, child);
    }
    FixOutcome::applied(format!("wrapped {} body children in <main>", last - first + 1))
}

fn add_nav(doc: &mut Document, html: NodeId) -> FixOutcome {
    if doc.find_first("nav").is_some() {
        return FixOutcome::skipped("nav present");
    }
    let body = ensure_body(doc, html);
    let nav = doc.create_element("nav", &[]);
    // keep a leading skip link first
    let index = match doc.element_children(body).next() {
        Some(first) if is_skip_link(doc, first) => doc.position(body, first).map_or(0, |i| i + 1),
        _ => 0,
    };
    doc.insert_child(body, index, nav);
    FixOutcome::applied("inserted <nav>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::audit;
    use crate::config::Config;
    use crate::extract::extract;
    use crate::labels::DisabledGenerator;
    use pretty_assertions::assert_eq;

    fn fix_page_issues(html: &str) -> Document {
        let config = Config::default();
        let ctx = Remediator { config: &config, generator: &DisabledGenerator };
        let mut doc = Document::parse(html).unwrap();
        let issues = audit(&extract(&doc, &config.extraction));
        for issue in issues.iter().filter(|i| i.source.role == crate::extract::Role::Document) {
            fix_page(&ctx, &mut doc, issue);
        }
        doc
    }

    fn body_html(doc: &Document) -> String {
        doc.body().map(|b| doc.outer_html(b)).unwrap_or_default()
    }

    #[test]
    fn test_head_metadata_added() {
        let doc = fix_page_issues("<html><head></head><body><main></main><nav></nav></body></html>");
        let head = doc.head().unwrap();
        assert_eq!(
            doc.outer_html(head),
            r#"<head><meta charset="utf-8"><title>Accessible Page</title><meta name="viewport" content="width=device-width, initial-scale=1"></head>"#
        );
        let html = doc.document_element().unwrap();
        assert_eq!(doc.attr(html, "lang"), Some("en"));
    }

    #[test]
    fn test_existing_metadata_kept() {
        let doc = fix_page_issues(
            r#"<html lang="de"><head><meta http-equiv="Content-Type" content="text/html; charset=utf-8"><title>Hallo</title></head><body></body></html>"#,
        );
        let html = doc.document_element().unwrap();
        assert_eq!(doc.attr(html, "lang"), Some("de"));
        assert_eq!(doc.find_all("title").len(), 1);
        assert_eq!(doc.find_all("meta").len(), 2);
    }

    #[test]
    fn test_empty_title_filled() {
        let doc = fix_page_issues("<title> </title>");
        let title = doc.find_first("title").unwrap();
        assert_eq!(doc.text(title), "Accessible Page");
    }

    #[test]
    fn test_graphic_title_left_alone() {
        let doc = fix_page_issues(
            r#"<html lang="en"><head><title></title></head><body><svg><title>Chart</title></svg></body></html>"#,
        );
        let head = doc.head().unwrap();
        let title = doc.find_first_in(head, "title").unwrap();
        assert_eq!(doc.text(title), "Accessible Page");
        let svg = doc.find_first("svg").unwrap();
        let icon_title = doc.find_first_in(svg, "title").unwrap();
        assert_eq!(doc.text(icon_title), "Chart");

        let doc = fix_page_issues(
            r#"<html lang="en"><head></head><body><svg><title>Chart</title></svg></body></html>"#,
        );
        assert_eq!(doc.find_all_in(doc.head().unwrap(), "title").len(), 1);
        assert_eq!(doc.find_all("title").len(), 2);
    }

    #[test]
    fn test_charset_added_beside_bare_content_type() {
        let doc = fix_page_issues(
            r#"<html lang="en"><head><meta http-equiv="Content-Type" content="text/html"><title>T</title></head><body></body></html>"#,
        );
        let head = doc.head().unwrap();
        let first = doc.element_children(head).next().unwrap();
        assert_eq!(doc.attr(first, "charset"), Some("utf-8"));
        let again = extract(&doc, &Config::default().extraction);
        assert!(again.last().unwrap().flag("has_charset"));
    }

    #[test]
    fn test_skip_link_nav_and_main_order() {
        let doc = fix_page_issues("<html><body><header>Logo</header><p>Hello</p><p>World</p><footer>f</footer></body></html>");
        let style = SKIP_LINK_STYLE;
        assert_eq!(
            body_html(&doc),
            format!(
                r##"<body><a href="#main" class="skip-link" style="{style}">Skip to main content</a><nav></nav><header>Logo</header><main id="main"><p>Hello</p><p>World</p></main><footer>f</footer></body>"##
            )
        );
    }

    #[test]
    fn test_main_wraps_large_container() {
        let long = "content ".repeat(20);
        let html = format!(
            r#"<body><div class="top"><nav>n</nav>{long}</div><div class="article">{long}</div><div>tail</div></body>"#
        );
        let doc = fix_page_issues(&html);
        let main = doc.find_first("main").unwrap();
        let wrapped = doc.element_children(main).next().unwrap();
        assert_eq!(doc.attr(wrapped, "class"), Some("article"));
        assert_eq!(doc.find_all("main").len(), 1);
        assert_eq!(doc.find_all("nav").len(), 1);
    }

    #[test]
    fn test_existing_main_gets_skip_target() {
        let doc = fix_page_issues("<body><nav></nav><main>x</main></body>");
        let main = doc.find_first("main").unwrap();
        assert_eq!(doc.attr(main, "id"), Some("main"));
    }

    #[test]
    fn test_empty_body_gets_empty_main() {
        let doc = fix_page_issues("<html><head><title>T</title></head><body>  </body></html>");
        assert_eq!(doc.find_all("main").len(), 1);
        let main = doc.find_first("main").unwrap();
        assert!(doc.children(main).is_empty());
    }
}
