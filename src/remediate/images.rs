// SPDX-License-Identifier: PMPL-1.0-or-later
//! Alt text for images

use super::locate::{locate, non_empty};
use super::{FixOutcome, Remediator};
use crate::audit::Issue;
use crate::dom::{Document, NodeId};
use crate::extract::image_source;
use crate::labels::label_or_fallback;

/// Set `alt` from the image's surrounding text, via the label generator
pub async fn fix_missing_alt(ctx: &Remediator<'_>, doc: &mut Document, issue: &Issue) -> FixOutcome {
    let target = {
        let doc: &Document = doc;
        let key = non_empty(issue.source.attr("src")).map(|src| move |id: NodeId| image_source(doc, id) == src);
        locate(
            doc,
            &doc.find_all("img"),
            &issue.source.path,
            ctx.depth(),
            key,
            |id| doc.attr_trimmed(id, "alt").is_empty(),
        )
        .map(|found| (found.id, image_context(doc, found.id)))
    };
    let Some((id, context)) = target else {
        return FixOutcome::skipped("no image without alt");
    };

    let labels = &ctx.config.labels;
    let alt = label_or_fallback(
        ctx.generator,
        &context,
        labels.max_alt_words,
        labels,
        &ctx.config.fallbacks.alt,
    )
    .await;
    doc.set_attr(id, "alt", &alt);
    FixOutcome::applied(format!("alt=\"{}\"", alt))
}

/// Text of the image's parent element
fn image_context(doc: &Document, id: NodeId) -> String {
    doc.parent(id).map(|parent| doc.text(parent)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::IssueKind;
    use crate::config::Config;
    use crate::error::Result;
    use crate::extract::{Chunk, Role};
    use crate::labels::{DisabledGenerator, LabelGenerator};
    use async_trait::async_trait;

    struct Echo;

    #[async_trait]
    impl LabelGenerator for Echo {
        async fn generate_label(&self, context: &str, _max_words: usize) -> Result<String> {
            Ok(format!("Photo of {}", context))
        }
    }

    fn issue(src: &str, path: &str) -> Issue {
        let chunk = Chunk::new(Role::Image, path.to_string(), String::new()).with_attr("src", src);
        Issue::new(IssueKind::MissingAlt, &chunk)
    }

    #[tokio::test]
    async fn test_fallback_alt_without_generator() {
        let config = Config::default();
        let ctx = Remediator { config: &config, generator: &DisabledGenerator };
        let mut doc = Document::parse("<img>").unwrap();
        let outcome = fix_missing_alt(&ctx, &mut doc, &issue("", "html>body>img")).await;
        assert!(outcome.is_applied());
        let img = doc.find_first("img").unwrap();
        assert_eq!(doc.attr(img, "alt"), Some("Image"));
    }

    #[tokio::test]
    async fn test_matches_by_source_and_uses_context() {
        let config = Config::default();
        let ctx = Remediator { config: &config, generator: &Echo };
        let mut doc = Document::parse(
            r#"<figure><img src="a.png"></figure><figure><img data-src="b.png"> team</figure>"#,
        )
        .unwrap();
        fix_missing_alt(&ctx, &mut doc, &issue("b.png", "html>body>figure>img")).await;
        let imgs = doc.find_all("img");
        assert_eq!(doc.attr(imgs[0], "alt"), None);
        assert_eq!(doc.attr(imgs[1], "alt"), Some("Photo of team"));
    }

    #[tokio::test]
    async fn test_already_described_is_skipped() {
        let config = Config::default();
        let ctx = Remediator { config: &config, generator: &DisabledGenerator };
        let mut doc = Document::parse(r#"<img src="a.png" alt="Logo">"#).unwrap();
        let outcome = fix_missing_alt(&ctx, &mut doc, &issue("a.png", "html>body>img")).await;
        assert!(!outcome.is_applied());
    }
}
