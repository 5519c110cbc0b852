// SPDX-License-Identifier: PMPL-1.0-or-later
//! Text-generation collaborator boundary.
//!
//! The remediation engine asks a [`LabelGenerator`] for short human-readable
//! labels (alt text). The call is bounded by a hard timeout and every
//! failure mode, including an unconfigured generator, resolves to a fixed
//! fallback string. Nothing here ever fails the pipeline.

use crate::config::LabelConfig;
use crate::error::{RemedyError, Result};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Produces a short label for an element from its surrounding text
#[async_trait]
pub trait LabelGenerator: Send + Sync {
    /// Generate at most `max_words` words describing `context`
    async fn generate_label(&self, context: &str, max_words: usize) -> Result<String>;
}

/// Generator used when no collaborator is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGenerator;

#[async_trait]
impl LabelGenerator for DisabledGenerator {
    async fn generate_label(&self, _context: &str, _max_words: usize) -> Result<String> {
        Err(RemedyError::Generator("no label generator configured".to_string()))
    }
}

/// Ask the generator for a label, falling back on error, timeout, or empty output
pub async fn label_or_fallback(
    generator: &dyn LabelGenerator,
    context: &str,
    max_words: usize,
    config: &LabelConfig,
    fallback: &str,
) -> String {
    let context = truncate_chars(context, config.context_chars);
    let call = generator.generate_label(context, max_words);

    match tokio::time::timeout(config.timeout(), call).await {
        Ok(Ok(raw)) => {
            let label = clean_label(&raw, max_words);
            if label.is_empty() {
                debug!("Label generator returned nothing usable, using fallback");
                fallback.to_string()
            } else {
                label
            }
        }
        Ok(Err(RemedyError::Generator(reason))) => {
            debug!(%reason, "Label generator unavailable, using fallback");
            fallback.to_string()
        }
        Ok(Err(e)) => {
            warn!("Label generator failed: {}", e);
            fallback.to_string()
        }
        Err(_) => {
            warn!(timeout_ms = config.timeout_ms, "Label generator timed out");
            fallback.to_string()
        }
    }
}

/// Strip surrounding quotes and whitespace and cap the word count
pub fn clean_label(raw: &str, max_words: usize) -> String {
    let trimmed = raw.trim().trim_matches(|c| c == '"' || c == '\'').trim();
    trimmed
        .split_whitespace()
        .take(max_words.max(1))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cut `text` to at most `max` characters, on a char boundary
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
