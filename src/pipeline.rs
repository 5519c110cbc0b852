// SPDX-License-Identifier: PMPL-1.0-or-later
//! Pipeline entry point: parse, extract, audit, remediate, normalize, serialize.
//!
//! One document runs as a single sequential pass that exclusively owns its
//! tree. Batches fan out one task per document, bounded by a semaphore sized
//! from [`Config::worker_count`]; documents share nothing but the read-only
//! configuration and the label generator.

use crate::audit::{audit, Issue, Severity};
use crate::config::Config;
use crate::dom::Document;
use crate::error::{RemedyError, Result};
use crate::extract::{extract, Chunk};
use crate::labels::{DisabledGenerator, LabelGenerator};
use crate::normalize::normalize;
use crate::remediate::{remediate, RemediationReport};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// One document of a batch
#[derive(Debug, Clone)]
pub struct PageInput {
    /// Caller-chosen identifier, echoed back with the result
    pub name: String,
    pub html: String,
    pub base_url: String,
}

/// Everything a single pipeline run produced
#[derive(Debug, Clone, Serialize)]
pub struct PageOutcome {
    /// Remediated and normalized HTML
    pub html: String,
    /// Chunks of the original document
    pub chunks: Vec<Chunk>,
    /// Issues found in the original document
    pub issues: Vec<Issue>,
    pub report: RemediationReport,
    pub processed_at: DateTime<Utc>,
}

/// Issue counts by severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IssueSummary {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl IssueSummary {
    pub fn from_issues(issues: &[Issue]) -> Self {
        issues.iter().fold(Self::default(), |mut summary, issue| {
            match issue.severity {
                Severity::High => summary.high += 1,
                Severity::Medium => summary.medium += 1,
                Severity::Low => summary.low += 1,
            }
            summary
        })
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

impl PageOutcome {
    pub fn summary(&self) -> IssueSummary {
        IssueSummary::from_issues(&self.issues)
    }
}

/// Configured pipeline, cheap to clone into tasks
#[derive(Clone)]
pub struct Pipeline {
    config: Arc<Config>,
    generator: Arc<dyn LabelGenerator>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(Config::default(), Arc::new(DisabledGenerator))
    }
}

impl Pipeline {
    pub fn new(config: Config, generator: Arc<dyn LabelGenerator>) -> Self {
        Self {
            config: Arc::new(config),
            generator,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Extract and audit without changing anything
    pub fn audit(&self, html: &str) -> Result<(Vec<Chunk>, Vec<Issue>)> {
        let doc = Document::parse(html)?;
        let chunks = extract(&doc, &self.config.extraction);
        let issues = audit(&chunks);
        Ok((chunks, issues))
    }

    /// Run the full pipeline on one document.
    ///
    /// Only a document without any root element is an error; every other
    /// problem degrades to a best-effort result. An empty `base_url` skips
    /// URL normalization.
    pub async fn run(&self, html: &str, base_url: &str) -> Result<PageOutcome> {
        let mut doc = Document::parse(html)?;
        let chunks = extract(&doc, &self.config.extraction);
        let issues = audit(&chunks);
        debug!(chunks = chunks.len(), issues = issues.len(), "Audited document");

        let report = remediate(&mut doc, &issues, &self.config, self.generator.as_ref()).await;

        if base_url.trim().is_empty() {
            debug!("No base URL, skipping normalization");
        } else {
            normalize(&mut doc, base_url);
        }

        Ok(PageOutcome {
            html: doc.to_html(),
            chunks,
            issues,
            report,
            processed_at: Utc::now(),
        })
    }

    /// Run many documents concurrently. Results come back in input order.
    pub async fn run_batch(&self, pages: Vec<PageInput>) -> Vec<(String, Result<PageOutcome>)> {
        let workers = self.config.worker_count();
        let semaphore = Arc::new(Semaphore::new(workers));
        info!(pages = pages.len(), workers, "Starting batch");

        let mut handles = Vec::with_capacity(pages.len());
        for page in pages {
            let pipeline = self.clone();
            let semaphore = Arc::clone(&semaphore);
            let name = page.name.clone();
            let handle = tokio::spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| RemedyError::Task(e.to_string()))?;
                pipeline.run(&page.html, &page.base_url).await
            });
            handles.push((name, handle));
        }

        let mut results = Vec::with_capacity(handles.len());
        for (name, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => Err(RemedyError::Task(e.to_string())),
            };
            if let Err(e) = &result {
                warn!(page = %name, "Page failed: {}", e);
            }
            results.push((name, result));
        }

        info!(
            ok = results.iter().filter(|(_, r)| r.is_ok()).count(),
            failed = results.iter().filter(|(_, r)| r.is_err()).count(),
            "Batch complete"
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::IssueKind;

    #[tokio::test]
    async fn test_run_produces_remediated_html() {
        let pipeline = Pipeline::default();
        let outcome = pipeline
            .run(r#"<html><body><img src="cat.png"></body></html>"#, "https://example.com/")
            .await
            .unwrap();

        assert!(outcome.issues.iter().any(|i| i.kind == IssueKind::MissingAlt));
        assert!(outcome.html.contains(r#"alt="Image""#));
        assert!(outcome.html.contains(r#"src="https://example.com/cat.png""#));
        assert!(outcome.html.contains(r#"<base href="https://example.com/">"#));
        assert_eq!(outcome.report.records.len(), outcome.issues.len());
    }

    #[tokio::test]
    async fn test_summary_counts() {
        let outcome = Pipeline::default().run("<p>x</p>", "").await.unwrap();
        let summary = outcome.summary();
        // title and lang are medium; viewport, charset, skip link, and two landmarks are low
        assert_eq!(summary, IssueSummary { high: 0, medium: 2, low: 5 });
        assert_eq!(summary.total(), 7);
    }

    #[tokio::test]
    async fn test_empty_base_url_skips_normalization() {
        let outcome = Pipeline::default().run(r#"<a href="/x">Docs</a>"#, "").await.unwrap();
        assert!(outcome.html.contains(r#"href="/x""#));
        assert!(!outcome.html.contains("<base"));
    }

    #[tokio::test]
    async fn test_batch_preserves_order() {
        let config = Config {
            workers: 2,
            ..Config::default()
        };
        let pipeline = Pipeline::new(config, Arc::new(DisabledGenerator));
        let pages = (0..5)
            .map(|i| PageInput {
                name: format!("page-{}", i),
                html: format!("<h1>Page {}</h1>", i),
                base_url: "https://example.com/".to_string(),
            })
            .collect();

        let results = pipeline.run_batch(pages).await;
        let names: Vec<_> = results.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["page-0", "page-1", "page-2", "page-3", "page-4"]);
        for (i, (_, result)) in results.iter().enumerate() {
            let outcome = result.as_ref().unwrap();
            assert!(outcome.html.contains(&format!("Page {}", i)));
        }
    }
}
