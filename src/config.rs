// SPDX-License-Identifier: PMPL-1.0-or-later
//! Configuration for remedybot
//!
//! All thresholds and fallback strings live here and are passed into the
//! pipeline explicitly. Every section is `#[serde(default)]`, so a partial
//! TOML file only overrides what it names.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chunk extraction thresholds
    pub extraction: ExtractionConfig,
    /// Text-generation collaborator settings
    pub labels: LabelConfig,
    /// Deterministic strings used when nothing better is available
    pub fallbacks: Fallbacks,
    /// Batch worker pool size (0 = available parallelism)
    pub workers: usize,
}

impl Config {
    /// Effective number of concurrent documents for batch runs
    pub fn worker_count(&self) -> usize {
        if self.workers > 0 {
            return self.workers;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
    }
}

/// Chunk extraction thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Text length at which a generic `div` container becomes a text block
    pub container_min_chars: usize,
    /// Minimum text length for any text-block chunk
    pub block_min_chars: usize,
    /// Maximum number of ancestors encoded in a structural path
    pub path_depth: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            container_min_chars: 120,
            block_min_chars: 60,
            path_depth: 12,
        }
    }
}

/// Text-generation collaborator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Hard timeout for one `generate_label` call
    pub timeout_ms: u64,
    /// Word budget for generated alt text
    pub max_alt_words: usize,
    /// Context characters handed to the generator
    pub context_chars: usize,
    /// Cap for labels derived from surrounding text
    pub max_label_chars: usize,
}

impl LabelConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5_000,
            max_alt_words: 12,
            context_chars: 500,
            max_label_chars: 80,
        }
    }
}

/// Fallback strings applied by the remediation engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fallbacks {
    pub alt: String,
    pub poor_link: String,
    pub link_name: String,
    pub button: String,
    pub anchor_button: String,
    pub field: String,
    pub iframe_title: String,
    pub title: String,
    pub lang: String,
    pub viewport: String,
    pub skip_link: String,
}

impl Default for Fallbacks {
    fn default() -> Self {
        Self {
            alt: "Image".to_string(),
            poor_link: "Learn More".to_string(),
            link_name: "Link".to_string(),
            button: "Submit".to_string(),
            anchor_button: "Button".to_string(),
            field: "Field".to_string(),
            iframe_title: "Embedded content".to_string(),
            title: "Accessible Page".to_string(),
            lang: "en".to_string(),
            viewport: "width=device-width, initial-scale=1".to_string(),
            skip_link: "Skip to main content".to_string(),
        }
    }
}

/// Load configuration from a TOML file, falling back to defaults when absent
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("Config file not found at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;

    debug!(?config, "Loaded configuration");
    Ok(config)
}
