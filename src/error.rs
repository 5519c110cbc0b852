// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for remedybot

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RemedyError>;

#[derive(Error, Debug)]
pub enum RemedyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// The parser produced no element at all; nothing can be remediated.
    #[error("HTML parsing error: document has no root element")]
    NoRootElement,

    #[error("Label generator error: {0}")]
    Generator(String),

    #[error("Worker task failed: {0}")]
    Task(String),
}
