// SPDX-License-Identifier: PMPL-1.0-or-later
//! Remedybot - HTML accessibility audit and remediation
//!
//! Part of the gitbot-fleet ecosystem. Remedybot takes a raw HTML page,
//! finds common accessibility defects, and patches them in place, returning
//! a page that renders correctly from another origin.
//!
//! ## Pipeline
//!
//! 1. **Parse** (`dom`): HTML text becomes an arena tree with parent links
//!    and structural path addressing.
//! 2. **Extract** (`extract`): one pass emits typed chunks (images, headings,
//!    links, controls, iframes, graphics, text blocks, and one page chunk).
//! 3. **Audit** (`audit`): independent rules turn chunks into issues with a
//!    fixed kind and severity vocabulary.
//! 4. **Remediate** (`remediate`): one patch per issue, in issue order, on
//!    the live tree. Alt text comes from a pluggable [`labels::LabelGenerator`]
//!    with a timeout and fixed fallbacks.
//! 5. **Normalize** (`normalize`): `<base href>` plus absolute image and link
//!    URLs.
//!
//! [`pipeline::Pipeline`] runs all of it for one page or a bounded batch.

pub mod audit;
pub mod config;
pub mod dom;
pub mod error;
pub mod extract;
pub mod labels;
pub mod normalize;
pub mod pipeline;
pub mod remediate;
pub mod report;
pub mod scanner;

pub use config::Config;
pub use error::{RemedyError, Result};
pub use pipeline::{PageInput, PageOutcome, Pipeline};
