// SPDX-License-Identifier: PMPL-1.0-or-later
//! Directory scanner for batch remediation.
//!
//! Walks directory trees and collects HTML documents as pipeline inputs.

use crate::dom::decode_lossy;
use crate::error::Result;
use crate::pipeline::PageInput;
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

/// File extensions treated as HTML documents
const SCANNABLE_EXTENSIONS: &[&str] = &["html", "htm", "xhtml"];

/// Directories to skip
const SKIP_DIRS: &[&str] = &[
    "node_modules", ".git", "target", "dist", "build",
    "_build", "vendor", ".next", ".nuxt", "coverage",
];

/// HTML files under `dir`, sorted by path
pub fn find_html_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            // Skip hidden and excluded directories below the root
            let name = e.file_name().to_str().unwrap_or("");
            if e.depth() > 0 && e.file_type().is_dir() {
                return !SKIP_DIRS.contains(&name) && !name.starts_with('.');
            }
            true
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| SCANNABLE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        })
        .collect();
    files.sort();
    files
}

/// Read every HTML file under `dir` into a batch.
///
/// Page names are paths relative to `dir`. Unreadable files are skipped.
pub fn scan_directory(dir: &Path, base_url: &str) -> Vec<PageInput> {
    info!("Scanning directory: {}", dir.display());

    let pages: Vec<PageInput> = find_html_files(dir)
        .into_iter()
        .filter_map(|path| match read_page(&path, dir, base_url) {
            Ok(page) => Some(page),
            Err(e) => {
                info!("Skipping {}: {}", path.display(), e);
                None
            }
        })
        .collect();

    info!("Found {} HTML documents", pages.len());
    pages
}

/// Read a single file as a pipeline input, named relative to `root`
pub fn read_page(path: &Path, root: &Path, base_url: &str) -> Result<PageInput> {
    let bytes = std::fs::read(path)?;
    let name = path.strip_prefix(root).unwrap_or(path).display().to_string();
    Ok(PageInput {
        name,
        html: decode_lossy(&bytes),
        base_url: base_url.to_string(),
    })
}
