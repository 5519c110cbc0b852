// SPDX-License-Identifier: PMPL-1.0-or-later
//! Heading hierarchy rule (the only sequential rule)
//!
//! Scans heading chunks in document order, remembering the last level that
//! parsed. A heading whose level exceeds the remembered one by more than one
//! is flagged. Unparseable levels neither trigger nor update the scan.

use super::{Issue, IssueKind, Rule};
use crate::extract::{Chunk, Role};

pub struct HeadingOrder;

/// Level from an `h{n}` tag, `None` outside 1..=6
pub fn heading_level(tag: &str) -> Option<u8> {
    let tag = tag.trim().to_ascii_lowercase();
    let digits = tag.strip_prefix('h')?;
    match digits.parse::<u8>() {
        Ok(level @ 1..=6) => Some(level),
        _ => None,
    }
}

impl Rule for HeadingOrder {
    fn name(&self) -> &str {
        "Heading Order"
    }

    fn description(&self) -> &str {
        "Flags headings that skip one or more levels"
    }

    fn check(&self, chunks: &[Chunk]) -> Vec<Issue> {
        let mut issues = Vec::new();
        let mut last_level: Option<u8> = None;

        for chunk in chunks.iter().filter(|c| c.role == Role::Heading) {
            let Some(level) = heading_level(chunk.attr("tag")) else {
                continue;
            };
            if let Some(prev) = last_level {
                if level > prev + 1 {
                    issues.push(
                        Issue::new(IssueKind::BadHeadingOrder, chunk)
                            .with_detail("prev", prev)
                            .with_detail("curr", level),
                    );
                }
            }
            last_level = Some(level);
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headings(tags: &[&str]) -> Vec<Chunk> {
        tags.iter()
            .map(|t| Chunk::new(Role::Heading, format!("html>body>{}", t), t.to_string()).with_attr("tag", *t))
            .collect()
    }

    fn transitions(tags: &[&str]) -> Vec<(u64, u64)> {
        HeadingOrder
            .check(&headings(tags))
            .iter()
            .map(|i| (i.details["prev"].as_u64().unwrap(), i.details["curr"].as_u64().unwrap()))
            .collect()
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!(heading_level("h3"), Some(3));
        assert_eq!(heading_level(" H6 "), Some(6));
        assert_eq!(heading_level("h7"), None);
        assert_eq!(heading_level("h"), None);
        assert_eq!(heading_level("p"), None);
    }

    #[test]
    fn test_single_jump() {
        assert_eq!(transitions(&["h2", "h4"]), vec![(2, 4)]);
    }

    #[test]
    fn test_only_second_transition_flagged() {
        assert_eq!(transitions(&["h2", "h3", "h5"]), vec![(3, 5)]);
    }

    #[test]
    fn test_steps_of_one_or_less_never_flagged() {
        assert!(transitions(&["h1", "h2", "h3", "h2", "h1", "h2", "h3", "h4", "h1"]).is_empty());
        assert!(transitions(&["h4"]).is_empty());
    }

    #[test]
    fn test_unparseable_level_does_not_reset() {
        assert_eq!(transitions(&["h1", "hx", "h3"]), vec![(1, 3)]);
    }
}
