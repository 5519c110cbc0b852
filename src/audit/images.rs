// SPDX-License-Identifier: PMPL-1.0-or-later
//! Image alt text rule
//!
//! Every image chunk needs a non-empty `alt`. Decorative `alt=""` is treated
//! as missing here because the remediation engine can always supply a label.

use super::{Issue, IssueKind, Rule};
use crate::extract::{Chunk, Role};

pub struct MissingAlt;

impl Rule for MissingAlt {
    fn name(&self) -> &str {
        "Missing Alt"
    }

    fn description(&self) -> &str {
        "Flags images with missing or empty alt text"
    }

    fn check(&self, chunks: &[Chunk]) -> Vec<Issue> {
        chunks
            .iter()
            .filter(|c| c.role == Role::Image && c.attr("alt").trim().is_empty())
            .map(|c| {
                Issue::new(IssueKind::MissingAlt, c)
                    .with_detail("reason", "Image without alt attribute or empty alt")
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Severity;

    fn image(alt: &str) -> Chunk {
        Chunk::new(Role::Image, "html>body>img".into(), String::new())
            .with_attr("src", "a.png")
            .with_attr("alt", alt)
    }

    #[test]
    fn test_missing_and_blank_alt() {
        let chunks = vec![image(""), image("   "), image("Company logo")];
        let issues = MissingAlt.check(&chunks);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].severity, Severity::Medium);
        assert_eq!(issues[0].source.attr("src"), "a.png");
    }

    #[test]
    fn test_ignores_other_roles() {
        let link = Chunk::new(Role::Link, "html>body>a".into(), String::new());
        assert!(MissingAlt.check(&[link]).is_empty());
    }
}
