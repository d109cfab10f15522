//! Rule: identify initial chunks that could be lazy loaded.

use crate::engine::Rule;
use advisor_core::{format_bytes, issue_id, FixType, Issue, IssueSeverity, NormalizedBundle, Result};
use serde_json::json;

const RULE_ID: &str = "lazy-load-candidates";

const DEFAULT_LAZY_LOAD_THRESHOLD: u64 = 100 * 1024;

/// Flags initial chunks over the threshold that have their own entry
/// point names.
///
/// A chunk with no entry point names is assumed to be the unsplittable
/// main bundle and is skipped.
pub struct LazyLoadCandidatesRule {
    min_lazy_load_threshold: u64,
}

impl LazyLoadCandidatesRule {
    pub fn new(min_lazy_load_threshold: Option<u64>) -> Self {
        Self {
            min_lazy_load_threshold: min_lazy_load_threshold
                .unwrap_or(DEFAULT_LAZY_LOAD_THRESHOLD),
        }
    }
}

impl Default for LazyLoadCandidatesRule {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Rule for LazyLoadCandidatesRule {
    fn id(&self) -> &'static str {
        RULE_ID
    }

    fn check(&self, bundle: &NormalizedBundle) -> Result<Vec<Issue>> {
        let issues = bundle
            .chunks
            .values()
            .filter(|chunk| {
                chunk.is_initial
                    && chunk.size > self.min_lazy_load_threshold
                    && !chunk.entry_points.is_empty()
            })
            .map(|chunk| {
                let entry_points = chunk.entry_points.join(", ");

                Issue {
                    id: issue_id(RULE_ID, &chunk.id),
                    rule_id: RULE_ID.to_string(),
                    severity: IssueSeverity::Medium,
                    title: format!("Lazy load candidate: {entry_points}"),
                    description: format!(
                        "Entry point \"{entry_points}\" ({}) is loaded initially. \
                         Consider lazy loading to reduce initial bundle size.",
                        format_bytes(chunk.size),
                    ),
                    bytes_estimate: Some(chunk.size),
                    affected_modules: chunk.modules.clone(),
                    fix_type: FixType::LazyLoadModule,
                    metadata: json!({
                        "chunkId": chunk.id,
                        "entryPoints": chunk.entry_points,
                        "size": chunk.size,
                    })
                    .as_object()
                    .cloned()
                    .unwrap_or_default(),
                }
            })
            .collect();

        Ok(issues)
    }
}
