//! Rule: detect oversized chunks that are mostly vendor code.

use crate::engine::Rule;
use advisor_core::{format_bytes, issue_id, FixType, Issue, IssueSeverity, NormalizedBundle, Result};
use serde_json::json;

const RULE_ID: &str = "large-vendor-chunks";

const DEFAULT_MAX_CHUNK_SIZE: u64 = 250 * 1024;

/// Vendor fraction above which a chunk counts as vendor-heavy. The
/// comparison is strict: exactly 0.7 does not qualify.
const VENDOR_RATIO_THRESHOLD: f64 = 0.7;

/// Flags chunks over the size threshold whose members are mostly vendor
/// modules, suggesting a vendor split.
pub struct LargeVendorChunksRule {
    max_chunk_size: u64,
}

impl LargeVendorChunksRule {
    pub fn new(max_chunk_size: Option<u64>) -> Self {
        Self {
            max_chunk_size: max_chunk_size.unwrap_or(DEFAULT_MAX_CHUNK_SIZE),
        }
    }
}

impl Default for LargeVendorChunksRule {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Rule for LargeVendorChunksRule {
    fn id(&self) -> &'static str {
        RULE_ID
    }

    fn check(&self, bundle: &NormalizedBundle) -> Result<Vec<Issue>> {
        let issues = bundle
            .chunks
            .values()
            .filter(|chunk| chunk.size > self.max_chunk_size)
            .filter_map(|chunk| {
                let members: Vec<_> = bundle.modules_in_chunk(chunk).collect();
                // Division-by-zero guard: skip chunks with no resolvable
                // modules.
                if members.is_empty() {
                    return None;
                }

                let vendor: Vec<_> = members.iter().filter(|m| m.is_vendor).collect();
                let vendor_ratio = vendor.len() as f64 / members.len() as f64;
                if vendor_ratio <= VENDOR_RATIO_THRESHOLD {
                    return None;
                }

                let vendor_size: u64 = vendor.iter().map(|m| m.size).sum();
                let severity = if chunk.is_initial {
                    IssueSeverity::High
                } else {
                    IssueSeverity::Medium
                };

                Some(Issue {
                    id: issue_id(RULE_ID, &chunk.id),
                    rule_id: RULE_ID.to_string(),
                    severity,
                    title: format!("Large vendor chunk: {}", chunk.id),
                    description: format!(
                        "Chunk \"{}\" contains {} of vendor code ({} total). Consider \
                         code splitting to improve load performance{}.",
                        chunk.id,
                        format_bytes(vendor_size),
                        format_bytes(chunk.size),
                        if chunk.is_initial {
                            " (this is an initial chunk)"
                        } else {
                            ""
                        },
                    ),
                    bytes_estimate: Some(chunk.size),
                    affected_modules: vendor.iter().map(|m| m.id.clone()).collect(),
                    fix_type: FixType::SplitChunk,
                    metadata: json!({
                        "chunkId": chunk.id,
                        "chunkSize": chunk.size,
                        "vendorSize": vendor_size,
                        "isInitial": chunk.is_initial,
                    })
                    .as_object()
                    .cloned()
                    .unwrap_or_default(),
                })
            })
            .collect();

        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::Module;
    use crate::testutil::{bundle, chunk, module, vendor_module};

    fn mixed_modules(vendor_count: usize, plain_count: usize) -> Vec<Module> {
        let mut modules = Vec::new();
        for i in 0..vendor_count {
            modules.push(vendor_module(
                &format!("v{i}"),
                1000,
                &["main"],
                &format!("pkg-{i}"),
                Some("1.0.0"),
            ));
        }
        for i in 0..plain_count {
            modules.push(module(&format!("p{i}"), 1000, &["main"]));
        }
        modules
    }

    #[test]
    fn test_vendor_heavy_initial_chunk_is_high_severity() {
        let bundle = bundle(
            mixed_modules(9, 1),
            vec![chunk("main", 300_000, true, &["main"])],
        );

        let issues = LargeVendorChunksRule::default().check(&bundle).unwrap();

        assert_eq!(issues.len(), 1);
        let issue = &issues[0];
        assert_eq!(issue.severity, IssueSeverity::High);
        assert_eq!(issue.bytes_estimate, Some(300_000));
        assert_eq!(issue.fix_type, FixType::SplitChunk);
        assert_eq!(issue.affected_modules.len(), 9);
        assert!(issue.affected_modules.iter().all(|id| id.starts_with('v')));
    }

    #[test]
    fn test_non_initial_chunk_is_medium_severity() {
        let bundle = bundle(
            mixed_modules(10, 0),
            vec![chunk("main", 300_000, false, &[])],
        );

        let issues = LargeVendorChunksRule::default().check(&bundle).unwrap();
        assert_eq!(issues[0].severity, IssueSeverity::Medium);
    }

    #[test]
    fn test_vendor_ratio_boundary_is_strict() {
        // Exactly 0.7 vendor: must not trigger.
        let at_boundary = bundle(
            mixed_modules(7, 3),
            vec![chunk("main", 300_000, true, &["main"])],
        );
        assert!(LargeVendorChunksRule::default()
            .check(&at_boundary)
            .unwrap()
            .is_empty());

        // Just above 0.7: triggers.
        let above = bundle(
            mixed_modules(71, 29),
            vec![chunk("main", 300_000, true, &["main"])],
        );
        assert_eq!(LargeVendorChunksRule::default().check(&above).unwrap().len(), 1);
    }

    #[test]
    fn test_small_chunks_are_skipped() {
        let bundle = bundle(
            mixed_modules(10, 0),
            vec![chunk("main", 100_000, true, &["main"])],
        );

        assert!(LargeVendorChunksRule::default().check(&bundle).unwrap().is_empty());
    }

    #[test]
    fn test_chunk_with_no_resolvable_modules_is_skipped() {
        let mut bundle = bundle(vec![], vec![chunk("main", 300_000, true, &["main"])]);
        // Member ids that resolve to nothing.
        bundle
            .chunks
            .get_mut("main")
            .unwrap()
            .modules
            .push("ghost".to_string());

        assert!(LargeVendorChunksRule::default().check(&bundle).unwrap().is_empty());
    }
}
