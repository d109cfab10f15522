//! Rule: detect packages and modules with an outsized share of the
//! optimized output.
//!
//! Source sizes are pre-optimization, chunk sizes post-optimization, so
//! the two cannot be compared directly. The rule apportions each chunk's
//! optimized size back onto its contributors in proportion to their
//! pre-optimization share, then sums that estimate across every chunk
//! the subject appears in.

use crate::engine::Rule;
use advisor_core::{
    format_bytes, issue_id, FixType, Issue, IssueSeverity, Module, NormalizedBundle, Result,
};
use indexmap::IndexMap;
use serde_json::json;

const RULE_ID: &str = "huge-modules";

const DEFAULT_MAX_MODULE_SIZE: u64 = 200 * 1024;

/// How many representative import sub-paths to surface per package.
const SUBPATH_SAMPLE_LIMIT: usize = 3;

/// Build-artifact path markers that make a sub-path useless for display.
const ARTIFACT_MARKERS: [&str; 4] = ["cjs/", "esm/", ".production", ".development"];

/// Threshold-driven check for heavyweight packages and modules.
///
/// Modules resolved to a package are aggregated per package and reported
/// with a replace-package fix; loose modules are evaluated individually
/// with an optimize-imports fix.
pub struct HugeModulesRule {
    max_module_size: u64,
}

impl HugeModulesRule {
    pub fn new(max_module_size: Option<u64>) -> Self {
        Self {
            max_module_size: max_module_size.unwrap_or(DEFAULT_MAX_MODULE_SIZE),
        }
    }

    fn severity(&self, estimated: f64) -> IssueSeverity {
        if estimated > (self.max_module_size * 2) as f64 {
            IssueSeverity::High
        } else {
            IssueSeverity::Medium
        }
    }
}

impl Default for HugeModulesRule {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Rule for HugeModulesRule {
    fn id(&self) -> &'static str {
        RULE_ID
    }

    fn check(&self, bundle: &NormalizedBundle) -> Result<Vec<Issue>> {
        let chunk_source_totals = chunk_source_totals(bundle);
        let threshold = self.max_module_size as f64;

        let mut packaged: IndexMap<&str, Vec<&Module>> = IndexMap::new();
        let mut standalone: Vec<&Module> = Vec::new();
        for module in bundle.modules.values() {
            match module.package_name.as_deref() {
                Some(name) => packaged.entry(name).or_default().push(module),
                None => standalone.push(module),
            }
        }

        let mut issues = Vec::new();

        for (name, modules) in &packaged {
            let estimated = apportioned_size(bundle, &chunk_source_totals, modules);
            if estimated <= threshold {
                continue;
            }

            // Ceiling, so the reported bytes stay strictly above the
            // threshold that gated emission.
            let estimated_bytes = estimated.ceil() as u64;
            let source_size: u64 = modules.iter().map(|m| m.size).sum();
            let sample_paths = sample_import_subpaths(name, modules);

            issues.push(Issue {
                id: issue_id(RULE_ID, name),
                rule_id: RULE_ID.to_string(),
                severity: self.severity(estimated),
                title: format!("Huge module: {name}"),
                description: format!(
                    "Package \"{name}\" adds an estimated {} to the optimized bundle \
                     ({} of source across {} modules). Consider replacing it with a \
                     lighter alternative or importing only the parts you use.",
                    format_bytes(estimated_bytes),
                    format_bytes(source_size),
                    modules.len(),
                ),
                bytes_estimate: Some(estimated_bytes),
                affected_modules: modules.iter().map(|m| m.id.clone()).collect(),
                fix_type: FixType::ReplacePackage,
                metadata: json!({
                    "packageName": name,
                    "estimatedBundledSize": estimated_bytes,
                    "sourceSize": source_size,
                    "moduleCount": modules.len(),
                    "importedPaths": sample_paths,
                })
                .as_object()
                .cloned()
                .unwrap_or_default(),
            });
        }

        for module in standalone {
            let estimated = apportioned_size(bundle, &chunk_source_totals, &[module]);
            if estimated <= threshold {
                continue;
            }

            let estimated_bytes = estimated.ceil() as u64;
            let subject = if module.path.is_empty() {
                module.id.as_str()
            } else {
                module.path.as_str()
            };

            issues.push(Issue {
                id: issue_id(RULE_ID, &module.id),
                rule_id: RULE_ID.to_string(),
                severity: self.severity(estimated),
                title: format!("Huge module: {subject}"),
                description: format!(
                    "Module \"{subject}\" adds an estimated {} to the optimized bundle \
                     ({} of source). Consider splitting it, tree-shaking unused code, \
                     or lazy loading it.",
                    format_bytes(estimated_bytes),
                    format_bytes(module.size),
                ),
                bytes_estimate: Some(estimated_bytes),
                affected_modules: vec![module.id.clone()],
                fix_type: FixType::OptimizeImports,
                metadata: json!({
                    "moduleId": module.id,
                    "modulePath": module.path,
                    "estimatedBundledSize": estimated_bytes,
                    "sourceSize": module.size,
                })
                .as_object()
                .cloned()
                .unwrap_or_default(),
            });
        }

        Ok(issues)
    }
}

/// Total pre-optimization source bytes per chunk, over all modules.
fn chunk_source_totals(bundle: &NormalizedBundle) -> IndexMap<&str, u64> {
    bundle
        .modules
        .values()
        .fold(IndexMap::new(), |mut totals, module| {
            for chunk_id in &module.chunks {
                *totals.entry(chunk_id.as_str()).or_insert(0) += module.size;
            }
            totals
        })
}

/// Post-optimization size estimate for a set of modules.
///
/// For each chunk the subject touches, the chunk's optimized size is
/// distributed proportionally to the subject's share of that chunk's
/// source bytes. Chunks with zero recorded source bytes, or chunk IDs
/// that resolve to no chunk, contribute nothing.
fn apportioned_size(
    bundle: &NormalizedBundle,
    chunk_source_totals: &IndexMap<&str, u64>,
    modules: &[&Module],
) -> f64 {
    let subject_per_chunk: IndexMap<&str, u64> =
        modules.iter().fold(IndexMap::new(), |mut shares, module| {
            for chunk_id in &module.chunks {
                *shares.entry(chunk_id.as_str()).or_insert(0) += module.size;
            }
            shares
        });

    subject_per_chunk
        .iter()
        .filter_map(|(chunk_id, subject_bytes)| {
            let chunk = bundle.chunks.get(*chunk_id)?;
            let total = chunk_source_totals.get(chunk_id).copied().unwrap_or(0);
            if total == 0 {
                return None;
            }
            Some(chunk.size as f64 * *subject_bytes as f64 / total as f64)
        })
        .sum()
}

/// Up to three distinct import sub-paths for display, skipping
/// build-artifact paths. Purely cosmetic; never affects sizing.
fn sample_import_subpaths(package_name: &str, modules: &[&Module]) -> Vec<String> {
    let needle = format!("{package_name}/");
    let mut samples: Vec<String> = Vec::new();

    for module in modules {
        if samples.len() >= SUBPATH_SAMPLE_LIMIT {
            break;
        }
        let Some(idx) = module.path.rfind(&needle) else {
            continue;
        };
        let subpath = &module.path[idx + needle.len()..];
        if subpath.is_empty() || ARTIFACT_MARKERS.iter().any(|m| subpath.contains(m)) {
            continue;
        }
        if !samples.iter().any(|s| s == subpath) {
            samples.push(subpath.to_string());
        }
    }

    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{bundle, chunk, module, vendor_module};

    #[test]
    fn test_package_over_threshold_is_flagged() {
        // One module filling the whole chunk: the estimate equals the
        // chunk's optimized size.
        let bundle = bundle(
            vec![vendor_module("0", 250_000, &["main"], "huge-lib", Some("1.0.0"))],
            vec![chunk("main", 250_000, true, &["main"])],
        );

        let issues = HugeModulesRule::default().check(&bundle).unwrap();

        assert_eq!(issues.len(), 1);
        let issue = &issues[0];
        assert_eq!(issue.rule_id, "huge-modules");
        assert_eq!(issue.bytes_estimate, Some(250_000));
        assert_eq!(issue.severity, IssueSeverity::Medium);
        assert_eq!(issue.fix_type, FixType::ReplacePackage);
        assert_eq!(issue.affected_modules, vec!["0"]);
    }

    #[test]
    fn test_threshold_is_strict() {
        let bundle = bundle(
            vec![vendor_module("0", 1000, &["main"], "lib", Some("1.0.0"))],
            vec![chunk("main", 1000, true, &["main"])],
        );

        // Estimate is exactly 1000: not over an equal threshold.
        let at = HugeModulesRule::new(Some(1000)).check(&bundle).unwrap();
        assert!(at.is_empty());

        let below = HugeModulesRule::new(Some(999)).check(&bundle).unwrap();
        assert_eq!(below.len(), 1);
    }

    #[test]
    fn test_reported_estimate_stays_above_threshold() {
        // The subject's share is 500 * 2/3 = 333.33 bytes. Emission is
        // gated on the exact value; the reported estimate must not round
        // back down onto the 333-byte threshold.
        let bundle = bundle(
            vec![
                vendor_module("0", 2, &["main"], "lib", Some("1.0.0")),
                module("1", 1, &["main"]),
            ],
            vec![chunk("main", 500, true, &["main"])],
        );

        let issues = HugeModulesRule::new(Some(333)).check(&bundle).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].bytes_estimate, Some(334));
        assert!(issues[0].bytes_estimate.unwrap() > 333);
    }

    #[test]
    fn test_severity_high_strictly_above_double_threshold() {
        let exactly_double = bundle(
            vec![vendor_module("0", 1000, &["main"], "lib", Some("1.0.0"))],
            vec![chunk("main", 1000, true, &["main"])],
        );
        let issues = HugeModulesRule::new(Some(500)).check(&exactly_double).unwrap();
        assert_eq!(issues[0].severity, IssueSeverity::Medium);

        let above_double = bundle(
            vec![vendor_module("0", 1001, &["main"], "lib", Some("1.0.0"))],
            vec![chunk("main", 1001, true, &["main"])],
        );
        let issues = HugeModulesRule::new(Some(500)).check(&above_double).unwrap();
        assert_eq!(issues[0].severity, IssueSeverity::High);
    }

    #[test]
    fn test_apportionment_splits_chunk_by_source_share() {
        // Chunk minifies to 1000 bytes; the package contributed 750 of
        // the 1000 source bytes, the app module 250.
        let bundle = bundle(
            vec![
                vendor_module("0", 750, &["main"], "lib", Some("1.0.0")),
                module("1", 250, &["main"]),
            ],
            vec![chunk("main", 1000, true, &["main"])],
        );

        let issues = HugeModulesRule::new(Some(700)).check(&bundle).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].bytes_estimate, Some(750));

        // Dropping the threshold picks up the loose module's 250 share.
        let issues = HugeModulesRule::new(Some(200)).check(&bundle).unwrap();
        assert_eq!(issues.len(), 2);
        let loose = issues.iter().find(|i| i.fix_type == FixType::OptimizeImports);
        assert_eq!(loose.unwrap().bytes_estimate, Some(250));
    }

    #[test]
    fn test_estimate_sums_across_chunks() {
        let bundle = bundle(
            vec![
                vendor_module("0", 500, &["a"], "lib", Some("1.0.0")),
                vendor_module("1", 500, &["b"], "lib", Some("1.0.0")),
            ],
            vec![chunk("a", 400, true, &["a"]), chunk("b", 300, false, &[])],
        );

        let issues = HugeModulesRule::new(Some(600)).check(&bundle).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].bytes_estimate, Some(700));
        assert_eq!(issues[0].affected_modules, vec!["0", "1"]);
    }

    #[test]
    fn test_unmapped_chunks_contribute_nothing() {
        // "ghost" resolves to no chunk; "empty" has size 0.
        let bundle = bundle(
            vec![vendor_module("0", 500_000, &["ghost", "empty"], "lib", Some("1.0.0"))],
            vec![chunk("empty", 0, false, &[])],
        );

        assert!(HugeModulesRule::default().check(&bundle).unwrap().is_empty());
    }

    #[test]
    fn test_import_subpath_sampling() {
        let mut plain = vendor_module("0", 100, &["main"], "lodash", Some("4.17.21"));
        plain.path = "node_modules/lodash/map.js".to_string();
        let mut artifact = vendor_module("1", 100, &["main"], "lodash", Some("4.17.21"));
        artifact.path = "node_modules/lodash/cjs/chain.js".to_string();

        let mods = [&plain, &artifact];
        let samples = sample_import_subpaths("lodash", &mods);
        assert_eq!(samples, vec!["map.js"]);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Raising the threshold never increases the issue count.
            #[test]
            fn test_threshold_monotonicity(
                sizes in prop::collection::vec(1u64..400_000, 1..20),
                low in 1u64..500_000,
                delta in 0u64..500_000,
            ) {
                let modules: Vec<_> = sizes
                    .iter()
                    .enumerate()
                    .map(|(i, &size)| {
                        vendor_module(
                            &i.to_string(),
                            size,
                            &["main"],
                            &format!("pkg-{i}"),
                            Some("1.0.0"),
                        )
                    })
                    .collect();
                let total: u64 = sizes.iter().sum();
                let bundle = bundle(modules, vec![chunk("main", total / 2, true, &["main"])]);

                let at_low = HugeModulesRule::new(Some(low)).check(&bundle).unwrap();
                let at_high = HugeModulesRule::new(Some(low + delta)).check(&bundle).unwrap();
                prop_assert!(at_high.len() <= at_low.len());

                // Every reported estimate stays strictly above the
                // threshold that gated emission.
                for issue in &at_low {
                    prop_assert!(issue.bytes_estimate.unwrap() > low);
                }
            }
        }
    }
}
