//! Rule: detect packages bundled at more than one version.

use crate::engine::Rule;
use advisor_core::{format_bytes, issue_id, FixType, Issue, IssueSeverity, NormalizedBundle, Result};
use indexmap::IndexMap;
use serde_json::json;

const RULE_ID: &str = "duplicate-packages";

#[derive(Default)]
struct PackageGroup {
    versions: Vec<String>,
    total_size: u64,
    module_ids: Vec<String>,
}

/// Flags every package whose modules carry two or more distinct versions.
///
/// The byte estimate is the summed size of *all* the package's modules,
/// not just the excess copies; deduplicating usually lets the whole
/// package be served once.
pub struct DuplicatePackagesRule;

impl Rule for DuplicatePackagesRule {
    fn id(&self) -> &'static str {
        RULE_ID
    }

    fn check(&self, bundle: &NormalizedBundle) -> Result<Vec<Issue>> {
        // Group modules by package name; modules without one are ignored.
        let groups: IndexMap<&str, PackageGroup> =
            bundle
                .modules
                .values()
                .fold(IndexMap::new(), |mut groups, module| {
                    if let Some(name) = module.package_name.as_deref() {
                        let group = groups.entry(name).or_default();
                        group.total_size += module.size;
                        group.module_ids.push(module.id.clone());
                        if let Some(version) = module.package_version.as_deref() {
                            if !version.is_empty()
                                && !group.versions.iter().any(|v| v == version)
                            {
                                group.versions.push(version.to_string());
                            }
                        }
                    }
                    groups
                });

        let mut issues: Vec<Issue> = groups
            .into_iter()
            .filter(|(_, group)| group.versions.len() >= 2)
            .map(|(name, group)| Issue {
                id: issue_id(RULE_ID, name),
                rule_id: RULE_ID.to_string(),
                severity: IssueSeverity::High,
                title: format!("Duplicate package: {name}"),
                description: format!(
                    "The package \"{name}\" appears {} times with different versions: {}. \
                     Total size: {}. Consider using a single version to reduce bundle size.",
                    group.versions.len(),
                    group.versions.join(", "),
                    format_bytes(group.total_size),
                ),
                bytes_estimate: Some(group.total_size),
                affected_modules: group.module_ids,
                fix_type: FixType::DedupePackage,
                metadata: json!({
                    "packageName": name,
                    "versions": group.versions,
                    "totalSize": group.total_size,
                })
                .as_object()
                .cloned()
                .unwrap_or_default(),
            })
            .collect();

        // Most impactful duplication first.
        issues.sort_by(|a, b| b.bytes_estimate.cmp(&a.bytes_estimate));
        Ok(issues)
    }
}
