//! Issue types emitted by rules.
//!
//! The field names and enum values here are part of the published JSON
//! report contract and must not change shape.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How urgent an issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Low,
    Medium,
    High,
}

/// The category of fix a rule recommends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FixType {
    ReplacePackage,
    SplitChunk,
    LazyLoadModule,
    DedupePackage,
    OptimizeImports,
    Other,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IssueSeverity::Low => "low",
            IssueSeverity::Medium => "medium",
            IssueSeverity::High => "high",
        };
        f.write_str(name)
    }
}

impl fmt::Display for FixType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FixType::ReplacePackage => "replace-package",
            FixType::SplitChunk => "split-chunk",
            FixType::LazyLoadModule => "lazy-load-module",
            FixType::DedupePackage => "dedupe-package",
            FixType::OptimizeImports => "optimize-imports",
            FixType::Other => "other",
        };
        f.write_str(name)
    }
}

/// An actionable finding produced by one rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Unique ID, derived as `ruleId:subject`.
    pub id: String,
    /// Identifier of the rule that produced this issue.
    pub rule_id: String,
    pub severity: IssueSeverity,
    pub title: String,
    /// Human-readable description, including formatted byte counts.
    pub description: String,
    /// Estimated recoverable/affected bytes, when the rule can tell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes_estimate: Option<u64>,
    /// IDs of the modules this issue concerns.
    pub affected_modules: Vec<String>,
    pub fix_type: FixType,
    /// Open key-value bag for programmatic consumers.
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// Builds the unique issue ID for a rule and subject.
pub fn issue_id(rule_id: &str, subject: &str) -> String {
    format!("{rule_id}:{subject}")
}
