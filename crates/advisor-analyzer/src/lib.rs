//! Advisor Analyzer - orchestrates normalization and rule evaluation.
//!
//! [`Analyzer::analyze`] is the sole entry point reporters consume: it
//! converts a raw stats document through the chosen adapter, computes
//! aggregate stats over the normalized model, runs the rule engine, and
//! returns everything as one [`BundleAnalysis`].

use advisor_adapters::StatsAdapter;
use advisor_core::{Issue, NormalizedBundle, Result};
use advisor_rules::{RuleEngine, RuleFailure};
use serde::Serialize;
use serde_json::Value;

/// Top-level metrics about the bundler output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleStats {
    /// Sum of `size` over all assets.
    pub total_assets_size: u64,
    /// Sum of `size` over chunks marked initial.
    pub initial_chunks_size: u64,
}

/// Complete analysis of one bundler output document.
///
/// The flattened bundle maps plus `stats` and `issues` form the
/// published JSON report contract. `ruleFailures` is the degraded-result
/// marker: present only when some rules could not run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleAnalysis {
    #[serde(flatten)]
    pub bundle: NormalizedBundle,
    pub stats: BundleStats,
    pub issues: Vec<Issue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rule_failures: Vec<RuleFailure>,
}

/// Core analyzer pairing one adapter with one rule engine.
pub struct Analyzer<'a> {
    adapter: &'a dyn StatsAdapter,
    engine: &'a RuleEngine,
}

impl<'a> Analyzer<'a> {
    pub fn new(adapter: &'a dyn StatsAdapter, engine: &'a RuleEngine) -> Self {
        Self { adapter, engine }
    }

    /// Analyzes a raw stats document.
    ///
    /// # Errors
    ///
    /// Adapter failures (malformed document, unimplemented conversion)
    /// propagate unchanged; there is no partial-failure handling at this
    /// level. Rule failures do not error here - they degrade the result
    /// via [`BundleAnalysis::rule_failures`].
    pub fn analyze(&self, raw: &Value) -> Result<BundleAnalysis> {
        let bundle = self.adapter.to_normalized_bundle(raw)?;

        let stats = BundleStats {
            total_assets_size: bundle.assets.values().map(|a| a.size).sum(),
            initial_chunks_size: bundle
                .chunks
                .values()
                .filter(|c| c.is_initial)
                .map(|c| c.size)
                .sum(),
        };

        let outcome = self.engine.run(&bundle);

        Ok(BundleAnalysis {
            bundle,
            stats,
            issues: outcome.issues,
            rule_failures: outcome.failures,
        })
    }
}
