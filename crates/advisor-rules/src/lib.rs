//! Advisor Rules - heuristic bundle-size optimization rules.
//!
//! A [`Rule`] is a pure function from a [`NormalizedBundle`] to a list of
//! [`Issue`]s. The [`RuleEngine`] runs every registered rule in order and
//! isolates per-rule failures so one bad rule cannot blank out the rest.
//!
//! Built-in rules:
//!
//! - [`DuplicatePackagesRule`]: same package bundled at several versions
//! - [`HugeModulesRule`]: packages/modules with an outsized estimated
//!   share of the optimized output
//! - [`LargeVendorChunksRule`]: oversized chunks that are mostly vendor
//!   code and could be split
//! - [`LazyLoadCandidatesRule`]: large initial chunks that could be
//!   deferred

pub mod duplicate_packages;
pub mod engine;
pub mod huge_modules;
pub mod large_vendor_chunks;
pub mod lazy_load_candidates;

pub use duplicate_packages::DuplicatePackagesRule;
pub use engine::{Rule, RuleEngine, RuleFailure, RunOutcome};
pub use huge_modules::HugeModulesRule;
pub use large_vendor_chunks::LargeVendorChunksRule;
pub use lazy_load_candidates::LazyLoadCandidatesRule;

use serde::Deserialize;

/// Thresholds for the threshold-driven rules.
///
/// Each field defaults independently when absent; defaults are baked into
/// the individual rule constructors, not into any global state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleConfig {
    /// Chunk size limit for [`LargeVendorChunksRule`] (default 250 KiB).
    #[serde(default)]
    pub max_chunk_size: Option<u64>,
    /// Module size limit for [`HugeModulesRule`] (default 200 KiB).
    #[serde(default)]
    pub max_module_size: Option<u64>,
    /// Minimum size for [`LazyLoadCandidatesRule`] (default 100 KiB).
    #[serde(default)]
    pub min_lazy_load_threshold: Option<u64>,
}

impl RuleEngine {
    /// Builds an engine with all four built-in rules registered, using
    /// the given thresholds.
    pub fn with_default_rules(config: RuleConfig) -> Self {
        let mut engine = Self::new();
        engine.register(Box::new(DuplicatePackagesRule));
        engine.register(Box::new(LargeVendorChunksRule::new(config.max_chunk_size)));
        engine.register(Box::new(HugeModulesRule::new(config.max_module_size)));
        engine.register(Box::new(LazyLoadCandidatesRule::new(
            config.min_lazy_load_threshold,
        )));
        engine
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use advisor_core::{Chunk, Module, NormalizedBundle};

    pub fn module(id: &str, size: u64, chunks: &[&str]) -> Module {
        Module {
            id: id.to_string(),
            path: format!("src/{id}.js"),
            size,
            chunks: chunks.iter().map(|c| c.to_string()).collect(),
            package_name: None,
            package_version: None,
            is_vendor: false,
        }
    }

    pub fn vendor_module(
        id: &str,
        size: u64,
        chunks: &[&str],
        package: &str,
        version: Option<&str>,
    ) -> Module {
        Module {
            id: id.to_string(),
            path: format!("node_modules/{package}/{id}.js"),
            size,
            chunks: chunks.iter().map(|c| c.to_string()).collect(),
            package_name: Some(package.to_string()),
            package_version: version.map(|v| v.to_string()),
            is_vendor: true,
        }
    }

    pub fn chunk(id: &str, size: u64, is_initial: bool, entry_points: &[&str]) -> Chunk {
        Chunk {
            id: id.to_string(),
            name: id.to_string(),
            size,
            modules: vec![],
            entry_points: entry_points.iter().map(|e| e.to_string()).collect(),
            is_initial,
        }
    }

    /// Builds a bundle, filling in each chunk's member list from the
    /// modules that reference it.
    pub fn bundle(modules: Vec<Module>, chunks: Vec<Chunk>) -> NormalizedBundle {
        let mut bundle = NormalizedBundle::default();
        for mut chunk in chunks {
            chunk.modules = modules
                .iter()
                .filter(|m| m.chunks.contains(&chunk.id))
                .map(|m| m.id.clone())
                .collect();
            bundle.chunks.insert(chunk.id.clone(), chunk);
        }
        for module in modules {
            bundle.modules.insert(module.id.clone(), module);
        }
        bundle
    }
}
