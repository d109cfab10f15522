//! Adapter registry and format auto-detection.

use crate::{RollupBundleStatsAdapter, StatsAdapter, WebpackStatsAdapter};
use advisor_core::{Error, Result};
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// Registry of stats adapters, tried in registration order.
///
/// Selection order matters: several formats can structurally match an
/// ambiguous document (a webpack stats file also carries a `modules`
/// key), so the first satisfying probe wins and the default order is
/// explicit.
#[derive(Default)]
pub struct AdapterRegistry {
    adapters: Vec<Box<dyn StatsAdapter>>,
}

impl AdapterRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in adapters in priority order:
    /// rollup-bundle-stats first, then webpack-stats.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(RollupBundleStatsAdapter));
        registry.register(Box::new(WebpackStatsAdapter));
        registry
    }

    /// Registers an adapter at the end of the priority order.
    pub fn register(&mut self, adapter: Box<dyn StatsAdapter>) {
        self.adapters.push(adapter);
    }

    /// Finds the first adapter whose probe accepts the document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnrecognizedFormat`] when no adapter matches; no
    /// partial analysis is attempted in that case.
    pub fn detect(&self, file_path: &Path, raw: &Value) -> Result<&dyn StatsAdapter> {
        self.adapters
            .iter()
            .find(|adapter| adapter.can_handle(file_path, raw))
            .map(|adapter| adapter.as_ref())
            .ok_or_else(|| Error::UnrecognizedFormat {
                path: file_path.to_path_buf(),
            })
    }

    /// Returns all registered adapters.
    pub fn all(&self) -> &[Box<dyn StatsAdapter>] {
        &self.adapters
    }
}

impl fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("adapters", &self.adapters.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_prefers_registration_order() {
        let registry = AdapterRegistry::with_defaults();
        let path = Path::new("bundle-stats.json");

        // Both adapters structurally match a document with a modules
        // array; the rollup adapter is registered first.
        let raw = json!({ "modules": [] });
        let adapter = registry.detect(path, &raw).unwrap();
        assert_eq!(adapter.name(), "rollup-bundle-stats");
    }

    #[test]
    fn test_detect_falls_through_to_webpack() {
        let registry = AdapterRegistry::with_defaults();
        let raw = json!({ "chunks": [] });

        let adapter = registry.detect(Path::new("stats.json"), &raw).unwrap();
        assert_eq!(adapter.name(), "webpack-stats");
    }

    #[test]
    fn test_detect_unrecognized_format() {
        let registry = AdapterRegistry::with_defaults();
        let raw = json!({ "something": "else" });

        let result = registry.detect(Path::new("stats.json"), &raw);
        assert!(matches!(
            result.unwrap_err(),
            Error::UnrecognizedFormat { .. }
        ));
    }
}
