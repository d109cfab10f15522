//! Advisor Adapters - bundler stats normalization.
//!
//! Each supported bundler output format gets one [`StatsAdapter`]
//! implementation that converts a raw, already-parsed JSON document into
//! a [`NormalizedBundle`]. The [`AdapterRegistry`] tries adapters in an
//! explicit priority order and picks the first whose structural probe
//! matches.

pub mod package_path;
pub mod registry;
pub mod rollup_bundle_stats;
pub mod webpack_stats;

pub use package_path::extract_package_version;
pub use registry::AdapterRegistry;
pub use rollup_bundle_stats::RollupBundleStatsAdapter;
pub use webpack_stats::WebpackStatsAdapter;

use advisor_core::{NormalizedBundle, Result};
use serde_json::Value;
use std::path::Path;

/// Converter from one bundler-specific stats format to the normalized model.
pub trait StatsAdapter: Send + Sync + std::fmt::Debug {
    /// Short identifier for the format this adapter handles.
    fn name(&self) -> &'static str;

    /// Cheap structural probe used for format auto-detection.
    ///
    /// Checks the presence and shape of expected top-level keys only; it
    /// must not fully parse the document and must not fail. The file path
    /// is a detection hint, never reopened.
    fn can_handle(&self, file_path: &Path, raw: &Value) -> bool;

    /// Full conversion to the normalized model.
    ///
    /// Must be deterministic for a given input. The raw document is taken
    /// by shared reference and never mutated. Missing optional fields
    /// default safely (empty collections, zero sizes) instead of failing.
    ///
    /// # Errors
    ///
    /// Returns [`advisor_core::Error::NotImplemented`] when the format is
    /// recognized but conversion logic is absent, and
    /// [`advisor_core::Error::MalformedStats`] when the document cannot
    /// be decoded at all.
    fn to_normalized_bundle(&self, raw: &Value) -> Result<NormalizedBundle>;
}
