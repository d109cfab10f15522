//! JSON report: the serialized `BundleAnalysis` itself.

use advisor_analyzer::BundleAnalysis;

/// Generates the pretty-printed JSON report.
pub fn generate(analysis: &BundleAnalysis) -> String {
    // BundleAnalysis serialization is infallible: maps have string keys
    // and metadata is already JSON.
    serde_json::to_string_pretty(analysis).unwrap_or_else(|_| "{}".to_string())
}
