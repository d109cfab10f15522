//! Adapter stub for webpack stats.json files.

use crate::StatsAdapter;
use advisor_core::{Error, NormalizedBundle, Result};
use serde_json::Value;
use std::path::Path;

/// Adapter for webpack stats.json documents.
///
/// Detection works; conversion is not implemented yet. Callers must
/// surface [`Error::NotImplemented`] as a hard failure rather than
/// falling back to another adapter.
#[derive(Debug)]
pub struct WebpackStatsAdapter;

impl StatsAdapter for WebpackStatsAdapter {
    fn name(&self) -> &'static str {
        "webpack-stats"
    }

    fn can_handle(&self, _file_path: &Path, raw: &Value) -> bool {
        raw.is_object()
            && (raw.get("chunks").is_some()
                || raw.get("modules").is_some()
                || raw.get("assets").is_some())
    }

    fn to_normalized_bundle(&self, _raw: &Value) -> Result<NormalizedBundle> {
        Err(Error::NotImplemented {
            adapter: self.name().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_can_handle_webpack_shape() {
        let adapter = WebpackStatsAdapter;
        let path = Path::new("stats.json");

        assert!(adapter.can_handle(path, &json!({ "chunks": [] })));
        assert!(adapter.can_handle(path, &json!({ "assets": [] })));
        assert!(!adapter.can_handle(path, &json!({ "version": "5.0.0" })));
        assert!(!adapter.can_handle(path, &json!([])));
    }

    #[test]
    fn test_conversion_is_a_hard_error() {
        let adapter = WebpackStatsAdapter;
        let result = adapter.to_normalized_bundle(&json!({ "chunks": [] }));

        assert!(matches!(
            result.unwrap_err(),
            Error::NotImplemented { adapter } if adapter == "webpack-stats"
        ));
    }
}
