//! Error types for bundle analysis.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for advisor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during normalization and rule evaluation.
#[derive(Debug, Error)]
pub enum Error {
    /// No registered adapter recognized the stats document.
    #[error("Stats file format not recognized: {path}")]
    UnrecognizedFormat {
        /// Path of the stats file that was probed.
        path: PathBuf,
    },

    /// The format was recognized but the adapter has no conversion yet.
    ///
    /// Callers must treat this as fatal and must not fall back to
    /// another adapter.
    #[error("Adapter \"{adapter}\" is not implemented yet")]
    NotImplemented {
        /// Name of the stub adapter.
        adapter: String,
    },

    /// The document matched an adapter's probe but could not be decoded.
    #[error("Malformed stats document: {message}")]
    MalformedStats {
        /// Description of what failed to decode.
        message: String,
        /// The underlying JSON decoding error.
        #[source]
        source: serde_json::Error,
    },

    /// A rule returned an error during evaluation.
    #[error("Rule \"{rule_id}\" failed: {message}")]
    Rule {
        /// Identifier of the failing rule.
        rule_id: String,
        /// Error message from the rule.
        message: String,
    },

    /// A bundle violated a model invariant.
    #[error("Invalid bundle: {0}")]
    InvalidBundle(String),
}
