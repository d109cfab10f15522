//! Advisor Core - the bundler-agnostic bundle model and issue types.
//!
//! This crate defines the canonical graph that stats adapters produce and
//! rules consume:
//!
//! - [`NormalizedBundle`]: packages, modules, chunks, and assets from one
//!   bundler output document
//! - [`Issue`]: one actionable optimization finding emitted by a rule
//! - [`Error`]: the shared error taxonomy for normalization and rules
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   advisor-cli    │  (User interface, config, reporters)
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │ advisor-analyzer │  (Orchestration + aggregate stats)
//! └────────┬─────────┘
//!          │
//!    ┌─────┴──────┐
//!    ▼            ▼
//! ┌────────┐  ┌────────┐
//! │adapters│  │ rules  │
//! └────┬───┘  └───┬────┘
//!      └────┬─────┘
//!           ▼
//! ┌──────────────────┐
//! │  advisor-core    │  (This crate - the normalized model)
//! └──────────────────┘
//! ```

pub mod error;
pub mod format;
pub mod issue;
pub mod types;
pub mod validation;

// Re-export core types for convenience
pub use error::{Error, Result};
pub use format::format_bytes;
pub use issue::{issue_id, FixType, Issue, IssueSeverity};
pub use types::{Asset, Chunk, Module, NormalizedBundle, Package};
pub use validation::validate_bundle;
