//! Model invariant checks.
//!
//! Adapters are expected to uphold these invariants; the checks here are
//! for tests and debugging, not the hot path.

use crate::error::{Error, Result};
use crate::types::NormalizedBundle;

/// Validates the documented invariants of a normalized bundle.
///
/// Checked:
/// - a module with a `package_name` must be marked vendor
/// - an entry asset must also be initial
/// - a chunk asset must carry a `chunk_id`
pub fn validate_bundle(bundle: &NormalizedBundle) -> Result<()> {
    for module in bundle.modules.values() {
        if module.package_name.is_some() && !module.is_vendor {
            return Err(Error::InvalidBundle(format!(
                "module \"{}\" has a package name but is not marked vendor",
                module.id
            )));
        }
    }

    for asset in bundle.assets.values() {
        if asset.is_entry && !asset.is_initial {
            return Err(Error::InvalidBundle(format!(
                "asset \"{}\" is an entry point but not initial",
                asset.key
            )));
        }
        if asset.is_chunk && asset.chunk_id.is_none() {
            return Err(Error::InvalidBundle(format!(
                "chunk asset \"{}\" has no chunk id",
                asset.key
            )));
        }
    }

    Ok(())
}
