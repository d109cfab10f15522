//! The normalized bundle model.
//!
//! Adapters convert bundler-specific stats documents into these types;
//! everything downstream (analyzer, rules, reporters) reads only this
//! model. Identifiers are opaque strings assigned by the originating
//! bundler and are unique within one document, not globally.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single source file as included in the bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    /// Bundler-specific ID, unique within the document.
    pub id: String,
    /// Best-effort resolved file path.
    pub path: String,
    /// Size in bytes before production optimizations.
    pub size: u64,
    /// IDs of the chunks containing this module.
    pub chunks: Vec<String>,
    /// npm package name if the module resolved to a third-party package.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    /// npm package version if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_version: Option<String>,
    /// True iff the module resolved to a third-party package.
    pub is_vendor: bool,
}

/// A group of modules bundled together into one output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    /// Unique ID for the chunk.
    pub id: String,
    /// Human-readable name if available.
    pub name: String,
    /// Post-optimization byte size of the owning asset, 0 if unmapped.
    pub size: u64,
    /// IDs of the modules included in this chunk.
    pub modules: Vec<String>,
    /// Asset names that serve as load entry points for this chunk.
    pub entry_points: Vec<String>,
    /// True if the chunk is downloaded unconditionally on page load.
    pub is_initial: bool,
}

/// A physical downloadable output file (JS, CSS, etc.).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Hash-stripped identity, unique within the document.
    pub key: String,
    /// Build-specific file name, including any cache-busting hash.
    pub name: String,
    /// Normalized name for reporting.
    pub display_name: String,
    /// Size in bytes after bundler optimizations.
    pub size: u64,
    /// Formatted size for reporters, e.g. "12.3 KB".
    pub display_size: String,
    /// True if the bundler marked the asset as an entry point.
    pub is_entry: bool,
    /// True if the asset is downloaded during initial page load.
    ///
    /// Must be true whenever [`Asset::is_entry`] is true.
    pub is_initial: bool,
    /// True if the asset belongs to a logical bundle group.
    pub is_chunk: bool,
    /// Back-link to the chunk; required when `is_chunk` is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_id: Option<String>,
}

/// A resolved third-party package version included in the bundle.
///
/// Two entries may share `name` but differ by `key`/`version`; that is
/// exactly what the duplicate-packages rule looks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    /// Unique key distinguishing same-name, different-version instances.
    pub key: String,
    /// Published name of the package.
    pub name: String,
    /// Normalized name for reporting.
    pub display_name: String,
    /// Resolved path to the package root if available.
    pub path: String,
    /// Installed version, or `"unknown"` when unresolvable.
    pub version: String,
    /// Aggregate pre-optimization size of the package's modules.
    pub size: u64,
}

/// Normalized representation of a bundler's output, produced by adapters.
///
/// Built once per analysis run and never mutated afterwards. The maps
/// preserve insertion order so conversion stays deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedBundle {
    pub assets: IndexMap<String, Asset>,
    pub packages: IndexMap<String, Package>,
    pub modules: IndexMap<String, Module>,
    pub chunks: IndexMap<String, Chunk>,
}

impl NormalizedBundle {
    /// Resolves a chunk's member module IDs against the module map.
    ///
    /// IDs with no corresponding module entry are skipped; rules must
    /// tolerate chunks whose members cannot all be resolved.
    pub fn modules_in_chunk<'a>(&'a self, chunk: &'a Chunk) -> impl Iterator<Item = &'a Module> {
        chunk.modules.iter().filter_map(|id| self.modules.get(id))
    }
}
