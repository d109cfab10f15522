//! Adapter for the bundle-stats JSON format (Vite/webpack bundle-stats plugin).

use crate::package_path::extract_package_version;
use crate::StatsAdapter;
use advisor_core::{Asset, Chunk, Error, Module, NormalizedBundle, Package, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// Raw bundle-stats document, decoded leniently.
///
/// Entries carry one record per build run. Packages and assets read the
/// last run (the current build), modules the first, matching the upstream
/// plugin's layout.
#[derive(Debug, Default, Deserialize)]
struct RawBundleStats {
    #[serde(default)]
    modules: Vec<RawModule>,
    #[serde(default)]
    assets: Vec<RawAsset>,
    #[serde(default)]
    packages: Vec<RawPackage>,
    #[serde(default)]
    runs: Vec<RawRun>,
}

#[derive(Debug, Default, Deserialize)]
struct RawModule {
    #[serde(default)]
    key: String,
    #[serde(default)]
    runs: Vec<RawModuleRun>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawModuleRun {
    #[serde(default)]
    name: String,
    #[serde(default)]
    value: u64,
    #[serde(default)]
    chunk_ids: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawAsset {
    #[serde(default)]
    key: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    runs: Vec<RawAssetRun>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAssetRun {
    #[serde(default)]
    name: String,
    #[serde(default)]
    value: u64,
    #[serde(default)]
    display_value: Option<String>,
    #[serde(default)]
    is_entry: bool,
    #[serde(default)]
    is_initial: bool,
    #[serde(default)]
    is_chunk: bool,
    #[serde(default)]
    chunk_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPackage {
    #[serde(default)]
    key: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    runs: Vec<RawPackageRun>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPackageRun {
    #[serde(default)]
    name: String,
    #[serde(default)]
    path: String,
    #[serde(default)]
    value: u64,
}

#[derive(Debug, Default, Deserialize)]
struct RawRun {
    #[serde(default)]
    webpack: Option<RawWebpackRun>,
}

#[derive(Debug, Default, Deserialize)]
struct RawWebpackRun {
    #[serde(default)]
    chunks: Vec<RawChunkRef>,
}

#[derive(Debug, Default, Deserialize)]
struct RawChunkRef {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
}

/// Adapter for bundle-stats.json documents.
#[derive(Debug)]
pub struct RollupBundleStatsAdapter;

impl StatsAdapter for RollupBundleStatsAdapter {
    fn name(&self) -> &'static str {
        "rollup-bundle-stats"
    }

    fn can_handle(&self, _file_path: &Path, raw: &Value) -> bool {
        // The bundle-stats structure always carries a modules array.
        matches!(raw.get("modules"), Some(Value::Array(_)))
    }

    fn to_normalized_bundle(&self, raw: &Value) -> Result<NormalizedBundle> {
        let stats: RawBundleStats =
            serde_json::from_value(raw.clone()).map_err(|e| Error::MalformedStats {
                message: "bundle-stats document".to_string(),
                source: e,
            })?;

        let packages = build_packages(&stats);
        let modules = build_modules(&stats, &packages);
        let assets = build_assets(&stats);
        let chunks = build_chunks(&stats, &modules, &assets);

        Ok(NormalizedBundle {
            assets,
            packages,
            modules,
            chunks,
        })
    }
}

/// Package lookup keyed by the bundler-assigned package key.
fn build_packages(stats: &RawBundleStats) -> IndexMap<String, Package> {
    stats
        .packages
        .iter()
        .filter_map(|pkg| {
            let last_run = pkg.runs.last()?;
            let version =
                extract_package_version(&last_run.path).unwrap_or_else(|| "unknown".to_string());

            Some((
                pkg.key.clone(),
                Package {
                    key: pkg.key.clone(),
                    name: last_run.name.clone(),
                    display_name: pkg.label.clone().unwrap_or_else(|| last_run.name.clone()),
                    path: last_run.path.clone(),
                    version,
                    size: last_run.value,
                },
            ))
        })
        .collect()
}

/// Modules, each resolved against the package whose path is the longest
/// prefix of the module path.
///
/// Longest-prefix wins so that nested-dependency copies resolve to the
/// inner package instead of whichever entry happens to be enumerated
/// first.
fn build_modules(
    stats: &RawBundleStats,
    packages: &IndexMap<String, Package>,
) -> IndexMap<String, Module> {
    stats
        .modules
        .iter()
        .filter_map(|module| {
            let run = module.runs.first()?;

            let owner = packages
                .values()
                .filter(|pkg| !pkg.path.is_empty() && run.name.starts_with(&pkg.path))
                .max_by_key(|pkg| pkg.path.len());

            Some((
                module.key.clone(),
                Module {
                    id: module.key.clone(),
                    path: run.name.clone(),
                    size: run.value,
                    chunks: run.chunk_ids.clone(),
                    package_name: owner.map(|pkg| pkg.name.clone()),
                    package_version: owner.map(|pkg| pkg.version.clone()),
                    is_vendor: owner.is_some(),
                },
            ))
        })
        .collect()
}

fn build_assets(stats: &RawBundleStats) -> IndexMap<String, Asset> {
    stats
        .assets
        .iter()
        .filter_map(|asset| {
            let last_run = asset.runs.last()?;

            Some((
                asset.key.clone(),
                Asset {
                    key: asset.key.clone(),
                    name: last_run.name.clone(),
                    display_name: asset.label.clone().unwrap_or_else(|| last_run.name.clone()),
                    size: last_run.value,
                    display_size: last_run
                        .display_value
                        .clone()
                        .unwrap_or_else(|| format!("{} bytes", last_run.value)),
                    is_entry: last_run.is_entry,
                    is_initial: last_run.is_initial,
                    is_chunk: last_run.is_chunk,
                    chunk_id: last_run.chunk_id.clone(),
                },
            ))
        })
        .collect()
}

/// Chunks from the current run's chunk list, backfilled from modules and
/// assets.
///
/// A chunk with no corresponding asset entry keeps size 0 and empty entry
/// points; rules tolerate this.
fn build_chunks(
    stats: &RawBundleStats,
    modules: &IndexMap<String, Module>,
    assets: &IndexMap<String, Asset>,
) -> IndexMap<String, Chunk> {
    let chunk_refs = stats
        .runs
        .first()
        .and_then(|run| run.webpack.as_ref())
        .map(|webpack| webpack.chunks.as_slice())
        .unwrap_or(&[]);

    chunk_refs
        .iter()
        .map(|chunk_ref| {
            let member_ids: Vec<String> = modules
                .values()
                .filter(|module| module.chunks.contains(&chunk_ref.id))
                .map(|module| module.id.clone())
                .collect();

            let chunk_assets: Vec<&Asset> = assets
                .values()
                .filter(|asset| {
                    asset.is_chunk && asset.chunk_id.as_deref() == Some(chunk_ref.id.as_str())
                })
                .collect();

            let chunk = Chunk {
                id: chunk_ref.id.clone(),
                name: chunk_ref.name.clone(),
                size: chunk_assets.last().map(|asset| asset.size).unwrap_or(0),
                modules: member_ids,
                entry_points: chunk_assets
                    .iter()
                    .filter(|asset| asset.is_entry)
                    .map(|asset| asset.name.clone())
                    .collect(),
                is_initial: chunk_assets.iter().any(|asset| asset.is_initial),
            };

            (chunk_ref.id.clone(), chunk)
        })
        .collect()
}
