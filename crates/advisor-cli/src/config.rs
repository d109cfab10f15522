//! Configuration loading and merging.
//!
//! Settings come from three layers with CLI flags taking precedence over
//! the `bundle-advisor.config.json` file, which takes precedence over
//! built-in defaults. A malformed config file is reported as a warning
//! and ignored rather than aborting the run.

use crate::reporters::ReporterKind;
use advisor_rules::RuleConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "bundle-advisor.config.json";

const DEFAULT_STATS_FILE: &str = "stats.json";
const DEFAULT_OUTPUT_DIR: &str = "bundle-advisor";

/// Shape of `bundle-advisor.config.json`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileConfig {
    #[serde(default)]
    pub stats_file: Option<PathBuf>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub reporters: Option<ReporterToggles>,
    #[serde(default)]
    pub rules: Option<RuleConfig>,
}

/// Per-reporter on/off switches in the config file.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ReporterToggles {
    #[serde(default)]
    pub markdown: Option<bool>,
    #[serde(default)]
    pub json: Option<bool>,
    #[serde(default)]
    pub html: Option<bool>,
}

/// Settings taken from CLI flags.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub stats_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub reporters: Vec<ReporterKind>,
    pub rules: RuleConfig,
}

/// Fully-resolved configuration for one analyze run.
#[derive(Debug, PartialEq)]
pub struct ResolvedConfig {
    pub stats_file: PathBuf,
    pub output_dir: PathBuf,
    pub reporters: Vec<ReporterKind>,
    pub rules: RuleConfig,
}

/// Reads the config file if present; a missing file yields the empty
/// config, a malformed one logs a warning and yields the empty config.
pub fn load_file_config(path: &Path) -> FileConfig {
    if !path.exists() {
        return FileConfig::default();
    }

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::warn!("Failed to read {}: {e}", path.display());
            return FileConfig::default();
        }
    };

    match serde_json::from_str(&contents) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Failed to parse {}: {e}", path.display());
            FileConfig::default()
        }
    }
}

/// Merges CLI overrides over the file config over defaults.
pub fn resolve(file: FileConfig, cli: CliOverrides) -> ResolvedConfig {
    let reporters = if !cli.reporters.is_empty() {
        cli.reporters
    } else if let Some(toggles) = file.reporters {
        let mut enabled = Vec::new();
        if toggles.markdown.unwrap_or(false) {
            enabled.push(ReporterKind::Markdown);
        }
        if toggles.json.unwrap_or(false) {
            enabled.push(ReporterKind::Json);
        }
        if toggles.html.unwrap_or(false) {
            enabled.push(ReporterKind::Html);
        }
        enabled
    } else {
        vec![ReporterKind::Markdown]
    };

    ResolvedConfig {
        stats_file: cli
            .stats_file
            .or(file.stats_file)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATS_FILE)),
        output_dir: cli
            .output_dir
            .or(file.output_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
        reporters,
        rules: RuleConfig {
            max_chunk_size: cli
                .rules
                .max_chunk_size
                .or(file.rules.and_then(|r| r.max_chunk_size)),
            max_module_size: cli
                .rules
                .max_module_size
                .or(file.rules.and_then(|r| r.max_module_size)),
            min_lazy_load_threshold: cli
                .rules
                .min_lazy_load_threshold
                .or(file.rules.and_then(|r| r.min_lazy_load_threshold)),
        },
    }
}
