//! The `analyze` subcommand: stats file in, reports out.

use crate::config::{self, CliOverrides, ResolvedConfig, CONFIG_FILE_NAME};
use crate::AnalyzeArgs;
use advisor_adapters::AdapterRegistry;
use advisor_analyzer::{Analyzer, BundleAnalysis};
use advisor_core::{format_bytes, IssueSeverity};
use advisor_rules::{RuleConfig, RuleEngine};
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    let file_config = config::load_file_config(&config_path);
    let resolved = config::resolve(
        file_config,
        CliOverrides {
            stats_file: args.stats_file,
            output_dir: args.output_dir,
            reporters: args.reporters,
            rules: RuleConfig {
                max_chunk_size: args.max_chunk_size,
                max_module_size: args.max_module_size,
                min_lazy_load_threshold: args.min_lazy_load_threshold,
            },
        },
    );

    let contents = fs::read_to_string(&resolved.stats_file)
        .with_context(|| format!("Failed to read {}", resolved.stats_file.display()))?;
    let raw: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", resolved.stats_file.display()))?;

    let registry = AdapterRegistry::with_defaults();
    let adapter = registry.detect(&resolved.stats_file, &raw)?;
    tracing::info!("Detected stats format: {}", adapter.name());

    let engine = RuleEngine::with_default_rules(resolved.rules);
    let analysis = Analyzer::new(adapter, &engine).analyze(&raw)?;

    write_reports(&resolved, &analysis)?;
    print_summary(&resolved, &analysis);

    Ok(())
}

fn write_reports(resolved: &ResolvedConfig, analysis: &BundleAnalysis) -> Result<()> {
    fs::create_dir_all(&resolved.output_dir)
        .with_context(|| format!("Failed to create {}", resolved.output_dir.display()))?;

    for kind in &resolved.reporters {
        let path = resolved.output_dir.join(kind.file_name());
        fs::write(&path, kind.generate(analysis))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!("Wrote {}", path.display());
    }
    Ok(())
}

fn print_summary(resolved: &ResolvedConfig, analysis: &BundleAnalysis) {
    let count_with = |severity: IssueSeverity| {
        analysis
            .issues
            .iter()
            .filter(|issue| issue.severity == severity)
            .count()
    };

    println!("{}", "Bundle analysis complete".bold());
    println!(
        "  Total size:   {}",
        format_bytes(analysis.stats.total_assets_size)
    );
    println!(
        "  Initial size: {}",
        format_bytes(analysis.stats.initial_chunks_size)
    );

    if analysis.issues.is_empty() {
        println!("  {}", "No issues found".green());
    } else {
        let high = count_with(IssueSeverity::High);
        let medium = count_with(IssueSeverity::Medium);
        let low = count_with(IssueSeverity::Low);
        println!(
            "  Issues:       {} high, {} medium, {} low",
            high.to_string().red(),
            medium.to_string().yellow(),
            low.to_string().green()
        );
    }

    for failure in &analysis.rule_failures {
        println!(
            "  {} rule {} skipped: {}",
            "warning:".yellow(),
            failure.rule_id,
            failure.message
        );
    }

    println!(
        "  Reports:      {}",
        resolved.output_dir.display().to_string().cyan()
    );
}
