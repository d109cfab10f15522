//! Markdown report.

use super::potential_savings;
use advisor_analyzer::BundleAnalysis;
use advisor_core::{format_bytes, Issue, IssueSeverity};

/// Generates the Markdown report.
pub fn generate(analysis: &BundleAnalysis) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("# Bundle Analysis Report".to_string());
    lines.push(String::new());

    lines.push("## Overview".to_string());
    lines.push(String::new());
    lines.push(format!(
        "- **Total Size**: {}",
        format_bytes(analysis.stats.total_assets_size)
    ));
    lines.push(format!(
        "- **Initial Size**: {}",
        format_bytes(analysis.stats.initial_chunks_size)
    ));
    lines.push(format!("- **Assets**: {}", analysis.bundle.assets.len()));
    lines.push(format!("- **Chunks**: {}", analysis.bundle.chunks.len()));
    lines.push(format!("- **Packages**: {}", analysis.bundle.packages.len()));
    lines.push(format!("- **Modules**: {}", analysis.bundle.modules.len()));
    lines.push(String::new());

    let savings = potential_savings(analysis);
    if savings > 0 {
        lines.push(format!(
            "**Potential Savings**: {} (estimated)",
            format_bytes(savings)
        ));
        lines.push(String::new());
    }

    push_severity_section(&mut lines, analysis, IssueSeverity::High, "High Priority Issues");
    push_severity_section(&mut lines, analysis, IssueSeverity::Medium, "Medium Priority Issues");
    push_severity_section(&mut lines, analysis, IssueSeverity::Low, "Low Priority Issues");

    if !analysis.rule_failures.is_empty() {
        lines.push("## Skipped Rules".to_string());
        lines.push(String::new());
        for failure in &analysis.rule_failures {
            lines.push(format!("- `{}`: {}", failure.rule_id, failure.message));
        }
        lines.push(String::new());
    }

    if analysis.issues.is_empty() {
        lines.push("## No Issues Found".to_string());
        lines.push(String::new());
        lines.push(
            "Great! No optimization opportunities were detected in your bundle.".to_string(),
        );
        lines.push(String::new());
    }

    lines.join("\n")
}

fn push_severity_section(
    lines: &mut Vec<String>,
    analysis: &BundleAnalysis,
    severity: IssueSeverity,
    heading: &str,
) {
    let issues: Vec<&Issue> = analysis
        .issues
        .iter()
        .filter(|issue| issue.severity == severity)
        .collect();
    if issues.is_empty() {
        return;
    }

    lines.push(format!("## {heading}"));
    lines.push(String::new());
    for issue in issues {
        lines.push(format!("### {}", issue.title));
        lines.push(String::new());
        lines.push(issue.description.clone());
        lines.push(String::new());
        if let Some(bytes) = issue.bytes_estimate {
            lines.push(format!("**Estimated Impact**: {}", format_bytes(bytes)));
        }
        lines.push(format!("**Fix Type**: {}", issue.fix_type));
        lines.push(String::new());
    }
}
