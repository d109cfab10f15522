//! Self-contained HTML report.

use super::potential_savings;
use advisor_analyzer::BundleAnalysis;
use advisor_core::{format_bytes, Issue, IssueSeverity};
use std::fmt::Write;

const STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 20px; }\n\
h1, h2, h3 { color: #333; }\n\
table { width: 100%; border-collapse: collapse; margin-bottom: 20px; }\n\
th, td { border: 1px solid #ccc; padding: 8px; text-align: left; }\n\
th { background-color: #f4f4f4; }\n\
.high { color: red; }\n\
.medium { color: orange; }\n\
.low { color: green; }";

/// Generates the HTML report.
pub fn generate(analysis: &BundleAnalysis) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\" />\n");
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />\n",
    );
    html.push_str("<title>Bundle Analysis Report</title>\n");
    let _ = write!(html, "<style>\n{STYLE}\n</style>\n</head>\n<body>\n");

    html.push_str("<h1>Bundle Analysis Report</h1>\n<h2>Overview</h2>\n<ul>\n");
    let _ = write!(
        html,
        "<li><strong>Total Size:</strong> {}</li>\n",
        format_bytes(analysis.stats.total_assets_size)
    );
    let _ = write!(
        html,
        "<li><strong>Initial Size:</strong> {}</li>\n",
        format_bytes(analysis.stats.initial_chunks_size)
    );
    let _ = write!(
        html,
        "<li><strong>Assets:</strong> {}</li>\n",
        analysis.bundle.assets.len()
    );
    let _ = write!(
        html,
        "<li><strong>Chunks:</strong> {}</li>\n",
        analysis.bundle.chunks.len()
    );
    let _ = write!(
        html,
        "<li><strong>Packages:</strong> {}</li>\n",
        analysis.bundle.packages.len()
    );
    let _ = write!(
        html,
        "<li><strong>Modules:</strong> {}</li>\n",
        analysis.bundle.modules.len()
    );
    html.push_str("</ul>\n");

    let savings = potential_savings(analysis);
    if savings > 0 {
        let _ = write!(
            html,
            "<h3>Potential Savings</h3>\n<p>{} (estimated)</p>\n",
            format_bytes(savings)
        );
    }

    html.push_str("<h2>Issues</h2>\n");
    push_severity_table(&mut html, analysis, IssueSeverity::High, "high", "High");
    push_severity_table(&mut html, analysis, IssueSeverity::Medium, "medium", "Medium");
    push_severity_table(&mut html, analysis, IssueSeverity::Low, "low", "Low");

    html.push_str("</body>\n</html>\n");
    html
}

fn push_severity_table(
    html: &mut String,
    analysis: &BundleAnalysis,
    severity: IssueSeverity,
    class: &str,
    label: &str,
) {
    let issues: Vec<&Issue> = analysis
        .issues
        .iter()
        .filter(|issue| issue.severity == severity)
        .collect();
    if issues.is_empty() {
        return;
    }

    let _ = write!(html, "<h3 class=\"{class}\">{label} Priority Issues</h3>\n");
    html.push_str(
        "<table>\n<thead>\n<tr><th>Title</th><th>Description</th>\
         <th>Estimated Savings</th></tr>\n</thead>\n<tbody>\n",
    );
    for issue in issues {
        let estimate = issue
            .bytes_estimate
            .map(format_bytes)
            .unwrap_or_else(|| "N/A".to_string());
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&issue.title),
            escape(&issue.description),
            estimate
        );
    }
    html.push_str("</tbody>\n</table>\n");
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
