//! Report generation from one [`BundleAnalysis`].

pub mod html;
pub mod json;
pub mod markdown;

use advisor_analyzer::BundleAnalysis;

/// Output formats the CLI can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReporterKind {
    Markdown,
    Json,
    Html,
}

impl ReporterKind {
    /// File name of the report inside the output directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            ReporterKind::Markdown => "report.md",
            ReporterKind::Json => "report.json",
            ReporterKind::Html => "report.html",
        }
    }

    /// Renders the report content for this format.
    pub fn generate(&self, analysis: &BundleAnalysis) -> String {
        match self {
            ReporterKind::Markdown => markdown::generate(analysis),
            ReporterKind::Json => json::generate(analysis),
            ReporterKind::Html => html::generate(analysis),
        }
    }
}

/// Summed byte estimates over all issues.
pub(crate) fn potential_savings(analysis: &BundleAnalysis) -> u64 {
    analysis
        .issues
        .iter()
        .filter_map(|issue| issue.bytes_estimate)
        .sum()
}
