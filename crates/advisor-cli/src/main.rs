//! Advisor CLI - bundle-size advisor for JavaScript build output.

mod commands;
mod config;
mod reporters;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "advisor")]
#[command(about = "Analyze bundler stats and flag bundle-size optimization opportunities", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short = 'v', global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Analyze bundle stats and generate optimization recommendations
    Analyze(AnalyzeArgs),
}

#[derive(clap::Args, Debug)]
struct AnalyzeArgs {
    /// Path to the stats file (e.g. bundle-stats.json, webpack stats.json)
    #[arg(long)]
    stats_file: Option<PathBuf>,

    /// Reports directory (defaults to "bundle-advisor/" in cwd)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Reporter formats to write
    #[arg(long, value_enum, value_name = "REPORTER", num_args = 1..)]
    reporters: Vec<reporters::ReporterKind>,

    /// Configuration file path (defaults to bundle-advisor.config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Chunk size limit in bytes for the large-vendor-chunks rule
    #[arg(long)]
    max_chunk_size: Option<u64>,

    /// Module size limit in bytes for the huge-modules rule
    #[arg(long)]
    max_module_size: Option<u64>,

    /// Minimum chunk size in bytes for the lazy-load-candidates rule
    #[arg(long)]
    min_lazy_load_threshold: Option<u64>,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Analyze(args) => commands::analyze::run(args),
    }
}
