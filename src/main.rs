//! reposcan - inventory a repository tree and package the results.
//!
//! Usage:
//!   reposcan [ROOT]                 Scan ROOT (default ".") into report_dir/
//!   reposcan --out DIR              Write artifacts to DIR and DIR.zip
//!   reposcan --threads N            Record files on N workers (0 = all cores)
//!   reposcan --exclude NAME         Also prune directories named NAME
//!   reposcan --help                 Show help

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use reposcan_core::{ActionLog, DEFAULT_EXCLUDED_DIRS, ScanConfig};
use reposcan_report::{DEFAULT_OUTPUT_DIR, RunSummary, run};

#[derive(Parser)]
#[command(
    name = "reposcan",
    version,
    about = "Inventory a repository tree",
    long_about = "reposcan walks a directory tree, fingerprints and classifies every \
                  file, and writes scan.json, report.txt and a zip of both.\n\n\
                  The output directory is deleted and recreated on every run."
)]
struct Cli {
    /// Directory to scan (defaults to current directory)
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Output directory; the archive is written next to it as <DIR>.zip
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    out: PathBuf,

    /// Worker threads for recording files (1 = sequential, 0 = all cores)
    #[arg(short = 'j', long, default_value = "1")]
    threads: usize,

    /// Additional directory name to prune (repeatable)
    #[arg(short = 'x', long = "exclude", value_name = "NAME")]
    exclude: Vec<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = build_config(&cli)?;
    let mut log = ActionLog::new();
    let result = run(config, &cli.out, &mut log);

    for action in log.entries() {
        debug!("{action}");
    }

    let summary = result.wrap_err_with(|| format!("Scan of {} failed", cli.root.display()))?;
    print_summary(&summary);

    Ok(())
}

fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn build_config(cli: &Cli) -> Result<ScanConfig> {
    let exclude_dirs: Vec<String> = DEFAULT_EXCLUDED_DIRS
        .iter()
        .map(|s| (*s).to_string())
        .chain(cli.exclude.iter().cloned())
        .collect();

    ScanConfig::builder()
        .root(cli.root.clone())
        .threads(cli.threads)
        .exclude_dirs(exclude_dirs)
        .build()
        .context("Invalid scan configuration")
}

/// Print the completion summary.
fn print_summary(summary: &RunSummary) {
    let manifest = &summary.manifest;
    let unreadable = manifest.unreadable_files().count();

    println!();
    println!("{}", "─".repeat(60));
    println!(
        " {} - {}",
        manifest.root.display(),
        format_size(summary.total_size())
    );
    println!(" {} files scanned", summary.total_files());
    if unreadable > 0 {
        println!(" {unreadable} file(s) could not be read");
    }
    println!("{}", "─".repeat(60));
    println!(" Manifest: {}", summary.layout.manifest.display());
    println!(" Report:   {}", summary.layout.report.display());
    println!(" Archive:  {}", summary.layout.archive.display());
    println!();
}

/// Format bytes as human-readable size.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
