//! Sky map table CLI
//!
//! Command-line tool for updating the Sky map dump table from the level
//! list and the game's translation files.

use clap::Parser;
use sky_core::{clean_prompt_input, sync_table, InputRole, SyncConfig};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sky-cli")]
#[command(about = "Update the Sky map dump table in place", long_about = None)]
#[command(version)]
struct Cli {
    /// Dump table to update (《光•遇》所有地图.md)
    #[arg(long)]
    table: Option<PathBuf>,

    /// Level list file (AllLevelList.lua)
    #[arg(long)]
    levels: Option<PathBuf>,

    /// Primary translation file (zh-Hans.lproj/Localizable.strings)
    #[arg(long, visible_alias = "chinese")]
    primary: Option<PathBuf>,

    /// Secondary translation file (Base.lproj/Localizable.strings)
    #[arg(long, visible_alias = "english")]
    secondary: Option<PathBuf>,

    /// JSON config file providing defaults for any of the options above
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the updated table instead of writing it
    #[arg(long)]
    dry_run: bool,

    /// Write a JSON run report to this path ("-" for stdout)
    #[arg(long)]
    report: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn flags(&self) -> SyncConfig {
        SyncConfig {
            table: self.table.clone(),
            levels: self.levels.clone(),
            primary: self.primary.clone(),
            secondary: self.secondary.clone(),
            report: self.report.clone(),
            dry_run: self.dry_run,
        }
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> sky_core::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => cli.flags().or(SyncConfig::load(path)?),
        None => cli.flags(),
    };

    init_logging(cli.verbose, config.dry_run);

    let paths = config.resolve_paths(prompt_path)?;
    debug!(?paths, "resolved input paths");
    let outcome = sync_table(&paths, config.dry_run)?;

    if config.dry_run {
        println!("{}", outcome.rendered);
    } else {
        println!(
            "Table updated: {} ({} records)",
            paths.table.display(),
            outcome.report.total_records
        );
    }

    let merge = &outcome.report.merge;
    eprintln!(
        "Added {} records, filled blanks in {}, kept {} existing",
        merge.added, merge.backfilled, merge.preserved
    );
    if !merge.unresolved.is_empty() {
        eprintln!("No translation found for: {}", merge.unresolved.join(", "));
    }

    if let Some(report_path) = &config.report {
        if report_path == Path::new("-") {
            println!("{}", serde_json::to_string_pretty(&outcome.report)?);
        } else {
            outcome.report.save(report_path)?;
            eprintln!("Report written to {}", report_path.display());
        }
    }

    Ok(())
}

/// Install the log subscriber. Logs go to stdout unless stdout carries the
/// rendered table.
fn init_logging(verbose: bool, dry_run: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if dry_run {
        builder.with_writer(io::stderr).init();
    } else {
        builder.with_writer(io::stdout).init();
    }
}

/// Ask for a path on the terminal
fn prompt_path(role: InputRole) -> sky_core::Result<PathBuf> {
    eprint!("Path to the {} ({}): ", role.label(), role.hint());
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(clean_prompt_input(&line))
}
