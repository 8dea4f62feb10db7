//! `composer-inventory` — expand `composer.lock` files into identified dependencies.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and install the logger ([`logging`]).
//! 2. Load config ([`config::load_config`]).
//! 3. Build the analyzer ([`analyzer::composer`]); a bad hash setting stops here.
//! 4. Find lock files ([`detector::find_lock_files`]).
//! 5. Run the [`engine`]: one placeholder per file, replaced by its records.
//! 6. Render the requested report ([`report`]).
//! 7. Exit `0`, or `1` when no lock file was found.

mod analyzer;
mod cli;
mod config;
mod detector;
mod digest;
mod engine;
mod error;
mod logging;
mod models;
mod report;

use anyhow::{Context, Result};
use clap::Parser;

use analyzer::composer::ComposerLockAnalyzer;
use analyzer::Analyzer;
use cli::{Cli, ReportFormat};
use config::load_config;
use detector::find_lock_files;
use engine::Engine;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_cli_logger(cli.verbose, cli.quiet);

    // Resolve project path
    let path = cli
        .path
        .canonicalize()
        .unwrap_or_else(|_| cli.path.clone());
    let project_dir = if path.is_file() {
        path.parent().map(|p| p.to_path_buf()).unwrap_or_else(|| path.clone())
    } else {
        path.clone()
    };

    let mut config = load_config(&project_dir, cli.config.as_deref())?;
    config.scan.exclude_dirs.extend(cli.exclude_dir.iter().cloned());

    let analyzer = ComposerLockAnalyzer::new(&config.analyzer)
        .context("initializing the composer.lock analyzer")?;
    if !analyzer.is_enabled() {
        tracing::warn!("{} is disabled; lock files will not be expanded", analyzer.name());
    }
    let hasher = analyzer.hash_algorithm();

    let files = find_lock_files(&path, &config.scan.exclude_dirs, |p| analyzer.accepts(p));
    if files.is_empty() {
        eprintln!("No composer.lock found in {}", path.display());
        std::process::exit(1);
    }

    let mut engine = Engine::new(vec![Box::new(analyzer)], Box::new(hasher));
    let summary = engine.scan(&project_dir, &files);
    let deps = engine.dependencies();

    match cli.report {
        ReportFormat::Terminal => {
            report::terminal::render(deps, &summary, &path, cli.verbose, cli.quiet);
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(deps)?);
        }
    }

    Ok(())
}
