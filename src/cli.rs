use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "composer-inventory",
    about = "List the dependencies locked in composer.lock files",
    version
)]
pub struct Cli {
    /// Project directory or composer.lock file to scan
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Config file [default: ./.composer-inventory/config.toml, fallback ~/.config/composer-inventory/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Skip directories with this name (repeatable, added to the configured list)
    #[arg(long = "exclude-dir", value_name = "DIR")]
    pub exclude_dir: Vec<String>,

    /// Show evidence for every dependency and enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}
