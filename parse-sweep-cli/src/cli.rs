use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, ValueEnum, ValueHint};
use parse_sweep::{
    DEFAULT_EXTENSION, PythonParser, SweepConfig, SweepReport, WalkErrorPolicy, WriterSink,
    output, sweep,
};

use crate::{logging, watch};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum Format {
    #[default]
    Human,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "parse-sweep",
    version = env!("CARGO_PKG_VERSION"),
    about = "Parse every Python file under a directory tree and report the ones that fail",
    long_about = None
)]
pub struct Cli {
    /// Files or directories to scan
    #[arg(value_hint = ValueHint::AnyPath, default_value = ".")]
    pub roots: Vec<PathBuf>,

    /// File-name suffix to select
    #[arg(short, long, default_value = DEFAULT_EXTENSION)]
    pub extension: String,

    /// Number of worker threads [default: number of CPUs]
    #[arg(short = 'j', long)]
    pub workers: Option<usize>,

    #[command(flatten)]
    pub walk: WalkArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub watch: WatchArgs,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress log output below errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Directory traversal options.
#[derive(Debug, Args)]
pub struct WalkArgs {
    /// Exclude paths matching this glob (repeatable)
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Descend into hidden files and directories
    #[arg(long)]
    pub include_hidden: bool,

    /// Follow symbolic links
    #[arg(long)]
    pub follow_links: bool,

    /// Maximum directory depth [default: unlimited]
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Warn about unreadable directories instead of aborting
    #[arg(long)]
    pub skip_unreadable: bool,
}

/// Report options.
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output format for the final report
    #[arg(short, long, value_enum, default_value_t = Format::Human)]
    pub format: Format,

    /// Exit with status 1 if any file fails to parse
    #[arg(long)]
    pub deny_failures: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Re-run the sweep whenever a file under the roots changes
    #[arg(short, long)]
    pub watch: bool,

    /// Quiet period after a change before re-running, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 2000)]
    pub debounce: u64,
}

impl Cli {
    fn to_config(&self) -> SweepConfig {
        let mut config = SweepConfig::with_roots(self.roots.clone());
        config.extension.clone_from(&self.extension);
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        config.exclude.clone_from(&self.walk.exclude);
        config.include_hidden = self.walk.include_hidden;
        config.follow_links = self.walk.follow_links;
        if let Some(max_depth) = self.walk.max_depth {
            config.max_depth = max_depth;
        }
        if self.walk.skip_unreadable {
            config.walk_errors = WalkErrorPolicy::Skip;
        }
        config
    }
}

/// Run one sweep and print its report to stdout.
///
/// Diagnostics stream to stderr while workers run.
pub fn sweep_once(config: &SweepConfig, format: Format) -> Result<SweepReport> {
    let diagnostics = WriterSink::new(std::io::stderr());
    let report = sweep(config, &PythonParser, &diagnostics).context("sweep aborted")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        Format::Human => output::write_human(&report, &mut out)?,
        Format::Json => output::write_json(&report, &mut out)?,
    }
    out.flush()?;
    Ok(report)
}

/// Parse arguments, run the sweep and print the report. Returns the exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);
    if cli.output.no_color {
        colored::control::set_override(false);
    }

    let config = cli.to_config();
    tracing::info!(
        "scanning {} root(s) for *{} with {} worker(s)",
        config.roots.len(),
        config.extension,
        config.workers
    );

    if cli.watch.watch {
        watch::run(&config, cli.output.format, cli.watch.debounce)?;
        return Ok(0);
    }

    let report = sweep_once(&config, cli.output.format)?;
    if cli.output.deny_failures && !report.all_passed() {
        return Ok(1);
    }
    Ok(0)
}
