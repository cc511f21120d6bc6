//! # parse-sweep
//!
//! Parallel bulk syntax validation for Python source trees.
//!
//! A sweep enumerates every file under the configured roots whose name ends
//! with the configured suffix, parses each one on a fixed-size worker pool and
//! collects a Success/Failure outcome per file. Files the parser rejects are
//! data; unreadable files abort the sweep.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use parse_sweep::{PythonParser, SweepConfig, WriterSink, sweep};
//!
//! let mut config = SweepConfig::with_roots(vec![PathBuf::from("src")]);
//! config.workers = 4;
//!
//! let sink = WriterSink::new(std::io::stderr());
//! let report = sweep(&config, &PythonParser, &sink).unwrap();
//! println!("Files checked: {}", report.files_checked());
//! println!("Failed: {}", report.failed);
//! ```

mod config;
mod diagnostics;
pub mod discover;
mod error;
pub mod output;
mod parser;
mod pool;
mod report;
mod task;
mod worker;

use std::time::Instant;

pub use config::{DEFAULT_EXTENSION, SweepConfig, WalkErrorPolicy};
pub use diagnostics::{CollectingSink, DiagnosticSink, WriterSink};
pub use error::SweepError;
pub use parser::{PythonParser, SourceParser, SyntaxError};
pub use pool::WorkerPool;
pub use report::{SkippedEntry, SweepReport};
pub use task::{FileTask, ParseOutcome, ParseStatus};
pub use worker::ParseWorker;

/// Parse every task on `pool` and return the outcomes in task order.
///
/// # Errors
///
/// Returns the first read/decode failure, or [`SweepError::WorkerPanicked`].
/// No partial outcomes are returned on error.
pub fn sweep_tasks(
    tasks: Vec<FileTask>,
    pool: &WorkerPool,
    parser: &dyn SourceParser,
    diagnostics: &dyn DiagnosticSink,
) -> Result<Vec<ParseOutcome>, SweepError> {
    let worker = ParseWorker::new(parser, diagnostics);
    pool.map(tasks, |task| worker.check(&task))
}

/// Run a full sweep: enumerate, parse in parallel, report.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, a root is missing, the
/// walk fails under [`WalkErrorPolicy::Abort`], or any file cannot be read.
/// Files that fail to parse are reported in the returned [`SweepReport`].
pub fn sweep(
    config: &SweepConfig,
    parser: &dyn SourceParser,
    diagnostics: &dyn DiagnosticSink,
) -> Result<SweepReport, SweepError> {
    config.validate()?;

    let start = Instant::now();
    let discovery = discover::find_files(config)?;
    tracing::debug!(
        "found {} file(s) in {:.1}ms",
        discovery.tasks.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    let pool = WorkerPool::new(config.workers)?;
    let start = Instant::now();
    let outcomes = sweep_tasks(discovery.tasks, &pool, parser, diagnostics)?;
    tracing::debug!(
        "parsed {} file(s) on {} worker(s) in {:.1}ms",
        outcomes.len(),
        pool.workers(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(SweepReport::new(outcomes, discovery.skipped))
}
