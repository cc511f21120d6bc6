//! Watch mode: sweep once, then sweep again after every burst of file changes.

use std::io::IsTerminal;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use colored::Colorize;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use parse_sweep::SweepConfig;

use crate::cli::{Format, sweep_once};

/// Watch every root recursively and re-run the sweep on change.
///
/// Sweep errors are printed and the watch continues; only a dead watcher
/// ends the loop.
///
/// # Errors
///
/// Returns an error if a root cannot be watched or the watcher shuts down.
pub fn run(config: &SweepConfig, format: Format, debounce_ms: u64) -> Result<()> {
    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = notify::recommended_watcher(tx).context("failed to start file watcher")?;
    for root in &config.roots {
        watcher
            .watch(root, RecursiveMode::Recursive)
            .with_context(|| format!("failed to watch {}", root.display()))?;
    }

    clear_screen();
    eprintln!("{}", "Starting sweep in watch mode...".bold());
    sweep_and_report(config, format);

    let quiet = Duration::from_millis(debounce_ms);
    loop {
        let event = rx.recv().context("file watcher stopped")?;
        if !is_change(&event) {
            continue;
        }
        // Let a burst of writes settle into one re-run.
        loop {
            match rx.recv_timeout(quiet) {
                Ok(_) => {}
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => bail!("file watcher stopped"),
            }
        }

        clear_screen();
        eprintln!("{}", "File change detected...".bold());
        sweep_and_report(config, format);
    }
}

fn sweep_and_report(config: &SweepConfig, format: Format) {
    match sweep_once(config, format) {
        Ok(report) => tracing::debug!(
            "watch run finished: {} passed, {} failed",
            report.passed,
            report.failed
        ),
        Err(e) => eprintln!("{} {e:#}", "Error:".red().bold()),
    }
}

/// Reads are ignored; the sweep itself produces them.
fn is_change(event: &notify::Result<Event>) -> bool {
    match event {
        Ok(event) => !matches!(event.kind, EventKind::Access(_)),
        Err(e) => {
            tracing::warn!("file watcher error: {e}");
            false
        }
    }
}

fn clear_screen() {
    if !std::io::stdout().is_terminal() {
        return;
    }
    if let Err(e) = clearscreen::clear() {
        tracing::debug!("failed to clear screen: {e}");
    }
}
