//! Per-file diagnostics emitted while the sweep runs.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Receives one event for every file the parser rejects.
///
/// Called concurrently from worker threads.
pub trait DiagnosticSink: Send + Sync {
    fn parse_failed(&self, path: &Path);
}

/// Writes `Failed to parse: <path>` lines to a writer.
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> DiagnosticSink for WriterSink<W> {
    fn parse_failed(&self, path: &Path) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        // A broken diagnostics pipe must not turn a parse failure into a fatal error.
        if let Err(e) = writeln!(writer, "Failed to parse: {}", path.display()) {
            tracing::warn!("failed to write diagnostic for {}: {e}", path.display());
        }
    }
}

/// Records failing paths in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    paths: Mutex<Vec<PathBuf>>,
}

impl CollectingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths recorded so far, in the order workers reported them.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DiagnosticSink for CollectingSink {
    fn parse_failed(&self, path: &Path) {
        self.paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_path_buf());
    }
}
