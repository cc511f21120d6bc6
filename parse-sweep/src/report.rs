//! Sweep report types.

use std::path::PathBuf;

use serde::Serialize;

use crate::task::ParseOutcome;

/// A directory entry the walk left out: unreadable under
/// [`WalkErrorPolicy::Skip`](crate::WalkErrorPolicy::Skip), or below the depth cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub message: String,
}

/// Result of a completed sweep.
///
/// Parse failures are data, not errors: a report with `failed > 0` is still
/// a successful run.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct SweepReport {
    /// One outcome per enumerated file, in enumeration order.
    pub outcomes: Vec<ParseOutcome>,
    /// Number of files the parser accepted.
    pub passed: usize,
    /// Number of files the parser rejected.
    pub failed: usize,
    /// Entries skipped during enumeration.
    pub skipped: Vec<SkippedEntry>,
}

impl SweepReport {
    #[must_use]
    pub fn new(outcomes: Vec<ParseOutcome>, skipped: Vec<SkippedEntry>) -> Self {
        let failed = outcomes
            .iter()
            .filter(|o| !o.status.is_success())
            .count();
        Self {
            passed: outcomes.len() - failed,
            failed,
            outcomes,
            skipped,
        }
    }

    /// Total number of files parsed.
    #[must_use]
    pub fn files_checked(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether every file parsed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Paths of files the parser rejected, in enumeration order.
    pub fn failures(&self) -> impl Iterator<Item = &std::path::Path> {
        self.outcomes
            .iter()
            .filter(|o| !o.status.is_success())
            .map(|o| o.path.as_path())
    }
}
