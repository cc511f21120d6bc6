//! Configuration for a sweep.
//!
//! Everything the run needs is injected here: scan roots, the file-name
//! suffix filter and the pool size. Default roots are a CLI concern and are
//! not baked into the library.

use std::path::PathBuf;

use crate::error::SweepError;

/// Suffix matched against file names when none is configured.
pub const DEFAULT_EXTENSION: &str = ".py";

/// What to do when directory traversal hits an entry it cannot read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum WalkErrorPolicy {
    /// Treat the walk error as fatal and abort the sweep (default).
    #[default]
    Abort,
    /// Log a warning, record the entry in the report and keep walking.
    Skip,
}

/// Options for one sweep.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct SweepConfig {
    /// Files or directories to scan. Required, must be non-empty.
    pub roots: Vec<PathBuf>,
    /// File-name suffix filter (default: `.py`).
    pub extension: String,
    /// Number of worker threads (default: number of logical CPUs).
    pub workers: usize,
    /// Descend into and yield entries whose name starts with `.`.
    pub include_hidden: bool,
    /// Whether to follow symbolic links (default: `false`).
    pub follow_links: bool,
    /// Maximum directory traversal depth (default: unlimited). Directories cut
    /// off by a finite cap are reported as skipped.
    pub max_depth: usize,
    /// Exclude patterns (glob format), matched against the path and the file name.
    pub exclude: Vec<String>,
    /// Handling of unreadable directories and symlink loops.
    pub walk_errors: WalkErrorPolicy,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            extension: DEFAULT_EXTENSION.to_owned(),
            workers: num_cpus::get().max(1),
            include_hidden: false,
            follow_links: false,
            max_depth: usize::MAX,
            exclude: Vec::new(),
            walk_errors: WalkErrorPolicy::default(),
        }
    }
}

impl SweepConfig {
    /// Config scanning `roots` with every other option at its default.
    #[must_use]
    pub fn with_roots(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            ..Self::default()
        }
    }

    /// Check the options that do not need the file system.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::InvalidConfig`] if no roots are given, the suffix
    /// is empty, or the worker count is zero.
    pub fn validate(&self) -> Result<(), SweepError> {
        if self.roots.is_empty() {
            return Err(SweepError::InvalidConfig(
                "No paths provided for validation".to_owned(),
            ));
        }
        if self.extension.is_empty() {
            return Err(SweepError::InvalidConfig(
                "extension filter must not be empty".to_owned(),
            ));
        }
        if self.workers == 0 {
            return Err(SweepError::InvalidConfig(
                "worker count must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}
