//! Error types for a sweep.
//!
//! Only infrastructure failures live here. A file the parser rejects is not an
//! error: it becomes a [`ParseStatus::Failure`](crate::ParseStatus::Failure)
//! outcome and the sweep keeps going.

use std::path::PathBuf;

use thiserror::Error;

/// A failure that aborts the whole sweep.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SweepError {
    /// The configuration cannot be used (zero workers, empty suffix, no roots).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A scan root does not exist.
    #[error("Path does not exist: {}", .0.display())]
    MissingRoot(PathBuf),

    /// An exclude glob could not be compiled.
    #[error("Invalid exclude glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// Directory traversal failed (permission denied, symlink loop, ...).
    #[error("Directory traversal error at {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A file could not be read after it was enumerated.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file is not valid UTF-8 and cannot be handed to the parser.
    #[error("File is not valid UTF-8: {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: std::str::Utf8Error,
    },

    /// A worker thread panicked before producing its outcome.
    #[error("Worker thread panicked during parallel execution")]
    WorkerPanicked,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_names_path() {
        let err = SweepError::Read {
            path: PathBuf::from("pkg/mod.py"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let msg = err.to_string();
        assert!(msg.contains("pkg/mod.py"), "got: {msg}");
        assert!(msg.contains("gone"), "got: {msg}");
    }

    #[test]
    fn test_missing_root_message() {
        let msg = SweepError::MissingRoot(PathBuf::from("src")).to_string();
        assert_eq!(msg, "Path does not exist: src");
    }
}
