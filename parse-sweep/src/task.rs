//! Per-file work items and their outcomes.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// One candidate source file, produced by enumeration and consumed by exactly one worker.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct FileTask(PathBuf);

impl FileTask {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.0
    }

    #[must_use]
    pub fn into_path(self) -> PathBuf {
        self.0
    }
}

impl From<PathBuf> for FileTask {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

/// Whether the parser accepted a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseStatus {
    Success,
    Failure,
}

impl ParseStatus {
    #[must_use]
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl fmt::Display for ParseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "ok"),
            Self::Failure => write!(f, "FAILED"),
        }
    }
}

/// Result of one parse attempt. Never mutated after a worker creates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct ParseOutcome {
    pub path: PathBuf,
    pub status: ParseStatus,
}

impl ParseOutcome {
    #[must_use]
    pub fn success(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            status: ParseStatus::Success,
        }
    }

    #[must_use]
    pub fn failure(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            status: ParseStatus::Failure,
        }
    }
}
