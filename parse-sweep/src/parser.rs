//! The parser seam.
//!
//! Building syntax trees is not this crate's job. A [`SourceParser`] only has
//! to say whether a source text is syntactically valid; the tree itself is
//! dropped.

use std::fmt;
use std::path::Path;

use rustpython_parser::Mode;

/// The parser rejected a source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    message: String,
}

impl SyntaxError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for SyntaxError {}

/// Decides whether a source text parses.
///
/// Implementations are shared by every worker thread.
pub trait SourceParser: Send + Sync {
    /// Parse `source`, read from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError`] when the text is not valid in the target language.
    fn parse(&self, source: &str, path: &Path) -> Result<(), SyntaxError>;
}

/// Python module parser backed by `rustpython-parser`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonParser;

impl SourceParser for PythonParser {
    fn parse(&self, source: &str, path: &Path) -> Result<(), SyntaxError> {
        rustpython_parser::parse(source, Mode::Module, &path.to_string_lossy())
            .map(drop)
            .map_err(|e| SyntaxError::new(e.to_string()))
    }
}
