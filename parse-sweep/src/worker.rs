//! Per-file parse attempt.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::diagnostics::DiagnosticSink;
use crate::error::SweepError;
use crate::parser::{SourceParser, SyntaxError};
use crate::task::{FileTask, ParseOutcome};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Reads one file and runs it through the parser.
///
/// Only the parser's verdict is downgraded to an outcome, including a panic
/// raised inside the parser. Read and decode failures are returned as errors
/// and abort the sweep.
pub struct ParseWorker<'a> {
    parser: &'a dyn SourceParser,
    diagnostics: &'a dyn DiagnosticSink,
}

impl<'a> ParseWorker<'a> {
    #[must_use]
    pub fn new(parser: &'a dyn SourceParser, diagnostics: &'a dyn DiagnosticSink) -> Self {
        Self {
            parser,
            diagnostics,
        }
    }

    /// Parse one file.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::Read`] if the file cannot be read and
    /// [`SweepError::Decode`] if it is not UTF-8.
    pub fn check(&self, task: &FileTask) -> Result<ParseOutcome, SweepError> {
        let path = task.path();
        let bytes = std::fs::read(path).map_err(|source| SweepError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let source = decode(&bytes, path)?;

        let verdict = panic::catch_unwind(AssertUnwindSafe(|| self.parser.parse(source, path)))
            .unwrap_or_else(|payload| {
                Err(SyntaxError::new(format!(
                    "parser panicked: {}",
                    panic_message(payload.as_ref())
                )))
            });

        match verdict {
            Ok(()) => Ok(ParseOutcome::success(path)),
            Err(syntax) => {
                tracing::debug!("{}: {}", path.display(), syntax.message());
                self.diagnostics.parse_failed(path);
                Ok(ParseOutcome::failure(path))
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg
    } else {
        "unknown panic"
    }
}

fn decode<'b>(bytes: &'b [u8], path: &Path) -> Result<&'b str, SweepError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    std::str::from_utf8(bytes).map_err(|source| SweepError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
