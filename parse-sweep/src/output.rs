//! Output formatting for sweep reports.
//!
//! Provides JSON and plain-text formatters for `SweepReport`. Colors are
//! left to the CLI layer.

use std::io::Write;

use crate::report::SweepReport;

/// Format a `SweepReport` as pretty JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &SweepReport, writer: &mut dyn Write) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writeln!(writer)
}

/// Format a `SweepReport` as one `<path>: ok|FAILED` line per file, then the
/// failing paths again under a `Failures:` heading, then a summary.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &SweepReport, writer: &mut dyn Write) -> std::io::Result<()> {
    for outcome in &report.outcomes {
        writeln!(writer, "{}: {}", outcome.path.display(), outcome.status)?;
    }
    for skipped in &report.skipped {
        writeln!(
            writer,
            "{}: skipped ({})",
            skipped.path.display(),
            skipped.message
        )?;
    }
    if !report.all_passed() {
        writeln!(writer)?;
        writeln!(writer, "Failures:")?;
        for path in report.failures() {
            writeln!(writer, "  {}", path.display())?;
        }
    }
    writeln!(writer)?;
    writeln!(
        writer,
        "{} file(s) checked, {} passed, {} failed",
        report.files_checked(),
        report.passed,
        report.failed
    )
}
