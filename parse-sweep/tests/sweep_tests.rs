#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Integration tests for `parse_sweep::sweep`.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use parse_sweep::{
    CollectingSink, FileTask, ParseStatus, PythonParser, SourceParser, SweepConfig, SweepError,
    SyntaxError, WorkerPool, WriterSink, discover, sweep, sweep_tasks,
};
use tempfile::TempDir;

fn write(dir: &Path, rel: &str, content: &str) -> PathBuf {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

fn config_for(root: &Path, workers: usize) -> SweepConfig {
    let mut config = SweepConfig::with_roots(vec![root.to_path_buf()]);
    config.workers = workers;
    config
}

/// A tree with a mix of valid and invalid modules.
fn mixed_tree() -> TempDir {
    let tmp = TempDir::new().unwrap();
    for i in 0..40 {
        let rel = format!("pkg{}/mod_{i}.py", i % 5);
        if i % 7 == 0 {
            write(tmp.path(), &rel, "def broken(:\n    pass\n");
        } else {
            write(tmp.path(), &rel, &format!("VALUE_{i} = {i}\n"));
        }
    }
    tmp
}

#[test]
fn test_valid_and_invalid_file() {
    let tmp = TempDir::new().unwrap();
    let a = write(tmp.path(), "a.py", "x = 1");
    let b = write(tmp.path(), "b.py", "def f(:");

    let sink = CollectingSink::new();
    let report = sweep(&config_for(tmp.path(), 2), &PythonParser, &sink).unwrap();

    assert_eq!(report.files_checked(), 2);
    assert_eq!(report.outcomes[0].path, a);
    assert_eq!(report.outcomes[0].status, ParseStatus::Success);
    assert_eq!(report.outcomes[1].path, b);
    assert_eq!(report.outcomes[1].status, ParseStatus::Failure);
    assert_eq!(sink.paths(), vec![b]);
}

#[test]
fn test_diagnostic_line_written_once() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "a.py", "x = 1");
    write(tmp.path(), "b.py", "def f(:");

    let sink = WriterSink::new(Vec::new());
    sweep(&config_for(tmp.path(), 4), &PythonParser, &sink).unwrap();

    let text = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1, "got: {text}");
    assert!(lines[0].starts_with("Failed to parse: "));
    assert!(lines[0].ends_with("b.py"));
}

#[test]
fn test_empty_tree() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("empty/nested")).unwrap();

    let sink = CollectingSink::new();
    let report = sweep(&config_for(tmp.path(), 4), &PythonParser, &sink).unwrap();

    assert!(report.outcomes.is_empty());
    assert!(report.all_passed());
    assert!(sink.paths().is_empty());
}

#[test]
fn test_outcomes_cover_enumeration_exactly() {
    let tmp = mixed_tree();
    let config = config_for(tmp.path(), 4);

    let enumerated: Vec<PathBuf> = discover::find_files(&config)
        .unwrap()
        .tasks
        .into_iter()
        .map(FileTask::into_path)
        .collect();
    let report = sweep(&config, &PythonParser, &CollectingSink::new()).unwrap();
    let reported: Vec<PathBuf> = report.outcomes.iter().map(|o| o.path.clone()).collect();

    assert_eq!(reported, enumerated);
    let unique: BTreeSet<_> = reported.iter().collect();
    assert_eq!(unique.len(), reported.len());
}

#[test]
fn test_worker_count_does_not_change_results() {
    let tmp = mixed_tree();

    let sink_one = CollectingSink::new();
    let one = sweep(&config_for(tmp.path(), 1), &PythonParser, &sink_one).unwrap();
    let sink_many = CollectingSink::new();
    let many = sweep(&config_for(tmp.path(), 8), &PythonParser, &sink_many).unwrap();

    assert_eq!(one.outcomes, many.outcomes);
    assert_eq!(one.failed, 6);
    let failed_one: BTreeSet<_> = sink_one.paths().into_iter().collect();
    let failed_many: BTreeSet<_> = sink_many.paths().into_iter().collect();
    assert_eq!(failed_one, failed_many);
    assert_eq!(failed_one.len(), 6);
}

#[test]
fn test_file_deleted_before_read_is_fatal() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "a.py", "x = 1");
    write(tmp.path(), "b.py", "def f(:");
    let doomed = write(tmp.path(), "c.py", "y = 2");

    let config = config_for(tmp.path(), 2);
    let tasks = discover::find_files(&config).unwrap().tasks;
    assert_eq!(tasks.len(), 3);
    fs::remove_file(&doomed).unwrap();

    let pool = WorkerPool::new(2).unwrap();
    let err = sweep_tasks(tasks, &pool, &PythonParser, &CollectingSink::new()).unwrap_err();
    match err {
        SweepError::Read { path, .. } => assert_eq!(path, doomed),
        other => panic!("expected read error, got: {other}"),
    }
}

#[test]
fn test_sweep_tasks_preserves_task_order() {
    let tmp = TempDir::new().unwrap();
    let paths: Vec<PathBuf> = ["z.py", "m.py", "a.py"]
        .iter()
        .map(|name| write(tmp.path(), name, "pass\n"))
        .collect();
    let tasks: Vec<FileTask> = paths.iter().cloned().map(FileTask::from).collect();

    let pool = WorkerPool::new(3).unwrap();
    let outcomes = sweep_tasks(tasks, &pool, &PythonParser, &CollectingSink::new()).unwrap();
    let got: Vec<PathBuf> = outcomes.into_iter().map(|o| o.path).collect();
    assert_eq!(got, paths);
}

#[test]
fn test_invalid_config_rejected() {
    let tmp = TempDir::new().unwrap();
    let err = sweep(&config_for(tmp.path(), 0), &PythonParser, &CollectingSink::new()).unwrap_err();
    assert!(matches!(err, SweepError::InvalidConfig(_)), "got: {err}");

    let err = sweep(&SweepConfig::default(), &PythonParser, &CollectingSink::new()).unwrap_err();
    assert!(err.to_string().contains("No paths provided"), "got: {err}");
}

#[test]
fn test_json_output_contract() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "a.py", "x = 1");

    let report = sweep(&config_for(tmp.path(), 1), &PythonParser, &CollectingSink::new()).unwrap();
    let mut buf = Vec::new();
    parse_sweep::output::write_json(&report, &mut buf).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();

    assert!(json.get("outcomes").is_some());
    assert!(json.get("passed").is_some());
    assert!(json.get("failed").is_some());
    assert_eq!(json["outcomes"][0]["status"], "success");
}

/// Defers to the Python parser but panics on sources containing `boom`.
struct ExplodingParser;

impl SourceParser for ExplodingParser {
    fn parse(&self, source: &str, path: &Path) -> Result<(), SyntaxError> {
        assert!(!source.contains("boom"), "parser blew up");
        PythonParser.parse(source, path)
    }
}

#[test]
fn test_parser_panic_is_recorded_as_failure() {
    let tmp = TempDir::new().unwrap();
    let a = write(tmp.path(), "a.py", "boom");
    let b = write(tmp.path(), "b.py", "x = 1");

    let sink = CollectingSink::new();
    let report = sweep(&config_for(tmp.path(), 2), &ExplodingParser, &sink).unwrap();

    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.outcomes[0].path, a);
    assert_eq!(report.outcomes[0].status, ParseStatus::Failure);
    assert_eq!(report.outcomes[1].path, b);
    assert_eq!(report.outcomes[1].status, ParseStatus::Success);
    assert_eq!(sink.paths(), vec![a]);
}

#[test]
fn test_deeply_nested_file_is_found() {
    let tmp = TempDir::new().unwrap();
    let rel: String = (0..70).map(|i| format!("d{i}/")).chain(["deep.py".to_owned()]).collect();
    let deep = write(tmp.path(), &rel, "x = 1\n");

    let report = sweep(&config_for(tmp.path(), 2), &PythonParser, &CollectingSink::new()).unwrap();
    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(report.outcomes[0].path, deep);
    assert!(report.skipped.is_empty());
}
