//! Directory enumeration.
//!
//! Walks every root, keeps regular files whose name ends with the configured
//! suffix and returns them sorted. Enumeration always finishes before any
//! file is handed to a worker.

use std::path::Path;

use glob::Pattern;
use walkdir::{DirEntry, WalkDir};

use crate::config::{SweepConfig, WalkErrorPolicy};
use crate::error::SweepError;
use crate::report::SkippedEntry;
use crate::task::FileTask;

/// Files found by [`find_files`].
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct Discovery {
    /// Sorted, de-duplicated candidate files.
    pub tasks: Vec<FileTask>,
    /// Entries the walk could not read, under [`WalkErrorPolicy::Skip`], and
    /// directories left unvisited because of a finite `max_depth`.
    pub skipped: Vec<SkippedEntry>,
}

fn compile_excludes(patterns: &[String]) -> Result<Vec<Pattern>, SweepError> {
    patterns
        .iter()
        .map(|pat| {
            Pattern::new(pat).map_err(|source| SweepError::InvalidPattern {
                pattern: pat.clone(),
                source,
            })
        })
        .collect()
}

/// Check if a path matches any of the exclude patterns
fn matches_exclude(path: &Path, exclude: &[Pattern]) -> bool {
    let path_str = path.to_string_lossy();
    exclude.iter().any(|pattern| {
        pattern.matches(&path_str)
            || path
                .file_name()
                .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
    })
}

fn matches_suffix(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(suffix))
}

/// Roots are always walked, even when their own name is hidden.
fn is_not_hidden(entry: &DirEntry) -> bool {
    entry.depth() == 0
        || !entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

/// Enumerate the files a sweep will parse.
///
/// # Errors
///
/// Returns an error if a root does not exist, an exclude pattern is invalid,
/// or (under [`WalkErrorPolicy::Abort`]) the walk hits an unreadable entry.
pub fn find_files(config: &SweepConfig) -> Result<Discovery, SweepError> {
    let exclude = compile_excludes(&config.exclude)?;
    let mut discovery = Discovery::default();

    for root in &config.roots {
        if !root.exists() {
            return Err(SweepError::MissingRoot(root.clone()));
        }

        if root.is_file() {
            if matches_suffix(root, &config.extension) && !matches_exclude(root, &exclude) {
                discovery.tasks.push(FileTask::new(root.clone()));
            }
            continue;
        }

        if !root.is_dir() {
            continue;
        }

        let include_hidden = config.include_hidden;
        let walker = WalkDir::new(root)
            .follow_links(config.follow_links)
            .max_depth(config.max_depth)
            .into_iter()
            .filter_entry(move |entry| include_hidden || is_not_hidden(entry));

        for entry_result in walker {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(walk_err) => {
                    let path = walk_err
                        .path()
                        .map_or_else(|| root.clone(), Path::to_path_buf);
                    match config.walk_errors {
                        WalkErrorPolicy::Abort => {
                            return Err(SweepError::Walk {
                                path,
                                source: walk_err,
                            });
                        }
                        WalkErrorPolicy::Skip => {
                            tracing::warn!("skipping {}: {walk_err}", path.display());
                            discovery.skipped.push(SkippedEntry {
                                path,
                                message: walk_err.to_string(),
                            });
                            continue;
                        }
                    }
                }
            };

            if entry.depth() == config.max_depth && entry.file_type().is_dir() {
                tracing::warn!(
                    "not descending into {}: max depth {} reached",
                    entry.path().display(),
                    config.max_depth
                );
                discovery.skipped.push(SkippedEntry {
                    path: entry.into_path(),
                    message: format!("max depth {} reached", config.max_depth),
                });
                continue;
            }

            let file_path = entry.path();
            if !file_path.is_file() {
                continue;
            }
            if !matches_suffix(file_path, &config.extension) {
                continue;
            }
            if matches_exclude(file_path, &exclude) {
                tracing::debug!("excluded {}", file_path.display());
                continue;
            }

            discovery.tasks.push(FileTask::new(entry.into_path()));
        }
    }

    discovery.tasks.sort();
    discovery.tasks.dedup();
    Ok(discovery)
}
