//! Fixed-size worker pool.
//!
//! A [`WorkerPool`] is a sized handle; threads exist only for the duration of
//! one [`WorkerPool::map`] call. They are spawned inside a crossbeam scope, so
//! every worker is joined before `map` returns, on success, on the first task
//! error, and when a worker panics.

use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam::channel::{Receiver, Sender, bounded};

use crate::error::SweepError;

/// Explicitly sized pool of worker threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerPool {
    workers: usize,
}

/// Context handed to each worker thread.
struct WorkerContext<'a, T, R, F> {
    work_rx: Receiver<(usize, T)>,
    result_tx: Sender<(usize, Result<R, SweepError>)>,
    abort: &'a AtomicBool,
    processor: &'a F,
}

impl WorkerPool {
    /// Create a pool running at most `workers` tasks at once.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::InvalidConfig`] if `workers` is zero.
    pub fn new(workers: usize) -> Result<Self, SweepError> {
        if workers == 0 {
            return Err(SweepError::InvalidConfig(
                "worker count must be at least 1".to_owned(),
            ));
        }
        Ok(Self { workers })
    }

    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `processor` over every item and return the results in submission order.
    ///
    /// Blocks until all items are processed. The first `Err` stops dispatch of
    /// the remaining items and is returned; results produced so far are dropped.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `processor`, or
    /// [`SweepError::WorkerPanicked`] if a worker thread panicked.
    pub fn map<T, R, F>(&self, items: Vec<T>, processor: F) -> Result<Vec<R>, SweepError>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> Result<R, SweepError> + Sync,
    {
        let total = items.len();
        if total == 0 {
            return Ok(Vec::new());
        }

        let workers = self.workers.min(total);
        let (work_tx, work_rx) = bounded::<(usize, T)>(workers * 2);
        let (result_tx, result_rx) = bounded::<(usize, Result<R, SweepError>)>(workers * 2);
        let abort = AtomicBool::new(false);

        let scoped = crossbeam::thread::scope(|s| {
            for _ in 0..workers {
                let ctx = WorkerContext {
                    work_rx: work_rx.clone(),
                    result_tx: result_tx.clone(),
                    abort: &abort,
                    processor: &processor,
                };
                s.spawn(move |_| worker_loop(ctx));
            }

            let abort = &abort;
            s.spawn(move |_| {
                for item in items.into_iter().enumerate() {
                    if abort.load(Ordering::Relaxed) || work_tx.send(item).is_err() {
                        break;
                    }
                }
            });

            // Workers own the remaining handles; the result channel closes when they exit.
            drop(work_rx);
            drop(result_tx);

            collect_results(result_rx, total, abort)
        });

        match scoped {
            Ok(result) => result,
            Err(_) => Err(SweepError::WorkerPanicked),
        }
    }
}

fn worker_loop<T, R, F>(ctx: WorkerContext<'_, T, R, F>)
where
    F: Fn(T) -> Result<R, SweepError>,
{
    let WorkerContext {
        work_rx,
        result_tx,
        abort,
        processor,
    } = ctx;
    for (index, item) in work_rx {
        if abort.load(Ordering::Relaxed) {
            break;
        }
        if result_tx.send((index, processor(item))).is_err() {
            break;
        }
    }
}

fn collect_results<R>(
    result_rx: Receiver<(usize, Result<R, SweepError>)>,
    total: usize,
    abort: &AtomicBool,
) -> Result<Vec<R>, SweepError> {
    let mut slots: Vec<Option<R>> = std::iter::repeat_with(|| None).take(total).collect();

    for (index, result) in result_rx.into_iter().take(total) {
        match result {
            Ok(value) => slots[index] = Some(value),
            Err(e) => {
                abort.store(true, Ordering::Relaxed);
                return Err(e);
            }
        }
    }

    // An empty slot means every sender hung up early: a worker died.
    slots
        .into_iter()
        .map(|slot| slot.ok_or(SweepError::WorkerPanicked))
        .collect()
}
