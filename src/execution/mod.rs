//! Chunked record filtering.
//!
//! The selection controller filters the whole record store on every brush. On large
//! collections this runs on a dedicated rayon pool in fixed-size chunks; chunk output is
//! concatenated in input order, so the result is identical to a sequential filter.
//!
//! Progress is reported through real-time [`ExecutionMetrics`] and an optional
//! [`ExecutionObserver`].

mod observer;

use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::config::ExecutionOptions;
use crate::error::{DashboardError, DashboardResult};
use crate::types::Record;

pub use observer::{
    ExecutionEvent, ExecutionMetrics, ExecutionMetricsSnapshot, ExecutionObserver, StdErrExecutionObserver,
};

/// Filters record slices on a private thread pool.
pub struct FilterEngine {
    pool: ThreadPool,
    chunk_size: usize,
    observer: Option<Arc<dyn ExecutionObserver>>,
    metrics: Arc<ExecutionMetrics>,
}

impl FilterEngine {
    /// Create an engine with the given options.
    ///
    /// Fails with [`DashboardError::SchemaMismatch`] when `chunk_size == 0` or
    /// `num_threads == Some(0)`, and with [`DashboardError::ThreadPool`] if the pool cannot
    /// be built.
    pub fn new(opts: &ExecutionOptions) -> DashboardResult<Self> {
        if opts.chunk_size == 0 {
            return Err(DashboardError::SchemaMismatch {
                message: "execution.chunk_size must be > 0".to_string(),
            });
        }
        if opts.num_threads == Some(0) {
            return Err(DashboardError::SchemaMismatch {
                message: "execution.num_threads must be > 0 when set".to_string(),
            });
        }

        let n_threads = opts
            .num_threads
            .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1));
        let pool = ThreadPoolBuilder::new().num_threads(n_threads).build()?;

        Ok(Self {
            pool,
            chunk_size: opts.chunk_size,
            observer: None,
            metrics: Arc::new(ExecutionMetrics::new()),
        })
    }

    /// Attach an observer for execution events.
    pub fn with_observer(mut self, observer: Arc<dyn ExecutionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Get a handle to real-time execution metrics.
    pub fn metrics(&self) -> Arc<ExecutionMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Records for which `predicate` returns `true`, in input order.
    pub fn filter<F>(&self, records: &[Record], predicate: F) -> Vec<Record>
    where
        F: Fn(&Record) -> bool + Send + Sync,
    {
        self.pool.install(|| self.filter_impl(records, &predicate))
    }

    fn filter_impl(&self, records: &[Record], predicate: &(dyn Fn(&Record) -> bool + Send + Sync)) -> Vec<Record> {
        let start = Instant::now();
        self.metrics.begin_run();
        self.emit(ExecutionEvent::RunStarted {
            input_rows: records.len(),
        });

        let per_chunk: Vec<Vec<Record>> = records
            .par_chunks(self.chunk_size)
            .enumerate()
            .map(|(i, chunk)| {
                self.metrics.on_chunk_start();
                let out: Vec<Record> = chunk.iter().filter(|r| predicate(r)).cloned().collect();
                self.metrics.on_chunk_end(chunk.len(), out.len());
                self.emit(ExecutionEvent::ChunkFinished {
                    start_row: i * self.chunk_size,
                    row_count: chunk.len(),
                    output_rows: out.len(),
                });
                out
            })
            .collect();

        let out: Vec<Record> = per_chunk.into_iter().flatten().collect();

        self.metrics.end_run(start.elapsed());
        self.emit(ExecutionEvent::RunFinished {
            elapsed: start.elapsed(),
            metrics: self.metrics.snapshot(),
        });
        out
    }

    fn emit(&self, event: ExecutionEvent) {
        if let Some(obs) = &self.observer {
            obs.on_event(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::{ExecutionEvent, ExecutionObserver, FilterEngine};
    use crate::config::ExecutionOptions;
    use crate::error::DashboardError;
    use crate::types::Record;

    fn records(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| Record::new(1900 + (i % 100) as i32, format!("obj-{}", i % 7)))
            .collect()
    }

    fn engine(chunk_size: usize) -> FilterEngine {
        FilterEngine::new(&ExecutionOptions {
            num_threads: Some(4),
            chunk_size,
        })
        .unwrap()
    }

    #[test]
    fn chunked_filter_matches_sequential_filter() {
        let input = records(1_000);
        let expected: Vec<Record> = input
            .iter()
            .filter(|r| r.accession_year >= 1950)
            .cloned()
            .collect();

        let out = engine(37).filter(&input, |r| r.accession_year >= 1950);
        assert_eq!(out, expected);
    }

    #[test]
    fn metrics_are_available_after_run() {
        let input = records(100);
        let engine = engine(10);
        let metrics = engine.metrics();

        let out = engine.filter(&input, |r| r.object_name == "obj-0");
        let snap = metrics.snapshot();
        assert_eq!(snap.rows_processed, 100);
        assert_eq!(snap.rows_matched, out.len() as u64);
        assert_eq!(snap.chunks_started, 10);
        assert_eq!(snap.chunks_finished, 10);
        assert!(snap.elapsed.is_some());
    }

    #[derive(Default)]
    struct ChunkCounter {
        chunks: AtomicUsize,
        runs: AtomicUsize,
    }

    impl ExecutionObserver for ChunkCounter {
        fn on_event(&self, event: &ExecutionEvent) {
            match event {
                ExecutionEvent::ChunkFinished { .. } => {
                    self.chunks.fetch_add(1, Ordering::SeqCst);
                }
                ExecutionEvent::RunFinished { .. } => {
                    self.runs.fetch_add(1, Ordering::SeqCst);
                }
                _ => {}
            }
        }
    }

    #[test]
    fn observer_sees_every_chunk() {
        let counter = Arc::new(ChunkCounter::default());
        let engine = engine(4).with_observer(counter.clone());
        let _ = engine.filter(&records(10), |_| true);
        assert_eq!(counter.chunks.load(Ordering::SeqCst), 3);
        assert_eq!(counter.runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn empty_input_has_no_chunks() {
        let out = engine(4).filter(&[], |_| true);
        assert!(out.is_empty());
    }

    #[test]
    fn invalid_options_are_rejected() {
        let err = FilterEngine::new(&ExecutionOptions {
            num_threads: Some(1),
            chunk_size: 0,
        })
        .err()
        .unwrap();
        assert!(matches!(err, DashboardError::SchemaMismatch { .. }));
        assert!(FilterEngine::new(&ExecutionOptions {
            num_threads: Some(0),
            chunk_size: 4,
        })
        .is_err());
    }
}
