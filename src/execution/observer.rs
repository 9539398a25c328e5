use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Execution events emitted by the filter engine.
#[derive(Debug, Clone)]
pub enum ExecutionEvent {
    RunStarted {
        input_rows: usize,
    },
    ChunkFinished {
        start_row: usize,
        row_count: usize,
        output_rows: usize,
    },
    RunFinished {
        elapsed: Duration,
        metrics: ExecutionMetricsSnapshot,
    },
}

/// Observer hook for execution events.
pub trait ExecutionObserver: Send + Sync {
    fn on_event(&self, event: &ExecutionEvent);
}

/// A simple stderr logger for execution events.
#[derive(Default)]
pub struct StdErrExecutionObserver;

impl ExecutionObserver for StdErrExecutionObserver {
    fn on_event(&self, event: &ExecutionEvent) {
        match event {
            ExecutionEvent::RunFinished { metrics, .. } => eprintln!("[filter][done] {metrics}"),
            other => eprintln!("[filter] {other:?}"),
        }
    }
}

/// Real-time counters for the most recent filter run.
///
/// Counters are reset at the start of every run; callers can snapshot them at any time.
pub struct ExecutionMetrics {
    run_id: AtomicU64,
    elapsed_ns: AtomicU64,
    rows_processed: AtomicU64,
    rows_matched: AtomicU64,
    chunks_started: AtomicU64,
    chunks_finished: AtomicU64,
}

impl ExecutionMetrics {
    pub fn new() -> Self {
        Self {
            run_id: AtomicU64::new(0),
            elapsed_ns: AtomicU64::new(0),
            rows_processed: AtomicU64::new(0),
            rows_matched: AtomicU64::new(0),
            chunks_started: AtomicU64::new(0),
            chunks_finished: AtomicU64::new(0),
        }
    }

    pub fn begin_run(&self) {
        self.run_id.fetch_add(1, Ordering::SeqCst);
        self.elapsed_ns.store(0, Ordering::SeqCst);
        self.rows_processed.store(0, Ordering::SeqCst);
        self.rows_matched.store(0, Ordering::SeqCst);
        self.chunks_started.store(0, Ordering::SeqCst);
        self.chunks_finished.store(0, Ordering::SeqCst);
    }

    pub fn end_run(&self, elapsed: Duration) {
        self.elapsed_ns
            .store(elapsed.as_nanos().min(u64::MAX as u128) as u64, Ordering::SeqCst);
    }

    pub fn on_chunk_start(&self) {
        self.chunks_started.fetch_add(1, Ordering::SeqCst);
    }

    pub fn on_chunk_end(&self, rows: usize, matched: usize) {
        self.rows_processed.fetch_add(rows as u64, Ordering::SeqCst);
        self.rows_matched.fetch_add(matched as u64, Ordering::SeqCst);
        self.chunks_finished.fetch_add(1, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> ExecutionMetricsSnapshot {
        let elapsed_ns = self.elapsed_ns.load(Ordering::SeqCst);
        ExecutionMetricsSnapshot {
            run_id: self.run_id.load(Ordering::SeqCst),
            elapsed: (elapsed_ns > 0).then(|| Duration::from_nanos(elapsed_ns)),
            rows_processed: self.rows_processed.load(Ordering::SeqCst),
            rows_matched: self.rows_matched.load(Ordering::SeqCst),
            chunks_started: self.chunks_started.load(Ordering::SeqCst),
            chunks_finished: self.chunks_finished.load(Ordering::SeqCst),
        }
    }
}

impl Default for ExecutionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable snapshot of [`ExecutionMetrics`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionMetricsSnapshot {
    pub run_id: u64,
    pub elapsed: Option<Duration>,
    pub rows_processed: u64,
    pub rows_matched: u64,
    pub chunks_started: u64,
    pub chunks_finished: u64,
}

impl fmt::Display for ExecutionMetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "run_id={}, rows={}/{}, chunks={}/{}, elapsed={:?}",
            self.run_id,
            self.rows_matched,
            self.rows_processed,
            self.chunks_finished,
            self.chunks_started,
            self.elapsed
        )
    }
}
