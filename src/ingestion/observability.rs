use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::DashboardError;

use super::unified::LoadFormat;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (operation failed).
    Error,
    /// Critical error (typically I/O or other infrastructure failures).
    Critical,
}

/// Context about a load attempt.
#[derive(Debug, Clone)]
pub struct LoadContext {
    pub path: PathBuf,
    pub format: LoadFormat,
}

/// Why a source row did not become a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropReason {
    /// `AccessionYear` missing or without a leading integer.
    MissingYear,
    /// `Object Name` missing or blank.
    MissingObjectName,
    /// CSV row that is not valid UTF-8.
    InvalidEncoding,
    /// JSON row that is not an object.
    NotAnObject,
}

/// Dropped rows, per reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropCounts {
    pub missing_year: usize,
    pub missing_object_name: usize,
    pub invalid_encoding: usize,
    pub not_an_object: usize,
}

impl DropCounts {
    pub fn record(&mut self, reason: DropReason) {
        let slot = match reason {
            DropReason::MissingYear => &mut self.missing_year,
            DropReason::MissingObjectName => &mut self.missing_object_name,
            DropReason::InvalidEncoding => &mut self.invalid_encoding,
            DropReason::NotAnObject => &mut self.not_an_object,
        };
        *slot += 1;
    }

    pub fn total(&self) -> usize {
        self.missing_year + self.missing_object_name + self.invalid_encoding + self.not_an_object
    }
}

impl fmt::Display for DropCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (no_year={}, no_name={}, bad_utf8={}, not_object={})",
            self.total(),
            self.missing_year,
            self.missing_object_name,
            self.invalid_encoding,
            self.not_an_object
        )
    }
}

/// Stats reported on a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    /// Records that entered the store.
    pub rows: usize,
    pub drops: DropCounts,
}

impl LoadStats {
    /// Rows that did not enter the store.
    pub fn dropped(&self) -> usize {
        self.drops.total()
    }
}

/// Observer interface for load outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait LoadObserver: Send + Sync {
    /// Called when loading succeeds.
    fn on_success(&self, _ctx: &LoadContext, _stats: LoadStats) {}

    /// Called when loading fails.
    fn on_failure(&self, _ctx: &LoadContext, _severity: LoadSeverity, _error: &DashboardError) {}

    /// Called when a load failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &DashboardError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn LoadObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn LoadObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl LoadObserver for CompositeObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &DashboardError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &DashboardError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs load events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl LoadObserver for StdErrObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        eprintln!(
            "[load][ok] format={:?} path={} rows={} dropped={}",
            ctx.format,
            ctx.path.display(),
            stats.rows,
            stats.drops
        );
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &DashboardError) {
        eprintln!(
            "[load][{:?}] format={:?} path={} err={}",
            severity,
            ctx.format,
            ctx.path.display(),
            error
        );
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &DashboardError) {
        eprintln!(
            "[ALERT][load][{:?}] format={:?} path={} err={}",
            severity,
            ctx.format,
            ctx.path.display(),
            error
        );
    }
}
