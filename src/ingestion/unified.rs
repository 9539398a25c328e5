//! Unified loading entrypoint.
//!
//! Most callers should use [`load_from_path`], which reads a collection file into a
//! [`RecordStore`].
//!
//! - If [`LoadOptions::format`] is `None`, the format is inferred from the file extension.
//! - If a [`LoadObserver`] is provided, success/failure/alerts are reported to it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{DashboardError, DashboardResult};
use crate::store::RecordStore;

use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats};
use super::{csv, json};

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// JSON array-of-objects or NDJSON.
    Json,
}

impl LoadFormat {
    /// Parse a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" | "ndjson" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Options controlling unified loading behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// If `None`, auto-detect format from file extension.
    pub format: Option<LoadFormat>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("format", &self.format)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            format: None,
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

/// Load a collection file into a [`RecordStore`].
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with the kept row count and drops per reason
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// ```no_run
/// use collection_explorer::ingestion::{load_from_path, LoadOptions};
///
/// # fn main() -> Result<(), collection_explorer::DashboardError> {
/// let store = load_from_path("MetObjects.min.csv", &LoadOptions::default())?;
/// println!("records={} years={:?}", store.len(), store.year_extent());
/// # Ok(())
/// # }
/// ```
pub fn load_from_path(path: impl AsRef<Path>, options: &LoadOptions) -> DashboardResult<RecordStore> {
    let path = path.as_ref();
    let format = match options.format {
        Some(f) => f,
        None => infer_format_from_path(path)?,
    };

    let ctx = LoadContext {
        path: path.to_path_buf(),
        format,
    };

    let result = match format {
        LoadFormat::Csv => csv::load_records_from_path(path),
        LoadFormat::Json => json::load_records_from_path(path),
    };

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(loaded) => obs.on_success(
                &ctx,
                LoadStats {
                    rows: loaded.records.len(),
                    drops: loaded.drops,
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result.map(|loaded| RecordStore::new(loaded.records))
}

fn severity_for_error(e: &DashboardError) -> LoadSeverity {
    match e {
        DashboardError::Io(_) => LoadSeverity::Critical,
        DashboardError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => LoadSeverity::Critical,
            _ => LoadSeverity::Error,
        },
        DashboardError::Json(err) if err.is_io() => LoadSeverity::Critical,
        DashboardError::Json(_) => LoadSeverity::Error,
        DashboardError::SchemaMismatch { .. } => LoadSeverity::Error,
        DashboardError::InvalidParameter { .. } | DashboardError::ThreadPool(_) => LoadSeverity::Error,
    }
}

fn infer_format_from_path(path: &Path) -> DashboardResult<LoadFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| DashboardError::SchemaMismatch {
            message: format!("cannot infer format: path has no extension ({})", path.display()),
        })?;

    LoadFormat::from_extension(ext).ok_or_else(|| DashboardError::SchemaMismatch {
        message: format!(
            "cannot infer format from extension '{ext}' for path ({})",
            path.display()
        ),
    })
}
