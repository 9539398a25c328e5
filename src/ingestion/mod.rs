//! Loading entrypoints and implementations.
//!
//! Most callers should use [`load_from_path`] (from [`unified`]) which:
//!
//! - auto-detects format by file extension (or you can override via [`LoadOptions`])
//! - builds a [`crate::store::RecordStore`] from the valid rows
//! - optionally reports success/failure/alerts to a [`LoadObserver`]
//!
//! Format-specific functions are also available under [`csv`] and [`json`].
//!
//! Rows are validated one at a time: a row without an integer-coercible `AccessionYear` or a
//! non-empty `Object Name` is dropped and counted, never reported as an error. Only
//! structural problems (unreadable file, missing required column, malformed JSON) fail a
//! load, so an empty but well-formed file produces a valid, empty store.

pub mod csv;
pub mod json;
pub mod observability;
pub mod unified;

pub use observability::{
    CompositeObserver, DropCounts, DropReason, LoadContext, LoadObserver, LoadSeverity, LoadStats, StdErrObserver,
};
pub use unified::{load_from_path, LoadFormat, LoadOptions};

use crate::types::{Record, Year};

/// Outcome of reading one input: the valid records plus how many rows were rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedRecords {
    pub records: Vec<Record>,
    /// Rows that did not become records, per reason.
    pub drops: DropCounts,
}

impl LoadedRecords {
    /// Keep a converted row, or count why it was dropped.
    pub(crate) fn push(&mut self, row: Result<Record, DropReason>) {
        match row {
            Ok(record) => self.records.push(record),
            Err(reason) => self.drops.record(reason),
        }
    }

    pub fn dropped(&self) -> usize {
        self.drops.total()
    }
}

/// Coerce a year cell the way a lenient integer parse does: optional sign, then the leading
/// run of digits. `"1979"`, `"1979.0"` and `" 1979-05-01"` all give 1979; text without
/// leading digits gives `None`.
pub fn parse_year(raw: &str) -> Option<Year> {
    let s = raw.trim();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let year: Year = digits[..end].parse().ok()?;
    Some(if negative { -year } else { year })
}

/// Interpret a boolean-like cell (`True`/`False`, `1`/`0`, `yes`/`no`, ...).
pub fn parse_bool_like(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" => Some(true),
        "false" | "f" | "0" | "no" | "n" => Some(false),
        _ => None,
    }
}
