//! Chart sinks: the rendering side the selection controller dispatches into.
//!
//! A sink receives filtered records plus its own parameters and replaces whatever it was
//! showing. Sinks never mutate the records they receive and must tolerate being called
//! again with identical arguments.
//!
//! [`ChartSinks`] bundles the entry points of every chart on the dashboard. All methods
//! have no-op defaults, so a host only implements the charts it actually draws.
//! [`ChartViews`] is a complete implementation that keeps each chart's derived view in
//! memory, useful for headless hosts and tests.

pub mod guard;
pub mod views;

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::processing::LabelThresholds;
use crate::types::Record;

pub use guard::TransitionGuard;
pub use views::{word_weights, ChartViews, WordWeight};

/// Identifies one chart sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkKind {
    Line,
    Bar,
    Pie,
    WordCloud,
    /// Department summary (donut) chart. Always fed year-filtered records.
    DepartmentPie,
}

impl SinkKind {
    pub const ALL: [SinkKind; 5] = [
        SinkKind::Line,
        SinkKind::Bar,
        SinkKind::Pie,
        SinkKind::WordCloud,
        SinkKind::DepartmentPie,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// A small set of [`SinkKind`]s.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SinkSet(u8);

impl SinkSet {
    pub const EMPTY: SinkSet = SinkSet(0);
    pub const ALL: SinkSet = SinkSet(0b1_1111);

    pub fn only(kind: SinkKind) -> Self {
        Self(kind.bit())
    }

    pub fn with(self, kind: SinkKind) -> Self {
        Self(self.0 | kind.bit())
    }

    pub fn without(self, kind: SinkKind) -> Self {
        Self(self.0 & !kind.bit())
    }

    pub fn union(self, other: SinkSet) -> Self {
        Self(self.0 | other.0)
    }

    pub fn difference(self, other: SinkSet) -> Self {
        Self(self.0 & !other.0)
    }

    pub fn contains(self, kind: SinkKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in dispatch order (the order of [`SinkKind::ALL`]).
    pub fn iter(self) -> impl Iterator<Item = SinkKind> {
        SinkKind::ALL.into_iter().filter(move |k| self.contains(*k))
    }
}

impl fmt::Debug for SinkSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<SinkKind> for SinkSet {
    fn from_iter<I: IntoIterator<Item = SinkKind>>(iter: I) -> Self {
        iter.into_iter().fold(SinkSet::EMPTY, SinkSet::with)
    }
}

/// Parameters for the department summary chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepartmentPieParams<'a> {
    /// The active department filter, drawn emphasized.
    pub active: Option<&'a str>,
    pub thresholds: LabelThresholds,
}

/// Entry points of the dashboard charts.
pub trait ChartSinks {
    /// Cumulative series of the top `top_n` object names after skipping `shift`.
    fn update_line_chart(&mut self, _records: &[Record], _top_n: usize, _shift: usize) {}

    /// Top-N+Other bars over object names.
    fn update_bar_chart(&mut self, _records: &[Record], _top_n: usize) {}

    /// Top-N+Other pie over object names.
    fn update_pie_chart(&mut self, _records: &[Record], _top_n: usize) {}

    fn update_word_cloud(&mut self, _records: &[Record]) {}

    /// Department distribution of the year-filtered records (never department-filtered).
    fn update_department_pie(&mut self, _year_filtered: &[Record], _params: DepartmentPieParams<'_>) {}

    /// The active department changed without a data reload of the department chart.
    fn highlight_department(&mut self, _active: Option<&str>) {}

    /// Asked before a department click is applied. Returning `false` drops the click,
    /// e.g. while the chart's own filter-toggle transition is still running.
    fn accepts_department_click(&mut self, _at: Instant) -> bool {
        true
    }
}
