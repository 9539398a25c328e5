//! Department distribution for the department summary (donut) chart.

use serde::Serialize;

use crate::types::Record;

use super::aggregate::ranked_counts;

/// Label a slice whose share of the total is strictly above this percentage.
pub const DEFAULT_LABEL_PERCENT: u32 = 2;
/// Always label this many of the largest slices.
pub const DEFAULT_LABEL_COUNT: usize = 10;

/// How a slice is drawn relative to the active department filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SliceEmphasis {
    /// No department filter is active.
    Neutral,
    /// This slice is the active filter.
    Active,
    /// Another slice is the active filter.
    Dimmed,
}

impl SliceEmphasis {
    fn for_slice(department: &str, active: Option<&str>) -> Self {
        match active {
            None => Self::Neutral,
            Some(a) if a == department => Self::Active,
            Some(_) => Self::Dimmed,
        }
    }
}

/// One department slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentSlice {
    pub department: String,
    pub count: usize,
    /// Share of the total, in percent.
    pub percent: f64,
    pub labelled: bool,
    pub emphasis: SliceEmphasis,
}

/// Label thresholds for [`summarize_departments`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelThresholds {
    pub min_percent: u32,
    pub top_count: usize,
}

impl Default for LabelThresholds {
    fn default() -> Self {
        Self {
            min_percent: DEFAULT_LABEL_PERCENT,
            top_count: DEFAULT_LABEL_COUNT,
        }
    }
}

/// Department counts, largest first, with label and emphasis decisions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DepartmentSummary {
    pub slices: Vec<DepartmentSlice>,
    pub total: usize,
}

impl DepartmentSummary {
    /// `true` when there is nothing to draw ("No data available").
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Re-evaluate slice emphasis for a new active department without recounting.
    pub fn emphasize(&mut self, active: Option<&str>) {
        for slice in &mut self.slices {
            slice.emphasis = SliceEmphasis::for_slice(&slice.department, active);
        }
    }

    pub fn labelled(&self) -> impl Iterator<Item = &DepartmentSlice> {
        self.slices.iter().filter(|s| s.labelled)
    }
}

/// Summarize records by department.
///
/// Records without a department are left out of both the slices and the total.
pub fn summarize_departments(
    records: &[Record],
    active: Option<&str>,
    thresholds: LabelThresholds,
) -> DepartmentSummary {
    let ranked = ranked_counts(records, Record::department_key);
    let total: usize = ranked.iter().map(|b| b.count).sum();
    if total == 0 {
        return DepartmentSummary::default();
    }

    let slices = ranked
        .into_iter()
        .enumerate()
        .map(|(i, b)| {
            let percent = b.count as f64 / total as f64 * 100.0;
            DepartmentSlice {
                labelled: percent > f64::from(thresholds.min_percent) || i < thresholds.top_count,
                emphasis: SliceEmphasis::for_slice(&b.key, active),
                department: b.key,
                count: b.count,
                percent,
            }
        })
        .collect();

    DepartmentSummary { slices, total }
}
