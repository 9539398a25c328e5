//! Nationality × century heatmap over preprocessed cell counts.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Selection value that stands for "everything".
pub const ALL: &str = "all";

/// One preprocessed heatmap cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    #[serde(rename = "Artist_Nationality")]
    pub nationality: String,
    #[serde(rename = "century_label")]
    pub century: String,
    pub count: u64,
    pub percent: f64,
}

/// Multi-select state of the century and nationality dropdowns.
///
/// An empty list, or a list containing [`ALL`], selects every value of that axis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeatmapSelection {
    pub centuries: Vec<String>,
    pub nationalities: Vec<String>,
}

impl HeatmapSelection {
    /// Back to "all" on both axes.
    pub fn reset(&mut self) {
        self.centuries.clear();
        self.nationalities.clear();
    }
}

struct AxisFilter<'a> {
    all: bool,
    values: HashSet<&'a str>,
}

impl<'a> AxisFilter<'a> {
    fn new(selected: &'a [String]) -> Self {
        Self {
            all: selected.is_empty() || selected.iter().any(|v| v == ALL),
            values: selected.iter().map(String::as_str).filter(|v| *v != ALL).collect(),
        }
    }

    fn accepts(&self, value: &str) -> bool {
        self.all || self.values.contains(value)
    }
}

/// Cells matching `selection`, in input order.
pub fn filter_cells(cells: &[HeatmapCell], selection: &HeatmapSelection) -> Vec<HeatmapCell> {
    let centuries = AxisFilter::new(&selection.centuries);
    let nationalities = AxisFilter::new(&selection.nationalities);
    cells
        .iter()
        .filter(|c| centuries.accepts(&c.century) && nationalities.accepts(&c.nationality))
        .cloned()
        .collect()
}

/// Axis domains for a set of cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeatmapLayout {
    /// Distinct centuries ordered by their leading number (`"5th"` < `"19th"`).
    pub centuries: Vec<String>,
    /// Distinct nationalities in first-occurrence order.
    pub nationalities: Vec<String>,
}

impl HeatmapLayout {
    pub fn for_cells(cells: &[HeatmapCell]) -> Self {
        let mut centuries = distinct(cells.iter().map(|c| c.century.as_str()));
        centuries.sort_by_key(|c| leading_number(c));
        Self {
            centuries,
            nationalities: distinct(cells.iter().map(|c| c.nationality.as_str())),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.centuries.is_empty() || self.nationalities.is_empty()
    }
}

/// Distinct non-blank centuries and nationalities of the full cell set, used to populate
/// the dropdowns. Nationalities are sorted alphabetically.
pub fn selection_options(cells: &[HeatmapCell]) -> HeatmapLayout {
    let mut layout = HeatmapLayout::for_cells(cells);
    layout.centuries.retain(|c| !c.trim().is_empty());
    layout.nationalities.retain(|n| !n.trim().is_empty());
    layout.nationalities.sort();
    layout
}

/// Largest cell count; the color scale is fixed to the unfiltered maximum so colors stay
/// comparable across selections.
pub fn max_count(cells: &[HeatmapCell]) -> u64 {
    cells.iter().map(|c| c.count).max().unwrap_or(0)
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_owned)
        .collect()
}

/// Leading integer of a label, `i64::MAX` when there is none (sorted last).
fn leading_number(label: &str) -> i64 {
    let trimmed = label.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end]
        .parse::<i64>()
        .map(|n| sign * n)
        .unwrap_or(i64::MAX)
}
