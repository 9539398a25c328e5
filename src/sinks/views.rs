//! In-memory chart views.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::config::DashboardOptions;
use crate::processing::{
    cumulative_series_by_category, ranked_counts, summarize_departments, top_n_with_other, DepartmentSummary,
};
use crate::types::{Bucket, CategorySeries, Record};

use super::{ChartSinks, DepartmentPieParams, TransitionGuard};

/// One word of the word cloud.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordWeight {
    pub text: String,
    pub weight: usize,
}

/// Object names weighted by how often they occur, heaviest first, at most `max_words`
/// (`0` = no limit).
///
/// Empty input returns immediately without grouping anything.
pub fn word_weights(records: &[Record], max_words: usize) -> Vec<WordWeight> {
    if records.is_empty() {
        return Vec::new();
    }
    let limit = if max_words == 0 { usize::MAX } else { max_words };
    ranked_counts(records, Record::object_name_key)
        .into_iter()
        .take(limit)
        .map(|Bucket { key, count }| WordWeight {
            text: key,
            weight: count,
        })
        .collect()
}

/// A headless implementation of every chart sink.
///
/// Each `update_*` call recomputes that chart's view from the records it is handed and
/// replaces the previous view entirely. The department chart's click guard is the
/// [`TransitionGuard`] this type owns.
#[derive(Debug, Clone)]
pub struct ChartViews {
    line: Vec<CategorySeries>,
    bar: Vec<Bucket>,
    pie: Vec<Bucket>,
    word_cloud: Vec<WordWeight>,
    department: DepartmentSummary,
    word_cloud_max_words: usize,
    click_guard: TransitionGuard,
}

impl ChartViews {
    pub fn new(word_cloud_max_words: usize, click_cooldown: Duration) -> Self {
        Self {
            line: Vec::new(),
            bar: Vec::new(),
            pie: Vec::new(),
            word_cloud: Vec::new(),
            department: DepartmentSummary::default(),
            word_cloud_max_words,
            click_guard: TransitionGuard::new(click_cooldown),
        }
    }

    pub fn from_options(options: &DashboardOptions) -> Self {
        Self::new(options.word_cloud_max_words, options.click_cooldown())
    }

    pub fn line(&self) -> &[CategorySeries] {
        &self.line
    }

    pub fn bar(&self) -> &[Bucket] {
        &self.bar
    }

    pub fn pie(&self) -> &[Bucket] {
        &self.pie
    }

    pub fn word_cloud(&self) -> &[WordWeight] {
        &self.word_cloud
    }

    pub fn department(&self) -> &DepartmentSummary {
        &self.department
    }

    pub fn click_guard(&self) -> &TransitionGuard {
        &self.click_guard
    }

    pub fn click_guard_mut(&mut self) -> &mut TransitionGuard {
        &mut self.click_guard
    }
}

impl Default for ChartViews {
    fn default() -> Self {
        Self::from_options(&DashboardOptions::default())
    }
}

impl ChartSinks for ChartViews {
    fn update_line_chart(&mut self, records: &[Record], top_n: usize, shift: usize) {
        self.line = cumulative_series_by_category(
            records,
            Record::object_name_key,
            |r: &Record| r.accession_year,
            top_n,
            shift,
        );
    }

    fn update_bar_chart(&mut self, records: &[Record], top_n: usize) {
        self.bar = top_n_with_other(records, Record::object_name_key, top_n);
    }

    fn update_pie_chart(&mut self, records: &[Record], top_n: usize) {
        self.pie = top_n_with_other(records, Record::object_name_key, top_n);
    }

    fn update_word_cloud(&mut self, records: &[Record]) {
        self.word_cloud = word_weights(records, self.word_cloud_max_words);
    }

    fn update_department_pie(&mut self, year_filtered: &[Record], params: DepartmentPieParams<'_>) {
        self.department = summarize_departments(year_filtered, params.active, params.thresholds);
    }

    fn highlight_department(&mut self, active: Option<&str>) {
        self.department.emphasize(active);
    }

    fn accepts_department_click(&mut self, at: Instant) -> bool {
        self.click_guard.try_begin(at)
    }
}
