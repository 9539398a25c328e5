//! Dashboard configuration and user-adjustable chart parameters.
//!
//! Use [`Default`] for common cases, or load a (partial) JSON document with
//! [`DashboardOptions::from_json_str`] / [`DashboardOptions::from_path`]; missing keys keep
//! their defaults.
//!
//! ```rust
//! use collection_explorer::config::{DashboardOptions, SchedulePolicy};
//!
//! let opts = DashboardOptions::from_json_str(r#"{ "bar_top_n": 15, "schedule": "deferred" }"#).unwrap();
//! assert_eq!(opts.bar_top_n, 15);
//! assert_eq!(opts.schedule, SchedulePolicy::Deferred);
//! assert_eq!(opts.line_top_n, 10);
//! ```

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};
use crate::processing::department::{LabelThresholds, DEFAULT_LABEL_COUNT, DEFAULT_LABEL_PERCENT};
use crate::processing::DEFAULT_TOP_N;

/// When the filter + notify step runs relative to the event that caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulePolicy {
    /// Recompute and notify inside the event handler.
    #[default]
    Immediate,
    /// Queue the work; it runs when the host calls
    /// [`crate::controller::SelectionController::run_pending`] from its idle callback.
    Deferred,
}

/// Options for the chunked filter engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionOptions {
    /// Number of worker threads. If `None`, uses the platform's available parallelism.
    pub num_threads: Option<usize>,
    /// Number of records per chunk.
    pub chunk_size: usize,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            num_threads: None,
            chunk_size: 16_384,
        }
    }
}

/// Top-level dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardOptions {
    /// Categories drawn by the line chart (`0` = default of 10).
    pub line_top_n: usize,
    /// Top categories the line chart skips before taking its window.
    pub line_shift: usize,
    /// Bars including "Other" (`0` = default of 10).
    pub bar_top_n: usize,
    /// Object-name pie slices including "Other" (`0` = default of 10).
    pub pie_top_n: usize,
    /// Department slices above this share (percent) get a label.
    pub department_label_percent: u32,
    /// The first N department slices always get a label.
    pub department_label_count: usize,
    /// Upper bound on word cloud entries.
    pub word_cloud_max_words: usize,
    pub schedule: SchedulePolicy,
    /// Cool-down after an accepted department click, during which further clicks are dropped.
    pub click_cooldown_ms: u64,
    /// Pixel range covered by the timeline brush (left, right).
    pub brush_extent: (f64, f64),
    /// Length of the initial brush selection, counted back from the last year.
    pub default_brush_years: u32,
    pub execution: ExecutionOptions,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            line_top_n: DEFAULT_TOP_N,
            line_shift: 0,
            bar_top_n: DEFAULT_TOP_N,
            pie_top_n: DEFAULT_TOP_N,
            department_label_percent: DEFAULT_LABEL_PERCENT,
            department_label_count: DEFAULT_LABEL_COUNT,
            word_cloud_max_words: 100,
            schedule: SchedulePolicy::Immediate,
            click_cooldown_ms: 750,
            brush_extent: (20.0, 880.0),
            default_brush_years: 15,
            execution: ExecutionOptions::default(),
        }
    }
}

impl DashboardOptions {
    pub fn from_json_str(input: &str) -> DashboardResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> DashboardResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn click_cooldown(&self) -> Duration {
        Duration::from_millis(self.click_cooldown_ms)
    }

    pub fn label_thresholds(&self) -> LabelThresholds {
        LabelThresholds {
            min_percent: self.department_label_percent,
            top_count: self.department_label_count,
        }
    }

    /// Current value of a user-adjustable parameter.
    pub fn parameter(&self, parameter: ChartParameter) -> usize {
        match parameter {
            ChartParameter::LineTopN => self.line_top_n,
            ChartParameter::LineShift => self.line_shift,
            ChartParameter::BarTopN => self.bar_top_n,
            ChartParameter::PieTopN => self.pie_top_n,
            ChartParameter::DepartmentLabelPercent => self.department_label_percent as usize,
            ChartParameter::DepartmentLabelCount => self.department_label_count,
        }
    }

    /// Validate `raw` and store it. On error the current value is left untouched.
    pub fn set_parameter(&mut self, parameter: ChartParameter, raw: &str) -> DashboardResult<usize> {
        let value = parameter.parse(raw, self.parameter(parameter))?;
        match parameter {
            ChartParameter::LineTopN => self.line_top_n = value,
            ChartParameter::LineShift => self.line_shift = value,
            ChartParameter::BarTopN => self.bar_top_n = value,
            ChartParameter::PieTopN => self.pie_top_n = value,
            ChartParameter::DepartmentLabelPercent => {
                self.department_label_percent = u32::try_from(value).unwrap_or(u32::MAX)
            }
            ChartParameter::DepartmentLabelCount => self.department_label_count = value,
        }
        Ok(value)
    }
}

/// A user-adjustable chart parameter (number inputs next to the charts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartParameter {
    LineTopN,
    LineShift,
    BarTopN,
    PieTopN,
    DepartmentLabelPercent,
    DepartmentLabelCount,
}

impl ChartParameter {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LineTopN => "line_top_n",
            Self::LineShift => "line_shift",
            Self::BarTopN => "bar_top_n",
            Self::PieTopN => "pie_top_n",
            Self::DepartmentLabelPercent => "department_label_percent",
            Self::DepartmentLabelCount => "department_label_count",
        }
    }

    /// Parse raw input for this parameter.
    ///
    /// Input must be an integer. Negative values clamp to `0`, which the aggregations treat
    /// as "use the default". Anything else is rejected with
    /// [`DashboardError::InvalidParameter`] carrying `current`, the value that stays in force.
    pub fn parse(&self, raw: &str, current: usize) -> DashboardResult<usize> {
        let reject = |message: String| DashboardError::InvalidParameter {
            parameter: self.name().to_string(),
            raw: raw.to_string(),
            message,
            kept: current,
        };
        let n = raw
            .trim()
            .parse::<i64>()
            .map_err(|e| reject(e.to_string()))?;
        if n <= 0 {
            return Ok(0);
        }
        let n = usize::try_from(n).map_err(|e| reject(e.to_string()))?;
        if matches!(self, Self::DepartmentLabelPercent) && n > 100 {
            return Err(reject("percent must be between 0 and 100".to_string()));
        }
        Ok(n)
    }
}

impl fmt::Display for ChartParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
