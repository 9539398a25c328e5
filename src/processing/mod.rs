//! Pure, in-memory aggregation and filtering over loaded records.
//!
//! Nothing in this module fails: empty input yields an empty result, so chart sinks only
//! ever need to check "is the view empty".
//!
//! Currently implemented:
//!
//! - [`filter`]: year-range and department predicates
//! - [`aggregate`]: [`group_count()`], [`ranked_counts()`], [`top_n_with_other()`]
//! - [`series`]: [`cumulative_series_by_category()`]
//! - [`department`]: department distribution with label/emphasis decisions
//! - [`heatmap`]: nationality × century cell filtering and layout
//! - [`geo`]: country normalization and per-country counts
//!
//! ## Example: brush → top-N
//!
//! ```rust
//! use collection_explorer::processing::{filter_by_years, top_n_with_other};
//! use collection_explorer::types::{Bucket, Record, YearRange};
//!
//! let records = vec![
//!     Record::new(2000, "Vase"),
//!     Record::new(2000, "Vase"),
//!     Record::new(2001, "Coin"),
//!     Record::new(1950, "Sword"),
//! ];
//!
//! let selected = filter_by_years(&records, YearRange::new(2001, 2000));
//! let view = top_n_with_other(&selected, Record::object_name_key, 2);
//! assert_eq!(view, vec![Bucket::new("Vase", 2), Bucket::new("Other", 1)]);
//! ```

pub mod aggregate;
pub mod department;
pub mod filter;
pub mod geo;
pub mod heatmap;
pub mod series;

pub use aggregate::{
    group_count, ranked_counts, resolve_top_n, top_n_with_other, total_count, DEFAULT_TOP_N, OTHER_KEY,
};
pub use department::{summarize_departments, DepartmentSlice, DepartmentSummary, LabelThresholds, SliceEmphasis};
pub use filter::{filter_by_department, filter_by_years, in_department, in_year_range};
pub use geo::{country_counts, normalize_country, CountryCounts};
pub use heatmap::{filter_cells, HeatmapCell, HeatmapLayout, HeatmapSelection};
pub use series::{cumulative_series_by_category, year_extent};
