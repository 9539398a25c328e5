//! Core data model types.
//!
//! A [`Record`] is one collection object that survived load-time validation. Everything else
//! in this module is derived from records and replaced wholesale whenever the selection
//! changes.

use serde::{Deserialize, Serialize};

/// Calendar year as stored in the `AccessionYear` column.
pub type Year = i32;

/// One collection object.
///
/// Records are immutable once loaded. A row without an accession year or an object name
/// never becomes a `Record`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Year the object entered the collection.
    pub accession_year: Year,
    /// Object category name (e.g. `"Vase"`); the main grouping key.
    pub object_name: String,
    /// Source identifier.
    pub object_id: String,
    pub title: Option<String>,
    pub department: Option<String>,
    pub is_highlight: bool,
    /// Country of origin as written in the source, not normalized.
    pub country: Option<String>,
}

impl Record {
    /// Create a record with the two required fields; everything else is empty.
    pub fn new(accession_year: Year, object_name: impl Into<String>) -> Self {
        Self {
            accession_year,
            object_name: object_name.into(),
            object_id: String::new(),
            title: None,
            department: None,
            is_highlight: false,
            country: None,
        }
    }

    pub fn with_object_id(mut self, object_id: impl Into<String>) -> Self {
        self.object_id = object_id.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn with_highlight(mut self, is_highlight: bool) -> Self {
        self.is_highlight = is_highlight;
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Key accessor for grouping by object name. A blank name has no key.
    pub fn object_name_key(&self) -> Option<&str> {
        let name = self.object_name.trim();
        (!name.is_empty()).then_some(name)
    }

    /// Key accessor for grouping by department (records without one are skipped).
    pub fn department_key(&self) -> Option<&str> {
        self.department.as_deref()
    }
}

/// Inclusive range of years, always ordered (`min <= max`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearRange {
    min: Year,
    max: Year,
}

impl YearRange {
    /// Build a range from two endpoints given in any order.
    pub fn new(a: Year, b: Year) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn min(&self) -> Year {
        self.min
    }

    pub fn max(&self) -> Year {
        self.max
    }

    pub fn contains(&self, year: Year) -> bool {
        self.min <= year && year <= self.max
    }

    /// Number of calendar years covered (always at least 1). Widened so the full `i32`
    /// range does not overflow.
    pub fn span(&self) -> u64 {
        u64::from(self.max.abs_diff(self.min)) + 1
    }
}

/// One group of a count aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub key: String,
    pub count: usize,
}

impl Bucket {
    pub fn new(key: impl Into<String>, count: usize) -> Self {
        Self {
            key: key.into(),
            count,
        }
    }
}

/// One point of a cumulative series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub year: Year,
    pub cumulative: usize,
}

impl SeriesPoint {
    pub fn new(year: Year, cumulative: usize) -> Self {
        Self { year, cumulative }
    }
}

/// Running total over time for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySeries {
    pub category: String,
    /// Points ordered by year.
    pub points: Vec<SeriesPoint>,
}

impl CategorySeries {
    /// The last cumulative value, i.e. the category total inside the input.
    pub fn total(&self) -> usize {
        self.points.last().map(|p| p.cumulative).unwrap_or(0)
    }
}
