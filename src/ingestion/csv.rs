//! CSV loading for collection records and preprocessed heatmap cells.

use std::path::Path;

use crate::error::{DashboardError, DashboardResult};
use crate::processing::HeatmapCell;
use crate::types::Record;

use super::{parse_bool_like, parse_year, DropReason, LoadedRecords};

/// Column names recognized in the collection CSV.
pub mod columns {
    pub const ACCESSION_YEAR: &str = "AccessionYear";
    pub const OBJECT_NAME: &str = "Object Name";
    pub const OBJECT_ID: &str = "Object ID";
    pub const TITLE: &str = "Title";
    pub const IS_HIGHLIGHT: &str = "Is Highlight";
    pub const DEPARTMENT: &str = "Department";
    pub const COUNTRY: &str = "Country";
}

/// Load collection records from a CSV file.
///
/// Rules:
///
/// - The CSV must have headers containing `AccessionYear` and `Object Name` (order and extra
///   columns don't matter). `Object ID`, `Title`, `Is Highlight`, `Department` and `Country`
///   are picked up when present.
/// - A row whose accession year is not integer-coercible, whose object name is empty, or
///   that is not valid UTF-8 is dropped and counted in [`LoadedRecords::drops`].
pub fn load_records_from_path(path: impl AsRef<Path>) -> DashboardResult<LoadedRecords> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    load_records_from_reader(&mut rdr)
}

struct ColumnMap {
    year: usize,
    name: usize,
    id: Option<usize>,
    title: Option<usize>,
    highlight: Option<usize>,
    department: Option<usize>,
    country: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> DashboardResult<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let required = |name: &str| {
            find(name).ok_or_else(|| DashboardError::SchemaMismatch {
                message: format!(
                    "missing required column '{name}'. headers={:?}",
                    headers.iter().collect::<Vec<_>>()
                ),
            })
        };

        Ok(Self {
            year: required(columns::ACCESSION_YEAR)?,
            name: required(columns::OBJECT_NAME)?,
            id: find(columns::OBJECT_ID),
            title: find(columns::TITLE),
            highlight: find(columns::IS_HIGHLIGHT),
            department: find(columns::DEPARTMENT),
            country: find(columns::COUNTRY),
        })
    }

    fn record(&self, row: &csv::StringRecord) -> Result<Record, DropReason> {
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .map(str::trim)
                .filter(|s| !s.is_empty())
        };

        let year = row
            .get(self.year)
            .and_then(parse_year)
            .ok_or(DropReason::MissingYear)?;
        let name = cell(Some(self.name)).ok_or(DropReason::MissingObjectName)?;

        Ok(Record {
            accession_year: year,
            object_name: name.to_owned(),
            object_id: cell(self.id).unwrap_or_default().to_owned(),
            title: cell(self.title).map(str::to_owned),
            department: cell(self.department).map(str::to_owned),
            is_highlight: cell(self.highlight).and_then(parse_bool_like).unwrap_or(false),
            country: cell(self.country).map(str::to_owned),
        })
    }
}

/// Load collection records from an existing CSV reader.
pub fn load_records_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> DashboardResult<LoadedRecords> {
    let headers = rdr.headers()?.clone();
    let map = ColumnMap::from_headers(&headers)?;

    let mut loaded = LoadedRecords::default();
    for result in rdr.byte_records() {
        // Rows are decoded one at a time so a bad byte only costs its own row.
        let row = match csv::StringRecord::from_byte_record(result?) {
            Ok(row) => map.record(&row),
            Err(_) => Err(DropReason::InvalidEncoding),
        };
        loaded.push(row);
    }
    Ok(loaded)
}

/// Load preprocessed heatmap cells (`Artist_Nationality,century_label,count,percent`).
///
/// Unlike record loading, a malformed cell is an error: the file is generated, not raw data.
pub fn load_heatmap_cells_from_path(path: impl AsRef<Path>) -> DashboardResult<Vec<HeatmapCell>> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;
    load_heatmap_cells_from_reader(&mut rdr)
}

pub fn load_heatmap_cells_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> DashboardResult<Vec<HeatmapCell>> {
    let mut cells = Vec::new();
    for result in rdr.deserialize() {
        cells.push(result?);
    }
    Ok(cells)
}
