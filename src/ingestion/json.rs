//! JSON loading.
//!
//! Supported inputs:
//! - Records as a JSON array of objects keyed by the CSV column names
//!   (`[{"AccessionYear": 1979, "Object Name": "Vase"}, ...]`) or as NDJSON.
//! - Preprocessed country counts as one object (`{"France": 120, "Japan": 80}`).

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{DashboardError, DashboardResult};
use crate::processing::CountryCounts;
use crate::types::Record;

use super::csv::columns;
use super::{parse_bool_like, parse_year, DropReason, LoadedRecords};

/// Load records from a JSON file.
pub fn load_records_from_path(path: impl AsRef<Path>) -> DashboardResult<LoadedRecords> {
    let text = fs::read_to_string(path)?;
    load_records_from_str(&text)
}

/// Load records from an in-memory JSON string.
///
/// Objects missing a usable `AccessionYear` or `Object Name`, and rows that are not objects
/// at all, are dropped and counted per reason. A top-level value that is neither an object
/// nor an array is an error.
pub fn load_records_from_str(input: &str) -> DashboardResult<LoadedRecords> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(LoadedRecords::default());
    }

    let values = match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Array(items)) => items,
        Ok(v @ Value::Object(_)) => vec![v],
        Ok(_) => {
            return Err(DashboardError::SchemaMismatch {
                message: "json must be an object, an array of objects, or NDJSON".to_string(),
            });
        }
        Err(_) => parse_ndjson(trimmed)?,
    };

    let mut loaded = LoadedRecords::default();
    for v in &values {
        let row = match v.as_object() {
            Some(obj) => record_from_object(obj),
            None => Err(DropReason::NotAnObject),
        };
        loaded.push(row);
    }
    Ok(loaded)
}

fn parse_ndjson(input: &str) -> DashboardResult<Vec<Value>> {
    let mut values = Vec::new();
    for (i, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let v = serde_json::from_str::<Value>(line).map_err(|e| DashboardError::SchemaMismatch {
            message: format!("invalid ndjson at line {}: {}", i + 1, e),
        })?;
        values.push(v);
    }
    Ok(values)
}

fn text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_owned())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn record_from_object(obj: &Map<String, Value>) -> Result<Record, DropReason> {
    let year = match obj.get(columns::ACCESSION_YEAR) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .and_then(|y| i32::try_from(y).ok()),
        Some(Value::String(s)) => parse_year(s),
        _ => None,
    }
    .ok_or(DropReason::MissingYear)?;

    Ok(Record {
        accession_year: year,
        object_name: text(obj, columns::OBJECT_NAME).ok_or(DropReason::MissingObjectName)?,
        object_id: text(obj, columns::OBJECT_ID).unwrap_or_default(),
        title: text(obj, columns::TITLE),
        department: text(obj, columns::DEPARTMENT),
        is_highlight: match obj.get(columns::IS_HIGHLIGHT) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => parse_bool_like(s).unwrap_or(false),
            Some(Value::Number(n)) => n.as_i64() == Some(1),
            _ => false,
        },
        country: text(obj, columns::COUNTRY),
    })
}

/// Load a preprocessed `{country: count}` map.
pub fn load_country_counts_from_path(path: impl AsRef<Path>) -> DashboardResult<CountryCounts> {
    let text = fs::read_to_string(path)?;
    load_country_counts_from_str(&text)
}

pub fn load_country_counts_from_str(input: &str) -> DashboardResult<CountryCounts> {
    let map: Map<String, Value> = serde_json::from_str(input)?;
    let mut pairs = Vec::with_capacity(map.len());
    for (country, v) in map {
        let count = v
            .as_u64()
            .or_else(|| v.as_str().and_then(|s| s.trim().parse::<u64>().ok()))
            .ok_or_else(|| DashboardError::SchemaMismatch {
                message: format!("count for '{country}' is not a non-negative integer: {v}"),
            })?;
        pairs.push((country, usize::try_from(count).unwrap_or(usize::MAX)));
    }
    Ok(CountryCounts::from_pairs(pairs))
}

#[cfg(test)]
mod tests {
    use super::{load_country_counts_from_str, load_records_from_str};
    use crate::error::DashboardError;

    #[test]
    fn array_of_objects_with_drops() {
        let input = r#"[
            {"AccessionYear": 1979, "Object Name": "Vase", "Object ID": 12, "Department": "Asian Art", "Is Highlight": "True"},
            {"AccessionYear": "2001.0", "Object Name": "Coin"},
            {"AccessionYear": null, "Object Name": "Print"},
            {"AccessionYear": 1990, "Object Name": ""}
        ]"#;
        let loaded = load_records_from_str(input).unwrap();
        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.dropped(), 2);
        assert_eq!(loaded.drops.missing_year, 1);
        assert_eq!(loaded.drops.missing_object_name, 1);
        assert_eq!(loaded.records[0].object_id, "12");
        assert!(loaded.records[0].is_highlight);
        assert_eq!(loaded.records[0].department.as_deref(), Some("Asian Art"));
        assert_eq!(loaded.records[1].accession_year, 2001);
    }

    #[test]
    fn ndjson_is_accepted() {
        let input = "{\"AccessionYear\": 1900, \"Object Name\": \"Bowl\"}\n\n{\"AccessionYear\": 1901, \"Object Name\": \"Cup\"}\n";
        let loaded = load_records_from_str(input).unwrap();
        assert_eq!(loaded.records.len(), 2);
    }

    #[test]
    fn non_object_rows_are_dropped() {
        let loaded = load_records_from_str(r#"[1, {"AccessionYear": 1990, "Object Name": "Vase"}, "x"]"#).unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.drops.not_an_object, 2);
    }

    #[test]
    fn scalar_document_is_an_error() {
        let err = load_records_from_str("42").unwrap_err();
        assert!(matches!(err, DashboardError::SchemaMismatch { .. }));
    }

    #[test]
    fn country_counts_map() {
        let counts = load_country_counts_from_str(r#"{"Japan": 5, "France": "12", "Peru": 1}"#).unwrap();
        assert_eq!(counts.get("France"), 12);
        assert_eq!(counts.max_count(), 12);
        assert_eq!(counts.ranked()[1].key, "Japan");

        assert!(load_country_counts_from_str(r#"{"Japan": -1}"#).is_err());
    }
}
