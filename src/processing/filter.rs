//! Record predicates for the active selection.

use crate::types::{Record, YearRange};

/// Returns `true` if the record's accession year lies inside `range`.
pub fn in_year_range(record: &Record, range: YearRange) -> bool {
    range.contains(record.accession_year)
}

/// Returns `true` if the record matches the department restriction.
///
/// `None` means "no restriction": every record matches, including records without a
/// department.
pub fn in_department(record: &Record, department: Option<&str>) -> bool {
    match department {
        None => true,
        Some(d) => record.department.as_deref() == Some(d),
    }
}

/// Records inside `range`, in their original order.
pub fn filter_by_years(records: &[Record], range: YearRange) -> Vec<Record> {
    records
        .iter()
        .filter(|r| in_year_range(r, range))
        .cloned()
        .collect()
}

/// Records matching `department`, in their original order.
pub fn filter_by_department(records: &[Record], department: Option<&str>) -> Vec<Record> {
    records
        .iter()
        .filter(|r| in_department(r, department))
        .cloned()
        .collect()
}
