use collection_explorer::ingestion::csv::{
    load_heatmap_cells_from_path, load_records_from_path, load_records_from_reader,
};
use collection_explorer::processing::{country_counts, filter_cells, HeatmapLayout, HeatmapSelection};
use collection_explorer::types::Record;
use collection_explorer::DashboardError;

#[test]
fn load_records_from_path_drops_incomplete_rows() {
    let loaded = load_records_from_path("tests/fixtures/met_objects.csv").unwrap();

    assert_eq!(loaded.records.len(), 8);
    assert_eq!(loaded.dropped(), 2);
    assert_eq!(loaded.drops.missing_year, 1);
    assert_eq!(loaded.drops.missing_object_name, 1);
    assert_eq!(
        loaded.records[0],
        Record::new(1979, "Coin")
            .with_object_id("1")
            .with_title("One-dollar Liberty Head Coin")
            .with_department("The American Wing")
    );
    // "2010.0" is coerced like a lenient integer parse.
    assert_eq!(loaded.records[3].accession_year, 2010);
    assert!(loaded.records[4].is_highlight);
}

#[test]
fn load_records_allows_reordered_and_missing_optional_columns() {
    let input = "Object Name,AccessionYear\nVase,1999\nCoin,not a year\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let loaded = load_records_from_reader(&mut rdr).unwrap();
    assert_eq!(loaded.records, vec![Record::new(1999, "Vase")]);
    assert_eq!(loaded.dropped(), 1);
    assert_eq!(loaded.records[0].department, None);
}

#[test]
fn load_records_errors_on_missing_required_column() {
    let input = "Object Name,Department\nVase,Asian Art\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let err = load_records_from_reader(&mut rdr).unwrap_err();
    match err {
        DashboardError::SchemaMismatch { message } => assert!(message.contains("AccessionYear")),
        other => panic!("expected SchemaMismatch, got {other:?}"),
    }
}

#[test]
fn invalid_utf8_row_is_dropped_not_fatal() {
    let input: &[u8] = b"AccessionYear,Object Name,Title\n1990,Vase,ok\n1991,Coin,caf\xE9\n1992,Bowl,fine\n";
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(input);

    let loaded = load_records_from_reader(&mut rdr).unwrap();
    let names: Vec<&str> = loaded.records.iter().map(|r| r.object_name.as_str()).collect();
    assert_eq!(names, vec!["Vase", "Bowl"]);
    assert_eq!(loaded.dropped(), 1);
    assert_eq!(loaded.drops.invalid_encoding, 1);
}

#[test]
fn header_only_file_is_an_empty_dataset() {
    let input = "AccessionYear,Object Name\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let loaded = load_records_from_reader(&mut rdr).unwrap();
    assert!(loaded.records.is_empty());
    assert_eq!(loaded.dropped(), 0);
}

#[test]
fn countries_are_normalized_and_ranked() {
    let loaded = load_records_from_path("tests/fixtures/met_objects.csv").unwrap();
    let counts = country_counts(&loaded.records);

    assert_eq!(counts.ranked()[0].key, "China");
    assert_eq!(counts.max_count(), 2);
    assert_eq!(counts.get("United States of America"), 1);
    assert_eq!(counts.get("Atlantis"), 0);
}

#[test]
fn heatmap_cells_load_and_filter() {
    let cells = load_heatmap_cells_from_path("tests/fixtures/heatmap_cells.csv").unwrap();
    assert_eq!(cells.len(), 4);

    let layout = HeatmapLayout::for_cells(&cells);
    assert_eq!(layout.centuries, vec!["18th century", "19th century", "20th century"]);
    assert_eq!(layout.nationalities, vec!["French", "American", "Japanese"]);

    let selection = HeatmapSelection {
        centuries: vec!["19th century".to_string()],
        nationalities: vec!["all".to_string()],
    };
    let filtered = filter_cells(&cells, &selection);
    assert_eq!(filtered.len(), 2);
    assert!(filtered.iter().all(|c| c.century == "19th century"));
}
