use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use collection_explorer::config::{ChartParameter, DashboardOptions, ExecutionOptions, SchedulePolicy};
use collection_explorer::controller::{DashboardEvent, EventOutcome, SelectionController, SelectionPhase};
use collection_explorer::execution::{ExecutionEvent, ExecutionObserver};
use collection_explorer::processing::SliceEmphasis;
use collection_explorer::sinks::{ChartViews, SinkKind};
use collection_explorer::store::RecordStore;
use collection_explorer::types::{Bucket, Record, YearRange};
use collection_explorer::DashboardError;

fn store() -> RecordStore {
    RecordStore::new(vec![
        Record::new(1965, "Coin").with_department("The American Wing"),
        Record::new(1970, "Coin").with_department("The American Wing"),
        Record::new(2009, "Print").with_department("Drawings and Prints"),
        Record::new(2010, "Painting").with_department("Paintings"),
        Record::new(2011, "Painting").with_department("Paintings"),
        Record::new(2012, "Vase").with_department("Asian Art"),
        Record::new(2013, "Vase").with_department("Asian Art"),
        Record::new(2014, "Helmet").with_department("Arms and Armor"),
        Record::new(2015, "Painting").with_department("Paintings"),
    ])
}

fn options(schedule: SchedulePolicy) -> DashboardOptions {
    DashboardOptions {
        schedule,
        click_cooldown_ms: 0,
        execution: ExecutionOptions {
            num_threads: Some(2),
            chunk_size: 4,
        },
        ..DashboardOptions::default()
    }
}

fn controller(schedule: SchedulePolicy) -> SelectionController<ChartViews> {
    let opts = options(schedule);
    let views = ChartViews::from_options(&opts);
    SelectionController::new(store(), opts, views).unwrap()
}

fn department_counts(c: &SelectionController<ChartViews>) -> Vec<(String, usize)> {
    c.sinks()
        .department()
        .slices
        .iter()
        .map(|s| (s.department.clone(), s.count))
        .collect()
}

#[test]
fn reversed_brush_selects_the_same_years() {
    let mut forward = controller(SchedulePolicy::Immediate);
    let mut reversed = controller(SchedulePolicy::Immediate);
    let (a, b) = (forward.scale().position(2010), forward.scale().position(2015));

    forward.handle(DashboardEvent::BrushEnded { selection: [a, b] }).unwrap();
    reversed.handle(DashboardEvent::BrushEnded { selection: [b, a] }).unwrap();

    assert_eq!(forward.filter_state().years(), Some(YearRange::new(2010, 2015)));
    assert_eq!(forward.filter_state(), reversed.filter_state());
    assert_eq!(forward.sinks().bar(), reversed.sinks().bar());
}

#[test]
fn start_applies_the_default_brush() {
    let mut c = controller(SchedulePolicy::Immediate);
    assert_eq!(c.phase(), SelectionPhase::Unselected);

    assert!(matches!(c.start(), EventOutcome::Notified { .. }));
    assert_eq!(c.phase(), SelectionPhase::Selected);
    assert_eq!(c.filter_state().years(), Some(YearRange::new(2000, 2015)));
    assert_eq!(c.selected_records().len(), 7);
}

#[test]
fn department_click_round_trip_keeps_the_summary_data() {
    let mut c = controller(SchedulePolicy::Immediate);
    c.on_year_range(2010, 2015);

    let bar_before = c.sinks().bar().to_vec();
    let line_before = c.sinks().line().to_vec();
    let summary_before = c.sinks().department().clone();
    assert_eq!(summary_before.total, 6);

    c.handle(DashboardEvent::DepartmentClicked {
        department: "Paintings".to_string(),
    })
    .unwrap();
    assert_eq!(c.filter_state().department(), Some("Paintings"));
    assert_eq!(c.sinks().bar(), &[Bucket::new("Painting", 3), Bucket::new("Other", 0)]);
    assert_eq!(department_counts(&c), vec![
        ("Paintings".to_string(), 3),
        ("Asian Art".to_string(), 2),
        ("Arms and Armor".to_string(), 1),
    ]);
    assert_eq!(c.sinks().department().slices[0].emphasis, SliceEmphasis::Active);
    assert_eq!(c.sinks().department().slices[1].emphasis, SliceEmphasis::Dimmed);

    c.handle(DashboardEvent::DepartmentClicked {
        department: "Paintings".to_string(),
    })
    .unwrap();
    assert_eq!(c.filter_state().department(), None);
    assert_eq!(c.sinks().bar(), bar_before.as_slice());
    assert_eq!(c.sinks().line(), line_before.as_slice());
    assert_eq!(c.sinks().department(), &summary_before);
}

#[test]
fn brush_keeps_the_department_filter() {
    let mut c = controller(SchedulePolicy::Immediate);
    c.on_year_range(2010, 2015);
    c.on_department_click("Paintings");

    c.on_year_range(2010, 2011);
    assert_eq!(c.selected_records().len(), 2);
    assert_eq!(c.sinks().department().total, 2);
    assert_eq!(c.sinks().department().slices[0].emphasis, SliceEmphasis::Active);
}

#[test]
fn clear_event_restores_year_only_views() {
    let mut c = controller(SchedulePolicy::Immediate);
    c.on_year_range(2010, 2015);
    c.on_department_click("Asian Art");
    assert_eq!(c.selected_records().len(), 2);

    let outcome = c.handle(DashboardEvent::DepartmentFilterCleared).unwrap();
    assert!(matches!(outcome, EventOutcome::Notified { .. }));
    assert_eq!(c.selected_records().len(), 6);
    assert!(c
        .sinks()
        .department()
        .slices
        .iter()
        .all(|s| s.emphasis == SliceEmphasis::Neutral));
}

#[test]
fn empty_selection_renders_empty_views() {
    let mut c = controller(SchedulePolicy::Immediate);
    c.on_year_range(1800, 1850);

    assert!(c.selected_records().is_empty());
    assert!(c.sinks().bar().is_empty());
    assert!(c.sinks().pie().is_empty());
    assert!(c.sinks().line().is_empty());
    assert!(c.sinks().word_cloud().is_empty());
    assert!(c.sinks().department().is_empty());
}

#[test]
fn empty_store_is_a_valid_degenerate_state() {
    let opts = options(SchedulePolicy::Immediate);
    let mut c = SelectionController::new(RecordStore::default(), opts, ChartViews::default()).unwrap();

    assert!(matches!(c.start(), EventOutcome::Notified { .. }));
    assert!(c.sinks().bar().is_empty());
    assert!(c.sinks().department().is_empty());
    assert_eq!(c.on_department_click("Paintings"), EventOutcome::Notified { generation: 1 });
    assert!(c.sinks().word_cloud().is_empty());
}

#[test]
fn start_survives_years_at_the_edge_of_the_integer_range() {
    let store = RecordStore::new(vec![Record::new(2000, "Vase"), Record::new(i32::MAX, "Coin")]);
    let opts = options(SchedulePolicy::Immediate);
    let mut c = SelectionController::new(store, opts, ChartViews::default()).unwrap();

    assert!(matches!(c.start(), EventOutcome::Notified { .. }));
    assert_eq!(c.filter_state().years().map(|r| r.max()), Some(i32::MAX));
    assert_eq!(c.sinks().bar(), &[Bucket::new("Coin", 1), Bucket::new("Other", 0)]);
}

#[test]
fn deferred_events_coalesce_into_one_notification() {
    let mut c = controller(SchedulePolicy::Deferred);
    let first = c.on_year_range(2010, 2015);
    let second = c.on_department_click("Paintings");
    assert!(matches!(first, EventOutcome::Scheduled { .. }));
    assert!(matches!(second, EventOutcome::Scheduled { .. }));
    assert!(c.sinks().bar().is_empty());

    // The click alone would skip the department chart; the coalesced brush still feeds it.
    assert_eq!(c.run_pending(), Some(1));
    assert!(!c.has_pending());
    assert_eq!(c.selected_records().len(), 3);
    assert_eq!(c.sinks().department().total, 6);
}

#[test]
fn stale_update_never_overwrites_a_newer_one() {
    let mut c = controller(SchedulePolicy::Deferred);
    c.on_year_range(1960, 2015);
    c.run_pending();
    assert_eq!(c.sinks().department().total, 9);

    // A slow brush computation...
    c.on_year_range(2010, 2015);
    let slow = c.take_pending().unwrap();
    let slow = c.compute(&slow);

    // ...overtaken by a click that is computed and delivered first.
    c.on_department_click("Paintings");
    let fast = c.take_pending().unwrap();
    assert_eq!(fast.targets, collection_explorer::sinks::SinkSet::ALL.without(SinkKind::DepartmentPie));
    let fast = c.compute(&fast);
    assert!(c.notify(fast));

    assert!(!c.notify(slow));
    assert_eq!(c.filter_state().department(), Some("Paintings"));
    assert_eq!(c.selected_records().len(), 3);
    assert_eq!(c.sinks().bar(), &[Bucket::new("Painting", 3), Bucket::new("Other", 0)]);
    // The department chart gets the newest year range, not the stale one.
    assert_eq!(c.sinks().department().total, 6);
    assert_eq!(c.sinks().department().slices[0].emphasis, SliceEmphasis::Active);
}

#[test]
fn invalid_parameter_is_reverted_and_not_propagated() {
    let mut c = controller(SchedulePolicy::Immediate);
    c.on_year_range(2010, 2015);
    let pie_before = c.sinks().pie().to_vec();

    let err = c
        .handle(DashboardEvent::ParameterChanged {
            parameter: ChartParameter::PieTopN,
            raw: "a few".to_string(),
        })
        .unwrap_err();
    match err {
        DashboardError::InvalidParameter { parameter, kept, .. } => {
            assert_eq!(parameter, "pie_top_n");
            assert_eq!(kept, 10);
        }
        other => panic!("expected InvalidParameter, got {other:?}"),
    }
    assert_eq!(c.options().pie_top_n, 10);
    assert_eq!(c.sinks().pie(), pie_before.as_slice());
}

#[test]
fn parameter_change_rerenders_from_the_last_view() {
    let mut c = controller(SchedulePolicy::Immediate);
    c.on_year_range(2010, 2015);

    let outcome = c
        .handle(DashboardEvent::ParameterChanged {
            parameter: ChartParameter::PieTopN,
            raw: "2".to_string(),
        })
        .unwrap();
    assert_eq!(outcome, EventOutcome::Rerendered(SinkKind::Pie));
    assert_eq!(c.sinks().pie(), &[Bucket::new("Painting", 3), Bucket::new("Other", 3)]);

    // Non-positive input falls back to the default.
    c.set_parameter(ChartParameter::PieTopN, "-4").unwrap();
    assert_eq!(c.sinks().pie().len(), 4);

    c.set_parameter(ChartParameter::LineShift, "1").unwrap();
    let categories: Vec<&str> = c.sinks().line().iter().map(|s| s.category.as_str()).collect();
    assert_eq!(categories, vec!["Vase", "Helmet"]);
}

#[test]
fn department_clicks_are_debounced() {
    let opts = DashboardOptions {
        click_cooldown_ms: 500,
        ..options(SchedulePolicy::Immediate)
    };
    let views = ChartViews::from_options(&opts);
    let mut c = SelectionController::new(store(), opts, views).unwrap();
    c.on_year_range(2010, 2015);

    let t0 = Instant::now();
    let click = || DashboardEvent::DepartmentClicked {
        department: "Asian Art".to_string(),
    };
    assert!(matches!(c.handle_at(click(), t0).unwrap(), EventOutcome::Notified { .. }));
    assert_eq!(
        c.handle_at(click(), t0 + Duration::from_millis(200)).unwrap(),
        EventOutcome::Ignored
    );
    assert_eq!(c.filter_state().department(), Some("Asian Art"));

    assert!(matches!(
        c.handle_at(click(), t0 + Duration::from_millis(600)).unwrap(),
        EventOutcome::Notified { .. }
    ));
    assert_eq!(c.filter_state().department(), None);
}

#[test]
fn refresh_rerenders_one_sink() {
    let mut c = controller(SchedulePolicy::Immediate);
    assert_eq!(
        c.handle(DashboardEvent::RefreshRequested { sink: SinkKind::WordCloud }).unwrap(),
        EventOutcome::Ignored
    );

    c.on_year_range(2010, 2015);
    assert_eq!(
        c.handle(DashboardEvent::RefreshRequested { sink: SinkKind::WordCloud }).unwrap(),
        EventOutcome::Rerendered(SinkKind::WordCloud)
    );
    assert_eq!(c.sinks().word_cloud()[0].text, "Painting");
}

#[derive(Default)]
struct CountingObserver {
    chunks: AtomicUsize,
}

impl ExecutionObserver for CountingObserver {
    fn on_event(&self, event: &ExecutionEvent) {
        if matches!(event, ExecutionEvent::ChunkFinished { .. }) {
            self.chunks.fetch_add(1, Ordering::Relaxed);
        }
    }
}

#[test]
fn year_filter_runs_in_chunks() {
    let obs = Arc::new(CountingObserver::default());
    let mut c = controller(SchedulePolicy::Immediate).with_execution_observer(obs.clone());
    c.on_year_range(2010, 2015);

    // 9 records in chunks of 4.
    assert_eq!(obs.chunks.load(Ordering::Relaxed), 3);
    let snapshot = c.execution_metrics().snapshot();
    assert_eq!(snapshot.rows_processed, 9);
    assert_eq!(snapshot.rows_matched, 6);
}

#[test]
fn events_deserialize_from_json() {
    let event: DashboardEvent =
        serde_json::from_str(r#"{ "type": "department_clicked", "department": "Paintings" }"#).unwrap();
    assert_eq!(
        event,
        DashboardEvent::DepartmentClicked {
            department: "Paintings".to_string()
        }
    );
}
