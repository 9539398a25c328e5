//! The selection controller: turns interaction events into filtered views and pushes them
//! to the chart sinks.
//!
//! ## Flow
//!
//! 1. An inbound [`DashboardEvent`] replaces the [`FilterState`] with a new value.
//! 2. The controller schedules an update for the sinks the event affects:
//!    - brush: every sink, the department summary included;
//!    - department click / clear: every sink except the department summary, which only gets
//!      a [`ChartSinks::highlight_department`] call.
//! 3. The update is computed (year filter on the [`FilterEngine`], then the department
//!    filter) and delivered, immediately or when the host calls
//!    [`SelectionController::run_pending`], depending on [`SchedulePolicy`].
//!
//! Delivery is ordered by generation: an update computed against an older filter never
//! overwrites a newer one. The department summary always receives the year-filtered view.
//!
//! ```rust
//! use collection_explorer::config::DashboardOptions;
//! use collection_explorer::controller::SelectionController;
//! use collection_explorer::sinks::ChartViews;
//! use collection_explorer::store::RecordStore;
//! use collection_explorer::types::Record;
//!
//! # fn main() -> Result<(), collection_explorer::DashboardError> {
//! let store = RecordStore::new(vec![
//!     Record::new(2012, "Vase").with_department("Asian Art"),
//!     Record::new(2013, "Print").with_department("Drawings and Prints"),
//! ]);
//! let mut controller = SelectionController::new(store, DashboardOptions::default(), ChartViews::default())?;
//! controller.on_year_range(2010, 2015);
//! controller.on_department_click("Asian Art");
//!
//! assert_eq!(controller.selected_records().len(), 1);
//! assert_eq!(controller.sinks().department().total, 2);
//! # Ok(())
//! # }
//! ```

mod event;
mod scale;
mod scheduler;
mod state;

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::config::{ChartParameter, DashboardOptions, SchedulePolicy};
use crate::error::DashboardResult;
use crate::execution::{ExecutionMetrics, ExecutionObserver, FilterEngine};
use crate::processing::{in_department, in_year_range};
use crate::sinks::{ChartSinks, DepartmentPieParams, SinkKind, SinkSet};
use crate::store::RecordStore;
use crate::types::{Record, Year, YearRange};

pub use event::{DashboardEvent, EventOutcome};
pub use scale::TimeScale;
pub use scheduler::{PendingUpdate, UpdateScheduler};
pub use state::{FilterState, SelectionPhase};

/// The records selected by one filter snapshot.
#[derive(Debug, Clone)]
pub struct FilteredView {
    /// The filter this view was computed from.
    pub filter: FilterState,
    /// Records inside the time range, ignoring the department filter.
    pub year_filtered: Arc<[Record]>,
    /// Records inside the time range and matching the department filter.
    pub selected: Arc<[Record]>,
}

/// A computed update, ready to be delivered with [`SelectionController::notify`].
#[derive(Debug, Clone)]
pub struct ComputedUpdate {
    pub generation: u64,
    pub targets: SinkSet,
    pub view: FilteredView,
}

/// The sink that draws `parameter`.
pub fn parameter_sink(parameter: ChartParameter) -> SinkKind {
    match parameter {
        ChartParameter::LineTopN | ChartParameter::LineShift => SinkKind::Line,
        ChartParameter::BarTopN => SinkKind::Bar,
        ChartParameter::PieTopN => SinkKind::Pie,
        ChartParameter::DepartmentLabelPercent | ChartParameter::DepartmentLabelCount => {
            SinkKind::DepartmentPie
        }
    }
}

/// Owns the filter state and drives the chart sinks.
pub struct SelectionController<S: ChartSinks> {
    store: RecordStore,
    options: DashboardOptions,
    engine: FilterEngine,
    scale: TimeScale,
    filter: FilterState,
    scheduler: UpdateScheduler,
    last_view: Option<FilteredView>,
    last_targets: SinkSet,
    sinks: S,
}

impl<S: ChartSinks> SelectionController<S> {
    /// Build a controller over `store`.
    ///
    /// Fails only if the execution options are invalid (see [`FilterEngine::new`]).
    pub fn new(store: RecordStore, options: DashboardOptions, sinks: S) -> DashboardResult<Self> {
        let engine = FilterEngine::new(&options.execution)?;
        let scale = TimeScale::for_store(&store, options.brush_extent);
        Ok(Self {
            store,
            options,
            engine,
            scale,
            filter: FilterState::unset(),
            scheduler: UpdateScheduler::new(),
            last_view: None,
            last_targets: SinkSet::EMPTY,
            sinks,
        })
    }

    /// Attach an observer to the filter engine.
    pub fn with_execution_observer(mut self, observer: Arc<dyn ExecutionObserver>) -> Self {
        self.engine = self.engine.with_observer(observer);
        self
    }

    /// Apply the initial brush (the last `default_brush_years` of the collection).
    pub fn start(&mut self) -> EventOutcome {
        let selection = self.scale.default_selection(self.options.default_brush_years);
        self.on_brush_end(selection)
    }

    pub fn handle(&mut self, event: DashboardEvent) -> DashboardResult<EventOutcome> {
        self.handle_at(event, Instant::now())
    }

    /// Handle `event` as if it arrived at `now` (used by the department click debounce).
    pub fn handle_at(&mut self, event: DashboardEvent, now: Instant) -> DashboardResult<EventOutcome> {
        let outcome = match event {
            DashboardEvent::BrushEnded { selection } => self.on_brush_end(selection),
            DashboardEvent::YearRangeSelected { start, end } => self.on_year_range(start, end),
            DashboardEvent::DepartmentClicked { department } => self.on_department_click_at(&department, now),
            DashboardEvent::DepartmentFilterCleared => self.clear_department(),
            DashboardEvent::ParameterChanged { parameter, raw } => self.set_parameter(parameter, &raw)?,
            DashboardEvent::RefreshRequested { sink } => self.refresh(sink),
        };
        Ok(outcome)
    }

    /// Brush released at two timeline positions (any order).
    pub fn on_brush_end(&mut self, selection: [f64; 2]) -> EventOutcome {
        let [a, b] = selection;
        self.on_year_range(self.scale.invert(a), self.scale.invert(b))
    }

    /// Select the inclusive year range between `start` and `end` (any order) and refresh
    /// every sink.
    pub fn on_year_range(&mut self, start: Year, end: Year) -> EventOutcome {
        self.filter = self.filter.with_years(YearRange::new(start, end));
        self.schedule(SinkSet::ALL)
    }

    pub fn on_department_click(&mut self, department: &str) -> EventOutcome {
        self.on_department_click_at(department, Instant::now())
    }

    /// Toggle the department filter, unless the department chart is still animating its
    /// previous click.
    pub fn on_department_click_at(&mut self, department: &str, now: Instant) -> EventOutcome {
        if !self.sinks.accepts_department_click(now) {
            debug!(department, "department click dropped during transition");
            return EventOutcome::Ignored;
        }
        self.filter = self.filter.toggled_department(department);
        self.department_changed()
    }

    pub fn clear_department(&mut self) -> EventOutcome {
        if self.filter.department().is_none() {
            return EventOutcome::Ignored;
        }
        self.filter = self.filter.without_department();
        self.department_changed()
    }

    fn department_changed(&mut self) -> EventOutcome {
        match self.filter.phase() {
            SelectionPhase::Unselected => EventOutcome::StateUpdated,
            SelectionPhase::Selected => self.schedule(SinkSet::ALL.without(SinkKind::DepartmentPie)),
        }
    }

    /// Validate and apply a parameter, then re-render its sink from the last view.
    ///
    /// Rejected input leaves the previous value in force and touches no sink.
    pub fn set_parameter(&mut self, parameter: ChartParameter, raw: &str) -> DashboardResult<EventOutcome> {
        match self.options.set_parameter(parameter, raw) {
            Ok(value) => {
                debug!(%parameter, value, "parameter updated");
                Ok(self.refresh(parameter_sink(parameter)))
            }
            Err(err) => {
                warn!(%parameter, raw, error = %err, "parameter rejected");
                Err(err)
            }
        }
    }

    /// Re-render one sink from the last delivered view.
    pub fn refresh(&mut self, kind: SinkKind) -> EventOutcome {
        match &self.last_view {
            Some(view) => {
                Self::dispatch(&mut self.sinks, &self.options, kind, view);
                EventOutcome::Rerendered(kind)
            }
            None => EventOutcome::Ignored,
        }
    }

    fn schedule(&mut self, targets: SinkSet) -> EventOutcome {
        let generation = self.scheduler.schedule(self.filter.clone(), targets);
        debug!(generation, ?targets, "update scheduled");
        match self.options.schedule {
            SchedulePolicy::Immediate => {
                self.run_pending();
                EventOutcome::Notified { generation }
            }
            SchedulePolicy::Deferred => EventOutcome::Scheduled { generation },
        }
    }

    /// Compute and deliver the pending update, if any. Returns its generation.
    pub fn run_pending(&mut self) -> Option<u64> {
        let pending = self.scheduler.take()?;
        let computed = self.compute(&pending);
        let generation = computed.generation;
        self.notify(computed).then_some(generation)
    }

    /// Remove the pending update so the host can compute it elsewhere.
    pub fn take_pending(&mut self) -> Option<PendingUpdate> {
        self.scheduler.take()
    }

    pub fn has_pending(&self) -> bool {
        self.scheduler.has_pending()
    }

    /// Filter the store against `update.filter`. Reads nothing but the store.
    pub fn compute(&self, update: &PendingUpdate) -> ComputedUpdate {
        let records = self.store.records();
        let year_filtered: Arc<[Record]> = match update.filter.years() {
            Some(range) => self.engine.filter(records, |r| in_year_range(r, range)).into(),
            None => records.into(),
        };
        let selected: Arc<[Record]> = match update.filter.department() {
            Some(department) => year_filtered
                .iter()
                .filter(|r| in_department(r, Some(department)))
                .cloned()
                .collect(),
            None => Arc::clone(&year_filtered),
        };
        ComputedUpdate {
            generation: update.generation,
            targets: update.targets,
            view: FilteredView {
                filter: update.filter.clone(),
                year_filtered,
                selected,
            },
        }
    }

    /// Deliver a computed update. Returns `false` if it was stale.
    ///
    /// A stale update is not drawn. Sinks it targeted that the latest delivered update did
    /// not are re-rendered from the latest view instead, so no sink is left showing data
    /// from before the stale update's event.
    pub fn notify(&mut self, update: ComputedUpdate) -> bool {
        let ComputedUpdate {
            generation,
            targets,
            view,
        } = update;

        if !self.scheduler.mark_notified(generation) {
            let missing = targets.difference(self.last_targets);
            debug!(generation, ?missing, "stale update dropped");
            if let Some(latest) = &self.last_view {
                for kind in missing.iter() {
                    Self::dispatch(&mut self.sinks, &self.options, kind, latest);
                }
                self.last_targets = self.last_targets.union(missing);
            }
            return false;
        }

        debug!(
            generation,
            ?targets,
            year_filtered = view.year_filtered.len(),
            selected = view.selected.len(),
            "notifying sinks"
        );
        for kind in targets.iter() {
            Self::dispatch(&mut self.sinks, &self.options, kind, &view);
        }
        if !targets.contains(SinkKind::DepartmentPie) {
            self.sinks.highlight_department(view.filter.department());
        }
        self.last_view = Some(view);
        self.last_targets = targets;
        true
    }

    fn dispatch(sinks: &mut S, options: &DashboardOptions, kind: SinkKind, view: &FilteredView) {
        match kind {
            SinkKind::Line => sinks.update_line_chart(&view.selected, options.line_top_n, options.line_shift),
            SinkKind::Bar => sinks.update_bar_chart(&view.selected, options.bar_top_n),
            SinkKind::Pie => sinks.update_pie_chart(&view.selected, options.pie_top_n),
            SinkKind::WordCloud => sinks.update_word_cloud(&view.selected),
            SinkKind::DepartmentPie => sinks.update_department_pie(
                &view.year_filtered,
                DepartmentPieParams {
                    active: view.filter.department(),
                    thresholds: options.label_thresholds(),
                },
            ),
        }
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    pub fn phase(&self) -> SelectionPhase {
        self.filter.phase()
    }

    /// Records behind the last delivered view (time range and department).
    pub fn selected_records(&self) -> &[Record] {
        self.last_view.as_ref().map(|v| &*v.selected).unwrap_or(&[])
    }

    /// Records behind the last delivered view, ignoring the department filter.
    pub fn year_filtered_records(&self) -> &[Record] {
        self.last_view.as_ref().map(|v| &*v.year_filtered).unwrap_or(&[])
    }

    pub fn last_view(&self) -> Option<&FilteredView> {
        self.last_view.as_ref()
    }

    pub fn sinks(&self) -> &S {
        &self.sinks
    }

    pub fn sinks_mut(&mut self) -> &mut S {
        &mut self.sinks
    }

    pub fn options(&self) -> &DashboardOptions {
        &self.options
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn scale(&self) -> &TimeScale {
        &self.scale
    }

    pub fn execution_metrics(&self) -> Arc<ExecutionMetrics> {
        self.engine.metrics()
    }
}
