use serde::{Deserialize, Serialize};

use crate::config::ChartParameter;
use crate::sinks::SinkKind;
use crate::types::Year;

/// Inbound interaction events, independent of any UI toolkit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardEvent {
    /// The timeline brush was released. Endpoints are timeline positions in either order.
    BrushEnded { selection: [f64; 2] },
    /// A year range chosen directly, bypassing the time scale.
    YearRangeSelected { start: Year, end: Year },
    /// A slice of the department summary chart was clicked.
    DepartmentClicked { department: String },
    /// The "clear filter" button.
    DepartmentFilterCleared,
    /// A number input next to a chart changed.
    ParameterChanged { parameter: ChartParameter, raw: String },
    /// A chart's refresh button.
    RefreshRequested { sink: SinkKind },
}

/// What handling an event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Dropped (debounced click, or nothing to re-render yet).
    Ignored,
    /// Filter state changed but no sink was notified (no time range selected yet).
    StateUpdated,
    /// A recompute is queued; call `run_pending` to deliver it.
    Scheduled { generation: u64 },
    /// Sinks were notified.
    Notified { generation: u64 },
    /// One sink was re-rendered from the last filtered view.
    Rerendered(SinkKind),
}
