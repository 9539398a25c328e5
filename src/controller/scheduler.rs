use crate::sinks::SinkSet;

use super::state::FilterState;

/// A filter + notify step waiting to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpdate {
    /// Monotonic id; higher generations supersede lower ones at notify time.
    pub generation: u64,
    /// The filter snapshot to compute against.
    pub filter: FilterState,
    /// Sinks to notify.
    pub targets: SinkSet,
}

/// Orders recompute requests.
///
/// At most one update is pending. Scheduling while another is pending coalesces the two:
/// the newer filter wins and the target sets are merged, so a sink that only the older
/// request would have refreshed still gets refreshed. Notification is ordered by
/// generation; an update that finishes after a newer one has been delivered is stale.
#[derive(Debug, Default)]
pub struct UpdateScheduler {
    next_generation: u64,
    pending: Option<PendingUpdate>,
    last_notified: Option<u64>,
}

impl UpdateScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a recompute of `targets` against `filter`. Returns the new generation.
    pub fn schedule(&mut self, filter: FilterState, targets: SinkSet) -> u64 {
        let generation = self.next_generation;
        self.next_generation += 1;
        let targets = match self.pending.take() {
            Some(previous) => previous.targets.union(targets),
            None => targets,
        };
        self.pending = Some(PendingUpdate {
            generation,
            filter,
            targets,
        });
        generation
    }

    /// Remove and return the pending update, if any.
    pub fn take(&mut self) -> Option<PendingUpdate> {
        self.pending.take()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn last_notified(&self) -> Option<u64> {
        self.last_notified
    }

    /// Record that `generation` is about to be delivered. Returns `false` if a newer (or
    /// the same) generation was already delivered.
    pub fn mark_notified(&mut self, generation: u64) -> bool {
        if self.last_notified.is_some_and(|last| generation <= last) {
            return false;
        }
        self.last_notified = Some(generation);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::UpdateScheduler;
    use crate::controller::state::FilterState;
    use crate::sinks::{SinkKind, SinkSet};
    use crate::types::YearRange;

    #[test]
    fn pending_updates_coalesce() {
        let mut s = UpdateScheduler::new();
        let brush = FilterState::unset().with_years(YearRange::new(2010, 2015));
        let click = brush.toggled_department("Paintings");

        let g0 = s.schedule(brush, SinkSet::ALL);
        let g1 = s.schedule(click.clone(), SinkSet::ALL.without(SinkKind::DepartmentPie));
        assert!(g1 > g0);

        let pending = s.take().unwrap();
        assert_eq!(pending.generation, g1);
        assert_eq!(pending.filter, click);
        assert_eq!(pending.targets, SinkSet::ALL);
        assert!(!s.has_pending());
    }

    #[test]
    fn older_generations_are_stale() {
        let mut s = UpdateScheduler::new();
        let g0 = s.schedule(FilterState::unset(), SinkSet::ALL);
        let _ = s.take();
        let g1 = s.schedule(FilterState::unset(), SinkSet::ALL);
        let _ = s.take();

        assert!(s.mark_notified(g1));
        assert!(!s.mark_notified(g0));
        assert!(!s.mark_notified(g1));
        assert_eq!(s.last_notified(), Some(g1));
    }
}
