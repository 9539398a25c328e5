use std::time::{Duration, Instant};

/// Per-sink "transition in flight" flag with a timer-based reset.
///
/// A sink that animates in response to its own clicks activates the guard when it accepts
/// a click. Until the cool-down has elapsed further activations are refused; refused
/// activations are dropped, not queued.
#[derive(Debug, Clone)]
pub struct TransitionGuard {
    cooldown: Duration,
    busy_until: Option<Instant>,
}

impl TransitionGuard {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            busy_until: None,
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// `true` while a transition started before `now` is still running.
    pub fn is_active(&self, now: Instant) -> bool {
        self.busy_until.is_some_and(|until| now < until)
    }

    /// Start a transition at `now` unless one is in flight. Returns whether it started.
    pub fn try_begin(&mut self, now: Instant) -> bool {
        if self.is_active(now) {
            return false;
        }
        self.busy_until = Some(now + self.cooldown);
        true
    }

    /// Clear the flag, e.g. when the transition reports completion early.
    pub fn reset(&mut self) {
        self.busy_until = None;
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::TransitionGuard;

    #[test]
    fn clicks_during_cooldown_are_dropped() {
        let t0 = Instant::now();
        let mut guard = TransitionGuard::new(Duration::from_millis(500));

        assert!(guard.try_begin(t0));
        assert!(guard.is_active(t0 + Duration::from_millis(100)));
        assert!(!guard.try_begin(t0 + Duration::from_millis(100)));
        assert!(!guard.try_begin(t0 + Duration::from_millis(499)));

        // The refused clicks did not extend the window.
        assert!(guard.try_begin(t0 + Duration::from_millis(500)));
    }

    #[test]
    fn reset_reopens_immediately() {
        let t0 = Instant::now();
        let mut guard = TransitionGuard::new(Duration::from_secs(10));
        assert!(guard.try_begin(t0));
        guard.reset();
        assert!(!guard.is_active(t0));
        assert!(guard.try_begin(t0));
    }

    #[test]
    fn zero_cooldown_never_blocks() {
        let t0 = Instant::now();
        let mut guard = TransitionGuard::new(Duration::ZERO);
        assert!(guard.try_begin(t0));
        assert!(guard.try_begin(t0));
    }
}
