// deadline.rs — Deadline: the per-invocation time budget.
//
// Each inbound trigger (email arrival, change batch, API call) is one
// stateless invocation. The caller hands its deadline to every remote
// call it makes; an exceeded deadline surfaces as a typed failure at the
// next call boundary instead of a hang. There is no caller-visible
// cancellation beyond this.

use std::time::{Duration, Instant};

/// Time budget passed through to every remote call.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    expires_at: Option<Instant>,
}

impl Deadline {
    /// No budget — calls never time out. Used by tests and local runs.
    pub fn none() -> Self {
        Self { expires_at: None }
    }

    /// Budget of `window` from now.
    pub fn within(window: Duration) -> Self {
        Self {
            expires_at: Some(Instant::now() + window),
        }
    }

    /// Whether the budget is spent.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|t| Instant::now() >= t)
    }

    /// Remaining budget, if one was set. Zero once expired.
    pub fn remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|t| t.saturating_duration_since(Instant::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_deadline_never_expires() {
        let deadline = Deadline::none();
        assert!(!deadline.is_expired());
        assert!(deadline.remaining().is_none());
    }

    #[test]
    fn zero_window_expires_immediately() {
        let deadline = Deadline::within(Duration::ZERO);
        assert!(deadline.is_expired());
        assert_eq!(deadline.remaining(), Some(Duration::ZERO));
    }

    #[test]
    fn generous_window_has_budget_left() {
        let deadline = Deadline::within(Duration::from_secs(60));
        assert!(!deadline.is_expired());
        assert!(deadline.remaining().unwrap() > Duration::from_secs(50));
    }
}
