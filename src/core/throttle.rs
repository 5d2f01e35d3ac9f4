//! Minimum spacing between accepted inputs

use std::time::Duration;
use crate::MIN_ACTION_GAP_MS;

/// Drops any input that lands within `min_gap` of the last accepted one
#[derive(Debug, Clone, Copy)]
pub struct ActionThrottle {
    min_gap: Duration,
    last_action: Option<Duration>,
}

impl Default for ActionThrottle {
    fn default() -> Self {
        Self::new(Duration::from_millis(MIN_ACTION_GAP_MS))
    }
}

impl ActionThrottle {
    pub fn new(min_gap: Duration) -> Self {
        Self {
            min_gap,
            last_action: None,
        }
    }

    /// Accept and stamp `now`, or reject without touching the stamp
    pub fn try_accept(&mut self, now: Duration) -> bool {
        if let Some(last) = self.last_action {
            if now.saturating_sub(last) < self.min_gap {
                return false;
            }
        }
        self.last_action = Some(now);
        true
    }

    /// Stamp an action that bypassed the guard
    pub fn record(&mut self, now: Duration) {
        self.last_action = Some(now);
    }

    pub fn last_action(&self) -> Option<Duration> {
        self.last_action
    }
}
