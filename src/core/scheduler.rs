//! Cancellable timers for the light sequence
//!
//! Timers live in a queue owned by the engine and fire only when the engine
//! is polled. A cancelled handle is gone from the queue, so it can never fire.
//! Every timer also carries the round it was armed for.

use std::time::Duration;
use tracing::debug;

/// What a timer is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// One-shot pause before the light tick starts
    Startup,
    /// Repeating light tick
    LightTick,
    /// One-shot random pause before lights out
    Stimulus,
}

/// Opaque handle to a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// A timer that came due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub handle: TimerHandle,
    pub kind: TimerKind,
    pub round: u64,
    /// Scheduled deadline (not the poll time)
    pub deadline: Duration,
}

#[derive(Debug, Clone)]
struct PendingTimer {
    handle: TimerHandle,
    kind: TimerKind,
    round: u64,
    deadline: Duration,
    period: Option<Duration>,
}

/// Pending timers in arming order
#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: u64,
    pending: Vec<PendingTimer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire once at `deadline`
    pub fn schedule_once(&mut self, kind: TimerKind, round: u64, deadline: Duration) -> TimerHandle {
        self.push(kind, round, deadline, None)
    }

    /// Fire at `first`, then every `period` until cancelled
    pub fn schedule_repeating(
        &mut self,
        kind: TimerKind,
        round: u64,
        first: Duration,
        period: Duration,
    ) -> TimerHandle {
        self.push(kind, round, first, Some(period))
    }

    fn push(&mut self, kind: TimerKind, round: u64, deadline: Duration, period: Option<Duration>) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        debug!(?kind, round, deadline_ms = deadline.as_millis() as u64, "timer armed");
        self.pending.push(PendingTimer {
            handle,
            kind,
            round,
            deadline,
            period,
        });
        handle
    }

    /// Cancel one timer. Returns false if it already fired (one-shot) or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.handle != handle);
        let removed = self.pending.len() != before;
        if removed {
            debug!(?handle, "timer cancelled");
        }
        removed
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|t| t.handle == handle)
    }

    /// Earliest deadline among pending timers
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|t| t.deadline).min()
    }

    /// Remove and return the earliest timer due at `now`. Repeating timers are
    /// re-armed one period after their own deadline. Ties go to arming order.
    pub fn pop_due(&mut self, now: Duration) -> Option<FiredTimer> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline <= now)
            .min_by_key(|(i, t)| (t.deadline, *i))
            .map(|(i, _)| i)?;

        let timer = self.pending.remove(idx);
        let fired = FiredTimer {
            handle: timer.handle,
            kind: timer.kind,
            round: timer.round,
            deadline: timer.deadline,
        };
        if let Some(period) = timer.period {
            self.pending.push(PendingTimer {
                deadline: timer.deadline + period,
                ..timer
            });
        }
        Some(fired)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_once_fires_once() {
        let mut q = TimerQueue::new();
        let h = q.schedule_once(TimerKind::Startup, 1, ms(100));
        assert!(q.pop_due(ms(99)).is_none());
        let fired = q.pop_due(ms(100)).unwrap();
        assert_eq!(fired.handle, h);
        assert_eq!(fired.kind, TimerKind::Startup);
        assert!(q.pop_due(ms(10_000)).is_none());
        assert!(q.is_empty());
    }

    #[test]
    fn test_repeating_rearms_from_deadline() {
        let mut q = TimerQueue::new();
        let h = q.schedule_repeating(TimerKind::LightTick, 1, ms(1_100), ms(1_000));
        // A late poll still fires each period in order
        let deadlines: Vec<_> = std::iter::from_fn(|| q.pop_due(ms(3_500)))
            .map(|f| f.deadline)
            .collect();
        assert_eq!(deadlines, vec![ms(1_100), ms(2_100), ms(3_100)]);
        assert!(q.is_pending(h));
        assert_eq!(q.next_deadline(), Some(ms(4_100)));
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut q = TimerQueue::new();
        let a = q.schedule_once(TimerKind::Stimulus, 1, ms(50));
        let b = q.schedule_repeating(TimerKind::LightTick, 1, ms(10), ms(10));
        assert!(q.cancel(a));
        assert!(q.cancel(b));
        assert!(!q.cancel(a));
        assert!(q.pop_due(ms(1_000)).is_none());
        assert_eq!(q.next_deadline(), None);
    }

    #[test]
    fn test_earliest_deadline_first() {
        let mut q = TimerQueue::new();
        q.schedule_once(TimerKind::Stimulus, 1, ms(300));
        q.schedule_once(TimerKind::Startup, 1, ms(100));
        assert_eq!(q.pop_due(ms(500)).unwrap().kind, TimerKind::Startup);
        assert_eq!(q.pop_due(ms(500)).unwrap().kind, TimerKind::Stimulus);
    }
}
