//! Cooperative timer queue driven by a caller-supplied clock.
//!
//! Nothing here sleeps or spawns. The owner advances time by passing a
//! monotonic `now` to [`TimerQueue::pop_due`] and dispatches the returned
//! events itself, so every timer runs on the owner's thread. Timers are held
//! through [`TimerGuard`]s; dropping a guard cancels its timer.

use std::collections::BTreeMap;
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;

use crate::constants::{MIN_TIMER_PERIOD, REEL_COUNT};
use crate::digit::Digit;

/// Identifier of a scheduled timer, unique per queue.
pub type TimerId = u64;

/// Work a timer asks its owner to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Settle the in-flight spin onto the targets fixed at spin start.
    Settle { targets: [Digit; REEL_COUNT] },
    /// Resample the displayed digit of an animating reel.
    ReelTick { reel: usize },
}

#[derive(Debug)]
struct Entry {
    deadline: Duration,
    period: Option<Duration>,
    event: TimerEvent,
}

#[derive(Debug, Default)]
struct QueueInner {
    next_id: TimerId,
    entries: BTreeMap<TimerId, Entry>,
}

/// One-shot and repeating timers ordered by deadline.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    inner: Arc<Mutex<QueueInner>>,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `event` once at `now + delay`.
    #[must_use = "dropping the guard cancels the timer"]
    pub fn schedule_once(&self, now: Duration, delay: Duration, event: TimerEvent) -> TimerGuard {
        self.insert(now.saturating_add(delay), None, event)
    }

    /// Fire `event` every `period`, first at `now + period`.
    #[must_use = "dropping the guard cancels the timer"]
    pub fn schedule_every(
        &self,
        now: Duration,
        period: Duration,
        event: TimerEvent,
    ) -> TimerGuard {
        let period = period.max(MIN_TIMER_PERIOD);
        self.insert(now.saturating_add(period), Some(period), event)
    }

    fn insert(&self, deadline: Duration, period: Option<Duration>, event: TimerEvent) -> TimerGuard {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        let id = inner.next_id;
        inner.next_id += 1;
        inner.entries.insert(
            id,
            Entry {
                deadline,
                period,
                event,
            },
        );
        TimerGuard {
            id,
            queue: Arc::downgrade(&self.inner),
        }
    }

    /// Take the earliest timer due at or before `now`.
    ///
    /// Ties are broken by scheduling order. A repeating timer fires once per
    /// call however late the caller is, then moves to the first multiple of
    /// its period after `now`. Missed ticks are dropped, so the cost of a
    /// large jump in `now` does not grow with the gap. A repeating timer whose
    /// next deadline is past `Duration::MAX` is retired.
    pub fn pop_due(&self, now: Duration) -> Option<TimerEvent> {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        let id = inner
            .entries
            .iter()
            .filter(|(_, entry)| entry.deadline <= now)
            .min_by_key(|(id, entry)| (entry.deadline, **id))
            .map(|(id, _)| *id)?;

        let entry = inner.entries.get_mut(&id)?;
        let event = entry.event;
        if let Some(next) = entry.period.and_then(|p| next_after(entry.deadline, p, now)) {
            entry.deadline = next;
            return Some(event);
        }
        inner.entries.remove(&id);
        Some(event)
    }

    /// Earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.inner.lock().entries.values().map(|e| e.deadline).min()
    }

    /// Number of live timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cancel(inner: &Mutex<QueueInner>, id: TimerId) {
        inner.lock().entries.remove(&id);
    }
}

/// First `deadline + k * period` (k >= 1) strictly after `now`, or `None`
/// when that is not representable.
fn next_after(deadline: Duration, period: Duration, now: Duration) -> Option<Duration> {
    let missed = now.saturating_sub(deadline).as_nanos() / period.as_nanos();
    let offset = period.as_nanos().checked_mul(missed + 1)?;
    let target = deadline.as_nanos().checked_add(offset)?;
    let secs = u64::try_from(target / 1_000_000_000).ok()?;
    let nanos = u32::try_from(target % 1_000_000_000).ok()?;
    Some(Duration::new(secs, nanos))
}

/// Owning handle of a scheduled timer. Cancels the timer when dropped.
#[derive(Debug)]
pub struct TimerGuard {
    id: TimerId,
    queue: Weak<Mutex<QueueInner>>,
}

impl TimerGuard {
    #[must_use]
    pub fn id(&self) -> TimerId {
        self.id
    }

    /// Whether the timer is still scheduled.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.queue
            .upgrade()
            .is_some_and(|q| q.lock().entries.contains_key(&self.id))
    }
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        if let Some(queue) = self.queue.upgrade() {
            TimerQueue::cancel(&queue, self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn tick(reel: usize) -> TimerEvent {
        TimerEvent::ReelTick { reel }
    }

    #[test]
    fn one_shot_fires_once_at_deadline() {
        let queue = TimerQueue::new();
        let _guard = queue.schedule_once(ms(0), ms(50), tick(0));
        assert_eq!(queue.pop_due(ms(49)), None);
        assert_eq!(queue.pop_due(ms(50)), Some(tick(0)));
        assert_eq!(queue.pop_due(ms(1000)), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn repeating_timer_merges_missed_ticks() {
        let queue = TimerQueue::new();
        let _guard = queue.schedule_every(ms(0), ms(100), tick(1));
        let mut fired = 0;
        while queue.pop_due(ms(350)).is_some() {
            fired += 1;
        }
        assert_eq!(fired, 1);
        assert_eq!(queue.next_deadline(), Some(ms(400)));
    }

    #[test]
    fn repeating_timer_on_time_fires_each_period() {
        let queue = TimerQueue::new();
        let _guard = queue.schedule_every(ms(0), ms(100), tick(0));
        assert_eq!(queue.pop_due(ms(100)), Some(tick(0)));
        assert_eq!(queue.next_deadline(), Some(ms(200)));
        assert_eq!(queue.pop_due(ms(199)), None);
        assert_eq!(queue.pop_due(ms(200)), Some(tick(0)));
        assert_eq!(queue.next_deadline(), Some(ms(300)));
    }

    #[test]
    fn huge_gap_costs_one_pop_per_timer() {
        let queue = TimerQueue::new();
        let _guards: Vec<_> = (0..3)
            .map(|reel| queue.schedule_every(ms(0), ms(1), tick(reel)))
            .collect();
        let now = Duration::from_secs(10 * 3600);
        let mut pops = 0;
        while queue.pop_due(now).is_some() {
            pops += 1;
        }
        assert_eq!(pops, 3);
        assert_eq!(queue.next_deadline(), Some(now + ms(1)));
    }

    #[test]
    fn deadlines_saturate_instead_of_overflowing() {
        let queue = TimerQueue::new();
        let once = queue.schedule_once(ms(25), Duration::MAX, tick(0));
        let every = queue.schedule_every(ms(0), ms(1), tick(1));
        assert_eq!(queue.next_deadline(), Some(ms(1)));
        assert_eq!(queue.pop_due(Duration::MAX), Some(tick(1)));
        assert!(!every.is_active());
        assert!(once.is_active());
        assert_eq!(queue.pop_due(Duration::MAX), Some(tick(0)));
        assert_eq!(queue.pop_due(Duration::MAX), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn dropping_guard_cancels() {
        let queue = TimerQueue::new();
        let guard = queue.schedule_every(ms(0), ms(10), tick(2));
        assert!(guard.is_active());
        assert_eq!(queue.len(), 1);
        drop(guard);
        assert!(queue.is_empty());
        assert_eq!(queue.pop_due(ms(100)), None);
    }

    #[test]
    fn events_come_out_in_deadline_then_schedule_order() {
        let queue = TimerQueue::new();
        let _late = queue.schedule_once(ms(0), ms(30), tick(2));
        let _first = queue.schedule_once(ms(0), ms(10), tick(0));
        let _tied = queue.schedule_once(ms(0), ms(10), tick(1));
        assert_eq!(queue.pop_due(ms(30)), Some(tick(0)));
        assert_eq!(queue.pop_due(ms(30)), Some(tick(1)));
        assert_eq!(queue.pop_due(ms(30)), Some(tick(2)));
    }

    #[test]
    fn zero_period_is_clamped() {
        let queue = TimerQueue::new();
        let _guard = queue.schedule_every(ms(0), Duration::ZERO, tick(0));
        assert_eq!(queue.next_deadline(), Some(MIN_TIMER_PERIOD));
    }

    #[test]
    fn guard_outliving_queue_is_harmless() {
        let queue = TimerQueue::new();
        let guard = queue.schedule_once(ms(0), ms(1), tick(0));
        drop(queue);
        assert!(!guard.is_active());
        drop(guard);
    }
}
