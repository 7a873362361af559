//! Deterministic scheduler for delayed continuations
//!
//! Time only moves when the host advances the timeline once per tick, so a
//! continuation is never resumed inside the call that scheduled it.

use std::collections::BTreeMap;
use std::time::Duration;

/// Timing facility used to defer work to a later tick
pub trait Scheduler<K> {
    /// Current time on this scheduler's clock
    fn now(&self) -> Duration;

    /// Fire `continuation` once, no earlier than `delay` from now
    fn schedule_delayed(&mut self, delay: Duration, continuation: K);
}

/// Tick-driven clock holding pending continuations
#[derive(Debug, Clone)]
pub struct Timeline<K> {
    now: Duration,
    next_seq: u64,
    /// Keyed by (due time, scheduling order)
    pending: BTreeMap<(Duration, u64), K>,
}

impl<K> Timeline<K> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            pending: BTreeMap::new(),
        }
    }

    /// Move the clock forward and return everything now due, in order.
    ///
    /// Work scheduled while the caller resumes the returned continuations
    /// waits for the next advance, even with a zero delay.
    pub fn advance(&mut self, delta: Duration) -> Vec<K> {
        self.now += delta;

        let mut due = Vec::new();
        while let Some(entry) = self.pending.first_entry() {
            if entry.key().0 > self.now {
                break;
            }
            due.push(entry.remove());
        }
        due
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// When the earliest pending continuation becomes due
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.keys().next().map(|(due, _)| *due)
    }
}

impl<K> Default for Timeline<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Scheduler<K> for Timeline<K> {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule_delayed(&mut self, delay: Duration, continuation: K) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.insert((self.now + delay, seq), continuation);
    }
}
