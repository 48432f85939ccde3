//! Recurring timers driven by a monotonic clock
//!
//! The clock is whatever the platform says it is: wall time for the
//! terminal, simulated frame time for headless runs.

use std::time::Duration;

use crate::sim::TimerId;

#[derive(Debug, Clone)]
struct RecurringTimer {
    id: TimerId,
    interval: Duration,
    next_fire: Duration,
}

/// Set of recurring timers
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    timers: Vec<RecurringTimer>,
    next_id: u32,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a timer that first fires one `interval` after `now`
    pub fn register(&mut self, interval: Duration, now: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(RecurringTimer {
            id,
            interval,
            next_fire: now + interval,
        });
        id
    }

    /// Timers due at `now`. Each fires at most once per call; a timer that
    /// fell more than one interval behind is rescheduled from `now`.
    pub fn due(&mut self, now: Duration) -> Vec<TimerId> {
        let mut fired = Vec::new();
        for timer in &mut self.timers {
            if now < timer.next_fire {
                continue;
            }
            fired.push(timer.id);
            timer.next_fire += timer.interval;
            if timer.next_fire <= now {
                timer.next_fire = now + timer.interval;
            }
        }
        fired
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
