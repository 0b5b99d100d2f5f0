use std::time::Duration;

/// Handle of a scheduled one-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Deferred callback facility. Expiry is reported by the driver as the fired
/// [`TimerId`]s.
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId;
}

#[derive(Debug)]
struct Pending {
    id: TimerId,
    remaining: Duration,
}

/// Frame-driven one-shot timer queue.
///
/// A zero delay fires on the next [`TimerQueue::advance`], never inline.
#[derive(Debug, Default)]
pub struct TimerQueue {
    pending: Vec<Pending>,
    next_id: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Advance all timers by `dt` and return the fired ones, earliest first.
    pub fn advance(&mut self, dt: Duration) -> Vec<TimerId> {
        let mut fired = Vec::new();
        self.pending.retain_mut(|timer| match timer.remaining.checked_sub(dt) {
            Some(remaining) if !remaining.is_zero() => {
                timer.remaining = remaining;
                true
            },
            _ => {
                fired.push((timer.remaining, timer.id));
                false
            },
        });
        fired.sort();
        fired.into_iter().map(|(_, id)| id).collect()
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        log::trace!("timer {id:?} scheduled in {delay:?}");
        self.pending.push(Pending {
            id,
            remaining: delay,
        });
        id
    }
}
