// Cancellable one-shot timers driven by game ticks
//
// Everything that has to happen "later" (the one second round timer, the
// game-over delay, a health drain step) is scheduled here instead of on a
// thread. The loop advances the scheduler once per tick and pops the events
// that came due, so nothing ever blocks the tick.
//
// Repeating timers chain from the due time of the event that fired, not from
// the tick that noticed it, so a 20 ms step keeps a 20 ms cadence on 16.7 ms
// ticks.

use std::time::Duration;

/// Handle to a scheduled event, used to cancel it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// An event that came due, with the time it was due at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired<E> {
    pub due: Duration,
    pub event: E,
}

#[derive(Debug)]
struct Scheduled<E> {
    handle: TimerHandle,
    due: Duration,
    event: E,
}

/// Timer queue keyed on elapsed tick time
#[derive(Debug)]
pub struct Scheduler<E> {
    now: Duration,
    next_id: u64,
    pending: Vec<Scheduled<E>>,
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Schedule `event` to fire once `delay` of tick time has elapsed
    pub fn schedule(&mut self, delay: Duration, event: E) -> TimerHandle {
        self.schedule_at(self.now + delay, event)
    }

    /// Schedule `event` at an absolute tick time. A time already passed is
    /// popped by the next [`Scheduler::pop_due`].
    pub fn schedule_at(&mut self, due: Duration, event: E) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(Scheduled { handle, due, event });
        handle
    }

    /// Cancel a pending event. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|scheduled| scheduled.handle != handle);
        self.pending.len() != before
    }

    /// Drop every pending event
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Tick time elapsed since the scheduler was created
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn advance(&mut self, dt: Duration) {
        self.now += dt;
    }

    /// Remove and return the earliest event due by now. Ties go to the
    /// event scheduled first.
    pub fn pop_due(&mut self) -> Option<Fired<E>> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, scheduled)| scheduled.due <= self.now)
            .min_by_key(|(_, scheduled)| (scheduled.due, scheduled.handle.0))
            .map(|(index, _)| index)?;

        let scheduled = self.pending.swap_remove(index);
        Some(Fired {
            due: scheduled.due,
            event: scheduled.event,
        })
    }
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}
