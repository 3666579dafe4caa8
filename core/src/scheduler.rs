use std::cell::Cell as TimeCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::Millis;

/// Source of the current time for a session.
pub trait Clock {
    fn now(&self) -> Millis;
}

/// Wall clock, milliseconds since construction.
#[derive(Clone, Debug)]
pub struct SystemClock {
    origin: web_time::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: web_time::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Millis {
        self.origin.elapsed().as_millis() as Millis
    }
}

/// Virtual clock; clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<TimeCell<Millis>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, now: Millis) {
        self.now.set(now);
    }

    pub fn advance(&self, delta: Millis) {
        self.now.set(self.now.get() + delta);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        self.now.get()
    }
}

/// Handle of a scheduled task, ordered by deadline then insertion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId {
    deadline: Millis,
    seq: u64,
}

impl TimerId {
    pub fn deadline(&self) -> Millis {
        self.deadline
    }
}

/// Single-threaded timer queue.
///
/// Tasks run at their own deadline: a task scheduled while another one runs is
/// offset from the running task's deadline, so a chain drains completely when
/// time jumps ahead.
#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    now: Millis,
    next_seq: u64,
    queue: BTreeMap<TimerId, T>,
}

impl<T> Scheduler<T> {
    pub fn new(now: Millis) -> Self {
        Self {
            now,
            next_seq: 0,
            queue: BTreeMap::new(),
        }
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn schedule(&mut self, delay: Millis, task: T) -> TimerId {
        let id = TimerId {
            deadline: self.now.saturating_add(delay),
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.queue.insert(id, task);
        id
    }

    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        self.queue.remove(&id)
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.queue.contains_key(&id)
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.queue.keys().next().map(TimerId::deadline)
    }

    /// Pops the earliest task due at `until`, moving the current time to its deadline.
    pub fn pop_due(&mut self, until: Millis) -> Option<(TimerId, T)> {
        let entry = self.queue.first_entry()?;
        if entry.key().deadline > until {
            return None;
        }
        let (id, task) = entry.remove_entry();
        self.now = self.now.max(id.deadline);
        Some((id, task))
    }

    /// Moves the current time forward once every due task has run.
    pub fn finish(&mut self, until: Millis) {
        self.now = self.now.max(until);
    }
}
