use jiff::{SignedDuration, Timestamp};
use std::cell::Cell;
use std::rc::Rc;

/// Source of the `fetched_at` timestamps and of "now" for staleness checks.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    time: Rc<Cell<Timestamp>>,
}

impl ManualClock {
    pub fn new(initial_time: Timestamp) -> Self {
        Self {
            time: Rc::new(Cell::new(initial_time)),
        }
    }

    pub fn advance(&self, duration: SignedDuration) {
        self.time.set(self.time.get() + duration);
    }

    pub fn set(&self, time: Timestamp) {
        self.time.set(time);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.time.get()
    }
}
