use std::sync::atomic::{AtomicI64, Ordering};

/// Monotonic time in host-defined units.
pub type Tick = i64;

/// Source of the current tick.
pub trait Clock {
    fn now(&self) -> Tick;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Tick {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> Tick {
        (**self).now()
    }
}

/// A clock advanced explicitly, e.g. once per host simulation tick.
#[derive(Debug, Default)]
pub struct ManualClock {
    tick: AtomicI64,
}

impl ManualClock {
    pub fn new(start: Tick) -> Self {
        Self {
            tick: AtomicI64::new(start),
        }
    }

    pub fn set(&self, tick: Tick) {
        self.tick.store(tick, Ordering::Release);
    }

    /// Advance by `ticks` and return the new time. Wraps on overflow, like
    /// the stored counter.
    pub fn advance(&self, ticks: Tick) -> Tick {
        self.tick
            .fetch_add(ticks, Ordering::AcqRel)
            .wrapping_add(ticks)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Tick {
        self.tick.load(Ordering::Acquire)
    }
}
