//! Bounded busy-polling.
//!
//! The driver never sleeps between polls; it spins on a bus read until either
//! the awaited condition holds or a [`Deadline`] derived from a [`Clock`] passes.
//! Keeping the deadline arithmetic here lets a cooperative scheduler replace
//! the spin later without touching the radio logic.

/// A free-running millisecond counter.
///
/// The counter may wrap; elapsed time is computed with wrapping arithmetic.
pub trait Clock {
    /// Milliseconds elapsed since an arbitrary (but fixed) epoch.
    fn now_ms(&mut self) -> u32;
}

impl<F> Clock for F
where
    F: FnMut() -> u32,
{
    fn now_ms(&mut self) -> u32 {
        self()
    }
}

/// A point in time after which a busy-wait must give up.
///
/// ```
/// use rf24link::{Clock, Deadline};
///
/// let mut ticks = 0u32;
/// let mut clock = move || {
///     ticks += 10;
///     ticks
/// };
/// let deadline = Deadline::after(&mut clock, Some(25));
/// assert!(!deadline.expired(&mut clock));
/// assert!(!deadline.expired(&mut clock));
/// assert!(deadline.expired(&mut clock));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    start: u32,
    timeout_ms: Option<u32>,
}

impl Deadline {
    /// Start a deadline `timeout_ms` from now. `None` never expires.
    pub fn after<C: Clock>(clock: &mut C, timeout_ms: Option<u32>) -> Self {
        Self {
            start: clock.now_ms(),
            timeout_ms,
        }
    }

    /// A deadline that never expires.
    pub const fn never() -> Self {
        Self {
            start: 0,
            timeout_ms: None,
        }
    }

    /// Has the allotted time fully elapsed?
    pub fn expired<C: Clock>(&self, clock: &mut C) -> bool {
        match self.timeout_ms {
            Some(timeout) => clock.now_ms().wrapping_sub(self.start) >= timeout,
            None => false,
        }
    }
}
