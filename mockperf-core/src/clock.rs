//! Timing Source
//!
//! The runner never reads a real clock. Timed benchmarks receive a value from
//! a `Clock`, which by default is a constant so every run is reproducible.

/// Value handed to timed benchmarks in place of an elapsed-time reading
pub const SENTINEL_TIME: u64 = 42;

/// Module-level counter read; always the sentinel.
pub fn perf_counter() -> u64 {
    SENTINEL_TIME
}

/// Source of the timing value injected by `Runner::run_timed`
pub trait Clock {
    /// Current reading
    fn now(&self) -> u64;
}

/// Clock that always returns the same reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl Default for FixedClock {
    fn default() -> Self {
        FixedClock(SENTINEL_TIME)
    }
}

impl Clock for FixedClock {
    #[inline(always)]
    fn now(&self) -> u64 {
        self.0
    }
}

impl<F> Clock for F
where
    F: Fn() -> u64,
{
    fn now(&self) -> u64 {
        self()
    }
}
