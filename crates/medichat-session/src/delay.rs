//! Artificial reply latency.
//!
//! The assistant reply is held back for a bounded random wait to imitate a
//! remote inference round trip. The wait is `base + U[0,1) * spread`, so a
//! sampled delay always lands in `[base, base + spread)`.

use std::time::Duration;

use rand::Rng;

/// The reply-delay distribution for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayPolicy {
    base: Duration,
    spread: Duration,
}

impl DelayPolicy {
    /// A policy drawing from `[base, base + spread)`.
    pub fn new(base: Duration, spread: Duration) -> Self {
        Self { base, spread }
    }

    /// A deterministic policy that always yields exactly `delay`.
    ///
    /// Used by tests and scripted demos where the wait must be predictable.
    pub fn fixed(delay: Duration) -> Self {
        Self::new(delay, Duration::ZERO)
    }

    /// Draw one delay from the distribution.
    pub fn sample(&self) -> Duration {
        self.base + self.spread.mul_f64(rand::thread_rng().gen::<f64>())
    }
}

impl Default for DelayPolicy {
    /// One to three seconds: a one-second floor plus up to two seconds of
    /// jitter.
    fn default() -> Self {
        Self::new(Duration::from_millis(1000), Duration::from_millis(2000))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
