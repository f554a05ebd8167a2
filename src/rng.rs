//! Jitter sources for ray generation.
//!
//! Generation takes the random source as a parameter so tests can supply a
//! fixed seed and assert exact primitive sets. Production uses a time-seeded
//! ChaCha20 stream; reproducibility across runs is explicitly not a goal.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::cell::Cell;

/// Uniform random values feeding angle/delay/opacity jitter.
pub trait RaySource {
    /// Uniform f32 in [0, 1).
    fn unit(&mut self) -> f32;

    /// Uniform f32 in [lo, hi).
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.unit()
    }
}

thread_local! {
    static INSTANCE_COUNTER: Cell<u64> = const { Cell::new(0) };
}

/// Non-reproducible production source, seeded from wall-clock time mixed
/// with a per-thread counter so instances created in the same millisecond
/// still diverge.
pub struct EntropySource(ChaCha20Rng);

impl EntropySource {
    pub fn new() -> Self {
        let counter = INSTANCE_COUNTER.with(|c| {
            let n = c.get();
            c.set(n.wrapping_add(1));
            n
        });
        let seed = now_millis().wrapping_mul(0x9e37_79b9_7f4a_7c15) ^ counter;
        Self(ChaCha20Rng::seed_from_u64(seed))
    }
}

impl Default for EntropySource {
    fn default() -> Self {
        Self::new()
    }
}

impl RaySource for EntropySource {
    fn unit(&mut self) -> f32 {
        self.0.random()
    }
}

/// Deterministic source for tests: the same seed always yields the same
/// primitive set.
pub struct SeededSource(ChaCha20Rng);

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self(ChaCha20Rng::seed_from_u64(seed))
    }
}

impl RaySource for SeededSource {
    fn unit(&mut self) -> f32 {
        self.0.random()
    }
}

#[cfg(target_arch = "wasm32")]
fn now_millis() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
