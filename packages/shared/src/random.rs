//! Random number source abstraction for testability.

use rand::Rng;

/// Source of uniformly distributed numbers in `[0, 1)`.
pub trait RandomSource: Send + Sync {
    /// Next sample in `[0, 1)`
    fn next_unit(&self) -> f64;
}

/// Thread-local RNG implementation (uses `rand::thread_rng`)
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_unit(&self) -> f64 {
        rand::thread_rng().r#gen::<f64>()
    }
}

/// Fixed source for testing (always returns the same sample)
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom {
    value: f64,
}

impl FixedRandom {
    /// Create a new fixed source. The value is clamped into `[0, 1)`.
    pub fn new(value: f64) -> Self {
        Self {
            value: value.clamp(0.0, 1.0 - f64::EPSILON),
        }
    }
}

impl RandomSource for FixedRandom {
    fn next_unit(&self) -> f64 {
        self.value
    }
}
