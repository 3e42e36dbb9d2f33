//! Random sources for the GDP placeholder multiplier

use std::ops::Range;
use std::sync::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::traits::MetricFactor;

/// Whole-number multipliers drawn per record
pub const FACTOR_RANGE: Range<u32> = 1000..2000;

/// Thread-local RNG; every refresh yields different estimates
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomMetricFactor;

impl MetricFactor for RandomMetricFactor {
    fn draw(&self) -> f64 {
        rand::thread_rng().gen_range(FACTOR_RANGE) as f64
    }
}

/// Seeded RNG for reproducible refresh runs
#[derive(Debug)]
pub struct SeededMetricFactor {
    rng: Mutex<StdRng>,
}

impl SeededMetricFactor {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl MetricFactor for SeededMetricFactor {
    fn draw(&self) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(FACTOR_RANGE) as f64
    }
}

/// Constant multiplier
#[derive(Clone, Copy, Debug)]
pub struct FixedMetricFactor {
    value: f64,
}

impl FixedMetricFactor {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl MetricFactor for FixedMetricFactor {
    fn draw(&self) -> f64 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_factor_stays_in_range() {
        let factor = RandomMetricFactor;
        for _ in 0..1000 {
            let value = factor.draw();
            assert!((1000.0..2000.0).contains(&value));
            assert_eq!(value.fract(), 0.0);
        }
    }

    #[test]
    fn test_seeded_factor_is_reproducible() {
        let a = SeededMetricFactor::new(42);
        let b = SeededMetricFactor::new(42);
        let first: Vec<f64> = (0..16).map(|_| a.draw()).collect();
        let second: Vec<f64> = (0..16).map(|_| b.draw()).collect();
        assert_eq!(first, second);
        assert!(first.iter().all(|v| (1000.0..2000.0).contains(v)));
    }
}
