use crate::domain::ports::RandomSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Draws from the calling thread's RNG. The default outcome source.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
    fn next_unit(&self) -> f64 {
        rand::thread_rng().r#gen::<f64>()
    }
}

/// Reproducible draws from a seeded `StdRng`.
///
/// The generator sits behind a mutex; it is only locked for the draw itself.
pub struct SeededRandomSource {
    rng: Mutex<StdRng>,
}

impl SeededRandomSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandomSource {
    fn next_unit(&self) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.r#gen::<f64>()
    }
}

/// Always returns the same value. Forces one branch of the simulator in tests.
fn unit_draw(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedRandomSource(f64);

impl FixedRandomSource {
    /// `value` is clamped into `[0, 1)`; `NaN` becomes `0.0`.
    pub fn new(value: f64) -> Self {
        Self(unit_draw(value))
    }
}

impl RandomSource for FixedRandomSource {
    fn next_unit(&self) -> f64 {
        self.0
    }
}

/// Cycles through a fixed list of draws.
pub struct SequenceRandomSource {
    values: Vec<f64>,
    next: AtomicUsize,
}

impl SequenceRandomSource {
    /// Values are clamped into `[0, 1)` with `NaN` read as `0.0`; an empty list behaves
    /// like a constant `0.0`.
    pub fn new(values: Vec<f64>) -> Self {
        let values = values.into_iter().map(unit_draw).collect();
        Self {
            values,
            next: AtomicUsize::new(0),
        }
    }
}

impl RandomSource for SequenceRandomSource {
    fn next_unit(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let i = self.next.fetch_add(1, Ordering::Relaxed);
        self.values[i % self.values.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_rng_source_stays_in_unit_interval() {
        let source = ThreadRngSource;
        for _ in 0..1000 {
            let v = source.next_unit();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_seeded_sources_repeat() {
        let a = SeededRandomSource::new(42);
        let b = SeededRandomSource::new(42);
        let xs: Vec<f64> = (0..10).map(|_| a.next_unit()).collect();
        let ys: Vec<f64> = (0..10).map(|_| b.next_unit()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_fixed_source_is_clamped() {
        assert_eq!(FixedRandomSource::new(-3.0).next_unit(), 0.0);
        assert!(FixedRandomSource::new(1.0).next_unit() < 1.0);
    }

    #[test]
    fn test_sequence_source_cycles() {
        let source = SequenceRandomSource::new(vec![0.1, 0.95]);
        let draws: Vec<f64> = (0..4).map(|_| source.next_unit()).collect();
        assert_eq!(draws, vec![0.1, 0.95, 0.1, 0.95]);
        assert_eq!(SequenceRandomSource::new(vec![]).next_unit(), 0.0);
    }

    #[test]
    fn test_nan_draws_become_zero() {
        assert_eq!(FixedRandomSource::new(f64::NAN).next_unit(), 0.0);
        let source = SequenceRandomSource::new(vec![f64::NAN, 0.5]);
        assert_eq!(source.next_unit(), 0.0);
        assert_eq!(source.next_unit(), 0.5);
    }
}
