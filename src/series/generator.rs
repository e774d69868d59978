use super::UnitSource;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded pseudo-random stream yielding f64 in [0, 1).
///
/// Output depends only on the seed and the number of draws taken, so the same
/// account always backfills the same way across refresh cycles. ChaCha8 keeps
/// its output fixed across `rand_chacha` releases, unlike `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededSequence {
    rng: ChaCha8Rng,
}

impl SeededSequence {
    pub fn new(seed: i64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed as u64),
        }
    }

    /// Next value in [0, 1).
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

impl UnitSource for SeededSequence {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        self.next()
    }
}

impl Iterator for SeededSequence {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        Some(SeededSequence::next(self))
    }
}
