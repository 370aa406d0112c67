//! Random number generation for layout generation
//!
//! Uses a seeded ChaCha RNG so that a seed and a set of specifications always
//! reproduce the same dungeon.

use std::cmp::Ordering;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Layout random stream
///
/// Wraps ChaCha8Rng and counts every value drawn from it.
/// Note: only the seed is serialized; deserializing restarts the stream.
#[derive(Debug, Clone)]
pub struct RandomStream {
    rng: ChaCha8Rng,
    seed: u64,
    draws: u64,
}

impl Serialize for RandomStream {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RandomStream {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(RandomStream::new(seed))
    }
}

impl RandomStream {
    /// Create a new stream with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            draws: 0,
        }
    }

    /// Get the seed used to create this stream
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of values drawn so far
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Integer in `[min, max)`.
    ///
    /// Returns `min` when the bounds are equal and a value in `(max, min]`
    /// when they are reversed.
    pub fn range_i32(&mut self, min: i32, max: i32) -> i32 {
        match min.cmp(&max) {
            Ordering::Equal => min,
            Ordering::Less => {
                self.draws += 1;
                self.rng.gen_range(min..max)
            }
            Ordering::Greater => {
                self.draws += 1;
                self.rng.gen_range(max + 1..=min)
            }
        }
    }

    /// Float in `[min, max]`, inclusive on both ends. Reversed bounds are swapped.
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        if lo == hi {
            return lo;
        }
        self.draws += 1;
        self.rng.gen_range(lo..=hi)
    }

    /// Uniform float in `[0, 1]`
    pub fn value(&mut self) -> f32 {
        self.range_f32(0.0, 1.0)
    }

    /// Fair coin flip
    pub fn coin(&mut self) -> bool {
        self.value() < 0.5
    }

    /// Choose a random index into a collection of `len` items
    pub fn pick(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let len = i32::try_from(len).unwrap_or(i32::MAX);
        usize::try_from(self.range_i32(0, len)).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_i32_bounds() {
        let mut rng = RandomStream::new(42);
        for _ in 0..1000 {
            let n = rng.range_i32(3, 9);
            assert!((3..9).contains(&n));
        }
    }

    #[test]
    fn test_range_i32_reversed() {
        let mut rng = RandomStream::new(42);
        for _ in 0..1000 {
            let n = rng.range_i32(9, 3);
            assert!(n > 3 && n <= 9);
        }
    }

    #[test]
    fn test_range_i32_equal_draws_nothing() {
        let mut rng = RandomStream::new(42);
        assert_eq!(rng.range_i32(5, 5), 5);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_range_f32_inclusive_and_reversed() {
        let mut rng = RandomStream::new(7);
        for _ in 0..1000 {
            let a = rng.range_f32(0.35, 0.65);
            assert!((0.35..=0.65).contains(&a));
            let b = rng.range_f32(1.0, 0.1);
            assert!((0.1..=1.0).contains(&b));
        }
    }

    #[test]
    fn test_pick() {
        let mut rng = RandomStream::new(1);
        assert_eq!(rng.pick(0), None);
        assert_eq!(rng.pick(1), Some(0));
        for _ in 0..100 {
            assert!(rng.pick(4).is_some_and(|i| i < 4));
        }
    }

    #[test]
    fn test_reproducibility() {
        let mut rng1 = RandomStream::new(42);
        let mut rng2 = RandomStream::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.range_i32(0, 100), rng2.range_i32(0, 100));
            assert_eq!(rng1.coin(), rng2.coin());
        }
        assert_eq!(rng1.draws(), rng2.draws());
    }

    #[test]
    fn test_serde_keeps_seed() {
        let rng = RandomStream::new(99);
        let json = serde_json::to_string(&rng).unwrap();
        let restored: RandomStream = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.seed(), 99);
        assert_eq!(restored.draws(), 0);
    }
}
