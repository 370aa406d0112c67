//! Entropy of a section footprint
//!
//! Entropy measures how much room a section has left relative to the world.
//! It is 0 for sections barely larger than two rooms and a wall, and rises
//! to 1 once the smaller horizontal extent reaches the world's max point.
//! Low entropy makes the divider stop early and pick safer splits.

use crate::config::Specifications;
use crate::consts::{LOW_ENTROPY_CUTOFF, LOW_ENTROPY_STOP_SLOPE};
use crate::geometry::Vec3i;
use crate::rng::RandomStream;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntropyModel {
    zero_point: i32,
    max_point: i32,
}

impl EntropyModel {
    pub fn new(specs: &Specifications, world: Vec3i) -> Self {
        Self {
            zero_point: specs.zero_point(),
            max_point: specs.max_point(world),
        }
    }

    pub fn zero_point(&self) -> i32 {
        self.zero_point
    }

    pub fn max_point(&self) -> i32 {
        self.max_point
    }

    fn axis(&self, extent: i32) -> f32 {
        let span = self.max_point - self.zero_point;
        if span == 0 {
            return if extent > self.zero_point { 1.0 } else { 0.0 };
        }
        ((extent - self.zero_point) as f32 / span as f32).clamp(0.0, 1.0)
    }

    /// Entropy of a footprint, the lower of its x and z ratios
    pub fn entropy(&self, size: Vec3i) -> f32 {
        if self.max_point < self.zero_point {
            return 0.0;
        }
        self.axis(size.x).min(self.axis(size.z))
    }

    /// Chance that a section of this entropy stops dividing early
    pub fn stop_chance(entropy: f32) -> f32 {
        if entropy >= LOW_ENTROPY_CUTOFF {
            return 0.0;
        }
        1.0 - entropy * LOW_ENTROPY_STOP_SLOPE
    }

    /// Roll whether a low-entropy section stops dividing.
    ///
    /// Draws only below the cutoff.
    pub fn low_entropy_roll(&self, entropy: f32, rng: &mut RandomStream) -> bool {
        if entropy >= LOW_ENTROPY_CUTOFF {
            return false;
        }
        rng.value() < Self::stop_chance(entropy)
    }
}
