//! Geometry primitives: facings, integer vectors, boxes and the float
//! helpers the divider relies on.

mod bounds;
mod direction;

pub use bounds::{Bounds, Span, Vec3i};
pub use direction::Direction;

/// Linear interpolation with `t` clamped to `[0, 1]`
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Round to the nearest integer, ties to even
pub fn round_to_int(value: f32) -> i32 {
    value.round_ties_even() as i32
}

pub fn floor_to_int(value: f32) -> i32 {
    value.floor() as i32
}

/// Clamp that never panics on inverted bounds.
///
/// The lower bound is checked first, so `min` wins for values below it and
/// `max` wins for everything else past it.
pub fn clamp_i32(value: i32, min: i32, max: i32) -> i32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_clamps_t() {
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(0.0, 10.0, 2.0), 10.0);
        assert_eq!(lerp(0.0, 10.0, -1.0), 0.0);
        assert_eq!(lerp(10.0, 0.0, 0.25), 7.5);
    }

    #[test]
    fn test_round_ties_to_even() {
        assert_eq!(round_to_int(2.5), 2);
        assert_eq!(round_to_int(3.5), 4);
        assert_eq!(round_to_int(-2.5), -2);
        assert_eq!(round_to_int(2.6), 3);
    }

    #[test]
    fn test_clamp_inverted_bounds() {
        assert_eq!(clamp_i32(5, 0, 10), 5);
        assert_eq!(clamp_i32(-3, 0, 10), 0);
        assert_eq!(clamp_i32(12, 0, 10), 10);
        assert_eq!(clamp_i32(1, 4, 2), 4);
        assert_eq!(clamp_i32(9, 4, 2), 2);
    }
}
