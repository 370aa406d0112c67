//! Tuning constants for the divider

/// Depth-to-width ratio above which a three-way split cuts an end section
pub const DEEP_RATIO: f32 = 0.9;

/// Range of the randomized squaring cut, as a fraction of the depth
pub const SQUARING_MIN: f32 = 0.35;
pub const SQUARING_MAX: f32 = 0.65;

/// Entropy below which a section may stop dividing early
pub const LOW_ENTROPY_CUTOFF: f32 = 0.05;

/// Slope of the early-stop chance below the cutoff
pub const LOW_ENTROPY_STOP_SLOPE: f32 = 20.0;

/// Fraction of a quadrant reserved for each of its buffer bands
pub const QUADRANT_BAND_FRACTION: f32 = 0.2;

/// Entropy used when placing macro and quadrant corridors
pub const MACRO_CORRIDOR_ENTROPY: f32 = 0.5;

/// Lower bound of the region roll
pub const REGION_ROLL_FLOOR: f32 = 0.1;

/// Default cap on `subdivide` calls per generation run
pub const DEFAULT_CALL_BUDGET: u64 = 5000;
