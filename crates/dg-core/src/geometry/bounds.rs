//! Integer vectors and axis-aligned boxes

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use super::Direction;

/// Integer 3D vector. `y` is the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Vec3i {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Vec3i {
    pub const ZERO: Vec3i = Vec3i::new(0, 0, 0);

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl Add for Vec3i {
    type Output = Vec3i;

    fn add(self, rhs: Vec3i) -> Vec3i {
        Vec3i::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3i {
    type Output = Vec3i;

    fn sub(self, rhs: Vec3i) -> Vec3i {
        Vec3i::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Width and depth of a footprint as seen from a facing.
///
/// Width runs across the facing, depth along it. For North/South the width
/// is the x extent, for East/West it is the z extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub width: i32,
    pub depth: i32,
}

impl Span {
    pub fn of(size: Vec3i, direction: Direction) -> Self {
        if direction.is_vertical() {
            Self {
                width: size.x,
                depth: size.z,
            }
        } else {
            Self {
                width: size.z,
                depth: size.x,
            }
        }
    }
}

/// Axis-aligned box stored as min/max on the horizontal axes plus a base
/// height and vertical extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_z: i32,
    pub max_z: i32,
    pub y: i32,
    pub height: i32,
}

impl Bounds {
    /// Build from a corner position and a size
    pub fn from_box(position: Vec3i, size: Vec3i) -> Self {
        Self {
            min_x: position.x,
            max_x: position.x + size.x,
            min_z: position.z,
            max_z: position.z + size.z,
            y: position.y,
            height: size.y,
        }
    }

    /// Build from a lateral and an along-facing interval.
    ///
    /// For vertical facings the lateral axis is x, otherwise z.
    pub fn from_axes(
        vertical: bool,
        lateral: (i32, i32),
        along: (i32, i32),
        y: i32,
        height: i32,
    ) -> Self {
        let ((min_x, max_x), (min_z, max_z)) = if vertical {
            (lateral, along)
        } else {
            (along, lateral)
        };
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
            y,
            height,
        }
    }

    pub fn position(&self) -> Vec3i {
        Vec3i::new(self.min_x, self.y, self.min_z)
    }

    pub fn size(&self) -> Vec3i {
        Vec3i::new(self.max_x - self.min_x, self.height, self.max_z - self.min_z)
    }

    /// Interval across the facing axis
    pub fn lateral(&self, vertical: bool) -> (i32, i32) {
        if vertical {
            (self.min_x, self.max_x)
        } else {
            (self.min_z, self.max_z)
        }
    }

    /// Interval along the facing axis
    pub fn along(&self, vertical: bool) -> (i32, i32) {
        if vertical {
            (self.min_z, self.max_z)
        } else {
            (self.min_x, self.max_x)
        }
    }

    /// True when any extent is zero or negative
    pub fn is_degenerate(&self) -> bool {
        self.max_x <= self.min_x || self.max_z <= self.min_z || self.height <= 0
    }

    /// True when the footprints share interior area
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_z < other.max_z
            && other.min_z < self.max_z
    }

    /// True when `other` lies entirely inside this footprint
    pub fn contains(&self, other: &Bounds) -> bool {
        self.min_x <= other.min_x
            && other.max_x <= self.max_x
            && self.min_z <= other.min_z
            && other.max_z <= self.max_z
    }
}
