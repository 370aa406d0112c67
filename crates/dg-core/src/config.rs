//! Generation specifications
//!
//! Specifications are plain data, usually loaded from JSON. Every field has
//! a default so partial files are accepted. [`Specifications::validate`] runs
//! before any generation work and rejects configurations the divider cannot
//! honor.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::{Vec3i, lerp, round_to_int};

/// Opaque asset names a renderer attaches to a region
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionHandles {
    pub floor_material: Option<String>,
    pub wall_material: Option<String>,
    pub ceiling_material: Option<String>,
    pub props: Vec<String>,
}

/// A themed region selected by section entropy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub min_entropy: f32,
    pub max_entropy: f32,
    #[serde(default)]
    pub handles: RegionHandles,
}

impl Region {
    pub fn new(name: impl Into<String>, min_entropy: f32, max_entropy: f32) -> Self {
        Self {
            name: name.into(),
            min_entropy,
            max_entropy,
            handles: RegionHandles::default(),
        }
    }

    /// Entropy interval with the bounds in ascending order
    pub fn interval(&self) -> (f32, f32) {
        if self.min_entropy <= self.max_entropy {
            (self.min_entropy, self.max_entropy)
        } else {
            (self.max_entropy, self.min_entropy)
        }
    }

    /// Inclusive on both ends
    pub fn contains(&self, entropy: f32) -> bool {
        let (lo, hi) = self.interval();
        lo <= entropy && entropy <= hi
    }
}

/// Sizes and thresholds driving a generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Specifications {
    pub room_size: i32,
    pub corridor_size: i32,
    pub door_width: i32,
    pub door_height: i32,
    pub floor_height: i32,
    pub wall_thickness: i32,
    pub floor_thickness: i32,
    /// Reserved for renderers; the divider does not read it.
    pub max_floor_usage: f32,
    pub entropy_threshold: f32,
    pub macro_threshold: i32,
    pub regions: Vec<Region>,
}

impl Default for Specifications {
    fn default() -> Self {
        Self {
            room_size: 8,
            corridor_size: 4,
            door_width: 3,
            door_height: 3,
            floor_height: 10,
            wall_thickness: 1,
            floor_thickness: 1,
            max_floor_usage: 1.0,
            entropy_threshold: 0.5,
            macro_threshold: 120,
            regions: vec![
                Region::new("cellar", 0.0, 0.35),
                Region::new("halls", 0.3, 0.75),
                Region::new("keep", 0.7, 1.0),
            ],
        }
    }
}

impl Specifications {
    /// Parse specifications from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Smallest extent that still fits two rooms, a corridor and their walls
    pub fn minimum_section_size(&self) -> i32 {
        self.room_size * 2 + self.corridor_size + self.wall_thickness * 2
    }

    /// Extent at which entropy starts rising above zero
    pub fn zero_point(&self) -> i32 {
        self.room_size * 2 + self.wall_thickness
    }

    /// Extent at which entropy saturates for the given world
    pub fn max_point(&self, world: Vec3i) -> i32 {
        let smallest = world.x.min(world.z);
        round_to_int(lerp(
            self.zero_point() as f32,
            smallest as f32,
            self.entropy_threshold,
        ))
    }

    /// Shift that centers a door inside its corridor
    pub fn door_offset_shift(&self) -> i32 {
        (self.corridor_size - self.door_width) / 2
    }

    pub fn corridor_offset_to_door_offset(&self, corridor_offset: i32) -> i32 {
        corridor_offset + self.door_offset_shift()
    }

    pub fn door_offset_to_corridor_offset(&self, door_offset: i32) -> i32 {
        door_offset - self.door_offset_shift()
    }

    /// Height of a section once the floor slab is taken out
    pub fn usable_floor_height(&self) -> i32 {
        self.floor_height - self.floor_thickness
    }

    /// Number of whole floors a world of the given height holds
    pub fn floor_count(&self, world: Vec3i) -> i32 {
        if self.floor_height <= 0 {
            return 0;
        }
        world.y / self.floor_height
    }

    /// Check the specifications against a world size.
    pub fn validate(&self, world: Vec3i) -> Result<(), ConfigError> {
        let positive = [
            ("room_size", self.room_size),
            ("corridor_size", self.corridor_size),
            ("door_width", self.door_width),
            ("door_height", self.door_height),
            ("floor_height", self.floor_height),
            ("world width", world.x),
            ("world depth", world.z),
        ];
        for (field, value) in positive {
            if value <= 0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.wall_thickness < 1 {
            return Err(ConfigError::WallTooThin(self.wall_thickness));
        }
        if self.floor_thickness < 0 {
            return Err(ConfigError::NegativeFloorThickness(self.floor_thickness));
        }
        if self.door_width > self.corridor_size {
            return Err(ConfigError::DoorWiderThanCorridor {
                door_width: self.door_width,
                corridor_size: self.corridor_size,
            });
        }
        if self.door_height >= self.usable_floor_height() {
            return Err(ConfigError::DoorTooTall {
                door_height: self.door_height,
                usable: self.usable_floor_height(),
            });
        }
        if !(0.0..=1.0).contains(&self.entropy_threshold) {
            return Err(ConfigError::EntropyThresholdOutOfRange(
                self.entropy_threshold,
            ));
        }
        if self.floor_count(world) < 1 {
            return Err(ConfigError::NoFloors {
                world_y: world.y,
                floor_height: self.floor_height,
            });
        }

        let zero_point = self.zero_point();
        let max_point = self.max_point(world);
        if max_point < zero_point {
            return Err(ConfigError::WorldTooSmall {
                world_x: world.x,
                world_z: world.z,
                threshold: self.entropy_threshold,
                zero_point,
                max_point,
            });
        }

        if let Some(entropy) = self.first_uncovered_entropy() {
            return Err(ConfigError::UncoveredEntropy { entropy });
        }
        Ok(())
    }

    /// Lowest entropy in `[0, 1]` no region covers, if any.
    ///
    /// An empty region list disables region tagging and covers nothing by
    /// choice, so it reports no gap.
    pub fn first_uncovered_entropy(&self) -> Option<f32> {
        if self.regions.is_empty() {
            return None;
        }
        let mut intervals: Vec<(f32, f32)> = self.regions.iter().map(Region::interval).collect();
        intervals.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut reach = 0.0_f32;
        for (lo, hi) in intervals {
            if lo > reach {
                return Some(reach);
            }
            reach = reach.max(hi);
            if reach >= 1.0 {
                return None;
            }
        }
        Some(reach)
    }
}
