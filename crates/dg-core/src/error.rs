//! Error types for configuration and generation

use serde::Serialize;
use strum::Display;
use thiserror::Error;

use crate::geometry::{Bounds, Direction};
use crate::layout::{DivisionType, SectionId};

/// Configuration problems detected before any generation work starts
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error(
        "world {world_x}x{world_z} is too small for entropy threshold {threshold}: max point {max_point} is below zero point {zero_point}"
    )]
    WorldTooSmall {
        world_x: i32,
        world_z: i32,
        threshold: f32,
        zero_point: i32,
        max_point: i32,
    },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: i32 },

    #[error("wall thickness must be at least 1, got {0}")]
    WallTooThin(i32),

    #[error("floor thickness must not be negative, got {0}")]
    NegativeFloorThickness(i32),

    #[error("door width {door_width} exceeds corridor size {corridor_size}")]
    DoorWiderThanCorridor { door_width: i32, corridor_size: i32 },

    #[error("door height {door_height} must be below the usable floor height {usable}")]
    DoorTooTall { door_height: i32, usable: i32 },

    #[error("entropy threshold {0} is outside [0, 1]")]
    EntropyThresholdOutOfRange(f32),

    #[error("world height {world_y} holds no floor of height {floor_height}")]
    NoFloors { world_y: i32, floor_height: i32 },

    #[error("no region covers entropy {entropy}")]
    UncoveredEntropy { entropy: f32 },

    #[error("invalid specifications: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Why a door was not threaded onto a side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum DoorRejection {
    #[strum(to_string = "outside the side")]
    OutOfBounds,
    #[strum(to_string = "overlapping another door")]
    Overlap,
}

/// Recoverable problems hit while dividing or deriving doors.
///
/// These are logged and collected in the generation report; the affected
/// subtree is left as built.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum GenerationIssue {
    /// A piece that is empty or reaches outside the section being split
    #[error("call {call}: {strategy} produced a degenerate box under section {section}: {bounds:?}")]
    DegenerateGeometry {
        section: SectionId,
        call: u64,
        strategy: DivisionType,
        bounds: Bounds,
    },

    #[error("call {call}: corridor offset {offset} of section {section} is outside [0, {max}]")]
    CorridorOffsetOutOfRange {
        section: SectionId,
        call: u64,
        offset: i32,
        max: i32,
    },

    #[error("call {call}: quadrant {section} cannot pair {primary} with {secondary}")]
    InvalidQuadrantPair {
        section: SectionId,
        call: u64,
        primary: Direction,
        secondary: Direction,
    },

    #[error("door at {offset} on the {side} side of section {section} rejected: {reason}")]
    DoorRejected {
        section: SectionId,
        side: Direction,
        offset: i32,
        reason: DoorRejection,
    },

    #[error("no region covers entropy {entropy} of section {section}")]
    UncoveredEntropy { section: SectionId, entropy: f32 },
}

impl GenerationIssue {
    /// Section the issue was raised for
    pub fn section(&self) -> SectionId {
        match self {
            GenerationIssue::DegenerateGeometry { section, .. }
            | GenerationIssue::CorridorOffsetOutOfRange { section, .. }
            | GenerationIssue::InvalidQuadrantPair { section, .. }
            | GenerationIssue::DoorRejected { section, .. }
            | GenerationIssue::UncoveredEntropy { section, .. } => *section,
        }
    }
}
