//! Cardinal facings on the horizontal plane

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::Vec3i;

/// Facing of a section, door or wall.
///
/// North is +z and East is +x. A section's facing names the side its
/// entrance is opposite to: a north-facing room is entered from the south.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Direction {
    #[default]
    North,
    South,
    West,
    East,
}

impl Direction {
    /// North and South run along the z axis
    pub const fn is_vertical(self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }

    /// North and East point toward increasing coordinates
    pub const fn is_positive(self) -> bool {
        matches!(self, Direction::North | Direction::East)
    }

    pub const fn clockwise(self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    pub const fn counter_clockwise(self) -> Self {
        match self {
            Direction::North => Direction::West,
            Direction::West => Direction::South,
            Direction::South => Direction::East,
            Direction::East => Direction::North,
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
        }
    }

    /// Unit vector for this facing
    pub const fn to_vector(self) -> Vec3i {
        match self {
            Direction::North => Vec3i::new(0, 0, 1),
            Direction::South => Vec3i::new(0, 0, -1),
            Direction::West => Vec3i::new(-1, 0, 0),
            Direction::East => Vec3i::new(1, 0, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_rotation_round_trip() {
        for dir in Direction::iter() {
            assert_eq!(dir.clockwise().counter_clockwise(), dir);
            assert_eq!(dir.clockwise().clockwise(), dir.opposite());
            assert_ne!(dir.is_vertical(), dir.clockwise().is_vertical());
        }
    }

    #[test]
    fn test_vectors_match_sign() {
        for dir in Direction::iter() {
            let v = dir.to_vector();
            let sum = v.x + v.z;
            assert_eq!(sum > 0, dir.is_positive());
            assert_eq!(v.z != 0, dir.is_vertical());
        }
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("east".parse::<Direction>().unwrap(), Direction::East);
        assert_eq!("NORTH".parse::<Direction>().unwrap(), Direction::North);
        assert!("up".parse::<Direction>().is_err());
    }
}
