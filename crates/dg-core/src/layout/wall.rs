//! Wall segments derived from a section's door lists

use serde::{Deserialize, Serialize};

use super::door::DoorList;
use super::section::Section;
use crate::geometry::{Direction, Vec3i};

/// A solid wall segment. `direction` is the way the wall faces, into the
/// section it encloses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wall {
    pub position: Vec3i,
    pub size: Vec3i,
    pub direction: Direction,
}

impl Wall {
    /// Extent along the wall's run
    pub fn length(&self) -> i32 {
        if self.direction.is_vertical() {
            self.size.x
        } else {
            self.size.z
        }
    }

    /// Interval along the run, in absolute coordinates
    pub fn run(&self) -> (i32, i32) {
        if self.direction.is_vertical() {
            (self.position.x, self.position.x + self.size.x)
        } else {
            (self.position.z, self.position.z + self.size.z)
        }
    }

    /// Coordinate of the wall plane across the run
    pub fn plane(&self) -> i32 {
        if self.direction.is_vertical() {
            self.position.z
        } else {
            self.position.x
        }
    }
}

struct SideRun<'a> {
    origin: Vec3i,
    length: i32,
    facing: Direction,
    doors: &'a DoorList,
}

impl SideRun<'_> {
    fn segment(&self, start: i32, length: i32, lift: i32, height: i32) -> Option<Wall> {
        if length <= 0 || height <= 0 {
            return None;
        }
        let (position, size) = if self.facing.is_vertical() {
            (
                Vec3i::new(self.origin.x + start, self.origin.y + lift, self.origin.z),
                Vec3i::new(length, height, 0),
            )
        } else {
            (
                Vec3i::new(self.origin.x, self.origin.y + lift, self.origin.z + start),
                Vec3i::new(0, height, length),
            )
        };
        Some(Wall {
            position,
            size,
            direction: self.facing,
        })
    }

    fn walls(&self, height: i32, door_height: i32, door_width: i32, out: &mut Vec<Wall>) {
        let base = if self.facing.is_vertical() {
            self.origin.x
        } else {
            self.origin.z
        };
        let mut cursor = 0;
        for entry in self.doors.iter() {
            let start = entry.offset - base;
            out.extend(self.segment(cursor, start - cursor, 0, height));
            out.extend(self.segment(start, door_width, door_height, height - door_height));
            cursor = start + door_width;
        }
        out.extend(self.segment(cursor, self.length - cursor, 0, height));
    }
}

/// All wall segments of a section.
///
/// Sides come in north, south, east, west order. A side without doors is one
/// full segment; each door adds a piece above the opening and splits the run.
/// Runs of zero length, left by doors flush with a corner, are omitted.
pub fn section_walls(section: &Section, door_height: i32, door_width: i32) -> Vec<Wall> {
    let pos = section.position;
    let size = section.size;
    let sides = [
        SideRun {
            origin: Vec3i::new(pos.x, pos.y, pos.z + size.z),
            length: size.x,
            facing: Direction::South,
            doors: &section.doors.north,
        },
        SideRun {
            origin: pos,
            length: size.x,
            facing: Direction::North,
            doors: &section.doors.south,
        },
        SideRun {
            origin: Vec3i::new(pos.x + size.x, pos.y, pos.z),
            length: size.z,
            facing: Direction::West,
            doors: &section.doors.east,
        },
        SideRun {
            origin: pos,
            length: size.z,
            facing: Direction::East,
            doors: &section.doors.west,
        },
    ];

    let mut walls = Vec::with_capacity(4 + 2 * section.doors.len());
    for side in &sides {
        side.walls(size.y, door_height, door_width, &mut walls);
    }
    walls
}
