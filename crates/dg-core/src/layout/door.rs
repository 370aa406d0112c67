//! Doors and per-side door lists
//!
//! Every registered leaf gets one leading door on its entrance side. The
//! door is threaded onto the leaf's own side and mirrored onto the facing
//! side of the section it leads into, so both walls get the same opening.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::SectionTree;
use super::section::Section;
use crate::config::Specifications;
use crate::error::{DoorRejection, GenerationIssue};
use crate::geometry::{Bounds, Direction, Vec3i};

/// A door opening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Door {
    pub position: Vec3i,
    pub size: Vec3i,
}

impl Door {
    pub fn bounds(&self) -> Bounds {
        Bounds::from_box(self.position, self.size)
    }

    /// Coordinate of the door along a wall on the given side
    pub fn offset_along(&self, side: Direction) -> i32 {
        if side.is_vertical() {
            self.position.x
        } else {
            self.position.z
        }
    }
}

/// A door with its absolute coordinate along the wall it sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorOffset {
    pub door: Door,
    pub offset: i32,
}

/// Doors on one side of a section, sorted by offset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorList {
    entries: Vec<DoorOffset>,
}

impl DoorList {
    /// Insert keeping the list sorted.
    ///
    /// `range` is the side's extent along the wall. Doors must fit inside it
    /// and must not overlap a door already on the side.
    pub fn insert(
        &mut self,
        door: Door,
        offset: i32,
        width: i32,
        range: (i32, i32),
    ) -> Result<(), DoorRejection> {
        if offset < range.0 || offset + width > range.1 {
            return Err(DoorRejection::OutOfBounds);
        }
        if self
            .entries
            .iter()
            .any(|e| offset < e.offset + width && e.offset < offset + width)
        {
            return Err(DoorRejection::Overlap);
        }
        let at = self.entries.partition_point(|e| e.offset < offset);
        self.entries.insert(at, DoorOffset { door, offset });
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &DoorOffset> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The four door lists of a section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideDoors {
    pub north: DoorList,
    pub south: DoorList,
    pub east: DoorList,
    pub west: DoorList,
}

impl SideDoors {
    pub fn side(&self, side: Direction) -> &DoorList {
        match side {
            Direction::North => &self.north,
            Direction::South => &self.south,
            Direction::East => &self.east,
            Direction::West => &self.west,
        }
    }

    pub fn side_mut(&mut self, side: Direction) -> &mut DoorList {
        match side {
            Direction::North => &mut self.north,
            Direction::South => &mut self.south,
            Direction::East => &mut self.east,
            Direction::West => &mut self.west,
        }
    }

    /// Total doors over all sides
    pub fn len(&self) -> usize {
        self.north.len() + self.south.len() + self.east.len() + self.west.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compute the leading door of a section.
///
/// The door sits just outside the entrance side. With a corridor offset it
/// is centered on that corridor, otherwise on the side's midpoint.
pub fn leading_door(section: &Section, specs: &Specifications) -> Door {
    let direction = section.direction;
    let (lat_min, lat_max) = section.bounds().lateral(direction.is_vertical());
    let along = match section.corridor_offset {
        Some(offset) => lat_min + specs.corridor_offset_to_door_offset(offset),
        None => lat_min + (lat_max - lat_min) / 2 - specs.door_width / 2,
    };

    let pos = section.position;
    let size = section.size;
    let wall = specs.wall_thickness;
    let position = match direction {
        Direction::North => Vec3i::new(along, pos.y, pos.z - wall),
        Direction::South => Vec3i::new(along, pos.y, pos.z + size.z),
        Direction::East => Vec3i::new(pos.x - wall, pos.y, along),
        Direction::West => Vec3i::new(pos.x + size.x, pos.y, along),
    };
    let size = if direction.is_vertical() {
        Vec3i::new(specs.door_width, specs.floor_height, wall)
    } else {
        Vec3i::new(wall, specs.floor_height, specs.door_width)
    };
    Door { position, size }
}

fn thread_onto(
    section: &mut Section,
    side: Direction,
    door: Door,
    width: i32,
) -> Result<(), GenerationIssue> {
    let offset = door.offset_along(side);
    let range = section.bounds().lateral(side.is_vertical());
    section
        .doors
        .side_mut(side)
        .insert(door, offset, width, range)
        .map_err(|reason| GenerationIssue::DoorRejected {
            section: section.id,
            side,
            offset,
            reason,
        })
}

/// Derive and thread the leading door of every registered leaf.
///
/// Returns the doors accepted by their own leaf in registry order.
/// Rejections are appended to `issues`.
pub fn derive_doors(
    tree: &mut SectionTree,
    specs: &Specifications,
    issues: &mut Vec<GenerationIssue>,
) -> Vec<Door> {
    let mut doors = Vec::with_capacity(tree.rooms().len());
    let leaves = tree.rooms().to_vec();

    for id in leaves {
        let section = tree.get_mut(id);
        let door = leading_door(section, specs);
        section.leading_door = Some(door);
        let direction = section.direction;
        let lead = section.leading_room;

        if let Err(issue) = thread_onto(section, direction.opposite(), door, specs.door_width) {
            warn!(%issue, "leading door dropped");
            issues.push(issue);
            continue;
        }
        doors.push(door);

        if let Some(lead) = lead {
            if let Err(issue) = thread_onto(tree.get_mut(lead), direction, door, specs.door_width) {
                debug!(%issue, leaf = %id, "door not mirrored onto lead");
                issues.push(issue);
            }
        }
    }
    doors
}
