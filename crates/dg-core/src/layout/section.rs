//! Section nodes of the layout tree

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::Display;

use super::door::{Door, SideDoors};
use super::wall::{Wall, section_walls};
use crate::geometry::{Bounds, Direction, Span, Vec3i};

/// Stable handle of a section inside a [`SectionTree`](super::SectionTree)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectionId(pub u32);

impl SectionId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Strategy that split a section into its children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
pub enum DivisionType {
    #[default]
    None,
    ThreeSection,
    Broom,
    Buffer,
    Macro,
    BufferedQuad,
}

/// A rectangular volume of the dungeon.
///
/// Sections are created by the divider, positioned once and never removed.
/// Leaves are either rooms (recursion stopped) or corridors registered by the
/// strategy that carved them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub parent: Option<SectionId>,
    pub children: Vec<SectionId>,

    pub position: Vec3i,
    pub size: Vec3i,
    pub start_floor: i32,
    pub end_floor: i32,
    pub direction: Direction,

    pub is_room: bool,
    pub is_corridor: bool,
    pub is_macro_main_corridor: bool,
    pub is_macro_side_corridor: bool,

    /// Set once when the section is split
    pub division: DivisionType,
    /// Lateral offset from the minimum corner where this section's corridor sits
    pub corridor_offset: Option<i32>,
    pub region_index: Option<usize>,
    /// Section the leading door opens into
    pub leading_room: Option<SectionId>,
    pub leading_door: Option<Door>,

    pub doors: SideDoors,
}

impl Section {
    pub(crate) fn new(id: SectionId, bounds: Bounds, direction: Direction, floor: i32) -> Self {
        Self {
            id,
            parent: None,
            children: Vec::new(),
            position: bounds.position(),
            size: bounds.size(),
            start_floor: floor,
            end_floor: floor,
            direction,
            is_room: false,
            is_corridor: false,
            is_macro_main_corridor: false,
            is_macro_side_corridor: false,
            division: DivisionType::None,
            corridor_offset: None,
            region_index: None,
            leading_room: None,
            leading_door: None,
            doors: SideDoors::default(),
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_box(self.position, self.size)
    }

    /// Width and depth relative to this section's facing
    pub fn span(&self) -> Span {
        Span::of(self.size, self.direction)
    }

    /// Both horizontal extents exceed the given minimum
    pub fn can_divide(&self, minimum: i32) -> bool {
        self.size.x > minimum && self.size.z > minimum
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_divided(&self) -> bool {
        self.division != DivisionType::None
    }

    pub fn door_count(&self) -> usize {
        self.doors.len()
    }

    /// Wall segments around this section with door openings cut out
    pub fn walls(&self, door_height: i32, door_width: i32) -> Vec<Wall> {
        section_walls(self, door_height, door_width)
    }
}
