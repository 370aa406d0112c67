//! Arena holding every section of a generation run

use serde::{Deserialize, Serialize};

use super::section::{Section, SectionId};
use crate::geometry::{Bounds, Direction};

/// What a new child section is carved as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SectionKind {
    Open,
    Corridor,
    MacroMain,
    MacroSide,
}

/// Placement of a child section
#[derive(Debug, Clone, Copy)]
pub(crate) struct ChildSpec {
    pub bounds: Bounds,
    pub direction: Direction,
    pub kind: SectionKind,
    pub leading_room: Option<SectionId>,
    pub corridor_offset: Option<i32>,
}

impl ChildSpec {
    pub fn open(bounds: Bounds, direction: Direction, leading_room: Option<SectionId>) -> Self {
        Self {
            bounds,
            direction,
            kind: SectionKind::Open,
            leading_room,
            corridor_offset: None,
        }
    }

    pub fn corridor(bounds: Bounds, direction: Direction, leading_room: Option<SectionId>) -> Self {
        Self {
            kind: SectionKind::Corridor,
            ..Self::open(bounds, direction, leading_room)
        }
    }

    pub fn kind(mut self, kind: SectionKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn corridor_offset(mut self, offset: Option<i32>) -> Self {
        self.corridor_offset = offset;
        self
    }
}

/// Sections addressed by [`SectionId`], with the registry of leaves.
///
/// Sections are only ever appended, so ids stay valid for the lifetime of
/// the tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionTree {
    sections: Vec<Section>,
    rooms: Vec<SectionId>,
    floors: Vec<SectionId>,
}

impl SectionTree {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> SectionId {
        SectionId(self.sections.len() as u32)
    }

    /// Add the root section of a floor
    pub fn add_root(&mut self, bounds: Bounds, direction: Direction, floor: i32) -> SectionId {
        let id = self.next_id();
        self.sections.push(Section::new(id, bounds, direction, floor));
        self.floors.push(id);
        id
    }

    /// Append a child; it inherits the parent's floors and region
    pub(crate) fn add_child(&mut self, parent: SectionId, spec: ChildSpec) -> SectionId {
        let id = self.next_id();
        let (floor, end_floor, region) = {
            let p = self.get(parent);
            (p.start_floor, p.end_floor, p.region_index)
        };

        let mut child = Section::new(id, spec.bounds, spec.direction, floor);
        child.end_floor = end_floor;
        child.parent = Some(parent);
        child.region_index = region;
        child.leading_room = spec.leading_room;
        child.corridor_offset = spec.corridor_offset;
        match spec.kind {
            SectionKind::Open => {}
            SectionKind::Corridor => child.is_corridor = true,
            SectionKind::MacroMain => {
                child.is_corridor = true;
                child.is_macro_main_corridor = true;
            }
            SectionKind::MacroSide => {
                child.is_corridor = true;
                child.is_macro_side_corridor = true;
            }
        }

        self.sections.push(child);
        self.get_mut(parent).children.push(id);
        id
    }

    /// Register a section where recursion stopped
    pub(crate) fn register_room(&mut self, id: SectionId) {
        self.get_mut(id).is_room = true;
        self.rooms.push(id);
    }

    /// Register a corridor carved directly by a strategy
    pub(crate) fn register_corridor(&mut self, id: SectionId) {
        self.rooms.push(id);
    }

    pub fn get(&self, id: SectionId) -> &Section {
        &self.sections[id.index()]
    }

    pub fn get_mut(&mut self, id: SectionId) -> &mut Section {
        &mut self.sections[id.index()]
    }

    pub fn try_get(&self, id: SectionId) -> Option<&Section> {
        self.sections.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Registered leaves (rooms and corridors) in registration order
    pub fn rooms(&self) -> &[SectionId] {
        &self.rooms
    }

    /// Root section of each floor, lowest first
    pub fn floors(&self) -> &[SectionId] {
        &self.floors
    }

    pub fn leaves(&self) -> impl Iterator<Item = &Section> {
        self.rooms.iter().map(|id| self.get(*id))
    }

    /// Number of ancestors above a section
    pub fn depth(&self, id: SectionId) -> usize {
        let mut depth = 0;
        let mut current = self.get(id).parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.get(parent).parent;
        }
        depth
    }

    /// Every section below `id`, depth first
    pub fn descendants(&self, id: SectionId) -> Vec<SectionId> {
        let mut out = Vec::new();
        let mut stack: Vec<SectionId> = self.get(id).children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.get(next).children.iter().rev().copied());
        }
        out
    }
}
