//! Broom division: a corridor slice with buffered strips behind it

use super::Divider;
use crate::error::GenerationIssue;
use crate::geometry::Bounds;
use crate::layout::section::{DivisionType, SectionId};
use crate::layout::tree::ChildSpec;

impl Divider<'_> {
    /// Carve a corridor slice at the entrance end of a section and buffer the
    /// rest. The corridor keeps the section's corridor offset so its door
    /// lines up with the corridor leading into it.
    ///
    /// Returns the strips, which still need to recurse.
    pub(super) fn broom_divide(&mut self, id: SectionId) -> Result<Vec<SectionId>, GenerationIssue> {
        let specs = self.specs;
        let (bounds, direction, offset, lead) = {
            let s = self.tree.get(id);
            (s.bounds(), s.direction, s.corridor_offset, s.leading_room)
        };
        let corridor = specs.corridor_size;
        let wall = specs.wall_thickness;
        let vertical = direction.is_vertical();
        let lateral = bounds.lateral(vertical);
        let (dep_min, dep_max) = bounds.along(vertical);

        let (corridor_along, broom_along) = if direction.is_positive() {
            ((dep_min, dep_min + corridor), (dep_min + corridor + wall, dep_max))
        } else {
            ((dep_max - corridor, dep_max), (dep_min, dep_max - corridor - wall))
        };

        self.mark(id, DivisionType::Broom);
        let corridor_bounds =
            Bounds::from_axes(vertical, lateral, corridor_along, bounds.y, bounds.height);
        let corridor_id = self.child(
            id,
            DivisionType::Broom,
            ChildSpec::corridor(corridor_bounds, direction, lead).corridor_offset(offset),
        )?;
        self.tree.register_corridor(corridor_id);

        let broom = Bounds::from_axes(vertical, lateral, broom_along, bounds.y, bounds.height);
        self.add_strips(id, DivisionType::Broom, broom, direction, 0.0, Some(corridor_id))
    }
}
