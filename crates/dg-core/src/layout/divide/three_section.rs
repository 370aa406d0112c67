//! Three-way division: corridor, two flanks and an optional end section

use super::Divider;
use crate::consts::{DEEP_RATIO, SQUARING_MAX, SQUARING_MIN};
use crate::error::GenerationIssue;
use crate::geometry::{Bounds, Span, clamp_i32, lerp, round_to_int};
use crate::layout::section::{DivisionType, SectionId};
use crate::layout::tree::ChildSpec;

const STRATEGY: DivisionType = DivisionType::ThreeSection;

impl Divider<'_> {
    /// Split a section into a corridor running along its facing, a flank on
    /// either side of it and, when the section is deep, an end section past
    /// the corridor's far end.
    ///
    /// Wide flanks are buffered and a wide end section is broom-divided;
    /// everything else recurses once all pieces exist.
    pub(super) fn three_section_divide(
        &mut self,
        id: SectionId,
        entropy: f32,
    ) -> Result<(), GenerationIssue> {
        let specs = self.specs;
        let (bounds, direction, inherited, lead) = {
            let s = self.tree.get(id);
            (s.bounds(), s.direction, s.corridor_offset, s.leading_room)
        };
        let wall = specs.wall_thickness;
        let room = specs.room_size;
        let corridor = specs.corridor_size;
        let vertical = direction.is_vertical();
        let positive = direction.is_positive();
        let (lat_min, lat_max) = bounds.lateral(vertical);
        let (dep_min, dep_max) = bounds.along(vertical);
        let width = lat_max - lat_min;
        let depth = dep_max - dep_min;

        let squaring = lerp(0.5, self.rng.range_f32(SQUARING_MIN, SQUARING_MAX), entropy);
        let deep = depth as f32 / width as f32 > DEEP_RATIO;
        let cut = dep_min + round_to_int(depth as f32 * squaring);
        let (run_start, run_end) = match (deep, positive) {
            (false, _) => (dep_min, dep_max),
            (true, true) => (dep_min, clamp_i32(cut, dep_min + room + wall, dep_max - room)),
            (true, false) => (clamp_i32(cut, dep_min + room, dep_max - room - wall), dep_max),
        };

        let offset = match inherited {
            Some(offset) => offset,
            None => self.place_corridor(width, entropy),
        };
        self.check_offset(id, offset, width - corridor)?;
        self.mark(id, STRATEGY);

        let y = bounds.y;
        let height = bounds.height;
        let c_min = lat_min + offset;
        let c_max = c_min + corridor;
        let corridor_bounds = Bounds::from_axes(vertical, (c_min, c_max), (run_start, run_end), y, height);
        let corridor_id = self.child(id, STRATEGY, ChildSpec::corridor(corridor_bounds, direction, lead))?;
        self.tree.register_corridor(corridor_id);

        let high = (c_max + wall, lat_max);
        let low = (lat_min, c_min - wall);
        let (right, left) = if positive { (high, low) } else { (low, high) };
        let (right_facing, left_facing) = if vertical {
            (direction.clockwise(), direction.counter_clockwise())
        } else {
            (direction.counter_clockwise(), direction.clockwise())
        };

        let mut pending = Vec::new();
        for (lateral, facing) in [(right, right_facing), (left, left_facing)] {
            let flank = Bounds::from_axes(vertical, lateral, (run_start, run_end), y, height);
            let flank_id = self.child(id, STRATEGY, ChildSpec::open(flank, facing, Some(corridor_id)))?;
            let span = Span::of(flank.size(), facing);
            if span.width > 2 * span.depth + wall && span.depth > room {
                pending.extend(self.buffer_divide(flank_id, 0.0, Some(corridor_id))?);
            } else {
                pending.push(flank_id);
            }
        }

        if deep {
            let along = if positive {
                (run_end + wall, dep_max)
            } else {
                (dep_min, run_start - wall)
            };
            let end = Bounds::from_axes(vertical, (lat_min, lat_max), along, y, height);
            let end_id = self.child(
                id,
                STRATEGY,
                ChildSpec::open(end, direction, Some(corridor_id)).corridor_offset(Some(offset)),
            )?;
            let span = Span::of(end.size(), direction);
            if span.width > 2 * span.depth + wall && span.depth > corridor + wall + room {
                pending.extend(self.broom_divide(end_id)?);
            } else {
                pending.push(end_id);
            }
        }

        for child in pending {
            self.recurse(child);
        }
        Ok(())
    }
}
