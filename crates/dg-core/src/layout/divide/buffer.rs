//! Buffer division: equal strips across the facing

use super::Divider;
use crate::error::GenerationIssue;
use crate::geometry::{Bounds, Direction, Span, floor_to_int, lerp};
use crate::layout::section::{DivisionType, SectionId};
use crate::layout::tree::ChildSpec;

impl Divider<'_> {
    /// Number of strips a span is cut into.
    ///
    /// Bounded by how many rooms fit across the width and by the width to
    /// depth ratio. Low entropy favors the depth bound.
    fn wide_subdivisions(&mut self, span: Span, entropy: f32) -> i32 {
        let room_and_wall = self.specs.room_size + self.specs.wall_thickness;
        let max = (span.width + self.specs.wall_thickness) / room_and_wall;
        let by_depth = max.min(span.width / (span.depth + self.specs.wall_thickness));
        let by_min = max.min(span.width / room_and_wall);
        let random = self.rng.range_i32(by_min, by_depth);
        floor_to_int(lerp(by_depth as f32, random as f32, entropy)).max(1)
    }

    /// Cut `bounds` into strips along the width axis of `direction`.
    ///
    /// Strips are separated by a wall; the last one takes the remainder.
    pub(super) fn buffer_strips(
        &mut self,
        bounds: Bounds,
        direction: Direction,
        entropy: f32,
    ) -> Vec<Bounds> {
        let span = Span::of(bounds.size(), direction);
        let count = self.wide_subdivisions(span, entropy);
        let wall = self.specs.wall_thickness;
        let strip = (span.width - (count - 1) * wall) / count;

        let vertical = direction.is_vertical();
        let (lat_min, lat_max) = bounds.lateral(vertical);
        let along = bounds.along(vertical);
        let mut strips = Vec::with_capacity(count as usize);
        let mut start = lat_min;
        for _ in 0..count - 1 {
            strips.push(Bounds::from_axes(
                vertical,
                (start, start + strip),
                along,
                bounds.y,
                bounds.height,
            ));
            start += strip + wall;
        }
        strips.push(Bounds::from_axes(
            vertical,
            (start, lat_max),
            along,
            bounds.y,
            bounds.height,
        ));
        strips
    }

    /// Buffer-divide a box and attach the strips to `parent`.
    ///
    /// The box need not be a section of its own. Returns the strip ids in
    /// order.
    pub(super) fn add_strips(
        &mut self,
        parent: SectionId,
        strategy: DivisionType,
        bounds: Bounds,
        direction: Direction,
        entropy: f32,
        leading_room: Option<SectionId>,
    ) -> Result<Vec<SectionId>, GenerationIssue> {
        self.check_bounds(parent, strategy, bounds)?;
        let strips = self.buffer_strips(bounds, direction, entropy);
        let mut ids = Vec::with_capacity(strips.len());
        for strip in strips {
            ids.push(self.child(
                parent,
                strategy,
                ChildSpec::open(strip, direction, leading_room),
            )?);
        }
        Ok(ids)
    }

    /// Buffer-divide an existing section into strips facing its own way
    pub(super) fn buffer_divide(
        &mut self,
        id: SectionId,
        entropy: f32,
        leading_room: Option<SectionId>,
    ) -> Result<Vec<SectionId>, GenerationIssue> {
        let (bounds, direction) = {
            let s = self.tree.get(id);
            (s.bounds(), s.direction)
        };
        self.mark(id, DivisionType::Buffer);
        self.add_strips(id, DivisionType::Buffer, bounds, direction, entropy, leading_room)
    }
}
