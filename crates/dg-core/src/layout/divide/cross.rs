//! Macro cross division for large sections

use super::Divider;
use super::quadrant::QuadrantLinks;
use crate::consts::MACRO_CORRIDOR_ENTROPY;
use crate::error::GenerationIssue;
use crate::geometry::{Bounds, Direction};
use crate::layout::section::{DivisionType, SectionId};
use crate::layout::tree::{ChildSpec, SectionKind};

const STRATEGY: DivisionType = DivisionType::Macro;

/// World quadrants in processing order, as (x is low, z is low)
const QUADRANTS: [(bool, bool); 4] = [(true, false), (false, false), (true, true), (false, true)];

impl Divider<'_> {
    /// Split a large section with a main corridor along its facing and a side
    /// corridor on each side of it, leaving four quadrants.
    ///
    /// Side corridors closer than two rooms are snapped onto the same line.
    pub(super) fn cross_macro_divide(&mut self, id: SectionId) -> Result<(), GenerationIssue> {
        let specs = self.specs;
        let (bounds, direction, inherited, lead) = {
            let s = self.tree.get(id);
            (s.bounds(), s.direction, s.corridor_offset, s.leading_room)
        };
        let corridor = specs.corridor_size;
        let wall = specs.wall_thickness;
        let vertical = direction.is_vertical();
        let (l0, l1) = bounds.lateral(vertical);
        let (d0, d1) = bounds.along(vertical);

        let main_offset = match inherited {
            Some(offset) => offset,
            None => self.place_corridor(l1 - l0, MACRO_CORRIDOR_ENTROPY),
        };
        self.check_offset(id, main_offset, l1 - l0 - corridor)?;
        let mut first = self.place_corridor(d1 - d0, MACRO_CORRIDOR_ENTROPY);
        let second = self.place_corridor(d1 - d0, MACRO_CORRIDOR_ENTROPY);
        if (first - second).abs() < specs.room_size * 2 {
            first = second;
        }
        // North/South crosses place the low side first, East/West the high side.
        let (low_offset, high_offset) = if vertical { (first, second) } else { (second, first) };
        self.mark(id, STRATEGY);

        let y = bounds.y;
        let height = bounds.height;
        let piece = |lateral: (i32, i32), along: (i32, i32)| {
            Bounds::from_axes(vertical, lateral, along, y, height)
        };
        let m_min = l0 + main_offset;
        let m_max = m_min + corridor;
        let low_lat = (l0, m_min - wall);
        let high_lat = (m_max + wall, l1);
        let low_run = (d0 + low_offset, d0 + low_offset + corridor);
        let high_run = (d0 + high_offset, d0 + high_offset + corridor);

        let main_id = self.child(
            id,
            STRATEGY,
            ChildSpec::corridor(piece((m_min, m_max), (d0, d1)), direction, lead)
                .kind(SectionKind::MacroMain),
        )?;
        let (low_facing, high_facing) = if vertical {
            (Direction::West, Direction::East)
        } else {
            (Direction::South, Direction::North)
        };
        let low_spec = ChildSpec::corridor(piece(low_lat, low_run), low_facing, Some(main_id))
            .kind(SectionKind::MacroSide);
        let high_spec = ChildSpec::corridor(piece(high_lat, high_run), high_facing, Some(main_id))
            .kind(SectionKind::MacroSide);
        let (first_spec, second_spec) = if vertical {
            (low_spec, high_spec)
        } else {
            (high_spec, low_spec)
        };
        let first_id = self.child(id, STRATEGY, first_spec)?;
        let second_id = self.child(id, STRATEGY, second_spec)?;
        let (low_side, high_side) = if vertical {
            (first_id, second_id)
        } else {
            (second_id, first_id)
        };

        let mut pending = Vec::new();
        let mut failure = None;
        for (x_low, z_low) in QUADRANTS {
            let (lat_low, along_low) = if vertical { (x_low, z_low) } else { (z_low, x_low) };
            let (lateral, run) = if lat_low { (low_lat, low_run) } else { (high_lat, high_run) };
            let along = if along_low { (d0, run.0 - wall) } else { (run.1 + wall, d1) };

            // The main corridor borders the band across the facing, the
            // side corridor the band along it.
            let side = if lat_low { low_side } else { high_side };
            let links = if vertical {
                QuadrantLinks { x_band: main_id, z_band: side }
            } else {
                QuadrantLinks { x_band: side, z_band: main_id }
            };
            let z_facing = if z_low { Direction::South } else { Direction::North };
            let x_facing = if x_low { Direction::West } else { Direction::East };
            let (primary, secondary) = if self.rng.coin() {
                (z_facing, x_facing)
            } else {
                (x_facing, z_facing)
            };

            let built = self
                .child(id, STRATEGY, ChildSpec::open(piece(lateral, along), primary, None))
                .and_then(|quadrant| self.buffer_quadrant(quadrant, primary, secondary, links));
            match built {
                Ok(children) => pending.extend(children),
                Err(issue) => {
                    failure = Some(issue);
                    break;
                }
            }
        }

        for corridor_id in [main_id, first_id, second_id] {
            self.tree.register_corridor(corridor_id);
        }
        if let Some(issue) = failure {
            return Err(issue);
        }
        for child in pending {
            self.recurse(child);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Specifications;
    use crate::geometry::{Bounds, Direction, Vec3i};
    use crate::layout::divide::{Divider, GenerationBudget};
    use crate::layout::entropy::EntropyModel;
    use crate::layout::section::DivisionType;
    use crate::rng::RandomStream;
    use strum::IntoEnumIterator;

    #[test]
    fn test_cross_layout() {
        let specs = Specifications {
            regions: Vec::new(),
            ..Specifications::default()
        };
        let world = Vec3i::new(500, 10, 500);
        for direction in Direction::iter() {
            let mut d = Divider::new(
                &specs,
                EntropyModel::new(&specs, world),
                RandomStream::new(8),
                GenerationBudget::new(1),
            );
            let root = d.tree_mut().add_root(
                Bounds::from_box(Vec3i::new(-150, 0, -150), Vec3i::new(300, 9, 300)),
                direction,
                0,
            );
            d.cross_macro_divide(root).unwrap();

            let tree = d.tree();
            let s = tree.get(root);
            assert_eq!(s.division, DivisionType::Macro);
            assert_eq!(s.children.len(), 7);

            let main = tree.get(s.children[0]);
            assert!(main.is_macro_main_corridor && main.is_corridor);
            assert_eq!(main.direction, direction);
            for side in &s.children[1..3] {
                let side = tree.get(*side);
                assert!(side.is_macro_side_corridor);
                assert_eq!(side.leading_room, Some(main.id));
                assert_ne!(side.direction.is_vertical(), direction.is_vertical());
            }
            // quadrant corridors are registered before the cross itself
            let rooms = tree.rooms();
            assert_eq!(&rooms[rooms.len() - 3..], &s.children[..3]);

            let children: Vec<_> = s.children.iter().map(|c| tree.get(*c)).collect();
            for (i, a) in children.iter().enumerate() {
                assert!(s.bounds().contains(&a.bounds()));
                for b in &children[i + 1..] {
                    assert!(!a.bounds().overlaps(&b.bounds()), "{} overlaps {}", a.id, b.id);
                }
            }
            for quadrant in &children[3..] {
                assert_eq!(quadrant.division, DivisionType::BufferedQuad);
                // created facing its primary band, the way its corridor runs
                let corridor = tree.get(quadrant.children[0]);
                assert!(corridor.is_corridor);
                assert_eq!(quadrant.direction, corridor.direction);
            }
        }
    }
}
