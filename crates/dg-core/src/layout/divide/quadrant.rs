//! Buffered quadrants of a macro cross
//!
//! A quadrant keeps a main room in the corner away from the cross and wraps
//! it with two bands along the corridors it borders. The primary band holds
//! the quadrant corridor between two buffered flanks; the secondary band is
//! buffered along the main room.

use super::Divider;
use crate::consts::{MACRO_CORRIDOR_ENTROPY, QUADRANT_BAND_FRACTION};
use crate::error::GenerationIssue;
use crate::geometry::{Bounds, Direction, floor_to_int};
use crate::layout::section::{DivisionType, SectionId};
use crate::layout::tree::ChildSpec;

const STRATEGY: DivisionType = DivisionType::BufferedQuad;

/// Macro corridors bordering a quadrant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct QuadrantLinks {
    /// Corridor next to the band cut along the x axis
    pub x_band: SectionId,
    /// Corridor next to the band cut along the z axis
    pub z_band: SectionId,
}

/// Where the two bands of a quadrant sit.
///
/// A band facing North or East is entered from the minimum side, so it lies
/// at the quadrant's minimum edge and pushes the main room toward the
/// maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct QuadrantFrame {
    pub x_band_low: bool,
    pub z_band_low: bool,
}

/// Band placement for every perpendicular (primary, secondary) pair.
pub(super) fn quadrant_frame(primary: Direction, secondary: Direction) -> Option<QuadrantFrame> {
    use Direction::{East, North, South, West};

    let (x_band_low, z_band_low) = match (primary, secondary) {
        (North, West) | (West, North) => (false, true),
        (North, East) | (East, North) => (true, true),
        (South, West) | (West, South) => (false, false),
        (South, East) | (East, South) => (true, false),
        _ => return None,
    };
    Some(QuadrantFrame {
        x_band_low,
        z_band_low,
    })
}

fn band(low: bool, (min, max): (i32, i32), offset: i32, wall: i32) -> (i32, i32) {
    if low {
        (min, min + offset - wall)
    } else {
        (max - offset + wall, max)
    }
}

fn main_room(low: bool, (min, max): (i32, i32), offset: i32) -> (i32, i32) {
    if low { (min + offset, max) } else { (min, max - offset) }
}

impl Divider<'_> {
    /// Partition a quadrant into its main room, bands and corridor.
    ///
    /// Returns the pieces that still need to recurse, main room first, then
    /// the secondary strips and the primary band's flank strips.
    pub(super) fn buffer_quadrant(
        &mut self,
        id: SectionId,
        primary: Direction,
        secondary: Direction,
        links: QuadrantLinks,
    ) -> Result<Vec<SectionId>, GenerationIssue> {
        let frame = quadrant_frame(primary, secondary).ok_or(GenerationIssue::InvalidQuadrantPair {
            section: id,
            call: self.budget.calls(),
            primary,
            secondary,
        })?;
        let specs = self.specs;
        let wall = specs.wall_thickness;
        let corridor = specs.corridor_size;
        let min_band = specs.room_size + wall;

        let bounds = self.tree.get(id).bounds();
        let size = bounds.size();
        let x_off = floor_to_int(size.x as f32 * QUADRANT_BAND_FRACTION).max(min_band);
        let z_off = floor_to_int(size.z as f32 * QUADRANT_BAND_FRACTION).max(min_band);
        let full_x = (bounds.min_x, bounds.max_x);
        let full_z = (bounds.min_z, bounds.max_z);

        let main_x = main_room(frame.x_band_low, full_x, x_off);
        let main_z = main_room(frame.z_band_low, full_z, z_off);
        let x_band = band(frame.x_band_low, full_x, x_off, wall);
        let z_band = band(frame.z_band_low, full_z, z_off, wall);

        self.mark(id, STRATEGY);

        let y = bounds.y;
        let height = bounds.height;
        let xz = |x: (i32, i32), z: (i32, i32)| Bounds::from_axes(true, x, z, y, height);
        let main_bounds = xz(main_x, main_z);
        self.check_bounds(id, STRATEGY, main_bounds)?;

        // The primary band spans the whole quadrant across its facing; the
        // secondary band only spans the main room.
        let primary_vertical = primary.is_vertical();
        let (secondary_bounds, primary_band, full_lateral, main_lateral, primary_link, secondary_link) =
            if primary_vertical {
                (xz(x_band, main_z), z_band, full_x, main_x, links.z_band, links.x_band)
            } else {
                (xz(main_x, z_band), x_band, full_z, main_z, links.x_band, links.z_band)
            };

        let cut = self.place_corridor(main_lateral.1 - main_lateral.0, MACRO_CORRIDOR_ENTROPY);
        let c_min = main_lateral.0 + cut;
        let c_max = c_min + corridor;
        let piece = |lateral: (i32, i32)| {
            Bounds::from_axes(primary_vertical, lateral, primary_band, y, height)
        };
        let low_flank = piece((full_lateral.0, c_min - wall));
        let high_flank = piece((c_max + wall, full_lateral.1));
        let (right_flank, left_flank) = if primary_vertical {
            (high_flank, low_flank)
        } else {
            (low_flank, high_flank)
        };

        let corridor_id = self.child(
            id,
            STRATEGY,
            ChildSpec::corridor(piece((c_min, c_max)), primary, Some(primary_link)),
        )?;
        self.tree.register_corridor(corridor_id);
        let main_id = self.child(
            id,
            STRATEGY,
            ChildSpec::open(main_bounds, primary, Some(corridor_id)).corridor_offset(Some(cut)),
        )?;

        let mut pending = vec![main_id];
        pending.extend(self.add_strips(id, STRATEGY, secondary_bounds, secondary, 0.0, Some(secondary_link))?);
        pending.extend(self.add_strips(id, STRATEGY, right_flank, primary, 0.0, Some(primary_link))?);
        pending.extend(self.add_strips(id, STRATEGY, left_flank, primary, 0.0, Some(primary_link))?);
        Ok(pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Specifications;
    use crate::geometry::Vec3i;
    use crate::layout::divide::GenerationBudget;
    use crate::layout::door::leading_door;
    use crate::layout::entropy::EntropyModel;
    use crate::rng::RandomStream;
    use strum::IntoEnumIterator;

    #[test]
    fn test_frame_table_covers_perpendicular_pairs() {
        for primary in Direction::iter() {
            for secondary in Direction::iter() {
                let frame = quadrant_frame(primary, secondary);
                assert_eq!(frame.is_some(), primary.is_vertical() != secondary.is_vertical());
                if let Some(f) = frame {
                    let pair = [primary, secondary];
                    assert_eq!(f.x_band_low, pair.contains(&Direction::East));
                    assert_eq!(f.z_band_low, pair.contains(&Direction::North));
                    assert_eq!(quadrant_frame(secondary, primary), frame);
                }
            }
        }
    }

    #[test]
    fn test_main_room_door_lands_in_quadrant_corridor() {
        let specs = Specifications {
            regions: Vec::new(),
            ..Specifications::default()
        };
        let world = Vec3i::new(500, 10, 500);
        for primary in Direction::iter() {
            for secondary in [primary.clockwise(), primary.counter_clockwise()] {
                let mut d = Divider::new(
                    &specs,
                    EntropyModel::new(&specs, world),
                    RandomStream::new(21),
                    GenerationBudget::new(10),
                );
                let tree = d.tree_mut();
                let cross = tree.add_root(Bounds::from_box(Vec3i::ZERO, Vec3i::new(4, 9, 4)), primary, 0);
                let quad = tree.add_root(
                    Bounds::from_box(Vec3i::new(10, 0, 10), Vec3i::new(90, 9, 70)),
                    primary,
                    0,
                );
                let links = QuadrantLinks {
                    x_band: cross,
                    z_band: cross,
                };
                let pending = d.buffer_quadrant(quad, primary, secondary, links).unwrap();

                let tree = d.tree();
                let quadrant = tree.get(quad);
                let main = tree.get(pending[0]);
                let corridor = tree.get(quadrant.children[0]);
                assert!(corridor.is_corridor);
                assert_eq!(main.leading_room, Some(corridor.id));

                let door = leading_door(main, &specs);
                let (lo, hi) = corridor.bounds().lateral(primary.is_vertical());
                let along = door.offset_along(primary);
                assert!(lo <= along && along + specs.door_width <= hi, "{primary}/{secondary}");

                let children: Vec<_> = quadrant.children.iter().map(|c| tree.get(*c)).collect();
                for (i, a) in children.iter().enumerate() {
                    assert!(quadrant.bounds().contains(&a.bounds()));
                    for b in &children[i + 1..] {
                        assert!(!a.bounds().overlaps(&b.bounds()));
                    }
                }
            }
        }
    }

    #[test]
    fn test_narrow_quadrant_never_escapes() {
        // the main room comes out narrower than a corridor
        let specs = Specifications {
            room_size: 3,
            corridor_size: 7,
            wall_thickness: 3,
            door_width: 3,
            regions: Vec::new(),
            ..Specifications::default()
        };
        let world = Vec3i::new(243, 10, 181);
        let mut rejected = 0;
        for seed in 0..20 {
            for primary in Direction::iter() {
                for secondary in [primary.clockwise(), primary.counter_clockwise()] {
                    let mut d = Divider::new(
                        &specs,
                        EntropyModel::new(&specs, world),
                        RandomStream::new(seed),
                        GenerationBudget::new(10),
                    );
                    let tree = d.tree_mut();
                    let cross = tree.add_root(Bounds::from_box(Vec3i::ZERO, Vec3i::new(7, 9, 7)), primary, 0);
                    let quad = tree.add_root(
                        Bounds::from_box(Vec3i::new(20, 0, 20), Vec3i::new(10, 9, 10)),
                        primary,
                        0,
                    );
                    let links = QuadrantLinks {
                        x_band: cross,
                        z_band: cross,
                    };
                    let result = d.buffer_quadrant(quad, primary, secondary, links);
                    if let Err(issue) = &result {
                        assert!(matches!(issue, GenerationIssue::DegenerateGeometry { .. }));
                        rejected += 1;
                    }

                    let tree = d.tree();
                    let quadrant = tree.get(quad);
                    let children: Vec<_> = quadrant.children.iter().map(|c| tree.get(*c)).collect();
                    for (i, a) in children.iter().enumerate() {
                        assert!(quadrant.bounds().contains(&a.bounds()), "{} escaped", a.id);
                        for b in &children[i + 1..] {
                            assert!(!a.bounds().overlaps(&b.bounds()));
                        }
                    }
                }
            }
        }
        assert!(rejected > 0);
    }
}
