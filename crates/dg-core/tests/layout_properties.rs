//! Layout properties over whole generation runs

use std::collections::HashMap;

use dg_core::layout::EntropyModel;
use dg_core::{Direction, Dungeon, Generator, Section, Specifications, Vec3i, generate};
use proptest::prelude::*;

fn scenario_specs() -> Specifications {
    Specifications {
        room_size: 8,
        corridor_size: 4,
        door_width: 3,
        door_height: 3,
        floor_height: 10,
        wall_thickness: 1,
        floor_thickness: 1,
        entropy_threshold: 0.5,
        macro_threshold: 120,
        ..Specifications::default()
    }
}

const DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::South,
    Direction::East,
    Direction::West,
];

/// Walls on the same floor and plane must not share any length of run
fn assert_no_wall_overlap(dungeon: &Dungeon) {
    let mut planes: HashMap<(i32, bool, i32), Vec<(i32, i32)>> = HashMap::new();
    for (id, wall) in dungeon.all_walls() {
        let floor = dungeon.section(id).start_floor;
        planes
            .entry((floor, wall.direction.is_vertical(), wall.plane()))
            .or_default()
            .push(wall.run());
    }
    for (key, mut runs) in planes {
        runs.sort();
        for pair in runs.windows(2) {
            assert!(
                pair[1].0 >= pair[0].1,
                "walls overlap on plane {key:?}: {:?} and {:?}",
                pair[0],
                pair[1]
            );
        }
    }
}

fn assert_doors_within_bounds(dungeon: &Dungeon) {
    let width = dungeon.specs.door_width;
    for section in dungeon.tree.iter() {
        for side in DIRECTIONS {
            let (lo, hi) = section.bounds().lateral(side.is_vertical());
            let doors = section.doors.side(side);
            let mut previous_end = i32::MIN;
            for entry in doors.iter() {
                assert!(
                    lo <= entry.offset && entry.offset + width <= hi,
                    "door at {} outside [{lo}, {hi}] on {side} of {}",
                    entry.offset,
                    section.id
                );
                assert!(entry.offset >= previous_end, "doors unsorted or overlapping");
                previous_end = entry.offset + width;
            }
        }
    }
}

fn assert_positive_walls(dungeon: &Dungeon) {
    for (id, wall) in dungeon.all_walls() {
        assert!(wall.length() > 0, "empty wall on {id}");
        assert!(wall.size.y > 0, "flat wall on {id}");
    }
}

fn assert_positive_corridors(dungeon: &Dungeon) {
    for section in dungeon.tree.iter().filter(|s| s.is_corridor) {
        let size = section.size;
        assert!(size.x > 0 && size.y > 0 && size.z > 0, "corridor {} is {size:?}", section.id);
    }
}

fn assert_leaves_disjoint(dungeon: &Dungeon) {
    let leaves: Vec<_> = dungeon.rooms().collect();
    for (i, a) in leaves.iter().enumerate() {
        for b in &leaves[i + 1..] {
            if a.start_floor == b.start_floor {
                assert!(!a.bounds().overlaps(&b.bounds()), "{} overlaps {}", a.id, b.id);
            }
        }
    }
}

/// Wall pieces a section should have: one per door lintel plus every
/// non-empty run between corners and doors
fn expected_wall_count(section: &Section, door_width: i32) -> usize {
    let mut count = 0;
    for side in DIRECTIONS {
        let (lo, hi) = section.bounds().lateral(side.is_vertical());
        let mut cursor = lo;
        for entry in section.doors.side(side).iter() {
            if entry.offset > cursor {
                count += 1;
            }
            count += 1;
            cursor = entry.offset + door_width;
        }
        if hi > cursor {
            count += 1;
        }
    }
    count
}

fn assert_tree_shape(dungeon: &Dungeon) {
    for section in dungeon.tree.iter() {
        assert!(!(section.is_room && !section.children.is_empty()));
        for child in &section.children {
            let c = dungeon.section(*child);
            assert_eq!(c.parent, Some(section.id));
            assert!(section.bounds().contains(&c.bounds()));
        }
        if let Some(lead) = section.leading_room {
            assert!(dungeon.section(lead).is_corridor);
        }
    }
}

#[test]
fn test_scenario_layout() {
    let specs = scenario_specs();
    let world = Vec3i::new(500, 10, 500);
    let dungeon = generate(world, &specs, 42, Direction::North).unwrap();

    assert_eq!(dungeon.seed, 42);
    assert!(dungeon.rooms().any(|s| s.is_room));
    assert!(!dungeon.doors.is_empty());

    let model = EntropyModel::new(&specs, world);
    let minimum = specs.minimum_section_size();
    for room in dungeon.rooms().filter(|s| s.is_room) {
        assert!(!room.can_divide(minimum) || model.entropy(room.size) < 0.05);
    }

    assert_no_wall_overlap(&dungeon);
    assert_doors_within_bounds(&dungeon);
    assert_positive_walls(&dungeon);
    assert_positive_corridors(&dungeon);
    assert_leaves_disjoint(&dungeon);
    assert_tree_shape(&dungeon);
}

#[test]
fn test_scenario_uses_macro_cross() {
    let dungeon = generate(Vec3i::new(500, 10, 500), &scenario_specs(), 42, Direction::North).unwrap();
    let root = dungeon.section(dungeon.floors()[0]);
    assert_eq!(root.division, dg_core::DivisionType::Macro);
    assert_eq!(
        dungeon.tree.iter().filter(|s| s.is_macro_main_corridor).count(),
        dungeon
            .tree
            .iter()
            .filter(|s| s.division == dg_core::DivisionType::Macro)
            .count()
    );
}

#[test]
fn test_same_seed_same_dungeon() {
    let specs = scenario_specs();
    let world = Vec3i::new(500, 10, 500);
    let a = generate(world, &specs, 42, Direction::North).unwrap();
    let b = generate(world, &specs, 42, Direction::North).unwrap();
    assert_eq!(
        serde_json::to_string(&a.tree).unwrap(),
        serde_json::to_string(&b.tree).unwrap()
    );
    assert_eq!(a.doors, b.doors);
    assert_eq!(a.report, b.report);

    let c = generate(world, &specs, 43, Direction::North).unwrap();
    assert_ne!(
        serde_json::to_string(&a.tree).unwrap(),
        serde_json::to_string(&c.tree).unwrap()
    );
}

#[test]
fn test_floors_are_independent() {
    let specs = scenario_specs();
    let dungeon = generate(Vec3i::new(240, 30, 180), &specs, 9, Direction::West).unwrap();
    assert_eq!(dungeon.floors().len(), 3);
    for (floor, root) in dungeon.floors().iter().enumerate() {
        let leaves: Vec<_> = dungeon
            .rooms()
            .filter(|s| s.start_floor == floor as i32)
            .collect();
        assert!(!leaves.is_empty());
        assert!(leaves.iter().all(|s| s.position.y == dungeon.section(*root).position.y));
    }
    assert_no_wall_overlap(&dungeon);
    assert_leaves_disjoint(&dungeon);
}

#[test]
fn test_budget_terminates_run() {
    let dungeon = Generator::new(scenario_specs())
        .with_call_budget(50)
        .generate(Vec3i::new(500, 10, 500), 42, Direction::North)
        .unwrap();
    assert!(dungeon.report.budget_exhausted());
    // refused sections are neither rooms nor split
    assert_doors_within_bounds(&dungeon);
    assert_no_wall_overlap(&dungeon);
}

#[test]
fn test_low_macro_threshold_keeps_children_inside() {
    let specs = Specifications {
        room_size: 3,
        corridor_size: 7,
        wall_thickness: 3,
        door_width: 3,
        macro_threshold: 40,
        entropy_threshold: 0.1,
        ..Specifications::default()
    };
    let world = Vec3i::new(243, 10, 181);
    assert!(specs.validate(world).is_ok());
    let dungeon = generate(world, &specs, 3, Direction::East).unwrap();

    assert_tree_shape(&dungeon);
    assert_leaves_disjoint(&dungeon);
    assert_no_wall_overlap(&dungeon);
    assert_doors_within_bounds(&dungeon);
}

fn layout_specs() -> impl Strategy<Value = Specifications> {
    (3i32..10, 3i32..9, 1i32..4, 40i32..200, 0.1f32..0.9)
        .prop_flat_map(|(room, corridor, wall, macro_threshold, threshold)| {
            (1i32..=corridor).prop_map(move |door| Specifications {
                room_size: room,
                corridor_size: corridor,
                door_width: door,
                wall_thickness: wall,
                macro_threshold,
                entropy_threshold: threshold,
                ..scenario_specs()
            })
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_layout_is_sound(
        specs in layout_specs(),
        seed in 1u64..u64::MAX,
        x in 40i32..300,
        z in 40i32..300,
        facing in 0usize..4,
    ) {
        let world = Vec3i::new(x, 10, z);
        prop_assume!(specs.validate(world).is_ok());
        let dungeon = generate(world, &specs, seed, DIRECTIONS[facing]).unwrap();

        prop_assert!(dungeon.rooms().count() > 0);
        let report = &dungeon.report;
        prop_assert!(report.calls - report.exhausted_calls < report.call_budget);
        assert_no_wall_overlap(&dungeon);
        assert_doors_within_bounds(&dungeon);
        assert_positive_walls(&dungeon);
        assert_positive_corridors(&dungeon);
        assert_leaves_disjoint(&dungeon);
        assert_tree_shape(&dungeon);
    }

    #[test]
    fn prop_wall_count_matches_doors(
        specs in layout_specs(),
        seed in 1u64..u64::MAX,
        facing in 0usize..4,
    ) {
        let world = Vec3i::new(160, 10, 160);
        prop_assume!(specs.validate(world).is_ok());
        let dungeon = generate(world, &specs, seed, DIRECTIONS[facing]).unwrap();
        for leaf in dungeon.rooms() {
            let walls = dungeon.walls(leaf.id);
            prop_assert_eq!(walls.len(), expected_wall_count(leaf, specs.door_width));
            prop_assert!(walls.len() <= 4 + 2 * leaf.door_count());
        }
    }
}
