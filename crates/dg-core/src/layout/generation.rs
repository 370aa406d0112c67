//! Generation entry point
//!
//! Validates the specifications, divides one root per floor, settles
//! regions and derives doors.

use serde::Serialize;
use tracing::info;

use super::divide::{Divider, GenerationBudget};
use super::door::{Door, derive_doors};
use super::entropy::EntropyModel;
use super::region::settle_regions;
use super::section::{Section, SectionId};
use super::tree::SectionTree;
use super::wall::Wall;
use crate::config::{Region, Specifications};
use crate::consts::DEFAULT_CALL_BUDGET;
use crate::error::{ConfigError, GenerationIssue};
use crate::geometry::{Bounds, Direction, Vec3i};
use crate::rng::RandomStream;

/// Diagnostics collected over a run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerationReport {
    pub calls: u64,
    pub call_budget: u64,
    /// Calls refused after the budget ran out
    pub exhausted_calls: u64,
    pub rng_draws: u64,
    pub issues: Vec<GenerationIssue>,
}

impl GenerationReport {
    pub fn budget_exhausted(&self) -> bool {
        self.exhausted_calls > 0
    }
}

/// A generated dungeon
#[derive(Debug, Clone, Serialize)]
pub struct Dungeon {
    /// Seed actually used, after resolving 0
    pub seed: u64,
    pub world: Vec3i,
    pub start_direction: Direction,
    pub specs: Specifications,
    pub tree: SectionTree,
    /// Doors accepted by their own leaf, in registration order
    pub doors: Vec<Door>,
    pub report: GenerationReport,
}

impl Dungeon {
    pub fn section(&self, id: SectionId) -> &Section {
        self.tree.get(id)
    }

    /// Root section of each floor
    pub fn floors(&self) -> &[SectionId] {
        self.tree.floors()
    }

    /// Registered leaves, rooms and corridors alike
    pub fn rooms(&self) -> impl Iterator<Item = &Section> {
        self.tree.leaves()
    }

    pub fn walls(&self, id: SectionId) -> Vec<Wall> {
        self.section(id)
            .walls(self.specs.door_height, self.specs.door_width)
    }

    /// Walls of every leaf, tagged with their section
    pub fn all_walls(&self) -> Vec<(SectionId, Wall)> {
        self.tree
            .rooms()
            .iter()
            .flat_map(|id| self.walls(*id).into_iter().map(move |w| (*id, w)))
            .collect()
    }

    pub fn region(&self, id: SectionId) -> Option<&Region> {
        self.section(id)
            .region_index
            .and_then(|i| self.specs.regions.get(i))
    }
}

/// Resolve a requested seed; 0 picks one from the wall clock
pub fn resolve_seed(seed: u64) -> u64 {
    if seed != 0 {
        return seed;
    }
    let millis = chrono::Utc::now().timestamp_millis().unsigned_abs();
    millis.max(1)
}

/// Dungeon generator with a configurable call budget
#[derive(Debug, Clone)]
pub struct Generator {
    specs: Specifications,
    call_budget: u64,
}

impl Generator {
    pub fn new(specs: Specifications) -> Self {
        Self {
            specs,
            call_budget: DEFAULT_CALL_BUDGET,
        }
    }

    pub fn with_call_budget(mut self, call_budget: u64) -> Self {
        self.call_budget = call_budget;
        self
    }

    pub fn specs(&self) -> &Specifications {
        &self.specs
    }

    /// Generate a dungeon filling `world`.
    ///
    /// Configuration errors are returned before any work is done. Problems
    /// inside the run are recorded in the report instead.
    pub fn generate(
        &self,
        world: Vec3i,
        seed: u64,
        start_direction: Direction,
    ) -> Result<Dungeon, ConfigError> {
        let specs = &self.specs;
        specs.validate(world)?;
        let seed = resolve_seed(seed);
        let floors = specs.floor_count(world);
        info!(seed, ?world, %start_direction, floors, "generating dungeon");

        let model = EntropyModel::new(specs, world);
        let mut divider = Divider::new(
            specs,
            model,
            RandomStream::new(seed),
            GenerationBudget::new(self.call_budget),
        );
        for floor in 0..floors {
            let position = Vec3i::new(-world.x / 2, floor * specs.floor_height, -world.z / 2);
            let size = Vec3i::new(world.x, specs.usable_floor_height(), world.z);
            let root = divider
                .tree
                .add_root(Bounds::from_box(position, size), start_direction, floor);
            divider.recurse(root);
        }

        let Divider {
            mut tree,
            mut rng,
            budget,
            mut issues,
            ..
        } = divider;
        issues.extend(settle_regions(&mut tree, &model, &specs.regions, &mut rng));
        let doors = derive_doors(&mut tree, specs, &mut issues);

        let report = GenerationReport {
            calls: budget.calls(),
            call_budget: budget.cap(),
            exhausted_calls: budget.exhausted_calls(),
            rng_draws: rng.draws(),
            issues,
        };
        info!(
            seed,
            sections = tree.len(),
            leaves = tree.rooms().len(),
            doors = doors.len(),
            calls = report.calls,
            issues = report.issues.len(),
            "dungeon generated"
        );

        Ok(Dungeon {
            seed,
            world,
            start_direction,
            specs: specs.clone(),
            tree,
            doors,
            report,
        })
    }
}

/// Generate with the default call budget
pub fn generate(
    world: Vec3i,
    specs: &Specifications,
    seed: u64,
    start_direction: Direction,
) -> Result<Dungeon, ConfigError> {
    Generator::new(specs.clone()).generate(world, seed, start_direction)
}
