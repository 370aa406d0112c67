//! Recursive space division
//!
//! [`Divider::subdivide`] decides for one section whether it becomes a room
//! or is split, and recurses into the pieces. Splits come in five shapes:
//!
//! - three-way: a corridor along the facing with a flank on each side and,
//!   for deep sections, an end section past the corridor
//! - buffer: equal strips across the facing
//! - broom: a corridor slice followed by buffered strips
//! - macro cross: a main corridor, two side corridors and four quadrants
//! - buffered quadrant: a main room wrapped by two buffered bands, one of
//!   which holds the quadrant corridor
//!
//! All state of a run lives in the divider: the section arena, the random
//! stream, the call budget and the issue log.

mod broom;
mod buffer;
mod cross;
mod quadrant;
mod three_section;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::entropy::EntropyModel;
use super::region::roll_region;
use super::section::{DivisionType, SectionId};
use super::tree::{ChildSpec, SectionTree};
use crate::config::Specifications;
use crate::error::GenerationIssue;
use crate::geometry::{Bounds, lerp, round_to_int};
use crate::rng::RandomStream;

/// Cap on the number of `subdivide` calls in one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationBudget {
    cap: u64,
    calls: u64,
    exhausted: u64,
}

impl GenerationBudget {
    pub fn new(cap: u64) -> Self {
        Self {
            cap,
            calls: 0,
            exhausted: 0,
        }
    }

    pub fn cap(&self) -> u64 {
        self.cap
    }

    /// Calls made so far, including refused ones
    pub fn calls(&self) -> u64 {
        self.calls
    }

    /// Calls refused because the cap was reached
    pub fn exhausted_calls(&self) -> u64 {
        self.exhausted
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted > 0
    }

    /// Count a call. Returns false once the cap is reached.
    fn charge(&mut self) -> bool {
        self.calls += 1;
        if self.calls >= self.cap {
            self.exhausted += 1;
            return false;
        }
        true
    }
}

/// Result of one `subdivide` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The section became a room
    Terminal,
    Divided(DivisionType),
    /// The call budget ran out before the section was looked at
    BudgetExhausted,
}

/// Recursive divider over a section arena
#[derive(Debug)]
pub struct Divider<'a> {
    specs: &'a Specifications,
    model: EntropyModel,
    pub(crate) tree: SectionTree,
    pub(crate) rng: RandomStream,
    pub(crate) budget: GenerationBudget,
    pub(crate) issues: Vec<GenerationIssue>,
}

impl<'a> Divider<'a> {
    pub fn new(
        specs: &'a Specifications,
        model: EntropyModel,
        rng: RandomStream,
        budget: GenerationBudget,
    ) -> Self {
        Self {
            specs,
            model,
            tree: SectionTree::new(),
            rng,
            budget,
            issues: Vec::new(),
        }
    }

    pub fn tree(&self) -> &SectionTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut SectionTree {
        &mut self.tree
    }

    pub fn budget(&self) -> &GenerationBudget {
        &self.budget
    }

    pub fn issues(&self) -> &[GenerationIssue] {
        &self.issues
    }

    /// Decide the fate of one section and recurse into its pieces.
    ///
    /// Errors describe the first geometric problem hit while splitting; the
    /// pieces built before it stay in the tree.
    pub fn subdivide(&mut self, id: SectionId) -> Result<Outcome, GenerationIssue> {
        if !self.budget.charge() {
            warn!(section = %id, calls = self.budget.calls(), "call budget exhausted");
            return Ok(Outcome::BudgetExhausted);
        }

        let specs = self.specs;
        let size = self.tree.get(id).size;
        let entropy = self.model.entropy(size);
        let stop_early = self.model.low_entropy_roll(entropy, &mut self.rng);
        if let Err(issue) = roll_region(
            self.tree.get_mut(id),
            entropy,
            &specs.regions,
            &mut self.rng,
        ) {
            self.record(issue);
        }

        let can_divide = self.tree.get(id).can_divide(specs.minimum_section_size());
        if stop_early || !can_divide {
            trace!(section = %id, entropy, stop_early, "room");
            self.tree.register_room(id);
            return Ok(Outcome::Terminal);
        }

        if size.x.min(size.z) > specs.macro_threshold {
            debug!(section = %id, entropy, "macro cross");
            self.cross_macro_divide(id)?;
            Ok(Outcome::Divided(DivisionType::Macro))
        } else {
            trace!(section = %id, entropy, "three-way split");
            self.three_section_divide(id, entropy)?;
            Ok(Outcome::Divided(DivisionType::ThreeSection))
        }
    }

    /// Subdivide and record any issue instead of returning it
    pub fn recurse(&mut self, id: SectionId) {
        if let Err(issue) = self.subdivide(id) {
            self.record(issue);
        }
    }

    fn record(&mut self, issue: GenerationIssue) {
        warn!(call = self.budget.calls(), section = %issue.section(), %issue, "generation issue");
        self.issues.push(issue);
    }

    /// Lateral offset of a corridor inside a span of `width`.
    ///
    /// Zero entropy centers it; full entropy uses a random offset that
    /// leaves room for a room and a wall on both sides.
    fn place_corridor(&mut self, width: i32, entropy: f32) -> i32 {
        let specs = self.specs;
        let min = specs.room_size + specs.wall_thickness;
        let max = width - specs.room_size - specs.wall_thickness - specs.corridor_size;
        let random = self.rng.range_i32(min, max);
        let centered = width / 2 - specs.corridor_size / 2;
        round_to_int(lerp(centered as f32, random as f32, entropy))
    }

    fn check_offset(&self, id: SectionId, offset: i32, max: i32) -> Result<(), GenerationIssue> {
        if offset < 0 || offset > max {
            return Err(GenerationIssue::CorridorOffsetOutOfRange {
                section: id,
                call: self.budget.calls(),
                offset,
                max,
            });
        }
        Ok(())
    }

    fn check_bounds(
        &self,
        parent: SectionId,
        strategy: DivisionType,
        bounds: Bounds,
    ) -> Result<(), GenerationIssue> {
        if bounds.is_degenerate() {
            return Err(GenerationIssue::DegenerateGeometry {
                section: parent,
                call: self.budget.calls(),
                strategy,
                bounds,
            });
        }
        Ok(())
    }

    /// Create a child after checking its box is non-empty and inside the
    /// parent
    fn child(
        &mut self,
        parent: SectionId,
        strategy: DivisionType,
        spec: ChildSpec,
    ) -> Result<SectionId, GenerationIssue> {
        self.check_bounds(parent, strategy, spec.bounds)?;
        if !self.tree.get(parent).bounds().contains(&spec.bounds) {
            return Err(GenerationIssue::DegenerateGeometry {
                section: parent,
                call: self.budget.calls(),
                strategy,
                bounds: spec.bounds,
            });
        }
        Ok(self.tree.add_child(parent, spec))
    }

    fn mark(&mut self, id: SectionId, division: DivisionType) {
        let section = self.tree.get_mut(id);
        debug_assert_eq!(section.division, DivisionType::None, "section {id} split twice");
        if section.division == DivisionType::None {
            section.division = division;
        }
    }
}
