//! Dungeon layout: the section tree and everything derived from it

pub mod divide;
pub mod door;
pub mod entropy;
pub mod generation;
pub mod region;
pub mod section;
pub mod tree;
pub mod wall;

pub use divide::{Divider, GenerationBudget, Outcome};
pub use door::{Door, DoorList, DoorOffset, SideDoors, derive_doors, leading_door};
pub use entropy::EntropyModel;
pub use generation::{Dungeon, GenerationReport, Generator, generate, resolve_seed};
pub use region::{roll_region, settle_regions};
pub use section::{DivisionType, Section, SectionId};
pub use tree::SectionTree;
pub use wall::{Wall, section_walls};
