//! dg-core: seeded sectioned dungeon layout generation
//!
//! A dungeon floor starts as one box that is recursively divided into
//! sections: corridors, rooms and the strips and quadrants between them.
//! Every leaf gets a leading door into the section it connects to, and wall
//! segments are derived per leaf with the door openings cut out.
//!
//! Generation is deterministic for a given seed and set of
//! [`Specifications`]. Nothing here renders; the output is plain data.

pub mod config;
pub mod consts;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod rng;

pub use config::{Region, RegionHandles, Specifications};
pub use error::{ConfigError, DoorRejection, GenerationIssue};
pub use geometry::{Bounds, Direction, Span, Vec3i};
pub use layout::{
    DivisionType, Door, Dungeon, GenerationReport, Generator, Section, SectionId, SectionTree,
    Wall, generate,
};
pub use rng::RandomStream;
