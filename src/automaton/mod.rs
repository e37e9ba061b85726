//! Core automaton logic: neighborhoods, rule tables, chunks and the world.
//!
//! Nothing in here knows about sessions, files or the C ABI. The FFI layer
//! in `ffi/` and the [`crate::state::Session`] call into these types.

pub mod chunk;
pub mod neighborhood;
pub mod pattern;
pub mod region;
pub mod rule;
pub mod stepping;
pub mod symmetry;
pub mod world;

pub use chunk::{Chunk, ChunkCoord, CHUNK_SIZE};
pub use neighborhood::{Cell, Neighborhood, CENTER, NEIGHBORHOOD_CELLS, RULE_SPACE};
pub use pattern::{random_fill, RandomFill, Shape, Symmetry};
pub use region::{extract_region, import_region, Rect};
pub use rule::RuleTable;
pub use stepping::{Stepper, TickClock};
pub use symmetry::{is_canonical, lowest_canonical_index, symmetry_orbit, symmetry_variants};
pub use world::{StepReport, World};
