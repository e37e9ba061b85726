//! R2INT - radius-2 isotropic cellular automata on an unbounded plane.
//!
//! The plane is stored as a sparse map of 64x64 chunks around a shared
//! background ("void") state, so rules with B0 work without allocating
//! infinite space. Rules are a table of 2^25 transitions indexed by the 5x5
//! neighborhood of each cell.
//!
//! # Module Organization
//!
//! - `automaton`: Simulation core (neighborhoods, rules, chunks, world, stepping)
//! - `state`: The `Session` a front end drives (rules + world + replay + clock)
//! - `editor`: Headless rule editor
//! - `rulefile`: The `.r2int` rule file format
//! - `config`: TOML configuration
//! - `ffi`: C ABI functions for external renderers
//! - `tests`: Crate-level FFI tests

pub mod automaton;
pub mod config;
pub mod editor;
pub mod error;
pub mod ffi;
pub mod rulefile;
pub mod state;


pub use automaton::{Cell, ChunkCoord, Neighborhood, Rect, RuleTable, StepReport, World};
pub use config::AutomatonConfig;
pub use editor::RuleEditor;
pub use error::{Error, Result};
pub use state::Session;
