//! C FFI layer for external renderers and front ends.
//!
//! This module exports C ABI functions over an opaque [`crate::state::Session`]
//! handle. All functions are marked with `#[no_mangle]` and use `extern "C"`.
//!
//! The actual logic is in the `automaton` module and the session. These
//! functions are thin wrappers that handle null checks, pointer safety, and
//! C-to-Rust conversions.

pub mod grid;
pub mod lifecycle;
pub mod region;
pub mod rule;

pub use grid::{
    r2_bounding_box, r2_chunk_count, r2_get_cell, r2_get_previous_cell, r2_paint_cell, r2_step,
    r2_void_state,
};
pub use lifecycle::{r2_create, r2_destroy, r2_get_generation, r2_reset};
pub use region::{r2_extract_region, r2_import_region};
pub use rule::{r2_rule_clear, r2_rule_get, r2_rule_load, r2_rule_toggle_isotropic};
