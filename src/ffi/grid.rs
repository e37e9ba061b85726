//! Cell access, stepping, and world queries.

use crate::state::Session;

/// Paints a cell. States at or above the session's state count are clamped.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Session, or null
///
/// # Returns
/// 0 on success, 1 on failure (null pointer)
#[no_mangle]
pub unsafe extern "C" fn r2_paint_cell(ptr: *mut Session, x: i32, y: i32, state: u8) -> i32 {
    if ptr.is_null() {
        return 1;
    }

    (*ptr).paint(x, y, state);
    0
}

/// Gets the current state of a cell. Unallocated space reads as the void state.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Session, or null
///
/// # Returns
/// The cell state, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn r2_get_cell(ptr: *const Session, x: i32, y: i32) -> u8 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).world().cell_at(x, y)
}

/// Gets the previous-generation state of a cell.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Session, or null
///
/// # Returns
/// The cell state, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn r2_get_previous_cell(ptr: *const Session, x: i32, y: i32) -> u8 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).world().previous_cell_at(x, y)
}

/// Advances the world by `generations` steps.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Session, or null
///
/// # Returns
/// 0 on success, 1 on failure (null pointer)
#[no_mangle]
pub unsafe extern "C" fn r2_step(ptr: *mut Session, generations: u32) -> i32 {
    if ptr.is_null() {
        return 1;
    }

    let session = &mut *ptr;
    for _ in 0..generations {
        session.step();
    }
    0
}

/// Gets the state of all unallocated space.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Session, or null
#[no_mangle]
pub unsafe extern "C" fn r2_void_state(ptr: *const Session) -> u8 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).world().void_state()
}

/// Gets the number of allocated chunks.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Session, or null
#[no_mangle]
pub unsafe extern "C" fn r2_chunk_count(ptr: *const Session) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).world().chunk_count() as u64
}

/// Writes the bounding box of all non-background cells as
/// `[x, y, width, height]`.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Session, or null
/// - `out_rect` must point to at least 4 writable `i32`s, or be null
///
/// # Returns
/// 1 if a box was written, 0 if the world is empty or a pointer is null.
#[no_mangle]
pub unsafe extern "C" fn r2_bounding_box(ptr: *const Session, out_rect: *mut i32) -> i32 {
    if ptr.is_null() || out_rect.is_null() {
        return 0;
    }

    match (*ptr).world().bounding_box() {
        Some(rect) => {
            let out = std::slice::from_raw_parts_mut(out_rect, 4);
            out.copy_from_slice(&[rect.x, rect.y, rect.width, rect.height]);
            1
        }
        None => 0,
    }
}
