//! Rule table queries and edits.

use std::ffi::{c_char, CStr};

use crate::automaton::neighborhood::{Neighborhood, NEIGHBORHOOD_CELLS};
use crate::state::Session;

/// Gets the rule outcome for a packed neighborhood index.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Session, or null
///
/// # Returns
/// 1 if the transition is on, 0 if off, out of range, or ptr is null.
#[no_mangle]
pub unsafe extern "C" fn r2_rule_get(ptr: *const Session, index: u64) -> u8 {
    if ptr.is_null() {
        return 0;
    }
    u8::from((*ptr).rules().get(index))
}

/// Flips the transition of a 25-cell neighborhood across its symmetry orbit.
/// Playback is paused.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Session, or null
/// - `cells` must point to 25 bytes in row-major order, or be null
///
/// # Returns
/// 0 on success, 1 on failure (null pointer)
#[no_mangle]
pub unsafe extern "C" fn r2_rule_toggle_isotropic(ptr: *mut Session, cells: *const u8) -> i32 {
    if ptr.is_null() || cells.is_null() {
        return 1;
    }

    let mut packed = [0u8; NEIGHBORHOOD_CELLS];
    packed.copy_from_slice(std::slice::from_raw_parts(cells, NEIGHBORHOOD_CELLS));
    let n = Neighborhood::new(packed);
    (*ptr).edit_rules(|rules| rules.toggle_isotropic(&n));
    0
}

/// Turns every transition off.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Session, or null
///
/// # Returns
/// 0 on success, 1 on failure (null pointer)
#[no_mangle]
pub unsafe extern "C" fn r2_rule_clear(ptr: *mut Session) -> i32 {
    if ptr.is_null() {
        return 1;
    }
    (*ptr).edit_rules(|rules| rules.clear());
    0
}

/// Replaces the rules with the contents of an `.r2int` file.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Session, or null
/// - `path` must be a NUL-terminated UTF-8 string, or null
///
/// # Returns
/// Number of rule lines loaded, or -1 on error. The rules are left unchanged on error.
#[no_mangle]
pub unsafe extern "C" fn r2_rule_load(ptr: *mut Session, path: *const c_char) -> i64 {
    if ptr.is_null() || path.is_null() {
        return -1;
    }

    let path = match CStr::from_ptr(path).to_str() {
        Ok(path) => path,
        Err(_) => return -1,
    };

    match (*ptr).load_rules(path) {
        Ok(report) => report.loaded as i64,
        Err(err) => {
            tracing::warn!("r2_rule_load failed: {err}");
            -1
        }
    }
}
