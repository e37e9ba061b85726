//! Session creation, destruction, and generation queries.

use crate::config::AutomatonConfig;
use crate::state::Session;

/// Creates a new session with the default configuration (Game of Life rules
/// over the radius-1 ring) and returns an opaque pointer.
///
/// # Returns
/// A pointer to a new Session, or null if the worker pool could not be built.
///
/// # Safety
/// The returned pointer must eventually be freed with `r2_destroy()`.
#[no_mangle]
pub extern "C" fn r2_create(threads: u32) -> *mut Session {
    let config = AutomatonConfig {
        threads: threads as usize,
        ..AutomatonConfig::default()
    };
    match Session::from_config(&config) {
        Ok(session) => Box::into_raw(Box::new(session)),
        Err(err) => {
            tracing::warn!("r2_create failed: {err}");
            std::ptr::null_mut()
        }
    }
}

/// Destroys a session and frees its memory.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `r2_create()`, or null
/// - `ptr` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn r2_destroy(ptr: *mut Session) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

/// Gets the current generation counter from a session.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Session, or null
///
/// # Returns
/// The generation counter, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn r2_get_generation(ptr: *const Session) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).generation()
}

/// Restores the pattern painted at generation 0.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Session, or null
///
/// # Returns
/// 0 on success, 1 on failure (null pointer)
#[no_mangle]
pub unsafe extern "C" fn r2_reset(ptr: *mut Session) -> i32 {
    if ptr.is_null() {
        return 1;
    }
    (*ptr).reset();
    0
}
