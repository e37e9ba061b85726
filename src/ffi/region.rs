//! Region extraction and import FFI functions.

use crate::automaton::Rect;
use crate::state::Session;

/// Extracts a rectangle of current cells into a flat output buffer.
///
/// # Layout
/// The buffer is filled row by row (y changes slowest, x changes fastest).
/// This matches the layout expected by `r2_import_region`.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Session, or null
/// - `out_buf` must point to a buffer with at least `width * height` bytes
///
/// # Returns
/// Number of bytes written, or 0 on error.
#[no_mangle]
pub unsafe extern "C" fn r2_extract_region(
    ptr: *const Session,
    out_buf: *mut u8,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
) -> u64 {
    if ptr.is_null() || out_buf.is_null() {
        return 0;
    }

    let rect = Rect::new(x, y, width, height);
    if rect.is_empty() {
        return 0;
    }

    let buf_slice = std::slice::from_raw_parts_mut(out_buf, rect.area());
    (*ptr).world().extract_region(rect, buf_slice) as u64
}

/// Imports a rectangle of cells from a flat buffer.
///
/// # Layout
/// The buffer is expected row by row (matching `r2_extract_region`).
/// Input values are clamped below the session's state count.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Session, or null
/// - `in_buf` must point to a buffer with at least `width * height` bytes
///
/// # Returns
/// Number of bytes read, or 0 on error.
#[no_mangle]
pub unsafe extern "C" fn r2_import_region(
    ptr: *mut Session,
    in_buf: *const u8,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
) -> u64 {
    if ptr.is_null() || in_buf.is_null() {
        return 0;
    }

    let rect = Rect::new(x, y, width, height);
    if rect.is_empty() {
        return 0;
    }

    let buf_slice = std::slice::from_raw_parts(in_buf, rect.area());
    (*ptr).import_region(rect, buf_slice) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::{grid, lifecycle};
    use std::ptr;

    #[test]
    fn test_roundtrip_across_chunk_corner() {
        unsafe {
            let session = lifecycle::r2_create(1);

            let input: Vec<u8> = vec![1, 0, 0, 0, 5, 0, 0, 0, 1];
            let read = r2_import_region(session, input.as_ptr(), -2, -2, 3, 3);
            assert_eq!(read, 9);
            assert_eq!(grid::r2_chunk_count(session), 2);

            let mut output = vec![0u8; 9];
            let written = r2_extract_region(session, output.as_mut_ptr(), -2, -2, 3, 3);
            assert_eq!(written, 9);
            assert_eq!(output, vec![1, 0, 0, 0, 1, 0, 0, 0, 1]);

            lifecycle::r2_destroy(session);
        }
    }

    #[test]
    fn test_empty_rect_and_nulls() {
        unsafe {
            let session = lifecycle::r2_create(1);
            let mut buf = [0u8; 4];
            assert_eq!(r2_extract_region(session, buf.as_mut_ptr(), 0, 0, 0, 4), 0);
            assert_eq!(r2_import_region(session, buf.as_ptr(), 0, 0, -1, 4), 0);
            assert_eq!(r2_extract_region(session, ptr::null_mut(), 0, 0, 2, 2), 0);
            assert_eq!(r2_import_region(ptr::null_mut(), buf.as_ptr(), 0, 0, 2, 2), 0);
            lifecycle::r2_destroy(session);
        }
    }
}
