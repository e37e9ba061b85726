//! Isotropic symmetry helpers: the 8-member orbit of a neighborhood under
//! rotation and mirroring, and its lowest canonical representative.

use super::neighborhood::Neighborhood;

/// The 8 symmetry variants: 4 rotations of `n` followed by 4 rotations of its
/// horizontal mirror. Members may repeat for symmetric neighborhoods.
pub fn symmetry_variants(n: &Neighborhood) -> [Neighborhood; 8] {
    let mut out = [*n; 8];
    let mut current = *n;
    for slot in out.iter_mut().take(4) {
        *slot = current;
        current = current.rotate_ccw();
    }
    let mut current = n.mirror_horizontal();
    for slot in out.iter_mut().skip(4) {
        *slot = current;
        current = current.rotate_ccw();
    }
    out
}

/// Indices of the 8 symmetry variants of `n`.
pub fn symmetry_orbit(n: &Neighborhood) -> [u64; 8] {
    symmetry_variants(n).map(|v| v.to_index())
}

/// Smallest index among the symmetry variants of `n`.
pub fn lowest_canonical_index(n: &Neighborhood) -> u64 {
    symmetry_orbit(n).into_iter().min().unwrap_or(0)
}

/// True if `index` is the lowest member of its own orbit.
pub fn is_canonical(index: u32) -> bool {
    lowest_canonical_index(&Neighborhood::from_index(index)) == index as u64
}
