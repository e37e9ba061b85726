//! The 5x5 (radius-2) neighborhood value and its relabeling transforms.
//!
//! Cells are stored row-major: index = 5 * row + column, with the center at 12.
//! Index 0 is the most significant of the 25 bits in the packed integer form.

use std::ops::{Index, IndexMut};

/// A single cell state. 0 = dead, 1 = alive, larger values for multi-state rules.
pub type Cell = u8;

/// Number of cells in a neighborhood.
pub const NEIGHBORHOOD_CELLS: usize = 25;

/// Index of the center cell.
pub const CENTER: usize = 12;

/// Number of distinct binary neighborhoods (2^25).
pub const RULE_SPACE: u64 = 1 << NEIGHBORHOOD_CELLS;

const ROTATE_CW: [usize; NEIGHBORHOOD_CELLS] = [
    20, 15, 10, 5, 0, //
    21, 16, 11, 6, 1, //
    22, 17, 12, 7, 2, //
    23, 18, 13, 8, 3, //
    24, 19, 14, 9, 4,
];

const ROTATE_CCW: [usize; NEIGHBORHOOD_CELLS] = [
    4, 9, 14, 19, 24, //
    3, 8, 13, 18, 23, //
    2, 7, 12, 17, 22, //
    1, 6, 11, 16, 21, //
    0, 5, 10, 15, 20,
];

const MIRROR_HORIZONTAL: [usize; NEIGHBORHOOD_CELLS] = [
    4, 3, 2, 1, 0, //
    9, 8, 7, 6, 5, //
    14, 13, 12, 11, 10, //
    19, 18, 17, 16, 15, //
    24, 23, 22, 21, 20,
];

const MIRROR_VERTICAL: [usize; NEIGHBORHOOD_CELLS] = [
    20, 21, 22, 23, 24, //
    15, 16, 17, 18, 19, //
    10, 11, 12, 13, 14, //
    5, 6, 7, 8, 9, //
    0, 1, 2, 3, 4,
];

/// States of a 5x5 block of cells centered on index 12.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Neighborhood([Cell; NEIGHBORHOOD_CELLS]);

impl Neighborhood {
    pub fn new(cells: [Cell; NEIGHBORHOOD_CELLS]) -> Self {
        Neighborhood(cells)
    }

    /// A neighborhood with every cell set to `state`.
    pub fn uniform(state: Cell) -> Self {
        Neighborhood([state; NEIGHBORHOOD_CELLS])
    }

    pub fn cells(&self) -> &[Cell; NEIGHBORHOOD_CELLS] {
        &self.0
    }

    #[inline]
    fn permuted(&self, table: &[usize; NEIGHBORHOOD_CELLS]) -> Self {
        let mut out = [0; NEIGHBORHOOD_CELLS];
        for (dst, &src) in out.iter_mut().zip(table.iter()) {
            *dst = self.0[src];
        }
        Neighborhood(out)
    }

    /// Rotate the block 90 degrees clockwise.
    pub fn rotate_cw(&self) -> Self {
        self.permuted(&ROTATE_CW)
    }

    /// Rotate the block 90 degrees counter-clockwise.
    pub fn rotate_ccw(&self) -> Self {
        self.permuted(&ROTATE_CCW)
    }

    /// Reflect across the vertical axis (columns swap left/right).
    pub fn mirror_horizontal(&self) -> Self {
        self.permuted(&MIRROR_HORIZONTAL)
    }

    /// Reflect across the horizontal axis (rows swap top/bottom).
    pub fn mirror_vertical(&self) -> Self {
        self.permuted(&MIRROR_VERTICAL)
    }

    /// Translate the block by (dx, dy). Cells leaving the window are dropped
    /// and cells entering it are 0, so this is lossy.
    pub fn shift(&self, dx: i32, dy: i32) -> Self {
        let mut out = [0; NEIGHBORHOOD_CELLS];
        for y in 0..5i32 {
            for x in 0..5i32 {
                let from_x = x - dx;
                let from_y = y - dy;
                if (0..5).contains(&from_x) && (0..5).contains(&from_y) {
                    out[(5 * y + x) as usize] = self.0[(5 * from_y + from_x) as usize];
                }
            }
        }
        Neighborhood(out)
    }

    /// Pack the cells into an integer, index 0 weighted 2^24 down to index 24
    /// weighted 2^0. Values above 1 are weighted the same way, so multi-state
    /// neighborhoods can land outside the rule space.
    pub fn to_index(&self) -> u64 {
        self.0
            .iter()
            .fold(0u64, |acc, &state| (acc << 1) + state as u64)
    }

    /// Inverse of [`Neighborhood::to_index`] for binary neighborhoods.
    /// Bits above the 25th are ignored.
    pub fn from_index(index: u32) -> Self {
        let mut out = [0; NEIGHBORHOOD_CELLS];
        for (i, cell) in out.iter_mut().enumerate() {
            *cell = ((index >> (24 - i)) & 1) as Cell;
        }
        Neighborhood(out)
    }

    /// Sum of every cell except the center.
    pub fn count_outer_cells(&self) -> u32 {
        self.count_total_cells() - self.0[CENTER] as u32
    }

    /// Sum of all 25 cells.
    pub fn count_total_cells(&self) -> u32 {
        self.0.iter().map(|&c| c as u32).sum()
    }
}

impl Index<usize> for Neighborhood {
    type Output = Cell;

    fn index(&self, index: usize) -> &Cell {
        &self.0[index]
    }
}

impl IndexMut<usize> for Neighborhood {
    fn index_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.0[index]
    }
}

impl From<[Cell; NEIGHBORHOOD_CELLS]> for Neighborhood {
    fn from(cells: [Cell; NEIGHBORHOOD_CELLS]) -> Self {
        Neighborhood(cells)
    }
}
