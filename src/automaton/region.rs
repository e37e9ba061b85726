//! Rectangles, bounding boxes, and region extraction/import.

use super::neighborhood::Cell;
use super::world::World;

/// Axis-aligned integer rectangle. `width`/`height` are always positive for
/// rectangles produced by this crate; emptiness is expressed with `Option`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanning two inclusive corners.
    pub fn from_corners(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Rect::new(left, top, right - left + 1, bottom - top + 1)
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn area(&self) -> usize {
        self.width.max(0) as usize * self.height.max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Self {
        let left = self.x.min(other.x);
        let top = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(left, top, right - left, bottom - top)
    }
}

/// Copy the current cells of `rect` into `out_buf`, row-major.
///
/// # Returns
/// Number of cells written, or 0 if the rectangle is empty or the buffer is too small.
pub fn extract_region(world: &World, rect: Rect, out_buf: &mut [Cell]) -> usize {
    if rect.is_empty() || out_buf.len() < rect.area() {
        return 0;
    }

    let mut offset = 0;
    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            out_buf[offset] = world.cell_at(x, y);
            offset += 1;
        }
    }

    offset
}

/// Paint `in_buf` (row-major) into `rect`. Values are clamped below `states`.
///
/// # Returns
/// Number of cells read, or 0 if the rectangle is empty or the buffer is too short.
pub fn import_region(world: &mut World, rect: Rect, in_buf: &[Cell], states: Cell) -> usize {
    if rect.is_empty() || in_buf.len() < rect.area() {
        return 0;
    }

    let top = states.max(2) - 1;
    let mut offset = 0;
    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            world.paint_cell(x, y, in_buf[offset].min(top));
            offset += 1;
        }
    }

    offset
}
