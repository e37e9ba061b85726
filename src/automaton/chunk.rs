//! Fixed-size tiles of the infinite plane.
//!
//! A chunk holds two generations: `cells` (current) and `previous`. The next
//! generation is always computed from `previous` only, both inside the chunk
//! and across its borders, so chunks can be stepped in any order.

use super::neighborhood::Cell;
use super::region::Rect;
use super::rule::RuleTable;

/// Side length of a chunk in cells.
pub const CHUNK_SIZE: i32 = 64;

/// Cells per chunk.
pub const CHUNK_AREA: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;

/// Width of the border band a radius-2 neighborhood can reach across.
pub const REACH: i32 = 2;

/// Position of a chunk in chunk space. Chunk (cx, cy) covers global cells
/// `cx * CHUNK_SIZE ..` and `cy * CHUNK_SIZE ..`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
}

impl ChunkCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        ChunkCoord { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        ChunkCoord::new(self.x + dx, self.y + dy)
    }

    /// Split a global cell coordinate into its chunk and local coordinates.
    /// Uses floor division so -1 lands in chunk -1 at local `CHUNK_SIZE - 1`.
    #[inline]
    pub fn split(gx: i32, gy: i32) -> (ChunkCoord, i32, i32) {
        (
            ChunkCoord::new(gx.div_euclid(CHUNK_SIZE), gy.div_euclid(CHUNK_SIZE)),
            gx.rem_euclid(CHUNK_SIZE),
            gy.rem_euclid(CHUNK_SIZE),
        )
    }

    /// Global coordinate of local cell (0, 0).
    pub fn origin(&self) -> (i32, i32) {
        (self.x * CHUNK_SIZE, self.y * CHUNK_SIZE)
    }
}

/// The offsets of the 8 surrounding chunks.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[inline]
fn index_of(x: i32, y: i32) -> usize {
    y as usize * CHUNK_SIZE as usize + x as usize
}

/// Local coordinate range of the band facing direction `d` (-1, 0, 1).
fn band(d: i32) -> std::ops::Range<i32> {
    match d {
        -1 => 0..REACH,
        1 => CHUNK_SIZE - REACH..CHUNK_SIZE,
        _ => 0..CHUNK_SIZE,
    }
}

/// Read-only view of a chunk and its 8 neighbors, rebuilt from the world map
/// for every step. Absent neighbors read as the background state.
pub struct ChunkNeighbors<'a> {
    /// Indexed `[dy + 1][dx + 1]`; the center is the chunk itself.
    pub chunks: [[Option<&'a Chunk>; 3]; 3],
    pub background: Cell,
}

impl<'a> ChunkNeighbors<'a> {
    /// Previous-generation state at local coordinates that may reach up to
    /// `REACH` cells past any edge of the center chunk.
    #[inline]
    pub fn previous_at(&self, x: i32, y: i32) -> Cell {
        let dx = x.div_euclid(CHUNK_SIZE);
        let dy = y.div_euclid(CHUNK_SIZE);
        match self.chunks[(dy + 1) as usize][(dx + 1) as usize] {
            Some(chunk) => {
                chunk.previous[index_of(x.rem_euclid(CHUNK_SIZE), y.rem_euclid(CHUNK_SIZE))]
            }
            None => self.background,
        }
    }
}

/// A freshly computed generation, not yet committed to its chunk.
pub struct NextGeneration {
    pub cells: Vec<Cell>,
    pub fill: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    coord: ChunkCoord,
    cells: Vec<Cell>,
    previous: Vec<Cell>,
    fill: u32,
}

impl Chunk {
    /// An all-dead chunk.
    pub fn new(coord: ChunkCoord) -> Self {
        Self::filled(coord, 0)
    }

    /// A chunk with every cell of both generations set to `state`.
    pub fn filled(coord: ChunkCoord, state: Cell) -> Self {
        let mut chunk = Chunk {
            coord,
            cells: Vec::new(),
            previous: Vec::new(),
            fill: 0,
        };
        chunk.fill_with_background(state);
        chunk
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Sum of current cell values.
    pub fn fill(&self) -> u32 {
        self.fill
    }

    /// Current generation, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Previous generation, row-major.
    pub fn previous(&self) -> &[Cell] {
        &self.previous
    }

    /// Current state at local coordinates. Panics outside the chunk.
    pub fn cell_at(&self, x: i32, y: i32) -> Cell {
        assert!(Self::in_bounds(x, y), "local ({x}, {y}) outside chunk");
        self.cells[index_of(x, y)]
    }

    /// Previous-generation state at local coordinates. Panics outside the chunk.
    pub fn previous_cell_at(&self, x: i32, y: i32) -> Cell {
        assert!(Self::in_bounds(x, y), "local ({x}, {y}) outside chunk");
        self.previous[index_of(x, y)]
    }

    #[inline]
    pub fn in_bounds(x: i32, y: i32) -> bool {
        (0..CHUNK_SIZE).contains(&x) && (0..CHUNK_SIZE).contains(&y)
    }

    /// Write `state` into both generations and adjust the fill by the delta.
    pub fn set_cell(&mut self, x: i32, y: i32, state: Cell) {
        assert!(Self::in_bounds(x, y), "local ({x}, {y}) outside chunk");
        let idx = index_of(x, y);
        let old = self.cells[idx];
        self.cells[idx] = state;
        self.previous[idx] = state;
        self.fill = self.fill + state as u32 - old as u32;
    }

    /// Set every cell of both generations to `state`.
    pub fn fill_with_background(&mut self, state: Cell) {
        self.cells = vec![state; CHUNK_AREA];
        self.previous = vec![state; CHUNK_AREA];
        self.fill = state as u32 * CHUNK_AREA as u32;
    }

    /// True if every current cell equals `background`. The fill sum is the
    /// fast test; a scan confirms it when the background is not 0, since
    /// multi-state values could add up to the same sum.
    pub fn is_background(&self, background: Cell) -> bool {
        if self.fill != background as u32 * CHUNK_AREA as u32 {
            return false;
        }
        background == 0 || self.cells.iter().all(|&c| c == background)
    }

    /// True if any previous-generation cell within `REACH` of the edge (or
    /// corner) facing (dx, dy) differs from `background`.
    pub fn needs_neighbor(&self, dx: i32, dy: i32, background: Cell) -> bool {
        band(dy).any(|y| band(dx).any(|x| self.previous[index_of(x, y)] != background))
    }

    /// True if any previous-generation cell within `REACH` of any edge differs
    /// from `background`.
    pub fn needs_expansion(&self, background: Cell) -> bool {
        (0..CHUNK_SIZE).any(|y| {
            let edge_row = y < REACH || y >= CHUNK_SIZE - REACH;
            (0..CHUNK_SIZE).any(|x| {
                (edge_row || x < REACH || x >= CHUNK_SIZE - REACH)
                    && self.previous[index_of(x, y)] != background
            })
        })
    }

    /// Offsets of the neighbors this chunk can influence next generation.
    pub fn wanted_neighbors(&self, background: Cell) -> impl Iterator<Item = (i32, i32)> + '_ {
        NEIGHBOR_OFFSETS
            .into_iter()
            .filter(move |&(dx, dy)| self.needs_neighbor(dx, dy, background))
    }

    /// Compute the next generation from the previous one. `neighbors` must be
    /// a view centered on this chunk.
    pub fn next_generation(&self, rules: &RuleTable, neighbors: &ChunkNeighbors) -> NextGeneration {
        let mut cells = vec![0; CHUNK_AREA];
        let mut fill = 0u32;

        for y in 0..CHUNK_SIZE {
            let interior_row = (REACH..CHUNK_SIZE - REACH).contains(&y);
            for x in 0..CHUNK_SIZE {
                let mut index = 0u64;
                if interior_row && (REACH..CHUNK_SIZE - REACH).contains(&x) {
                    for ny in y - REACH..=y + REACH {
                        let row = index_of(x - REACH, ny);
                        for &state in &self.previous[row..row + 5] {
                            index = (index << 1) + state as u64;
                        }
                    }
                } else {
                    for ny in y - REACH..=y + REACH {
                        for nx in x - REACH..=x + REACH {
                            index = (index << 1) + neighbors.previous_at(nx, ny) as u64;
                        }
                    }
                }

                let state = rules.apply(index) as Cell;
                cells[index_of(x, y)] = state;
                fill += state as u32;
            }
        }

        NextGeneration { cells, fill }
    }

    /// Replace the current generation with a computed one.
    pub fn commit(&mut self, next: NextGeneration) {
        debug_assert_eq!(next.cells.len(), CHUNK_AREA);
        self.cells = next.cells;
        self.fill = next.fill;
    }

    /// Copy the current generation into the previous one.
    pub fn reset_previous(&mut self) {
        self.previous.copy_from_slice(&self.cells);
    }

    /// Smallest local rectangle containing every current cell that differs
    /// from `background`, found by scanning each edge inward.
    pub fn bounding_box(&self, background: Cell) -> Option<Rect> {
        let live_row = |y: i32| (0..CHUNK_SIZE).any(|x| self.cells[index_of(x, y)] != background);
        let live_col = |x: i32| (0..CHUNK_SIZE).any(|y| self.cells[index_of(x, y)] != background);

        let top = (0..CHUNK_SIZE).find(|&y| live_row(y))?;
        let bottom = (0..CHUNK_SIZE).rev().find(|&y| live_row(y))?;
        let left = (0..CHUNK_SIZE).find(|&x| live_col(x))?;
        let right = (0..CHUNK_SIZE).rev().find(|&x| live_col(x))?;

        Some(Rect::from_corners(left, top, right, bottom))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::OnceLock;

    fn life() -> &'static RuleTable {
        static LIFE: OnceLock<RuleTable> = OnceLock::new();
        LIFE.get_or_init(|| RuleTable::life_like(&[3], &[2, 3]))
    }

    fn alone(chunk: &Chunk) -> ChunkNeighbors<'_> {
        let mut chunks = [[None; 3]; 3];
        chunks[1][1] = Some(chunk);
        ChunkNeighbors {
            chunks,
            background: 0,
        }
    }

    fn step(chunk: &mut Chunk, rules: &RuleTable) {
        let next = chunk.next_generation(rules, &alone(chunk));
        chunk.commit(next);
        chunk.reset_previous();
    }

    #[test]
    fn test_split_uses_floor() {
        assert_eq!(ChunkCoord::split(0, 0), (ChunkCoord::new(0, 0), 0, 0));
        assert_eq!(
            ChunkCoord::split(-1, -1),
            (ChunkCoord::new(-1, -1), CHUNK_SIZE - 1, CHUNK_SIZE - 1)
        );
        assert_eq!(
            ChunkCoord::split(CHUNK_SIZE, -CHUNK_SIZE),
            (ChunkCoord::new(1, -1), 0, 0)
        );
        assert_eq!(
            ChunkCoord::split(-CHUNK_SIZE - 1, 5),
            (ChunkCoord::new(-2, 0), CHUNK_SIZE - 1, 5)
        );
    }

    #[test]
    fn test_fill_with_background() {
        let mut chunk = Chunk::new(ChunkCoord::default());
        assert_eq!(chunk.fill(), 0);
        assert!(chunk.is_background(0));

        chunk.fill_with_background(1);
        assert_eq!(chunk.fill(), CHUNK_AREA as u32);
        assert!(chunk.is_background(1));
        assert!(!chunk.is_background(0));
        assert!(chunk.previous().iter().all(|&c| c == 1));
    }

    #[test]
    fn test_set_cell_tracks_fill() {
        let mut chunk = Chunk::new(ChunkCoord::default());
        chunk.set_cell(3, 4, 1);
        assert_eq!(chunk.fill(), 1);
        assert_eq!(chunk.cell_at(3, 4), 1);
        assert_eq!(chunk.previous_cell_at(3, 4), 1);
        chunk.set_cell(3, 4, 0);
        assert_eq!(chunk.fill(), 0);
    }

    #[test]
    fn test_multi_state_sum_is_not_background() {
        let mut chunk = Chunk::filled(ChunkCoord::default(), 1);
        chunk.set_cell(0, 0, 0);
        chunk.set_cell(1, 0, 2);
        assert_eq!(chunk.fill(), CHUNK_AREA as u32);
        assert!(!chunk.is_background(1));
    }

    #[test]
    #[should_panic]
    fn test_cell_at_outside_panics() {
        Chunk::new(ChunkCoord::default()).cell_at(CHUNK_SIZE, 0);
    }

    #[test]
    fn test_needs_neighbor_per_direction() {
        let mut chunk = Chunk::new(ChunkCoord::default());
        chunk.set_cell(0, 0, 1);
        let wanted: Vec<_> = chunk.wanted_neighbors(0).collect();
        assert_eq!(wanted, vec![(-1, -1), (0, -1), (-1, 0)]);
        assert!(chunk.needs_expansion(0));

        let mut chunk = Chunk::new(ChunkCoord::default());
        chunk.set_cell(CHUNK_SIZE - 2, 30, 1);
        let wanted: Vec<_> = chunk.wanted_neighbors(0).collect();
        assert_eq!(wanted, vec![(1, 0)]);

        let mut chunk = Chunk::new(ChunkCoord::default());
        chunk.set_cell(CHUNK_SIZE - 3, 30, 1);
        assert!(!chunk.needs_expansion(0));
        assert_eq!(chunk.wanted_neighbors(0).count(), 0);
    }

    #[test]
    fn test_needs_expansion_uses_previous() {
        let mut chunk = Chunk::new(ChunkCoord::default());
        let mut next = NextGeneration {
            cells: vec![0; CHUNK_AREA],
            fill: 1,
        };
        next.cells[0] = 1;
        chunk.commit(next);
        assert!(!chunk.needs_expansion(0));
        chunk.reset_previous();
        assert!(chunk.needs_expansion(0));
    }

    #[test]
    fn test_live_background_expansion() {
        let mut chunk = Chunk::filled(ChunkCoord::default(), 1);
        assert!(!chunk.needs_expansion(1));
        chunk.set_cell(CHUNK_SIZE - 1, CHUNK_SIZE - 1, 0);
        assert!(chunk.needs_expansion(1));
        assert!(chunk.needs_neighbor(1, 1, 1));
        assert!(!chunk.needs_neighbor(-1, -1, 1));
    }

    #[test]
    fn test_blinker_oscillates() {
        let rules = life();
        let mut chunk = Chunk::new(ChunkCoord::default());
        for x in 30..33 {
            chunk.set_cell(x, 30, 1);
        }

        step(&mut chunk, rules);
        assert_eq!(chunk.fill(), 3);
        for y in 29..32 {
            assert_eq!(chunk.cell_at(31, y), 1);
        }
        assert_eq!(chunk.cell_at(30, 30), 0);

        step(&mut chunk, rules);
        for x in 30..33 {
            assert_eq!(chunk.cell_at(x, 30), 1);
        }
        assert_eq!(chunk.fill(), 3);
    }

    #[test]
    fn test_double_buffering() {
        // A block is a still life only if every cell reads the same generation.
        let rules = life();
        let mut chunk = Chunk::new(ChunkCoord::default());
        for (x, y) in [(10, 10), (11, 10), (10, 11), (11, 11)] {
            chunk.set_cell(x, y, 1);
        }
        let before = chunk.cells().to_vec();
        step(&mut chunk, rules);
        assert_eq!(chunk.cells(), &before[..]);
    }

    #[test]
    fn test_border_reads_neighbor_previous() {
        // Three live cells in the left neighbor's last column give birth at our x = 0.
        let rules = life();
        let center = Chunk::new(ChunkCoord::new(0, 0));
        let mut left = Chunk::new(ChunkCoord::new(-1, 0));
        for y in 9..12 {
            left.set_cell(CHUNK_SIZE - 1, y, 1);
        }

        let mut chunks = [[None; 3]; 3];
        chunks[1][1] = Some(&center);
        chunks[1][0] = Some(&left);
        let view = ChunkNeighbors {
            chunks,
            background: 0,
        };

        let next = center.next_generation(rules, &view);
        assert_eq!(next.fill, 1);
        assert_eq!(next.cells[index_of(0, 10)], 1);
    }

    #[test]
    fn test_bounding_box() {
        let mut chunk = Chunk::new(ChunkCoord::default());
        assert_eq!(chunk.bounding_box(0), None);

        chunk.set_cell(5, 7, 1);
        chunk.set_cell(9, 2, 1);
        assert_eq!(chunk.bounding_box(0), Some(Rect::from_corners(5, 2, 9, 7)));

        let full = Chunk::filled(ChunkCoord::default(), 1);
        assert_eq!(full.bounding_box(1), None);
        assert_eq!(
            full.bounding_box(0),
            Some(Rect::new(0, 0, CHUNK_SIZE, CHUNK_SIZE))
        );
    }
}
