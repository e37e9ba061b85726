//! The sparse infinite plane: a coordinate-keyed map of chunks plus the
//! background ("void") state shared by all unallocated space.
//!
//! Chunks never hold references to each other. Each step looks neighbors up
//! by coordinate, and the key set only changes in the expansion phase (before
//! any chunk computes) and the removal phase (after every chunk has committed).

use std::collections::{BTreeSet, HashMap};

use rayon::prelude::*;

use super::chunk::{Chunk, ChunkCoord, ChunkNeighbors, NextGeneration};
use super::neighborhood::{Cell, Neighborhood};
use super::region::{self, Rect};
use super::rule::RuleTable;

/// What a single [`World::simulate`] call changed in the chunk map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Chunks created by the expansion phase, sorted.
    pub created: Vec<ChunkCoord>,
    /// Chunks removed because they became uniform background, sorted.
    pub removed: Vec<ChunkCoord>,
    /// Background state after the step.
    pub void_state: Cell,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct World {
    chunks: HashMap<ChunkCoord, Chunk>,
    void_state: Cell,
    generation: u64,
}

impl World {
    /// An empty, all-dead plane.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn void_state(&self) -> Cell {
        self.void_state
    }

    /// Number of completed simulation steps.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// Every allocated chunk, in no particular order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Coordinates of every allocated chunk, sorted.
    pub fn chunk_coords(&self) -> Vec<ChunkCoord> {
        let mut keys: Vec<_> = self.chunks.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// Number of allocated cells that differ from the background.
    pub fn population(&self) -> u64 {
        self.chunks
            .values()
            .map(|c| c.cells().iter().filter(|&&s| s != self.void_state).count() as u64)
            .sum()
    }

    /// Drop every chunk and reset the background to dead.
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.void_state = 0;
    }

    /// Current state at a global coordinate. Unallocated space is the background.
    pub fn cell_at(&self, x: i32, y: i32) -> Cell {
        let (coord, lx, ly) = ChunkCoord::split(x, y);
        match self.chunks.get(&coord) {
            Some(chunk) => chunk.cell_at(lx, ly),
            None => self.void_state,
        }
    }

    /// Previous-generation state at a global coordinate.
    pub fn previous_cell_at(&self, x: i32, y: i32) -> Cell {
        let (coord, lx, ly) = ChunkCoord::split(x, y);
        match self.chunks.get(&coord) {
            Some(chunk) => chunk.previous_cell_at(lx, ly),
            None => self.void_state,
        }
    }

    /// Set a global cell in both generations. Creates the chunk on demand and
    /// drops it right away if the edit leaves it uniform background.
    pub fn paint_cell(&mut self, x: i32, y: i32, state: Cell) {
        let (coord, lx, ly) = ChunkCoord::split(x, y);
        let void_state = self.void_state;

        if state == void_state && !self.chunks.contains_key(&coord) {
            return;
        }

        let chunk = self
            .chunks
            .entry(coord)
            .or_insert_with(|| Chunk::filled(coord, void_state));
        chunk.set_cell(lx, ly, state);

        if chunk.is_background(void_state) {
            self.chunks.remove(&coord);
        }
    }

    /// Global rectangle covering every non-background cell.
    pub fn bounding_box(&self) -> Option<Rect> {
        self.chunks
            .values()
            .filter_map(|chunk| {
                let (ox, oy) = chunk.coord().origin();
                chunk
                    .bounding_box(self.void_state)
                    .map(|r| r.offset(ox, oy))
            })
            .reduce(|a, b| a.union(&b))
    }

    /// See [`region::extract_region`].
    pub fn extract_region(&self, rect: Rect, out_buf: &mut [Cell]) -> usize {
        region::extract_region(self, rect, out_buf)
    }

    /// See [`region::import_region`].
    pub fn import_region(&mut self, rect: Rect, in_buf: &[Cell], states: Cell) -> usize {
        region::import_region(self, rect, in_buf, states)
    }

    /// Read-only 3x3 view centered on `coord`, looked up fresh from the map.
    pub fn link(&self, coord: ChunkCoord) -> ChunkNeighbors<'_> {
        let mut chunks = [[None; 3]; 3];
        for (dy, row) in chunks.iter_mut().enumerate() {
            for (dx, slot) in row.iter_mut().enumerate() {
                *slot = self.chunks.get(&coord.offset(dx as i32 - 1, dy as i32 - 1));
            }
        }
        ChunkNeighbors {
            chunks,
            background: self.void_state,
        }
    }

    /// Create every missing chunk that a live border band can reach next
    /// generation. New chunks hold the background in both generations, which
    /// is what that space held while unallocated.
    pub fn ensure_neighbors(&mut self) -> Vec<ChunkCoord> {
        let void_state = self.void_state;
        let missing: BTreeSet<ChunkCoord> = self
            .chunks
            .values()
            .filter(|chunk| chunk.needs_expansion(void_state))
            .flat_map(|chunk| {
                let coord = chunk.coord();
                chunk
                    .wanted_neighbors(void_state)
                    .map(move |(dx, dy)| coord.offset(dx, dy))
            })
            .filter(|coord| !self.chunks.contains_key(coord))
            .collect();

        for &coord in &missing {
            self.chunks.insert(coord, Chunk::filled(coord, void_state));
        }
        missing.into_iter().collect()
    }

    /// Remove every chunk that is uniform background for the current void state.
    pub fn remove_background_chunks(&mut self) -> Vec<ChunkCoord> {
        let void_state = self.void_state;
        let mut removed: Vec<ChunkCoord> = self
            .chunks
            .iter()
            .filter(|(_, chunk)| chunk.is_background(void_state))
            .map(|(&coord, _)| coord)
            .collect();
        removed.sort_unstable();

        for coord in &removed {
            self.chunks.remove(coord);
        }
        removed
    }

    /// Advance the whole plane one generation.
    ///
    /// Phases: expand, compute every chunk from previous-generation data
    /// (in parallel), advance the background, commit previous buffers, then
    /// remove chunks that became uniform background.
    pub fn simulate(&mut self, rules: &RuleTable) -> StepReport {
        let created = self.ensure_neighbors();

        let keys = self.chunk_coords();
        let world: &World = self;
        let next: Vec<(ChunkCoord, NextGeneration)> = keys
            .par_iter()
            .map(|&coord| {
                let chunk = &world.chunks[&coord];
                (coord, chunk.next_generation(rules, &world.link(coord)))
            })
            .collect();

        for (coord, generation) in next {
            if let Some(chunk) = self.chunks.get_mut(&coord) {
                chunk.commit(generation);
            }
        }

        let old_void = self.void_state;
        self.void_state = rules.apply(Neighborhood::uniform(old_void).to_index()) as Cell;
        if self.void_state != old_void {
            tracing::trace!(from = old_void, to = self.void_state, "background flipped");
        }

        self.chunks
            .par_iter_mut()
            .for_each(|(_, chunk)| chunk.reset_previous());

        let removed = self.remove_background_chunks();
        self.generation += 1;

        tracing::debug!(
            generation = self.generation,
            chunks = self.chunks.len(),
            created = created.len(),
            removed = removed.len(),
            "stepped world"
        );

        StepReport {
            created,
            removed,
            void_state: self.void_state,
        }
    }
}
