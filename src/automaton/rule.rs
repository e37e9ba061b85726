//! The transition table: one bit per 25-cell neighborhood.
//!
//! Stored as a packed bitset (4 MiB). Lookups outside the rule space return
//! `false` instead of faulting, which is how multi-state neighborhoods whose
//! packed index overflows are treated.

use rayon::prelude::*;

use super::neighborhood::{Neighborhood, CENTER, RULE_SPACE};
use super::symmetry::symmetry_orbit;

const WORD_BITS: u64 = 64;
const WORD_COUNT: usize = (RULE_SPACE / WORD_BITS) as usize;

/// Bits of the 8 cells around the center (radius-1 Moore ring).
const MOORE1_MASK: u32 = (0b01110 << 15) | (0b01010 << 10) | (0b01110 << 5);
/// Bits of every cell except the center.
const OUTER_MASK: u32 = (RULE_SPACE as u32 - 1) & !(1 << (24 - CENTER));
const CENTER_BIT: u32 = 1 << (24 - CENTER);

/// Total function from [0, 2^25) to birth/survive.
#[derive(Clone, PartialEq, Eq)]
pub struct RuleTable {
    words: Vec<u64>,
}

impl std::fmt::Debug for RuleTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleTable")
            .field("set", &self.count_set())
            .finish()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleTable {
    /// An all-off table.
    pub fn new() -> Self {
        RuleTable {
            words: vec![0; WORD_COUNT],
        }
    }

    /// Build a table by evaluating `f` on every index. Words are filled in parallel.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(u32) -> bool + Sync,
    {
        let mut words = vec![0u64; WORD_COUNT];
        words.par_iter_mut().enumerate().for_each(|(w, word)| {
            let base = (w as u64 * WORD_BITS) as u32;
            let mut bits = 0u64;
            for bit in 0..WORD_BITS as u32 {
                if f(base + bit) {
                    bits |= 1 << bit;
                }
            }
            *word = bits;
        });
        RuleTable { words }
    }

    /// Life-like rule over the 8 cells around the center; ring 2 is ignored.
    /// `life_like(&[3], &[2, 3])` is Conway's Game of Life.
    pub fn life_like(birth: &[u8], survive: &[u8]) -> Self {
        Self::totalistic(MOORE1_MASK, birth, survive)
    }

    /// Outer-totalistic rule over all 24 outer cells of the 5x5 window.
    pub fn outer_totalistic(birth: &[u8], survive: &[u8]) -> Self {
        Self::totalistic(OUTER_MASK, birth, survive)
    }

    fn totalistic(mask: u32, birth: &[u8], survive: &[u8]) -> Self {
        let mut born = [false; 25];
        let mut stays = [false; 25];
        for &b in birth.iter().filter(|&&b| b < 25) {
            born[b as usize] = true;
        }
        for &s in survive.iter().filter(|&&s| s < 25) {
            stays[s as usize] = true;
        }
        Self::from_fn(|index| {
            let count = (index & mask).count_ones() as usize;
            if index & CENTER_BIT == 0 {
                born[count]
            } else {
                stays[count]
            }
        })
    }

    #[inline]
    fn locate(index: u64) -> Option<(usize, u64)> {
        if index < RULE_SPACE {
            Some(((index / WORD_BITS) as usize, 1 << (index % WORD_BITS)))
        } else {
            None
        }
    }

    /// Stored outcome at `index`, `false` outside the rule space.
    #[inline]
    pub fn get(&self, index: u64) -> bool {
        match Self::locate(index) {
            Some((word, mask)) => self.words[word] & mask != 0,
            None => false,
        }
    }

    /// Store `value` at `index`. Indices outside the rule space are ignored.
    pub fn set(&mut self, index: u64, value: bool) {
        match Self::locate(index) {
            Some((word, mask)) => {
                if value {
                    self.words[word] |= mask;
                } else {
                    self.words[word] &= !mask;
                }
            }
            None => tracing::warn!(index, "ignoring write outside the rule space"),
        }
    }

    /// Evaluate the transition for a packed neighborhood index.
    #[inline]
    pub fn apply(&self, index: u64) -> bool {
        self.get(index)
    }

    /// Evaluate the transition for a neighborhood.
    pub fn apply_neighborhood(&self, n: &Neighborhood) -> bool {
        self.apply(n.to_index())
    }

    /// Flip the transition at `n` and write the flipped value to all 8
    /// symmetry variants of `n`, so the whole orbit ends up equal.
    pub fn toggle_isotropic(&mut self, n: &Neighborhood) {
        let value = !self.get(n.to_index());
        for index in symmetry_orbit(n) {
            self.set(index, value);
        }
    }

    /// Set the whole orbit of `n` to `value`.
    pub fn set_isotropic(&mut self, n: &Neighborhood, value: bool) {
        for index in symmetry_orbit(n) {
            self.set(index, value);
        }
    }

    /// Reset every transition to off.
    pub fn clear(&mut self) {
        self.words.iter_mut().for_each(|w| *w = 0);
    }

    /// Number of transitions that are on.
    pub fn count_set(&self) -> u64 {
        self.words.par_iter().map(|w| w.count_ones() as u64).sum()
    }

    /// Iterate the indices that are on, in ascending order.
    pub fn iter_set(&self) -> impl Iterator<Item = u32> + '_ {
        self.words.iter().enumerate().flat_map(|(w, &word)| {
            let base = w as u32 * WORD_BITS as u32;
            (0..WORD_BITS as u32)
                .filter(move |bit| word & (1 << bit) != 0)
                .map(move |bit| base + bit)
        })
    }
}
