//! The session: everything a front end drives between frames.
//!
//! A `Session` owns the rule table, the live world, the replay snapshot
//! painted at generation 0, and the fixed-timestep clock. Rule edits and
//! stepping both need `&mut Session`, so they can never overlap.

use std::path::Path;

use rand::Rng;

use crate::automaton::neighborhood::Cell;
use crate::automaton::pattern::{self, RandomFill};
use crate::automaton::region::Rect;
use crate::automaton::rule::RuleTable;
use crate::automaton::stepping::{Stepper, TickClock};
use crate::automaton::world::{StepReport, World};
use crate::config::AutomatonConfig;
use crate::error::Result;
use crate::rulefile::{self, LoadReport};

#[derive(Debug)]
pub struct Session {
    rules: RuleTable,
    world: World,
    original: World,
    clock: TickClock,
    stepper: Stepper,
    states: Cell,
}

impl Session {
    pub fn new(rules: RuleTable, threads: usize, time_step: f32, states: Cell) -> Result<Self> {
        Ok(Session {
            rules,
            world: World::new(),
            original: World::new(),
            clock: TickClock::new(time_step),
            stepper: Stepper::new(threads)?,
            states: states.max(2),
        })
    }

    /// Build a session from configuration, loading the rule file if one is set.
    pub fn from_config(config: &AutomatonConfig) -> Result<Self> {
        let rules = config.build_rules()?;
        Self::new(rules, config.threads, config.time_step, config.states)
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Snapshot that [`Session::reset`] restores.
    pub fn original(&self) -> &World {
        &self.original
    }

    pub fn generation(&self) -> u64 {
        self.world.generation()
    }

    /// Number of cell states painting cycles through.
    pub fn states(&self) -> Cell {
        self.states
    }

    pub fn clock(&self) -> &TickClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut TickClock {
        &mut self.clock
    }

    /// Paint one cell. Values are clamped below the state count. At
    /// generation 0 the replay snapshot receives the same edit.
    pub fn paint(&mut self, x: i32, y: i32, state: Cell) {
        let state = state.min(self.states - 1);
        self.world.paint_cell(x, y, state);
        if self.world.generation() == 0 {
            self.original.paint_cell(x, y, state);
        }
    }

    /// State a click at `(x, y)` would paint: the next state after the current one.
    pub fn cycle_state_at(&self, x: i32, y: i32) -> Cell {
        (self.world.cell_at(x, y) % self.states + 1) % self.states
    }

    /// Copy `in_buf` into `rect`, see [`World::import_region`].
    pub fn import_region(&mut self, rect: Rect, in_buf: &[Cell]) -> usize {
        let read = self.world.import_region(rect, in_buf, self.states);
        if self.world.generation() == 0 {
            self.original.import_region(rect, in_buf, self.states);
        }
        read
    }

    /// Paint a random soup, see [`pattern::random_fill`].
    pub fn random_fill<R: Rng + ?Sized>(
        &mut self,
        rect: Rect,
        params: &RandomFill,
        clear: bool,
        rng: &mut R,
    ) -> usize {
        let live = pattern::random_fill(&mut self.world, rect, params, self.states, clear, rng);
        if self.world.generation() == 0 {
            self.original = self.world.clone();
        }
        live
    }

    /// Advance one generation regardless of the clock.
    pub fn step(&mut self) -> StepReport {
        self.stepper.step(&mut self.world, &self.rules)
    }

    /// Feed `dt` seconds to the clock and run every generation that came due.
    ///
    /// # Returns
    /// Number of generations run.
    pub fn advance(&mut self, dt: f32) -> u32 {
        let due = self.clock.advance(dt);
        for _ in 0..due {
            self.step();
        }
        due
    }

    /// Restore the pattern painted at generation 0 and pause.
    pub fn reset(&mut self) {
        self.world = self.original.clone();
        self.clock.reset();
        tracing::info!(population = self.world.population(), "reset to original pattern");
    }

    /// Empty both the live world and the replay snapshot.
    pub fn clear(&mut self) {
        self.world = World::new();
        self.original = World::new();
        self.clock.reset();
    }

    /// Pause playback and hand out the rule table for editing.
    pub fn edit_rules<T>(&mut self, edit: impl FnOnce(&mut RuleTable) -> T) -> T {
        self.clock.pause();
        edit(&mut self.rules)
    }

    /// Replace the rules with the contents of a rule file.
    pub fn load_rules(&mut self, path: impl AsRef<Path>) -> Result<LoadReport> {
        let mut table = RuleTable::new();
        let report = rulefile::load(path, &mut table)?;
        self.edit_rules(|rules| *rules = table);
        Ok(report)
    }

    pub fn save_rules(&self, path: impl AsRef<Path>) -> Result<usize> {
        rulefile::save(path, &self.rules)
    }
}
