//! Generation stepping: a dedicated rayon pool for per-chunk work and the
//! fixed-timestep clock that decouples generations from frame rate.

use crate::error::Result;

use super::rule::RuleTable;
use super::world::{StepReport, World};

/// Multiplier applied by one speed-up/slow-down press (2^(1/4)).
pub const SPEED_FACTOR: f32 = 1.189_207_1;

/// Default seconds per generation.
pub const DEFAULT_TIME_STEP: f32 = 1.0 / 60.0;

/// Shortest time step speeding up can reach.
pub const MIN_TIME_STEP: f32 = 1.0e-4;

/// Most generations a single [`TickClock::advance`] call pays out. Time
/// beyond that is dropped instead of queued.
pub const MAX_STEPS_PER_ADVANCE: u32 = 64;

/// Runs [`World::simulate`] inside its own thread pool.
pub struct Stepper {
    pool: rayon::ThreadPool,
}

impl Stepper {
    /// Create a stepper with `num_threads` workers (0 is treated as 1).
    pub fn new(num_threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads.max(1))
            .thread_name(|i| format!("r2int-step-{i}"))
            .build()?;
        Ok(Stepper { pool })
    }

    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Advance `world` one generation.
    pub fn step(&self, world: &mut World, rules: &RuleTable) -> StepReport {
        self.pool.install(|| world.simulate(rules))
    }

    /// Advance `world` by `generations`, returning the last report.
    pub fn step_many(&self, world: &mut World, rules: &RuleTable, generations: u64) -> StepReport {
        let mut report = StepReport {
            void_state: world.void_state(),
            ..StepReport::default()
        };
        for _ in 0..generations {
            report = self.step(world, rules);
        }
        report
    }
}

impl std::fmt::Debug for Stepper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stepper")
            .field("threads", &self.num_threads())
            .finish()
    }
}

/// Fixed-timestep accumulator. Elapsed time only accumulates while playing;
/// each whole `time_step` in the accumulator is one generation.
#[derive(Clone, Debug, PartialEq)]
pub struct TickClock {
    time_step: f32,
    accumulator: f32,
    playing: bool,
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_STEP)
    }
}

impl TickClock {
    pub fn new(time_step: f32) -> Self {
        let time_step = if time_step.is_finite() && time_step > 0.0 {
            time_step.max(MIN_TIME_STEP)
        } else {
            DEFAULT_TIME_STEP
        };
        TickClock {
            time_step,
            accumulator: 0.0,
            playing: false,
        }
    }

    pub fn time_step(&self) -> f32 {
        self.time_step
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle_playing(&mut self) {
        self.playing = !self.playing;
    }

    /// Queue exactly one generation and pause.
    pub fn request_single_step(&mut self) {
        self.accumulator += self.time_step;
        self.playing = false;
    }

    /// Shorter time step, more generations per second.
    pub fn speed_up(&mut self) {
        self.time_step = (self.time_step / SPEED_FACTOR).max(MIN_TIME_STEP);
    }

    /// Longer time step, fewer generations per second.
    pub fn slow_down(&mut self) {
        self.time_step *= SPEED_FACTOR;
    }

    /// Drop any queued time and pause.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.playing = false;
    }

    /// Account for `dt` seconds of wall time and return how many generations
    /// are now due, at most [`MAX_STEPS_PER_ADVANCE`]. Paused clocks only pay
    /// out queued single steps.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if self.playing && dt.is_finite() && dt > 0.0 {
            self.accumulator += dt;
        }

        if self.accumulator >= self.time_step * MAX_STEPS_PER_ADVANCE as f32 {
            self.accumulator = 0.0;
            return MAX_STEPS_PER_ADVANCE;
        }

        let mut due = 0;
        while self.accumulator >= self.time_step {
            self.accumulator -= self.time_step;
            due += 1;
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stepper_threads() {
        let stepper = Stepper::new(0).unwrap();
        assert_eq!(stepper.num_threads(), 1);
        let stepper = Stepper::new(3).unwrap();
        assert_eq!(stepper.num_threads(), 3);
    }

    #[test]
    fn test_stepper_matches_direct_simulation() {
        let rules = RuleTable::life_like(&[3], &[2, 3]);
        let mut direct = World::new();
        for (x, y) in [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)] {
            direct.paint_cell(x, y, 1);
        }
        let mut pooled = direct.clone();

        for _ in 0..8 {
            direct.simulate(&rules);
        }
        let stepper = Stepper::new(4).unwrap();
        stepper.step_many(&mut pooled, &rules, 8);

        assert_eq!(pooled, direct);
        assert_eq!(pooled.generation(), 8);
    }

    #[test]
    fn test_paused_clock_runs_nothing() {
        let mut clock = TickClock::new(0.5);
        assert_eq!(clock.advance(10.0), 0);
    }

    #[test]
    fn test_playing_clock_accumulates() {
        let mut clock = TickClock::new(0.25);
        clock.play();
        assert_eq!(clock.advance(0.6), 2);
        assert_eq!(clock.advance(0.1), 1);
        assert_eq!(clock.advance(0.0), 0);
    }

    #[test]
    fn test_single_step_pauses() {
        let mut clock = TickClock::new(0.5);
        clock.play();
        clock.request_single_step();
        assert!(!clock.is_playing());
        assert_eq!(clock.advance(3.0), 1);
        assert_eq!(clock.advance(3.0), 0);
    }

    #[test]
    fn test_speed_changes_are_inverse() {
        let mut clock = TickClock::new(0.5);
        clock.speed_up();
        assert!(clock.time_step() < 0.5);
        for _ in 0..3 {
            clock.speed_up();
        }
        assert!((clock.time_step() - 0.25).abs() < 1e-4, "four presses halve the step");
        for _ in 0..4 {
            clock.slow_down();
        }
        assert!((clock.time_step() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_huge_frame_is_capped() {
        let mut clock = TickClock::default();
        clock.play();
        assert_eq!(clock.advance(1.0e9), MAX_STEPS_PER_ADVANCE);
        // The backlog is dropped, not replayed on later frames.
        assert_eq!(clock.advance(0.0), 0);
        assert_eq!(clock.advance(f32::MAX), MAX_STEPS_PER_ADVANCE);
    }

    #[test]
    fn test_speed_up_stops_at_minimum() {
        let mut clock = TickClock::default();
        for _ in 0..1000 {
            clock.speed_up();
        }
        assert_eq!(clock.time_step(), MIN_TIME_STEP);
        clock.play();
        assert_eq!(clock.advance(1.0), MAX_STEPS_PER_ADVANCE);
        assert_eq!(TickClock::new(1.0e-30).time_step(), MIN_TIME_STEP);
    }

    #[test]
    fn test_invalid_time_step_falls_back() {
        assert_eq!(TickClock::new(0.0).time_step(), DEFAULT_TIME_STEP);
        assert_eq!(TickClock::new(f32::NAN).time_step(), DEFAULT_TIME_STEP);
    }
}
