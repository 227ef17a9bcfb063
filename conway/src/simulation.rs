// simulation.rs - Run/pause/step lifecycle around the three grid buffers

use std::fmt;

use log::{debug, info, warn};
use rand::Rng;

use crate::buffers::GridBuffers;
use crate::engine;
use crate::error::{LifeError, Result};
use crate::grid::{Cell, Grid};
use crate::patterns;
use crate::settings::Settings;
use crate::stall::StallDetector;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Ready,      // Freshly reset or reseeded, generation 0
    Running,
    Paused,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Ready => "ready",
            RunState::Running => "running",
            RunState::Paused => "paused",
        };
        f.write_str(name)
    }
}

/// What a single `step` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    pub generation: u64,
    /// The stall was seen for the first time on this step.
    pub newly_stalled: bool,
    /// The step paused the simulation because of `pause_on_stall`.
    pub paused: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Stalled { generation: u64 },
    LimitReached { generation: u64 },
}

/// One independent Game of Life. Owns all three buffers; renderers only ever
/// see `current` through a shared borrow, which cannot outlive the next `step`.
#[derive(Debug, Clone)]
pub struct Simulation {
    buffers: GridBuffers,
    generation: u64,
    stall: StallDetector,
    state: RunState,
    settings: Settings,
}

impl Simulation {
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;
        Ok(Self::from_valid(settings))
    }

    /// Blank `width` x `height` simulation with default settings otherwise.
    pub fn with_size(width: usize, height: usize) -> Result<Self> {
        Ok(Self::from_valid(Settings::with_cells(width, height)?))
    }

    fn from_valid(settings: Settings) -> Self {
        Self {
            buffers: GridBuffers::new(settings.columns(), settings.rows()),
            generation: 0,
            stall: StallDetector::new(),
            state: RunState::Ready,
            settings,
        }
    }

    // --- Queries -----------------------------------------------------------

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn current(&self) -> &Grid {
        self.buffers.current()
    }

    pub fn cell(&self, x: usize, y: usize) -> Result<Cell> {
        self.buffers.current().cell(x, y)
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.buffers.dimensions()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// True whenever no driver should schedule another tick.
    pub fn is_paused(&self) -> bool {
        !self.is_running()
    }

    pub fn is_stalled(&self) -> bool {
        self.stall.is_stalled()
    }

    pub fn stalled_at(&self) -> Option<u64> {
        self.stall.stalled_at()
    }

    pub fn export_state(&self) -> String {
        self.buffers.current().serialize()
    }

    // --- Configuration -----------------------------------------------------

    pub fn set_pause_on_stall(&mut self, pause_on_stall: bool) {
        self.settings.pause_on_stall = pause_on_stall;
    }

    /// Adopts new settings. A change of grid dimensions resets the simulation.
    pub fn apply_settings(&mut self, settings: Settings) -> Result<()> {
        settings.validate()?;
        let resize = (settings.columns(), settings.rows()) != self.dimensions();
        self.settings = settings;
        if resize {
            self.reallocate();
        }
        Ok(())
    }

    // --- Seeding -----------------------------------------------------------

    /// Fresh blank buffers of the given size. A size the settings cannot
    /// describe is rejected and the simulation is left as it was.
    pub fn reset(&mut self, width: usize, height: usize) -> Result<()> {
        let settings = self
            .settings
            .resized(width, height)
            .inspect_err(|e| warn!("rejected reset: {e}"))?;
        self.settings = settings;
        self.reallocate();
        Ok(())
    }

    fn reallocate(&mut self) {
        let (width, height) = (self.settings.columns(), self.settings.rows());
        self.buffers = GridBuffers::new(width, height);
        self.restart();
        info!("reset to a {width}x{height} grid");
    }

    pub fn randomize_and_reset(&mut self) {
        self.randomize_and_reset_with(&mut rand::thread_rng());
    }

    pub fn randomize_and_reset_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.reallocate();
        self.buffers.current_mut().randomize(rng, self.settings.alive_probability);
        info!("randomized, {} cells alive", self.buffers.current().population());
    }

    /// Kills every cell, keeping the dimensions.
    pub fn clear(&mut self) {
        self.buffers.current_mut().clear();
        self.buffers.clear_history();
        self.restart();
    }

    /// Draws a preset on a blank grid; returns how many cells fit.
    pub fn load_pattern(&mut self, name: &str) -> Result<usize> {
        let pattern = patterns::find(name).ok_or_else(|| LifeError::UnknownPattern(name.to_string()))?;
        let placed = pattern.apply(self.buffers.current_mut());
        self.buffers.clear_history();
        self.restart();
        info!("loaded {} ({placed} of {} cells)", pattern.name, pattern.cells.len());
        Ok(placed)
    }

    /// Replaces `current` with a serialized grid. Any failure leaves the
    /// simulation exactly as it was.
    pub fn import_state(&mut self, text: &str) -> Result<()> {
        let grid = Grid::parse(text).inspect_err(|e| warn!("rejected state: {e}"))?;
        if grid.dimensions() != self.dimensions() {
            let err = LifeError::DimensionMismatch {
                expected: self.dimensions(),
                found: grid.dimensions(),
            };
            warn!("rejected state: {err}");
            return Err(err);
        }
        self.buffers.current_mut().copy_from(&grid)?;
        self.buffers.clear_history();
        self.restart();
        info!("loaded state, {} cells alive", grid.population());
        Ok(())
    }

    fn restart(&mut self) {
        self.generation = 0;
        self.stall.reset();
        self.state = RunState::Ready;
    }

    // --- Lifecycle ---------------------------------------------------------

    /// Advances exactly one generation. Valid in any state; leaves `Ready`.
    pub fn step(&mut self) -> StepOutcome {
        let (current, next) = self.buffers.split();
        engine::advance(current, next);
        self.buffers.rotate();
        self.generation += 1;

        if self.state == RunState::Ready {
            self.state = RunState::Paused;
        }

        // After rotation the scratch buffer still holds the generation two back
        let newly_stalled = self.stall.observe(self.buffers.current(), self.buffers.next(), self.generation);
        let mut paused = false;
        if newly_stalled {
            info!("life has stalled at generation {}", self.generation);
            if self.settings.pause_on_stall && self.state == RunState::Running {
                self.state = RunState::Paused;
                paused = true;
            }
        }
        debug!("generation {}: {} alive", self.generation, self.buffers.current().population());

        StepOutcome {
            generation: self.generation,
            newly_stalled,
            paused,
        }
    }

    /// Marks the simulation as running. The caller owns the scheduling and
    /// calls `step` (or [`Cadence::tick`]) while `is_running` holds.
    pub fn run(&mut self) {
        if self.state != RunState::Running {
            self.state = RunState::Running;
            info!("simulation running");
        }
    }

    pub fn pause(&mut self) {
        if self.state == RunState::Running {
            self.state = RunState::Paused;
            info!("simulation paused at generation {}", self.generation);
        }
    }

    /// Steps until a stall is seen or `limit` generations have been computed
    /// in this call, without any external driver.
    pub fn run_to_stall(&mut self, limit: u64) -> RunOutcome {
        self.run();
        let mut steps = 0;
        while !self.stall.is_stalled() && steps < limit {
            self.step();
            steps += 1;
        }
        self.pause();

        match self.stall.stalled_at() {
            Some(generation) => RunOutcome::Stalled { generation },
            None => RunOutcome::LimitReached { generation: self.generation },
        }
    }

    // --- Editing -----------------------------------------------------------

    fn ensure_editable(&self, operation: &'static str) -> Result<()> {
        if self.state == RunState::Running {
            warn!("cannot {operation} while running");
            return Err(LifeError::InvalidState {
                operation,
                state: self.state,
            });
        }
        Ok(())
    }

    /// Flips one cell of `current`. Rejected while running.
    pub fn toggle_cell(&mut self, x: usize, y: usize) -> Result<Cell> {
        self.ensure_editable("toggle a cell")?;
        self.buffers.current_mut().toggle(x, y)
    }

    /// Sets one cell of `current` alive, for drag painting. Rejected while running.
    pub fn mark_cell(&mut self, x: usize, y: usize) -> Result<()> {
        self.ensure_editable("mark a cell")?;
        self.buffers.current_mut().set_alive(x, y)
    }
}

impl Default for Simulation {
    /// Blank simulation with [`Settings::default`].
    fn default() -> Self {
        Self::from_valid(Settings::default())
    }
}

/// Turns per-frame callbacks into steps while the simulation is running.
///
/// Every `frames_per_step` frames the cadence fires and computes up to
/// `steps_per_tick` generations. A burst ends early once the simulation
/// stops running, e.g. when `pause_on_stall` kicks in halfway through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cadence {
    frames_per_step: u32,
    steps_per_tick: u32,
    frame_count: u64,
}

impl Cadence {
    pub fn new(frames_per_step: u32) -> Self {
        Self {
            frames_per_step: frames_per_step.max(1),
            steps_per_tick: 1,
            frame_count: 0,
        }
    }

    /// Cadence matching the `frames_per_step` and `steps_per_tick` settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.frames_per_step).with_steps_per_tick(settings.steps_per_tick)
    }

    pub fn with_steps_per_tick(mut self, steps_per_tick: u32) -> Self {
        self.set_steps_per_tick(steps_per_tick);
        self
    }

    pub fn frames_per_step(&self) -> u32 {
        self.frames_per_step
    }

    pub fn steps_per_tick(&self) -> u32 {
        self.steps_per_tick
    }

    pub fn set_frames_per_step(&mut self, frames_per_step: u32) {
        self.frames_per_step = frames_per_step.max(1);
    }

    pub fn set_steps_per_tick(&mut self, steps_per_tick: u32) {
        self.steps_per_tick = steps_per_tick.max(1);
    }

    /// Call once per frame. On frames that stepped, returns the outcome of
    /// the burst: the last generation reached, with `newly_stalled` and
    /// `paused` set if any step in it set them.
    pub fn tick(&mut self, simulation: &mut Simulation) -> Option<StepOutcome> {
        if !simulation.is_running() {
            self.frame_count = 0;
            return None;
        }
        let due = self.frame_count % u64::from(self.frames_per_step) == 0;
        self.frame_count += 1;
        if !due {
            return None;
        }

        let mut outcome = simulation.step();
        for _ in 1..self.steps_per_tick {
            if !simulation.is_running() {
                break;
            }
            let next = simulation.step();
            outcome = StepOutcome {
                generation: next.generation,
                newly_stalled: outcome.newly_stalled || next.newly_stalled,
                paused: outcome.paused || next.paused,
            };
        }
        Some(outcome)
    }
}
