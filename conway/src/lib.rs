// lib.rs - Conway's Game of Life simulation core
//
// A fixed-size grid with hard edges, the generation transition, a rotating
// triple buffer and stall detection, driven by an externally scheduled
// `Simulation`. Rendering and input live in the front-end crates.

pub mod buffers;
pub mod engine;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod settings;
pub mod simulation;
pub mod stall;

pub use buffers::GridBuffers;
pub use engine::{compute_next_generation, neighbor_count, next_state};
pub use error::{LifeError, Result};
pub use grid::{Cell, Grid, DEFAULT_ALIVE_PROBABILITY};
pub use patterns::{Pattern, PATTERNS};
pub use settings::Settings;
pub use simulation::{Cadence, RunOutcome, RunState, Simulation, StepOutcome};
pub use stall::StallDetector;
