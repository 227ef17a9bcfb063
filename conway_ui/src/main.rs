// main.rs - Desktop front end for the conway simulation core
// The simulation owns the grids; this crate only draws them and forwards input

use std::path::Path;

use conway::{Cadence, Settings, Simulation, StepOutcome};
use eframe::egui;
use egui::Color32;
use log::warn;

mod ui;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    // Optional JSON settings file, e.g. CONWAY_SETTINGS=life.json
    let settings = match std::env::var_os("CONWAY_SETTINGS") {
        Some(path) => Settings::load_or_default(Path::new(&path)).unwrap_or_else(|e| {
            warn!("{e}, using default settings");
            Settings::default()
        }),
        None => Settings::default(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1250.0, 750.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |_cc| Box::new(GameOfLife::new(settings))),
    )
}

pub struct GameOfLife {
    pub simulation: Simulation,
    pub cadence: Cadence,
    pub pending: Settings,           // Settings panel, applied on reset
    pub live_color: Color32,
    pub dead_color: Color32,
    pub selected_pattern: usize,
    pub raw_state: String,
    pub live_cells: String,
    pub message: String,
}

impl GameOfLife {
    pub fn new(settings: Settings) -> Self {
        let mut simulation = Simulation::new(settings).unwrap_or_else(|e| {
            warn!("{e}, using default settings");
            Simulation::default()
        });
        simulation.randomize_and_reset();

        Self {
            cadence: Cadence::from_settings(simulation.settings()),
            pending: simulation.settings().clone(),
            simulation,
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
            selected_pattern: 0,
            raw_state: String::new(),
            live_cells: String::new(),
            message: "Ready to start...".to_string(),
        }
    }

    pub fn start(&mut self) {
        self.simulation.run();
        self.message = "Simulation running".to_string();
    }

    pub fn pause(&mut self) {
        self.simulation.pause();
        self.message = "Simulation paused".to_string();
    }

    pub fn step_once(&mut self) {
        let outcome = self.simulation.step();
        self.message = "Simulated one step".to_string();
        self.report(outcome);
    }

    /// Runs on every frame; steps when the cadence says so.
    pub fn tick(&mut self) {
        if let Some(outcome) = self.cadence.tick(&mut self.simulation) {
            self.report(outcome);
        }
    }

    fn report(&mut self, outcome: StepOutcome) {
        if outcome.newly_stalled {
            self.message = format!("Life has stalled at generation {}", outcome.generation);
        }
    }

    /// Applies the settings panel and reseeds at random.
    pub fn reset(&mut self) {
        match self.simulation.apply_settings(self.pending.clone()) {
            Ok(()) => {
                self.cadence = Cadence::from_settings(&self.pending);
                self.simulation.randomize_and_reset();
                self.message = "Ready to start...".to_string();
            }
            Err(e) => self.message = e.to_string(),
        }
    }

    pub fn randomize(&mut self) {
        self.simulation.randomize_and_reset();
        self.message = "Ready to start...".to_string();
    }

    pub fn clear(&mut self) {
        self.simulation.clear();
        self.message = "Ready to start...".to_string();
    }

    pub fn apply_selected_pattern(&mut self) {
        if let Some(pattern) = conway::PATTERNS.get(self.selected_pattern) {
            self.message = match self.simulation.load_pattern(pattern.name) {
                Ok(_) => "Ready to start...".to_string(),
                Err(e) => e.to_string(),
            };
        }
    }

    /// Fills the state box and the live-cell listing from `current`.
    pub fn show_state(&mut self) {
        self.raw_state = self.simulation.export_state();
        self.live_cells = self
            .simulation
            .current()
            .live_cells()
            .map(|(x, y)| format!("X: {x} Y: {y}"))
            .collect::<Vec<_>>()
            .join("\n");
    }

    pub fn load_state(&mut self) {
        self.message = match self.simulation.import_state(&self.raw_state) {
            Ok(()) => "Successfully loaded state".to_string(),
            Err(e) => e.to_string(),
        };
    }

    /// Pixel offset inside the grid to cell coordinates.
    pub fn cell_at(&self, dx: f32, dy: f32) -> Option<(usize, usize)> {
        let cell_size = self.simulation.settings().cell_size as f32;
        if dx < 0.0 || dy < 0.0 {
            return None;
        }
        let (x, y) = ((dx / cell_size) as usize, (dy / cell_size) as usize);
        self.simulation.current().in_bounds(x, y).then_some((x, y))
    }
}
