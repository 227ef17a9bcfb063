// settings.rs - Simulation settings and their JSON file form

use std::{fs, io, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{LifeError, Result};
use crate::grid::DEFAULT_ALIVE_PROBABILITY;

/// Canvas size and cell size are in pixels; the grid has
/// `width / cell_size` columns and `height / cell_size` rows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub width: usize,
    pub height: usize,
    pub cell_size: usize,
    pub pause_on_stall: bool,
    pub alive_probability: f64,
    pub frames_per_step: u32,
    pub steps_per_tick: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 900,
            height: 600,
            cell_size: 12,
            pause_on_stall: false,
            alive_probability: DEFAULT_ALIVE_PROBABILITY,
            frames_per_step: 1,
            steps_per_tick: 1,
        }
    }
}

impl Settings {
    /// Default settings for a grid of exactly `columns` x `rows` cells.
    pub fn with_cells(columns: usize, rows: usize) -> Result<Self> {
        Self::default().resized(columns, rows)
    }

    /// These settings with the canvas sized for `columns` x `rows` cells.
    pub fn resized(&self, columns: usize, rows: usize) -> Result<Self> {
        let too_large = || LifeError::Settings(format!("a {columns}x{rows} grid is too large"));
        let settings = Self {
            width: columns.checked_mul(self.cell_size).ok_or_else(too_large)?,
            height: rows.checked_mul(self.cell_size).ok_or_else(too_large)?,
            ..self.clone()
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn columns(&self) -> usize {
        self.width.checked_div(self.cell_size).unwrap_or(0)
    }

    pub fn rows(&self) -> usize {
        self.height.checked_div(self.cell_size).unwrap_or(0)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cell_size == 0 {
            return Err(LifeError::Settings("cell size must be positive".to_string()));
        }
        if self.columns() == 0 || self.rows() == 0 {
            return Err(LifeError::Settings(format!(
                "a {}x{} canvas holds no {}px cells",
                self.width, self.height, self.cell_size
            )));
        }
        if self.columns().checked_mul(self.rows()).is_none() {
            return Err(LifeError::Settings(format!(
                "a {}x{} grid is too large",
                self.columns(),
                self.rows()
            )));
        }
        if !(0.0..=1.0).contains(&self.alive_probability) {
            return Err(LifeError::Settings(format!(
                "alive probability {} is outside 0..=1",
                self.alive_probability
            )));
        }
        if self.frames_per_step == 0 {
            return Err(LifeError::Settings("frames per step must be positive".to_string()));
        }
        if self.steps_per_tick == 0 {
            return Err(LifeError::Settings("steps per tick must be positive".to_string()));
        }
        Ok(())
    }

    /// Reads settings from a JSON file; a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Settings> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
            Err(e) => return Err(LifeError::Settings(format!("{}: {e}", path.display()))),
        };
        let settings: Settings = serde_json::from_str(&text)
            .map_err(|e| LifeError::Settings(format!("{}: {e}", path.display())))?;
        settings.validate()?;
        Ok(settings)
    }
}
