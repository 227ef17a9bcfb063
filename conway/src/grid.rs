// grid.rs - Fixed-size cell grid for Conway's Game of Life

use log::debug;
use rand::Rng;
use serde_json::Value;

use crate::error::{LifeError, Result};

pub const DEFAULT_ALIVE_PROBABILITY: f64 = 0.3;

/// State of a single cell as seen by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Dead,
    Alive,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}

/// A `width` x `height` rectangle of cells with hard edges.
///
/// Cells are addressed as `(x, y)` with `x` in `0..width` (column) and `y` in
/// `0..height` (row). Storage is column-major, the same order used by
/// [`Grid::serialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Every cell dead.
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    fn index(&self, x: usize, y: usize) -> Result<usize> {
        if self.in_bounds(x, y) {
            Ok(x * self.height + y)
        } else {
            Err(LifeError::IndexOutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Off-grid coordinates read as dead.
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.in_bounds(x, y) && self.cells[x * self.height + y]
    }

    pub fn cell(&self, x: usize, y: usize) -> Result<Cell> {
        let i = self.index(x, y)?;
        Ok(Cell::from(self.cells[i]))
    }

    pub fn set(&mut self, x: usize, y: usize, alive: bool) -> Result<()> {
        let i = self.index(x, y)?;
        self.cells[i] = alive;
        Ok(())
    }

    pub fn set_alive(&mut self, x: usize, y: usize) -> Result<()> {
        self.set(x, y, true)
    }

    /// Flips one cell and returns its new state.
    pub fn toggle(&mut self, x: usize, y: usize) -> Result<Cell> {
        let i = self.index(x, y)?;
        self.cells[i] = !self.cells[i];
        Ok(Cell::from(self.cells[i]))
    }

    /// Marks every listed coordinate alive and leaves the rest untouched.
    /// Coordinates off the grid are skipped; returns how many were placed.
    pub fn load_pattern(&mut self, coordinates: &[(usize, usize)]) -> usize {
        let mut placed = 0;
        for &(x, y) in coordinates {
            match self.set_alive(x, y) {
                Ok(()) => placed += 1,
                Err(_) => debug!("pattern cell ({x}, {y}) falls outside the grid, skipped"),
            }
        }
        placed
    }

    /// Sets each cell alive independently with probability `alive_probability`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, alive_probability: f64) {
        let p = if alive_probability.is_nan() { 0.0 } else { alive_probability.clamp(0.0, 1.0) };
        for cell in self.cells.iter_mut() {
            *cell = rng.gen_bool(p);
        }
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [bool] {
        &mut self.cells
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Overwrites this grid with `other` without reallocating.
    pub fn copy_from(&mut self, other: &Grid) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(LifeError::DimensionMismatch {
                expected: self.dimensions(),
                found: other.dimensions(),
            });
        }
        self.cells.copy_from_slice(&other.cells);
        Ok(())
    }

    /// Alive coordinates in column-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let height = self.height;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(move |(i, _)| (i / height, i % height))
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Reads nested arrays of 0/1, outer index `x`, inner index `y`.
    pub fn parse(text: &str) -> Result<Grid> {
        let columns: Vec<Vec<u8>> = serde_json::from_str(text.trim())
            .map_err(|e| LifeError::MalformedState(e.to_string()))?;

        let width = columns.len();
        let height = columns.first().map_or(0, Vec::len);
        if width == 0 || height == 0 {
            return Err(LifeError::MalformedState("state is empty".to_string()));
        }

        let mut grid = Grid::blank(width, height);
        for (x, column) in columns.iter().enumerate() {
            if column.len() != height {
                return Err(LifeError::MalformedState(format!(
                    "column {x} has {} cells, expected {height}",
                    column.len()
                )));
            }
            for (y, &value) in column.iter().enumerate() {
                match value {
                    0 => {}
                    1 => grid.cells[x * height + y] = true,
                    other => {
                        return Err(LifeError::MalformedState(format!(
                            "cell ({x}, {y}) holds {other}, expected 0 or 1"
                        )));
                    }
                }
            }
        }
        Ok(grid)
    }

    /// Inverse of [`Grid::parse`].
    pub fn serialize(&self) -> String {
        let columns = self
            .cells
            .chunks(self.height.max(1))
            .map(|column| Value::Array(column.iter().map(|&alive| Value::from(u8::from(alive))).collect()))
            .collect();
        Value::Array(columns).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn blank_grid_is_all_dead() {
        let grid = Grid::blank(7, 4);
        assert_eq!(grid.dimensions(), (7, 4));
        assert_eq!(grid.population(), 0);
        assert_eq!(grid.cell(6, 3), Ok(Cell::Dead));
        assert!(matches!(grid.cell(7, 0), Err(LifeError::IndexOutOfRange { .. })));
        assert!(!grid.is_alive(7, 0));
    }

    #[test]
    fn toggle_flips_exactly_one_cell() {
        let mut grid = Grid::blank(5, 5);
        assert_eq!(grid.toggle(2, 3), Ok(Cell::Alive));
        assert_eq!(grid.live_cells().collect::<Vec<_>>(), vec![(2, 3)]);
        assert_eq!(grid.toggle(2, 3), Ok(Cell::Dead));
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn toggle_out_of_bounds_is_rejected() {
        let mut grid = Grid::blank(3, 2);
        assert_eq!(
            grid.toggle(3, 0),
            Err(LifeError::IndexOutOfRange { x: 3, y: 0, width: 3, height: 2 })
        );
        assert_eq!(grid, Grid::blank(3, 2));
    }

    #[test]
    fn load_pattern_keeps_existing_cells_and_skips_off_grid() {
        let mut grid = Grid::blank(4, 4);
        grid.set_alive(0, 0).unwrap();
        let placed = grid.load_pattern(&[(1, 1), (3, 3), (4, 1), (1, 9)]);
        assert_eq!(placed, 2);
        assert_eq!(grid.live_cells().collect::<Vec<_>>(), vec![(0, 0), (1, 1), (3, 3)]);
    }

    #[test]
    fn randomize_respects_probability_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = Grid::blank(20, 20);
        grid.randomize(&mut rng, 1.0);
        assert_eq!(grid.population(), 400);
        grid.randomize(&mut rng, 0.0);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn randomize_is_reproducible_with_seed() {
        let mut a = Grid::blank(30, 30);
        let mut b = Grid::blank(30, 30);
        a.randomize(&mut StdRng::seed_from_u64(42), DEFAULT_ALIVE_PROBABILITY);
        b.randomize(&mut StdRng::seed_from_u64(42), DEFAULT_ALIVE_PROBABILITY);
        assert_eq!(a, b);
        assert!(a.population() > 0 && a.population() < 900);
    }

    #[test]
    fn serialize_is_column_major() {
        let mut grid = Grid::blank(3, 2);
        grid.set_alive(1, 0).unwrap();
        grid.set_alive(2, 1).unwrap();
        assert_eq!(grid.serialize(), "[[0,0],[1,0],[0,1]]");
    }

    #[test]
    fn parse_round_trips() {
        let mut grid = Grid::blank(6, 9);
        grid.randomize(&mut StdRng::seed_from_u64(3), 0.5);
        assert_eq!(Grid::parse(&grid.serialize()), Ok(grid));
    }

    #[test]
    fn parse_accepts_whitespace() {
        let grid = Grid::parse(" [ [0, 1, 0],\n [1, 1, 0] ] \n").unwrap();
        assert_eq!(grid.dimensions(), (2, 3));
        assert_eq!(grid.live_cells().collect::<Vec<_>>(), vec![(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn parse_rejects_bad_input() {
        for text in ["", "not json", "[]", "[[]]", "[[0,1],[1]]", "[[0,2]]", "[[0,-1]]", "{\"a\":1}"] {
            assert!(
                matches!(Grid::parse(text), Err(LifeError::MalformedState(_))),
                "accepted {text:?}"
            );
        }
    }

    #[test]
    fn copy_from_checks_dimensions() {
        let mut target = Grid::blank(2, 2);
        let mut source = Grid::blank(2, 2);
        source.set_alive(1, 1).unwrap();
        target.copy_from(&source).unwrap();
        assert_eq!(target, source);

        assert_eq!(
            target.copy_from(&Grid::blank(3, 2)),
            Err(LifeError::DimensionMismatch { expected: (2, 2), found: (3, 2) })
        );
    }
}
