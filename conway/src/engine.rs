// engine.rs - Generation transition: neighbor counting and the Life rule

use crate::error::{LifeError, Result};
use crate::grid::Grid;

// Neighbor positions relative to the cell; anything off the grid is skipped
const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// Live cells among the up-to-8 neighbors of `(x, y)`. No wraparound, so
/// corner cells have 3 candidates and edge cells 5.
pub fn neighbor_count(grid: &Grid, x: usize, y: usize) -> u8 {
    let mut count = 0;
    for &(dx, dy) in &NEIGHBORS {
        let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy)) else {
            continue;
        };
        if grid.is_alive(nx, ny) {
            count += 1;
        }
    }
    count
}

/// Conway's rule, evaluated top to bottom. Two neighbors never give birth.
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    if neighbors < 2 {
        false                                   // Underpopulation
    } else if (neighbors == 2 || neighbors == 3) && alive {
        true                                    // Survival
    } else if neighbors > 3 {
        false                                   // Overpopulation
    } else if neighbors == 3 && !alive {
        true                                    // Birth
    } else {
        false                                   // Stays dead
    }
}

/// Writes the generation following `current` into `next`, overwriting every
/// cell. `current` is not modified and nothing is allocated.
pub fn compute_next_generation(current: &Grid, next: &mut Grid) -> Result<()> {
    if current.dimensions() != next.dimensions() {
        return Err(LifeError::DimensionMismatch {
            expected: current.dimensions(),
            found: next.dimensions(),
        });
    }

    advance(current, next);
    Ok(())
}

/// [`compute_next_generation`] for callers that already guarantee matching
/// dimensions.
pub(crate) fn advance(current: &Grid, next: &mut Grid) {
    debug_assert_eq!(current.dimensions(), next.dimensions());
    let height = current.height();
    for (i, cell) in next.cells_mut().iter_mut().enumerate() {
        let (x, y) = (i / height, i % height);
        *cell = next_state(current.is_alive(x, y), neighbor_count(current, x, y));
    }
}
