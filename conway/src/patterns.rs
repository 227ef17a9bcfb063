// patterns.rs - Named preset patterns

use crate::grid::Grid;

/// A shape drawn onto a blank grid at a fixed offset. Cells are `(x, y)`
/// relative to `origin`.
pub struct Pattern {
    pub name: &'static str,
    pub origin: (usize, usize),
    pub cells: &'static [(usize, usize)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        origin: (24, 21),
        cells: &[(0, 2), (1, 0), (1, 2), (2, 1), (2, 2)],
    },
    Pattern {
        name: "Blinker",
        origin: (23, 24),
        cells: &[(0, 0), (1, 0), (2, 0)],
    },
    Pattern {
        name: "Toad",
        origin: (23, 23),
        cells: &[(0, 1), (1, 0), (1, 1), (2, 0), (2, 1), (3, 0)],
    },
    Pattern {
        name: "Beacon",
        origin: (9, 9),
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "Pulsar",
        origin: (21, 19),
        cells: &[
            // Left arms
            (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
            (2, 0), (2, 5), (2, 7), (2, 12),
            (3, 0), (3, 5), (3, 7), (3, 12),
            (4, 0), (4, 5), (4, 7), (4, 12),
            (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
            // Right arms (mirrored)
            (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
            (8, 0), (8, 5), (8, 7), (8, 12),
            (9, 0), (9, 5), (9, 7), (9, 12),
            (10, 0), (10, 5), (10, 7), (10, 12),
            (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
        ],
    },
    Pattern {
        name: "R-pentomino",
        origin: (23, 23),
        cells: &[(0, 2), (1, 1), (1, 2), (2, 0), (2, 1)],
    },
    Pattern {
        name: "Gosper Glider Gun",
        origin: (1, 1),
        cells: &[
            (0, 4), (0, 5), (1, 4), (1, 5),
            (10, 4), (10, 5), (10, 6), (11, 3), (11, 7), (12, 2), (12, 8),
            (13, 2), (13, 8), (14, 5), (15, 3), (15, 7), (16, 4), (16, 5),
            (16, 6), (17, 5), (20, 2), (20, 3), (20, 4), (21, 2), (21, 3),
            (21, 4), (22, 1), (22, 5), (24, 0), (24, 1), (24, 5), (24, 6),
            (34, 2), (34, 3), (35, 2), (35, 3),
        ],
    },
];

/// Case-insensitive lookup.
pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name.trim()))
}

impl Pattern {
    /// Absolute coordinates of every cell.
    pub fn coordinates(&self) -> Vec<(usize, usize)> {
        let (ox, oy) = self.origin;
        self.cells.iter().map(|&(x, y)| (ox + x, oy + y)).collect()
    }

    /// Clears `grid` and draws the pattern; returns how many cells landed on it.
    pub fn apply(&self, grid: &mut Grid) -> usize {
        grid.clear();
        grid.load_pattern(&self.coordinates())
    }
}
