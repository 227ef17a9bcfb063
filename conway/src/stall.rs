// stall.rs - Detects when the grid has stopped changing

use crate::grid::Grid;

/// One-shot stall flag for a run.
///
/// The newest generation is compared with the one two steps before it, so a
/// still life and a period-2 oscillator both count as stalled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StallDetector {
    stalled_at: Option<u64>,
}

impl StallDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_stalled(&self) -> bool {
        self.stalled_at.is_some()
    }

    /// Generation at which the stall was first seen.
    pub fn stalled_at(&self) -> Option<u64> {
        self.stalled_at
    }

    /// Returns `true` only the first time a match is seen; later matches keep
    /// the flag set without reporting again.
    pub fn observe(&mut self, newest: &Grid, two_back: &Grid, generation: u64) -> bool {
        if self.stalled_at.is_some() || newest != two_back {
            return false;
        }
        self.stalled_at = Some(generation);
        true
    }

    pub fn reset(&mut self) {
        self.stalled_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_grids_stall_once() {
        let mut detector = StallDetector::new();
        let grid = Grid::blank(4, 4);

        assert!(detector.observe(&grid, &grid.clone(), 3));
        assert!(detector.is_stalled());
        assert_eq!(detector.stalled_at(), Some(3));

        assert!(!detector.observe(&grid, &grid.clone(), 4));
        assert_eq!(detector.stalled_at(), Some(3));
    }

    #[test]
    fn a_single_difference_is_not_a_stall() {
        let mut detector = StallDetector::new();
        let a = Grid::blank(4, 4);
        let mut b = Grid::blank(4, 4);
        b.set_alive(3, 3).unwrap();

        assert!(!detector.observe(&a, &b, 1));
        assert!(!detector.is_stalled());
    }

    #[test]
    fn reset_clears_the_flag() {
        let mut detector = StallDetector::new();
        let grid = Grid::blank(2, 2);
        detector.observe(&grid, &grid.clone(), 1);
        detector.reset();
        assert!(!detector.is_stalled());
        assert!(detector.observe(&grid, &grid.clone(), 5));
    }
}
