// buffers.rs - Three grid buffers with rotating roles

use crate::grid::Grid;

/// Owns three equally sized grids and a rotating index that decides which one
/// plays `current`, `next` and `previous`.
///
/// With `current` at slot `i`, `next` is `(i + 1) % 3` and `previous` is
/// `(i + 2) % 3`. Advancing `i` by one therefore moves `next` into `current`,
/// `current` into `previous`, and hands the old `previous` back as scratch.
#[derive(Debug, Clone)]
pub struct GridBuffers {
    grids: [Grid; 3],
    current: usize,
}

impl GridBuffers {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grids: [
                Grid::blank(width, height),
                Grid::blank(width, height),
                Grid::blank(width, height),
            ],
            current: 0,
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.grids[0].dimensions()
    }

    fn next_index(&self) -> usize {
        (self.current + 1) % 3
    }

    fn previous_index(&self) -> usize {
        (self.current + 2) % 3
    }

    pub fn current(&self) -> &Grid {
        &self.grids[self.current]
    }

    pub fn current_mut(&mut self) -> &mut Grid {
        &mut self.grids[self.current]
    }

    pub fn previous(&self) -> &Grid {
        &self.grids[self.previous_index()]
    }

    /// The scratch buffer. Between a rotation and the next computation it still
    /// holds the generation two steps before `current`.
    pub fn next(&self) -> &Grid {
        &self.grids[self.next_index()]
    }

    /// `current` for reading alongside `next` for writing.
    pub fn split(&mut self) -> (&Grid, &mut Grid) {
        let [a, b, c] = &mut self.grids;
        match self.current {
            0 => (&*a, b),
            1 => (&*b, c),
            _ => (&*c, a),
        }
    }

    /// Three-way role exchange. No cell data moves.
    pub fn rotate(&mut self) {
        self.current = self.next_index();
    }

    /// Kills every cell in the two non-current buffers, in place.
    pub fn clear_history(&mut self) {
        let current = self.current;
        for (i, grid) in self.grids.iter_mut().enumerate() {
            if i != current {
                grid.clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(buffers: &mut GridBuffers) {
        // Mark each slot by its index so roles can be traced after rotation
        for i in 0..3 {
            buffers.grids[i].set_alive(i, 0).unwrap();
        }
    }

    fn tag(grid: &Grid) -> Vec<(usize, usize)> {
        grid.live_cells().collect()
    }

    #[test]
    fn rotate_moves_every_role() {
        let mut buffers = GridBuffers::new(3, 1);
        tagged(&mut buffers);

        let (current, next, previous) = (tag(buffers.current()), tag(buffers.next()), tag(buffers.previous()));
        buffers.rotate();

        assert_eq!(tag(buffers.previous()), current);
        assert_eq!(tag(buffers.current()), next);
        assert_eq!(tag(buffers.next()), previous);
    }

    #[test]
    fn three_rotations_return_to_start() {
        let mut buffers = GridBuffers::new(3, 1);
        tagged(&mut buffers);
        let start = tag(buffers.current());
        for _ in 0..3 {
            buffers.rotate();
        }
        assert_eq!(buffers.current, 0);
        assert_eq!(tag(buffers.current()), start);
    }

    #[test]
    fn rotate_does_not_reallocate() {
        let mut buffers = GridBuffers::new(8, 8);
        let addresses: Vec<*const Grid> = buffers.grids.iter().map(|g| g as *const Grid).collect();
        let next_before = buffers.next() as *const Grid;
        buffers.rotate();
        assert_eq!(buffers.current() as *const Grid, next_before);
        let after: Vec<*const Grid> = buffers.grids.iter().map(|g| g as *const Grid).collect();
        assert_eq!(addresses, after);
    }

    #[test]
    fn split_pairs_current_with_next() {
        let mut buffers = GridBuffers::new(3, 1);
        tagged(&mut buffers);
        for _ in 0..3 {
            let expected_current = tag(buffers.current());
            let expected_next = tag(buffers.next());
            let (current, next) = buffers.split();
            assert_eq!(tag(current), expected_current);
            assert_eq!(tag(next), expected_next);
            buffers.rotate();
        }
    }

    #[test]
    fn clear_history_keeps_current() {
        let mut buffers = GridBuffers::new(3, 1);
        tagged(&mut buffers);
        buffers.rotate();
        buffers.clear_history();
        assert_eq!(tag(buffers.current()), vec![(1, 0)]);
        assert_eq!(buffers.next().population(), 0);
        assert_eq!(buffers.previous().population(), 0);
    }
}
