use fxhash::FxBuildHasher;
use indexmap::IndexSet;
use itertools::Itertools;

use crate::position::Position;

/// Cells of a path in order, with constant time membership tests. A shortest path never visits
/// a cell twice, so a set loses nothing.
pub type PathCells = IndexSet<Position, FxBuildHasher>;

/// Restartable cursor over a stored path, from begin to end inclusive.
///
/// ```
/// use grid_astar::{GridMap, MoveMode, PathFinder, Position};
///
/// let mut finder = PathFinder::new(GridMap::new(3, 1), MoveMode::FourWay);
/// finder.find_path(Position::new(0, 0), Position::new(0, 2)).unwrap();
/// let mut path = finder.get_path();
/// let mut cols = Vec::new();
/// while let Some(p) = path.current() {
///     cols.push(p.col);
///     path.advance();
/// }
/// assert_eq!(cols, vec![0, 1, 2]);
/// assert!(path.at_end());
/// ```
#[derive(Clone, Debug)]
pub struct PathView<'a> {
    cells: &'a PathCells,
    cursor: usize,
}

impl<'a> PathView<'a> {
    pub fn new(cells: &'a PathCells) -> PathView<'a> {
        PathView { cells, cursor: 0 }
    }

    /// Moves the cursor back to the first cell.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Moves to the next cell. Returns false if the cursor was already past the last cell.
    pub fn advance(&mut self) -> bool {
        if self.at_end() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// The cell under the cursor, [None] once the path is exhausted.
    pub fn current(&self) -> Option<Position> {
        self.cells.get_index(self.cursor).copied()
    }

    pub fn at_end(&self) -> bool {
        self.cursor >= self.cells.len()
    }

    /// Membership over the whole path, independent of the cursor.
    pub fn contains(&self, pos: &Position) -> bool {
        self.cells.contains(pos)
    }

    /// Number of cells, not steps.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn first(&self) -> Option<Position> {
        self.cells.first().copied()
    }

    pub fn last(&self) -> Option<Position> {
        self.cells.last().copied()
    }

    /// Iterates over all cells, ignoring the cursor.
    pub fn iter(&self) -> impl Iterator<Item = &'a Position> + 'a {
        self.cells.iter()
    }

    pub fn to_vec(&self) -> Vec<Position> {
        self.cells.iter().copied().collect()
    }

    /// Sum of the true step costs along the path.
    pub fn cost(&self) -> f64 {
        self.cells
            .iter()
            .tuple_windows()
            .map(|(a, b)| a.step_cost(b))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DIAGONAL_COST;

    fn cells(points: &[(usize, usize)]) -> PathCells {
        points.iter().map(|&p| Position::from(p)).collect()
    }

    #[test]
    fn cursor_walks_and_restarts() {
        let stored = cells(&[(0, 0), (0, 1), (1, 2)]);
        let mut view = PathView::new(&stored);
        assert_eq!(view.current(), Some(Position::new(0, 0)));
        assert!(view.advance());
        assert!(view.advance());
        assert_eq!(view.current(), Some(Position::new(1, 2)));
        assert!(!view.at_end());
        assert!(view.advance());
        assert!(view.at_end());
        assert_eq!(view.current(), None);
        assert!(!view.advance());
        assert!(view.at_end());
        view.reset();
        assert_eq!(view.current(), Some(Position::new(0, 0)));
    }

    #[test]
    fn contains_ignores_cursor() {
        let stored = cells(&[(0, 0), (0, 1), (1, 2)]);
        let mut view = PathView::new(&stored);
        while view.advance() {}
        assert!(view.contains(&Position::new(0, 0)));
        assert!(!view.contains(&Position::new(1, 1)));
        assert_eq!(view.len(), 3);
        assert_eq!(view.first(), Some(Position::new(0, 0)));
        assert_eq!(view.last(), Some(Position::new(1, 2)));
    }

    #[test]
    fn empty_view() {
        let stored = PathCells::default();
        let mut view = PathView::new(&stored);
        assert!(view.is_empty());
        assert!(view.at_end());
        assert!(!view.advance());
        assert_eq!(view.current(), None);
        assert_eq!(view.cost(), 0.0);
    }

    #[test]
    fn cost_sums_step_costs() {
        let stored = cells(&[(0, 0), (0, 1), (1, 2), (2, 2)]);
        let view = PathView::new(&stored);
        assert!((view.cost() - (2.0 + DIAGONAL_COST)).abs() < 1e-12);
        assert_eq!(view.to_vec().len(), 4);
        assert_eq!(view.iter().count(), 4);
    }
}
