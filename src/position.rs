use core::fmt;

use crate::{CARDINAL_COST, DIAGONAL_COST};

/// A cell on the grid, addressed by row and column with `(0, 0)` in the top left corner.
///
/// Ordering is lexicographic: first by row, then by column. The derived implementation
/// relies on the field order, so `row` has to stay the first field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Position {
        Position { row, col }
    }

    /// Shifts the position by a signed delta. Returns [None] instead of wrapping around when
    /// either coordinate would drop below zero (or overflow).
    pub fn offset(&self, d_row: isize, d_col: isize) -> Option<Position> {
        Some(Position {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }

    pub fn row_distance(&self, other: &Position) -> usize {
        self.row.abs_diff(other.row)
    }

    pub fn col_distance(&self, other: &Position) -> usize {
        self.col.abs_diff(other.col)
    }

    /// Whether `other` is reachable from `self` in a single step when diagonal steps are
    /// allowed (Moore neighbourhood) or not (von Neumann neighbourhood).
    pub fn is_adjacent(&self, other: &Position, allow_diagonal: bool) -> bool {
        let d_row = self.row_distance(other);
        let d_col = self.col_distance(other);
        match (d_row, d_col) {
            (0, 1) | (1, 0) => true,
            (1, 1) => allow_diagonal,
            _ => false,
        }
    }

    /// True edge cost of a single step to an adjacent cell.
    pub fn step_cost(&self, other: &Position) -> f64 {
        debug_assert!(self.row_distance(other) <= 1 && self.col_distance(other) <= 1);
        if self.row != other.row && self.col != other.col {
            DIAGONAL_COST
        } else {
            CARDINAL_COST
        }
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Position {
        Position::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
