use core::fmt;
use itertools::iproduct;
use smallvec::SmallVec;

use crate::error::{GridError, Result};
use crate::position::Position;
use crate::{DIAGONAL_COST, N_SMALLVEC_SIZE};

/// Classification of a single cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldType {
    #[default]
    Free,
    Obstacle,
}

/// The move set used during a search. Also selects the matching admissible heuristic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveMode {
    /// Up, down, left and right.
    FourWay,
    /// [FourWay](MoveMode::FourWay) plus the four diagonals.
    #[default]
    EightWay,
}

const FOUR_WAY_OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const EIGHT_WAY_OFFSETS: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

impl MoveMode {
    pub fn allows_diagonal(&self) -> bool {
        matches!(self, MoveMode::EightWay)
    }

    /// Row and column deltas of a single step, orthogonal steps first.
    pub fn offsets(&self) -> &'static [(isize, isize)] {
        match self {
            MoveMode::FourWay => &FOUR_WAY_OFFSETS,
            MoveMode::EightWay => &EIGHT_WAY_OFFSETS,
        }
    }

    /// Heuristic distance between two cells. Uses the
    /// [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) for four-way movement
    /// and the octile distance for eight-way movement, i.e. taking the maximal amount of diagonal
    /// steps before going straight. Both are exact on an empty grid, so they never overestimate.
    pub fn distance(&self, a: &Position, b: &Position) -> f64 {
        let d_row = a.row_distance(b) as f64;
        let d_col = a.col_distance(b) as f64;
        match self {
            MoveMode::FourWay => d_row + d_col,
            MoveMode::EightWay => {
                d_row.max(d_col) + (DIAGONAL_COST - 1.0) * d_row.min(d_col)
            }
        }
    }
}

pub type Neighbours = SmallVec<[Position; N_SMALLVEC_SIZE]>;

/// Read access to a static obstacle grid, all a [PathFinder](crate::PathFinder) needs.
/// Only [width](SearchMap::width), [height](SearchMap::height) and [field](SearchMap::field)
/// have to be provided.
pub trait SearchMap {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Fails with [GridError::OutOfBounds] if the position is not on the grid.
    fn field(&self, pos: Position) -> Result<FieldType>;

    fn is_inside(&self, pos: Position) -> bool {
        pos.row < self.height() && pos.col < self.width()
    }

    fn is_free(&self, pos: Position) -> bool {
        matches!(self.field(pos), Ok(FieldType::Free))
    }

    fn cell_count(&self) -> usize {
        self.width() * self.height()
    }

    /// In-bounds cells one step away from `pos`. Obstacles are included, cells that would lie
    /// beyond any border are not.
    fn neighbours(&self, pos: Position, mode: MoveMode) -> Neighbours {
        mode.offsets()
            .iter()
            .filter_map(|&(d_row, d_col)| pos.offset(d_row, d_col))
            .filter(|p| self.is_inside(*p))
            .collect()
    }

    fn distance(&self, a: &Position, b: &Position, mode: MoveMode) -> f64 {
        mode.distance(a, b)
    }
}

/// A rectangular grid of [FieldType] values stored row-major. Edit it with
/// [set_field](GridMap::set_field) during setup; a [PathFinder](crate::PathFinder) takes its own
/// snapshot so a running search never observes changes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridMap {
    width: usize,
    height: usize,
    fields: Vec<FieldType>,
}

impl GridMap {
    /// Creates a grid where every cell is [FieldType::Free].
    pub fn new(width: usize, height: usize) -> GridMap {
        GridMap::filled(width, height, FieldType::Free)
    }

    pub fn filled(width: usize, height: usize, field: FieldType) -> GridMap {
        GridMap {
            width,
            height,
            fields: vec![field; width * height],
        }
    }

    /// Builds a grid by asking `field` for every cell, in row-major order.
    pub fn from_fn<F>(width: usize, height: usize, mut field: F) -> GridMap
    where
        F: FnMut(Position) -> FieldType,
    {
        let fields = iproduct!(0..height, 0..width)
            .map(|(row, col)| field(Position::new(row, col)))
            .collect();
        GridMap {
            width,
            height,
            fields,
        }
    }

    /// Builds a grid from row-major fields.
    pub fn from_fields(width: usize, height: usize, fields: Vec<FieldType>) -> Result<GridMap> {
        if fields.len() != width * height {
            return Err(GridError::DimensionMismatch {
                width,
                height,
                len: fields.len(),
            });
        }
        Ok(GridMap {
            width,
            height,
            fields,
        })
    }

    pub fn fields(&self) -> &[FieldType] {
        &self.fields
    }

    pub fn set_field(&mut self, pos: Position, field: FieldType) -> Result<()> {
        let ix = self.checked_ix(pos)?;
        self.fields[ix] = field;
        Ok(())
    }

    /// Sets every cell of the rectangle spanning `rows` x `cols` cells from `top_left`.
    pub fn set_rect(
        &mut self,
        top_left: Position,
        rows: usize,
        cols: usize,
        field: FieldType,
    ) -> Result<()> {
        if rows == 0 || cols == 0 {
            return Ok(());
        }
        let bottom_right = Position::new(top_left.row + rows - 1, top_left.col + cols - 1);
        self.checked_ix(top_left)?;
        self.checked_ix(bottom_right)?;
        for (row, col) in iproduct!(top_left.row..=bottom_right.row, top_left.col..=bottom_right.col)
        {
            let ix = self.get_ix(Position::new(row, col));
            self.fields[ix] = field;
        }
        Ok(())
    }

    pub fn obstacle_count(&self) -> usize {
        self.fields
            .iter()
            .filter(|f| **f == FieldType::Obstacle)
            .count()
    }

    /// Row-major index of a position. The position has to be inside the grid.
    pub fn get_ix(&self, pos: Position) -> usize {
        pos.row * self.width + pos.col
    }

    fn checked_ix(&self, pos: Position) -> Result<usize> {
        if self.is_inside(pos) {
            Ok(self.get_ix(pos))
        } else {
            Err(GridError::OutOfBounds {
                position: pos,
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl SearchMap for GridMap {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn field(&self, pos: Position) -> Result<FieldType> {
        self.checked_ix(pos).map(|ix| self.fields[ix])
    }
}

impl fmt::Display for GridMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Grid:")?;
        for row in self.fields.chunks(self.width.max(1)) {
            let values = row
                .iter()
                .map(|field| (*field == FieldType::Obstacle) as i32)
                .collect::<Vec<i32>>();
            writeln!(f, "{:?}", values)?;
        }
        Ok(())
    }
}
