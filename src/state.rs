use num_traits::Float;

use crate::position::Position;

/// Per-cell bookkeeping of a single search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellRecord<C> {
    pub parent: Option<Position>,
    /// Lowest estimated total cost recorded for this cell, infinite if never reached.
    pub best_f: C,
    pub in_open: bool,
    pub in_closed: bool,
}

impl<C: Float> Default for CellRecord<C> {
    fn default() -> Self {
        CellRecord {
            parent: None,
            best_f: C::infinity(),
            in_open: false,
            in_closed: false,
        }
    }
}

/// Parent direction of a cell that has none.
const NO_PARENT: u8 = u8::MAX;
const IN_OPEN: u8 = 0b01;
const IN_CLOSED: u8 = 0b10;

/// Stored form of a [CellRecord]. The parent is always an adjacent cell, so it is kept as the
/// index `(d_row + 1) * 3 + (d_col + 1)` of the step from the cell to its parent.
#[derive(Clone, Copy, Debug)]
struct PackedRecord<C> {
    best_f: C,
    parent: u8,
    flags: u8,
}

impl<C: Float> Default for PackedRecord<C> {
    fn default() -> Self {
        PackedRecord {
            best_f: C::infinity(),
            parent: NO_PARENT,
            flags: 0,
        }
    }
}

fn encode_parent(pos: Position, parent: Option<Position>) -> u8 {
    match parent {
        Some(parent) => {
            debug_assert!(parent.is_adjacent(&pos, true), "parent of {pos} is not adjacent");
            let d_row = parent.row as isize - pos.row as isize;
            let d_col = parent.col as isize - pos.col as isize;
            ((d_row + 1) * 3 + (d_col + 1)) as u8
        }
        None => NO_PARENT,
    }
}

fn decode_parent(pos: Position, code: u8) -> Option<Position> {
    if code == NO_PARENT {
        return None;
    }
    let code = code as isize;
    pos.offset(code / 3 - 1, code % 3 - 1)
}

/// One [CellRecord] per grid cell, stored row-major. Records are handed out as copies.
///
/// A parent has to be adjacent to its cell. It is stored as a single byte direction, so a
/// record takes little more than its cost value even on very large grids.
///
/// The state is never cleared implicitly: call [reset](SearchState::reset) before every
/// independent search.
#[derive(Clone, Debug)]
pub struct SearchState<C = f64> {
    records: Vec<PackedRecord<C>>,
    width: usize,
    height: usize,
}

impl<C: Float> SearchState<C> {
    pub fn new(width: usize, height: usize) -> SearchState<C> {
        let mut state = SearchState {
            records: Vec::new(),
            width: 0,
            height: 0,
        };
        state.reset(width, height);
        state
    }

    /// Clears every record and resizes to the given grid, keeping the allocation if possible.
    pub fn reset(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.records.clear();
        self.records.resize(width * height, PackedRecord::default());
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The position has to lie inside the grid the state was reset to.
    #[inline]
    pub fn get(&self, pos: Position) -> CellRecord<C> {
        let packed = self.records[self.get_ix(pos)];
        CellRecord {
            parent: decode_parent(pos, packed.parent),
            best_f: packed.best_f,
            in_open: packed.flags & IN_OPEN != 0,
            in_closed: packed.flags & IN_CLOSED != 0,
        }
    }

    #[inline]
    pub fn set(&mut self, pos: Position, record: CellRecord<C>) {
        let ix = self.get_ix(pos);
        let mut flags = 0;
        if record.in_open {
            flags |= IN_OPEN;
        }
        if record.in_closed {
            flags |= IN_CLOSED;
        }
        self.records[ix] = PackedRecord {
            best_f: record.best_f,
            parent: encode_parent(pos, record.parent),
            flags,
        };
    }

    /// All positions currently marked open, in row-major order.
    pub fn open_cells(&self) -> Vec<Position> {
        self.positions_with(IN_OPEN)
    }

    /// All positions currently marked closed, in row-major order.
    pub fn closed_cells(&self) -> Vec<Position> {
        self.positions_with(IN_CLOSED)
    }

    fn positions_with(&self, flag: u8) -> Vec<Position> {
        let width = self.width.max(1);
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.flags & flag != 0)
            .map(|(ix, _)| Position::new(ix / width, ix % width))
            .collect()
    }

    #[inline]
    fn get_ix(&self, pos: Position) -> usize {
        debug_assert!(pos.row < self.height && pos.col < self.width);
        pos.row * self.width + pos.col
    }
}
