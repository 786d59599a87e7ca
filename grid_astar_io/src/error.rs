use grid_astar::GridError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapError {
    #[error("could not access map file: {0}")]
    Io(#[from] std::io::Error),

    #[error("map text is empty, expected a \"<width> <height>\" header")]
    MissingHeader,

    #[error("invalid map header {0:?}, expected \"<width> <height>\"")]
    InvalidHeader(String),

    #[error("expected {expected} rows but found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown cell {found:?} at row {row}, column {col}")]
    UnknownCell { row: usize, col: usize, found: char },

    #[error("second {marker:?} marker at row {row}, column {col}")]
    DuplicateMarker { marker: char, row: usize, col: usize },

    #[error(transparent)]
    Grid(#[from] GridError),
}

pub type Result<T> = std::result::Result<T, MapError>;
