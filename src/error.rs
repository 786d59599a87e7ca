//! Error types for grid construction and search argument validation.

use core::fmt;
use thiserror::Error;

use crate::position::Position;

/// Why an endpoint passed to [find_path](crate::PathFinder::find_path) was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndpointIssue {
    /// The endpoint lies on an obstacle cell.
    Obstacle,
    /// Begin and end are the same cell.
    BeginEqualsEnd,
}

impl fmt::Display for EndpointIssue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EndpointIssue::Obstacle => write!(f, "cell is an obstacle"),
            EndpointIssue::BeginEqualsEnd => write!(f, "begin and end are the same cell"),
        }
    }
}

/// Argument errors reported before any search work begins. Not finding a path is not an
/// error, see [SearchResult::NotFound](crate::SearchResult::NotFound).
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    #[error("position {position} is outside the {width}x{height} grid")]
    OutOfBounds {
        position: Position,
        width: usize,
        height: usize,
    },

    #[error("invalid endpoint {position}: {reason}")]
    InvalidEndpoint {
        position: Position,
        reason: EndpointIssue,
    },

    #[error("{len} fields cannot fill a {width}x{height} grid")]
    DimensionMismatch {
        width: usize,
        height: usize,
        len: usize,
    },
}

pub type Result<T> = std::result::Result<T, GridError>;
