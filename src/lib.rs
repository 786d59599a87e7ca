//! # grid_astar
//!
//! Shortest paths on a 2D obstacle grid using
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm), with the internal state of the
//! search (open and closed cells, the reconstructed path) kept around for inspection.
//! Supports four-way movement with the Manhattan distance as heuristic and eight-way movement
//! with the octile distance, where diagonal steps cost √2.
//!
//! Outdated frontier entries are skipped lazily instead of using a decrease-key operation.
//! Optionally pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to avoid flood-filling behaviour if no path exists.
//!
//! ```
//! use grid_astar::{FieldType, GridMap, MoveMode, PathFinder, Position, SearchResult};
//!
//! // |b  |
//! // | # |
//! // |  e|
//! let mut map = GridMap::new(3, 3);
//! map.set_field(Position::new(1, 1), FieldType::Obstacle).unwrap();
//! let mut finder = PathFinder::new(map, MoveMode::FourWay);
//! let result = finder.find_path(Position::new(0, 0), Position::new(2, 2)).unwrap();
//! assert_eq!(result, SearchResult::Found);
//! assert_eq!(finder.get_path().len(), 5);
//! ```
pub mod components;
pub mod error;
pub mod finder;
pub mod frontier;
pub mod map;
pub mod path;
pub mod position;
pub mod state;

pub use components::Components;
pub use error::{EndpointIssue, GridError};
pub use finder::{
    Cost, PathFinder, PathFinderConfig, SearchResult, SearchStats, SearchStatus, StatusHandle,
};
pub use frontier::{FrontierEntry, OpenFrontier};
pub use map::{FieldType, GridMap, MoveMode, Neighbours, SearchMap};
pub use path::{PathCells, PathView};
pub use position::Position;
pub use state::{CellRecord, SearchState};

/// Cost of a step up, down, left or right.
pub const CARDINAL_COST: f64 = 1.0;
/// Cost of a diagonal step.
pub const DIAGONAL_COST: f64 = std::f64::consts::SQRT_2;

pub const N_SMALLVEC_SIZE: usize = 8;
