//! Helpers around [grid_astar]: loading and saving maps in their text format, rendering the
//! state of a search as text and generating random maps and endpoints.
//!
//! The map text format starts with a `"<width> <height>"` line followed by `height` lines of
//! `width` characters: `0` is free, `1` is an obstacle, `b` and `e` mark the begin and end cells.
pub mod error;
pub mod format;
pub mod generate;
pub mod render;

pub use error::MapError;
pub use format::{load_map, map_files, parse_map, save_map, write_map, LoadedMap};
pub use generate::{random_endpoints, random_map, random_map_with_density};
pub use render::{render, RenderFrame, RenderStyle};
