use grid_astar::{FieldType, GridMap, Position, SearchMap};
use log::info;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{MapError, Result};

const FREE: char = '0';
const OBSTACLE: char = '1';
const BEGIN: char = 'b';
const END: char = 'e';

/// A map together with the begin and end markers found in its text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedMap {
    pub map: GridMap,
    pub begin: Option<Position>,
    pub end: Option<Position>,
}

impl LoadedMap {
    pub fn new(map: GridMap) -> LoadedMap {
        LoadedMap {
            map,
            begin: None,
            end: None,
        }
    }

    /// Both markers, if the map has them.
    pub fn endpoints(&self) -> Option<(Position, Position)> {
        self.begin.zip(self.end)
    }
}

/// Parses the map text format: a `"<width> <height>"` header followed by `height` rows of
/// `width` cells each, `0` for free, `1` for an obstacle and `b`/`e` for the free begin and end
/// cells.
pub fn parse_map(text: &str) -> Result<LoadedMap> {
    let mut lines = text.lines();
    let header = lines
        .by_ref()
        .find(|line| !line.trim().is_empty())
        .ok_or(MapError::MissingHeader)?;
    let (width, height) = parse_header(header)?;

    let mut rows: Vec<&str> = lines.collect();
    while rows.last().is_some_and(|row| row.trim().is_empty()) {
        rows.pop();
    }
    if rows.len() != height {
        return Err(MapError::RowCount {
            expected: height,
            found: rows.len(),
        });
    }

    let mut fields = Vec::with_capacity(width * height);
    let mut begin = None;
    let mut end = None;
    for (row, line) in rows.iter().enumerate() {
        let found = line.chars().count();
        if found != width {
            return Err(MapError::RowLength {
                row,
                expected: width,
                found,
            });
        }
        for (col, cell) in line.chars().enumerate() {
            let field = match cell {
                FREE => FieldType::Free,
                OBSTACLE => FieldType::Obstacle,
                BEGIN | END => {
                    let marker = if cell == BEGIN { &mut begin } else { &mut end };
                    if marker.is_some() {
                        return Err(MapError::DuplicateMarker {
                            marker: cell,
                            row,
                            col,
                        });
                    }
                    *marker = Some(Position::new(row, col));
                    FieldType::Free
                }
                found => return Err(MapError::UnknownCell { row, col, found }),
            };
            fields.push(field);
        }
    }
    Ok(LoadedMap {
        map: GridMap::from_fields(width, height, fields)?,
        begin,
        end,
    })
}

fn parse_header(line: &str) -> Result<(usize, usize)> {
    let invalid = || MapError::InvalidHeader(line.to_owned());
    let mut values = line.split_whitespace().map(|v| v.parse::<usize>());
    match (values.next(), values.next(), values.next()) {
        (Some(Ok(width)), Some(Ok(height)), None) => Ok((width, height)),
        _ => Err(invalid()),
    }
}

/// Writes a map in the format read by [parse_map].
pub fn write_map(loaded: &LoadedMap) -> String {
    let map = &loaded.map;
    let mut text = String::with_capacity((map.width() + 1) * (map.height() + 1));
    text.push_str(&format!("{} {}\n", map.width(), map.height()));
    for row in 0..map.height() {
        for col in 0..map.width() {
            let pos = Position::new(row, col);
            let cell = if loaded.begin == Some(pos) {
                BEGIN
            } else if loaded.end == Some(pos) {
                END
            } else if map.is_free(pos) {
                FREE
            } else {
                OBSTACLE
            };
            text.push(cell);
        }
        text.push('\n');
    }
    text
}

pub fn load_map<P: AsRef<Path>>(path: P) -> Result<LoadedMap> {
    let path = path.as_ref();
    let loaded = parse_map(&fs::read_to_string(path)?)?;
    info!(
        "Loaded {}x{} map from {}",
        loaded.map.width(),
        loaded.map.height(),
        path.display()
    );
    Ok(loaded)
}

pub fn save_map<P: AsRef<Path>>(path: P, loaded: &LoadedMap) -> Result<()> {
    fs::write(path.as_ref(), write_map(loaded))?;
    info!("Saved map to {}", path.as_ref().display());
    Ok(())
}

/// All `*.map` files below `root`, sorted by path.
pub fn map_files<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root.as_ref()) {
        let entry = entry.map_err(io::Error::from)?;
        let is_map = entry.path().extension().is_some_and(|ext| ext == "map");
        if entry.file_type().is_file() && is_map {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}
