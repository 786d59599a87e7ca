use grid_astar::{PathFinder, Position, SearchMap};
use std::collections::BTreeSet;

/// Characters used when rendering a map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderStyle {
    pub obstacle: char,
    pub empty: char,
    pub begin: char,
    pub end: char,
    pub path: char,
    pub open: char,
    pub closed: char,
}

impl Default for RenderStyle {
    fn default() -> Self {
        RenderStyle {
            obstacle: 'X',
            empty: ' ',
            begin: 'b',
            end: 'e',
            path: 'i',
            open: 'o',
            closed: 'c',
        }
    }
}

/// What to draw on top of the map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderFrame {
    pub begin: Option<Position>,
    pub end: Option<Position>,
    pub path: BTreeSet<Position>,
    pub open: BTreeSet<Position>,
    pub closed: BTreeSet<Position>,
}

impl RenderFrame {
    pub fn new(begin: Option<Position>, end: Option<Position>) -> RenderFrame {
        RenderFrame {
            begin,
            end,
            ..Default::default()
        }
    }

    /// Captures the path and the open and closed cells of the last search of `finder`.
    pub fn from_finder<M: SearchMap>(
        finder: &PathFinder<M>,
        begin: Option<Position>,
        end: Option<Position>,
    ) -> RenderFrame {
        RenderFrame {
            begin,
            end,
            path: finder.get_path().iter().copied().collect(),
            open: finder.get_open_cells().into_iter().collect(),
            closed: finder.get_closed_cells().into_iter().collect(),
        }
    }
}

/// Renders one line per row. Markers take precedence in the order begin, end, path, closed,
/// open, with the plain field underneath.
pub fn render<M: SearchMap>(map: &M, frame: &RenderFrame, style: &RenderStyle) -> String {
    let mut text = String::with_capacity((map.width() + 1) * map.height());
    for row in 0..map.height() {
        for col in 0..map.width() {
            let pos = Position::new(row, col);
            let cell = if frame.begin == Some(pos) {
                style.begin
            } else if frame.end == Some(pos) {
                style.end
            } else if frame.path.contains(&pos) {
                style.path
            } else if frame.closed.contains(&pos) {
                style.closed
            } else if frame.open.contains(&pos) {
                style.open
            } else if map.is_free(pos) {
                style.empty
            } else {
                style.obstacle
            };
            text.push(cell);
        }
        text.push('\n');
    }
    text
}
