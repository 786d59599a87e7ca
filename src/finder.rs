use log::{debug, info, trace, warn};
use std::sync::{Arc, Mutex, PoisonError};

use crate::components::Components;
use crate::error::{EndpointIssue, GridError, Result};
use crate::frontier::{FrontierEntry, OpenFrontier};
use crate::map::{FieldType, GridMap, MoveMode, SearchMap};
use crate::path::{PathCells, PathView};
use crate::position::Position;
use crate::state::{CellRecord, SearchState};

/// Cost type used by [PathFinder]: cardinal steps cost 1, diagonal steps cost √2.
pub type Cost = f64;

/// Outcome of a search whose arguments were valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchResult {
    Found,
    NotFound,
}

/// Progress of the search owned by a [PathFinder], as seen from a [StatusHandle].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchStatus {
    #[default]
    NotStarted,
    Running,
    Completed(SearchResult),
}

/// Shared, non-blocking view of a [PathFinder]'s [SearchStatus]. Clone it before moving the
/// finder to a worker thread and poll it from the host.
#[derive(Clone, Debug, Default)]
pub struct StatusHandle {
    status: Arc<Mutex<SearchStatus>>,
}

impl StatusHandle {
    pub fn status(&self) -> SearchStatus {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.status(), SearchStatus::Completed(_))
    }

    fn set(&self, status: SearchStatus) {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner) = status;
    }
}

/// Counters of the last search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Cells taken from the frontier and expanded.
    pub expansions: usize,
    /// Outdated frontier entries that were discarded.
    pub stale_skips: usize,
    /// Entries inserted into the frontier.
    pub pushes: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathFinderConfig {
    pub move_mode: MoveMode,
    /// Pre-compute connected components and answer [SearchResult::NotFound] right away when
    /// begin and end lie on different ones.
    pub prune_unreachable: bool,
}

impl Default for PathFinderConfig {
    fn default() -> Self {
        PathFinderConfig {
            move_mode: MoveMode::EightWay,
            prune_unreachable: true,
        }
    }
}

impl PathFinderConfig {
    pub fn new(move_mode: MoveMode) -> PathFinderConfig {
        PathFinderConfig {
            move_mode,
            ..Default::default()
        }
    }

    pub fn with_move_mode(mut self, move_mode: MoveMode) -> Self {
        self.move_mode = move_mode;
        self
    }

    pub fn with_prune_unreachable(mut self, prune_unreachable: bool) -> Self {
        self.prune_unreachable = prune_unreachable;
        self
    }
}

/// A* search over a map snapshot owned by the finder.
///
/// Each call to [find_path](PathFinder::find_path) resets the search state, runs the search to
/// completion and keeps the result, the path and the final open and closed sets around for
/// inspection until the next call.
#[derive(Debug)]
pub struct PathFinder<M = GridMap> {
    map: M,
    config: PathFinderConfig,
    components: Option<Components>,
    state: SearchState<Cost>,
    frontier: OpenFrontier<Cost>,
    path: PathCells,
    result: SearchResult,
    stats: SearchStats,
    status: StatusHandle,
}

impl<M: SearchMap> PathFinder<M> {
    pub fn new(map: M, move_mode: MoveMode) -> PathFinder<M> {
        PathFinder::with_config(map, PathFinderConfig::new(move_mode))
    }

    pub fn with_config(map: M, config: PathFinderConfig) -> PathFinder<M> {
        let components = config
            .prune_unreachable
            .then(|| Components::generate(&map, config.move_mode));
        let state = SearchState::new(map.width(), map.height());
        PathFinder {
            map,
            config,
            components,
            state,
            frontier: OpenFrontier::new(),
            path: PathCells::default(),
            result: SearchResult::NotFound,
            stats: SearchStats::default(),
            status: StatusHandle::default(),
        }
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    /// Swaps in a new map snapshot. Components are regenerated and the previous search is
    /// forgotten.
    pub fn set_map(&mut self, map: M) {
        self.components = self
            .config
            .prune_unreachable
            .then(|| Components::generate(&map, self.config.move_mode));
        self.map = map;
        self.state.reset(self.map.width(), self.map.height());
        self.frontier.clear();
        self.path.clear();
        self.result = SearchResult::NotFound;
        self.stats = SearchStats::default();
        self.status.set(SearchStatus::NotStarted);
    }

    pub fn into_map(self) -> M {
        self.map
    }

    pub fn config(&self) -> &PathFinderConfig {
        &self.config
    }

    pub fn move_mode(&self) -> MoveMode {
        self.config.move_mode
    }

    pub fn components(&self) -> Option<&Components> {
        self.components.as_ref()
    }

    /// Computes a shortest path from `begin` to `end`.
    ///
    /// Both endpoints have to be free cells inside the grid and differ from each other;
    /// otherwise an error is returned before any search work is done and the outcome of the
    /// previous search is left untouched. Not finding a path is reported as
    /// [SearchResult::NotFound].
    pub fn find_path(&mut self, begin: Position, end: Position) -> Result<SearchResult> {
        self.validate_endpoints(begin, end).map_err(|e| {
            debug!("Rejected endpoints {} -> {}: {}", begin, end, e);
            e
        })?;

        self.status.set(SearchStatus::Running);
        self.state.reset(self.map.width(), self.map.height());
        self.frontier.clear();
        self.path.clear();
        self.stats = SearchStats::default();

        // Check if begin and end are on the same connected component.
        let unreachable = self
            .components
            .as_ref()
            .map_or(false, |components| components.unreachable(&begin, &end));
        let result = if unreachable {
            debug!("{} is not reachable from {}", end, begin);
            SearchResult::NotFound
        } else {
            self.search(begin, end)
        };

        match result {
            SearchResult::Found => info!(
                "Found a path of {} cells from {} to {} after {} expansions",
                self.path.len(),
                begin,
                end,
                self.stats.expansions
            ),
            SearchResult::NotFound => {
                if self.components.is_some() && self.stats.expansions > 0 {
                    warn!("Reachable goal could not be pathed to, is reachable graph correct?");
                }
                info!(
                    "No path from {} to {} after {} expansions",
                    begin, end, self.stats.expansions
                );
            }
        }
        self.result = result;
        self.status.set(SearchStatus::Completed(result));
        Ok(result)
    }

    fn validate_endpoints(&self, begin: Position, end: Position) -> Result<()> {
        for position in [begin, end] {
            if self.map.field(position)? == FieldType::Obstacle {
                return Err(GridError::InvalidEndpoint {
                    position,
                    reason: EndpointIssue::Obstacle,
                });
            }
        }
        if begin == end {
            return Err(GridError::InvalidEndpoint {
                position: begin,
                reason: EndpointIssue::BeginEqualsEnd,
            });
        }
        Ok(())
    }

    fn search(&mut self, begin: Position, end: Position) -> SearchResult {
        let move_mode = self.config.move_mode;
        let h_begin = self.map.distance(&begin, &end, move_mode);
        self.state.set(
            begin,
            CellRecord {
                parent: None,
                best_f: h_begin,
                in_open: true,
                in_closed: false,
            },
        );
        self.frontier.insert(FrontierEntry::new(begin, 0.0, h_begin));
        self.stats.pushes += 1;

        while let Some(current) = self.frontier.extract_min() {
            let mut record = self.state.get(current.position);
            // A cheaper route to this cell was found after this entry was pushed
            if current.f != record.best_f {
                self.stats.stale_skips += 1;
                continue;
            }
            record.in_open = false;
            record.in_closed = true;
            self.state.set(current.position, record);
            self.stats.expansions += 1;
            trace!(
                "Expanding {} (g = {:.3}, f = {:.3})",
                current.position,
                current.g,
                current.f
            );

            for neighbour in self.map.neighbours(current.position, move_mode) {
                if !self.map.is_free(neighbour) {
                    continue;
                }
                let g = current.g + current.position.step_cost(&neighbour);
                // The heuristic is exact for a single step, so the first expanded cell next to the
                // goal already lies on a shortest path.
                if neighbour == end {
                    self.state.set(
                        end,
                        CellRecord {
                            parent: Some(current.position),
                            best_f: g,
                            in_open: false,
                            in_closed: false,
                        },
                    );
                    self.fill_path(end);
                    return SearchResult::Found;
                }
                let f = g + self.map.distance(&neighbour, &end, move_mode);
                if self.state.get(neighbour).best_f <= f {
                    continue;
                }
                self.state.set(
                    neighbour,
                    CellRecord {
                        parent: Some(current.position),
                        best_f: f,
                        in_open: true,
                        in_closed: false,
                    },
                );
                self.frontier.insert(FrontierEntry {
                    position: neighbour,
                    g,
                    f,
                });
                self.stats.pushes += 1;
            }
        }
        SearchResult::NotFound
    }

    fn fill_path(&mut self, end: Position) {
        let state = &self.state;
        let mut cells: Vec<Position> =
            std::iter::successors(Some(end), |p| state.get(*p).parent).collect();
        cells.reverse();
        self.path = cells.into_iter().collect();
    }

    /// Result of the last search, [SearchResult::NotFound] if none has run.
    pub fn get_result(&self) -> SearchResult {
        self.result
    }

    /// The path of the last search, empty unless it found one.
    pub fn get_path(&self) -> PathView<'_> {
        PathView::new(&self.path)
    }

    /// Cost of the last path found, [None] if there is none.
    pub fn path_cost(&self) -> Option<Cost> {
        (!self.path.is_empty()).then(|| self.get_path().cost())
    }

    /// Cells left on the open list by the last search. Scans the whole grid, meant for
    /// visualisation.
    pub fn get_open_cells(&self) -> Vec<Position> {
        self.state.open_cells()
    }

    /// Cells expanded by the last search. Scans the whole grid, meant for visualisation.
    pub fn get_closed_cells(&self) -> Vec<Position> {
        self.state.closed_cells()
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn status(&self) -> SearchStatus {
        self.status.status()
    }

    pub fn status_handle(&self) -> StatusHandle {
        self.status.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DIAGONAL_COST;

    fn open_grid(width: usize, height: usize) -> GridMap {
        GridMap::new(width, height)
    }

    /// Asserts that the optimal solution is found around a single obstacle.
    #[test]
    fn solve_simple_problem() {
        // |S  |
        // | # |
        // |  G|
        for (move_mode, expected) in [(MoveMode::FourWay, 5), (MoveMode::EightWay, 4)] {
            let mut map = open_grid(3, 3);
            map.set_field(Position::new(1, 1), FieldType::Obstacle).unwrap();
            let mut finder = PathFinder::new(map, move_mode);
            let result = finder
                .find_path(Position::new(0, 0), Position::new(2, 2))
                .unwrap();
            assert_eq!(result, SearchResult::Found);
            assert_eq!(finder.get_path().len(), expected);
        }
    }

    #[test]
    fn adjacent_endpoints() {
        let mut finder = PathFinder::new(open_grid(2, 2), MoveMode::EightWay);
        let begin = Position::new(0, 0);
        let end = Position::new(1, 1);
        assert_eq!(finder.find_path(begin, end), Ok(SearchResult::Found));
        assert_eq!(finder.get_path().to_vec(), vec![begin, end]);
        assert_eq!(finder.path_cost(), Some(DIAGONAL_COST));
        assert_eq!(finder.stats().expansions, 1);
    }

    #[test]
    fn rejects_invalid_endpoints() {
        let mut map = open_grid(3, 3);
        map.set_field(Position::new(0, 2), FieldType::Obstacle).unwrap();
        let mut finder = PathFinder::new(map, MoveMode::FourWay);
        let free = Position::new(0, 0);
        assert_eq!(
            finder.find_path(Position::new(0, 2), free),
            Err(GridError::InvalidEndpoint {
                position: Position::new(0, 2),
                reason: EndpointIssue::Obstacle
            })
        );
        assert_eq!(
            finder.find_path(free, free),
            Err(GridError::InvalidEndpoint {
                position: free,
                reason: EndpointIssue::BeginEqualsEnd
            })
        );
        assert!(matches!(
            finder.find_path(free, Position::new(3, 0)),
            Err(GridError::OutOfBounds { .. })
        ));
        assert_eq!(finder.status(), SearchStatus::NotStarted);
        assert_eq!(finder.stats(), SearchStats::default());
    }

    /// An argument error leaves the previous search intact.
    #[test]
    fn error_keeps_previous_result() {
        let mut finder = PathFinder::new(open_grid(3, 1), MoveMode::FourWay);
        let begin = Position::new(0, 0);
        let end = Position::new(0, 2);
        finder.find_path(begin, end).unwrap();
        assert!(finder.find_path(begin, begin).is_err());
        assert_eq!(finder.get_result(), SearchResult::Found);
        assert_eq!(finder.get_path().len(), 3);
    }

    /// Without the components pre-check the search exhausts the frontier to report failure.
    #[test]
    fn not_found_with_and_without_pruning() {
        //  ___
        // |S#G|
        //  ___
        let mut map = open_grid(3, 1);
        map.set_field(Position::new(0, 1), FieldType::Obstacle).unwrap();
        let begin = Position::new(0, 0);
        let end = Position::new(0, 2);
        for prune in [true, false] {
            let config = PathFinderConfig::new(MoveMode::EightWay).with_prune_unreachable(prune);
            let mut finder = PathFinder::with_config(map.clone(), config);
            assert_eq!(finder.find_path(begin, end), Ok(SearchResult::NotFound));
            assert!(finder.get_path().is_empty());
            assert_eq!(finder.path_cost(), None);
            assert_eq!(finder.components().is_some(), prune);
            let expected_expansions = if prune { 0 } else { 1 };
            assert_eq!(finder.stats().expansions, expected_expansions);
            assert_eq!(
                finder.status(),
                SearchStatus::Completed(SearchResult::NotFound)
            );
        }
    }

    #[test]
    fn diagnostics_reflect_last_search() {
        let mut finder = PathFinder::with_config(
            open_grid(5, 5),
            PathFinderConfig::new(MoveMode::FourWay).with_prune_unreachable(false),
        );
        assert!(finder.get_open_cells().is_empty());
        finder
            .find_path(Position::new(0, 0), Position::new(4, 4))
            .unwrap();
        let closed = finder.get_closed_cells();
        let open = finder.get_open_cells();
        assert!(closed.contains(&Position::new(0, 0)));
        assert!(closed.iter().all(|p| !open.contains(p)));
        assert_eq!(closed.len(), finder.stats().expansions);
        assert!(!open.contains(&Position::new(4, 4)));

        // A second search starts from a clean slate
        finder
            .find_path(Position::new(4, 4), Position::new(4, 3))
            .unwrap();
        assert_eq!(finder.get_closed_cells(), vec![Position::new(4, 4)]);
        assert_eq!(
            finder.get_path().to_vec(),
            vec![Position::new(4, 4), Position::new(4, 3)]
        );
    }

    /// The search prefers diagonal moves only when they are actually cheaper.
    #[test]
    fn straight_line_stays_straight() {
        let mut finder = PathFinder::new(open_grid(6, 1), MoveMode::EightWay);
        finder
            .find_path(Position::new(0, 0), Position::new(0, 5))
            .unwrap();
        assert_eq!(finder.get_path().len(), 6);
        assert_eq!(finder.path_cost(), Some(5.0));
    }

    #[test]
    fn set_map_forgets_previous_search() {
        let mut finder = PathFinder::new(open_grid(3, 3), MoveMode::FourWay);
        finder
            .find_path(Position::new(0, 0), Position::new(2, 2))
            .unwrap();
        let mut walled = open_grid(3, 3);
        walled
            .set_rect(Position::new(1, 0), 1, 3, FieldType::Obstacle)
            .unwrap();
        finder.set_map(walled);
        assert!(finder.get_path().is_empty());
        assert_eq!(finder.status(), SearchStatus::NotStarted);
        assert_eq!(
            finder.find_path(Position::new(0, 0), Position::new(2, 2)),
            Ok(SearchResult::NotFound)
        );
    }
}
