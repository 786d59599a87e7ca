use itertools::iproduct;
use log::info;
use petgraph::unionfind::UnionFind;

use crate::map::{MoveMode, SearchMap};
use crate::position::Position;

/// Forward half of each neighbourhood. Linking every free cell to these is enough to join all
/// adjacent free cells, since the other half is covered from the opposite side.
const FOUR_WAY_FORWARD: [(isize, isize); 2] = [(0, 1), (1, 0)];
const EIGHT_WAY_FORWARD: [(isize, isize); 4] = [(0, 1), (1, -1), (1, 0), (1, 1)];

/// [Connected components](https://en.wikipedia.org/wiki/Component_(graph_theory)) of the free
/// cells of a map under a given [MoveMode], kept in a [UnionFind] structure. Used to answer
/// reachability queries without flood-filling the grid in a search.
#[derive(Clone, Debug)]
pub struct Components {
    components: UnionFind<usize>,
    width: usize,
    height: usize,
    move_mode: MoveMode,
    count: usize,
}

impl Components {
    /// Generates a new [UnionFind] structure and links up free grid neighbours to the same
    /// components.
    pub fn generate<M: SearchMap>(map: &M, move_mode: MoveMode) -> Components {
        let width = map.width();
        let height = map.height();
        info!(
            "Generating connected components for a {}x{} grid ({:?})",
            width, height, move_mode
        );
        let forward: &[(isize, isize)] = match move_mode {
            MoveMode::FourWay => &FOUR_WAY_FORWARD,
            MoveMode::EightWay => &EIGHT_WAY_FORWARD,
        };
        let mut components = UnionFind::new(width * height);
        let mut free = 0;
        let mut merges = 0;
        for (row, col) in iproduct!(0..height, 0..width) {
            let point = Position::new(row, col);
            if !map.is_free(point) {
                continue;
            }
            free += 1;
            let parent_ix = row * width + col;
            for neighbour in forward
                .iter()
                .filter_map(|&(d_row, d_col)| point.offset(d_row, d_col))
                .filter(|p| map.is_free(*p))
            {
                if components.union(parent_ix, neighbour.row * width + neighbour.col) {
                    merges += 1;
                }
            }
        }
        // Each successful union joins two components into one
        let count = free - merges;
        info!("Found {} connected components", count);
        Components {
            components,
            width,
            height,
            move_mode,
            count,
        }
    }

    pub fn move_mode(&self) -> MoveMode {
        self.move_mode
    }

    /// Number of components made up of free cells.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Retrieves the component id a given [Position] belongs to.
    pub fn component_of(&self, pos: &Position) -> Option<usize> {
        self.get_ix(pos).map(|ix| self.components.find(ix))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Position, goal: &Position) -> bool {
        match (self.get_ix(start), self.get_ix(goal)) {
            (Some(start_ix), Some(goal_ix)) => self.components.equiv(start_ix, goal_ix),
            _ => false,
        }
    }

    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Position, goal: &Position) -> bool {
        !self.reachable(start, goal)
    }

    fn get_ix(&self, pos: &Position) -> Option<usize> {
        (pos.row < self.height && pos.col < self.width).then(|| pos.row * self.width + pos.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{FieldType, GridMap};

    /// Tests whether points are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        // Corresponds to the following 2x3 grid:
        //  ___
        // | # |
        // | # |
        //  ___
        let mut map = GridMap::new(3, 2);
        map.set_field(Position::new(0, 1), FieldType::Obstacle).unwrap();
        map.set_field(Position::new(1, 1), FieldType::Obstacle).unwrap();
        let components = Components::generate(&map, MoveMode::EightWay);
        let p1 = Position::new(0, 0);
        let p2 = Position::new(1, 1);
        let p3 = Position::new(1, 0);
        let p4 = Position::new(0, 2);
        assert!(components.unreachable(&p1, &p2));
        assert!(components.reachable(&p1, &p3));
        assert!(components.unreachable(&p1, &p4));
        assert_eq!(components.count(), 2);
    }

    /// Asserts that the two corners are connected on a 4-grid.
    #[test]
    fn reachable_without_diagonals() {
        // |S  |
        // | # |
        // |  G|
        //  ___
        let mut map = GridMap::new(3, 3);
        map.set_field(Position::new(1, 1), FieldType::Obstacle).unwrap();
        let components = Components::generate(&map, MoveMode::FourWay);
        assert!(components.reachable(&Position::new(0, 0), &Position::new(2, 2)));
        assert_eq!(components.count(), 1);
    }

    // Tests whether allowing diagonals has the expected effect on reachability in a minimal setting.
    #[test]
    fn test_diagonal_switch_reachable() {
        //  __
        // | #|
        // |# |
        //  __
        let mut map = GridMap::filled(2, 2, FieldType::Obstacle);
        map.set_field(Position::new(0, 0), FieldType::Free).unwrap();
        map.set_field(Position::new(1, 1), FieldType::Free).unwrap();
        let four = Components::generate(&map, MoveMode::FourWay);
        let eight = Components::generate(&map, MoveMode::EightWay);
        let start = Position::new(0, 0);
        let end = Position::new(1, 1);
        assert!(four.unreachable(&start, &end));
        assert!(eight.reachable(&start, &end));
        assert_eq!(four.count(), 2);
        assert_eq!(eight.count(), 1);
    }

    /// The anti-diagonal has to be linked as well.
    #[test]
    fn anti_diagonal_reachable() {
        //  __
        // |# |
        // | #|
        //  __
        let mut map = GridMap::new(2, 2);
        map.set_field(Position::new(0, 0), FieldType::Obstacle).unwrap();
        map.set_field(Position::new(1, 1), FieldType::Obstacle).unwrap();
        let eight = Components::generate(&map, MoveMode::EightWay);
        assert!(eight.reachable(&Position::new(0, 1), &Position::new(1, 0)));
        assert!(!eight.reachable(&Position::new(0, 1), &Position::new(5, 0)));
        assert_eq!(eight.component_of(&Position::new(5, 0)), None);
    }

    /// A fully free grid is a single component, whichever order cells get merged in.
    #[test]
    fn open_grid_is_one_component() {
        for move_mode in [MoveMode::FourWay, MoveMode::EightWay] {
            for (width, height) in [(1, 1), (2, 2), (5, 5), (7, 3)] {
                let map = GridMap::new(width, height);
                let components = Components::generate(&map, move_mode);
                assert_eq!(components.count(), 1);
                assert!(components.reachable(&Position::new(0, 0), &Position::new(height - 1, width - 1)));
            }
        }
        let blocked = GridMap::filled(3, 3, FieldType::Obstacle);
        assert_eq!(Components::generate(&blocked, MoveMode::EightWay).count(), 0);
    }
}
