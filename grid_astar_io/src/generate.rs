use grid_astar::{FieldType, GridMap, Position, SearchMap};
use rand::seq::index;
use rand::Rng;

/// Places `obstacle_count` obstacles on uniformly drawn cells of an empty map. Cells may be
/// drawn more than once, so the map can end up with fewer obstacles.
pub fn random_map<R: Rng>(
    width: usize,
    height: usize,
    obstacle_count: usize,
    rng: &mut R,
) -> GridMap {
    let cells = width * height;
    let mut blocked = vec![false; cells];
    if cells > 0 {
        for _ in 0..obstacle_count {
            blocked[rng.gen_range(0..cells)] = true;
        }
    }
    GridMap::from_fn(width, height, |pos| {
        if blocked[pos.row * width + pos.col] {
            FieldType::Obstacle
        } else {
            FieldType::Free
        }
    })
}

/// Makes every cell an obstacle with probability `density`.
pub fn random_map_with_density<R: Rng>(
    width: usize,
    height: usize,
    density: f64,
    rng: &mut R,
) -> GridMap {
    GridMap::from_fn(width, height, |_| {
        if rng.gen_bool(density) {
            FieldType::Obstacle
        } else {
            FieldType::Free
        }
    })
}

/// Picks two distinct free cells, [None] if the map has fewer than two.
pub fn random_endpoints<M: SearchMap, R: Rng>(map: &M, rng: &mut R) -> Option<(Position, Position)> {
    let free: Vec<Position> = (0..map.height())
        .flat_map(|row| (0..map.width()).map(move |col| Position::new(row, col)))
        .filter(|p| map.is_free(*p))
        .collect();
    if free.len() < 2 {
        return None;
    }
    let picked = index::sample(rng, free.len(), 2);
    Some((free[picked.index(0)], free[picked.index(1)]))
}
