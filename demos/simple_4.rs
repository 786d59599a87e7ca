use grid_astar::{FieldType, GridMap, MoveMode, PathFinder, Position};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have a 4-neighborhood

fn main() -> Result<(), grid_astar::GridError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let mut map = GridMap::new(3, 3);
    map.set_field(Position::new(1, 1), FieldType::Obstacle)?;
    println!("{}", map);
    let mut finder = PathFinder::new(map, MoveMode::FourWay);
    let start = Position::new(0, 0);
    let end = Position::new(2, 2);
    let result = finder.find_path(start, end)?;
    println!("{:?}, path:", result);
    let mut path = finder.get_path();
    while let Some(p) = path.current() {
        println!("{}", p);
        path.advance();
    }
    Ok(())
}
