use grid_astar::{FieldType, GridMap, MoveMode, PathFinder, Position};
use grid_astar_io::{render, RenderFrame, RenderStyle};

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
// Nodes have an 8-neighborhood

fn main() -> Result<(), grid_astar::GridError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let mut map = GridMap::new(3, 3);
    map.set_field(Position::new(1, 1), FieldType::Obstacle)?;
    let mut finder = PathFinder::new(map, MoveMode::EightWay);
    let start = Position::new(0, 0);
    let end = Position::new(2, 2);
    finder.find_path(start, end)?;
    println!("Path:");
    for p in finder.get_path().iter() {
        println!("{}", p);
    }
    println!("Cost: {:.3}", finder.path_cost().unwrap_or(f64::INFINITY));
    let frame = RenderFrame::from_finder(&finder, Some(start), Some(end));
    print!("{}", render(finder.map(), &frame, &RenderStyle::default()));
    Ok(())
}
