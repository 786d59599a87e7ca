use grid_astar::{MoveMode, PathFinder, SearchStatus};
use grid_astar_io::{random_endpoints, random_map, render, RenderFrame, RenderStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::thread;
use std::time::{Duration, Instant};

// Runs a search on a large random map on a worker thread while the main thread polls its
// status, then renders the top left corner of the result.
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    const WIDTH: usize = 4000;
    const HEIGHT: usize = 2500;
    let mut rng = StdRng::seed_from_u64(0);
    let map = random_map(WIDTH, HEIGHT, WIDTH * HEIGHT / 4, &mut rng);
    let Some((begin, end)) = random_endpoints(&map, &mut rng) else {
        println!("Not enough free cells");
        return;
    };

    let mut finder = PathFinder::new(map, MoveMode::EightWay);
    let status = finder.status_handle();
    let before = Instant::now();
    let worker = thread::spawn(move || {
        let result = finder.find_path(begin, end);
        (finder, result)
    });

    let mut last = status.status();
    println!("{:?}", last);
    while !status.is_completed() {
        let current = status.status();
        if current != last {
            println!("{:?} after {:.2?}", current, before.elapsed());
            last = current;
        }
        thread::sleep(Duration::from_millis(10));
    }
    println!("{:?} after {:.2?}", status.status(), before.elapsed());

    let (finder, result) = match worker.join() {
        Ok(joined) => joined,
        Err(_) => {
            println!("Search thread panicked");
            return;
        }
    };
    match result {
        Ok(result) => println!(
            "{:?} from {} to {}: {} cells, {:?}",
            result,
            begin,
            end,
            finder.get_path().len(),
            finder.stats()
        ),
        Err(e) => println!("Search rejected: {}", e),
    }

    let corner = grid_astar::GridMap::from_fields(
        60,
        20,
        (0..20)
            .flat_map(|row| {
                finder.map().fields()[row * WIDTH..row * WIDTH + 60]
                    .iter()
                    .copied()
            })
            .collect(),
    );
    if let Ok(corner) = corner {
        let frame = RenderFrame::from_finder(&finder, Some(begin), Some(end));
        print!("{}", render(&corner, &frame, &RenderStyle::default()));
    }
    if let SearchStatus::Completed(result) = finder.status() {
        println!("Final status: {:?}", result);
    }
}
