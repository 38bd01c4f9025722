use grid_util::point::Point;
use maze_pathfinding::{find_painted_path, CellKind, MazeGrid, NoopObserver, SearchOutcome};

// In this demo a path is found on a grid with shape
// S#...
// .#.#.
// .#.#.
// .#.#.
// ...#E
// S marks the start
// E marks the end
fn main() {
    let mut grid = MazeGrid::new(5);
    for y in 0..4 {
        grid.set_kind(Point::new(1, y), CellKind::Wall);
    }
    for y in 1..5 {
        grid.set_kind(Point::new(3, y), CellKind::Wall);
    }
    grid.set_kind(Point::new(0, 0), CellKind::Start);
    grid.set_kind(Point::new(4, 4), CellKind::End);
    println!("{}", grid);
    match find_painted_path(&grid, &mut NoopObserver) {
        Ok(SearchOutcome::Found(path)) => {
            println!("A path has been found:");
            for p in path {
                println!("{:?}", p);
            }
        }
        Ok(other) => println!("No path: {:?}", other),
        Err(e) => println!("Bad endpoints: {}", e),
    }
}
