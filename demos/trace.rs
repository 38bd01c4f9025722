use grid_util::point::Point;
use maze_pathfinding::{
    find_painted_path, CellKind, MazeGrid, SearchObserver, SearchOutcome, StepSignal,
};
use std::collections::HashSet;

/// Observer that accumulates the visual state a grid editor would paint:
/// frontier cells, closed cells and the final path.
#[derive(Default)]
struct Painter {
    frontier: HashSet<Point>,
    closed: HashSet<Point>,
    path: HashSet<Point>,
    steps: usize,
}

impl SearchObserver<Point> for Painter {
    fn frontier(&mut self, cell: &Point) {
        self.frontier.insert(*cell);
    }
    fn closed(&mut self, cell: &Point) {
        self.closed.insert(*cell);
    }
    fn path_cell(&mut self, cell: &Point) {
        self.path.insert(*cell);
    }
    fn step(&mut self) -> StepSignal {
        // A real shell would repaint and poll input here.
        self.steps += 1;
        StepSignal::Continue
    }
}

fn render(grid: &MazeGrid, painter: &Painter) {
    for y in 0..grid.size() as i32 {
        for x in 0..grid.size() as i32 {
            let p = Point::new(x, y);
            let c = match grid.kind(p) {
                CellKind::Start => 'S',
                CellKind::End => 'E',
                CellKind::Wall => '#',
                CellKind::Empty if painter.path.contains(&p) => '+',
                CellKind::Empty if painter.closed.contains(&p) => '*',
                CellKind::Empty if painter.frontier.contains(&p) => 'o',
                CellKind::Empty => '.',
            };
            print!("{}", c);
        }
        println!();
    }
}

fn main() {
    env_logger::init();
    let mut grid = MazeGrid::new(9);
    for y in 0..7 {
        grid.set_kind(Point::new(2, y), CellKind::Wall);
    }
    for y in 2..9 {
        grid.set_kind(Point::new(5, y), CellKind::Wall);
    }
    grid.set_kind(Point::new(0, 4), CellKind::Start);
    grid.set_kind(Point::new(8, 4), CellKind::End);

    let mut painter = Painter::default();
    match find_painted_path(&grid, &mut painter) {
        Ok(SearchOutcome::Found(path)) => {
            render(&grid, &painter);
            println!(
                "found a {}-cell path in {} expansions",
                path.len(),
                painter.steps
            );
        }
        Ok(other) => {
            render(&grid, &painter);
            println!("search ended without a path: {:?}", other);
        }
        Err(e) => println!("bad endpoints: {}", e),
    }
}
