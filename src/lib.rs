//! # maze_pathfinding
//!
//! Backend for an interactive grid editor: a square grid of cells painted
//! empty, wall, start or end, and an [A*](https://en.wikipedia.org/wiki/A*_search_algorithm)
//! shortest-path search over it. The search breaks priority ties by
//! insertion order, which makes runs fully deterministic, and reports
//! every expansion through a [SearchObserver] so a host UI can animate
//! the frontier, the closed set and the final path, and can cancel a
//! running search cooperatively. All of it works headless; rendering and
//! input handling stay in the host.
//!
//! ```
//! use grid_util::point::Point;
//! use maze_pathfinding::{find_path, CellKind, MazeGrid, NoopObserver, SearchOutcome};
//!
//! let mut grid = MazeGrid::new(5);
//! grid.set_kind(Point::new(2, 1), CellKind::Wall);
//! let outcome = find_path(&grid, Point::new(0, 0), Point::new(4, 4), &mut NoopObserver).unwrap();
//! match outcome {
//!     SearchOutcome::Found(path) => assert_eq!(path.len(), 9),
//!     _ => panic!("corner cells are connected"),
//! }
//! ```

pub mod astar;
pub mod grid;
pub mod search;

pub use astar::{NoopObserver, SearchObserver, SearchOutcome, StepSignal};
pub use grid::{CellKind, MazeGrid};
pub use search::{find_painted_path, find_path, heuristic, EndpointError};
