//! Grid-level search entry points: endpoint validation, the Manhattan
//! heuristic and the wiring of [MazeGrid] into [astar_search].

use crate::astar::{astar_search, SearchObserver, SearchOutcome};
use crate::grid::{CellKind, MazeGrid};
use core::fmt;
use grid_util::point::Point;
use log::info;

/// Manhattan distance between two cells. Exact for unobstructed cardinal
/// movement with unit step cost, which makes it both admissible and
/// consistent.
pub fn heuristic(a: &Point, b: &Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Endpoint configurations rejected before any search work happens. The
/// editor shell recovers from these by prompting the user to fix the
/// selection; they are never fatal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EndpointError {
    /// No cell is painted as the start.
    MissingStart,
    /// No cell is painted as the end.
    MissingEnd,
    /// An endpoint lies outside the grid.
    OutOfBounds(Point),
    /// Start and end are the same cell.
    Identical(Point),
    /// An endpoint is a wall.
    Wall(Point),
}

impl fmt::Display for EndpointError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EndpointError::MissingStart => write!(f, "no start cell is set"),
            EndpointError::MissingEnd => write!(f, "no end cell is set"),
            EndpointError::OutOfBounds(p) => write!(f, "endpoint {} is outside the grid", p),
            EndpointError::Identical(p) => write!(f, "start and end are both {}", p),
            EndpointError::Wall(p) => write!(f, "endpoint {} is a wall", p),
        }
    }
}

impl std::error::Error for EndpointError {}

fn validate_endpoints(grid: &MazeGrid, start: Point, end: Point) -> Result<(), EndpointError> {
    for p in [start, end] {
        if !grid.in_bounds(p.x, p.y) {
            return Err(EndpointError::OutOfBounds(p));
        }
    }
    if start == end {
        return Err(EndpointError::Identical(start));
    }
    for p in [start, end] {
        if grid.kind(p) == CellKind::Wall {
            return Err(EndpointError::Wall(p));
        }
    }
    Ok(())
}

/// Searches for a shortest path from `start` to `end`, reporting progress
/// through `observer`. The grid is immutable for the duration of the run;
/// all per-run search state is discarded on return.
///
/// A missing path is reported as [SearchOutcome::Exhausted], not as an
/// error: only malformed endpoints make this function fail.
pub fn find_path<O: SearchObserver<Point>>(
    grid: &MazeGrid,
    start: Point,
    end: Point,
    observer: &mut O,
) -> Result<SearchOutcome<Point>, EndpointError> {
    validate_endpoints(grid, start, end)?;
    info!("searching for a path from {} to {}", start, end);
    Ok(astar_search(
        &start,
        |node| grid.neighbours(*node).into_iter().map(|p| (p, 1)),
        |node| heuristic(node, &end),
        |node| *node == end,
        observer,
    ))
}

/// Like [find_path], but using the endpoints painted on the grid itself.
pub fn find_painted_path<O: SearchObserver<Point>>(
    grid: &MazeGrid,
    observer: &mut O,
) -> Result<SearchOutcome<Point>, EndpointError> {
    let start = grid.start().ok_or(EndpointError::MissingStart)?;
    let end = grid.end().ok_or(EndpointError::MissingEnd)?;
    find_path(grid, start, end, observer)
}
