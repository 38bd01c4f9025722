//! The editable grid: cell classifications, cached adjacency and
//! connected components.

use core::fmt;
use grid_util::grid::{Grid, SimpleGrid};
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;

/// Classification of a single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CellKind {
    #[default]
    Empty = 0,
    Wall = 1,
    Start = 2,
    End = 3,
}

impl CellKind {
    fn from_code(code: u8) -> CellKind {
        match code {
            1 => CellKind::Wall,
            2 => CellKind::Start,
            3 => CellKind::End,
            _ => CellKind::Empty,
        }
    }

    /// Every kind except [CellKind::Wall] can be stepped on.
    pub fn walkable(self) -> bool {
        self != CellKind::Wall
    }
}

/// Cardinal neighbour offsets in contract order: left, right, up, down.
/// This order decides which of several equally estimated cells is
/// discovered first during a search, and therefore which of the equally
/// short paths is found, so it must not be rearranged.
const NEIGHBOUR_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// A square R×R grid of [CellKind] values edited one cell at a time.
///
/// [MazeGrid] keeps a per-cell [u8] bitmask of walkable cardinal
/// neighbours, maintained incrementally on every edit so neighbour queries
/// during a search never see stale adjacency. It also tracks connected
/// components of walkable cells in a [UnionFind] structure, giving the
/// editor shell a cheap reachability query between searches. At most one
/// cell holds [CellKind::Start] and one holds [CellKind::End] at any time.
#[derive(Clone, Debug)]
pub struct MazeGrid {
    kinds: SimpleGrid<u8>,
    neighbours: SimpleGrid<u8>,
    components: UnionFind<usize>,
    components_dirty: bool,
    start: Option<Point>,
    end: Option<Point>,
}

impl MazeGrid {
    /// Creates an all-empty grid of `size` × `size` cells.
    pub fn new(size: usize) -> MazeGrid {
        let mut grid = MazeGrid {
            kinds: SimpleGrid::new(size, size, CellKind::Empty as u8),
            neighbours: SimpleGrid::new(size, size, 0b1111),
            components: UnionFind::new(size * size),
            components_dirty: false,
            start: None,
            end: None,
        };
        // Emulates 'placing' of walls around the border to correctly
        // initialize the neighbour masks of the edge cells.
        for i in -1..=(size as i32) {
            grid.update_neighbours(i, -1, true);
            grid.update_neighbours(i, size as i32, true);
            grid.update_neighbours(-1, i, true);
            grid.update_neighbours(size as i32, i, true);
        }
        grid.generate_components();
        grid
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.kinds.width
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.size() && (y as usize) < self.size()
    }

    pub fn kind(&self, cell: Point) -> CellKind {
        CellKind::from_code(self.kinds.get_point(cell))
    }

    /// The cell currently painted as the start, if any.
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// The cell currently painted as the end, if any.
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// Walkable cardinal neighbours of `cell`, in left, right, up, down
    /// order, read from the incrementally maintained bitmask.
    pub fn neighbours(&self, cell: Point) -> Vec<Point> {
        let mask = self.neighbours.get_point(cell);
        NEIGHBOUR_OFFSETS
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, (dx, dy))| Point::new(cell.x + dx, cell.y + dy))
            .collect()
    }

    /// Reclassifies a cell. Assigning [CellKind::Start] or [CellKind::End]
    /// clears the previous holder of that role; a cell holds at most one
    /// role, so painting a wall over the start also removes the start.
    pub fn set_kind(&mut self, cell: Point, kind: CellKind) {
        debug_assert!(self.in_bounds(cell.x, cell.y));
        let old = self.kind(cell);
        if old == kind {
            return;
        }
        match kind {
            CellKind::Start => {
                if let Some(prev) = self.start.take() {
                    self.kinds.set_point(prev, CellKind::Empty as u8);
                }
                self.start = Some(cell);
            }
            CellKind::End => {
                if let Some(prev) = self.end.take() {
                    self.kinds.set_point(prev, CellKind::Empty as u8);
                }
                self.end = Some(cell);
            }
            _ => {}
        }
        if self.start == Some(cell) && kind != CellKind::Start {
            self.start = None;
        }
        if self.end == Some(cell) && kind != CellKind::End {
            self.end = None;
        }
        self.kinds.set_point(cell, kind as u8);
        if kind == CellKind::Wall {
            // Breaking a cell out of the walkable graph may split its
            // component; defer the rebuild until the next update().
            self.components_dirty = true;
            self.update_neighbours(cell.x, cell.y, true);
        } else if old == CellKind::Wall {
            self.update_neighbours(cell.x, cell.y, false);
            let cell_ix = self.ix(cell);
            for n in self.neighbours(cell) {
                let n_ix = self.ix(n);
                self.components.union(cell_ix, n_ix);
            }
        }
    }

    /// Resets a cell to [CellKind::Empty].
    pub fn clear(&mut self, cell: Point) {
        self.set_kind(cell, CellKind::Empty);
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.ix(*point))
    }

    /// Checks if `a` and `b` are walkable cells on the same component.
    pub fn reachable(&self, a: &Point, b: &Point) -> bool {
        !self.unreachable(a, b)
    }

    /// Checks if `a` and `b` are on different components (or out of
    /// bounds). Call [update](Self::update) first if walls were painted
    /// since the components were generated.
    pub fn unreachable(&self, a: &Point, b: &Point) -> bool {
        if self.in_bounds(a.x, a.y) && self.in_bounds(b.x, b.y) {
            !self.components.equiv(self.ix(*a), self.ix(*b))
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("components are dirty: regenerating");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up walkable grid
    /// neighbours to the same components.
    pub fn generate_components(&mut self) {
        let r = self.size();
        self.components = UnionFind::new(r * r);
        self.components_dirty = false;
        for x in 0..r as i32 {
            for y in 0..r as i32 {
                let point = Point::new(x, y);
                if !self.kind(point).walkable() {
                    continue;
                }
                let parent_ix = self.ix(point);
                for next in [Point::new(x + 1, y), Point::new(x, y + 1)] {
                    if self.in_bounds(next.x, next.y) && self.kind(next).walkable() {
                        let ix = self.ix(next);
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }

    fn ix(&self, p: Point) -> usize {
        p.y as usize * self.size() + p.x as usize
    }

    /// Flips the bit for this cell in the neighbour masks of the up-to-4
    /// cells around it. The coordinates may lie one step outside the grid,
    /// which is how the border is sealed at construction time.
    fn update_neighbours(&mut self, x: i32, y: i32, blocked: bool) {
        for (i, (dx, dy)) in NEIGHBOUR_OFFSETS.iter().enumerate() {
            let nx = x + dx;
            let ny = y + dy;
            if self.in_bounds(nx, ny) {
                let neighbor = Point::new(nx, ny);
                // Offsets pair up left/right and up/down, so the opposite
                // direction index is obtained by flipping the lowest bit.
                let opposite = i ^ 1;
                let mut mask = self.neighbours.get_point(neighbor);
                if blocked {
                    mask &= !(1 << opposite);
                } else {
                    mask |= 1 << opposite;
                }
                self.neighbours.set_point(neighbor, mask);
            }
        }
    }
}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.size() as i32 {
            for x in 0..self.size() as i32 {
                let c = match self.kind(Point::new(x, y)) {
                    CellKind::Empty => '.',
                    CellKind::Wall => '#',
                    CellKind::Start => 'S',
                    CellKind::End => 'E',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbour_order_is_left_right_up_down() {
        let grid = MazeGrid::new(3);
        let centre = Point::new(1, 1);
        assert_eq!(
            grid.neighbours(centre),
            vec![
                Point::new(0, 1),
                Point::new(2, 1),
                Point::new(1, 0),
                Point::new(1, 2),
            ]
        );
    }

    #[test]
    fn border_cells_have_trimmed_neighbourhoods() {
        let grid = MazeGrid::new(3);
        assert_eq!(
            grid.neighbours(Point::new(0, 0)),
            vec![Point::new(1, 0), Point::new(0, 1)]
        );
        assert_eq!(
            grid.neighbours(Point::new(2, 2)),
            vec![Point::new(1, 2), Point::new(2, 1)]
        );
    }

    #[test]
    fn wall_edits_refresh_adjacency() {
        let mut grid = MazeGrid::new(3);
        let centre = Point::new(1, 1);
        grid.set_kind(Point::new(0, 1), CellKind::Wall);
        assert_eq!(
            grid.neighbours(centre),
            vec![Point::new(2, 1), Point::new(1, 0), Point::new(1, 2)]
        );
        grid.clear(Point::new(0, 1));
        assert_eq!(grid.neighbours(centre).len(), 4);
    }

    #[test]
    fn repainting_start_moves_it() {
        let mut grid = MazeGrid::new(3);
        grid.set_kind(Point::new(0, 0), CellKind::Start);
        grid.set_kind(Point::new(2, 2), CellKind::Start);
        assert_eq!(grid.start(), Some(Point::new(2, 2)));
        assert_eq!(grid.kind(Point::new(0, 0)), CellKind::Empty);
    }

    #[test]
    fn wall_over_endpoint_clears_the_role() {
        let mut grid = MazeGrid::new(3);
        grid.set_kind(Point::new(0, 0), CellKind::Start);
        grid.set_kind(Point::new(1, 1), CellKind::End);
        grid.set_kind(Point::new(0, 0), CellKind::Wall);
        grid.clear(Point::new(1, 1));
        assert_eq!(grid.start(), None);
        assert_eq!(grid.end(), None);
        assert_eq!(grid.kind(Point::new(0, 0)), CellKind::Wall);
    }

    /// Tests whether points are correctly mapped to different connected
    /// components.
    #[test]
    fn component_generation() {
        // ...#.
        // ...#.
        // ...#.
        let mut grid = MazeGrid::new(3);
        grid.set_kind(Point::new(1, 0), CellKind::Wall);
        grid.set_kind(Point::new(1, 1), CellKind::Wall);
        grid.set_kind(Point::new(1, 2), CellKind::Wall);
        grid.update();
        assert!(grid.unreachable(&Point::new(0, 0), &Point::new(2, 0)));
        assert!(grid.reachable(&Point::new(0, 0), &Point::new(0, 2)));
    }

    #[test]
    fn clearing_a_wall_reconnects_components() {
        let mut grid = MazeGrid::new(3);
        for y in 0..3 {
            grid.set_kind(Point::new(1, y), CellKind::Wall);
        }
        grid.update();
        assert!(grid.unreachable(&Point::new(0, 1), &Point::new(2, 1)));
        grid.clear(Point::new(1, 1));
        assert!(grid.reachable(&Point::new(0, 1), &Point::new(2, 1)));
    }

    #[test]
    fn display_renders_kinds() {
        let mut grid = MazeGrid::new(2);
        grid.set_kind(Point::new(0, 0), CellKind::Start);
        grid.set_kind(Point::new(1, 1), CellKind::End);
        grid.set_kind(Point::new(1, 0), CellKind::Wall);
        assert_eq!(grid.to_string(), "S#\n.E\n");
    }
}
