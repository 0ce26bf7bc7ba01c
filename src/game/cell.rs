use super::direction::Direction;
use std::fmt;

/// A position on the playing field.  Coordinates are 1-indexed; a cell with a
/// coordinate outside `1..=size` is off the board (which is where the snake's
/// head ends up just before it hits a wall).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Cell {
    pub(crate) x: i16,
    pub(crate) y: i16,
}

impl Cell {
    pub(crate) const fn new(x: i16, y: i16) -> Cell {
        Cell { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The square playing field and its edge behavior
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Board {
    size: i16,
    wrap: bool,
}

impl Board {
    pub(crate) fn new(size: i16, wrap: bool) -> Board {
        Board { size, wrap }
    }

    pub(crate) fn size(self) -> i16 {
        self.size
    }

    /// Whether moving off one edge of the board brings the snake back in on
    /// the opposite edge
    pub(crate) fn wrap(self) -> bool {
        self.wrap
    }

    pub(crate) fn toggle_wrap(&mut self) {
        self.wrap = !self.wrap;
    }

    pub(crate) fn contains(self, cell: Cell) -> bool {
        let range = 1..=self.size;
        range.contains(&cell.x) && range.contains(&cell.y)
    }

    /// Return the cell on the board nearest to `cell`
    pub(crate) fn clamp(self, cell: Cell) -> Cell {
        Cell::new(cell.x.clamp(1, self.size), cell.y.clamp(1, self.size))
    }

    /// Return the cell one step from `cell` in `direction`.  In wrap mode the
    /// result is always on the board; otherwise it may lie one step outside.
    pub(crate) fn step(self, cell: Cell, direction: Direction) -> Cell {
        let (dx, dy) = direction.offset();
        let next = Cell::new(cell.x + dx, cell.y + dy);
        if self.wrap {
            self.wrap_cell(next)
        } else {
            next
        }
    }

    fn wrap_cell(self, cell: Cell) -> Cell {
        Cell::new(
            (cell.x - 1).rem_euclid(self.size) + 1,
            (cell.y - 1).rem_euclid(self.size) + 1,
        )
    }

    /// Iterate over every cell on the board in row-major order
    pub(crate) fn cells(self) -> impl Iterator<Item = Cell> {
        let size = self.size;
        (1..=size).flat_map(move |y| (1..=size).map(move |x| Cell::new(x, y)))
    }
}
