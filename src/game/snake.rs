use super::cell::Cell;
use super::direction::Direction;
use std::collections::VecDeque;

/// Snake state.  Snate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    /// The position of the snake's head
    pub(super) head: Cell,

    /// The positions of the rest of the snake, from the neck to the tip of the
    /// tail
    pub(super) body: VecDeque<Cell>,

    /// The direction applied on the most recent move
    pub(super) direction: Direction,

    /// The direction that will be applied on the next move
    pub(super) pending: Direction,
}

impl Snake {
    /// Create a one-cell snake at `head` facing in `direction`
    pub(super) fn new(head: Cell, direction: Direction) -> Snake {
        Snake {
            head,
            body: VecDeque::new(),
            direction,
            pending: direction,
        }
    }

    pub(super) fn head(&self) -> Cell {
        self.head
    }

    pub(super) fn direction(&self) -> Direction {
        self.direction
    }

    /// Number of cells occupied by the snake, head included
    pub(super) fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// Iterate over the snake's cells from head to tail
    pub(super) fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        std::iter::once(self.head).chain(self.body.iter().copied())
    }

    pub(super) fn occupies(&self, cell: Cell) -> bool {
        self.head == cell || self.body.contains(&cell)
    }

    /// Queue a turn for the next move.  Returns `false` and leaves the queued
    /// direction alone if `direction` would reverse the snake into its own
    /// neck.
    pub(super) fn turn(&mut self, direction: Direction) -> bool {
        if direction == self.direction.reverse() {
            false
        } else {
            self.pending = direction;
            true
        }
    }

    /// Make the queued direction the current one and return it
    pub(super) fn commit_turn(&mut self) -> Direction {
        self.direction = self.pending;
        self.direction
    }

    /// Move the head to `next`.  Unless `grow` is true, the tip of the tail is
    /// dropped so that the length stays the same.
    pub(super) fn advance(&mut self, next: Cell, grow: bool) {
        self.body.push_front(self.head);
        self.head = next;
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Is the head on top of some other part of the snake?
    pub(super) fn bites_itself(&self) -> bool {
        self.body.contains(&self.head)
    }

    /// Build a snake from `(x, y)` pairs listed from head to tail
    #[cfg(test)]
    pub(super) fn from_coords(coords: &[(i16, i16)], direction: Direction) -> Snake {
        let mut cells = coords.iter().map(|&(x, y)| Cell::new(x, y));
        let head = cells.next().expect("snake should have a head");
        Snake {
            head,
            body: cells.collect(),
            direction,
            pending: direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_shifts() {
        let mut s = Snake::from_coords(&[(5, 5), (4, 5), (3, 5)], Direction::Right);
        s.advance(Cell::new(6, 5), false);
        assert_eq!(
            s.cells().collect::<Vec<_>>(),
            [Cell::new(6, 5), Cell::new(5, 5), Cell::new(4, 5)]
        );
    }

    #[test]
    fn advance_grows() {
        let mut s = Snake::from_coords(&[(5, 5)], Direction::Right);
        s.advance(Cell::new(6, 5), true);
        assert_eq!(s.len(), 2);
        assert_eq!(s.head(), Cell::new(6, 5));
        assert!(s.occupies(Cell::new(5, 5)));
    }

    #[test]
    fn reversal_is_rejected() {
        let mut s = Snake::from_coords(&[(5, 5), (4, 5)], Direction::Right);
        assert!(!s.turn(Direction::Left));
        assert_eq!(s.commit_turn(), Direction::Right);
    }

    #[test]
    fn reversal_checked_against_committed_direction() {
        let mut s = Snake::from_coords(&[(5, 5), (4, 5)], Direction::Right);
        assert!(s.turn(Direction::Up));
        assert!(s.turn(Direction::Down));
        assert!(!s.turn(Direction::Left));
        assert_eq!(s.commit_turn(), Direction::Down);
        assert!(!s.turn(Direction::Up));
    }

    #[test]
    fn bites_itself() {
        let mut s = Snake::from_coords(&[(5, 5), (5, 6), (4, 6), (4, 5), (3, 5)], Direction::Left);
        assert!(!s.bites_itself());
        s.advance(Cell::new(4, 5), false);
        assert!(s.bites_itself());
    }
}
