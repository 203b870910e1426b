use super::direction::Direction;
use super::grid::Grid;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// The snake, as a run of grid cells
///
/// The cells are ordered from head to tail, so the head is at index 0.  All
/// positions are grid cells, not pixels.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    cells: VecDeque<Position>,
}

impl Snake {
    /// Create a snake `len` cells long with its head at `head`, laid out in a
    /// straight line behind the head so that it can move in `direction`.
    pub(crate) fn new(head: Position, direction: Direction, len: usize, grid: Grid) -> Snake {
        let behind = direction.reverse();
        std::iter::successors(Some(head), |&p| Some(behind.advance(p, grid)))
            .take(len)
            .collect()
    }

    /// Return the position of the snake's head.
    ///
    /// # Panics
    ///
    /// Panics if the snake has no cells, which can only happen when it was
    /// collected from an empty iterator.
    pub(crate) fn head(&self) -> Position {
        *self.cells.front().expect("snake should never be empty")
    }

    /// Return all of the snake's cells, head first
    pub(crate) fn cells(&self) -> &VecDeque<Position> {
        &self.cells
    }

    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    /// Add a new head in front of the current one
    pub(crate) fn push_head(&mut self, pos: Position) {
        self.cells.push_front(pos);
    }

    /// Remove the last cell of the tail
    pub(crate) fn pop_tail(&mut self) -> Option<Position> {
        self.cells.pop_back()
    }

    /// Returns `true` if the head occupies the same cell as some other part of
    /// the snake
    pub(crate) fn bites_itself(&self) -> bool {
        let mut cells = self.cells.iter();
        cells
            .next()
            .is_some_and(|head| cells.any(|p| p == head))
    }
}

impl FromIterator<Position> for Snake {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Snake {
        Snake {
            cells: iter.into_iter().collect(),
        }
    }
}
