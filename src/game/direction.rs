use super::grid::Grid;
use ratatui::layout::Position;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Return the cell one step from `pos` in this direction.  The grid wraps
    /// around, so stepping off one edge lands on the opposite edge.
    pub(crate) fn advance(self, pos: Position, grid: Grid) -> Position {
        let Position { mut x, mut y } = pos;
        match self {
            Direction::North => y = decrement_wrapping(y, grid.height),
            Direction::East => x = increment_wrapping(x, grid.width),
            Direction::South => y = increment_wrapping(y, grid.height),
            Direction::West => x = decrement_wrapping(x, grid.width),
        }
        Position { x, y }
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Pick a direction for a drag that has moved `dx` pixels rightwards and
    /// `dy` pixels downwards.  The axis with the larger displacement wins, with
    /// ties going to the vertical axis.  A drag that hasn't moved at all has
    /// no direction.
    pub(crate) fn from_displacement(dx: i32, dy: i32) -> Option<Direction> {
        if dx == 0 && dy == 0 {
            None
        } else if dx.unsigned_abs() > dy.unsigned_abs() {
            Some(if dx > 0 {
                Direction::East
            } else {
                Direction::West
            })
        } else if dy > 0 {
            Some(Direction::South)
        } else {
            Some(Direction::North)
        }
    }
}

fn decrement_wrapping(x: u16, max: u16) -> u16 {
    x.checked_sub(1).unwrap_or_else(|| max.saturating_sub(1))
}

fn increment_wrapping(x: u16, max: u16) -> u16 {
    x.checked_add(1).filter(|&xx| xx < max).unwrap_or(0)
}
