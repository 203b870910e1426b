use crate::consts;
use ratatui::layout::{Position, Positions, Rect, Size};
use thiserror::Error;

/// The dimensions, in cells, of the toroidal board that the snake moves on
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    pub(crate) width: u16,
    pub(crate) height: u16,
}

impl Grid {
    /// Derive the grid for a canvas of `width` × `height` pixels divided into
    /// square cells `cell_size` pixels on a side.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `cell_size` is zero, if either canvas dimension is not
    /// an exact multiple of `cell_size`, or if the resulting grid cannot hold
    /// the snake at its starting position.
    pub(crate) fn from_canvas(width: u16, height: u16, cell_size: u16) -> Result<Grid, GridError> {
        if cell_size == 0 {
            return Err(GridError::ZeroCellSize);
        }
        if width % cell_size != 0 {
            return Err(GridError::Uneven {
                axis: "width",
                pixels: width,
                cell_size,
            });
        }
        if height % cell_size != 0 {
            return Err(GridError::Uneven {
                axis: "height",
                pixels: height,
                cell_size,
            });
        }
        let grid = Grid {
            width: width / cell_size,
            height: height / cell_size,
        };
        let tail_x = usize::from(consts::SNAKE_START.x) + 1;
        if grid.width <= consts::SNAKE_START.x
            || grid.height <= consts::SNAKE_START.y
            || tail_x < consts::INITIAL_SNAKE_LENGTH
        {
            return Err(GridError::TooSmall {
                width: grid.width,
                height: grid.height,
            });
        }
        Ok(grid)
    }

    pub(crate) fn size(self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    /// Iterate over every cell of the grid in row-major order
    pub(crate) fn positions(self) -> Positions {
        Rect::from((Position::ORIGIN, self.size())).positions()
    }

    pub(crate) fn contains(self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum GridError {
    #[error("cell size must be nonzero")]
    ZeroCellSize,
    #[error("canvas {axis} of {pixels} px is not a multiple of the {cell_size} px cell size")]
    Uneven {
        axis: &'static str,
        pixels: u16,
        cell_size: u16,
    },
    #[error("a {width}x{height} grid is too small for the snake's starting position")]
    TooSmall { width: u16, height: u16 },
}
