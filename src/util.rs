use crate::consts;
use crate::game::Grid;
use crate::render::PIXELS_PER_ROW;
use crate::score::{FileStore, ScoreStore};
use crate::sound::SoundSink;
use enum_map::Enum;
use ratatui::layout::{Flex, Layout, Rect, Size};

/// Settings & resources shared by every screen of the application
#[derive(Debug)]
pub(crate) struct Globals<S = FileStore> {
    pub(crate) scores: ScoreStore<S>,
    pub(crate) sound: Box<dyn SoundSink>,
    pub(crate) grid: Grid,

    /// Edge length of a grid cell in canvas pixels
    pub(crate) cell_size: u16,
}

impl<S> Globals<S> {
    /// Size of the canvas in terminal cells
    pub(crate) fn canvas_size(&self) -> Size {
        let height = self.grid.height.saturating_mul(self.cell_size);
        Size {
            width: self.grid.width.saturating_mul(self.cell_size),
            height: height.div_ceil(PIXELS_PER_ROW),
        }
    }

    /// Size of the area in which a game screen is drawn: the bordered canvas
    /// plus a score bar above it and two message lines below
    pub(crate) fn display_size(&self) -> Size {
        let canvas = self.canvas_size();
        Size {
            width: canvas
                .width
                .saturating_add(2)
                .max(consts::MIN_DISPLAY_WIDTH),
            height: canvas.height.saturating_add(5),
        }
    }
}

/// Return a `Rect` of the given size centered within `area`, shrunk to fit if
/// necessary
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [rect] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(rect);
    rect
}

pub(crate) trait EnumExt: Enum {
    fn iter() -> impl Iterator<Item = Self>;
    fn next(self) -> Option<Self>;
    fn prev(self) -> Option<Self>;
}

impl<T: Enum> EnumExt for T {
    fn iter() -> impl Iterator<Item = T> {
        (0..T::LENGTH).map(T::from_usize)
    }

    fn next(self) -> Option<T> {
        let i = self.into_usize().checked_add(1)?;
        (i < T::LENGTH).then(|| T::from_usize(i))
    }

    fn prev(self) -> Option<T> {
        self.into_usize().checked_sub(1).map(T::from_usize)
    }
}
