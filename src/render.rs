//! Painting the game onto a pixel canvas and showing that canvas in the
//! terminal
use crate::consts;
use crate::game::{Food, GameState};
use ratatui::{
    buffer::Buffer,
    layout::{Rect, Size},
    style::Color,
    widgets::Widget,
};

/// Number of canvas pixel rows shown in a single terminal row
pub(crate) const PIXELS_PER_ROW: u16 = 2;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct Rgb {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl Rgb {
    pub(crate) const fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }

    /// Return the color `hsl(hue, 100%, 50%)`.  `hue` is taken modulo 360.
    pub(crate) fn from_hue(hue: u16) -> Rgb {
        let hue = hue % 360;
        let rem = hue % 60;
        let rising = scale_channel(rem);
        let falling = scale_channel(60 - rem);
        match hue / 60 {
            0 => Rgb::new(u8::MAX, rising, 0),
            1 => Rgb::new(falling, u8::MAX, 0),
            2 => Rgb::new(0, u8::MAX, rising),
            3 => Rgb::new(0, falling, u8::MAX),
            4 => Rgb::new(rising, 0, u8::MAX),
            _ => Rgb::new(u8::MAX, 0, falling),
        }
    }

    /// Composite 50%-opaque white over this color
    pub(crate) fn lighten(self) -> Rgb {
        let half_white = |c: u8| u8::try_from((u16::from(c) + 256) / 2).unwrap_or(u8::MAX);
        Rgb::new(half_white(self.r), half_white(self.g), half_white(self.b))
    }
}

/// Map `0..=60` onto `0..=255`, rounding to nearest
fn scale_channel(sixtieths: u16) -> u8 {
    u8::try_from((u32::from(sixtieths) * 255 + 30) / 60).unwrap_or(u8::MAX)
}

impl From<Rgb> for Color {
    fn from(value: Rgb) -> Color {
        Color::Rgb(value.r, value.g, value.b)
    }
}

/// A fixed-size raster of RGB pixels
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Canvas {
    width: u16,
    height: u16,
    pixels: Vec<Rgb>,
}

impl Canvas {
    pub(crate) fn new(width: u16, height: u16, fill: Rgb) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![fill; usize::from(width) * usize::from(height)],
        }
    }

    pub(crate) fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    pub(crate) fn pixel(&self, x: u16, y: u16) -> Option<Rgb> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    fn set_pixel(&mut self, x: u16, y: u16, color: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Fill the pixels of `rect` (clipped to the canvas) with `color`
    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        for p in rect.positions() {
            self.set_pixel(p.x, p.y, color);
        }
    }

    /// Fill the disc of radius `radius` centered in the middle of `square`
    /// (clipped to the canvas).  A pixel is inside the disc if its center is.
    fn fill_disc(&mut self, square: Rect, radius: u16, color: Rgb) {
        // Work in half-pixels so that every center is a whole number
        let cx = 2 * i64::from(square.x) + i64::from(square.width);
        let cy = 2 * i64::from(square.y) + i64::from(square.height);
        let r = 2 * i64::from(radius);
        for p in square.positions() {
            let dx = 2 * i64::from(p.x) + 1 - cx;
            let dy = 2 * i64::from(p.y) + 1 - cy;
            if dx * dx + dy * dy <= r * r {
                self.set_pixel(p.x, p.y, color);
            }
        }
    }

    /// Apply [`Rgb::lighten()`] to the top `rows` rows
    fn lighten_rows(&mut self, rows: u16) {
        let end = usize::from(rows.min(self.height)) * usize::from(self.width);
        for px in &mut self.pixels[..end] {
            *px = px.lighten();
        }
    }
}

/// Draw the current state of the game, with each grid cell `cell_size` pixels
/// on a side.
pub(crate) fn paint<R>(state: &GameState<R>, cell_size: u16) -> Canvas {
    let grid = state.grid();
    let mut canvas = Canvas::new(
        grid.width.saturating_mul(cell_size),
        grid.height.saturating_mul(cell_size),
        consts::BACKGROUND,
    );
    let cell_rect = |x: u16, y: u16| {
        Rect::new(
            x.saturating_mul(cell_size),
            y.saturating_mul(cell_size),
            cell_size,
            cell_size,
        )
    };
    for (i, p) in state.snake().cells().iter().enumerate() {
        canvas.fill_rect(cell_rect(p.x, p.y), segment_color(i));
    }
    if let Some(Food { position, kind }) = state.food() {
        let radius = (cell_size / 2).saturating_sub(cell_size / 10).max(1);
        canvas.fill_disc(cell_rect(position.x, position.y), radius, kind.color());
    }
    if state.boost_active() {
        canvas.lighten_rows((cell_size / 4).max(1));
    }
    canvas
}

/// Color of the `index`-th cell of the snake, counting from the head
pub(crate) fn segment_color(index: usize) -> Rgb {
    let step = u16::try_from(index % 36).unwrap_or_default();
    Rgb::from_hue(step * consts::HUE_STEP)
}

/// Widget showing a [`Canvas`] with one terminal cell per pixel column and
/// [`PIXELS_PER_ROW`] pixel rows, using the upper half block as the glyph.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct CanvasView<'a>(pub(crate) &'a Canvas);

impl CanvasView<'_> {
    /// The size of the terminal area needed to show the whole canvas
    pub(crate) fn size(&self) -> Size {
        let Size { width, height } = self.0.size();
        Size {
            width,
            height: height.div_ceil(PIXELS_PER_ROW),
        }
    }
}

impl Widget for CanvasView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (row, line) in (0..self.size().height).zip(area.rows()) {
            let top_y = row.saturating_mul(PIXELS_PER_ROW);
            for (x, pos) in (0..self.0.width).zip(line.positions()) {
                let Some(top) = self.0.pixel(x, top_y) else {
                    continue;
                };
                let bottom = self
                    .0
                    .pixel(x, top_y.saturating_add(1))
                    .map_or(Color::Reset, Color::from);
                if let Some(cell) = buf.cell_mut(pos) {
                    cell.set_char('▀');
                    cell.set_fg(top.into());
                    cell.set_bg(bottom);
                }
            }
        }
    }
}
