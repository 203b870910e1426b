use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::game::FoodKind;
use crate::render::segment_color;
use crate::score::{FileStore, KeyValueStore};
use crate::util::{center_rect, EnumExt, Globals};
use crossterm::event::{read, Event};
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect, Size},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::Widget,
    Frame,
};

/// The screen shown at startup, before the first run
#[derive(Debug)]
pub(crate) struct Title<S = FileStore> {
    globals: Globals<S>,
    selection: TitleOpt,
    high_score: u32,
}

impl<S: KeyValueStore> Title<S> {
    pub(crate) fn new(globals: Globals<S>) -> Self {
        let high_score = globals.scores.load();
        Title {
            globals,
            selection: TitleOpt::Play,
            high_score,
        }
    }
}

impl<S> Title<S> {
    /// Hand the shared resources over to the next screen
    pub(crate) fn into_globals(self) -> Globals<S> {
        self.globals
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        Ok(self.handle_event(read()?))
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::Quit | Command::Q => return Some(Screen::Quit),
            Command::N | Command::Boost => return Some(Screen::Game),
            Command::Enter => {
                return Some(match self.selection {
                    TitleOpt::Play => Screen::Game,
                    TitleOpt::Quit => Screen::Quit,
                })
            }
            Command::Up => {
                if let Some(opt) = self.selection.prev() {
                    self.selection = opt;
                }
            }
            Command::Down => {
                if let Some(opt) = self.selection.next() {
                    self.selection = opt;
                }
            }
            _ => (),
        }
        None
    }
}

/// The buttons on the title screen
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
enum TitleOpt {
    Play,
    Quit,
}

impl TitleOpt {
    fn to_line(self, selected: bool) -> Line<'static> {
        let (label, key) = match self {
            TitleOpt::Play => ("[Play (", "n"),
            TitleOpt::Quit => ("[Quit (", "q"),
        };
        let style = if selected {
            consts::MENU_SELECTION_STYLE
        } else {
            Style::new()
        };
        Line::from_iter([
            Span::styled(label, style),
            Span::styled(key, consts::KEY_STYLE.patch(style)),
            Span::styled(")]", style),
        ])
        .centered()
    }
}

impl<S> Widget for &Title<S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = center_rect(
            area,
            Size {
                width: Instructions::WIDTH,
                height: TITLE_HEIGHT,
            },
        );
        let [logo_area, instructions_area, legend_area, high_area, play_area, quit_area] =
            Layout::vertical([Logo::HEIGHT, Instructions::HEIGHT, 1, 1, 1, 1])
                .flex(Flex::Start)
                .spacing(1)
                .areas(display);

        let [logo_area] = Layout::horizontal([Logo::WIDTH])
            .flex(Flex::Center)
            .areas(logo_area);
        Logo.render(logo_area, buf);
        Instructions.render(instructions_area, buf);

        let mut legend = Line::default();
        for (i, kind) in FoodKind::iter().enumerate() {
            if i > 0 {
                legend.push_span("   ");
            }
            legend.push_span(Span::styled("●", Style::new().fg(kind.color().into())));
            legend.push_span(format!(" {} pts", kind.points()));
        }
        legend.centered().render(legend_area, buf);

        Line::from(format!("High Score: {}", self.high_score))
            .centered()
            .render(high_area, buf);

        for (opt, area) in TitleOpt::iter().zip([play_area, quit_area]) {
            opt.to_line(self.selection == opt).render(area, buf);
        }
    }
}

/// Logo, instructions, and four single lines, with a blank line between each
const TITLE_HEIGHT: u16 = Logo::HEIGHT + Instructions::HEIGHT + 4 + 5;

/// The game's name in large letters, colored like a snake
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Logo;

impl Logo {
    const HEIGHT: u16 = 5;
    const WIDTH: u16 = 28;
}

#[rustfmt::skip]
static LOGO: &[&str] = &[
     " ____              _        ",
     "/ ___| _ __   __ _| | _____ ",
    r"\___ \| '_ \ / _` | |/ / _ \",
     " ___) | | | | (_| |   <  __/",
    r"|____/|_| |_|\__,_|_|\_\___|",
];

impl Widget for Logo {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Text::from_iter(LOGO.iter().copied()).render(area, buf);
        // Two columns per hue step, running from the tail on the left to the
        // head on the right
        for (x, pos_x) in (0..Self::WIDTH).zip(area.left()..area.right()) {
            let index = usize::from((Self::WIDTH - 1 - x) / 2);
            let color = Color::from(segment_color(index));
            for y in area.top()..area.bottom() {
                if let Some(cell) = buf.cell_mut((pos_x, y)) {
                    cell.set_fg(color);
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Instructions;

impl Instructions {
    const HEIGHT: u16 = 4;
    const WIDTH: u16 = 48;
}

static INSTRUCTIONS: &[&str] = &[
    "Steer with arrows, wasd, hjkl, or a mouse drag.",
    "Pause with p or Esc; toggle speed boost with",
    "space.  Every fifth segment raises the level.",
    "Don't bite yourself; the edges wrap around.",
];

impl Widget for Instructions {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Text::from_iter(INSTRUCTIONS.iter().copied()).render(area, buf);
    }
}
