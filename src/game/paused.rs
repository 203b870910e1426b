use crate::command::Command;
use crate::consts;
use crate::util::EnumExt;
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};

/// The pause menu pop-up.  The game underneath stays frozen while it is
/// shown.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Paused {
    /// The currently-selected item in the pause menu
    selection: PauseOpt,
}

impl Paused {
    /// The size that should be used for the `Rect` passed to
    /// `Paused::render()`
    pub(super) const SIZE: Size = Size {
        width: 17,
        height: 5,
    };

    pub(super) fn new() -> Paused {
        Paused {
            selection: PauseOpt::Resume,
        }
    }

    /// Handle a key command.  Returns `Some` if the user made a choice.
    /// Directions other than up & down do nothing, and neither does the speed
    /// boost key.
    pub(super) fn handle_command(&mut self, cmd: Command) -> Option<PauseOpt> {
        match cmd {
            Command::Pause => return Some(PauseOpt::Resume),
            Command::R => return Some(PauseOpt::Restart),
            Command::Q | Command::Quit => return Some(PauseOpt::Quit),
            Command::Enter => return Some(self.selection),
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

/// The choices in the pause menu
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(super) enum PauseOpt {
    /// Unpause the game
    Resume,

    /// Start a new run
    Restart,

    /// Quit the application
    Quit,
}

impl PauseOpt {
    /// Render the option as a `Line` for display in the pause menu.  If
    /// `selected` is `true`, this option is the currently-selected one.
    fn to_line(self, selected: bool) -> Line<'static> {
        let (label, key) = match self {
            PauseOpt::Resume => ("Resume", "p"),
            PauseOpt::Restart => ("Restart", "r"),
            PauseOpt::Quit => ("Quit", "q"),
        };
        let mut line = Line::from_iter([
            Span::raw(if selected { "» " } else { "  " }),
            Span::raw(label),
            Span::raw(" ("),
            Span::styled(key, consts::KEY_STYLE),
            Span::raw(")"),
        ]);
        if selected {
            line = line.style(consts::MENU_SELECTION_STYLE);
        }
        line
    }
}

impl Widget for Paused {
    /*
     * ┌─── PAUSED ────┐
     * │ » Resume (p)  │
     * │   Restart (r) │
     * │   Quit (q)    │
     * └───────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = Block::bordered()
            .title(" PAUSED ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        block.render(area, buf);
        for (opt, row) in PauseOpt::iter().zip(inner.rows()) {
            opt.to_line(self.selection == opt).render(row, buf);
        }
    }
}
