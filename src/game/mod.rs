mod direction;
mod food;
mod grid;
mod paused;
mod snake;
mod state;
pub(crate) use self::direction::Direction;
pub(crate) use self::food::{Food, FoodKind};
pub(crate) use self::grid::{Grid, GridError};
pub(crate) use self::state::GameState;
use self::paused::{PauseOpt, Paused};
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::input::{DragTracker, InputAdapter};
use crate::render::{paint, CanvasView};
use crate::score::{FileStore, KeyValueStore};
use crate::sound::Cue;
use crate::ticker::Ticker;
use crate::util::{center_rect, Globals};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Widget},
    Frame,
};
use std::time::Instant;

/// The game screen: a [`GameState`] driven by a [`Ticker`] and by the
/// player's input
#[derive(Debug)]
pub(crate) struct Game<R = rand::rngs::ThreadRng, S = FileStore> {
    state: GameState<R>,
    globals: Globals<S>,
    ticker: Ticker,
    drag: DragTracker,
    pause_menu: Paused,

    /// Where the canvas was last drawn on the terminal; mouse drags must start
    /// inside it
    surface: Rect,

    /// The stored high score as of the start of the run, updated when the run
    /// ends
    high_score: u32,

    /// Set when the high score could not be written at the end of the run
    save_failed: bool,
}

impl<S: KeyValueStore> Game<rand::rngs::ThreadRng, S> {
    pub(crate) fn new(globals: Globals<S>) -> Self {
        Game::new_with_rng(globals, rand::rng())
    }
}

impl<R: Rng, S: KeyValueStore> Game<R, S> {
    /// Start a new run.  The ticker starts immediately.
    pub(crate) fn new_with_rng(globals: Globals<S>, rng: R) -> Game<R, S> {
        let state = GameState::new(globals.grid, rng);
        let mut ticker = Ticker::new(state.tick_interval());
        ticker.start(Instant::now());
        let high_score = globals.scores.load();
        tracing::info!(
            width = globals.grid.width,
            height = globals.grid.height,
            high_score,
            "Starting new game"
        );
        Game {
            state,
            globals,
            ticker,
            drag: DragTracker::default(),
            pause_menu: Paused::new(),
            surface: Rect::default(),
            high_score,
            save_failed: false,
        }
    }

    /// Wait for either the next tick or the next input event, whichever comes
    /// first, and handle it.  After the run has ended, this blocks until the
    /// next input event.
    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        match self.ticker.time_until(Instant::now()) {
            Some(wait) if wait.is_zero() || !poll(wait)? => {
                self.on_tick(Instant::now());
                Ok(None)
            }
            _ => Ok(self.handle_event(read()?)),
        }
    }

    fn on_tick(&mut self, now: Instant) {
        if !self.ticker.fire_if_due(now) {
            return;
        }
        let outcome = self.state.tick();
        if outcome.ate.is_some() {
            self.globals.sound.cue(Cue::Eat);
        }
        if outcome.leveled_up {
            // The new level's period applies even while boosted
            let period = state::level_interval(self.state.level());
            tracing::info!(level = self.state.level(), ?period, "Level up");
            self.ticker.reschedule(period, now);
        }
        if outcome.game_over {
            self.finish();
        }
    }

    /// Wrap up a run that has just ended
    fn finish(&mut self) {
        self.ticker.cancel();
        self.globals.sound.cue(Cue::GameOver);
        let score = self.state.score();
        tracing::info!(score, level = self.state.level(), "Game over");
        if let Err(e) = self.globals.scores.save(score) {
            tracing::error!(error = ?e, "Failed to save high score");
            self.save_failed = true;
        }
        self.high_score = self.high_score.max(score);
    }

    fn restart(&mut self) {
        self.state.reset();
        self.drag.end();
        self.high_score = self.globals.scores.load();
        self.save_failed = false;
        self.ticker
            .reschedule(self.state.tick_interval(), Instant::now());
        tracing::info!("Restarting game");
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match event {
            Event::FocusLost => {
                if self.steerable() {
                    self.on_pause_toggle();
                }
                return None;
            }
            Event::Mouse(ev) => {
                if let Some(d) = self.drag.handle(ev, self.surface) {
                    self.on_direction(d);
                }
                return None;
            }
            _ => (),
        }
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        if cmd == Command::Quit {
            return Some(Screen::Quit);
        }
        if !self.state.running() {
            match cmd {
                Command::R => self.restart(),
                Command::Q => return Some(Screen::Quit),
                _ => (),
            }
        } else if self.state.paused() {
            match self.pause_menu.handle_command(cmd)? {
                PauseOpt::Resume => self.on_pause_toggle(),
                PauseOpt::Restart => self.restart(),
                PauseOpt::Quit => return Some(Screen::Quit),
            }
        } else {
            self.on_command(cmd);
        }
        None
    }
}

impl<R, S> Game<R, S> {
    pub(crate) fn draw(&mut self, frame: &mut Frame<'_>) {
        self.surface = self.layout(frame.area()).canvas;
        frame.render_widget(&*self, frame.area());
    }

    /// Divide up `area` among the parts of the game screen
    fn layout(&self, area: Rect) -> ScreenLayout {
        let display = center_rect(area, self.globals.display_size());
        let [score_bar, body, message, hint] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(display);
        let mut border_size = self.globals.canvas_size();
        border_size.width = border_size.width.saturating_add(2);
        border_size.height = border_size.height.saturating_add(2);
        let border = center_rect(body, border_size);
        ScreenLayout {
            display,
            score_bar,
            border,
            canvas: Block::bordered().inner(border),
            message,
            hint,
        }
    }

    /// Whether direction & speed boost input currently has any effect
    fn steerable(&self) -> bool {
        self.state.running() && !self.state.paused()
    }
}

impl<R, S> InputAdapter for Game<R, S> {
    fn on_direction(&mut self, direction: Direction) {
        if self.steerable() {
            self.state.set_direction(direction);
        }
    }

    fn on_pause_toggle(&mut self) {
        if !self.state.running() {
            return;
        }
        self.state.toggle_pause();
        if self.state.paused() {
            self.pause_menu = Paused::new();
        }
        tracing::debug!(paused = self.state.paused(), "Pause toggled");
    }

    fn on_boost_toggle(&mut self) {
        if !self.steerable() {
            return;
        }
        self.state.toggle_speed_boost();
        self.ticker
            .reschedule(self.state.tick_interval(), Instant::now());
        tracing::debug!(active = self.state.boost_active(), "Speed boost toggled");
    }
}

impl<R, S> Widget for &Game<R, S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = self.layout(area);
        Line::styled(
            format!(
                " Score: {}  Level: {}  High Score: {}",
                self.state.score(),
                self.state.level(),
                self.high_score
            ),
            consts::SCORE_BAR_STYLE,
        )
        .render(layout.score_bar, buf);

        Block::bordered().render(layout.border, buf);
        let canvas = paint(&self.state, self.globals.cell_size);
        CanvasView(&canvas).render(layout.canvas, buf);

        if !self.state.running() {
            Line::from_iter([
                Span::styled(" GAME OVER", consts::GAME_OVER_STYLE),
                Span::raw(format!(
                    "  Final Score: {}  High Score: {}",
                    self.state.score(),
                    self.high_score
                )),
            ])
            .render(layout.message, buf);
            let mut line = Line::from_iter([
                Span::raw(" Restart ("),
                Span::styled("r", consts::KEY_STYLE),
                Span::raw(") — Quit ("),
                Span::styled("q", consts::KEY_STYLE),
                Span::raw(")"),
            ]);
            if self.save_failed {
                line.push_span("  (high score not saved)");
            }
            line.render(layout.hint, buf);
        } else if self.state.paused() {
            self.pause_menu
                .render(center_rect(layout.display, Paused::SIZE), buf);
        } else {
            Line::from_iter([
                Span::raw(" Pause ("),
                Span::styled("p", consts::KEY_STYLE),
                Span::raw(") — Boost ("),
                Span::styled("space", consts::KEY_STYLE),
                Span::raw(") — Quit ("),
                Span::styled("Ctrl-C", consts::KEY_STYLE),
                Span::raw(")"),
            ])
            .render(layout.hint, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct ScreenLayout {
    display: Rect,
    score_bar: Rect,
    border: Rect,
    canvas: Rect,
    /// The line for the game-over message
    message: Rect,
    /// The bottom line, for key hints
    hint: Rect,
}
