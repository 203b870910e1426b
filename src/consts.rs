//! Assorted constants & hard-coded configuration
use crate::render::Rgb;
use ratatui::{
    layout::Position,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Time between movements of the snake at level 1
pub(crate) const INITIAL_SPEED: Duration = Duration::from_millis(150);

/// Shortest possible time between movements of the snake.  This is also the
/// period used while the speed boost is active.
pub(crate) const MAX_SPEED: Duration = Duration::from_millis(50);

/// How much shorter the tick period gets with each level
pub(crate) const SPEED_INCREMENT: Duration = Duration::from_millis(5);

/// Length of the snake at the start of a game
pub(crate) const INITIAL_SNAKE_LENGTH: usize = 3;

/// Cell occupied by the snake's head at the start of a game.  The rest of the
/// snake trails off to the west.
pub(crate) const SNAKE_START: Position = Position { x: 10, y: 10 };

/// The level goes up whenever the snake's length becomes a multiple of this
pub(crate) const LEVEL_UP_LENGTH: usize = 5;

/// Point value of the cheapest kind of food; the other kinds are worth two and
/// three times as much.
pub(crate) const POINTS_PER_FOOD: u32 = 10;

/// Key under which the high score is kept in the key-value store
pub(crate) const HIGH_SCORE_KEY: &str = "snakeHighScore";

/// Default canvas width in pixels
pub(crate) const DEFAULT_CANVAS_WIDTH: u16 = 60;

/// Default canvas height in pixels
pub(crate) const DEFAULT_CANVAS_HEIGHT: u16 = 36;

/// Default edge length of a grid cell in pixels
pub(crate) const DEFAULT_CELL_SIZE: u16 = 2;

/// Canvas background
pub(crate) const BACKGROUND: Rgb = Rgb::new(0x20, 0x20, 0x20);

/// Hue difference between consecutive segments of the snake
pub(crate) const HUE_STEP: u16 = 10;

/// Number of terminal columns the game screen takes up at minimum, so that the
/// score bar fits on small canvases
pub(crate) const MIN_DISPLAY_WIDTH: u16 = 50;

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the currently-selected title screen item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

/// Style for the "GAME OVER" banner
pub(crate) const GAME_OVER_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::BOLD);
