//! Translating raw terminal input into game actions
use crate::command::Command;
use crate::game::Direction;
use crate::render::PIXELS_PER_ROW;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

/// The logical actions a player can take during a game.  Whatever receives
/// them decides whether they apply in the current state.
pub(crate) trait InputAdapter {
    fn on_direction(&mut self, direction: Direction);
    fn on_pause_toggle(&mut self);
    fn on_boost_toggle(&mut self);

    /// Forward a key command to the matching action.  Returns `false` if the
    /// command is not a gameplay action.
    fn on_command(&mut self, cmd: Command) -> bool {
        if let Some(d) = cmd.direction() {
            self.on_direction(d);
        } else if cmd == Command::Pause {
            self.on_pause_toggle();
        } else if cmd == Command::Boost {
            self.on_boost_toggle();
        } else {
            return false;
        }
        true
    }
}

/// Turns a press-drag-release of the left mouse button into a direction, the
/// way a finger swipe would be on a touch screen.
///
/// Coordinates are in canvas pixels, so a terminal row counts for
/// [`PIXELS_PER_ROW`] units of vertical distance.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct DragTracker {
    start: Option<(i32, i32)>,
}

impl DragTracker {
    pub(crate) fn begin(&mut self, x: i32, y: i32) {
        self.start = Some((x, y));
    }

    /// Return the direction of the displacement from the start of the drag to
    /// `(x, y)`.  Each call measures from the original start point.
    pub(crate) fn drag_to(&self, x: i32, y: i32) -> Option<Direction> {
        let (x0, y0) = self.start?;
        Direction::from_displacement(x - x0, y - y0)
    }

    pub(crate) fn end(&mut self) {
        self.start = None;
    }

    /// Feed a mouse event through the tracker, returning the direction of the
    /// drag if it is one.  Only a press inside `surface` starts a drag; once
    /// started, the drag may leave it.
    pub(crate) fn handle(&mut self, ev: MouseEvent, surface: Rect) -> Option<Direction> {
        let x = i32::from(ev.column);
        let y = i32::from(ev.row) * i32::from(PIXELS_PER_ROW);
        match ev.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if surface.contains(Position::new(ev.column, ev.row)) {
                    self.begin(x, y);
                } else {
                    self.end();
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => return self.drag_to(x, y),
            MouseEventKind::Up(MouseButton::Left) => self.end(),
            _ => (),
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use rstest::rstest;

    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    struct Recorder {
        directions: Vec<Direction>,
        pauses: usize,
        boosts: usize,
    }

    impl InputAdapter for Recorder {
        fn on_direction(&mut self, direction: Direction) {
            self.directions.push(direction);
        }

        fn on_pause_toggle(&mut self) {
            self.pauses += 1;
        }

        fn on_boost_toggle(&mut self) {
            self.boosts += 1;
        }
    }

    const SURFACE: Rect = Rect::new(5, 2, 30, 10);

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[rstest]
    #[case(20, 12, Some(Direction::East))]
    #[case(0, 10, Some(Direction::West))]
    #[case(11, 30, Some(Direction::South))]
    #[case(10, 0, Some(Direction::North))]
    #[case(15, 15, Some(Direction::South))]
    #[case(10, 10, None)]
    fn test_drag_to(#[case] x: i32, #[case] y: i32, #[case] d: Option<Direction>) {
        let mut tracker = DragTracker::default();
        tracker.begin(10, 10);
        assert_eq!(tracker.drag_to(x, y), d);
    }

    #[test]
    fn drag_without_start() {
        let mut tracker = DragTracker::default();
        assert_eq!(tracker.drag_to(30, 10), None);
        tracker.begin(0, 0);
        tracker.end();
        assert_eq!(tracker.drag_to(30, 10), None);
    }

    #[test]
    fn mouse_gesture() {
        let mut tracker = DragTracker::default();
        assert_eq!(tracker.handle(mouse(MouseEventKind::Down(MouseButton::Left), 10, 5), SURFACE), None);
        // Three columns right versus two rows (four pixels) down
        assert_eq!(
            tracker.handle(mouse(MouseEventKind::Drag(MouseButton::Left), 13, 7), SURFACE),
            Some(Direction::South)
        );
        assert_eq!(
            tracker.handle(mouse(MouseEventKind::Drag(MouseButton::Left), 15, 7), SURFACE),
            Some(Direction::East)
        );
        assert_eq!(tracker.handle(mouse(MouseEventKind::Up(MouseButton::Left), 15, 7), SURFACE), None);
        assert_eq!(tracker.handle(mouse(MouseEventKind::Drag(MouseButton::Left), 30, 7), SURFACE), None);
    }

    #[test]
    fn press_outside_surface() {
        let mut tracker = DragTracker::default();
        assert_eq!(tracker.handle(mouse(MouseEventKind::Down(MouseButton::Left), 2, 5), SURFACE), None);
        assert_eq!(tracker.handle(mouse(MouseEventKind::Drag(MouseButton::Left), 10, 5), SURFACE), None);
        assert_eq!(tracker, DragTracker::default());
        // A press below the bottom row is outside, too
        assert_eq!(tracker.handle(mouse(MouseEventKind::Down(MouseButton::Left), 10, 12), SURFACE), None);
        assert_eq!(tracker.handle(mouse(MouseEventKind::Drag(MouseButton::Left), 10, 3), SURFACE), None);
    }

    #[test]
    fn press_outside_surface_ends_drag() {
        let mut tracker = DragTracker::default();
        assert_eq!(tracker.handle(mouse(MouseEventKind::Down(MouseButton::Left), 10, 5), SURFACE), None);
        assert_eq!(tracker.handle(mouse(MouseEventKind::Down(MouseButton::Left), 40, 5), SURFACE), None);
        assert_eq!(tracker.handle(mouse(MouseEventKind::Drag(MouseButton::Left), 20, 5), SURFACE), None);
    }

    #[test]
    fn drag_may_leave_surface() {
        let mut tracker = DragTracker::default();
        assert_eq!(tracker.handle(mouse(MouseEventKind::Down(MouseButton::Left), 30, 5), SURFACE), None);
        assert_eq!(
            tracker.handle(mouse(MouseEventKind::Drag(MouseButton::Left), 60, 5), SURFACE),
            Some(Direction::East)
        );
    }

    #[test]
    fn right_button_ignored() {
        let mut tracker = DragTracker::default();
        assert_eq!(tracker.handle(mouse(MouseEventKind::Down(MouseButton::Right), 10, 5), SURFACE), None);
        assert_eq!(tracker.handle(mouse(MouseEventKind::Drag(MouseButton::Right), 20, 5), SURFACE), None);
        assert_eq!(tracker, DragTracker::default());
    }

    #[rstest]
    #[case(Command::Up, true)]
    #[case(Command::Pause, true)]
    #[case(Command::Boost, true)]
    #[case(Command::Enter, false)]
    #[case(Command::Q, false)]
    fn test_on_command(#[case] cmd: Command, #[case] handled: bool) {
        let mut rec = Recorder::default();
        assert_eq!(rec.on_command(cmd), handled);
    }

    #[test]
    fn on_command_dispatch() {
        let mut rec = Recorder::default();
        assert!(rec.on_command(Command::Left));
        assert!(rec.on_command(Command::Pause));
        assert!(rec.on_command(Command::Boost));
        assert!(rec.on_command(Command::Boost));
        assert_eq!(
            rec,
            Recorder {
                directions: vec![Direction::West],
                pauses: 1,
                boosts: 2,
            }
        );
    }
}
