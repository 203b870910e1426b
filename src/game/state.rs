use super::direction::Direction;
use super::food::{Food, FoodKind};
use super::grid::Grid;
use super::snake::Snake;
use crate::consts;
use rand::Rng;
use std::time::Duration;

/// Everything that changes over the course of a single run of the game
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GameState<R = rand::rngs::ThreadRng> {
    pub(super) rng: R,
    pub(super) grid: Grid,
    pub(super) snake: Snake,

    /// The direction the snake moved in on the most recent tick
    pub(super) direction: Direction,

    /// The direction the snake will move in on the next tick
    pub(super) next_direction: Direction,

    /// `None` once the snake has filled the whole grid
    pub(super) food: Option<Food>,

    pub(super) score: u32,
    pub(super) level: u32,
    pub(super) paused: bool,
    pub(super) boost_active: bool,

    /// `false` once the run has ended
    pub(super) running: bool,
}

impl<R: Rng> GameState<R> {
    pub(crate) fn new(grid: Grid, mut rng: R) -> GameState<R> {
        let snake = starting_snake(grid);
        let food = Food::generate(&mut rng, grid, &snake);
        GameState {
            rng,
            grid,
            snake,
            direction: START_DIRECTION,
            next_direction: START_DIRECTION,
            food,
            score: 0,
            level: 1,
            paused: false,
            boost_active: false,
            running: true,
        }
    }

    /// Put everything back the way it is at the start of a run.  The grid and
    /// RNG are kept.
    pub(crate) fn reset(&mut self) {
        self.direction = START_DIRECTION;
        self.next_direction = START_DIRECTION;
        self.snake = starting_snake(self.grid);
        self.score = 0;
        self.level = 1;
        self.paused = false;
        self.boost_active = false;
        self.running = true;
        self.food = Food::generate(&mut self.rng, self.grid, &self.snake);
    }

    /// Advance the game by one step.  Does nothing while paused or after the
    /// run has ended.
    ///
    /// The head is pushed first, then either the food is eaten (and the snake
    /// keeps its tail) or the tail is dropped, and only then is the head
    /// checked against the rest of the body.  Moving into the cell that the
    /// tail is vacating on the same tick is therefore not a collision.
    pub(crate) fn tick(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.paused || !self.running {
            return outcome;
        }
        self.direction = self.next_direction;
        let head = self.direction.advance(self.snake.head(), self.grid);
        debug_assert!(self.grid.contains(head), "head should stay on the grid");
        self.snake.push_head(head);
        match self.food {
            Some(food) if food.position == head => {
                self.score = self.score.saturating_add(food.kind.points());
                outcome.ate = Some(food.kind);
                if self.snake.len() % consts::LEVEL_UP_LENGTH == 0 {
                    self.level_up();
                    outcome.leveled_up = true;
                }
                self.food = Food::generate(&mut self.rng, self.grid, &self.snake);
            }
            _ => {
                let _ = self.snake.pop_tail();
            }
        }
        if self.snake.bites_itself() || self.food.is_none() {
            self.running = false;
            outcome.game_over = true;
        }
        outcome
    }
}

impl<R> GameState<R> {
    /// Queue up a turn for the next tick.  A turn that would send the snake
    /// straight back the way it is currently going is ignored.
    pub(crate) fn set_direction(&mut self, direction: Direction) {
        if direction != self.direction.reverse() {
            self.next_direction = direction;
        }
    }

    pub(crate) fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub(crate) fn toggle_speed_boost(&mut self) {
        self.boost_active = !self.boost_active;
    }

    pub(crate) fn level_up(&mut self) {
        self.level = self.level.saturating_add(1);
    }

    /// The time that should elapse between ticks in the current state
    pub(crate) fn tick_interval(&self) -> Duration {
        if self.boost_active {
            consts::MAX_SPEED
        } else {
            level_interval(self.level)
        }
    }

    pub(crate) fn grid(&self) -> Grid {
        self.grid
    }

    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    pub(crate) fn food(&self) -> Option<Food> {
        self.food
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn level(&self) -> u32 {
        self.level
    }

    pub(crate) fn paused(&self) -> bool {
        self.paused
    }

    pub(crate) fn boost_active(&self) -> bool {
        self.boost_active
    }

    pub(crate) fn running(&self) -> bool {
        self.running
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, food: Food) {
        self.food = Some(food);
    }
}

const START_DIRECTION: Direction = Direction::East;

fn starting_snake(grid: Grid) -> Snake {
    Snake::new(
        consts::SNAKE_START,
        START_DIRECTION,
        consts::INITIAL_SNAKE_LENGTH,
        grid,
    )
}

/// Tick period for a given level when the speed boost is off
pub(crate) fn level_interval(level: u32) -> Duration {
    let speedup = consts::SPEED_INCREMENT.saturating_mul(level.saturating_sub(1));
    consts::INITIAL_SPEED
        .saturating_sub(speedup)
        .max(consts::MAX_SPEED)
}

/// What happened during a call to [`GameState::tick()`]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct TickOutcome {
    /// The kind of food eaten, if any
    pub(crate) ate: Option<FoodKind>,
    pub(crate) leveled_up: bool,
    pub(crate) game_over: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use ratatui::layout::Position;
    use rstest::rstest;
    use std::collections::{HashSet, VecDeque};

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn new_state() -> GameState<ChaCha12Rng> {
        let grid = Grid::from_canvas(400, 400, 20).unwrap();
        GameState::new(grid, ChaCha12Rng::seed_from_u64(RNG_SEED))
    }

    fn place_food(state: &mut GameState<ChaCha12Rng>, x: u16, y: u16, kind: FoodKind) {
        state.set_food(Food {
            position: Position::new(x, y),
            kind,
        });
    }

    #[test]
    fn reset() {
        let state = new_state();
        assert_eq!(
            state.grid,
            Grid {
                width: 20,
                height: 20
            }
        );
        assert_eq!(
            state.snake.cells(),
            &VecDeque::from([
                Position::new(10, 10),
                Position::new(9, 10),
                Position::new(8, 10),
            ])
        );
        assert_eq!(state.direction, Direction::East);
        assert_eq!(state.next_direction, Direction::East);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert!(!state.paused);
        assert!(!state.boost_active);
        assert!(state.running);
        let food = state.food.unwrap();
        assert!(!state.snake.contains(food.position));
        assert_eq!(state.tick_interval(), Duration::from_millis(150));
    }

    #[test]
    fn reset_after_play() {
        let mut state = new_state();
        place_food(&mut state, 11, 10, FoodKind::Lime);
        state.set_direction(Direction::North);
        state.toggle_speed_boost();
        state.level_up();
        let _ = state.tick();
        state.toggle_pause();
        state.reset();
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.snake.head(), Position::new(10, 10));
        assert_eq!(state.direction, Direction::East);
        assert_eq!(state.next_direction, Direction::East);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert!(!state.paused);
        assert!(!state.boost_active);
        assert!(state.running);
    }

    #[test]
    fn reset_matches_new() {
        let mut state = new_state();
        place_food(&mut state, 10, 11, FoodKind::Gold);
        state.set_direction(Direction::South);
        assert_eq!(state.tick().ate, Some(FoodKind::Gold));
        let _ = state.tick();
        state.toggle_speed_boost();
        let expected = GameState::new(state.grid, state.rng.clone());
        state.reset();
        assert_eq!(state, expected);
    }

    #[test]
    fn tick_moves_forwards() {
        let mut state = new_state();
        place_food(&mut state, 0, 0, FoodKind::Ember);
        let outcome = state.tick();
        assert_eq!(outcome, TickOutcome::default());
        assert_eq!(
            state.snake.cells(),
            &VecDeque::from([
                Position::new(11, 10),
                Position::new(10, 10),
                Position::new(9, 10),
            ])
        );
    }

    #[rstest]
    #[case(Position::new(19, 5), Direction::East, Position::new(0, 5))]
    #[case(Position::new(0, 5), Direction::West, Position::new(19, 5))]
    #[case(Position::new(5, 0), Direction::North, Position::new(5, 19))]
    #[case(Position::new(5, 19), Direction::South, Position::new(5, 0))]
    #[case(Position::new(7, 8), Direction::South, Position::new(7, 9))]
    fn tick_wraps(#[case] head: Position, #[case] direction: Direction, #[case] new_head: Position) {
        let mut state = new_state();
        state.snake = Snake::new(head, direction, 3, state.grid);
        state.direction = direction;
        state.next_direction = direction;
        place_food(&mut state, 12, 12, FoodKind::Ember);
        let _ = state.tick();
        assert_eq!(state.snake.head(), new_head);
        assert_eq!(state.snake.len(), 3);
        assert!(state.running);
    }

    #[test]
    fn tick_commits_buffered_direction() {
        let mut state = new_state();
        place_food(&mut state, 0, 0, FoodKind::Ember);
        state.set_direction(Direction::South);
        assert_eq!(state.direction, Direction::East);
        let _ = state.tick();
        assert_eq!(state.direction, Direction::South);
        assert_eq!(state.snake.head(), Position::new(10, 11));
    }

    #[test]
    fn reversal_is_ignored() {
        let mut state = new_state();
        state.set_direction(Direction::West);
        assert_eq!(state.next_direction, Direction::East);
    }

    #[test]
    fn reversal_checked_against_committed_direction() {
        let mut state = new_state();
        state.set_direction(Direction::North);
        assert_eq!(state.next_direction, Direction::North);
        // South is the reverse of the buffered direction but not of the
        // committed one
        state.set_direction(Direction::South);
        assert_eq!(state.next_direction, Direction::South);
        state.set_direction(Direction::West);
        assert_eq!(state.next_direction, Direction::South);
    }

    #[test]
    fn eat_food() {
        let mut state = new_state();
        place_food(&mut state, 11, 10, FoodKind::Gold);
        let outcome = state.tick();
        assert_eq!(
            outcome,
            TickOutcome {
                ate: Some(FoodKind::Gold),
                leveled_up: false,
                game_over: false,
            }
        );
        assert_eq!(state.score, 20);
        assert_eq!(
            state.snake.cells(),
            &VecDeque::from([
                Position::new(11, 10),
                Position::new(10, 10),
                Position::new(9, 10),
                Position::new(8, 10),
            ])
        );
        let food = state.food.unwrap();
        assert!(!state.snake.contains(food.position));
    }

    #[test]
    fn level_up_after_two_meals() {
        let mut state = new_state();
        place_food(&mut state, 11, 10, FoodKind::Ember);
        let outcome = state.tick();
        assert!(!outcome.leveled_up);
        assert_eq!(state.level, 1);
        place_food(&mut state, 12, 10, FoodKind::Lime);
        let outcome = state.tick();
        assert!(outcome.leveled_up);
        assert_eq!(state.snake.len(), 5);
        assert_eq!(state.level, 2);
        assert_eq!(state.score, 40);
        assert_eq!(state.tick_interval(), Duration::from_millis(145));
    }

    #[rstest]
    #[case(1, 150)]
    #[case(2, 145)]
    #[case(10, 105)]
    #[case(20, 55)]
    #[case(21, 50)]
    #[case(22, 50)]
    #[case(1000, 50)]
    fn test_level_interval(#[case] level: u32, #[case] millis: u64) {
        assert_eq!(level_interval(level), Duration::from_millis(millis));
    }

    #[test]
    fn speed_boost() {
        let mut state = new_state();
        state.level_up();
        state.toggle_speed_boost();
        assert!(state.boost_active);
        assert_eq!(state.tick_interval(), Duration::from_millis(50));
        state.level_up();
        assert_eq!(state.tick_interval(), Duration::from_millis(50));
        state.toggle_speed_boost();
        assert!(!state.boost_active);
        assert_eq!(state.tick_interval(), Duration::from_millis(140));
    }

    #[test]
    fn paused_tick_does_nothing() {
        let mut state = new_state();
        state.toggle_pause();
        let before = state.clone();
        assert_eq!(state.tick(), TickOutcome::default());
        assert_eq!(state, before);
        state.toggle_pause();
        let _ = state.tick();
        assert_eq!(state.snake.head(), Position::new(11, 10));
    }

    #[test]
    fn self_collision() {
        let mut state = new_state();
        state.snake = Snake::from_iter([
            Position::new(5, 5),
            Position::new(5, 6),
            Position::new(6, 6),
            Position::new(6, 5),
            Position::new(7, 5),
        ]);
        state.direction = Direction::North;
        state.next_direction = Direction::East;
        place_food(&mut state, 0, 0, FoodKind::Ember);
        state.score = 70;
        let outcome = state.tick();
        assert!(outcome.game_over);
        assert!(!state.running);
        assert_eq!(state.snake.head(), Position::new(6, 5));
        assert_eq!(state.score, 70);
        let before = state.clone();
        assert_eq!(state.tick(), TickOutcome::default());
        assert_eq!(state, before);
    }

    #[test]
    fn chasing_tail_is_allowed() {
        let mut state = new_state();
        state.snake = Snake::from_iter([
            Position::new(5, 5),
            Position::new(5, 6),
            Position::new(6, 6),
            Position::new(6, 5),
        ]);
        state.direction = Direction::North;
        state.next_direction = Direction::East;
        place_food(&mut state, 0, 0, FoodKind::Ember);
        let outcome = state.tick();
        assert!(!outcome.game_over);
        assert!(state.running);
        assert_eq!(
            state.snake.cells(),
            &VecDeque::from([
                Position::new(6, 5),
                Position::new(5, 5),
                Position::new(5, 6),
                Position::new(6, 6),
            ])
        );
    }

    #[test]
    fn filling_the_board_ends_the_run() {
        let grid = Grid::from_canvas(11, 11, 1).unwrap();
        let mut state = GameState::new(grid, ChaCha12Rng::seed_from_u64(RNG_SEED));
        // Snake covers every cell but (10, 10), heading for it with food there
        let mut cells = grid
            .positions()
            .filter(|&p| p != Position::new(10, 10))
            .collect::<Vec<_>>();
        cells.sort_by_key(|&p| p == Position::new(9, 10));
        cells.reverse();
        state.snake = cells.into_iter().collect();
        state.direction = Direction::East;
        state.next_direction = Direction::East;
        place_food(&mut state, 10, 10, FoodKind::Ember);
        let outcome = state.tick();
        assert_eq!(outcome.ate, Some(FoodKind::Ember));
        assert!(outcome.game_over);
        assert_eq!(state.food, None);
        assert!(!state.running);
    }

    #[test]
    fn random_play_stays_consistent() {
        let mut state = new_state();
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED ^ 0xFFFF);
        let directions = [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ];
        for _ in 0..5000 {
            if !state.running {
                state.reset();
            }
            if rng.random_bool(0.3) {
                state.set_direction(directions[rng.random_range(0..directions.len())]);
            }
            let len_before = state.snake.len();
            let score_before = state.score;
            let level_before = state.level;
            let food_before = state.food.map(|f| f.position);
            let outcome = state.tick();
            let ate = food_before == Some(state.snake.head());
            assert_eq!(outcome.ate.is_some(), ate);
            if ate {
                assert_eq!(state.snake.len(), len_before + 1);
            } else {
                assert_eq!(state.snake.len(), len_before);
            }
            assert!(state.score >= score_before);
            assert!(state.level >= level_before);
            if state.running {
                let unique = state.snake.cells().iter().collect::<HashSet<_>>();
                assert_eq!(unique.len(), state.snake.len());
                let food = state.food.unwrap();
                assert!(!state.snake.contains(food.position));
            }
        }
    }
}
