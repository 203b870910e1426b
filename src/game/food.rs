use super::grid::Grid;
use super::snake::Snake;
use crate::consts;
use crate::render::Rgb;
use enum_map::Enum;
use rand::{seq::IteratorRandom, Rng};
use ratatui::layout::Position;
use std::collections::HashSet;

/// The varieties of food, each with its own color & point value
#[derive(Clone, Copy, Debug, Enum, Eq, Hash, PartialEq)]
pub(crate) enum FoodKind {
    Ember,
    Gold,
    Lime,
}

impl FoodKind {
    pub(crate) fn color(self) -> Rgb {
        match self {
            FoodKind::Ember => Rgb::new(0xFF, 0x45, 0x00),
            FoodKind::Gold => Rgb::new(0xFF, 0xD7, 0x00),
            FoodKind::Lime => Rgb::new(0x7C, 0xFC, 0x00),
        }
    }

    pub(crate) fn points(self) -> u32 {
        let multiple = match self {
            FoodKind::Ember => 1,
            FoodKind::Gold => 2,
            FoodKind::Lime => 3,
        };
        consts::POINTS_PER_FOOD * multiple
    }

    /// Pick a kind uniformly at random
    pub(crate) fn random<R: Rng + ?Sized>(rng: &mut R) -> FoodKind {
        FoodKind::from_usize(rng.random_range(0..FoodKind::LENGTH))
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Food {
    pub(crate) position: Position,
    pub(crate) kind: FoodKind,
}

impl Food {
    /// Place a random kind of food on a random cell of `grid` that the snake
    /// does not occupy.
    ///
    /// Cells are drawn uniformly from the whole grid and redrawn whenever they
    /// land on the snake.  After as many misses as there are cells, the
    /// remaining free cells are enumerated instead, so a crowded board still
    /// terminates.  Returns `None` only if the snake covers the entire grid.
    pub(crate) fn generate<R: Rng + ?Sized>(rng: &mut R, grid: Grid, snake: &Snake) -> Option<Food> {
        let kind = FoodKind::random(rng);
        let occupied = snake.cells().iter().copied().collect::<HashSet<_>>();
        let area = usize::from(grid.width) * usize::from(grid.height);
        for _ in 0..area {
            let position = Position::new(
                rng.random_range(0..grid.width),
                rng.random_range(0..grid.height),
            );
            if !occupied.contains(&position) {
                return Some(Food { position, kind });
            }
        }
        grid.positions()
            .filter(|p| !occupied.contains(p))
            .choose(rng)
            .map(|position| Food { position, kind })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::EnumExt;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    const GRID: Grid = Grid {
        width: 20,
        height: 20,
    };

    #[rstest]
    #[case(FoodKind::Ember, 10)]
    #[case(FoodKind::Gold, 20)]
    #[case(FoodKind::Lime, 30)]
    fn test_points(#[case] kind: FoodKind, #[case] points: u32) {
        assert_eq!(kind.points(), points);
    }

    #[test]
    fn never_placed_on_snake() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        for _ in 0..10_000 {
            let qty = rng.random_range(0..300);
            let snake = (0..qty)
                .map(|_| {
                    Position::new(
                        rng.random_range(0..GRID.width),
                        rng.random_range(0..GRID.height),
                    )
                })
                .collect::<Snake>();
            let food = Food::generate(&mut rng, GRID, &snake).unwrap();
            assert!(GRID.contains(food.position));
            assert!(!snake.contains(food.position));
        }
    }

    #[test]
    fn last_free_cell() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let free = Position::new(13, 7);
        let snake = GRID.positions().filter(|&p| p != free).collect::<Snake>();
        let food = Food::generate(&mut rng, GRID, &snake).unwrap();
        assert_eq!(food.position, free);
    }

    #[test]
    fn full_board() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let snake = GRID.positions().collect::<Snake>();
        assert_eq!(Food::generate(&mut rng, GRID, &snake), None);
    }

    #[test]
    fn every_kind_turns_up() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let seen = (0..300)
            .map(|_| FoodKind::random(&mut rng))
            .collect::<HashSet<_>>();
        assert_eq!(seen, FoodKind::iter().collect::<HashSet<_>>());
    }
}
