//! Food entity and free-cell placement

use serde::Serialize;

use super::location::Location;
use super::snake::Snake;
use crate::config::{BOARD_SIZE, FOOD_SPAWN_MAX_ATTEMPTS};

/// Kind of a food item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodKind {
    /// Regular food, grows the eater by one cell
    Normal,
    /// Bonus food, doubles the eater's length
    Bonus,
}

/// The single food item on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    /// Cell of the food
    pub location: Location,
    /// Kind of the food
    pub kind: FoodKind,
}

impl Food {
    /// Create food at a specific cell
    pub fn at(location: Location, kind: FoodKind) -> Self {
        Self { location, kind }
    }

    /// Check if a cell matches the food position
    pub fn is_at(&self, loc: Location) -> bool {
        self.location == loc
    }

    /// Place food on a uniformly random free cell, rejecting cells occupied
    /// by either snake.
    ///
    /// Random retries are bounded; a nearly full board falls back to scanning
    /// for the first free cell. A board with no free cell at all means the
    /// configured snakes outgrew the grid, which is unrecoverable.
    pub fn spawn(snakes: &[Snake; 2], kind: FoodKind) -> Self {
        let occupied = |loc: Location| snakes.iter().any(|s| s.body().contains(&loc));

        for _ in 0..FOOD_SPAWN_MAX_ATTEMPTS {
            let candidate = Location::random();
            if !occupied(candidate) {
                return Food::at(candidate, kind);
            }
        }

        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                let candidate = Location::new(x, y);
                if !occupied(candidate) {
                    return Food::at(candidate, kind);
                }
            }
        }

        panic!("no free cell left for food: snakes exceed board capacity");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PLAYERS;

    #[test]
    fn test_is_at() {
        let food = Food::at(Location::new(3, 4), FoodKind::Normal);
        assert!(food.is_at(Location::new(3, 4)));
        assert!(!food.is_at(Location::new(4, 3)));
    }

    #[test]
    fn test_spawn_avoids_snakes() {
        let snakes = [
            Snake::from_config(&PLAYERS[0]),
            Snake::from_config(&PLAYERS[1]),
        ];

        for _ in 0..50 {
            let food = Food::spawn(&snakes, FoodKind::Normal);
            assert!(!snakes.iter().any(|s| s.body().contains(&food.location)));
        }
    }

    #[test]
    fn test_spawn_keeps_requested_kind() {
        let snakes = [
            Snake::from_config(&PLAYERS[0]),
            Snake::from_config(&PLAYERS[1]),
        ];
        assert_eq!(Food::spawn(&snakes, FoodKind::Bonus).kind, FoodKind::Bonus);
        assert_eq!(Food::spawn(&snakes, FoodKind::Normal).kind, FoodKind::Normal);
    }
}
