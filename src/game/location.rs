//! Location struct for board cells

use serde::{Deserialize, Serialize};
use std::hash::Hash;

use super::direction::Direction;
use crate::config::BOARD_SIZE;

/// A cell on the game board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    /// Create a new location
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell adjacent to this one in the given direction.
    /// Wraps around the board edges on both axes.
    pub fn adjacent(&self, direction: Direction) -> Location {
        let (dx, dy) = direction.offset();
        Location::new(
            (self.x + dx).rem_euclid(BOARD_SIZE),
            (self.y + dy).rem_euclid(BOARD_SIZE),
        )
    }

    /// Generate a random cell on the board
    pub fn random() -> Self {
        use rand::Rng;
        let mut rng = rand::thread_rng();

        Location::new(rng.gen_range(0..BOARD_SIZE), rng.gen_range(0..BOARD_SIZE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent() {
        let loc = Location::new(10, 10);

        assert_eq!(loc.adjacent(Direction::North), Location::new(10, 9));
        assert_eq!(loc.adjacent(Direction::South), Location::new(10, 11));
        assert_eq!(loc.adjacent(Direction::West), Location::new(9, 10));
        assert_eq!(loc.adjacent(Direction::East), Location::new(11, 10));
    }

    #[test]
    fn test_wrap_around() {
        // Left edge wraps to the right edge
        let left = Location::new(0, 10);
        assert_eq!(left.adjacent(Direction::West), Location::new(BOARD_SIZE - 1, 10));

        // Right edge wraps to the left edge
        let right = Location::new(BOARD_SIZE - 1, 10);
        assert_eq!(right.adjacent(Direction::East), Location::new(0, 10));

        // Top edge wraps to the bottom edge
        let top = Location::new(10, 0);
        assert_eq!(top.adjacent(Direction::North), Location::new(10, BOARD_SIZE - 1));

        // Bottom edge wraps to the top edge
        let bottom = Location::new(10, BOARD_SIZE - 1);
        assert_eq!(bottom.adjacent(Direction::South), Location::new(10, 0));
    }

    #[test]
    fn test_random_in_range() {
        for _ in 0..100 {
            let loc = Location::random();
            assert!((0..BOARD_SIZE).contains(&loc.x));
            assert!((0..BOARD_SIZE).contains(&loc.y));
        }
    }
}
