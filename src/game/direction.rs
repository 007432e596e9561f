//! Direction enum for snake headings

use serde::{Deserialize, Serialize};

/// Heading of a snake, one of the four cardinal directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Moving up
    North,
    /// Moving down
    South,
    /// Moving left
    West,
    /// Moving right
    East,
}

impl Direction {
    /// Cell offset of one step along this direction
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
        }
    }

    /// The exact reverse of this direction
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
        }
    }

    /// Check if this direction is opposite to another
    pub fn is_opposite(&self, other: &Direction) -> bool {
        self.opposite() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_are_unit_steps() {
        for dir in [
            Direction::North,
            Direction::South,
            Direction::West,
            Direction::East,
        ] {
            let (dx, dy) = dir.offset();
            assert_eq!(dx.abs() + dy.abs(), 1);
        }
    }

    #[test]
    fn test_is_opposite() {
        assert!(Direction::North.is_opposite(&Direction::South));
        assert!(Direction::East.is_opposite(&Direction::West));
        assert!(!Direction::North.is_opposite(&Direction::East));
        assert!(!Direction::North.is_opposite(&Direction::North));
    }

    #[test]
    fn test_opposite_is_involution() {
        for dir in [
            Direction::North,
            Direction::South,
            Direction::West,
            Direction::East,
        ] {
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }
}
