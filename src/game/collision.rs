//! Crash classification for a pair of advanced snakes

use super::snake::{CrashCause, PlayerSlot, Snake};

/// Classify both snakes after head advancement and before tail trimming.
///
/// Self-collision is checked first and takes priority over everything else.
/// The opponent scan includes the opponent's new head, so two heads landing
/// on the same cell crash both snakes symmetrically.
pub fn resolve(snakes: &[Snake; 2]) -> [CrashCause; 2] {
    let mut causes = [CrashCause::None; 2];

    for slot in PlayerSlot::BOTH {
        let snake = &snakes[slot.index()];
        let opponent = &snakes[slot.opponent().index()];
        let head = snake.head();

        if snake.body().iter().skip(1).any(|seg| *seg == head) {
            causes[slot.index()] = CrashCause::OwnBody;
        } else if opponent.body().iter().any(|seg| *seg == head) {
            causes[slot.index()] = CrashCause::Opponent;
        }
    }

    causes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::direction::Direction;
    use crate::game::location::Location;

    fn loc(x: i32, y: i32) -> Location {
        Location::new(x, y)
    }

    fn pair(a: Snake, b: Snake) -> [Snake; 2] {
        [a, b]
    }

    #[test]
    fn test_no_contact_no_crash() {
        let a = Snake::with_body("a", vec![loc(5, 5), loc(4, 5)], Direction::East);
        let b = Snake::with_body("b", vec![loc(20, 20), loc(21, 20)], Direction::West);
        assert_eq!(resolve(&pair(a, b)), [CrashCause::None, CrashCause::None]);
    }

    #[test]
    fn test_self_collision() {
        // Head has been advanced onto its own body
        let a = Snake::with_body(
            "a",
            vec![loc(5, 5), loc(5, 4), loc(4, 4), loc(4, 5), loc(5, 5), loc(6, 5)],
            Direction::South,
        );
        let b = Snake::with_body("b", vec![loc(20, 20), loc(21, 20)], Direction::West);
        assert_eq!(resolve(&pair(a, b)), [CrashCause::OwnBody, CrashCause::None]);
    }

    #[test]
    fn test_head_into_opponent_body() {
        let a = Snake::with_body("a", vec![loc(10, 10), loc(9, 10)], Direction::East);
        let b = Snake::with_body(
            "b",
            vec![loc(10, 9), loc(10, 10), loc(10, 11)],
            Direction::North,
        );
        // A's head sits on B's middle segment; B's head cell is free
        assert_eq!(
            resolve(&pair(a, b)),
            [CrashCause::Opponent, CrashCause::None]
        );
    }

    #[test]
    fn test_head_on_crashes_both() {
        // Both heads advanced onto the same cell
        let a = Snake::with_body("a", vec![loc(6, 5), loc(5, 5)], Direction::East);
        let b = Snake::with_body("b", vec![loc(6, 5), loc(7, 5)], Direction::West);
        assert_eq!(
            resolve(&pair(a, b)),
            [CrashCause::Opponent, CrashCause::Opponent]
        );
    }

    #[test]
    fn test_self_crash_not_overwritten_by_head_on() {
        // B advanced onto its own body, and A's head landed on B's head cell
        let b = Snake::with_body(
            "b",
            vec![loc(6, 5), loc(6, 4), loc(6, 5), loc(6, 6)],
            Direction::South,
        );
        let a = Snake::with_body("a", vec![loc(6, 5), loc(7, 5)], Direction::West);
        assert_eq!(
            resolve(&pair(a, b)),
            [CrashCause::Opponent, CrashCause::OwnBody]
        );
    }
}
