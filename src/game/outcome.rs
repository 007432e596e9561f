//! End-of-match winner determination and penalty scoring

use serde::Serialize;

use super::snake::{CrashCause, Snake};

/// Label used when neither player wins a category
pub const DRAW_LABEL: &str = "It's a Draw!";

/// Marker appended to the agility label when the match ends on the clock
pub const TIMEOUT_MARKER: &str = " (Time's Up!)";

/// Why the match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EndReason {
    /// A snake crashed
    Crash,
    /// The match clock ran out
    Timeout,
}

/// Final per-player line of the result
#[derive(Debug, Clone, Serialize)]
pub struct PlayerStats {
    pub name: String,
    pub final_length: usize,
    pub adjusted_score: u32,
    pub crash: CrashCause,
    pub color: String,
}

/// The frozen record produced when a match terminates
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    /// Winner of the agility category (or a draw label)
    pub agility_winner: String,
    /// Winner of the size category (or a draw label)
    pub size_winner: String,
    /// Per-player stats, in slot order
    pub players: [PlayerStats; 2],
    /// Why the match ended
    pub reason: EndReason,
}

/// Size score after the crash penalty: full length for no crash, half for a
/// self-crash, 60% for crashing into the opponent.
pub fn adjusted_score(length: usize, cause: CrashCause) -> u32 {
    let factor = match cause {
        CrashCause::None => 1.0,
        CrashCause::OwnBody => 0.5,
        CrashCause::Opponent => 0.6,
    };
    (length as f64 * factor).round() as u32
}

/// Compute both winner determinations from the final snakes.
///
/// Agility: a non-crashed snake wins outright; when both crashed or the clock
/// ran out, the longer snake wins and equal lengths draw. Timeout labels
/// carry a distinguishing marker. Size: higher penalty-adjusted score wins.
pub fn compute_result(snakes: &[Snake; 2], reason: EndReason) -> MatchResult {
    let [a, b] = snakes;

    let longer_label = || {
        if a.len() > b.len() {
            a.name().to_string()
        } else if b.len() > a.len() {
            b.name().to_string()
        } else {
            DRAW_LABEL.to_string()
        }
    };

    let agility_winner = match reason {
        EndReason::Crash => {
            if a.crashed() && b.crashed() {
                longer_label()
            } else if a.crashed() {
                b.name().to_string()
            } else {
                a.name().to_string()
            }
        }
        EndReason::Timeout => format!("{}{}", longer_label(), TIMEOUT_MARKER),
    };

    let stats = |snake: &Snake| PlayerStats {
        name: snake.name().to_string(),
        final_length: snake.len(),
        adjusted_score: adjusted_score(snake.len(), snake.crash()),
        crash: snake.crash(),
        color: snake.color().to_string(),
    };
    let stats_a = stats(a);
    let stats_b = stats(b);

    let size_winner = if stats_a.adjusted_score > stats_b.adjusted_score {
        stats_a.name.clone()
    } else if stats_b.adjusted_score > stats_a.adjusted_score {
        stats_b.name.clone()
    } else {
        DRAW_LABEL.to_string()
    };

    MatchResult {
        agility_winner,
        size_winner,
        players: [stats_a, stats_b],
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::direction::Direction;
    use crate::game::location::Location;

    fn snake_of_length(name: &str, len: usize, cause: CrashCause) -> Snake {
        let body: Vec<Location> = (0..len as i32).map(|i| Location::new(i, 0)).collect();
        let mut snake = Snake::with_body(name, body, Direction::West);
        snake.set_crash(cause);
        snake
    }

    #[test]
    fn test_penalty_table() {
        assert_eq!(adjusted_score(10, CrashCause::OwnBody), 5);
        assert_eq!(adjusted_score(10, CrashCause::Opponent), 6);
        assert_eq!(adjusted_score(7, CrashCause::None), 7);
    }

    #[test]
    fn test_survivor_wins_agility_regardless_of_length() {
        let a = snake_of_length("a", 8, CrashCause::OwnBody);
        let b = snake_of_length("b", 6, CrashCause::None);
        let result = compute_result(&[a, b], EndReason::Crash);

        assert_eq!(result.agility_winner, "b");
        // Size: 8 * 0.5 = 4 against an unpenalized 6
        assert_eq!(result.players[0].adjusted_score, 4);
        assert_eq!(result.players[1].adjusted_score, 6);
        assert_eq!(result.size_winner, "b");
        assert_eq!(result.reason, EndReason::Crash);
    }

    #[test]
    fn test_simultaneous_head_on_equal_length_draws() {
        let a = snake_of_length("a", 5, CrashCause::Opponent);
        let b = snake_of_length("b", 5, CrashCause::Opponent);
        let result = compute_result(&[a, b], EndReason::Crash);

        assert_eq!(result.agility_winner, DRAW_LABEL);
        // round(5 * 0.6) = 3 each
        assert_eq!(result.players[0].adjusted_score, 3);
        assert_eq!(result.players[1].adjusted_score, 3);
        assert_eq!(result.size_winner, DRAW_LABEL);
    }

    #[test]
    fn test_both_crashed_longer_wins_agility() {
        let a = snake_of_length("a", 9, CrashCause::Opponent);
        let b = snake_of_length("b", 5, CrashCause::OwnBody);
        let result = compute_result(&[a, b], EndReason::Crash);

        assert_eq!(result.agility_winner, "a");
    }

    #[test]
    fn test_timeout_applies_no_penalty_and_marks_label() {
        let a = snake_of_length("a", 12, CrashCause::None);
        let b = snake_of_length("b", 9, CrashCause::None);
        let result = compute_result(&[a, b], EndReason::Timeout);

        assert_eq!(result.agility_winner, format!("a{}", TIMEOUT_MARKER));
        assert_eq!(result.players[0].adjusted_score, 12);
        assert_eq!(result.players[1].adjusted_score, 9);
        assert_eq!(result.size_winner, "a");
        assert_eq!(result.reason, EndReason::Timeout);
    }

    #[test]
    fn test_timeout_equal_lengths_draw_with_marker() {
        let a = snake_of_length("a", 4, CrashCause::None);
        let b = snake_of_length("b", 4, CrashCause::None);
        let result = compute_result(&[a, b], EndReason::Timeout);

        assert_eq!(
            result.agility_winner,
            format!("{}{}", DRAW_LABEL, TIMEOUT_MARKER)
        );
        assert_eq!(result.size_winner, DRAW_LABEL);
    }
}
