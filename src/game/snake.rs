//! Snake entity and player identity

use std::collections::VecDeque;

use serde::Serialize;

use super::direction::Direction;
use super::location::Location;
use crate::config::{PlayerConfig, INITIAL_SNAKE_LENGTH};

/// One of the two player slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    /// Both slots, in order
    pub const BOTH: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    /// Index into pair arrays
    pub fn index(self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }

    /// The other slot
    pub fn opponent(self) -> PlayerSlot {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }

    /// Player number as shown to clients (1 or 2)
    pub fn number(self) -> u8 {
        match self {
            PlayerSlot::One => 1,
            PlayerSlot::Two => 2,
        }
    }

    /// Parse a client-facing player number
    pub fn from_number(n: u8) -> Option<PlayerSlot> {
        match n {
            1 => Some(PlayerSlot::One),
            2 => Some(PlayerSlot::Two),
            _ => None,
        }
    }
}

/// Why a snake crashed, if it did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CrashCause {
    /// Did not crash
    None,
    /// Ran into its own body
    #[serde(rename = "self")]
    OwnBody,
    /// Ran into the opponent
    Opponent,
}

/// A snake on the board
#[derive(Debug, Clone)]
pub struct Snake {
    /// Display name
    name: String,
    /// Snake color (hex format)
    color: String,
    /// Body cells (head is front, tail is back)
    body: VecDeque<Location>,
    /// Current heading
    heading: Direction,
    /// Crash classification, set when the match ends
    crash: CrashCause,
}

impl Snake {
    /// Build a snake from its slot configuration. The body trails behind the
    /// head, opposite the initial heading, wrapping at the board edges.
    pub fn from_config(config: &PlayerConfig) -> Self {
        let head = Location::new(config.start.0, config.start.1);
        let mut body = VecDeque::with_capacity(INITIAL_SNAKE_LENGTH * 2);
        body.push_back(head);

        let mut current = head;
        for _ in 1..INITIAL_SNAKE_LENGTH {
            current = current.adjacent(config.heading.opposite());
            body.push_back(current);
        }

        Self {
            name: config.name.to_string(),
            color: config.color.to_string(),
            body,
            heading: config.heading,
            crash: CrashCause::None,
        }
    }

    /// Get the snake's display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the snake's color
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Get the snake's head cell
    pub fn head(&self) -> Location {
        *self.body.front().expect("snake body is never empty")
    }

    /// Get all body cells (for collision detection and rendering)
    pub fn body(&self) -> &VecDeque<Location> {
        &self.body
    }

    /// Current body length
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Get the current heading
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Get the crash classification
    pub fn crash(&self) -> CrashCause {
        self.crash
    }

    /// Whether this snake crashed
    pub fn crashed(&self) -> bool {
        self.crash != CrashCause::None
    }

    /// Apply a steering request. A request for the exact reverse of the
    /// current heading is ignored. Returns whether the heading changed.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.heading == direction || self.heading.is_opposite(&direction) {
            return false;
        }
        self.heading = direction;
        true
    }

    /// Advance one cell along the heading: prepend the new head. Whether the
    /// tail is trimmed is decided after collision and food checks.
    pub fn advance(&mut self) {
        let new_head = self.head().adjacent(self.heading);
        self.body.push_front(new_head);
    }

    /// Trim the tail cell. The body never drops below a single cell.
    pub fn pop_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop_back();
        }
    }

    /// Bonus growth: double the pre-advance length. The head was already
    /// prepended this tick, so the pre-advance length is `len() - 1` and the
    /// tail cell is replicated `len() - 2` times.
    pub fn bonus_grow(&mut self) {
        let extra = self.body.len().saturating_sub(2);
        if let Some(tail) = self.body.back().copied() {
            for _ in 0..extra {
                self.body.push_back(tail);
            }
        }
    }

    /// Record the crash classification at match end
    pub fn set_crash(&mut self, cause: CrashCause) {
        self.crash = cause;
    }

    /// Build a snake with an explicit body for rules tests
    #[cfg(test)]
    pub(crate) fn with_body(name: &str, body: Vec<Location>, heading: Direction) -> Self {
        Self {
            name: name.to_string(),
            color: "#FFFFFF".to_string(),
            body: body.into(),
            heading,
            crash: CrashCause::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PLAYERS;

    #[test]
    fn test_from_config_trails_behind_head() {
        let snake = Snake::from_config(&PLAYERS[0]);
        assert_eq!(snake.len(), INITIAL_SNAKE_LENGTH);
        assert_eq!(snake.head(), Location::new(5, 14));

        // Heading east, so the body extends west of the head
        let cells: Vec<Location> = snake.body().iter().copied().collect();
        assert_eq!(cells[1], Location::new(4, 14));
        assert_eq!(cells[2], Location::new(3, 14));
    }

    #[test]
    fn test_steer_rejects_reversal() {
        let mut snake = Snake::from_config(&PLAYERS[0]);
        assert_eq!(snake.heading(), Direction::East);

        // Direct reversal is ignored
        assert!(!snake.steer(Direction::West));
        assert_eq!(snake.heading(), Direction::East);

        // 90-degree turns apply
        assert!(snake.steer(Direction::North));
        assert_eq!(snake.heading(), Direction::North);

        // Re-requesting the current heading reports no change
        assert!(!snake.steer(Direction::North));
    }

    #[test]
    fn test_advance_prepends_head() {
        let mut snake = Snake::from_config(&PLAYERS[0]);
        let old_head = snake.head();
        let old_len = snake.len();

        snake.advance();
        assert_eq!(snake.len(), old_len + 1);
        assert_eq!(snake.head(), old_head.adjacent(Direction::East));

        snake.pop_tail();
        assert_eq!(snake.len(), old_len);
    }

    #[test]
    fn test_bonus_grow_doubles_pre_advance_length() {
        let mut snake = Snake::from_config(&PLAYERS[0]);
        let before = snake.len();

        snake.advance();
        snake.bonus_grow();
        assert_eq!(snake.len(), before * 2);
    }

    #[test]
    fn test_slot_opponent_lookup() {
        assert_eq!(PlayerSlot::One.opponent(), PlayerSlot::Two);
        assert_eq!(PlayerSlot::Two.opponent(), PlayerSlot::One);
        assert_eq!(PlayerSlot::from_number(1), Some(PlayerSlot::One));
        assert_eq!(PlayerSlot::from_number(3), None);
    }
}
