//! Game and server configuration constants

use crate::game::direction::Direction;

/// Board dimension in cells (the arena is BOARD_SIZE x BOARD_SIZE, toroidal)
pub const BOARD_SIZE: i32 = 28;

/// Simulation tick interval in milliseconds
pub const TICK_INTERVAL_MS: u64 = 120;

/// Countdown interval in milliseconds (one unit of the match clock)
pub const CLOCK_INTERVAL_MS: u64 = 1000;

/// Snake length at match start
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Match duration in seconds
pub const MATCH_DURATION_SECS: u32 = 120;

/// Every Nth normal food eaten arms the next spawn as bonus food
pub const BONUS_TRIGGER: u32 = 5;

/// Random placement attempts before falling back to a board scan
pub const FOOD_SPAWN_MAX_ATTEMPTS: u32 = 1024;

/// WebSocket server port
pub const SERVER_PORT: u16 = 8080;

/// Broadcast channel capacity
pub const BROADCAST_CAPACITY: usize = 100;

/// Static configuration for one player slot
#[derive(Debug)]
pub struct PlayerConfig {
    /// Display name
    pub name: &'static str,
    /// Snake color (hex format)
    pub color: &'static str,
    /// Head cell at match start
    pub start: (i32, i32),
    /// Heading at match start
    pub heading: Direction,
    /// Key binding hint shown by the client
    pub controls: &'static str,
}

/// The two player slots, starting on the mid row facing each other
pub const PLAYERS: [PlayerConfig; 2] = [
    PlayerConfig {
        name: "Player 1 (WASD)",
        color: "#22D3EE",
        start: (5, BOARD_SIZE / 2),
        heading: Direction::East,
        controls: "WASD",
    },
    PlayerConfig {
        name: "Player 2 (Arrows)",
        color: "#A3E635",
        start: (BOARD_SIZE - 6, BOARD_SIZE / 2),
        heading: Direction::West,
        controls: "Arrows",
    },
];

// =============================================================================
// Input throttling
// =============================================================================

/// Maximum direction commands per window per connection
pub const MAX_COMMANDS_PER_WINDOW: u32 = 15;

/// Time window for input throttling (in milliseconds)
pub const THROTTLE_WINDOW_MS: u64 = 1000;

/// Number of violations before a connection is dropped
pub const MAX_THROTTLE_VIOLATIONS: u32 = 3;

// =============================================================================
// Event Logging
// =============================================================================

/// Enable match event logging
pub const ENABLE_EVENT_LOGGING: bool = true;

/// Log file path
pub const EVENT_LOG_FILE: &str = "match_events.log";
