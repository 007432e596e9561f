//! Protocol messages for WebSocket communication

use serde::{Deserialize, Serialize};

use crate::config::{BOARD_SIZE, PLAYERS};
use crate::game::direction::Direction;
use crate::game::engine::{Match, MatchPhase, PlayerScore};
use crate::game::food::FoodKind;
use crate::game::location::Location;
use crate::game::outcome::MatchResult;
use crate::game::snake::Snake;

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Start (or restart) the match
    Start,
    /// Toggle between running and paused
    TogglePause,
    /// Steering request for one player
    Direction { player: u8, direction: Direction },
    /// Keep-alive
    Ping,
}

impl ClientMessage {
    /// Parse a client message from a JSON string
    pub fn parse(s: &str) -> Option<Self> {
        serde_json::from_str(s.trim()).ok()
    }
}

/// Player slot description sent on connect
#[derive(Debug, Clone, Serialize)]
pub struct PlayerInfo {
    pub player: u8,
    pub name: &'static str,
    pub color: &'static str,
    pub controls: &'static str,
}

/// Snake body data for update messages
#[derive(Debug, Clone, Serialize)]
pub struct SnakeData {
    pub name: String,
    pub color: String,
    pub body: Vec<Location>,
}

/// Food position data
#[derive(Debug, Clone, Serialize)]
pub struct FoodData {
    pub x: i32,
    pub y: i32,
    pub kind: FoodKind,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection handshake: board geometry and the fixed player roster
    Hello {
        board_size: i32,
        players: Vec<PlayerInfo>,
    },
    /// Full state snapshot after a transition
    Update {
        phase: MatchPhase,
        snakes: Vec<SnakeData>,
        food: FoodData,
        scores: Vec<PlayerScore>,
        time_left: u32,
    },
    /// Terminal result, sent once per match
    Ended { result: MatchResult },
}

impl ServerMessage {
    /// Handshake message for a new connection
    pub fn hello() -> Self {
        ServerMessage::Hello {
            board_size: BOARD_SIZE,
            players: PLAYERS
                .iter()
                .enumerate()
                .map(|(i, config)| PlayerInfo {
                    player: i as u8 + 1,
                    name: config.name,
                    color: config.color,
                    controls: config.controls,
                })
                .collect(),
        }
    }

    /// Snapshot of the current match state
    pub fn update_from(game: &Match) -> Self {
        let food = game.food();
        ServerMessage::Update {
            phase: game.phase(),
            snakes: game.snakes().iter().map(snake_data).collect(),
            food: FoodData {
                x: food.location.x,
                y: food.location.y,
                kind: food.kind,
            },
            scores: game.scores(),
            time_left: game.time_left(),
        }
    }

    /// Terminal message carrying the frozen result
    pub fn ended(result: MatchResult) -> Self {
        ServerMessage::Ended { result }
    }

    /// Serialize message to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

fn snake_data(snake: &Snake) -> SnakeData {
    SnakeData {
        name: snake.name().to_string(),
        color: snake.color().to_string(),
        body: snake.body().iter().copied().collect(),
    }
}
