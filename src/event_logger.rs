//! Match event logging for replay and analysis

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tracing::{error, info};

use crate::config::{ENABLE_EVENT_LOGGING, EVENT_LOG_FILE};
use crate::game::direction::Direction;
use crate::game::food::FoodKind;
use crate::game::location::Location;
use crate::game::outcome::MatchResult;
use crate::game::snake::{CrashCause, PlayerSlot};

/// Types of match events that can be logged
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MatchLogEvent {
    /// A match was started or restarted
    MatchStarted,
    /// A player changed heading
    DirectionChanged { player: u8, direction: Direction },
    /// Pause state flipped
    PauseToggled { paused: bool },
    /// A snake ate the food
    FoodEaten {
        player: u8,
        kind: FoodKind,
        x: i32,
        y: i32,
    },
    /// Replacement food was placed
    FoodSpawned { kind: FoodKind, x: i32, y: i32 },
    /// A snake crashed
    SnakeCrashed { player: u8, cause: CrashCause },
    /// The match ended
    MatchEnded {
        reason: String,
        agility_winner: String,
        size_winner: String,
    },
    /// A client connected
    ClientJoined { connection_id: String },
    /// A client disconnected
    ClientLeft { connection_id: String },
    /// A client exceeded the input throttle
    CommandThrottled {
        connection_id: String,
        violations: u32,
    },
}

/// Logged event with timestamp
#[derive(Debug, Serialize)]
struct LogEntry {
    /// Unix timestamp in milliseconds
    timestamp_ms: u128,
    /// The event data
    #[serde(flatten)]
    event: MatchLogEvent,
}

/// Append-only JSONL event log
pub struct EventLogger {
    /// File writer (None if logging disabled)
    writer: Option<Mutex<BufWriter<File>>>,
    /// Whether logging is enabled
    enabled: bool,
}

impl EventLogger {
    /// Create a new event logger
    pub fn new() -> Self {
        if !ENABLE_EVENT_LOGGING {
            info!("Event logging is disabled");
            return Self {
                writer: None,
                enabled: false,
            };
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(EVENT_LOG_FILE)
        {
            Ok(file) => {
                info!("Event logging enabled, writing to {}", EVENT_LOG_FILE);
                Self {
                    writer: Some(Mutex::new(BufWriter::new(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to open event log file: {}", e);
                Self {
                    writer: None,
                    enabled: false,
                }
            }
        }
    }

    /// Log a match event
    pub fn log(&self, event: MatchLogEvent) {
        if !self.enabled {
            return;
        }

        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);

        let entry = LogEntry {
            timestamp_ms,
            event,
        };

        if let Some(ref writer) = self.writer {
            if let Ok(mut w) = writer.lock() {
                if let Ok(json) = serde_json::to_string(&entry) {
                    let _ = writeln!(w, "{}", json);
                    let _ = w.flush();
                }
            }
        }
    }

    /// Log a match start
    pub fn log_match_started(&self) {
        self.log(MatchLogEvent::MatchStarted);
    }

    /// Log a heading change
    pub fn log_direction(&self, slot: PlayerSlot, direction: Direction) {
        self.log(MatchLogEvent::DirectionChanged {
            player: slot.number(),
            direction,
        });
    }

    /// Log a pause toggle
    pub fn log_pause_toggled(&self, paused: bool) {
        self.log(MatchLogEvent::PauseToggled { paused });
    }

    /// Log food eaten
    pub fn log_food_eaten(&self, slot: PlayerSlot, kind: FoodKind, location: Location) {
        self.log(MatchLogEvent::FoodEaten {
            player: slot.number(),
            kind,
            x: location.x,
            y: location.y,
        });
    }

    /// Log food placement
    pub fn log_food_spawned(&self, kind: FoodKind, location: Location) {
        self.log(MatchLogEvent::FoodSpawned {
            kind,
            x: location.x,
            y: location.y,
        });
    }

    /// Log a crash
    pub fn log_crash(&self, slot: PlayerSlot, cause: CrashCause) {
        self.log(MatchLogEvent::SnakeCrashed {
            player: slot.number(),
            cause,
        });
    }

    /// Log the final result
    pub fn log_match_ended(&self, result: &MatchResult) {
        self.log(MatchLogEvent::MatchEnded {
            reason: format!("{:?}", result.reason).to_lowercase(),
            agility_winner: result.agility_winner.clone(),
            size_winner: result.size_winner.clone(),
        });
    }

    /// Log a client connect
    pub fn log_client_joined(&self, connection_id: &str) {
        self.log(MatchLogEvent::ClientJoined {
            connection_id: connection_id.to_string(),
        });
    }

    /// Log a client disconnect
    pub fn log_client_left(&self, connection_id: &str) {
        self.log(MatchLogEvent::ClientLeft {
            connection_id: connection_id.to_string(),
        });
    }

    /// Log an input throttle violation
    pub fn log_throttled(&self, connection_id: &str, violations: u32) {
        self.log(MatchLogEvent::CommandThrottled {
            connection_id: connection_id.to_string(),
            violations,
        });
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = MatchLogEvent::FoodEaten {
            player: 1,
            kind: FoodKind::Bonus,
            x: 10,
            y: 20,
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("food_eaten"));
        assert!(json.contains(r#""kind":"bonus""#));
    }

    #[test]
    fn test_crash_event_uses_wire_cause_names() {
        let event = MatchLogEvent::SnakeCrashed {
            player: 2,
            cause: CrashCause::OwnBody,
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""cause":"self""#));
    }
}
