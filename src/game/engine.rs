//! Match state machine: the authoritative simulation core
//!
//! All transitions (tick, clock tick, steering, pause) run on one `Match`
//! value behind a single lock, so a transition always completes before the
//! next one starts regardless of which timer produced it.

use serde::Serialize;

use super::collision;
use super::direction::Direction;
use super::food::{Food, FoodKind};
use super::location::Location;
use super::outcome::{self, EndReason, MatchResult};
use super::snake::{CrashCause, PlayerSlot, Snake};
use crate::config::{BONUS_TRIGGER, MATCH_DURATION_SECS, PLAYERS};

/// Lifecycle phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    NotStarted,
    Running,
    Paused,
    Ended,
}

/// Notification produced by a transition, for logging and broadcast
#[derive(Debug, Clone)]
pub enum MatchEvent {
    /// A snake ate the food
    FoodEaten {
        slot: PlayerSlot,
        kind: FoodKind,
        location: Location,
    },
    /// Replacement food was placed
    FoodSpawned { kind: FoodKind, location: Location },
    /// A snake crashed, ending the match
    Crashed { slot: PlayerSlot, cause: CrashCause },
    /// The match clock ran out
    TimeExpired,
}

/// Per-player score line for observers
#[derive(Debug, Clone, Serialize)]
pub struct PlayerScore {
    pub name: String,
    pub length: usize,
    pub color: String,
}

/// The complete state of one match
#[derive(Debug)]
pub struct Match {
    phase: MatchPhase,
    snakes: [Snake; 2],
    food: Food,
    time_left: u32,
    normal_eaten: u32,
    next_bonus: bool,
    result: Option<MatchResult>,
}

impl Match {
    /// Build a match in its pre-start state
    pub fn new() -> Self {
        let snakes = [
            Snake::from_config(&PLAYERS[0]),
            Snake::from_config(&PLAYERS[1]),
        ];
        let food = Food::spawn(&snakes, FoodKind::Normal);

        Self {
            phase: MatchPhase::NotStarted,
            snakes,
            food,
            time_left: MATCH_DURATION_SECS,
            normal_eaten: 0,
            next_bonus: false,
            result: None,
        }
    }

    /// (Re)start the match. Valid from any phase: snakes return to their
    /// configured start positions, fresh normal food is placed, the counters
    /// and clock reset, and the phase becomes Running.
    pub fn start(&mut self) {
        self.snakes = [
            Snake::from_config(&PLAYERS[0]),
            Snake::from_config(&PLAYERS[1]),
        ];
        self.food = Food::spawn(&self.snakes, FoodKind::Normal);
        self.time_left = MATCH_DURATION_SECS;
        self.normal_eaten = 0;
        self.next_bonus = false;
        self.result = None;
        self.phase = MatchPhase::Running;
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Both snakes, in slot order
    pub fn snakes(&self) -> &[Snake; 2] {
        &self.snakes
    }

    /// The current food item
    pub fn food(&self) -> Food {
        self.food
    }

    /// Remaining match seconds
    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    /// The frozen result, once the match has ended
    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    /// Name/length/color line per player
    pub fn scores(&self) -> Vec<PlayerScore> {
        self.snakes
            .iter()
            .map(|snake| PlayerScore {
                name: snake.name().to_string(),
                length: snake.len(),
                color: snake.color().to_string(),
            })
            .collect()
    }

    /// Apply a steering request for one player, subject to the no-reverse
    /// rule. Ignored unless the match is running. Returns whether the
    /// heading actually changed.
    pub fn request_direction(&mut self, slot: PlayerSlot, direction: Direction) -> bool {
        if self.phase != MatchPhase::Running {
            return false;
        }
        self.snakes[slot.index()].steer(direction)
    }

    /// Toggle between Running and Paused. Ignored in any other phase.
    /// Pausing freezes both the simulation and the countdown; resuming
    /// continues from the same state.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            MatchPhase::Running => MatchPhase::Paused,
            MatchPhase::Paused => MatchPhase::Running,
            other => other,
        };
    }

    /// Advance the simulation by one step: move both snakes, resolve
    /// collisions, then handle food and growth. Ignored unless running.
    pub fn tick(&mut self) -> Vec<MatchEvent> {
        let mut events = Vec::new();
        if self.phase != MatchPhase::Running {
            return events;
        }

        for snake in self.snakes.iter_mut() {
            snake.advance();
        }

        let causes = collision::resolve(&self.snakes);
        if causes.iter().any(|cause| *cause != CrashCause::None) {
            // Crash tick: bodies freeze untrimmed and food is not processed.
            for slot in PlayerSlot::BOTH {
                let cause = causes[slot.index()];
                self.snakes[slot.index()].set_crash(cause);
                if cause != CrashCause::None {
                    events.push(MatchEvent::Crashed { slot, cause });
                }
            }
            self.finish(EndReason::Crash);
            return events;
        }

        // Two heads on one cell is a head-on crash, so at most one snake can
        // reach the food on any crash-free tick.
        let food = self.food;
        let mut eaten = false;
        for slot in PlayerSlot::BOTH {
            let snake = &mut self.snakes[slot.index()];
            if food.is_at(snake.head()) {
                eaten = true;
                match food.kind {
                    FoodKind::Normal => {
                        // No tail pop: net growth of one cell
                        self.normal_eaten += 1;
                        if self.normal_eaten >= BONUS_TRIGGER {
                            self.normal_eaten = 0;
                            self.next_bonus = true;
                        }
                    }
                    FoodKind::Bonus => {
                        snake.bonus_grow();
                        self.next_bonus = false;
                    }
                }
                events.push(MatchEvent::FoodEaten {
                    slot,
                    kind: food.kind,
                    location: food.location,
                });
            } else {
                snake.pop_tail();
            }
        }

        if eaten {
            let kind = if self.next_bonus {
                FoodKind::Bonus
            } else {
                FoodKind::Normal
            };
            self.food = Food::spawn(&self.snakes, kind);
            events.push(MatchEvent::FoodSpawned {
                kind,
                location: self.food.location,
            });
        }

        events
    }

    /// Advance the countdown by one second; at zero the match ends by
    /// timeout. Ignored unless running.
    pub fn tick_clock(&mut self) -> Vec<MatchEvent> {
        let mut events = Vec::new();
        if self.phase != MatchPhase::Running {
            return events;
        }

        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            events.push(MatchEvent::TimeExpired);
            self.finish(EndReason::Timeout);
        }

        events
    }

    fn finish(&mut self, reason: EndReason) {
        self.result = Some(outcome::compute_result(&self.snakes, reason));
        self.phase = MatchPhase::Ended;
    }
}

impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}
