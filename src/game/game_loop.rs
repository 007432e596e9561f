//! Match driver: both fixed-rate timers funnel into the serialized state

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{debug, info};

use crate::config::{CLOCK_INTERVAL_MS, TICK_INTERVAL_MS};
use crate::game::engine::{MatchEvent, MatchPhase};
use crate::protocol::ServerMessage;
use crate::state::AppState;

/// Spawn the driver task for a freshly started match.
///
/// The simulation ticker and the one-second countdown are independent timers,
/// but every transition goes through the same match lock, so one transition
/// always completes before the next begins no matter which timer fired. The
/// task broadcasts a snapshot after each transition and exits once the match
/// has ended.
pub fn spawn_match_driver(state: Arc<AppState>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_millis(TICK_INTERVAL_MS));
        let mut clock = interval(Duration::from_millis(CLOCK_INTERVAL_MS));

        // Both intervals fire immediately on first poll; swallow those so the
        // match does not advance at time zero.
        ticker.tick().await;
        clock.tick().await;

        loop {
            let events = tokio::select! {
                _ = ticker.tick() => {
                    let mut game = state.game.lock().await;
                    game.tick()
                }
                _ = clock.tick() => {
                    let mut game = state.game.lock().await;
                    game.tick_clock()
                }
            };

            log_events(&state, &events);

            let (update, ended) = {
                let game = state.game.lock().await;
                (
                    ServerMessage::update_from(&game),
                    game.phase() == MatchPhase::Ended,
                )
            };
            state.broadcaster.send(update).await;

            if ended {
                let result = state.game.lock().await.result().cloned();
                if let Some(result) = result {
                    state.event_logger.log_match_ended(&result);
                    state.broadcaster.send(ServerMessage::ended(result)).await;
                }
                info!("match ended, driver stopping");
                break;
            }
        }
    })
}

fn log_events(state: &AppState, events: &[MatchEvent]) {
    for event in events {
        match event {
            MatchEvent::FoodEaten {
                slot,
                kind,
                location,
            } => {
                debug!(
                    "player {} ate {:?} food at ({}, {})",
                    slot.number(),
                    kind,
                    location.x,
                    location.y
                );
                state.event_logger.log_food_eaten(*slot, *kind, *location);
            }
            MatchEvent::FoodSpawned { kind, location } => {
                debug!("spawned {:?} food at ({}, {})", kind, location.x, location.y);
                state.event_logger.log_food_spawned(*kind, *location);
            }
            MatchEvent::Crashed { slot, cause } => {
                info!("player {} crashed ({:?})", slot.number(), cause);
                state.event_logger.log_crash(*slot, *cause);
            }
            MatchEvent::TimeExpired => {
                info!("match clock expired");
            }
        }
    }
}
