//! WebSocket handler for client connections

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::{MAX_COMMANDS_PER_WINDOW, MAX_THROTTLE_VIOLATIONS, THROTTLE_WINDOW_MS};
use crate::game::PlayerSlot;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::AppState;

/// Sliding-window cap on direction commands for one connection.
/// Commands over the cap are dropped; repeated violations drop the client.
struct InputThrottle {
    command_times: VecDeque<Instant>,
    violations: u32,
}

impl InputThrottle {
    fn new() -> Self {
        Self {
            command_times: VecDeque::with_capacity(MAX_COMMANDS_PER_WINDOW as usize + 10),
            violations: 0,
        }
    }

    /// Admit one command. Returns (allowed, should_disconnect).
    fn admit(&mut self) -> (bool, bool) {
        let now = Instant::now();
        let window_start = now - Duration::from_millis(THROTTLE_WINDOW_MS);

        while let Some(front) = self.command_times.front() {
            if *front < window_start {
                self.command_times.pop_front();
            } else {
                break;
            }
        }

        if self.command_times.len() < MAX_COMMANDS_PER_WINDOW as usize {
            self.command_times.push_back(now);
            (true, false)
        } else {
            self.violations += 1;
            (false, self.violations >= MAX_THROTTLE_VIOLATIONS)
        }
    }

    fn violations(&self) -> u32 {
        self.violations
    }
}

/// WebSocket upgrade handler
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle a WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = Uuid::new_v4();

    info!("Client {} connected", connection_id);
    state.clients.insert(connection_id, Instant::now());
    state.event_logger.log_client_joined(&connection_id.to_string());

    let (mut sender, mut receiver) = socket.split();

    // Subscribe before the handshake so no snapshot is missed
    let mut broadcast_rx = state.broadcaster.subscribe();

    // Handshake: roster plus the current snapshot, directly to this client
    let hello = ServerMessage::hello();
    let snapshot = ServerMessage::update_from(&*state.game.lock().await);
    for msg in [hello, snapshot] {
        if sender.send(Message::Text(msg.to_json().into())).await.is_err() {
            error!("Failed to greet client {}", connection_id);
            state.clients.remove(&connection_id);
            return;
        }
    }

    let connection_id_clone = connection_id;

    // Task to forward broadcast snapshots to this client
    let send_task = tokio::spawn(async move {
        loop {
            match broadcast_rx.recv().await {
                Ok(msg) => {
                    let json = msg.to_json();
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(n)) => {
                    warn!("Client {} lagged by {} messages", connection_id_clone, n);
                }
                Err(RecvError::Closed) => {
                    break;
                }
            }
        }
    });

    // Task to receive commands from this client
    let recv_task = {
        let state = state.clone();

        tokio::spawn(async move {
            let mut throttle = InputThrottle::new();
            let mut should_drop = false;

            while let Some(result) = receiver.next().await {
                match result {
                    Ok(Message::Text(text)) => {
                        let Some(msg) = ClientMessage::parse(&text) else {
                            debug!("Client {} sent unparseable message", connection_id);
                            continue;
                        };

                        match msg {
                            ClientMessage::Start => {
                                info!("Client {} started a match", connection_id);
                                state.start_match().await;
                            }
                            ClientMessage::TogglePause => {
                                let (phase, update) = {
                                    let mut game = state.game.lock().await;
                                    game.toggle_pause();
                                    (game.phase(), ServerMessage::update_from(&game))
                                };
                                state
                                    .event_logger
                                    .log_pause_toggled(phase == crate::game::MatchPhase::Paused);
                                state.broadcaster.send(update).await;
                            }
                            ClientMessage::Direction { player, direction } => {
                                let (allowed, drop_client) = throttle.admit();

                                if drop_client {
                                    warn!(
                                        "Client {} dropped for flooding direction commands",
                                        connection_id
                                    );
                                    state.event_logger.log_throttled(
                                        &connection_id.to_string(),
                                        throttle.violations(),
                                    );
                                    should_drop = true;
                                    break;
                                }

                                if !allowed {
                                    warn!(
                                        "Client {} throttled (violations: {})",
                                        connection_id,
                                        throttle.violations()
                                    );
                                    state.event_logger.log_throttled(
                                        &connection_id.to_string(),
                                        throttle.violations(),
                                    );
                                    continue;
                                }

                                let Some(slot) = PlayerSlot::from_number(player) else {
                                    debug!(
                                        "Client {} sent unknown player number {}",
                                        connection_id, player
                                    );
                                    continue;
                                };

                                let applied =
                                    state.game.lock().await.request_direction(slot, direction);
                                if applied {
                                    debug!(
                                        "player {} heading {:?} (client {})",
                                        player, direction, connection_id
                                    );
                                    state.event_logger.log_direction(slot, direction);
                                }
                            }
                            ClientMessage::Ping => {
                                debug!("Ping from client {}", connection_id);
                            }
                        }
                    }
                    Ok(Message::Close(_)) => {
                        info!("Client {} sent close frame", connection_id);
                        break;
                    }
                    Ok(_) => {
                        // Ignore binary, ping, pong frames
                    }
                    Err(e) => {
                        error!("WebSocket error for client {}: {}", connection_id, e);
                        break;
                    }
                }
            }

            should_drop
        })
    };

    // Wait for either task to finish
    tokio::select! {
        _ = send_task => {}
        dropped = recv_task => {
            if dropped.unwrap_or(false) {
                warn!("Client {} was dropped", connection_id);
            }
        }
    }

    info!("Client {} disconnected", connection_id);
    state.event_logger.log_client_left(&connection_id.to_string());
    state.clients.remove(&connection_id);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throttle_allows_normal_usage() {
        let mut throttle = InputThrottle::new();

        for _ in 0..MAX_COMMANDS_PER_WINDOW {
            let (allowed, _) = throttle.admit();
            assert!(allowed);
        }
    }

    #[test]
    fn test_throttle_blocks_excess_and_escalates() {
        let mut throttle = InputThrottle::new();

        for _ in 0..MAX_COMMANDS_PER_WINDOW {
            throttle.admit();
        }

        for i in 1..=MAX_THROTTLE_VIOLATIONS {
            let (allowed, should_disconnect) = throttle.admit();
            assert!(!allowed);
            assert_eq!(throttle.violations(), i);
            assert_eq!(should_disconnect, i >= MAX_THROTTLE_VIOLATIONS);
        }
    }
}
