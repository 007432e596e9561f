//! Application state shared across all handlers

use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::broadcast::{Broadcaster, InMemoryBroadcaster};
use crate::event_logger::EventLogger;
use crate::game::game_loop::spawn_match_driver;
use crate::game::Match;
use crate::protocol::ServerMessage;

/// Shared application state
pub struct AppState {
    /// The single authoritative match; every transition goes through this lock
    pub game: Mutex<Match>,
    /// Driver task of the live match, aborted on restart
    driver: Mutex<Option<JoinHandle<()>>>,
    /// Connected clients and when they joined
    pub clients: DashMap<Uuid, Instant>,
    /// Broadcaster for sending snapshots to all clients
    pub broadcaster: Arc<dyn Broadcaster>,
    /// Event logger for replay/analysis
    pub event_logger: Arc<EventLogger>,
}

impl AppState {
    /// Create a new application state with in-memory broadcasting
    pub fn new() -> Self {
        Self::with_broadcaster(Arc::new(InMemoryBroadcaster::new()))
    }

    /// Create with a custom broadcaster (for testing)
    pub fn with_broadcaster(broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self {
            game: Mutex::new(Match::new()),
            driver: Mutex::new(None),
            clients: DashMap::new(),
            broadcaster,
            event_logger: Arc::new(EventLogger::new()),
        }
    }

    /// Get the number of connected clients
    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    /// Start (or restart) the match. Any previous driver task is aborted
    /// first so no stale timer can act on the fresh state.
    pub async fn start_match(self: &Arc<Self>) {
        if let Some(handle) = self.driver.lock().await.take() {
            handle.abort();
        }

        self.game.lock().await.start();
        self.event_logger.log_match_started();

        let update = ServerMessage::update_from(&*self.game.lock().await);
        self.broadcaster.send(update).await;

        *self.driver.lock().await = Some(spawn_match_driver(self.clone()));
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
