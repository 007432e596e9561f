//! Broadcaster abstraction for pushing snapshots to connected clients
//!
//! The in-memory implementation fans out over a tokio broadcast channel;
//! the trait keeps the transport swappable for tests.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;

use crate::config::BROADCAST_CAPACITY;
use crate::protocol::ServerMessage;

/// Receiver type for broadcast messages
pub type BroadcastReceiver = broadcast::Receiver<Arc<ServerMessage>>;

/// Trait for broadcasting messages to all connected clients
#[async_trait]
pub trait Broadcaster: Send + Sync {
    /// Subscribe to receive broadcast messages
    fn subscribe(&self) -> BroadcastReceiver;

    /// Send a message to all subscribers
    async fn send(&self, msg: ServerMessage);

    /// Get the number of active subscribers
    fn subscriber_count(&self) -> usize;
}

/// In-memory broadcaster using tokio broadcast channel
pub struct InMemoryBroadcaster {
    tx: broadcast::Sender<Arc<ServerMessage>>,
}

impl InMemoryBroadcaster {
    /// Create a new in-memory broadcaster
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self { tx }
    }
}

impl Default for InMemoryBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Broadcaster for InMemoryBroadcaster {
    fn subscribe(&self) -> BroadcastReceiver {
        self.tx.subscribe()
    }

    async fn send(&self, msg: ServerMessage) {
        // Arc so every subscriber shares one allocation
        let msg = Arc::new(msg);

        // send() errors when there are no receivers, which is fine
        if let Err(e) = self.tx.send(msg) {
            debug!("Broadcast send (no receivers): {}", e);
        }
    }

    fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
