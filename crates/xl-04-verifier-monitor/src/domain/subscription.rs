//! # Monitor Subscription
//!
//! Receiving end of a session. Dropping it counts as a client disconnect.

use super::entities::BlockEvent;
use tokio::sync::mpsc;

/// Event stream of one monitoring session.
#[derive(Debug)]
pub struct MonitorSubscription {
    client_id: String,
    receiver: mpsc::Receiver<BlockEvent>,
}

impl MonitorSubscription {
    pub(crate) fn new(client_id: String, receiver: mpsc::Receiver<BlockEvent>) -> Self {
        Self {
            client_id,
            receiver,
        }
    }

    /// Client the session belongs to.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Next event, `None` once the session has ended.
    pub async fn recv(&mut self) -> Option<BlockEvent> {
        self.receiver.recv().await
    }

    /// Event without waiting.
    pub fn try_recv(&mut self) -> Option<BlockEvent> {
        self.receiver.try_recv().ok()
    }
}
