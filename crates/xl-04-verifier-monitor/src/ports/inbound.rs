//! # Inbound Ports (API)

use crate::domain::{MonitorError, MonitorSubscription};
use async_trait::async_trait;

/// Verifier monitor API - inbound port.
#[async_trait]
pub trait VerifierMonitorApi: Send + Sync {
    /// Start watching for transactions of family `filter_key`.
    ///
    /// Starting again for the same client replaces the previous session.
    async fn start_monitor(
        &self,
        client_id: &str,
        filter_key: &str,
    ) -> Result<MonitorSubscription, MonitorError>;

    /// Stop a session. Unknown or already-stopped clients are a no-op;
    /// returns whether a session was running.
    fn stop_monitor(&self, client_id: &str) -> bool;

    /// Last processed height of a running session.
    fn current_height(&self, client_id: &str) -> Option<u64>;

    /// Whether `client_id` has a running session.
    fn is_active(&self, client_id: &str) -> bool;

    /// Number of running sessions.
    fn session_count(&self) -> usize;
}
