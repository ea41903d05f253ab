//! # Business Logic Dispatch
//!
//! Forwards a session's events into a [`BusinessLogicPlugin`] until the
//! session ends.

use crate::domain::MonitorSubscription;
use crate::ports::BusinessLogicPlugin;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Spawn a task feeding `subscription` into `plugin`.
///
/// Plugin errors are logged; the dispatcher keeps going.
pub fn spawn_dispatcher(
    mut subscription: MonitorSubscription,
    plugin: Arc<dyn BusinessLogicPlugin>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let client_id = subscription.client_id().to_string();
        while let Some(event) = subscription.recv().await {
            let matches = event.block_data.len();
            if let Err(e) = plugin.on_event(&client_id, event).await {
                warn!(client_id = %client_id, error = %e, "[xl-04] Business logic rejected event");
            } else {
                debug!(client_id = %client_id, matches, "[xl-04] Event dispatched");
            }
        }
        debug!(client_id = %client_id, "[xl-04] Dispatcher finished");
    })
}
