//! # Monitor Service
//!
//! Owns the session table. Each session runs on its own task; the table is
//! the only state shared between the start, stop and disconnect paths.

use crate::domain::{BlockEvent, MonitorError, MonitorSubscription, VerifierSession};
use crate::ports::{BlockSource, BusinessLogicPlugin, VerifierMonitorApi};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use xl_05_plugin_registry::PluginRegistry;

/// Default poll interval.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Buffered events per session.
pub const SESSION_CHANNEL_CAPACITY: usize = 64;

struct SessionEntry {
    generation: u64,
    cancel: watch::Sender<bool>,
    height: Arc<AtomicU64>,
}

type SessionTable = Arc<Mutex<HashMap<String, SessionEntry>>>;

/// Monitor service.
pub struct MonitorService {
    registry: Arc<PluginRegistry>,
    source_id: String,
    poll_interval: Duration,
    sessions: SessionTable,
    next_generation: AtomicU64,
}

impl MonitorService {
    /// Service watching the block source registered as `source_id`.
    pub fn new(registry: Arc<PluginRegistry>, source_id: impl Into<String>) -> Self {
        Self {
            registry,
            source_id: source_id.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            sessions: Arc::new(Mutex::new(HashMap::new())),
            next_generation: AtomicU64::new(1),
        }
    }

    /// Override the poll interval.
    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Poll interval.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Stop every session.
    pub fn stop_all(&self) -> usize {
        let drained: Vec<(String, SessionEntry)> = self.sessions.lock().drain().collect();
        for (client_id, entry) in &drained {
            let _ = entry.cancel.send(true);
            debug!(client_id = %client_id, "[xl-04] Session stopped");
        }
        drained.len()
    }

    /// Start a session and forward its events into the business-logic
    /// plugin registered as `plugin_id`.
    pub async fn attach_plugin(
        &self,
        client_id: &str,
        filter_key: &str,
        plugin_id: &str,
    ) -> Result<JoinHandle<()>, MonitorError> {
        let plugin = self.registry.resolve::<dyn BusinessLogicPlugin>(plugin_id)?;
        let subscription = self.start_monitor(client_id, filter_key).await?;
        Ok(crate::dispatch::spawn_dispatcher(subscription, plugin))
    }
}

fn require(name: &str, value: &str) -> Result<(), MonitorError> {
    if value.trim().is_empty() {
        return Err(MonitorError::InvalidArgument(format!("{name} is required")));
    }
    Ok(())
}

#[async_trait]
impl VerifierMonitorApi for MonitorService {
    async fn start_monitor(
        &self,
        client_id: &str,
        filter_key: &str,
    ) -> Result<MonitorSubscription, MonitorError> {
        require("client_id", client_id)?;
        require("filter_key", filter_key)?;

        let source = self.registry.resolve::<dyn BlockSource>(&self.source_id)?;
        let start_height = source.latest_height().await?;

        let (events_tx, events_rx) = mpsc::channel(SESSION_CHANNEL_CAPACITY);
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst);
        let height = Arc::new(AtomicU64::new(start_height));

        let replaced = self.sessions.lock().insert(
            client_id.to_string(),
            SessionEntry {
                generation,
                cancel: cancel_tx,
                height: Arc::clone(&height),
            },
        );
        if let Some(previous) = replaced {
            let _ = previous.cancel.send(true);
            info!(client_id, "[xl-04] Replacing existing session");
        }

        let session = VerifierSession::new(client_id, filter_key, start_height);
        info!(
            client_id,
            filter_key,
            session_id = %session.session_id(),
            start_height,
            "[xl-04] Monitor started"
        );

        tokio::spawn(run_session(SessionTask {
            session,
            source,
            events: events_tx,
            cancel: cancel_rx,
            height,
            poll_interval: self.poll_interval,
            sessions: Arc::clone(&self.sessions),
            generation,
        }));

        Ok(MonitorSubscription::new(client_id.to_string(), events_rx))
    }

    fn stop_monitor(&self, client_id: &str) -> bool {
        let Some(entry) = self.sessions.lock().remove(client_id) else {
            debug!(client_id, "[xl-04] Stop for unknown session ignored");
            return false;
        };
        let _ = entry.cancel.send(true);
        info!(client_id, "[xl-04] Monitor stopped");
        true
    }

    fn current_height(&self, client_id: &str) -> Option<u64> {
        self.sessions
            .lock()
            .get(client_id)
            .map(|e| e.height.load(Ordering::SeqCst))
    }

    fn is_active(&self, client_id: &str) -> bool {
        self.sessions.lock().contains_key(client_id)
    }

    fn session_count(&self) -> usize {
        self.sessions.lock().len()
    }
}

// =============================================================================
// SESSION TASK
// =============================================================================

struct SessionTask {
    session: VerifierSession,
    source: Arc<dyn BlockSource>,
    events: mpsc::Sender<BlockEvent>,
    cancel: watch::Receiver<bool>,
    height: Arc<AtomicU64>,
    poll_interval: Duration,
    sessions: SessionTable,
    generation: u64,
}

/// Wait for the next push notification. Pends forever without a stream;
/// `false` means the stream closed.
async fn next_head(heads: &mut Option<broadcast::Receiver<u64>>) -> bool {
    let Some(rx) = heads.as_mut() else {
        return std::future::pending().await;
    };
    match rx.recv().await {
        Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => true,
        Err(broadcast::error::RecvError::Closed) => false,
    }
}

async fn run_session(mut task: SessionTask) {
    let client_id = task.session.client_id().to_string();
    let mut ticker = tokio::time::interval(task.poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut heads = task.source.watch_blocks();

    loop {
        tokio::select! {
            biased;
            _ = task.cancel.changed() => break,
            _ = task.events.closed() => {
                debug!(client_id = %client_id, "[xl-04] Subscriber disconnected");
                break;
            }
            _ = ticker.tick() => {}
            alive = next_head(&mut heads) => {
                if !alive {
                    debug!(client_id = %client_id, "[xl-04] Block stream closed, polling only");
                    heads = None;
                    continue;
                }
            }
        }

        let fetched = tokio::select! {
            biased;
            _ = task.cancel.changed() => break,
            fetched = task.source.fetch_blocks_since(task.session.current_height()) => fetched,
        };
        let blocks = match fetched {
            Ok(blocks) => blocks,
            Err(e) => {
                warn!(client_id = %client_id, error = %e, "[xl-04] Poll failed, retrying next tick");
                continue;
            }
        };

        let event = task
            .session
            .process(&blocks, |raw| task.source.decode_transaction_payload(raw));
        task.height
            .store(task.session.current_height(), Ordering::SeqCst);

        let Some(event) = event else { continue };

        // A full channel can hold the batch back; stop must win that wait.
        let permit = tokio::select! {
            biased;
            _ = task.cancel.changed() => None,
            permit = task.events.reserve() => permit.ok(),
        };
        let Some(permit) = permit.filter(|_| !*task.cancel.borrow()) else {
            debug!(client_id = %client_id, "[xl-04] Discarding batch of stopped session");
            break;
        };
        debug!(
            client_id = %client_id,
            matches = event.block_data.len(),
            height = task.session.current_height(),
            "[xl-04] Delivering batch"
        );
        permit.send(event);
    }

    let mut sessions = task.sessions.lock();
    if sessions
        .get(&client_id)
        .is_some_and(|e| e.generation == task.generation)
    {
        sessions.remove(&client_id);
    }
    debug!(client_id = %client_id, "[xl-04] Session task finished");
}
