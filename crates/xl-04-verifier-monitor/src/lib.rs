//! # XL-04 Verifier Monitor
//!
//! One monitoring session per connected client. Each session watches a
//! block source, keeps only the transactions whose family matches the
//! client's filter key and delivers them as one batched event per cycle.
//!
//! **Subsystem ID:** 04
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Session Lifecycle
//!
//! ```text
//! start_monitor ──▶ latest_height ──▶ spawn task ──▶ [tick | new head] ──▶ fetch > height
//!                                          ▲                                   │
//!                                          └──── advance height, send batch ◀──┘
//!
//! stop_monitor / subscription dropped ──▶ cancel ──▶ task removes its entry
//! ```
//!
//! Poll failures are logged and retried on the next tick. A batch produced
//! after cancellation is discarded, never delivered.
//!
//! ## Module Structure
//!
//! ```text
//! xl-04-verifier-monitor/
//! ├── domain/       # Block, BlockEvent, VerifierSession, MonitorSubscription, errors
//! ├── ports/        # VerifierMonitorApi, BlockSource, BusinessLogicPlugin
//! ├── adapters/     # InMemoryBlockSource
//! ├── dispatch.rs   # Subscription → BusinessLogicPlugin forwarding
//! └── service.rs    # MonitorService
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod dispatch;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::InMemoryBlockSource;
pub use dispatch::spawn_dispatcher;
pub use domain::{
    Block, BlockEvent, MatchedTransaction, MonitorError, MonitorSubscription, RawTransaction,
    TransactionPayload, VerifierSession,
};
pub use ports::{BlockSource, BusinessLogicPlugin, VerifierMonitorApi};
pub use service::MonitorService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
