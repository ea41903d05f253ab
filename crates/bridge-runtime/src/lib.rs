//! # Bridge Runtime Library
//!
//! Composition root of the bridge: configuration, logging bootstrap and the
//! container that wires every subsystem around one plugin registry. The
//! binary entry point is `main.rs`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod container;
pub mod logging;

pub use container::{
    BridgeConfig, BridgeContainer, ConfigError, ConnectorConfig, LoggingConfig, MonitorConfig,
    MultisigConfig,
};
pub use logging::init_logging;
