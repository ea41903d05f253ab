//! # Bridge Container
//!
//! Holds the plugin registry and every service built on it.
//!
//! - One registry per process, passed by `Arc` into each service
//! - Services resolve collaborators from the registry on each call

pub mod config;
pub mod services;

pub use config::{
    BridgeConfig, ConfigError, ConnectorConfig, LoggingConfig, MonitorConfig, MultisigConfig,
};
pub use services::BridgeContainer;
