//! # Bridge Configuration
//!
//! Plain `Default`-able sections, overridable from `XL_*` environment
//! variables.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `XL_POLL_INTERVAL_MS` | `monitor.poll_interval_ms` |
//! | `XL_CONNECTOR_URL` | `connector.url` |
//! | `XL_CONNECTOR_USERNAME` | `connector.username` |
//! | `XL_CONNECTOR_ORG` | `connector.org_name` |
//! | `XL_CONNECTOR_PEER` | `connector.peer_name` |
//! | `XL_MULTISIG_SCHEME` | `multisig.scheme` |
//! | `XL_LOG_LEVEL` | `logging.level` |

use serde_json::Value;
use shared_types::LedgerKind;
use std::time::Duration;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use xl_01_multisig::SignatureScheme;
use xl_02_asset_lifecycle::{ConnectorOptions, OptionsError};

/// Complete bridge configuration.
#[derive(Debug, Clone, Default)]
pub struct BridgeConfig {
    /// Verifier monitor configuration.
    pub monitor: MonitorConfig,
    /// Attestation verification configuration.
    pub multisig: MultisigConfig,
    /// Ledger connector configuration.
    pub connector: ConnectorConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment override could not be parsed.
    #[error("invalid value for {var}: {value} ({reason})")]
    InvalidOverride {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
        /// Parse failure
        reason: String,
    },

    /// Poll interval of zero.
    #[error("monitor poll interval must be positive")]
    ZeroPollInterval,

    /// Connector options rejected.
    #[error("connector options: {0}")]
    Connector(#[from] OptionsError),

    /// Log level not understood by the filter.
    #[error("invalid log level {0}")]
    InvalidLogLevel(String),
}

impl BridgeConfig {
    /// Defaults with `XL_*` overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_overrides(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Apply overrides from `lookup` (variable name to value).
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(raw) = lookup("XL_POLL_INTERVAL_MS") {
            self.monitor.poll_interval_ms =
                raw.trim()
                    .parse()
                    .map_err(|e: std::num::ParseIntError| ConfigError::InvalidOverride {
                        var: "XL_POLL_INTERVAL_MS",
                        value: raw.clone(),
                        reason: e.to_string(),
                    })?;
        }
        if let Some(url) = lookup("XL_CONNECTOR_URL") {
            self.connector.url = url;
        }
        if let Some(username) = lookup("XL_CONNECTOR_USERNAME") {
            self.connector.username = Some(username);
        }
        if let Some(org) = lookup("XL_CONNECTOR_ORG") {
            self.connector.org_name = Some(org);
        }
        if let Some(peer) = lookup("XL_CONNECTOR_PEER") {
            self.connector.peer_name = Some(peer);
        }
        if let Some(raw) = lookup("XL_MULTISIG_SCHEME") {
            let scheme = raw
                .parse::<SignatureScheme>()
                .map_err(|reason| ConfigError::InvalidOverride {
                    var: "XL_MULTISIG_SCHEME",
                    value: raw.clone(),
                    reason,
                })?;
            self.multisig.scheme = Some(scheme);
        }
        if let Some(level) = lookup("XL_LOG_LEVEL") {
            self.logging.level = level;
        }
        Ok(())
    }

    /// Check every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.monitor.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        self.connector.options().validate(self.connector.ledger)?;
        EnvFilter::try_new(&self.logging.level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.logging.level.clone()))?;
        Ok(())
    }
}

/// Verifier monitor configuration.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Poll interval in milliseconds.
    pub poll_interval_ms: u64,
    /// Block source instance id.
    pub source_instance_id: String,
    /// Height the development block source starts at.
    pub start_height: u64,
    /// Filter key of the session started by the binary.
    pub default_filter_key: String,
}

impl MonitorConfig {
    /// Poll interval as a duration.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            source_instance_id: "block-source-1".to_string(),
            start_height: 0,
            default_filter_key: "asset-transfer".to_string(),
        }
    }
}

/// Attestation verification configuration.
#[derive(Debug, Clone, Default)]
pub struct MultisigConfig {
    /// Scheme override. `None` uses the ledger default.
    pub scheme: Option<SignatureScheme>,
}

/// Ledger connector configuration.
#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    /// Ledger family of the asset connector.
    pub ledger: LedgerKind,
    /// Asset connector instance id.
    pub instance_id: String,
    /// HTLC connector instance id.
    pub htlc_instance_id: String,
    /// Keychain id for signing keys.
    pub keychain_id: String,
    /// Endpoint url.
    pub url: String,
    /// Enrolled user.
    pub username: Option<String>,
    /// Organization.
    pub org_name: Option<String>,
    /// Target peer.
    pub peer_name: Option<String>,
}

impl ConnectorConfig {
    /// Raw connector options built from this section.
    pub fn options(&self) -> ConnectorOptions {
        let mut options = ConnectorOptions::with_url(self.url.clone());
        let optional = [
            ("username", &self.username),
            ("orgName", &self.org_name),
            ("peerName", &self.peer_name),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                options.set(key, Value::String(value.clone()));
            }
        }
        options
    }
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            ledger: LedgerKind::Fabric,
            instance_id: "asset-ledger-1".to_string(),
            htlc_instance_id: "htlc-ledger-1".to_string(),
            keychain_id: "keychain-1".to_string(),
            url: "http://localhost:7051".to_string(),
            username: Some("admin".to_string()),
            org_name: Some("org1".to_string()),
            peer_name: Some("peer0".to_string()),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter directive (`info`, `xl_04=debug,info`, ...).
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_validate() {
        let config = BridgeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.monitor.poll_interval(), Duration::from_secs(1));
        assert!(config.multisig.scheme.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = BridgeConfig::default();
        config
            .apply_overrides(lookup(&[
                ("XL_POLL_INTERVAL_MS", "250"),
                ("XL_CONNECTOR_URL", "http://fabric.local:9051"),
                ("XL_CONNECTOR_PEER", "peer1"),
                ("XL_MULTISIG_SCHEME", "secp256k1-keccak256"),
                ("XL_LOG_LEVEL", "debug"),
            ]))
            .unwrap();

        assert_eq!(config.monitor.poll_interval_ms, 250);
        assert_eq!(config.connector.url, "http://fabric.local:9051");
        assert_eq!(config.connector.peer_name.as_deref(), Some("peer1"));
        assert_eq!(
            config.multisig.scheme,
            Some(SignatureScheme::Secp256k1Keccak256)
        );
        assert_eq!(config.logging.level, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_overrides_rejected() {
        let mut config = BridgeConfig::default();
        let err = config
            .apply_overrides(lookup(&[("XL_POLL_INTERVAL_MS", "soon")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidOverride {
                var: "XL_POLL_INTERVAL_MS",
                ..
            }
        ));

        let err = config
            .apply_overrides(lookup(&[("XL_MULTISIG_SCHEME", "rsa")]))
            .unwrap_err();
        assert!(err.to_string().contains("XL_MULTISIG_SCHEME"));
    }

    #[test]
    fn test_validate_catches_bad_sections() {
        let mut config = BridgeConfig::default();
        config.monitor.poll_interval_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroPollInterval)));

        let mut config = BridgeConfig::default();
        config.connector.url = "http://localhost:80".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Connector(_))));

        let mut config = BridgeConfig::default();
        config.connector.username = None;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Connector(OptionsError::Missing("username")))
        ));
    }
}
