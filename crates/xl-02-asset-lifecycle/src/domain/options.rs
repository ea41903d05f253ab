//! # Connector Options
//!
//! Options arrive as loosely typed JSON (config files, runtime mutation) and
//! are re-validated into [`ValidatedOptions`] on every protocol call.
//!
//! Failures fall into three classes:
//!
//! | Class | Meaning | Example |
//! |-------|---------|---------|
//! | Reference | required parameter missing | no `url`, Fabric without `username` |
//! | Type | wrong type or unparsable | `url: 45`, `http://:6000`, `peerName: 3` |
//! | Range | value outside bounds | `http://127.0.0.1:23` |

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared_types::LedgerKind;
use thiserror::Error;
use url::Url;

/// Lowest accepted connector port.
pub const MIN_PORT: u16 = 1024;

/// Class of an option validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorClass {
    /// Missing parameter.
    Reference,
    /// Wrong type or unparsable value.
    Type,
    /// Out-of-range value.
    Range,
}

/// Option validation failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OptionsError {
    /// Required parameter missing.
    #[error("missing required option: {0}")]
    Missing(&'static str),

    /// Parameter has the wrong type or cannot be parsed.
    #[error("invalid {field} provided: {value}")]
    WrongType {
        /// Option name
        field: &'static str,
        /// Offending value
        value: String,
    },

    /// Parameter out of range.
    #[error("{field} out of range: {value}")]
    OutOfRange {
        /// Option name
        field: &'static str,
        /// Offending value
        value: String,
    },
}

impl OptionsError {
    /// Failure class.
    #[must_use]
    pub fn class(&self) -> ConfigErrorClass {
        match self {
            Self::Missing(_) => ConfigErrorClass::Reference,
            Self::WrongType { .. } => ConfigErrorClass::Type,
            Self::OutOfRange { .. } => ConfigErrorClass::Range,
        }
    }
}

/// Raw connector options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectorOptions(Map<String, Value>);

/// Options after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOptions {
    /// Connector endpoint.
    pub url: Url,
    /// Endpoint host.
    pub host: String,
    /// Endpoint port.
    pub port: u16,
    /// Enrollment user.
    pub username: Option<String>,
    /// Organisation (Fabric).
    pub org_name: Option<String>,
    /// Target peer (Fabric).
    pub peer_name: Option<String>,
}

impl ConnectorOptions {
    /// Empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with only a url.
    pub fn with_url(url: impl Into<String>) -> Self {
        let mut options = Self::new();
        options.set("url", Value::String(url.into()));
        options
    }

    /// Set a raw option.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Builder form of [`ConnectorOptions::set`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value.into());
        self
    }

    /// Raw option (camelCase key, snake_case accepted).
    pub fn get(&self, camel: &str, snake: &str) -> Option<&Value> {
        self.0.get(camel).or_else(|| self.0.get(snake))
    }

    /// Validate for a connector of the given ledger family.
    pub fn validate(&self, ledger: LedgerKind) -> Result<ValidatedOptions, OptionsError> {
        let (url, host, port) = self.validate_url()?;

        let username = self.optional_string("username", "username", "username")?;
        let org_name = self.optional_string("orgName", "org_name", "orgName")?;
        let peer_name = self.optional_string("peerName", "peer_name", "peerName")?;

        if ledger == LedgerKind::Fabric {
            if username.is_none() {
                return Err(OptionsError::Missing("username"));
            }
            if org_name.is_none() {
                return Err(OptionsError::Missing("orgName"));
            }
        }

        Ok(ValidatedOptions {
            url,
            host,
            port,
            username,
            org_name,
            peer_name,
        })
    }

    fn validate_url(&self) -> Result<(Url, String, u16), OptionsError> {
        let raw = match self.get("url", "url") {
            None | Some(Value::Null) => return Err(OptionsError::Missing("url")),
            Some(Value::String(s)) => s,
            Some(other) => {
                return Err(OptionsError::WrongType {
                    field: "url",
                    value: other.to_string(),
                })
            }
        };

        let wrong = || OptionsError::WrongType {
            field: "url",
            value: raw.clone(),
        };
        let url = Url::parse(raw).map_err(|e| match e {
            url::ParseError::InvalidPort => OptionsError::OutOfRange {
                field: "port",
                value: raw.clone(),
            },
            _ => wrong(),
        })?;
        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(wrong)?
            .to_string();

        let port = url.port_or_known_default().unwrap_or(0);
        if port < MIN_PORT {
            return Err(OptionsError::OutOfRange {
                field: "port",
                value: port.to_string(),
            });
        }

        Ok((url, host, port))
    }

    fn optional_string(
        &self,
        camel: &str,
        snake: &str,
        field: &'static str,
    ) -> Result<Option<String>, OptionsError> {
        match self.get(camel, snake) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if !s.trim().is_empty() => Ok(Some(s.clone())),
            Some(other) => Err(OptionsError::WrongType {
                field,
                value: match other {
                    Value::String(s) => s.clone(),
                    v => v.to_string(),
                },
            }),
        }
    }
}
