//! # Core Entities
//!
//! Identifiers shared across the bridge subsystems.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 32-byte hash (SHA-256 or Keccak-256).
pub type Hash = [u8; 32];

/// A 20-byte Ethereum-style address.
pub type Address = [u8; 20];

/// Family of a foreign ledger.
///
/// Each family has its own address format and attestation scheme; the
/// multisig engine and the validator registry key their behaviour off it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerKind {
    /// Hyperledger Fabric style permissioned ledger.
    Fabric,
    /// Hyperledger Besu (EVM).
    Besu,
    /// Quorum (EVM).
    Quorum,
    /// Public Ethereum.
    Ethereum,
    /// Hyperledger Sawtooth.
    Sawtooth,
    /// Corda.
    Corda,
}

impl LedgerKind {
    /// All known ledger kinds.
    pub const ALL: [LedgerKind; 6] = [
        Self::Fabric,
        Self::Besu,
        Self::Quorum,
        Self::Ethereum,
        Self::Sawtooth,
        Self::Corda,
    ];

    /// Lowercase name used in configuration and validator records.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fabric => "fabric",
            Self::Besu => "besu",
            Self::Quorum => "quorum",
            Self::Ethereum => "ethereum",
            Self::Sawtooth => "sawtooth",
            Self::Corda => "corda",
        }
    }
}

impl fmt::Display for LedgerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LedgerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown ledger kind: {s}"))
    }
}
