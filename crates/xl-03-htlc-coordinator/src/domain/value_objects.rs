//! # Value Objects

use super::errors::HtlcError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// HTLC package implementation a leg runs on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HtlcPackage {
    /// Native-currency HTLC on Besu.
    Besu,
    /// ERC-20 token HTLC on Besu.
    BesuErc20,
}

impl HtlcPackage {
    /// All supported packages.
    pub const ALL: [HtlcPackage; 2] = [Self::Besu, Self::BesuErc20];

    /// Request-facing name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Besu => "Besu",
            Self::BesuErc20 => "BesuErc20",
        }
    }

    /// Package name the strategy is registered under.
    #[must_use]
    pub fn package_name(&self) -> &'static str {
        match self {
            Self::Besu => "htlc-eth-besu",
            Self::BesuErc20 => "htlc-eth-besu-erc20",
        }
    }

    /// Supported names joined with `;`.
    #[must_use]
    pub fn supported() -> String {
        Self::ALL
            .iter()
            .map(HtlcPackage::as_str)
            .collect::<Vec<_>>()
            .join(";")
    }
}

impl fmt::Display for HtlcPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HtlcPackage {
    type Err = HtlcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| HtlcError::UnsupportedPackage(s.to_string()))
    }
}

/// State of one swap leg.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HtlcLegState {
    /// Logic contract not deployed.
    #[default]
    Uninitialized,
    /// Logic contract deployed.
    Initialized,
    /// HTLC created and funded.
    Funded,
    /// Pre-image revealed, funds released to the receiver.
    Withdrawn,
    /// Refunded or expired without withdrawal.
    Abandoned,
}

impl HtlcLegState {
    /// Check if transition is valid.
    pub fn can_transition_to(&self, next: HtlcLegState) -> bool {
        matches!(
            (self, next),
            (Self::Uninitialized, Self::Initialized)
                | (Self::Initialized, Self::Funded)
                | (Self::Initialized, Self::Abandoned)
                | (Self::Funded, Self::Withdrawn)
                | (Self::Funded, Self::Abandoned)
        )
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Withdrawn | Self::Abandoned)
    }

    /// Map an on-chain status code.
    ///
    /// `0` invalid, `1` active, `2` refunded, `3` withdrawn, `4` expired.
    pub fn from_status_code(code: u8) -> Option<Self> {
        match code {
            status_code::ACTIVE => Some(Self::Funded),
            status_code::REFUNDED | status_code::EXPIRED => Some(Self::Abandoned),
            status_code::WITHDRAWN => Some(Self::Withdrawn),
            _ => None,
        }
    }

    /// Move to `next`, failing on an illegal transition.
    pub fn advance(self, next: HtlcLegState) -> Result<HtlcLegState, HtlcError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(HtlcError::InvalidTransition {
                from: format!("{self:?}"),
                to: format!("{next:?}"),
            })
        }
    }
}

/// On-chain HTLC status codes.
pub mod status_code {
    /// Unknown or invalid id.
    pub const INVALID: u8 = 0;
    /// Funded, awaiting withdrawal.
    pub const ACTIVE: u8 = 1;
    /// Refunded to the sender.
    pub const REFUNDED: u8 = 2;
    /// Withdrawn by the receiver.
    pub const WITHDRAWN: u8 = 3;
    /// Past expiration, not yet refunded.
    pub const EXPIRED: u8 = 4;
}
