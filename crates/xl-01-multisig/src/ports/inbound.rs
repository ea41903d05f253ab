//! # Inbound Ports

use crate::domain::{Multisig, MultisigError};

/// Multisig verification API - inbound port.
pub trait MultisigApi: Send + Sync {
    /// Verify every attestation, preserving insertion order.
    fn verify(&self, multisig: &Multisig) -> Result<Vec<bool>, MultisigError>;

    /// Count distinct keys with an attestation that verifies and that
    /// satisfy `trusted`. A key repeated in several entries counts once.
    fn count_valid(
        &self,
        multisig: &Multisig,
        trusted: &(dyn Fn(&str) -> bool + Sync),
    ) -> Result<usize, MultisigError>;
}
