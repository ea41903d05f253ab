//! # Multisig Engine
//!
//! Runs the scheme's verifier over every attestation in parallel with rayon.
//! Results are collected in attestation order.

use crate::domain::{Multisig, MultisigError, SignatureScheme};
use crate::ports::{MultisigApi, SignatureVerifier};
use rayon::prelude::*;
use shared_types::decode_hex;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Multisig verification engine.
#[derive(Clone)]
pub struct MultisigEngine {
    verifier: Arc<dyn SignatureVerifier>,
}

impl MultisigEngine {
    /// Engine for a built-in scheme.
    pub fn new(scheme: SignatureScheme) -> Self {
        Self {
            verifier: Arc::from(scheme.verifier()),
        }
    }

    /// Engine over a custom verifier.
    pub fn with_verifier(verifier: Arc<dyn SignatureVerifier>) -> Self {
        Self { verifier }
    }

    /// Scheme of the underlying verifier.
    pub fn scheme(&self) -> SignatureScheme {
        self.verifier.scheme()
    }

    fn verify_entries(
        &self,
        multisig: &Multisig,
        trusted: Option<&(dyn Fn(&str) -> bool + Sync)>,
    ) -> Result<Vec<bool>, MultisigError> {
        let message = multisig.message().ok_or(MultisigError::MissingMessage)?;

        let results: Vec<bool> = multisig
            .signatures()
            .par_iter()
            .map(|entry| {
                trusted.map_or(true, |t| t(&entry.public_key))
                    && self
                        .verifier
                        .verify(message, &entry.public_key, &entry.signature)
            })
            .collect();

        debug!(
            scheme = %self.verifier.scheme(),
            total = results.len(),
            valid = results.iter().filter(|v| **v).count(),
            "[xl-01] Verified multisig"
        );
        Ok(results)
    }
}

impl MultisigApi for MultisigEngine {
    fn verify(&self, multisig: &Multisig) -> Result<Vec<bool>, MultisigError> {
        self.verify_entries(multisig, None)
    }

    fn count_valid(
        &self,
        multisig: &Multisig,
        trusted: &(dyn Fn(&str) -> bool + Sync),
    ) -> Result<usize, MultisigError> {
        let results = self.verify_entries(multisig, Some(trusted))?;
        let keys: HashSet<Vec<u8>> = multisig
            .signatures()
            .iter()
            .zip(results)
            .filter(|(_, valid)| *valid)
            .filter_map(|(entry, _)| decode_hex(&entry.public_key).ok())
            .collect();
        Ok(keys.len())
    }
}
