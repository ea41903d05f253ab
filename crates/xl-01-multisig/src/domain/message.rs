//! # Multisig Message

use serde::{Deserialize, Serialize};

/// One attestation: a public key and its signature over the message (hex).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureEntry {
    /// Signer public key.
    pub public_key: String,
    /// Signature over the message.
    pub signature: String,
}

/// A message with an ordered list of attestations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Multisig {
    message: Option<Vec<u8>>,
    signatures: Vec<SignatureEntry>,
}

impl Multisig {
    /// Multisig over `message`.
    pub fn new(message: impl Into<Vec<u8>>) -> Self {
        Self {
            message: Some(message.into()),
            signatures: Vec::new(),
        }
    }

    /// Multisig with no message yet.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set or replace the message.
    pub fn set_message(&mut self, message: impl Into<Vec<u8>>) {
        self.message = Some(message.into());
    }

    /// Append an attestation.
    pub fn add_signature(
        &mut self,
        public_key: impl Into<String>,
        signature: impl Into<String>,
    ) -> &mut Self {
        self.signatures.push(SignatureEntry {
            public_key: public_key.into(),
            signature: signature.into(),
        });
        self
    }

    /// The message, if one was set and it is non-empty.
    pub fn message(&self) -> Option<&[u8]> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }

    /// Attestations in insertion order.
    pub fn signatures(&self) -> &[SignatureEntry] {
        &self.signatures
    }

    /// Number of attestations.
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    /// Whether there are no attestations.
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}
