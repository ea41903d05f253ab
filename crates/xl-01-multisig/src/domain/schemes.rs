//! # Signature Schemes
//!
//! One verifier per ledger family. Verification never fails loudly: any
//! decoding problem yields `false`.

use super::errors::MultisigError;
use super::keys::{keccak256, sha256};
use crate::ports::SignatureVerifier;
use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use serde::{Deserialize, Serialize};
use shared_types::{decode_hex, encode_hex, Hash, LedgerKind};
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroize;

/// Curve and prehash combination used by a ledger family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignatureScheme {
    /// secp256k1 ECDSA over SHA-256 (Fabric-style attestations).
    Secp256k1Sha256,
    /// secp256k1 ECDSA over Keccak-256 (Ethereum-style).
    Secp256k1Keccak256,
    /// Ed25519.
    Ed25519,
}

impl SignatureScheme {
    /// Default scheme of a ledger family.
    #[must_use]
    pub fn for_ledger(ledger: LedgerKind) -> Self {
        match ledger {
            LedgerKind::Fabric | LedgerKind::Sawtooth => Self::Secp256k1Sha256,
            LedgerKind::Besu | LedgerKind::Quorum | LedgerKind::Ethereum => {
                Self::Secp256k1Keccak256
            }
            LedgerKind::Corda => Self::Ed25519,
        }
    }

    /// Configuration name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Secp256k1Sha256 => "secp256k1-sha256",
            Self::Secp256k1Keccak256 => "secp256k1-keccak256",
            Self::Ed25519 => "ed25519",
        }
    }

    /// Verifier for this scheme.
    #[must_use]
    pub fn verifier(&self) -> Box<dyn SignatureVerifier> {
        match self {
            Self::Secp256k1Sha256 => Box::new(Secp256k1Verifier::sha256()),
            Self::Secp256k1Keccak256 => Box::new(Secp256k1Verifier::keccak256()),
            Self::Ed25519 => Box::new(Ed25519Verifier),
        }
    }

    fn prehash(&self, message: &[u8]) -> Option<Hash> {
        match self {
            Self::Secp256k1Sha256 => Some(sha256(message)),
            Self::Secp256k1Keccak256 => Some(keccak256(message)),
            Self::Ed25519 => None,
        }
    }
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "secp256k1-sha256" => Ok(Self::Secp256k1Sha256),
            "secp256k1-keccak256" => Ok(Self::Secp256k1Keccak256),
            "ed25519" => Ok(Self::Ed25519),
            other => Err(format!(
                "unknown signature scheme: {other} (expected secp256k1-sha256, secp256k1-keccak256 or ed25519)"
            )),
        }
    }
}

// =============================================================================
// VERIFIERS
// =============================================================================

/// secp256k1 ECDSA verifier with a fixed prehash.
#[derive(Debug, Clone, Copy)]
pub struct Secp256k1Verifier {
    scheme: SignatureScheme,
}

impl Secp256k1Verifier {
    /// SHA-256 prehash.
    pub fn sha256() -> Self {
        Self {
            scheme: SignatureScheme::Secp256k1Sha256,
        }
    }

    /// Keccak-256 prehash.
    pub fn keccak256() -> Self {
        Self {
            scheme: SignatureScheme::Secp256k1Keccak256,
        }
    }

    fn try_verify(&self, message: &[u8], public_key_hex: &str, signature_hex: &str) -> Option<bool> {
        let key_bytes = decode_hex(public_key_hex).ok()?;
        let verifying_key = VerifyingKey::from_sec1_bytes(&key_bytes).ok()?;

        let sig_bytes = decode_hex(signature_hex).ok()?;
        if sig_bytes.len() != 64 && sig_bytes.len() != 65 {
            return None;
        }
        let signature = Signature::from_slice(&sig_bytes[..64]).ok()?;
        // Attestations produced outside k256 may carry a high S.
        let signature = signature.normalize_s().unwrap_or(signature);

        let digest = self.scheme.prehash(message)?;
        Some(verifying_key.verify_prehash(&digest, &signature).is_ok())
    }
}

impl SignatureVerifier for Secp256k1Verifier {
    fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    fn verify(&self, message: &[u8], public_key_hex: &str, signature_hex: &str) -> bool {
        self.try_verify(message, public_key_hex, signature_hex)
            .unwrap_or(false)
    }
}

/// Ed25519 verifier. Keys are 32 bytes, signatures 64 bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn scheme(&self) -> SignatureScheme {
        SignatureScheme::Ed25519
    }

    fn verify(&self, message: &[u8], public_key_hex: &str, signature_hex: &str) -> bool {
        use ed25519_dalek::Verifier;

        let Some(key) = decode_hex(public_key_hex)
            .ok()
            .and_then(|b| <[u8; 32]>::try_from(b).ok())
            .and_then(|b| ed25519_dalek::VerifyingKey::from_bytes(&b).ok())
        else {
            return false;
        };
        let Some(sig) = decode_hex(signature_hex)
            .ok()
            .and_then(|b| <[u8; 64]>::try_from(b).ok())
        else {
            return false;
        };

        key.verify(message, &ed25519_dalek::Signature::from_bytes(&sig))
            .is_ok()
    }
}

// =============================================================================
// SIGNING
// =============================================================================

/// Sign `message` with a hex private key, returning a hex signature.
///
/// secp256k1 schemes produce a 64-byte low-S `r || s`.
pub fn sign_message(
    scheme: SignatureScheme,
    private_key_hex: &str,
    message: &[u8],
) -> Result<String, MultisigError> {
    let mut key_bytes = decode_hex(private_key_hex).map_err(|_| MultisigError::InvalidPrivateKey)?;

    let result = match scheme.prehash(message) {
        Some(digest) => SigningKey::from_slice(&key_bytes)
            .map_err(|_| MultisigError::InvalidPrivateKey)
            .and_then(|key| {
                let signature: Signature = key
                    .sign_prehash(&digest)
                    .map_err(|e| MultisigError::SigningFailed(e.to_string()))?;
                Ok(encode_hex(&signature.to_bytes()))
            }),
        None => <[u8; 32]>::try_from(key_bytes.as_slice())
            .map_err(|_| MultisigError::InvalidPrivateKey)
            .map(|seed| {
                use ed25519_dalek::Signer;
                let key = ed25519_dalek::SigningKey::from_bytes(&seed);
                encode_hex(&key.sign(message).to_bytes())
            }),
    };

    key_bytes.zeroize();
    result
}

/// Public key (hex) matching a hex private key.
///
/// Compressed SEC1 for secp256k1 schemes, 32 raw bytes for Ed25519.
pub fn public_key_hex(
    scheme: SignatureScheme,
    private_key_hex: &str,
) -> Result<String, MultisigError> {
    let mut key_bytes = decode_hex(private_key_hex).map_err(|_| MultisigError::InvalidPrivateKey)?;

    let result = match scheme {
        SignatureScheme::Ed25519 => <[u8; 32]>::try_from(key_bytes.as_slice())
            .map_err(|_| MultisigError::InvalidPrivateKey)
            .map(|seed| {
                let key = ed25519_dalek::SigningKey::from_bytes(&seed);
                encode_hex(key.verifying_key().as_bytes())
            }),
        _ => SigningKey::from_slice(&key_bytes)
            .map_err(|_| MultisigError::InvalidPrivateKey)
            .map(|key| encode_hex(key.verifying_key().to_encoded_point(true).as_bytes())),
    };

    key_bytes.zeroize();
    result
}
