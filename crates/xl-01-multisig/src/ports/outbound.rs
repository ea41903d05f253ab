//! # Outbound Ports

use crate::domain::SignatureScheme;

/// Verifies one signature for one ledger's scheme.
///
/// Returns `false` for anything that does not verify, including malformed
/// hex, wrong lengths and keys that are not curve points.
pub trait SignatureVerifier: Send + Sync {
    /// Scheme implemented by this verifier.
    fn scheme(&self) -> SignatureScheme;

    /// Verify `signature_hex` over `message` against `public_key_hex`.
    fn verify(&self, message: &[u8], public_key_hex: &str, signature_hex: &str) -> bool;
}
