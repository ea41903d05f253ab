//! # Key and Hash Helpers

use super::errors::MultisigError;
use k256::ecdsa::VerifyingKey;
use sha2::Sha256;
use sha3::{Digest, Keccak256};
use shared_types::{decode_hex, Address, Hash};

/// Length of a compressed SEC1 secp256k1 point.
pub const COMPRESSED_KEY_LEN: usize = 33;

/// SHA-256 hash.
pub fn sha256(data: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// Keccak-256 hash.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// Parse a compressed secp256k1 public key from hex.
///
/// The key must be 33 bytes, start with `0x02`/`0x03` and decode to a point
/// on the curve.
pub fn parse_compressed_public_key(public_key_hex: &str) -> Result<VerifyingKey, MultisigError> {
    let invalid = || MultisigError::InvalidKeyFormat(public_key_hex.to_string());

    let bytes = decode_hex(public_key_hex).map_err(|_| invalid())?;
    if bytes.len() != COMPRESSED_KEY_LEN || !matches!(bytes[0], 0x02 | 0x03) {
        return Err(invalid());
    }
    VerifyingKey::from_sec1_bytes(&bytes).map_err(|_| invalid())
}

/// Derive the Ethereum-style address of a public key.
///
/// Keccak-256 of the uncompressed point without its `0x04` tag, last 20 bytes.
pub fn eth_address(public_key: &VerifyingKey) -> Address {
    let pubkey_bytes = public_key.to_encoded_point(false);
    let hash = keccak256(&pubkey_bytes.as_bytes()[1..]);

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}
