//! # Secret Generation and Verification
//!
//! HTLC hash locks are SHA-256 of a 32-byte pre-image.

use crate::domain::SecureSecret;
use rand::RngCore;
use sha2::{Digest, Sha256};
use shared_types::Hash;

/// Generate a random pre-image.
pub fn generate_random_secret() -> SecureSecret {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    SecureSecret::new(bytes)
}

/// Hash lock for a pre-image.
pub fn create_hash_lock(secret: &SecureSecret) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// Whether `secret` opens `hash_lock`.
pub fn verify_secret(secret: &SecureSecret, hash_lock: &Hash) -> bool {
    create_hash_lock(secret) == *hash_lock
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_random_secret() {
        let s1 = generate_random_secret();
        let s2 = generate_random_secret();
        assert_ne!(s1.as_bytes(), s2.as_bytes());
    }

    #[test]
    fn test_create_hash_lock_deterministic() {
        let secret = SecureSecret::new([0xABu8; 32]);
        assert_eq!(create_hash_lock(&secret), create_hash_lock(&secret));
    }

    #[test]
    fn test_verify_secret() {
        let secret = generate_random_secret();
        let hash_lock = create_hash_lock(&secret);
        assert!(verify_secret(&secret, &hash_lock));
        assert!(!verify_secret(&SecureSecret::new([0xCDu8; 32]), &hash_lock));
    }
}
