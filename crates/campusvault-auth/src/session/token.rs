//! Opaque bearer token generation and hashing.
//!
//! Clients hold the raw token; the database stores only its SHA-256 hash,
//! so a leaked sessions table cannot be replayed.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Number of random bytes in a session token.
const TOKEN_BYTES: usize = 32;

/// Generate a fresh random session token as lowercase hex.
pub fn generate() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex_encode(&bytes)
}

/// SHA-256 hash of a token, as lowercase hex, for at-rest storage.
pub fn hash(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    hex_encode(&digest)
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_unique_and_hex() {
        let a = generate();
        let b = generate();
        assert_ne!(a, b);
        assert_eq!(a.len(), TOKEN_BYTES * 2);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hash_is_deterministic() {
        let token = generate();
        assert_eq!(hash(&token), hash(&token));
        assert_ne!(hash(&token), token);
    }
}
