//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};

/// Length of generated signing secrets in bytes
pub const SECRET_LEN: usize = 32;

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Fresh signing secret, for processes that run without a configured one
pub fn random_secret() -> Vec<u8> {
    random_bytes(SECRET_LEN)
}

/// Fresh signing secret as standard base64, suitable for an env file
pub fn generate_secret_b64() -> String {
    to_base64(&random_secret())
}

/// Encode bytes as base64
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}
