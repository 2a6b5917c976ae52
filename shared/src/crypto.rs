use std::fmt::Write;

use rand::RngCore;
use sha3::{Digest, Sha3_256};

pub fn random_bytes<const N: usize>() -> [u8; N] {
    let mut buffer = [0u8; N];
    let mut rng = rand::rng();
    rng.fill_bytes(&mut buffer);
    buffer
}

pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, byte| {
        let _ = write!(out, "{byte:02x}");
        out
    })
}

/// Salted SHA3-256 of a password, hex-encoded. The salt is hashed first.
pub fn hash_password(password: &str, salt: &[u8]) -> String {
    let mut hasher = Sha3_256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    to_hex(&hasher.finalize())
}
