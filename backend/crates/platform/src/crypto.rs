//! Cryptographic Utilities
//!
//! Random material for secrets, verification codes, generated passwords and
//! nicknames. Everything here draws from the operating system RNG.

use rand::distributions::{Alphanumeric, Uniform};
use rand::{Rng, RngCore, rngs::OsRng};

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Random decimal code of exactly `len` digits (leading zeros allowed)
pub fn random_numeric_code(len: usize) -> String {
    let digits = Uniform::from(0u8..10);
    (0..len)
        .map(|_| char::from(b'0' + OsRng.sample(digits)))
        .collect()
}

/// Random `[A-Za-z0-9]` string of `len` characters
pub fn random_alphanumeric(len: usize) -> String {
    (0..len)
        .map(|_| char::from(OsRng.sample(Alphanumeric)))
        .collect()
}
