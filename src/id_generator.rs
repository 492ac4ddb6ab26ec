//! Wheel and participant identifiers.
//!
//! Wheel ids double as the only access credential for a wheel, so they are
//! drawn from the operating system's CSPRNG. 62^8 is roughly 2.2e14 ids.

use rand::distributions::{Distribution, Uniform};
use rand::rngs::OsRng;
use rand::{CryptoRng, Rng};
use regex::Regex;
use std::sync::LazyLock;

/// Length of a wheel id and of generated participant ids.
pub const WHEEL_ID_LENGTH: usize = 8;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

static WHEEL_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]{8}$").expect("wheel id pattern is valid"));

/// Generate an id of `length` alphanumeric characters using `OsRng`.
pub fn generate_id(length: usize) -> String {
    generate_id_with(&mut OsRng, length)
}

/// Generate a wheel-sized id.
pub fn generate_wheel_id() -> String {
    generate_id(WHEEL_ID_LENGTH)
}

/// Generate an id from a caller-supplied cryptographically secure generator.
pub fn generate_id_with<R>(rng: &mut R, length: usize) -> String
where
    R: Rng + CryptoRng + ?Sized,
{
    let dist = Uniform::from(0..ALPHABET.len());

    let mut id = String::with_capacity(length);
    for _ in 0..length {
        id.push(ALPHABET[dist.sample(rng)] as char);
    }
    id
}

/// Whether `id` is a well-formed wheel id. Checked before any store access.
pub fn is_valid_wheel_id(id: &str) -> bool {
    WHEEL_ID_PATTERN.is_match(id)
}
