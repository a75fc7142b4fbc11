//! Short code generation.
//!
//! Codes are derived from a salted double SHA-256 of the original URL and
//! encoded in base 62. The salt makes two calls for the same URL produce
//! unrelated codes, which matters because different owners may shorten the
//! same URL independently.

use base64::Engine as _;
use rand::Rng;
use sha2::{Digest, Sha256};

/// The 62-symbol code alphabet: digits, upper case, lower case.
pub const BASE62_ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Random bytes mixed into every hash input.
const SALT_LENGTH_BYTES: usize = 16;

/// Produces candidate codes for a URL.
///
/// Implementations must not consult registry state; collision handling is
/// the caller's job.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    fn generate(&self, original_url: &str) -> String;
}

/// Generator using a random salt, double SHA-256 and base-62 encoding.
#[derive(Debug, Clone)]
pub struct SaltedHashCodeGenerator {
    length: usize,
}

impl SaltedHashCodeGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl CodeGenerator for SaltedHashCodeGenerator {
    /// Generates a code of exactly the configured length.
    ///
    /// # Panics
    ///
    /// Panics if the system random number generator fails (extremely rare).
    fn generate(&self, original_url: &str) -> String {
        let salt = generate_salt();
        let input = format!("{original_url}:{salt}");

        let first = Sha256::digest(input.as_bytes());
        let second = Sha256::digest(first);

        let encoded = base62_encode(&second);
        let mut code = String::with_capacity(self.length.max(encoded.len()));

        if encoded.len() < self.length {
            let mut rng = rand::rng();
            for _ in 0..self.length - encoded.len() {
                let idx = rng.random_range(0..BASE62_ALPHABET.len());
                code.push(BASE62_ALPHABET[idx] as char);
            }
        }
        code.push_str(&encoded);
        code.truncate(self.length);

        code
    }
}

fn generate_salt() -> String {
    let mut buffer = [0u8; SALT_LENGTH_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}

/// Encodes bytes, read as one big-endian unsigned integer, in base 62.
///
/// Leading zero bytes carry no value, so the output of an all-zero input is
/// empty.
pub fn base62_encode(bytes: &[u8]) -> String {
    let mut number: Vec<u8> = bytes.iter().copied().skip_while(|b| *b == 0).collect();
    let mut digits = Vec::with_capacity(number.len() * 4 / 3 + 1);

    while !number.is_empty() {
        let mut remainder: u32 = 0;
        let mut quotient = Vec::with_capacity(number.len());

        for byte in &number {
            let acc = (remainder << 8) | u32::from(*byte);
            let q = acc / 62;
            remainder = acc % 62;
            if !quotient.is_empty() || q != 0 {
                quotient.push(q as u8);
            }
        }

        digits.push(BASE62_ALPHABET[remainder as usize]);
        number = quotient;
    }

    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}
