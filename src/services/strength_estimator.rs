//! Password entropy and strength estimation.
//!
//! Pure pool-size model: each character class present in the password adds
//! its full pool to the alphabet, and entropy is `length * log2(pool)`.
//! Deliberately simple: it estimates search-space size, not pattern
//! weakness, and it must match what the client-side meter displays.

use crate::types::strength::{StrengthBand, StrengthReport};

pub const LOWERCASE_POOL: usize = 26;
pub const UPPERCASE_POOL: usize = 26;
pub const DIGIT_POOL: usize = 10;
pub const SYMBOL_POOL: usize = 32;

/// Sums the pool sizes of the character classes present in `password`.
///
/// Anything outside ASCII alphanumerics counts as a symbol.
pub fn character_pool_size(password: &str) -> usize {
    let mut pool = 0;
    if password.chars().any(|c| c.is_ascii_lowercase()) {
        pool += LOWERCASE_POOL;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        pool += UPPERCASE_POOL;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        pool += DIGIT_POOL;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        pool += SYMBOL_POOL;
    }
    pool
}

/// Estimated entropy of `password` in bits, rounded to two decimal places.
///
/// Zero for an empty password or an empty pool.
pub fn entropy_bits(password: &str) -> f64 {
    if password.is_empty() {
        return 0.0;
    }
    let pool = character_pool_size(password);
    if pool == 0 {
        return 0.0;
    }
    let bits = password.chars().count() as f64 * (pool as f64).log2();
    (bits * 100.0).round() / 100.0
}

/// Full strength assessment: rounded entropy plus its band.
pub fn assess(password: &str) -> StrengthReport {
    let entropy = entropy_bits(password);
    StrengthReport {
        entropy_bits: entropy,
        band: StrengthBand::classify(entropy),
    }
}
