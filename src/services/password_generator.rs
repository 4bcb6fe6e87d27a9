//! Cryptographically secure password generation.
//!
//! The alphabet always contains the 52 Latin letters; digits and a fixed
//! symbol set are added by independent toggles. Each output character is
//! chosen by reducing a fresh 32-bit CSPRNG value modulo the alphabet size,
//! the same draw a browser performs with
//! `crypto.getRandomValues`.

use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};

/// Shortest password the generator will emit.
pub const MIN_LENGTH: usize = 8;

/// Longest password the generator will emit.
pub const MAX_LENGTH: usize = 100;

const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "~!@#$%^&*(){}:<>.,?|";

/// Options for generating a random password.
///
/// Requested lengths outside `[MIN_LENGTH, MAX_LENGTH]` are clamped, not
/// rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorOptions {
    pub length: usize,
    pub digits: bool,
    pub symbols: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            length: 16,
            digits: true,
            symbols: true,
        }
    }
}

/// Password generator backed by the system CSPRNG.
pub struct PasswordGenerator {
    rng: SystemRandom,
}

impl PasswordGenerator {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }

    /// The alphabet implied by the given toggle state.
    pub fn alphabet(options: &GeneratorOptions) -> Vec<char> {
        let mut charset = String::from(LETTERS);
        if options.digits {
            charset.push_str(DIGITS);
        }
        if options.symbols {
            charset.push_str(SYMBOLS);
        }
        charset.chars().collect()
    }

    /// Generates a password of `clamp(options.length, 8, 100)` characters
    /// drawn uniformly from the toggled alphabet.
    pub fn generate(&self, options: &GeneratorOptions) -> String {
        let length = options.length.clamp(MIN_LENGTH, MAX_LENGTH);
        let alphabet = Self::alphabet(options);

        // One u32 per output character.
        let mut random_bytes = vec![0u8; length * 4];
        self.rng
            .fill(&mut random_bytes)
            .expect("Failed to generate random bytes");

        let mut password = String::with_capacity(length);
        for chunk in random_bytes.chunks_exact(4) {
            let value = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            password.push(alphabet[value as usize % alphabet.len()]);
        }
        password
    }
}

impl Default for PasswordGenerator {
    fn default() -> Self {
        Self::new()
    }
}
