//! At-rest field encryption for vault secrets.
//!
//! One secret string in, one self-describing envelope out:
//! `hex(salt):hex(iv):hex(ciphertext):hex(authTag)`. A fresh salt and IV are
//! drawn for every call, and a per-call key is derived from the long-lived
//! master secret with PBKDF2, so no two envelopes share key material even
//! for identical plaintexts. The envelope format is a compatibility
//! contract: values already at rest must keep decrypting across releases.

use std::num::NonZeroU32;

use aes_gcm::aead::consts::U16;
use aes_gcm::aes::Aes256;
use aes_gcm::{AeadInPlace, AesGcm, Key, KeyInit, Nonce, Tag};
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use zeroize::Zeroizing;

use crate::types::errors::{CipherError, ConfigError};

/// PBKDF2 iteration count for key derivation.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Salt length in bytes, drawn fresh per encryption call.
pub const SALT_LENGTH: usize = 64;

/// AES-GCM IV length in bytes.
///
/// 16 rather than the usual 12: the envelope format predates this
/// implementation and existing stored values use a 16-byte IV.
pub const IV_LENGTH: usize = 16;

/// Derived symmetric key length in bytes (AES-256).
pub const KEY_LENGTH: usize = 32;

/// AES-GCM authentication tag length in bytes.
pub const TAG_LENGTH: usize = 16;

/// Delimiter joining the four hex-encoded envelope components.
const COMPONENT_DELIMITER: char = ':';

/// AES-256-GCM parameterized for the envelope's 16-byte IV.
type EnvelopeAead = AesGcm<Aes256, U16>;

/// Decoded components of an envelope, consumed during decryption.
struct EnvelopeParts {
    salt: Vec<u8>,
    iv: [u8; IV_LENGTH],
    ciphertext: Vec<u8>,
    tag: [u8; TAG_LENGTH],
}

/// Authenticated at-rest encryption of single string values, keyed by the
/// service master secret.
pub struct FieldCipher {
    master_secret: String,
    rng: SystemRandom,
}

impl FieldCipher {
    /// Creates a cipher keyed by `master_secret`.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingMasterSecret`] if the secret is empty:
    /// a vault without its key is a startup-fatal misconfiguration, not a
    /// per-call condition.
    pub fn new(master_secret: &str) -> Result<Self, ConfigError> {
        if master_secret.trim().is_empty() {
            return Err(ConfigError::MissingMasterSecret);
        }
        Ok(Self {
            master_secret: master_secret.to_string(),
            rng: SystemRandom::new(),
        })
    }

    /// Encrypts `plaintext` into a fresh envelope.
    ///
    /// Every call draws a new salt and IV; encrypting the same plaintext
    /// twice yields two different envelopes.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CipherError> {
        let mut salt = [0u8; SALT_LENGTH];
        self.rng
            .fill(&mut salt)
            .map_err(|_| CipherError::RandomGeneration("Failed to generate salt".to_string()))?;

        let mut iv = [0u8; IV_LENGTH];
        self.rng
            .fill(&mut iv)
            .map_err(|_| CipherError::RandomGeneration("Failed to generate IV".to_string()))?;

        let key = self.derive_key(&salt)?;
        let aead = EnvelopeAead::new(Key::<EnvelopeAead>::from_slice(key.as_ref()));

        let mut buffer = plaintext.as_bytes().to_vec();
        let tag = aead
            .encrypt_in_place_detached(Nonce::from_slice(&iv), &[], &mut buffer)
            .map_err(|_| CipherError::Encryption("Encryption operation failed".to_string()))?;

        let d = COMPONENT_DELIMITER;
        Ok(format!(
            "{}{d}{}{d}{}{d}{}",
            hex::encode(salt),
            hex::encode(iv),
            hex::encode(&buffer),
            hex::encode(tag),
        ))
    }

    /// Decrypts an envelope produced by [`encrypt`](Self::encrypt).
    ///
    /// # Errors
    /// [`CipherError::Format`] for anything that is not four hex components
    /// with a 16-byte IV and tag; [`CipherError::Decryption`] when the
    /// authentication tag does not verify (wrong key, tampering, corrupt
    /// data). Unauthenticated plaintext is never returned.
    pub fn decrypt(&self, envelope: &str) -> Result<String, CipherError> {
        let parts = parse_envelope(envelope)?;
        let key = self.derive_key(&parts.salt)?;
        let aead = EnvelopeAead::new(Key::<EnvelopeAead>::from_slice(key.as_ref()));

        let mut buffer = parts.ciphertext;
        aead.decrypt_in_place_detached(
            Nonce::from_slice(&parts.iv),
            &[],
            &mut buffer,
            Tag::from_slice(&parts.tag),
        )
        .map_err(|_| {
            CipherError::Decryption("Authentication failed: wrong key or tampered data".to_string())
        })?;

        String::from_utf8(buffer).map_err(|e| CipherError::Decryption(e.to_string()))
    }

    /// Structural check for "is this value already an envelope".
    ///
    /// This is the single gate deciding whether a stored value gets
    /// encrypted on write (plaintext) or decrypted on read (envelope), so
    /// the write path stays idempotent. Purely syntactic: four non-empty
    /// hex components. Hex case is not significant.
    pub fn is_envelope(text: &str) -> bool {
        let parts: Vec<&str> = text.split(COMPONENT_DELIMITER).collect();
        parts.len() == 4
            && parts
                .iter()
                .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_hexdigit()))
    }

    /// Derives the per-envelope AES key from the master secret and salt.
    fn derive_key(&self, salt: &[u8]) -> Result<Zeroizing<[u8; KEY_LENGTH]>, CipherError> {
        let iterations = NonZeroU32::new(PBKDF2_ITERATIONS)
            .ok_or_else(|| CipherError::KeyDerivation("Invalid iteration count".to_string()))?;

        let mut key = Zeroizing::new([0u8; KEY_LENGTH]);
        pbkdf2::derive(
            pbkdf2::PBKDF2_HMAC_SHA256,
            iterations,
            salt,
            self.master_secret.as_bytes(),
            key.as_mut(),
        );

        Ok(key)
    }
}

fn parse_envelope(envelope: &str) -> Result<EnvelopeParts, CipherError> {
    let parts: Vec<&str> = envelope.split(COMPONENT_DELIMITER).collect();
    if parts.len() != 4 {
        return Err(CipherError::Format(format!(
            "expected 4 components, found {}",
            parts.len()
        )));
    }

    let salt =
        hex::decode(parts[0]).map_err(|_| CipherError::Format("salt is not hex".to_string()))?;
    if salt.is_empty() {
        return Err(CipherError::Format("salt is empty".to_string()));
    }

    let iv_bytes =
        hex::decode(parts[1]).map_err(|_| CipherError::Format("IV is not hex".to_string()))?;
    if iv_bytes.len() != IV_LENGTH {
        return Err(CipherError::Format(format!(
            "IV must be {} bytes, got {}",
            IV_LENGTH,
            iv_bytes.len()
        )));
    }
    let mut iv = [0u8; IV_LENGTH];
    iv.copy_from_slice(&iv_bytes);

    let ciphertext = hex::decode(parts[2])
        .map_err(|_| CipherError::Format("ciphertext is not hex".to_string()))?;

    let tag_bytes =
        hex::decode(parts[3]).map_err(|_| CipherError::Format("auth tag is not hex".to_string()))?;
    if tag_bytes.len() != TAG_LENGTH {
        return Err(CipherError::Format(format!(
            "auth tag must be {} bytes, got {}",
            TAG_LENGTH,
            tag_bytes.len()
        )));
    }
    let mut tag = [0u8; TAG_LENGTH];
    tag.copy_from_slice(&tag_bytes);

    Ok(EnvelopeParts {
        salt,
        iv,
        ciphertext,
        tag,
    })
}
