// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Encryption codec for interface metadata at rest.
//!
//! ## Format
//!
//! ```text
//! base64( nonce[12] || ciphertext || tag[16] )
//! ```
//!
//! AES-256-GCM via `ring::aead`, with a fresh random nonce for every call.
//! The key is process-wide configuration (`METADATA_KEY`) and is never
//! passed per call.

use base64ct::{Base64, Encoding};
use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM, NONCE_LEN};
use ring::rand::{SecureRandom, SystemRandom};

/// Length of the raw AES-256 key in bytes.
pub const KEY_LEN: usize = 32;

/// Error type for codec operations.
#[derive(Debug, thiserror::Error)]
pub enum CipherError {
    #[error("invalid metadata key: {0}")]
    InvalidKey(String),

    #[error("encryption failed")]
    Encryption,

    #[error("decryption failed: {0}")]
    Decryption(&'static str),
}

pub type CipherResult<T> = Result<T, CipherError>;

/// Symmetric codec for opaque metadata blobs.
pub struct MetadataCipher {
    key: LessSafeKey,
    rng: SystemRandom,
}

impl std::fmt::Debug for MetadataCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataCipher")
            .field("algorithm", &"AES-256-GCM")
            .finish_non_exhaustive()
    }
}

impl MetadataCipher {
    /// Build a codec from raw key bytes (must be exactly 32 bytes).
    pub fn new(key: &[u8]) -> CipherResult<Self> {
        if key.len() != KEY_LEN {
            return Err(CipherError::InvalidKey(format!(
                "expected {KEY_LEN} bytes, got {}",
                key.len()
            )));
        }
        let unbound = UnboundKey::new(&AES_256_GCM, key)
            .map_err(|_| CipherError::InvalidKey("rejected by AES-256-GCM".to_string()))?;

        Ok(Self {
            key: LessSafeKey::new(unbound),
            rng: SystemRandom::new(),
        })
    }

    /// Build a codec from a base64-encoded key, as stored in configuration.
    pub fn from_base64_key(encoded: &str) -> CipherResult<Self> {
        let raw = Base64::decode_vec(encoded.trim())
            .map_err(|_| CipherError::InvalidKey("not valid base64".to_string()))?;
        Self::new(&raw)
    }

    /// Generate a fresh random key, base64-encoded.
    pub fn generate_key() -> CipherResult<String> {
        let mut key = [0u8; KEY_LEN];
        SystemRandom::new()
            .fill(&mut key)
            .map_err(|_| CipherError::InvalidKey("system RNG unavailable".to_string()))?;
        Ok(Base64::encode_string(&key))
    }

    /// Encrypt a plaintext document.
    pub fn encrypt(&self, plaintext: &str) -> CipherResult<String> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        self.rng
            .fill(&mut nonce_bytes)
            .map_err(|_| CipherError::Encryption)?;

        let mut in_out = plaintext.as_bytes().to_vec();
        self.key
            .seal_in_place_append_tag(
                Nonce::assume_unique_for_key(nonce_bytes),
                Aad::empty(),
                &mut in_out,
            )
            .map_err(|_| CipherError::Encryption)?;

        let mut output = Vec::with_capacity(NONCE_LEN + in_out.len());
        output.extend_from_slice(&nonce_bytes);
        output.extend_from_slice(&in_out);
        Ok(Base64::encode_string(&output))
    }

    /// Decrypt a document produced by [`MetadataCipher::encrypt`].
    pub fn decrypt(&self, ciphertext: &str) -> CipherResult<String> {
        let raw = Base64::decode_vec(ciphertext)
            .map_err(|_| CipherError::Decryption("not valid base64"))?;

        if raw.len() < NONCE_LEN + AES_256_GCM.tag_len() {
            return Err(CipherError::Decryption("ciphertext too short"));
        }

        let (nonce_bytes, sealed) = raw.split_at(NONCE_LEN);
        let nonce = Nonce::try_assume_unique_for_key(nonce_bytes)
            .map_err(|_| CipherError::Decryption("malformed nonce"))?;

        let mut in_out = sealed.to_vec();
        let plaintext = self
            .key
            .open_in_place(nonce, Aad::empty(), &mut in_out)
            .map_err(|_| CipherError::Decryption("authentication failed"))?;

        String::from_utf8(plaintext.to_vec())
            .map_err(|_| CipherError::Decryption("plaintext is not UTF-8"))
    }
}
