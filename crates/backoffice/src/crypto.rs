//! Shared-secret symmetric cipher used by encrypted endpoints.
//!
//! Ciphertext travels as standard base64 of `nonce || sealed`, where `sealed`
//! is the AES-256-GCM output (ciphertext plus tag). The key is the SHA-256
//! digest of the configured shared secret.
use std::fmt;

use aes_gcm::{
    Aes256Gcm, Key, Nonce,
    aead::{Aead, AeadCore, KeyInit, OsRng},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use sha2::{Digest, Sha256};
use thiserror::Error;

const NONCE_LEN: usize = 12;

#[derive(Debug, Error)]
pub enum CipherError {
    #[error("shared secret must not be empty")]
    EmptySecret,
    #[error("ciphertext is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("ciphertext is too short")]
    Truncated,
    #[error("seal failed")]
    Seal,
    #[error("open failed")]
    Open,
}

/// Symmetric encryption applied to request and response payloads.
pub trait Cipher: Send + Sync {
    fn encrypt(&self, plaintext: &[u8]) -> Result<String, CipherError>;
    fn decrypt(&self, ciphertext: &str) -> Result<Vec<u8>, CipherError>;
}

#[derive(Clone)]
pub struct SharedSecretCipher {
    cipher: Aes256Gcm,
}

impl SharedSecretCipher {
    pub fn new(secret: &str) -> Result<Self, CipherError> {
        if secret.is_empty() {
            return Err(CipherError::EmptySecret);
        }
        let digest = Sha256::digest(secret.as_bytes());
        let key = Key::<Aes256Gcm>::from_slice(digest.as_slice());
        Ok(Self {
            cipher: Aes256Gcm::new(key),
        })
    }
}

impl fmt::Debug for SharedSecretCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSecretCipher").finish_non_exhaustive()
    }
}

impl Cipher for SharedSecretCipher {
    fn encrypt(&self, plaintext: &[u8]) -> Result<String, CipherError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let sealed = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|_| CipherError::Seal)?;

        let mut out = Vec::with_capacity(NONCE_LEN + sealed.len());
        out.extend_from_slice(nonce.as_slice());
        out.extend_from_slice(&sealed);
        Ok(STANDARD.encode(out))
    }

    fn decrypt(&self, ciphertext: &str) -> Result<Vec<u8>, CipherError> {
        let raw = STANDARD.decode(ciphertext.trim())?;
        if raw.len() <= NONCE_LEN {
            return Err(CipherError::Truncated);
        }
        let (nonce, sealed) = raw.split_at(NONCE_LEN);
        self.cipher
            .decrypt(Nonce::from_slice(nonce), sealed)
            .map_err(|_| CipherError::Open)
    }
}

/// Stand-in used when no shared secret is configured. Plain endpoints keep
/// working; anything sealed fails with [`CipherError::EmptySecret`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Unkeyed;

impl Cipher for Unkeyed {
    fn encrypt(&self, _plaintext: &[u8]) -> Result<String, CipherError> {
        Err(CipherError::EmptySecret)
    }

    fn decrypt(&self, _ciphertext: &str) -> Result<Vec<u8>, CipherError> {
        Err(CipherError::EmptySecret)
    }
}
