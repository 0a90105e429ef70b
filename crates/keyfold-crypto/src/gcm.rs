//! AES-256-GCM primitive and key manager.
//!
//! Raw ciphertext layout: `[nonce: 12 bytes][ciphertext + 16-byte tag]`.

use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead as _, AeadCore, KeyInit, OsRng, Payload},
};
use keyfold_core::{Aead, AeadError, KeyManager, ResolveError};
use std::sync::Arc;
use zeroize::Zeroize;

/// Key type identifier for AES-256-GCM keys.
pub const AES256_GCM_TYPE_ID: &str = "keyfold/aes256gcm";

/// Key length in bytes.
pub const KEY_SIZE: usize = 32;

/// GCM nonce length in bytes.
const NONCE_SIZE: usize = 12;

/// GCM tag length in bytes.
const TAG_SIZE: usize = 16;

/// An [`Aead`] backed by AES-256-GCM with a fixed 32-byte key.
pub struct Aes256GcmAead {
    key: [u8; KEY_SIZE],
}

impl Aes256GcmAead {
    /// Create a primitive from a raw 32-byte key.
    pub fn new(key: [u8; KEY_SIZE]) -> Self {
        Self { key }
    }

    /// Generate fresh random key material of the right length.
    pub fn generate_key_material() -> Vec<u8> {
        Aes256Gcm::generate_key(&mut OsRng).to_vec()
    }
}

impl Drop for Aes256GcmAead {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

impl Aead for Aes256GcmAead {
    fn encrypt(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>, AeadError> {
        let cipher = Aes256Gcm::new((&self.key).into());
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

        let ciphertext = cipher
            .encrypt(&nonce, Payload { msg: plaintext, aad: associated_data })
            .map_err(|_| AeadError::Encryption("aes-256-gcm rejected input".to_string()))?;

        let mut out = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    fn decrypt(&self, ciphertext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>, AeadError> {
        if ciphertext.len() < NONCE_SIZE + TAG_SIZE {
            return Err(AeadError::DecryptionFailed);
        }
        let (nonce, payload) = ciphertext.split_at(NONCE_SIZE);

        let cipher = Aes256Gcm::new((&self.key).into());
        cipher
            .decrypt(Nonce::from_slice(nonce), Payload { msg: payload, aad: associated_data })
            .map_err(|_| AeadError::DecryptionFailed)
    }
}

/// Key manager turning 32 raw key bytes into [`Aes256GcmAead`].
pub struct Aes256GcmKeyManager;

impl KeyManager for Aes256GcmKeyManager {
    fn type_id(&self) -> &str {
        AES256_GCM_TYPE_ID
    }

    fn new_primitive(&self, key_material: &[u8]) -> Result<Arc<dyn Aead>, ResolveError> {
        let key: [u8; KEY_SIZE] = key_material.try_into().map_err(|_| {
            ResolveError::InvalidKeyLength { expected: KEY_SIZE, actual: key_material.len() }
        })?;
        Ok(Arc::new(Aes256GcmAead::new(key)))
    }
}
