//! XChaCha20-Poly1305 primitive and key manager.
//!
//! Raw ciphertext layout: `[nonce: 24 bytes][ciphertext + 16-byte tag]`.
//! The extended nonce makes random nonces safe without coordination, which
//! matters here because a primitive may be shared by many threads.

use chacha20poly1305::{
    XChaCha20Poly1305, XNonce,
    aead::{Aead as _, AeadCore, KeyInit, OsRng, Payload},
};
use keyfold_core::{Aead, AeadError, KeyManager, ResolveError};
use std::sync::Arc;
use zeroize::Zeroize;

/// Key type identifier for XChaCha20-Poly1305 keys.
pub const XCHACHA20_POLY1305_TYPE_ID: &str = "keyfold/xchacha20poly1305";

/// Key length in bytes.
pub const KEY_SIZE: usize = 32;

/// XChaCha20 nonce length in bytes.
const NONCE_SIZE: usize = 24;

/// Poly1305 tag length in bytes.
const TAG_SIZE: usize = 16;

/// An [`Aead`] backed by XChaCha20-Poly1305 with a fixed 32-byte key.
pub struct XChaCha20Poly1305Aead {
    key: [u8; KEY_SIZE],
}

impl XChaCha20Poly1305Aead {
    /// Create a primitive from a raw 32-byte key.
    pub fn new(key: [u8; KEY_SIZE]) -> Self {
        Self { key }
    }

    /// Generate fresh random key material of the right length.
    pub fn generate_key_material() -> Vec<u8> {
        XChaCha20Poly1305::generate_key(&mut OsRng).to_vec()
    }
}

impl Drop for XChaCha20Poly1305Aead {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

impl Aead for XChaCha20Poly1305Aead {
    fn encrypt(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>, AeadError> {
        let cipher = XChaCha20Poly1305::new((&self.key).into());
        let nonce = XChaCha20Poly1305::generate_nonce(&mut OsRng);

        let ciphertext = cipher
            .encrypt(&nonce, Payload { msg: plaintext, aad: associated_data })
            .map_err(|_| AeadError::Encryption("xchacha20poly1305 rejected input".to_string()))?;

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

        let cipher = XChaCha20Poly1305::new((&self.key).into());
        cipher
            .decrypt(XNonce::from_slice(nonce), Payload { msg: payload, aad: associated_data })
            .map_err(|_| AeadError::DecryptionFailed)
    }
}

/// Key manager turning 32 raw key bytes into [`XChaCha20Poly1305Aead`].
pub struct XChaChaKeyManager;

impl KeyManager for XChaChaKeyManager {
    fn type_id(&self) -> &str {
        XCHACHA20_POLY1305_TYPE_ID
    }

    fn new_primitive(&self, key_material: &[u8]) -> Result<Arc<dyn Aead>, ResolveError> {
        let key: [u8; KEY_SIZE] = key_material.try_into().map_err(|_| {
            ResolveError::InvalidKeyLength { expected: KEY_SIZE, actual: key_material.len() }
        })?;
        Ok(Arc::new(XChaCha20Poly1305Aead::new(key)))
    }
}
