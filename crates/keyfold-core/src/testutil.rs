//! Synthetic primitives and managers for unit tests.
//!
//! `TagAead` is a fake cipher that is deterministic and trivially
//! invertible: ciphertext is a tag byte, an associated-data checksum, then
//! the plaintext XORed with the tag. Decryption succeeds only when tag and
//! checksum match, which is enough to model "wrong key" and "wrong
//! associated data" without real cryptography.

use std::sync::Arc;

use crate::{
    aead::{Aead, AeadError},
    error::ResolveError,
    manager::KeyManager,
};

fn aad_checksum(associated_data: &[u8]) -> u8 {
    associated_data
        .iter()
        .fold(associated_data.len() as u8, |acc, byte| acc.wrapping_add(*byte))
}

/// Fake AEAD identified by a single tag byte.
pub(crate) struct TagAead {
    tag: u8,
}

impl TagAead {
    pub(crate) fn new(tag: u8) -> Self {
        Self { tag }
    }
}

impl Aead for TagAead {
    fn encrypt(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>, AeadError> {
        let mut out = Vec::with_capacity(2 + plaintext.len());
        out.push(self.tag);
        out.push(aad_checksum(associated_data));
        out.extend(plaintext.iter().map(|byte| byte ^ self.tag));
        Ok(out)
    }

    fn decrypt(&self, ciphertext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>, AeadError> {
        if ciphertext.len() < 2
            || ciphertext[0] != self.tag
            || ciphertext[1] != aad_checksum(associated_data)
        {
            return Err(AeadError::DecryptionFailed);
        }
        Ok(ciphertext[2..].iter().map(|byte| byte ^ self.tag).collect())
    }
}

/// Fake AEAD that always encrypts to and decrypts from a fixed payload.
/// Useful for observing which candidate a multi-key decrypt picked.
pub(crate) struct ConstantAead {
    payload: Vec<u8>,
}

impl ConstantAead {
    pub(crate) fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self { payload: payload.into() }
    }
}

impl Aead for ConstantAead {
    fn encrypt(&self, _plaintext: &[u8], _associated_data: &[u8]) -> Result<Vec<u8>, AeadError> {
        Ok(self.payload.clone())
    }

    fn decrypt(&self, _ciphertext: &[u8], _associated_data: &[u8]) -> Result<Vec<u8>, AeadError> {
        Ok(self.payload.clone())
    }
}

/// Manager for [`TagAead`]: the first byte of the key material is the tag.
pub(crate) struct TagKeyManager {
    type_id: String,
}

impl TagKeyManager {
    pub(crate) fn new(type_id: impl Into<String>) -> Self {
        Self { type_id: type_id.into() }
    }
}

impl KeyManager for TagKeyManager {
    fn type_id(&self) -> &str {
        &self.type_id
    }

    fn new_primitive(&self, key_material: &[u8]) -> Result<Arc<dyn Aead>, ResolveError> {
        let Some(tag) = key_material.first() else {
            return Err(ResolveError::InvalidKeyLength { expected: 1, actual: 0 });
        };
        Ok(Arc::new(TagAead::new(*tag)))
    }
}

/// Manager that rejects every key, for construction-failure paths.
pub(crate) struct RejectingKeyManager {
    type_id: String,
}

impl RejectingKeyManager {
    pub(crate) fn new(type_id: impl Into<String>) -> Self {
        Self { type_id: type_id.into() }
    }
}

impl KeyManager for RejectingKeyManager {
    fn type_id(&self) -> &str {
        &self.type_id
    }

    fn new_primitive(&self, _key_material: &[u8]) -> Result<Arc<dyn Aead>, ResolveError> {
        Err(ResolveError::KeyConstruction {
            type_id: self.type_id.clone(),
            reason: "rejected by test manager".to_string(),
        })
    }
}
