//! The composite AEAD over a resolved keyset.
//!
//! [`WrappedAead`] makes a whole [`PrimitiveSet`] look like one cipher:
//! encryption always goes through the primary key and prepends its
//! identifying prefix; decryption shortlists candidates through the prefix
//! index and falls back to the RAW keys in declaration order.
//!
//! # Security
//!
//! Failure aggregation: when no candidate decrypts, the individual reasons
//! are discarded and a single opaque [`AeadError::DecryptionFailed`] is
//! returned. A caller observing error responses cannot tell a ciphertext
//! valid under some non-present key from outright garbage, so the decrypt
//! path cannot be used as a key-distinguishing oracle.

use std::sync::Arc;

use crate::{
    aead::{Aead, AeadError},
    keyset::PREFIX_LEN,
    primitive_set::PrimitiveSet,
};

/// An [`Aead`] backed by every ENABLED key of a keyset.
///
/// Stateless beyond its immutable set reference: clones share the set, and
/// concurrent `encrypt`/`decrypt` calls need no synchronization.
#[derive(Clone)]
pub struct WrappedAead {
    set: Arc<PrimitiveSet>,
}

impl WrappedAead {
    /// Wrap a resolved primitive set.
    pub fn new(set: PrimitiveSet) -> Self {
        Self { set: Arc::new(set) }
    }

    /// The underlying primitive set.
    pub fn primitive_set(&self) -> &PrimitiveSet {
        &self.set
    }
}

impl Aead for WrappedAead {
    /// Encrypt with the primary key and prepend its identifying prefix.
    fn encrypt(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>, AeadError> {
        let Some(primary) = self.set.primary() else {
            return Err(AeadError::NoPrimary);
        };

        let raw_ciphertext = primary.primitive().encrypt(plaintext, associated_data)?;
        let prefix = primary.prefix_bytes();
        let mut ciphertext = Vec::with_capacity(prefix.len() + raw_ciphertext.len());
        ciphertext.extend_from_slice(prefix);
        ciphertext.extend_from_slice(&raw_ciphertext);
        Ok(ciphertext)
    }

    /// Try prefix-matched candidates first, then every RAW key.
    ///
    /// The candidate loop is bounded by the set size and short-circuits on
    /// the first success. Prefixed candidates see the ciphertext with its
    /// prefix stripped; RAW candidates see the full, unstripped bytes.
    fn decrypt(&self, ciphertext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>, AeadError> {
        if ciphertext.len() >= PREFIX_LEN {
            let (prefix, remaining) = ciphertext.split_at(PREFIX_LEN);
            let candidates = self.set.by_prefix(prefix);
            if !candidates.is_empty() {
                tracing::trace!(candidates = candidates.len(), "trying prefixed candidates");
            }
            for candidate in candidates {
                if let Ok(plaintext) = candidate.primitive().decrypt(remaining, associated_data) {
                    return Ok(plaintext);
                }
            }
        }

        // No prefix matched (or every prefixed candidate failed): the
        // ciphertext may have been produced by a RAW key, whose output is
        // indistinguishable from noise. Try them against the full bytes.
        let raw_candidates = self.set.raw_entries();
        if !raw_candidates.is_empty() {
            tracing::trace!(candidates = raw_candidates.len(), "trying raw fallback");
        }
        for candidate in raw_candidates {
            if let Ok(plaintext) = candidate.primitive().decrypt(ciphertext, associated_data) {
                return Ok(plaintext);
            }
        }

        Err(AeadError::DecryptionFailed)
    }
}

impl std::fmt::Debug for WrappedAead {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WrappedAead").field("set", &self.set).finish()
    }
}
