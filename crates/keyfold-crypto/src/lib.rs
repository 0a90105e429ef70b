//! Keyfold Cipher Primitives
//!
//! Concrete AEAD implementations and the key managers that construct them
//! from serialized keyset material. Two key types are provided:
//!
//! - XChaCha20-Poly1305 (`keyfold/xchacha20poly1305`): 32-byte keys,
//!   24-byte nonces
//! - AES-256-GCM (`keyfold/aes256gcm`): 32-byte keys, 12-byte nonces
//!
//! Both emit `nonce || ciphertext_and_tag` as their raw ciphertext; the
//! keyset-level output prefix is prepended above this layer by
//! [`WrappedAead`](keyfold_core::WrappedAead).
//!
//! # Security
//!
//! - Nonces are freshly random per encryption (`OsRng`)
//! - Key bytes are zeroized when a primitive is dropped
//! - Every decryption failure maps to the opaque
//!   [`AeadError::DecryptionFailed`](keyfold_core::AeadError::DecryptionFailed)

#![forbid(unsafe_code)]
#![deny(missing_docs)]

use std::sync::Arc;

use keyfold_core::KeyManagerSet;

pub mod gcm;
pub mod xchacha;

pub use gcm::{AES256_GCM_TYPE_ID, Aes256GcmAead, Aes256GcmKeyManager};
pub use xchacha::{XCHACHA20_POLY1305_TYPE_ID, XChaCha20Poly1305Aead, XChaChaKeyManager};

/// A manager set with every key type this crate provides.
pub fn standard_managers() -> KeyManagerSet {
    let mut managers = KeyManagerSet::new();
    managers.register(Arc::new(XChaChaKeyManager));
    managers.register(Arc::new(Aes256GcmKeyManager));
    managers
}
