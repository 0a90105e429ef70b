//! Keyfold Keyset Core
//!
//! Resolution of rotating keysets into a single AEAD capability. A keyset
//! holds several keys of possibly different algorithms, statuses, and ages;
//! exactly one is "primary" and used for every new encryption, while any
//! ENABLED key may still decrypt old ciphertexts.
//!
//! # Architecture
//!
//! ```text
//! Keyset (ordered records + primary_key_id)
//!        │
//!        ▼ resolve() — via KeyManager lookup
//! PrimitiveSet (ordered KeyEntry values + prefix index + primary)
//!        │
//!        ▼ WrappedAead::new()
//! WrappedAead — Aead: encrypt with primary, decrypt across candidates
//! ```
//!
//! # Security
//!
//! Candidate selection and failure aggregation:
//! - Ciphertexts produced under TINK/LEGACY/CRUNCHY keys self-identify via a
//!   5-byte prefix; decryption shortlists candidates through a prefix index
//! - RAW ciphertexts carry no prefix; decryption falls back to trying every
//!   RAW key in keyset declaration order
//! - All decryption failures collapse into one opaque error. Callers (and
//!   attackers) cannot distinguish "wrong key" from "corrupted ciphertext"
//!   from "authentication failure"
//!
//! Key lifecycle:
//! - Serialized key material is zeroized on drop
//! - DISABLED and DESTROYED keys never enter a `PrimitiveSet`
//! - Rotation is a rebuild: resolve a new `PrimitiveSet` and swap; the old
//!   set keeps serving in-flight callers because it is never mutated

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod aead;
pub mod error;
pub mod keyset;
pub mod manager;
pub mod primitive_set;
pub mod resolver;
pub mod wrapped;

#[cfg(test)]
pub(crate) mod testutil;

pub use aead::{Aead, AeadError};
pub use error::ResolveError;
pub use keyset::{KeyStatus, Keyset, KeysetEntry, OutputPrefix, PREFIX_LEN};
pub use manager::{KeyManager, KeyManagerSet, ManagerLookup};
pub use primitive_set::{KeyEntry, PrimitiveSet};
pub use resolver::{resolve, resolve_for_decrypt};
pub use wrapped::WrappedAead;
