//! Resolution-time errors.
//!
//! Everything here is a configuration or construction failure surfaced once,
//! when a keyset is turned into a [`PrimitiveSet`](crate::PrimitiveSet).
//! None of these errors is retried: a keyset that fails to resolve stays
//! broken until its records change. Runtime errors live in
//! [`AeadError`](crate::AeadError).

use thiserror::Error;

/// Errors from resolving a keyset into a primitive set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The keyset contains no records at all.
    #[error("keyset is empty")]
    EmptyKeyset,

    /// The keyset contains records, but none with status ENABLED.
    #[error("keyset has no enabled keys")]
    NoEnabledKeys,

    /// No key manager is available for a key type in the keyset. Raised
    /// both when the lookup capability knows nothing about the type and
    /// when a caller-supplied override manager does not support it.
    #[error("no key manager for key type {type_id:?}")]
    UnsupportedKeyType {
        /// The key type identifier that could not be resolved
        type_id: String,
    },

    /// A key manager rejected the serialized key material. Aborts the whole
    /// resolution: a partially-built set could silently drop a key a caller
    /// expects to be present.
    #[error("failed to construct primitive for key type {type_id:?}: {reason}")]
    KeyConstruction {
        /// Key type whose material was rejected
        type_id: String,
        /// Manager-supplied reason
        reason: String,
    },

    /// Key material has the wrong length for its key type.
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key length in bytes
        expected: usize,
        /// Actual key material length in bytes
        actual: usize,
    },

    /// The declared primary key id matches no ENABLED record. Covers both
    /// "no such id" and "the id exists but is disabled or destroyed".
    #[error("primary key {primary_key_id} is missing or not enabled")]
    PrimaryNotAvailable {
        /// The keyset-level primary key id that could not be honored
        primary_key_id: u32,
    },

    /// More than one ENABLED record carries the declared primary key id, so
    /// the primary cannot be identified unambiguously.
    #[error("primary key id {key_id} is ambiguous within the keyset")]
    AmbiguousPrimary {
        /// The duplicated key id
        key_id: u32,
    },
}
