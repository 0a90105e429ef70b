//! Keyset data model and the output-prefix wire format.
//!
//! A [`Keyset`] is the storage-facing description of a key collection: an
//! ordered sequence of [`KeysetEntry`] records plus a keyset-level primary
//! key id. Declaration order is a contract, not an accident: it is the
//! decryption try-order for RAW keys and the tie-break order among
//! candidates sharing a prefix.
//!
//! # Wire format
//!
//! Every ciphertext is `prefix || raw_ciphertext`:
//!
//! ```text
//! RAW:                      (empty prefix)
//! TINK:    [0x01][key_id: u32 BE]   5 bytes
//! LEGACY:  [0x00][key_id: u32 BE]   5 bytes
//! CRUNCHY: [0x00][key_id: u32 BE]   5 bytes
//! ```
//!
//! These byte values are compatibility-critical: ciphertexts produced years
//! ago must keep decrypting, so the tags and the big-endian key id encoding
//! must never change.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Total length of a non-RAW ciphertext prefix (1 tag byte + 4 id bytes).
pub const PREFIX_LEN: usize = 5;

/// Tag byte identifying a TINK-format prefix.
pub const TINK_TAG: u8 = 0x01;

/// Tag byte identifying a LEGACY or CRUNCHY format prefix.
pub const LEGACY_TAG: u8 = 0x00;

/// Lifecycle status of a key within a keyset.
///
/// Only `Enabled` keys participate in encryption or decryption; all other
/// statuses are filtered out during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyStatus {
    /// Key is active and may encrypt (if primary) and decrypt.
    Enabled,
    /// Key is retained but must not be used.
    Disabled,
    /// Key material has been destroyed; only metadata remains.
    Destroyed,
    /// Status not recognized; treated like `Disabled`.
    Unknown,
}

/// Output-prefix scheme: whether and how ciphertexts self-identify their
/// producing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputPrefix {
    /// No prefix. Decryption must try every RAW key.
    Raw,
    /// `0x01` tag followed by the big-endian key id.
    Tink,
    /// `0x00` tag followed by the big-endian key id (historical format).
    Legacy,
    /// `0x00` tag followed by the big-endian key id (historical format,
    /// byte-identical to `Legacy` on the wire).
    Crunchy,
}

impl OutputPrefix {
    /// The identifying prefix emitted before ciphertexts of a key with
    /// `key_id`. Empty for [`OutputPrefix::Raw`].
    pub fn prefix_for(self, key_id: u32) -> Vec<u8> {
        let tag = match self {
            Self::Raw => return Vec::new(),
            Self::Tink => TINK_TAG,
            Self::Legacy | Self::Crunchy => LEGACY_TAG,
        };
        let mut prefix = Vec::with_capacity(PREFIX_LEN);
        prefix.push(tag);
        prefix.extend_from_slice(&key_id.to_be_bytes());
        prefix
    }
}

/// One raw key record inside a [`Keyset`].
///
/// `key_material` is the serialized key in whatever encoding the key type's
/// manager understands; it is zeroized when the entry is dropped.
#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct KeysetEntry {
    /// Identifier of the key type; resolved to a manager during resolution.
    pub type_id: String,
    /// Serialized key material, opaque to this crate.
    pub key_material: Vec<u8>,
    /// 32-bit key id, unique within the keyset for non-RAW keys.
    pub key_id: u32,
    /// Lifecycle status.
    #[zeroize(skip)]
    pub status: KeyStatus,
    /// Output-prefix scheme for ciphertexts of this key.
    #[zeroize(skip)]
    pub prefix: OutputPrefix,
}

impl KeysetEntry {
    /// Create a new keyset record.
    pub fn new(
        type_id: impl Into<String>,
        key_material: impl Into<Vec<u8>>,
        key_id: u32,
        status: KeyStatus,
        prefix: OutputPrefix,
    ) -> Self {
        Self {
            type_id: type_id.into(),
            key_material: key_material.into(),
            key_id,
            status,
            prefix,
        }
    }
}

// Manual Debug: key material must never end up in logs.
impl std::fmt::Debug for KeysetEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeysetEntry")
            .field("type_id", &self.type_id)
            .field("key_material", &"<redacted>")
            .field("key_id", &self.key_id)
            .field("status", &self.status)
            .field("prefix", &self.prefix)
            .finish()
    }
}

/// An ordered collection of key records with a designated primary key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keyset {
    /// Key id of the entry used for all new encryptions.
    pub primary_key_id: u32,
    /// Key records in declaration order.
    pub entries: Vec<KeysetEntry>,
}

impl Keyset {
    /// Create a keyset from records in declaration order.
    pub fn new(primary_key_id: u32, entries: Vec<KeysetEntry>) -> Self {
        Self { primary_key_id, entries }
    }
}
