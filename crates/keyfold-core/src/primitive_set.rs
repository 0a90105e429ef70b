//! Resolved key entries and the prefix-indexed primitive set.
//!
//! A [`PrimitiveSet`] is the immutable output of keyset resolution: every
//! ENABLED key as a live [`KeyEntry`], an index from ciphertext prefix
//! bytes to the entries sharing that prefix, and (usually) the primary
//! entry. It is built exactly once per resolution and never mutated
//! afterwards, so it can be shared across threads behind an `Arc` without
//! locking.

use std::{collections::HashMap, sync::Arc};

use crate::{
    aead::Aead,
    keyset::{KeyStatus, OutputPrefix},
};

/// One resolved key: a live AEAD primitive plus its identifying metadata.
///
/// Immutable after construction. Instances are shared between the set's
/// ordered entry list and the prefix index.
pub struct KeyEntry {
    primitive: Arc<dyn Aead>,
    key_id: u32,
    status: KeyStatus,
    prefix: OutputPrefix,
    prefix_bytes: Vec<u8>,
    is_primary: bool,
}

impl KeyEntry {
    pub(crate) fn new(
        primitive: Arc<dyn Aead>,
        key_id: u32,
        status: KeyStatus,
        prefix: OutputPrefix,
        is_primary: bool,
    ) -> Self {
        let prefix_bytes = prefix.prefix_for(key_id);
        Self { primitive, key_id, status, prefix, prefix_bytes, is_primary }
    }

    /// The underlying AEAD primitive.
    pub fn primitive(&self) -> &dyn Aead {
        self.primitive.as_ref()
    }

    /// Key id, unique within the keyset for non-RAW keys.
    pub fn key_id(&self) -> u32 {
        self.key_id
    }

    /// Lifecycle status. Always [`KeyStatus::Enabled`] for entries inside a
    /// [`PrimitiveSet`]; resolution filters out everything else.
    pub fn status(&self) -> KeyStatus {
        self.status
    }

    /// Output-prefix scheme of this key.
    pub fn prefix(&self) -> OutputPrefix {
        self.prefix
    }

    /// The identifying prefix prepended to ciphertexts of this key.
    /// Empty for RAW keys.
    pub fn prefix_bytes(&self) -> &[u8] {
        &self.prefix_bytes
    }

    /// Whether this entry is the keyset's primary key.
    pub fn is_primary(&self) -> bool {
        self.is_primary
    }
}

impl std::fmt::Debug for KeyEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyEntry")
            .field("key_id", &self.key_id)
            .field("status", &self.status)
            .field("prefix", &self.prefix)
            .field("is_primary", &self.is_primary)
            .finish_non_exhaustive()
    }
}

/// The resolved, prefix-indexed view of a keyset.
///
/// # Invariants
///
/// - Ordering: `entries` preserves keyset declaration order, and every
///   `by_prefix` bucket preserves it among entries sharing a prefix. This
///   is the decryption try-order contract, verified by tests, not an
///   accident of storage.
/// - Status: only ENABLED entries are present.
/// - Primary: at most one entry has `is_primary() == true`, and `primary()`
///   points at it. `None` only for decrypt-only sets.
#[derive(Default)]
pub struct PrimitiveSet {
    entries: Vec<Arc<KeyEntry>>,
    by_prefix: HashMap<Vec<u8>, Vec<Arc<KeyEntry>>>,
    primary: Option<Arc<KeyEntry>>,
}

impl PrimitiveSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append an entry, registering it in the prefix index. Declaration
    /// order is preserved both globally and within the prefix bucket.
    pub(crate) fn insert(&mut self, entry: KeyEntry) {
        let entry = Arc::new(entry);
        self.by_prefix
            .entry(entry.prefix_bytes().to_vec())
            .or_default()
            .push(Arc::clone(&entry));
        if entry.is_primary() {
            self.primary = Some(Arc::clone(&entry));
        }
        self.entries.push(entry);
    }

    /// The primary entry, absent only in decrypt-only sets.
    pub fn primary(&self) -> Option<&KeyEntry> {
        self.primary.as_deref()
    }

    /// All entries in keyset declaration order.
    pub fn entries(&self) -> &[Arc<KeyEntry>] {
        &self.entries
    }

    /// Entries whose ciphertexts start with `prefix_bytes`, in declaration
    /// order. RAW entries live under the empty prefix.
    pub fn by_prefix(&self, prefix_bytes: &[u8]) -> &[Arc<KeyEntry>] {
        self.by_prefix.get(prefix_bytes).map_or(&[], Vec::as_slice)
    }

    /// RAW entries in declaration order: the fallback candidates for
    /// ciphertexts that carry no recognizable prefix.
    pub fn raw_entries(&self) -> &[Arc<KeyEntry>] {
        self.by_prefix(&[])
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for PrimitiveSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrimitiveSet")
            .field("entries", &self.entries)
            .field("primary_key_id", &self.primary.as_ref().map(|entry| entry.key_id()))
            .finish_non_exhaustive()
    }
}
