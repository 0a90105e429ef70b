//! Key-manager capabilities.
//!
//! A [`KeyManager`] turns serialized key material of one key type into a
//! live [`Aead`] primitive. The resolver never talks to a process-wide
//! registry; it is handed a [`ManagerLookup`] capability, which keeps the
//! resolution path testable with fully synthetic managers and keeps global
//! mutable state out of this crate. [`KeyManagerSet`] is the obvious
//! map-backed implementation for callers that want one.

use std::{collections::HashMap, sync::Arc};

use crate::{aead::Aead, error::ResolveError};

/// Constructs AEAD primitives from serialized key material of one key type.
pub trait KeyManager: Send + Sync {
    /// The key type identifier this manager handles.
    fn type_id(&self) -> &str;

    /// Whether this manager can construct primitives for `type_id`.
    ///
    /// The default implementation accepts exactly [`Self::type_id`].
    fn supports(&self, type_id: &str) -> bool {
        self.type_id() == type_id
    }

    /// Construct a primitive from serialized key material.
    ///
    /// # Errors
    ///
    /// - `ResolveError::InvalidKeyLength` or `ResolveError::KeyConstruction`
    ///   if the material is malformed for this key type
    fn new_primitive(&self, key_material: &[u8]) -> Result<Arc<dyn Aead>, ResolveError>;
}

/// Lookup capability mapping key type identifiers to managers.
pub trait ManagerLookup {
    /// The manager for `type_id`, if one is known.
    fn lookup(&self, type_id: &str) -> Option<&dyn KeyManager>;
}

/// An owned, immutable-after-setup collection of key managers.
#[derive(Default)]
pub struct KeyManagerSet {
    managers: HashMap<String, Arc<dyn KeyManager>>,
}

impl KeyManagerSet {
    /// Create an empty manager set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a manager under its own type id, replacing and returning
    /// any previous manager for that type.
    pub fn register(&mut self, manager: Arc<dyn KeyManager>) -> Option<Arc<dyn KeyManager>> {
        self.managers.insert(manager.type_id().to_string(), manager)
    }

    /// Number of registered managers.
    pub fn len(&self) -> usize {
        self.managers.len()
    }

    /// Whether no managers are registered.
    pub fn is_empty(&self) -> bool {
        self.managers.is_empty()
    }
}

impl ManagerLookup for KeyManagerSet {
    fn lookup(&self, type_id: &str) -> Option<&dyn KeyManager> {
        self.managers.get(type_id).map(AsRef::as_ref)
    }
}

impl std::fmt::Debug for KeyManagerSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut type_ids: Vec<&str> = self.managers.keys().map(String::as_str).collect();
        type_ids.sort_unstable();
        f.debug_struct("KeyManagerSet").field("type_ids", &type_ids).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::TagKeyManager;

    #[test]
    fn lookup_finds_registered_manager() {
        let mut set = KeyManagerSet::new();
        set.register(Arc::new(TagKeyManager::new("keyfold/test")));

        let manager = set.lookup("keyfold/test").unwrap();
        assert_eq!(manager.type_id(), "keyfold/test");
        assert!(set.lookup("keyfold/other").is_none());
    }

    #[test]
    fn register_replaces_by_type_id() {
        let mut set = KeyManagerSet::new();
        assert!(set.register(Arc::new(TagKeyManager::new("keyfold/test"))).is_none());
        let previous = set.register(Arc::new(TagKeyManager::new("keyfold/test")));
        assert!(previous.is_some());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn default_supports_is_type_id_equality() {
        let manager = TagKeyManager::new("keyfold/test");
        assert!(manager.supports("keyfold/test"));
        assert!(!manager.supports("keyfold/test2"));
    }
}
