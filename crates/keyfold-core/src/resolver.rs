//! Keyset resolution: raw key records to a live [`PrimitiveSet`].
//!
//! Resolution is pure and deterministic: the same keyset, lookup capability,
//! and override manager always produce the same set or the same error. It
//! either succeeds completely or fails completely; a manager error on any
//! record aborts the whole load so a caller can never receive a set that
//! silently dropped one of its keys.

use crate::{
    error::ResolveError,
    keyset::{KeyStatus, Keyset},
    manager::{KeyManager, ManagerLookup},
    primitive_set::{KeyEntry, PrimitiveSet},
};

/// Resolve a keyset into a [`PrimitiveSet`] with a usable primary key.
///
/// For each ENABLED record, the primitive is constructed by
/// `override_manager` when one is supplied (it must support every ENABLED
/// record's type), otherwise by the manager found through `managers`.
/// DISABLED, DESTROYED, and UNKNOWN records are skipped entirely and never
/// enter the set.
///
/// # Errors
///
/// - `EmptyKeyset` / `NoEnabledKeys` if there is nothing to resolve
/// - `UnsupportedKeyType` if a type id has no manager
/// - `KeyConstruction` / `InvalidKeyLength` if a manager rejects material
/// - `PrimaryNotAvailable` if the declared primary id matches no ENABLED
///   record
/// - `AmbiguousPrimary` if it matches more than one
pub fn resolve(
    keyset: &Keyset,
    managers: &dyn ManagerLookup,
    override_manager: Option<&dyn KeyManager>,
) -> Result<PrimitiveSet, ResolveError> {
    resolve_inner(keyset, managers, override_manager, true)
}

/// Resolve a keyset for decryption only.
///
/// Identical to [`resolve`] except that a missing primary is tolerated:
/// the resulting set has `primary() == None` and encrypting through it
/// fails with [`AeadError::NoPrimary`](crate::AeadError::NoPrimary). An
/// ambiguous primary id is still rejected.
pub fn resolve_for_decrypt(
    keyset: &Keyset,
    managers: &dyn ManagerLookup,
    override_manager: Option<&dyn KeyManager>,
) -> Result<PrimitiveSet, ResolveError> {
    resolve_inner(keyset, managers, override_manager, false)
}

fn resolve_inner(
    keyset: &Keyset,
    managers: &dyn ManagerLookup,
    override_manager: Option<&dyn KeyManager>,
    require_primary: bool,
) -> Result<PrimitiveSet, ResolveError> {
    if keyset.entries.is_empty() {
        return Err(ResolveError::EmptyKeyset);
    }

    let primary_matches = keyset
        .entries
        .iter()
        .filter(|record| record.status == KeyStatus::Enabled)
        .filter(|record| record.key_id == keyset.primary_key_id)
        .count();
    if primary_matches > 1 {
        return Err(ResolveError::AmbiguousPrimary { key_id: keyset.primary_key_id });
    }
    if require_primary && primary_matches == 0 {
        return Err(ResolveError::PrimaryNotAvailable { primary_key_id: keyset.primary_key_id });
    }

    let mut set = PrimitiveSet::new();
    for record in &keyset.entries {
        if record.status != KeyStatus::Enabled {
            continue;
        }

        let manager: &dyn KeyManager = match override_manager {
            Some(manager) => {
                if !manager.supports(&record.type_id) {
                    return Err(ResolveError::UnsupportedKeyType {
                        type_id: record.type_id.clone(),
                    });
                }
                manager
            },
            None => managers.lookup(&record.type_id).ok_or_else(|| {
                ResolveError::UnsupportedKeyType { type_id: record.type_id.clone() }
            })?,
        };

        let primitive = manager.new_primitive(&record.key_material)?;
        let is_primary = record.key_id == keyset.primary_key_id;
        set.insert(KeyEntry::new(
            primitive,
            record.key_id,
            record.status,
            record.prefix,
            is_primary,
        ));
    }

    if set.is_empty() {
        return Err(ResolveError::NoEnabledKeys);
    }

    tracing::debug!(
        entries = set.len(),
        primary_key_id = set.primary().map(|entry| entry.key_id()),
        "keyset resolved"
    );

    Ok(set)
}
