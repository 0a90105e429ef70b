//! Fuzz target for keyset resolution
//!
//! Builds arbitrary keysets (statuses, prefixes, key ids, material lengths)
//! and resolves them against the standard managers.
//!
//! # Invariants
//!
//! - Resolution never panics
//! - A resolved set contains only ENABLED entries
//! - When `resolve` succeeds, the primary is present and marked
//! - Resolution is deterministic

#![no_main]

use arbitrary::Arbitrary;
use keyfold_core::{KeyStatus, Keyset, KeysetEntry, OutputPrefix, resolve, resolve_for_decrypt};
use keyfold_crypto::{AES256_GCM_TYPE_ID, XCHACHA20_POLY1305_TYPE_ID, standard_managers};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct RawRecord {
    key_type: KeyType,
    key_material: Vec<u8>,
    key_id: u32,
    status: RawStatus,
    prefix: RawPrefix,
}

#[derive(Debug, Arbitrary)]
enum KeyType {
    XChaCha,
    Gcm,
    Unknown,
}

#[derive(Debug, Arbitrary)]
enum RawStatus {
    Enabled,
    Disabled,
    Destroyed,
    Unknown,
}

#[derive(Debug, Arbitrary)]
enum RawPrefix {
    Raw,
    Tink,
    Legacy,
    Crunchy,
}

#[derive(Debug, Arbitrary)]
struct ResolveScenario {
    primary_key_id: u32,
    records: Vec<RawRecord>,
}

fn to_entry(record: &RawRecord) -> KeysetEntry {
    let type_id = match record.key_type {
        KeyType::XChaCha => XCHACHA20_POLY1305_TYPE_ID,
        KeyType::Gcm => AES256_GCM_TYPE_ID,
        KeyType::Unknown => "keyfold/fuzz-unknown",
    };
    let status = match record.status {
        RawStatus::Enabled => KeyStatus::Enabled,
        RawStatus::Disabled => KeyStatus::Disabled,
        RawStatus::Destroyed => KeyStatus::Destroyed,
        RawStatus::Unknown => KeyStatus::Unknown,
    };
    let prefix = match record.prefix {
        RawPrefix::Raw => OutputPrefix::Raw,
        RawPrefix::Tink => OutputPrefix::Tink,
        RawPrefix::Legacy => OutputPrefix::Legacy,
        RawPrefix::Crunchy => OutputPrefix::Crunchy,
    };
    KeysetEntry::new(type_id, record.key_material.clone(), record.key_id, status, prefix)
}

fuzz_target!(|scenario: ResolveScenario| {
    let managers = standard_managers();
    let entries: Vec<KeysetEntry> = scenario.records.iter().map(to_entry).collect();
    let keyset = Keyset::new(scenario.primary_key_id, entries);

    match resolve(&keyset, &managers, None) {
        Ok(set) => {
            let primary = set.primary().expect("resolve always yields a primary");
            assert!(primary.is_primary());
            assert_eq!(primary.key_id(), scenario.primary_key_id);
            assert!(set.entries().iter().all(|e| e.status() == KeyStatus::Enabled));

            // Same inputs, same outcome.
            let again = resolve(&keyset, &managers, None).expect("resolution is deterministic");
            assert_eq!(again.len(), set.len());
        },
        Err(_) => {
            // Must still not panic on the lenient path.
            let _ = resolve_for_decrypt(&keyset, &managers, None);
        },
    }
});
