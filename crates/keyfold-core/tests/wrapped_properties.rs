//! Property-based tests for the wrapped AEAD protocol.
//!
//! These verify the rotation contract for ALL plaintexts and associated
//! data, not just specific examples: roundtrips always succeed, ciphertexts
//! survive a primary-key rotation, and every decryption failure is the same
//! opaque error.

use std::sync::Arc;

use keyfold_core::{
    Aead, AeadError, KeyManager, KeyManagerSet, KeyStatus, Keyset, KeysetEntry, OutputPrefix,
    ResolveError, WrappedAead, resolve,
};
use proptest::prelude::*;

const TYPE_ID: &str = "keyfold/prop-test";

/// Deterministic fake cipher: [tag, aad checksum, plaintext ^ tag].
struct TagAead {
    tag: u8,
}

fn aad_checksum(associated_data: &[u8]) -> u8 {
    associated_data
        .iter()
        .fold(associated_data.len() as u8, |acc, byte| acc.wrapping_add(*byte))
}

impl Aead for TagAead {
    fn encrypt(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>, AeadError> {
        let mut out = vec![self.tag, aad_checksum(associated_data)];
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

struct TagKeyManager;

impl KeyManager for TagKeyManager {
    fn type_id(&self) -> &str {
        TYPE_ID
    }

    fn new_primitive(&self, key_material: &[u8]) -> Result<Arc<dyn Aead>, ResolveError> {
        let Some(tag) = key_material.first() else {
            return Err(ResolveError::InvalidKeyLength { expected: 1, actual: 0 });
        };
        Ok(Arc::new(TagAead { tag: *tag }))
    }
}

fn managers() -> KeyManagerSet {
    let mut set = KeyManagerSet::new();
    set.register(Arc::new(TagKeyManager));
    set
}

fn entry(key_id: u32, prefix: OutputPrefix) -> KeysetEntry {
    // Tag derived from the id; ids stay below 256 in these tests.
    KeysetEntry::new(TYPE_ID, vec![key_id as u8], key_id, KeyStatus::Enabled, prefix)
}

fn wrapped(primary_key_id: u32, entries: Vec<KeysetEntry>) -> WrappedAead {
    let keyset = Keyset::new(primary_key_id, entries);
    WrappedAead::new(resolve(&keyset, &managers(), None).unwrap())
}

fn arbitrary_prefix() -> impl Strategy<Value = OutputPrefix> {
    prop_oneof![
        Just(OutputPrefix::Raw),
        Just(OutputPrefix::Tink),
        Just(OutputPrefix::Legacy),
        Just(OutputPrefix::Crunchy),
    ]
}

proptest! {
    /// Decrypt(Encrypt(p, aad), aad) == p for every plaintext, every
    /// associated data, and every output-prefix scheme of the primary.
    #[test]
    fn roundtrip_for_all_inputs(
        plaintext in prop::collection::vec(any::<u8>(), 0..512),
        aad in prop::collection::vec(any::<u8>(), 0..64),
        prefix in arbitrary_prefix(),
    ) {
        let aead = wrapped(1, vec![entry(1, prefix)]);
        let ciphertext = aead.encrypt(&plaintext, &aad).unwrap();
        prop_assert_eq!(aead.decrypt(&ciphertext, &aad).unwrap(), plaintext);
    }

    /// A ciphertext produced before rotation decrypts after any other
    /// enabled key becomes primary.
    #[test]
    fn rotation_preserves_old_ciphertexts(
        plaintext in prop::collection::vec(any::<u8>(), 0..256),
        aad in prop::collection::vec(any::<u8>(), 0..32),
        old_prefix in arbitrary_prefix(),
        new_prefix in arbitrary_prefix(),
    ) {
        let entries = vec![entry(1, old_prefix), entry(2, new_prefix)];
        let before = wrapped(1, entries.clone());
        let ciphertext = before.encrypt(&plaintext, &aad).unwrap();

        let after = wrapped(2, entries);
        prop_assert_eq!(after.decrypt(&ciphertext, &aad).unwrap(), plaintext);
    }

    /// Arbitrary bytes that never came out of `encrypt` produce exactly the
    /// opaque failure, with a constant message, regardless of shape.
    #[test]
    fn junk_always_fails_opaquely(
        junk in prop::collection::vec(any::<u8>(), 0..128),
        aad in prop::collection::vec(any::<u8>(), 0..16),
    ) {
        // The fake cipher only accepts bytes starting with its own tag, so
        // rule out inputs that begin with either key's tag byte.
        prop_assume!(junk.first() != Some(&0x05) && junk.first() != Some(&0x06));

        let aead = wrapped(5, vec![entry(5, OutputPrefix::Raw), entry(6, OutputPrefix::Raw)]);
        let err = aead.decrypt(&junk, &aad).unwrap_err();
        prop_assert_eq!(&err, &AeadError::DecryptionFailed);
        prop_assert_eq!(err.to_string(), "decryption failed");
    }

    /// The associated data is always bound: flipping it breaks decryption.
    #[test]
    fn associated_data_is_bound(
        plaintext in prop::collection::vec(any::<u8>(), 1..128),
        aad in prop::collection::vec(any::<u8>(), 1..32),
        prefix in arbitrary_prefix(),
    ) {
        let aead = wrapped(1, vec![entry(1, prefix)]);
        let ciphertext = aead.encrypt(&plaintext, &aad).unwrap();

        let mut wrong = aad.clone();
        wrong[0] = wrong[0].wrapping_add(1);
        // The checksum in the fake cipher shifts with any byte change.
        prop_assert_eq!(aead.decrypt(&ciphertext, &wrong), Err(AeadError::DecryptionFailed));
    }
}

#[test]
fn multi_key_multi_prefix_rotation_scenario() {
    // Three generations: legacy key, crunchy key, tink key. Each was
    // primary once; all remain enabled, so all their ciphertexts decrypt.
    let entries = vec![
        entry(10, OutputPrefix::Legacy),
        entry(20, OutputPrefix::Crunchy),
        entry(30, OutputPrefix::Tink),
    ];

    let generations = [
        wrapped(10, entries.clone()),
        wrapped(20, entries.clone()),
        wrapped(30, entries),
    ];

    let ciphertexts: Vec<Vec<u8>> = generations
        .iter()
        .map(|aead| aead.encrypt(b"generational data", b"ctx").unwrap())
        .collect();

    let current = &generations[2];
    for ciphertext in &ciphertexts {
        assert_eq!(current.decrypt(ciphertext, b"ctx").unwrap(), b"generational data");
    }
}
