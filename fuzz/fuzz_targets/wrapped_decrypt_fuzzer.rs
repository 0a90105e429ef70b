//! Fuzz target for the wrapped AEAD decrypt path
//!
//! Feeds arbitrary ciphertext and associated data through a keyset with
//! every output-prefix scheme present.
//!
//! # Invariants
//!
//! - Decrypt never panics, whatever the input shape
//! - Failures are always the single opaque error
//! - Bytes that really came out of encrypt always roundtrip

#![no_main]

use arbitrary::Arbitrary;
use keyfold_core::{
    Aead, AeadError, KeyStatus, Keyset, KeysetEntry, OutputPrefix, WrappedAead, resolve,
};
use keyfold_crypto::{XCHACHA20_POLY1305_TYPE_ID, standard_managers};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct DecryptScenario {
    ciphertext: Vec<u8>,
    associated_data: Vec<u8>,
    roundtrip_plaintext: Vec<u8>,
}

fn build_aead() -> WrappedAead {
    let entry = |key_byte: u8, key_id: u32, prefix: OutputPrefix| {
        KeysetEntry::new(
            XCHACHA20_POLY1305_TYPE_ID,
            vec![key_byte; 32],
            key_id,
            KeyStatus::Enabled,
            prefix,
        )
    };
    let keyset = Keyset::new(
        1,
        vec![
            entry(0x01, 1, OutputPrefix::Tink),
            entry(0x02, 2, OutputPrefix::Raw),
            entry(0x03, 3, OutputPrefix::Legacy),
            entry(0x04, 4, OutputPrefix::Crunchy),
        ],
    );
    let set = resolve(&keyset, &standard_managers(), None).expect("fixed keyset resolves");
    WrappedAead::new(set)
}

fuzz_target!(|scenario: DecryptScenario| {
    let aead = build_aead();

    // Arbitrary bytes: must not panic, and must fail opaquely if they fail.
    if let Err(err) = aead.decrypt(&scenario.ciphertext, &scenario.associated_data) {
        assert_eq!(err, AeadError::DecryptionFailed);
    }

    // Real ciphertexts must always come back.
    let ciphertext = aead
        .encrypt(&scenario.roundtrip_plaintext, &scenario.associated_data)
        .expect("encryption succeeds");
    let plaintext = aead
        .decrypt(&ciphertext, &scenario.associated_data)
        .expect("own ciphertext decrypts");
    assert_eq!(plaintext, scenario.roundtrip_plaintext);
});
