//! The AEAD capability and its runtime errors.
//!
//! Everything in this crate speaks this one interface: concrete ciphers
//! implement it, key managers hand out boxed instances of it, and
//! [`WrappedAead`](crate::wrapped::WrappedAead) implements it on top of a
//! whole keyset.

use thiserror::Error;

/// Authenticated Encryption with Associated Data.
///
/// Implementations must be safe for concurrent use: `encrypt` and `decrypt`
/// take `&self` and may be called from multiple threads without external
/// synchronization. Neither call may block on I/O or retain state across
/// invocations.
pub trait Aead: Send + Sync {
    /// Encrypt `plaintext`, binding `associated_data` into the
    /// authentication tag without including it in the output.
    ///
    /// # Errors
    ///
    /// - `AeadError::Encryption` if the underlying cipher rejects the input
    ///   (e.g. plaintext too large)
    fn encrypt(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>, AeadError>;

    /// Decrypt `ciphertext`, verifying it was produced with the same
    /// `associated_data`.
    ///
    /// # Errors
    ///
    /// - `AeadError::DecryptionFailed` for any failure: tampering, wrong
    ///   key, wrong associated data, or truncated input
    fn decrypt(&self, ciphertext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>, AeadError>;
}

/// Runtime errors from [`Aead`] operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AeadError {
    /// Encrypt was attempted on a decrypt-only keyset (no primary key).
    #[error("keyset has no primary key: encryption is not available")]
    NoPrimary,

    /// The underlying cipher rejected an encryption input. Propagated
    /// verbatim from the primary primitive; never retried by this layer.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Decryption failed.
    ///
    /// # Security
    ///
    /// This variant is deliberately opaque. It carries no key id, no
    /// algorithm, and no reason, and its message is constant. When several
    /// candidate keys are tried, their individual failures all collapse
    /// into this single value so that error responses cannot be used as an
    /// oracle for which key "almost" matched.
    #[error("decryption failed")]
    DecryptionFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decryption_failure_is_constant() {
        // The Display output must not vary with the cause.
        assert_eq!(AeadError::DecryptionFailed.to_string(), "decryption failed");
        assert_eq!(AeadError::DecryptionFailed, AeadError::DecryptionFailed);
    }

    #[test]
    fn encryption_error_preserves_reason() {
        let err = AeadError::Encryption("plaintext too large".to_string());
        assert_eq!(err.to_string(), "encryption failed: plaintext too large");
    }
}
