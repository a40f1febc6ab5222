//! Cryptographic primitives.
//!
//! The keyring, sealing, and certification layers never touch a concrete
//! crypto library. They go through the [`Primitives`] trait, which a backend
//! implements once.
//!
//! ## Backends
//!
//! - **OpenPGP**: Default, feature `openpgp`. rPGP-based, armored OpenPGP blocks.
//! - **Stub**: Test builds and feature `test-stub`. Deterministic fixtures,
//!   NOT cryptographically secure.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Primitives` trait
//! 2. Add the implementation in a new file
//! 3. Feature-gate if appropriate
//! 4. Re-export from this module

use zeroize::Zeroizing;

use crate::core::types::{Armored, Fingerprint};
use crate::error::Result;

#[cfg(feature = "openpgp")]
mod openpgp;

#[cfg(any(test, feature = "test-stub"))]
pub mod stub;

#[cfg(feature = "openpgp")]
pub use openpgp::OpenPgp;

#[cfg(any(test, feature = "test-stub"))]
pub use stub::Stub;

/// Result of opening a message: the content plus who signed it.
pub struct Verified {
    /// Decrypted or signed content.
    pub plaintext: Zeroizing<Vec<u8>>,
    /// Fingerprint of the candidate whose key verified the signature.
    ///
    /// `None` when the message is unsigned or no candidate matched.
    pub signer: Option<Fingerprint>,
}

/// Cryptographic backend trait.
///
/// Every operation is a black box from the core's point of view: it either
/// returns a complete result or a typed error, never partial output.
///
/// Backends must be cheap to clone and safe to share across threads; the
/// core keeps one inside each keyring.
pub trait Primitives: Clone + Send + Sync {
    /// Unlocked private key material.
    type Secret: Send + Sync;

    /// Parsed public key.
    type Public: Clone + Send + Sync;

    /// Backend name for display.
    fn name(&self) -> &'static str;

    /// Unlock a passphrase-protected armored private key.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Decryption` on a wrong passphrase or a block that is
    /// not a private key.
    fn decrypt_private_key(&self, armored: &str, passphrase: &str) -> Result<Self::Secret>;

    /// Parse an armored public key.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Parse` if the block is malformed or not a public key.
    fn parse_public_key(&self, armored: &str) -> Result<Self::Public>;

    /// Public counterpart of an unlocked private key.
    fn to_public(&self, secret: &Self::Secret) -> Self::Public;

    /// Fingerprint of a public key's primary key.
    fn public_fingerprint(&self, key: &Self::Public) -> Fingerprint;

    /// Fingerprint of a private key's primary key.
    fn secret_fingerprint(&self, key: &Self::Secret) -> Fingerprint;

    /// Encrypt `plaintext` to every recipient and sign it with `signer`.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::EncryptionFailed` if any stage fails.
    fn encrypt_and_sign(
        &self,
        plaintext: &[u8],
        recipients: &[&Self::Public],
        signer: &Self::Secret,
    ) -> Result<Armored>;

    /// Decrypt `ciphertext` with `key` and check its embedded signature
    /// against `candidates`.
    ///
    /// A signature that matches no candidate is not an error here; the
    /// returned [`Verified::signer`] is simply `None`.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::DecryptionFailed` if the message cannot be opened.
    fn decrypt(
        &self,
        ciphertext: &str,
        key: &Self::Secret,
        candidates: &[&Self::Public],
    ) -> Result<Verified>;

    /// Check a cleartext-signed message against `candidates`.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::BadSignature` if the block is malformed.
    fn verify_cleartext(&self, signed: &str, candidates: &[&Self::Public]) -> Result<Verified>;

    /// Check that `subject` carries a valid certification made by `certifier`.
    ///
    /// # Errors
    ///
    /// Returns `TrustError::Certification` when no such certification exists.
    fn verify_certification(&self, subject: &Self::Public, certifier: &Self::Public)
        -> Result<()>;
}
