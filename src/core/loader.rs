//! Key loading.
//!
//! Wraps backend key material in handles that carry their fingerprint. A
//! [`PrivateKey`] can only come out of a successful passphrase unlock.

use std::fmt;

use tracing::debug;
use zeroize::Zeroizing;

use crate::core::primitives::Primitives;
use crate::core::types::Fingerprint;
use crate::error::Result;

/// An unlocked private identity for signing and decryption.
///
/// Lives only in memory. Backend secret material is dropped (and zeroized
/// where the backend supports it) together with the handle.
pub struct PrivateKey<P: Primitives> {
    inner: P::Secret,
    fingerprint: Fingerprint,
}

/// A parsed public identity for verification and encryption.
pub struct PublicKey<P: Primitives> {
    inner: P::Public,
    fingerprint: Fingerprint,
}

impl<P: Primitives> PrivateKey<P> {
    /// Unlock an armored private key with its passphrase.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Decryption` on a wrong passphrase or a block that is
    /// not a private key.
    pub fn decrypt(backend: &P, armored: &str, passphrase: &str) -> Result<Self> {
        let passphrase = Zeroizing::new(passphrase.to_string());
        let inner = backend.decrypt_private_key(armored, &passphrase)?;
        let fingerprint = backend.secret_fingerprint(&inner);

        debug!(fingerprint = %fingerprint, backend = backend.name(), "private key unlocked");

        Ok(Self { inner, fingerprint })
    }

    /// Primary key fingerprint.
    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    /// Public counterpart of this key.
    pub fn to_public(&self, backend: &P) -> PublicKey<P> {
        PublicKey {
            inner: backend.to_public(&self.inner),
            fingerprint: self.fingerprint.clone(),
        }
    }

    /// Backend key material.
    pub fn as_inner(&self) -> &P::Secret {
        &self.inner
    }
}

impl<P: Primitives> PublicKey<P> {
    /// Parse an armored public key.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Parse` if the block is malformed or not a public key.
    pub fn parse(backend: &P, armored: &str) -> Result<Self> {
        let inner = backend.parse_public_key(armored)?;
        let fingerprint = backend.public_fingerprint(&inner);
        Ok(Self { inner, fingerprint })
    }

    /// Primary key fingerprint.
    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    /// Backend key material.
    pub fn as_inner(&self) -> &P::Public {
        &self.inner
    }
}

impl<P: Primitives> Clone for PublicKey<P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            fingerprint: self.fingerprint.clone(),
        }
    }
}

impl<P: Primitives> fmt::Debug for PrivateKey<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("fingerprint", &self.fingerprint)
            .finish_non_exhaustive()
    }
}

impl<P: Primitives> fmt::Debug for PublicKey<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKey")
            .field("fingerprint", &self.fingerprint)
            .finish_non_exhaustive()
    }
}

/// Unlock an armored private key. See [`PrivateKey::decrypt`].
pub fn decrypt_private_key<P: Primitives>(
    backend: &P,
    armored: &str,
    passphrase: &str,
) -> Result<PrivateKey<P>> {
    PrivateKey::decrypt(backend, armored, passphrase)
}

/// Parse an armored public key. See [`PublicKey::parse`].
pub fn parse_public_key<P: Primitives>(backend: &P, armored: &str) -> Result<PublicKey<P>> {
    PublicKey::parse(backend, armored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::primitives::Stub;
    use crate::error::{Error, KeyError};

    #[test]
    fn test_decrypt_with_correct_passphrase() {
        let (private, public) = Stub.keypair("alice", "correct horse");
        let key = decrypt_private_key(&Stub, &private, "correct horse").unwrap();
        let parsed = parse_public_key(&Stub, &public).unwrap();
        assert_eq!(key.fingerprint(), parsed.fingerprint());
    }

    #[test]
    fn test_decrypt_with_wrong_passphrase() {
        let (private, _) = Stub.keypair("alice", "correct horse");
        let err = decrypt_private_key(&Stub, &private, "battery staple").unwrap_err();
        assert!(matches!(err, Error::Key(KeyError::Decryption(_))));
    }

    #[test]
    fn test_parse_malformed_public_key() {
        let err = parse_public_key(&Stub, "-----BEGIN NOTHING-----").unwrap_err();
        assert!(matches!(err, Error::Key(KeyError::Parse(_))));
    }

    #[test]
    fn test_to_public_matches_fingerprint() {
        let (private, _) = Stub.keypair("alice", "pw");
        let key = decrypt_private_key(&Stub, &private, "pw").unwrap();
        let public = key.to_public(&Stub);
        assert_eq!(public.fingerprint(), key.fingerprint());
    }

    #[test]
    fn test_debug_does_not_leak_material() {
        let (private, _) = Stub.keypair("alice", "pw");
        let key = decrypt_private_key(&Stub, &private, "pw").unwrap();
        let debug = format!("{:?}", key);
        assert!(debug.contains("PrivateKey"));
        assert!(!debug.contains("material"));
    }
}
