//! Sealed messaging.
//!
//! Sealing encrypts to the ring and signs with the ring's own key. Opening
//! decrypts and then requires the signature to come from a trusted peer. The
//! two checks are independent: a payload that decrypts but is not signed by
//! a peer is rejected and its plaintext is wiped before returning.

use std::fmt;

use tracing::{debug, trace, warn};
use zeroize::Zeroizing;

use crate::core::keyring::Keyring;
use crate::core::loader::PublicKey;
use crate::core::primitives::{Primitives, Verified};
use crate::core::types::{Armored, Fingerprint};
use crate::error::{CipherError, Result};

/// Armored ciphertext produced by [`encrypt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedPayload(Armored);

impl SealedPayload {
    /// Wrap armored ciphertext received from elsewhere.
    pub fn new(armored: impl Into<Armored>) -> Self {
        Self(armored.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> Armored {
        self.0
    }
}

impl fmt::Display for SealedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SealedPayload {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Authenticated plaintext and the fingerprint that vouched for it.
pub struct Opened {
    plaintext: Zeroizing<Vec<u8>>,
    signer: Fingerprint,
}

impl Opened {
    pub fn plaintext(&self) -> &[u8] {
        &self.plaintext
    }

    /// Fingerprint of the verified signer.
    pub fn signer(&self) -> &Fingerprint {
        &self.signer
    }

    /// Plaintext as UTF-8, if it is valid UTF-8.
    pub fn as_utf8(&self) -> Option<&str> {
        std::str::from_utf8(&self.plaintext).ok()
    }

    /// Take the plaintext buffer.
    pub fn into_plaintext(self) -> Zeroizing<Vec<u8>> {
        self.plaintext
    }
}

impl fmt::Debug for Opened {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Opened")
            .field("signer", &self.signer)
            .field("len", &self.plaintext.len())
            .finish()
    }
}

/// Encrypt `plaintext` to the ring and sign it with the ring's own key.
///
/// Recipients are the ring's own key followed by every peer, without
/// repeating a fingerprint. With no peers the payload is addressed to self
/// only. Ciphertext differs between calls for equal input.
///
/// # Errors
///
/// Returns `CipherError::EncryptionFailed` if the backend cannot seal.
pub fn encrypt<P: Primitives>(plaintext: &[u8], ring: &Keyring<P>) -> Result<SealedPayload> {
    let recipients: Vec<_> = ring.recipients().map(PublicKey::as_inner).collect();

    trace!(
        bytes = plaintext.len(),
        recipients = recipients.len(),
        "sealing payload"
    );

    let armored = ring.backend().encrypt_and_sign(
        plaintext,
        &recipients,
        ring.private_key().as_inner(),
    )?;

    debug!(signer = %ring.fingerprint(), "payload sealed");
    Ok(SealedPayload(armored))
}

/// Decrypt with the ring's own key and authenticate the signer.
///
/// # Errors
///
/// - `CipherError::DecryptionFailed` if the payload cannot be opened.
/// - `CipherError::UntrustedSigner` if it opens but no trusted peer signed
///   it. This includes every payload opened with a ring that has no peers.
pub fn decrypt_and_verify<P: Primitives>(ciphertext: &str, ring: &Keyring<P>) -> Result<Opened> {
    let candidates: Vec<_> = ring.peers().map(PublicKey::as_inner).collect();

    let Verified { plaintext, signer } =
        ring.backend()
            .decrypt(ciphertext, ring.private_key().as_inner(), &candidates)?;

    match signer {
        Some(fp) if ring.is_trusted(&fp) => {
            debug!(signer = %fp, bytes = plaintext.len(), "payload opened");
            Ok(Opened {
                plaintext,
                signer: fp,
            })
        }
        other => {
            warn!("rejecting payload without a trusted signature");
            drop(plaintext);
            Err(CipherError::UntrustedSigner { signer: other }.into())
        }
    }
}

/// Check a cleartext-signed message against `candidates`.
///
/// # Errors
///
/// Returns `CipherError::BadSignature` if the block is malformed or no
/// candidate produced the signature.
pub fn verify_signed_cleartext<P: Primitives>(
    backend: &P,
    signed: &str,
    candidates: &[PublicKey<P>],
) -> Result<Opened> {
    let keys: Vec<_> = candidates.iter().map(PublicKey::as_inner).collect();
    let Verified { plaintext, signer } = backend.verify_cleartext(signed, &keys)?;

    match signer {
        Some(fp) => {
            debug!(signer = %fp, "cleartext signature verified");
            Ok(Opened {
                plaintext,
                signer: fp,
            })
        }
        None => Err(CipherError::BadSignature(
            "no candidate key produced this signature".to_string(),
        )
        .into()),
    }
}
