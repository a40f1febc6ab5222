//! Certification checks.
//!
//! Single-hop only: [`verify_certification`] proves that one key vouched for
//! another directly. Chains are walked by [`crate::core::trust`].

use tracing::debug;

use crate::core::loader::{PrivateKey, PublicKey};
use crate::core::primitives::Primitives;
use crate::error::{KeyError, Result};

/// Check that `subject` carries a valid certification made by `certifier`.
///
/// # Errors
///
/// Returns `TrustError::Certification` if no certification on `subject`
/// verifies under `certifier` over `subject`'s own content.
pub fn verify_certification<P: Primitives>(
    backend: &P,
    subject: &PublicKey<P>,
    certifier: &PublicKey<P>,
) -> Result<()> {
    backend.verify_certification(subject.as_inner(), certifier.as_inner())?;
    debug!(
        subject = %subject.fingerprint(),
        certifier = %certifier.fingerprint(),
        "certification verified"
    );
    Ok(())
}

/// Parse both keys, then [`verify_certification`].
///
/// # Errors
///
/// Returns `KeyError::Parse` before any certification check if either block
/// is invalid.
pub fn verify_certification_armored<P: Primitives>(
    backend: &P,
    subject: &str,
    certifier: &str,
) -> Result<()> {
    let subject = PublicKey::parse(backend, subject)?;
    let certifier = PublicKey::parse(backend, certifier)?;
    verify_certification(backend, &subject, &certifier)
}

/// Check that `public` is the counterpart of `private`.
///
/// # Errors
///
/// Returns `KeyError::IdentityMismatch` when the fingerprints differ.
pub fn verify_key_pair_identity<P: Primitives>(
    public: &PublicKey<P>,
    private: &PrivateKey<P>,
) -> Result<()> {
    if public.fingerprint() != private.fingerprint() {
        return Err(KeyError::IdentityMismatch {
            public: public.fingerprint().clone(),
            private: private.fingerprint().clone(),
        }
        .into());
    }
    Ok(())
}
