//! Keyring construction.
//!
//! A keyring is one unlocked private identity plus the public identities
//! trusted to sign payloads for it. It is immutable once built; a changed
//! trust set means building a new ring.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::core::loader::{PrivateKey, PublicKey};
use crate::core::primitives::Primitives;
use crate::core::types::Fingerprint;
use crate::error::Result;

/// One private identity plus its trusted peers.
///
/// Peers keep insertion order. When two peers share a fingerprint the first
/// one wins and the later one is dropped.
pub struct Keyring<P: Primitives> {
    backend: P,
    own: PrivateKey<P>,
    own_public: PublicKey<P>,
    peers: Vec<PublicKey<P>>,
    index: HashSet<Fingerprint>,
}

impl<P: Primitives> Keyring<P> {
    /// Build a ring from an unlocked key and armored peer public keys.
    ///
    /// All-or-nothing: if any peer fails to parse, no ring is produced.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Parse` for the first invalid peer block.
    pub fn build<I, S>(backend: P, own: PrivateKey<P>, peers: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = peers
            .into_iter()
            .map(|armored| PublicKey::parse(&backend, armored.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_public_keys(backend, own, parsed))
    }

    /// Build a ring from peers that are already parsed.
    pub fn from_public_keys<I>(backend: P, own: PrivateKey<P>, peers: I) -> Self
    where
        I: IntoIterator<Item = PublicKey<P>>,
    {
        let own_public = own.to_public(&backend);

        let mut index = HashSet::new();
        let mut kept = Vec::new();
        for peer in peers {
            if index.insert(peer.fingerprint().clone()) {
                kept.push(peer);
            } else {
                debug!(fingerprint = %peer.fingerprint(), "skipping duplicate peer");
            }
        }

        trace!(
            own = %own.fingerprint(),
            peers = kept.len(),
            "keyring built"
        );

        Self {
            backend,
            own,
            own_public,
            peers: kept,
            index,
        }
    }

    /// The ring's private identity.
    pub fn private_key(&self) -> &PrivateKey<P> {
        &self.own
    }

    /// Public counterpart of the ring's private identity.
    pub fn public_key(&self) -> &PublicKey<P> {
        &self.own_public
    }

    /// Fingerprint of the ring's own identity.
    pub fn fingerprint(&self) -> &Fingerprint {
        self.own.fingerprint()
    }

    /// Whether `fingerprint` names a trusted peer.
    ///
    /// The ring's own key counts only if it was added as a peer.
    pub fn is_trusted(&self, fingerprint: &Fingerprint) -> bool {
        self.index.contains(fingerprint)
    }

    /// Trusted peers in insertion order.
    pub fn peers(&self) -> impl Iterator<Item = &PublicKey<P>> {
        self.peers.iter()
    }

    /// Keys a sealed payload is addressed to: the ring's own key, then every
    /// peer that is not the ring's own key.
    pub fn recipients(&self) -> impl Iterator<Item = &PublicKey<P>> {
        let own = self.own_public.fingerprint();
        std::iter::once(&self.own_public).chain(
            self.peers
                .iter()
                .filter(move |peer| peer.fingerprint() != own),
        )
    }

    /// Fingerprints of trusted peers in insertion order.
    pub fn peer_fingerprints(&self) -> impl Iterator<Item = &Fingerprint> {
        self.peers.iter().map(PublicKey::fingerprint)
    }

    /// Number of trusted peers.
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    /// Whether the ring has no trusted peers.
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    /// Backend used for every operation on this ring.
    pub fn backend(&self) -> &P {
        &self.backend
    }
}

impl<P: Primitives> std::fmt::Debug for Keyring<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keyring")
            .field("backend", &self.backend.name())
            .field("own", self.own.fingerprint())
            .field("peers", &self.peers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::primitives::Stub;
    use crate::error::{Error, KeyError};

    fn unlock(seed: &str) -> (PrivateKey<Stub>, String) {
        let (private, public) = Stub.keypair(seed, "pw");
        (PrivateKey::decrypt(&Stub, &private, "pw").unwrap(), public)
    }

    #[test]
    fn test_build_with_peers() {
        let (own, _) = unlock("alice");
        let (_, bob) = Stub.keypair("bob", "pw");
        let (_, carol) = Stub.keypair("carol", "pw");

        let ring = Keyring::build(Stub, own, [&bob, &carol]).unwrap();
        assert_eq!(ring.len(), 2);

        let bob_fp = PublicKey::parse(&Stub, &bob).unwrap().fingerprint().clone();
        assert!(ring.is_trusted(&bob_fp));
    }

    #[test]
    fn test_own_key_not_trusted_unless_added() {
        let (own, own_pub) = unlock("alice");
        let own_fp = own.fingerprint().clone();

        let ring = Keyring::build(Stub, own, Vec::<String>::new()).unwrap();
        assert!(ring.is_empty());
        assert!(!ring.is_trusted(&own_fp));

        let (own, _) = unlock("alice");
        let ring = Keyring::build(Stub, own, [own_pub]).unwrap();
        assert!(ring.is_trusted(&own_fp));
    }

    #[test]
    fn test_invalid_peer_fails_whole_build() {
        let (own, _) = unlock("alice");
        let (_, bob) = Stub.keypair("bob", "pw");

        let err = Keyring::build(Stub, own, [bob.as_str(), "not a key"]).unwrap_err();
        assert!(matches!(err, Error::Key(KeyError::Parse(_))));
    }

    #[test]
    fn test_duplicate_peers_first_wins() {
        let (own, _) = unlock("alice");
        let (_, bob) = Stub.keypair("bob", "pw");
        let (_, carol) = Stub.keypair("carol", "pw");

        let ring = Keyring::build(Stub, own, [&bob, &carol, &bob]).unwrap();
        assert_eq!(ring.len(), 2);

        let order: Vec<_> = ring.peer_fingerprints().cloned().collect();
        let bob_fp = PublicKey::parse(&Stub, &bob).unwrap().fingerprint().clone();
        assert_eq!(order[0], bob_fp);
    }

    #[test]
    fn test_recipients_skip_own_key_among_peers() {
        let (own, own_pub) = unlock("alice");
        let (_, bob) = Stub.keypair("bob", "pw");

        let ring = Keyring::build(Stub, own, [&own_pub]).unwrap();
        assert_eq!(ring.recipients().count(), 1);

        let (own, _) = unlock("alice");
        let ring = Keyring::build(Stub, own, [&own_pub, &bob]).unwrap();
        let recipients: Vec<_> = ring.recipients().map(PublicKey::fingerprint).collect();
        assert_eq!(recipients.len(), 2);
        assert_eq!(recipients[0], ring.fingerprint());

        let (own, _) = unlock("alice");
        let ring = Keyring::build(Stub, own, Vec::<String>::new()).unwrap();
        assert_eq!(ring.recipients().count(), 1);
    }
}
