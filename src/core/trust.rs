//! Multi-hop trust resolution.
//!
//! Peers from the trust store are roots. An invite becomes trusted once the
//! key that certified it is trusted and a single-hop certification check
//! passes. The walk repeats until nothing changes, so invites may be listed
//! in any order and chains of any depth resolve.

use serde::Serialize;
use tracing::{debug, warn};

use crate::core::certify::verify_certification;
use crate::core::config::Config;
use crate::core::loader::PublicKey;
use crate::core::primitives::Primitives;
use crate::core::types::Fingerprint;
use crate::error::{Result, TrustError};

/// A key waiting on its certifier.
struct Invite<P: Primitives> {
    name: String,
    key: PublicKey<P>,
    certified_by: String,
}

/// Directed certification graph over named public keys.
pub struct TrustGraph<P: Primitives> {
    roots: Vec<(String, PublicKey<P>)>,
    invites: Vec<Invite<P>>,
}

/// A key the walk admitted.
#[derive(Debug)]
pub struct Admitted<P: Primitives> {
    pub name: String,
    pub key: PublicKey<P>,
    /// Names from a root down to this key.
    pub path: Vec<String>,
}

/// A key the walk refused.
#[derive(Debug)]
pub struct Rejected {
    pub name: String,
    pub error: TrustError,
}

/// Outcome of [`TrustGraph::resolve`].
#[derive(Debug)]
pub struct Resolution<P: Primitives> {
    pub admitted: Vec<Admitted<P>>,
    pub rejected: Vec<Rejected>,
}

impl<P: Primitives> Default for TrustGraph<P> {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            invites: Vec::new(),
        }
    }
}

impl<P: Primitives> TrustGraph<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directly trusted key.
    pub fn root(&mut self, name: impl Into<String>, key: PublicKey<P>) -> &mut Self {
        self.roots.push((name.into(), key));
        self
    }

    /// Add a key that `certified_by` must have certified.
    pub fn invite(
        &mut self,
        name: impl Into<String>,
        key: PublicKey<P>,
        certified_by: impl Into<String>,
    ) -> &mut Self {
        self.invites.push(Invite {
            name: name.into(),
            key,
            certified_by: certified_by.into(),
        });
        self
    }

    /// Build the graph from a trust store, reading and parsing every key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` or `KeyError::Parse` for the first key
    /// that cannot be loaded.
    pub fn from_config(backend: &P, config: &Config) -> Result<Self> {
        let mut graph = Self::new();
        for (name, path) in &config.peers {
            let key = PublicKey::parse(backend, &config.read_key(path)?)?;
            graph.root(name, key);
        }
        for (name, invite) in &config.invites {
            let key = PublicKey::parse(backend, &config.read_key(&invite.key)?)?;
            graph.invite(name, key, &invite.certified_by);
        }
        Ok(graph)
    }

    /// Walk certifications outward from the roots.
    ///
    /// Invites whose certification does not verify are rejected with
    /// `TrustError::Certification`. Invites whose certifier never becomes
    /// trusted (missing, rejected, or part of a cycle) are rejected with
    /// `TrustError::Unreachable`.
    pub fn resolve(self, backend: &P) -> Resolution<P> {
        let mut admitted: Vec<Admitted<P>> = self
            .roots
            .into_iter()
            .map(|(name, key)| Admitted {
                path: vec![name.clone()],
                name,
                key,
            })
            .collect();
        let mut rejected = Vec::new();
        let mut pending = self.invites;

        loop {
            let mut progressed = false;
            let mut waiting = Vec::new();

            for invite in pending {
                let Some(certifier) = admitted.iter().find(|a| a.name == invite.certified_by)
                else {
                    waiting.push(invite);
                    continue;
                };

                match verify_certification(backend, &invite.key, &certifier.key) {
                    Ok(()) => {
                        let mut path = certifier.path.clone();
                        path.push(invite.name.clone());
                        debug!(name = %invite.name, path = %path.join(" -> "), "invite admitted");
                        admitted.push(Admitted {
                            name: invite.name,
                            key: invite.key,
                            path,
                        });
                    }
                    Err(crate::error::Error::Trust(error)) => {
                        warn!(name = %invite.name, %error, "invite rejected");
                        rejected.push(Rejected {
                            name: invite.name,
                            error,
                        });
                    }
                    Err(other) => {
                        warn!(name = %invite.name, error = %other, "invite rejected");
                        rejected.push(Rejected {
                            error: TrustError::Certification {
                                subject: invite.key.fingerprint().clone(),
                                certifier: certifier.key.fingerprint().clone(),
                                reason: other.to_string(),
                            },
                            name: invite.name,
                        });
                    }
                }
                progressed = true;
            }

            pending = waiting;
            if !progressed || pending.is_empty() {
                break;
            }
        }

        for invite in pending {
            warn!(name = %invite.name, certifier = %invite.certified_by, "invite unreachable");
            rejected.push(Rejected {
                error: TrustError::Unreachable {
                    name: invite.name.clone(),
                    certifier: invite.certified_by,
                },
                name: invite.name,
            });
        }

        Resolution { admitted, rejected }
    }
}

impl<P: Primitives> Resolution<P> {
    /// Public keys of every admitted entry, roots first.
    pub fn keys(&self) -> impl Iterator<Item = &PublicKey<P>> {
        self.admitted.iter().map(|a| &a.key)
    }

    /// Serializable summary for display.
    pub fn report(&self) -> Report {
        Report {
            admitted: self
                .admitted
                .iter()
                .map(|a| AdmittedEntry {
                    name: a.name.clone(),
                    fingerprint: a.key.fingerprint().clone(),
                    path: a.path.clone(),
                })
                .collect(),
            rejected: self
                .rejected
                .iter()
                .map(|r| RejectedEntry {
                    name: r.name.clone(),
                    reason: r.error.to_string(),
                })
                .collect(),
        }
    }
}

/// Display form of a [`Resolution`].
#[derive(Debug, Serialize)]
pub struct Report {
    pub admitted: Vec<AdmittedEntry>,
    pub rejected: Vec<RejectedEntry>,
}

#[derive(Debug, Serialize)]
pub struct AdmittedEntry {
    pub name: String,
    pub fingerprint: Fingerprint,
    pub path: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RejectedEntry {
    pub name: String,
    pub reason: String,
}
