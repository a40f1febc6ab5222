//! Trust-store configuration.
//!
//! Handles reading and validating `envring.toml`, which names the local
//! identity, the directly trusted peers, and invites that must be vouched
//! for by an already-trusted key.
//!
//! ```toml
//! [identity]
//! private_key = "keys/me.asc"
//! public_key = "keys/me.pub.asc"
//!
//! [peers]
//! owner = "keys/owner.asc"
//!
//! [invites.dana]
//! key = "keys/dana.asc"
//! certified_by = "owner"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::certify::verify_key_pair_identity;
use crate::core::loader::{PrivateKey, PublicKey};
use crate::core::primitives::Primitives;
use crate::error::{ConfigError, Result};

/// Trust store stored in `envring.toml`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Local identity
    pub identity: IdentityConfig,
    /// Directly trusted public keys by name
    #[serde(default)]
    pub peers: BTreeMap<String, PathBuf>,
    /// Keys admitted only through a certification
    #[serde(default)]
    pub invites: BTreeMap<String, InviteConfig>,
    /// Directory relative paths resolve against
    #[serde(skip)]
    base: PathBuf,
}

/// The `[identity]` section.
#[derive(Debug, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Passphrase-protected armored private key
    pub private_key: PathBuf,
    /// Armored public key expected to match `private_key`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<PathBuf>,
}

/// One `[invites.<name>]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteConfig {
    /// Armored public key of the invitee
    pub key: PathBuf,
    /// Name of the peer or invite that certified `key`
    pub certified_by: String,
}

impl Config {
    /// Load and validate a trust store.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file doesn't exist,
    /// `ConfigError::Parse` if the TOML is malformed, or
    /// `ConfigError::InvalidValue` if validation fails.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }
        let contents = read(path)?;
        let base = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Self::parse(&contents, base)
    }

    /// Parse and validate trust-store TOML, resolving paths against `base`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` or `ConfigError::InvalidValue`.
    pub fn parse(contents: &str, base: impl Into<PathBuf>) -> Result<Self> {
        let mut config: Self = toml::from_str(contents).map_err(ConfigError::Parse)?;
        config.base = base.into();

        debug!(
            peers = config.peers.len(),
            invites = config.invites.len(),
            "config loaded"
        );

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration structure.
    ///
    /// Checks:
    /// - The identity names a private key
    /// - No name is used by both a peer and an invite
    /// - Every `certified_by` names a known peer or another invite
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` on the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.identity.private_key.as_os_str().is_empty() {
            return Err(invalid("identity.private_key", "path is empty"));
        }

        for name in self.invites.keys() {
            if self.peers.contains_key(name) {
                return Err(invalid(
                    "invites",
                    format!("'{}' is declared both as a peer and as an invite", name),
                ));
            }
        }

        let known: HashSet<&str> = self
            .peers
            .keys()
            .chain(self.invites.keys())
            .map(String::as_str)
            .collect();

        for (name, invite) in &self.invites {
            if invite.certified_by == *name {
                return Err(invalid(
                    "invites",
                    format!("'{}' cannot certify itself", name),
                ));
            }
            if !known.contains(invite.certified_by.as_str()) {
                return Err(invalid(
                    "invites",
                    format!(
                        "'{}' is certified by unknown key '{}'",
                        name, invite.certified_by
                    ),
                ));
            }
        }

        Ok(())
    }

    /// Resolve a configured path against the config file's directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base.join(path)
        }
    }

    /// Read an armored key file named in the config.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if the file cannot be read.
    pub fn read_key(&self, path: &Path) -> Result<String> {
        read(&self.resolve(path))
    }

    /// Armored private key of the local identity.
    pub fn private_key_armored(&self) -> Result<String> {
        self.read_key(&self.identity.private_key)
    }

    /// Unlock the local identity.
    ///
    /// When `identity.public_key` is set, the unlocked key must match it.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Decryption` on a wrong passphrase, or
    /// `KeyError::IdentityMismatch` if the configured public key belongs to a
    /// different identity.
    pub fn unlock_identity<P: Primitives>(
        &self,
        backend: &P,
        passphrase: &str,
    ) -> Result<PrivateKey<P>> {
        let armored = zeroize::Zeroizing::new(self.private_key_armored()?);
        let private = PrivateKey::decrypt(backend, &armored, passphrase)?;

        if let Some(path) = &self.identity.public_key {
            let public = PublicKey::parse(backend, &self.read_key(path)?)?;
            verify_key_pair_identity(&public, &private)?;
            debug!(fingerprint = %private.fingerprint(), "identity matches public key");
        }

        Ok(private)
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| {
        ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        }
        .into()
    })
}

fn invalid(field: &'static str, reason: impl Into<String>) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
    .into()
}
