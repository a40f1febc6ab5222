//! Shared command plumbing: input files, passphrase, and keyring assembly.

use std::io::{self, IsTerminal, Read};
use std::path::Path;

use dialoguer::Password;
use tracing::debug;
use zeroize::Zeroizing;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::constants;
use crate::core::keyring::Keyring;
use crate::core::loader::{PrivateKey, PublicKey};
use crate::core::primitives::OpenPgp;
use crate::core::trust::TrustGraph;
use crate::error::{ConfigError, Result};

/// Read a file, or stdin when `path` is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).map_err(|source| {
        ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        }
        .into()
    })
}

/// Parse an armored public key file.
pub fn public_key(path: &Path) -> Result<PublicKey<OpenPgp>> {
    PublicKey::parse(&OpenPgp, &read_input(path)?)
}

/// Passphrase from the environment, else an interactive prompt.
///
/// # Errors
///
/// Returns `ConfigError::MissingPassphrase` when neither is available.
pub fn passphrase() -> Result<Zeroizing<String>> {
    if let Ok(value) = std::env::var(constants::PASSPHRASE_ENV) {
        debug!("passphrase taken from environment");
        return Ok(Zeroizing::new(value));
    }

    if io::stdin().is_terminal() {
        let value = Password::new()
            .with_prompt("Private key passphrase")
            .interact()
            .map_err(|e| io::Error::other(e.to_string()))?;
        return Ok(Zeroizing::new(value));
    }

    Err(ConfigError::MissingPassphrase.into())
}

/// Unlock the configured identity.
pub fn identity(config: &Config) -> Result<PrivateKey<OpenPgp>> {
    let passphrase = passphrase()?;
    config.unlock_identity(&OpenPgp, &passphrase)
}

/// Build a keyring from the configured identity and every key the trust
/// walk admits. Rejected invites are reported and left out.
pub fn keyring(config_path: &Path) -> Result<Keyring<OpenPgp>> {
    let config = Config::load(config_path)?;
    let own = identity(&config)?;

    let resolution = TrustGraph::from_config(&OpenPgp, &config)?.resolve(&OpenPgp);
    for rejected in &resolution.rejected {
        output::warn(&format!("ignoring {}: {}", rejected.name, rejected.error));
    }

    Ok(Keyring::from_public_keys(
        OpenPgp,
        own,
        resolution.keys().cloned(),
    ))
}
