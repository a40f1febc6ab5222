//! Pair command.
//!
//! Checks that a public key and a private key describe the same identity.

use std::path::Path;

use crate::cli::{output, session};
use crate::core::certify::verify_key_pair_identity;
use crate::core::config::Config;
use crate::core::loader::PrivateKey;
use crate::core::primitives::OpenPgp;
use crate::error::Result;

/// Compare a public key against a private key.
pub fn execute(config: &Path, public: &Path, key: Option<&Path>) -> Result<()> {
    let public = session::public_key(public)?;

    let private = match key {
        Some(path) => {
            let armored = zeroize::Zeroizing::new(session::read_input(path)?);
            let passphrase = session::passphrase()?;
            PrivateKey::decrypt(&OpenPgp, &armored, &passphrase)?
        }
        None => session::identity(&Config::load(config)?)?,
    };

    verify_key_pair_identity(&public, &private)?;

    output::success(&format!(
        "key pair matches {}",
        output::fingerprint(private.fingerprint())
    ));
    Ok(())
}
