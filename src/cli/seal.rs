//! Seal command.

use std::path::Path;

use zeroize::Zeroizing;

use crate::cli::{output, session};
use crate::core::sealed;
use crate::error::Result;

/// Encrypt a payload to the keyring and sign it.
pub fn execute(config: &Path, file: &Path, dest: Option<&Path>) -> Result<()> {
    let plaintext = Zeroizing::new(session::read_input(file)?);
    let ring = session::keyring(config)?;

    if ring.is_empty() {
        output::warn("no trusted peers; payload is addressed to you only");
    }

    let payload = sealed::encrypt(plaintext.as_bytes(), &ring)?;

    match dest {
        Some(path) => {
            std::fs::write(path, payload.as_str())?;
            output::success(&format!(
                "sealed for {} recipient(s) to {}",
                ring.recipients().count(),
                output::path(path)
            ));
        }
        None => print!("{}", payload),
    }
    Ok(())
}
