//! Verify command.

use std::path::{Path, PathBuf};

use crate::cli::{output, session};
use crate::core::primitives::OpenPgp;
use crate::core::sealed;
use crate::error::Result;

/// Verify a cleartext-signed message against candidate keys.
pub fn execute(signed: &Path, keys: &[PathBuf]) -> Result<()> {
    let message = session::read_input(signed)?;
    let candidates = keys
        .iter()
        .map(|path| session::public_key(path))
        .collect::<Result<Vec<_>>>()?;

    let verified = sealed::verify_signed_cleartext(&OpenPgp, &message, &candidates)?;

    output::data(&String::from_utf8_lossy(verified.plaintext()));
    output::success(&format!(
        "good signature from {}",
        output::fingerprint(verified.signer())
    ));
    Ok(())
}
