//! Fingerprint command - print a public key's fingerprint.

use std::path::Path;

use crate::cli::{output, session};
use crate::error::Result;

/// Print the fingerprint of a public key.
pub fn execute(public: &Path) -> Result<()> {
    let key = session::public_key(public)?;
    output::data(key.fingerprint().as_str());
    Ok(())
}
