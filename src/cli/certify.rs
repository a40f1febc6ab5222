//! Certify command.

use std::path::Path;

use crate::cli::{output, session};
use crate::core::certify;
use crate::core::primitives::OpenPgp;
use crate::error::Result;

/// Check that `certifier` certified `subject`.
pub fn execute(subject: &Path, certifier: &Path) -> Result<()> {
    let subject_armored = session::read_input(subject)?;
    let certifier_armored = session::read_input(certifier)?;

    certify::verify_certification_armored(&OpenPgp, &subject_armored, &certifier_armored)?;

    output::success("certification verified");
    Ok(())
}
