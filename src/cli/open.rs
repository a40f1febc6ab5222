//! Open command.
//!
//! Decrypts a sealed payload and prints it only if a trusted key signed it.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::cli::{output, session};
use crate::core::sealed;
use crate::error::Result;

#[derive(Serialize)]
struct Opened<'a> {
    signer: &'a str,
    plaintext: String,
}

/// Open a sealed payload.
pub fn execute(config: &Path, file: &Path, json: bool) -> Result<()> {
    let ciphertext = session::read_input(file)?;
    let ring = session::keyring(config)?;
    let opened = sealed::decrypt_and_verify(&ciphertext, &ring)?;

    if json {
        let body = Opened {
            signer: opened.signer().as_str(),
            plaintext: String::from_utf8_lossy(opened.plaintext()).into_owned(),
        };
        output::data(&serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    std::io::stdout().write_all(opened.plaintext())?;
    output::success(&format!(
        "signed by {}",
        output::fingerprint(opened.signer())
    ));
    Ok(())
}
