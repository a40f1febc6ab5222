//! envring - verified secret delivery over OpenPGP keyrings.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use envring::cli::output;
use envring::cli::{execute, Cli};
use envring::core::constants;
use envring::error::{CipherError, ConfigError, Error, KeyError, TrustError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("envring=debug")
        } else {
            EnvFilter::new("envring=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli) {
        output::error(&e.to_string());
        if let Some(hint) = suggestion(&e) {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}

fn suggestion(e: &Error) -> Option<&'static str> {
    match e {
        Error::Config(ConfigError::NotFound(_)) => {
            Some("create envring.toml or pass --config <path>")
        }
        Error::Config(ConfigError::MissingPassphrase) => {
            Some("export ENVRING_PASSPHRASE or run from a terminal")
        }
        Error::Key(KeyError::Decryption(_)) => Some("check the passphrase for this key"),
        Error::Key(KeyError::IdentityMismatch { .. }) => {
            Some("identity.public_key must be exported from identity.private_key")
        }
        Error::Cipher(CipherError::UntrustedSigner { .. }) => {
            Some("run: envring trust to list trusted keys")
        }
        Error::Trust(TrustError::Certification { .. }) => {
            Some("ask the certifier to sign the key and export it again")
        }
        _ => None,
    }
}
