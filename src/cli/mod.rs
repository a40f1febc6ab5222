//! Command-line interface.

pub mod certify;
pub mod completions;
pub mod fingerprint;
pub mod open;
pub mod output;
pub mod pair;
pub mod seal;
pub mod session;
pub mod trust;
pub mod verify;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::constants;
use crate::error::Result;

/// envring - verified secret delivery over OpenPGP keyrings.
#[derive(Parser)]
#[command(
    name = "envring",
    about = "Seal and open environment secrets for a trusted keyring",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the trust store
    #[arg(
        short,
        long,
        global = true,
        env = "ENVRING_CONFIG",
        default_value = constants::CONFIG_FILE
    )]
    pub config: PathBuf,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Decrypt a sealed payload and verify its signer
    Open {
        /// Sealed payload ("-" for stdin)
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Encrypt a payload to every trusted key and sign it
    Seal {
        /// Plaintext ("-" for stdin)
        file: PathBuf,
        /// Write the armored payload here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that one public key certifies another
    Certify {
        /// Public key that should carry the certification
        subject: PathBuf,
        /// Public key that made the certification
        certifier: PathBuf,
    },

    /// Check that a public key belongs to a private key
    Pair {
        /// Public key to check
        public: PathBuf,
        /// Private key (defaults to the configured identity)
        #[arg(long)]
        key: Option<PathBuf>,
    },

    /// Verify a cleartext-signed message
    Verify {
        /// Signed message ("-" for stdin)
        signed: PathBuf,
        /// Candidate signer public keys
        #[arg(long = "key", required = true)]
        keys: Vec<PathBuf>,
    },

    /// Print the fingerprint of a public key
    Fingerprint {
        /// Public key
        public: PathBuf,
    },

    /// Show which keys the trust store admits
    Trust {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a CLI command.
pub fn execute(cli: Cli) -> Result<()> {
    let config = cli.config;
    match cli.command {
        Command::Open { file, json } => open::execute(&config, &file, json),
        Command::Seal { file, output } => seal::execute(&config, &file, output.as_deref()),
        Command::Certify { subject, certifier } => certify::execute(&subject, &certifier),
        Command::Pair { public, key } => pair::execute(&config, &public, key.as_deref()),
        Command::Verify { signed, keys } => verify::execute(&signed, &keys),
        Command::Fingerprint { public } => fingerprint::execute(&public),
        Command::Trust { json } => trust::execute(&config, json),
        Command::Completions { shell } => completions::execute(shell),
    }
}
