//! Error types.
//!
//! Each concern gets its own enum; all of them fold into [`Error`] so callers
//! can use `?` across layers and still match on the specific failure.

use thiserror::Error;

use crate::core::types::Fingerprint;

/// Key loading and identity failures.
#[derive(Error, Debug)]
pub enum KeyError {
    /// Armored block is malformed or is not a public key.
    #[error("invalid public key: {0}")]
    Parse(String),

    /// Wrong passphrase, or the block is not a usable private key.
    #[error("cannot unlock private key: {0}")]
    Decryption(String),

    /// Public and private key describe different identities.
    #[error("public key {public} does not belong to private key {private}")]
    IdentityMismatch {
        public: Fingerprint,
        private: Fingerprint,
    },
}

/// Sealing and opening failures.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    /// Ciphertext cannot be opened with the ring's private key.
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    /// Payload opened, but no trusted peer signed it.
    #[error("{}", untrusted_message(.signer))]
    UntrustedSigner { signer: Option<Fingerprint> },

    /// Signed message did not verify under any candidate key.
    #[error("bad signature: {0}")]
    BadSignature(String),
}

fn untrusted_message(signer: &Option<Fingerprint>) -> String {
    match signer {
        Some(fp) => format!("payload signed by untrusted key {}", fp),
        None => "payload is not signed by a trusted peer".to_string(),
    }
}

/// Certification and trust-walk failures.
#[derive(Error, Debug)]
pub enum TrustError {
    /// No valid certification of `subject` by `certifier`.
    #[error("{subject} is not certified by {certifier}: {reason}")]
    Certification {
        subject: Fingerprint,
        certifier: Fingerprint,
        reason: String,
    },

    /// Invite whose certifier never became trusted.
    #[error("{name} is unreachable: certifier '{certifier}' is not trusted")]
    Unreachable { name: String, certifier: String },
}

/// Trust-store configuration failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config not found: {0}")]
    NotFound(String),

    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("no passphrase available: set ENVRING_PASSPHRASE or run interactively")]
    MissingPassphrase,
}

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Trust(#[from] TrustError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
