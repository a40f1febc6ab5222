//! Test fixtures and constants.
//!
//! Armored OpenPGP vectors under `tests/fixtures/`:
//!
//! - `owner.key.asc` / `owner.pub.asc`: the org owner's key pair
//! - `env.key.asc`: an environment key that `sealed.asc` is addressed to
//! - `sealed.asc`: encrypted to the environment key, signed by the owner
//! - `owner.signed.asc`: cleartext message signed by the owner
//! - `invitee.certified.pub.asc`: invitee public key certified by the owner
//! - `stranger.pub.asc`: a well-formed key unrelated to all of the above

use std::path::PathBuf;

/// Passphrase of `owner.key.asc`.
pub const OWNER_PASSPHRASE: &str = "passworded";

/// Passphrase of `env.key.asc`.
pub const ENV_PASSPHRASE: &str = "3e8DGyLtTuWLMxH2";

/// Fingerprint of the owner key.
pub const OWNER_FINGERPRINT: &str = "ad80ac3bcec7047db976a15a4dfbdf19118336b4";

/// Fingerprint of the certified invitee key.
pub const INVITEE_FINGERPRINT: &str = "ba420ae16a58122180d07a4a0aefb4207bfb0bf2";

/// Absolute path of a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Contents of a fixture file.
pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).expect("missing fixture")
}
