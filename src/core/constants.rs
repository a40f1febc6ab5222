//! Constants used throughout envring.
//!
//! Centralizes magic strings and configuration values.

/// Default trust-store file name.
pub const CONFIG_FILE: &str = "envring.toml";

/// Environment variable holding the private key passphrase.
pub const PASSPHRASE_ENV: &str = "ENVRING_PASSPHRASE";

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV: &str = "ENVRING_LOG";
