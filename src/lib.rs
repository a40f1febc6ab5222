//! envring - verified secret delivery over OpenPGP keyrings.
//!
//! A keyring pairs one unlocked private key with the public keys trusted to
//! sign for it. Payloads are sealed to the ring and signed by its owner;
//! opening one requires both a successful decryption and a signature from a
//! trusted peer. Certification checks let an already-trusted key vouch for
//! a new one, so invitees can be admitted without out-of-band key exchange.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface (feature "openpgp")
//! │   ├── open          # Decrypt and authenticate a payload
//! │   ├── seal          # Encrypt and sign to the keyring
//! │   ├── certify       # Single-hop certification check
//! │   ├── pair          # Public/private identity check
//! │   ├── verify        # Cleartext signature check
//! │   ├── fingerprint   # Print a key fingerprint
//! │   ├── trust         # Show the trust walk
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── primitives/   # Crypto backends
//!     │   ├── mod       # Primitives trait
//!     │   ├── openpgp   # rPGP implementation
//!     │   └── stub      # Deterministic test backend
//!     ├── loader        # Private/public key handles
//!     ├── keyring       # Self key plus trusted peers
//!     ├── sealed        # Encrypt, decrypt-and-verify
//!     ├── certify       # Certification and key-pair checks
//!     ├── config        # envring.toml trust store
//!     └── trust         # Multi-hop trust walk
//! ```
//!
//! # Example
//!
//! ```ignore
//! use envring::core::keyring::Keyring;
//! use envring::core::loader::PrivateKey;
//! use envring::core::primitives::OpenPgp;
//! use envring::core::sealed;
//!
//! let own = PrivateKey::decrypt(&OpenPgp, &armored_private, "passphrase")?;
//! let ring = Keyring::build(OpenPgp, own, [&owner_public])?;
//! let opened = sealed::decrypt_and_verify(&payload, &ring)?;
//! println!("signed by {}", opened.signer());
//! ```

#[cfg(feature = "openpgp")]
pub mod cli;
pub mod core;
pub mod error;
