//! Core library components.
//!
//! Keyring construction, sealed messaging, certification checks, and the
//! trust store that feeds them. Nothing here prompts or prints.

pub mod certify;
pub mod config;
pub mod constants;
pub mod keyring;
pub mod loader;
pub mod primitives;
pub mod sealed;
pub mod trust;
pub mod types;
