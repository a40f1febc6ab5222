//! Value types shared across the core.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An armored key or message block, exactly as produced by the primitive layer.
pub type Armored = String;

/// Content-derived key identifier.
///
/// Always stored as lowercase hex with no separators, so two fingerprints
/// compare equal regardless of how they were written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Build a fingerprint from raw digest bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(hex::encode(bytes))
    }

    /// Normalized hex form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last 16 hex digits, the conventional long key ID.
    pub fn key_id(&self) -> &str {
        let start = self.0.len().saturating_sub(16);
        &self.0[start..]
    }
}

impl FromStr for Fingerprint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ':')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        if normalized.is_empty() {
            return Err("empty fingerprint".to_string());
        }
        if normalized.len() % 2 != 0 || !normalized.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("not a hex fingerprint: {}", s));
        }

        Ok(Self(normalized))
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Fingerprint> for String {
    fn from(fp: Fingerprint) -> Self {
        fp.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
