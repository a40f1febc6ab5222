//! Stub primitive backend for testing.
//!
//! Uses SHA-256 digests with hex framing. NOT cryptographically secure: the
//! "signatures" are computed from public material and the "encryption" is
//! plain hex. It exists to exercise keyring, sealing, and certification
//! policy with deterministic fixtures and no OpenPGP dependency.
//!
//! Block layout:
//!
//! ```text
//! -----BEGIN STUB PUBLIC KEY-----
//! material: <hex>
//! uid: <text>
//! cert: <certifier fingerprint> <hex digest>
//! -----END STUB PUBLIC KEY-----
//! ```

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::{Primitives, Verified};
use crate::core::types::{Armored, Fingerprint};
use crate::error::{CipherError, KeyError, Result, TrustError};

const PRIVATE_LABEL: &str = "STUB PRIVATE KEY";
const PUBLIC_LABEL: &str = "STUB PUBLIC KEY";
const MESSAGE_LABEL: &str = "STUB MESSAGE";
const SIGNED_LABEL: &str = "STUB SIGNED MESSAGE";

/// Deterministic fixture backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stub;

/// Parsed stub public key.
#[derive(Debug, Clone)]
pub struct StubPublic {
    material: Vec<u8>,
    uid: String,
    certs: Vec<(String, String)>,
}

/// Unlocked stub private key.
pub struct StubSecret {
    material: Zeroizing<Vec<u8>>,
    uid: String,
}

fn digest(domain: &str, parts: &[&[u8]]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(domain.as_bytes());
    for part in parts {
        hasher.update((part.len() as u64).to_be_bytes());
        hasher.update(part);
    }
    hasher.finalize().to_vec()
}

fn fingerprint_of(material: &[u8]) -> Fingerprint {
    Fingerprint::from_bytes(&digest("fpr", &[material])[..20])
}

fn lock_of(passphrase: &str, material: &[u8]) -> String {
    hex::encode(digest("lock", &[passphrase.as_bytes(), material]))
}

fn cert_of(certifier: &[u8], subject: &[u8], uid: &str) -> String {
    hex::encode(digest("cert", &[certifier, subject, uid.as_bytes()]))
}

fn sig_of(signer: &[u8], payload: &[u8]) -> String {
    hex::encode(digest("sig", &[signer, payload]))
}

/// Split an armored stub block into its `name: value` fields.
fn fields<'a>(armored: &'a str, label: &str) -> Option<Vec<(&'a str, &'a str)>> {
    let mut lines = armored.trim().lines().map(str::trim);
    if lines.next()? != format!("-----BEGIN {}-----", label) {
        return None;
    }

    let mut out = Vec::new();
    for line in lines {
        if line == format!("-----END {}-----", label) {
            return Some(out);
        }
        let (name, value) = line.split_once(':')?;
        out.push((name.trim(), value.trim()));
    }
    None
}

fn field<'a>(fields: &[(&'a str, &'a str)], name: &str) -> Option<&'a str> {
    fields.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
}

fn render(label: &str, fields: &[(&str, String)]) -> Armored {
    let mut out = format!("-----BEGIN {}-----\n", label);
    for (name, value) in fields {
        out.push_str(&format!("{}: {}\n", name, value));
    }
    out.push_str(&format!("-----END {}-----\n", label));
    out
}

impl StubPublic {
    fn render(&self) -> Armored {
        let mut lines = vec![
            ("material", hex::encode(&self.material)),
            ("uid", self.uid.clone()),
        ];
        for (certifier, sig) in &self.certs {
            lines.push(("cert", format!("{} {}", certifier, sig)));
        }
        render(PUBLIC_LABEL, &lines)
    }
}

impl Stub {
    /// Mint an armored (private, public) fixture pair from a seed.
    pub fn keypair(&self, seed: &str, passphrase: &str) -> (Armored, Armored) {
        let material = digest("seed", &[seed.as_bytes()]);
        let private = render(
            PRIVATE_LABEL,
            &[
                ("material", hex::encode(&material)),
                ("uid", seed.to_string()),
                ("lock", lock_of(passphrase, &material)),
            ],
        );
        let public = StubPublic {
            material,
            uid: seed.to_string(),
            certs: Vec::new(),
        }
        .render();
        (private, public)
    }

    /// Attach a certification by `certifier` to `subject`, returning the new
    /// armored public key.
    pub fn certify(&self, subject: &StubPublic, certifier: &StubSecret) -> Armored {
        let mut certified = subject.clone();
        certified.certs.push((
            fingerprint_of(&certifier.material).to_string(),
            cert_of(&certifier.material, &subject.material, &subject.uid),
        ));
        certified.render()
    }

    /// Produce a cleartext-signed block.
    pub fn clearsign(&self, text: &[u8], signer: &StubSecret) -> Armored {
        render(
            SIGNED_LABEL,
            &[
                ("from", fingerprint_of(&signer.material).to_string()),
                ("sig", sig_of(&signer.material, text)),
                ("data", hex::encode(text)),
            ],
        )
    }

    fn check_signature(
        &self,
        fields: &[(&str, &str)],
        payload: &[u8],
        candidates: &[&StubPublic],
    ) -> Option<Fingerprint> {
        let from = field(fields, "from")?;
        let sig = field(fields, "sig")?;
        candidates.iter().find_map(|c| {
            let fp = fingerprint_of(&c.material);
            (fp.as_str() == from && sig_of(&c.material, payload) == sig).then_some(fp)
        })
    }
}

impl Primitives for Stub {
    type Secret = StubSecret;
    type Public = StubPublic;

    fn name(&self) -> &'static str {
        "stub"
    }

    fn decrypt_private_key(&self, armored: &str, passphrase: &str) -> Result<StubSecret> {
        let fields = fields(armored, PRIVATE_LABEL)
            .ok_or_else(|| KeyError::Decryption("not a stub private key block".to_string()))?;

        let material = field(&fields, "material")
            .and_then(|m| hex::decode(m).ok())
            .ok_or_else(|| KeyError::Decryption("missing key material".to_string()))?;
        let uid = field(&fields, "uid").unwrap_or_default().to_string();
        let lock = field(&fields, "lock").unwrap_or_default();

        if lock != lock_of(passphrase, &material) {
            return Err(KeyError::Decryption("incorrect passphrase".to_string()).into());
        }

        Ok(StubSecret {
            material: Zeroizing::new(material),
            uid,
        })
    }

    fn parse_public_key(&self, armored: &str) -> Result<StubPublic> {
        let fields = fields(armored, PUBLIC_LABEL)
            .ok_or_else(|| KeyError::Parse("not a stub public key block".to_string()))?;

        let material = field(&fields, "material")
            .and_then(|m| hex::decode(m).ok())
            .ok_or_else(|| KeyError::Parse("missing key material".to_string()))?;
        let uid = field(&fields, "uid").unwrap_or_default().to_string();

        let mut certs = Vec::new();
        for (_, value) in fields.iter().filter(|(n, _)| *n == "cert") {
            let (certifier, sig) = value
                .split_once(' ')
                .ok_or_else(|| KeyError::Parse(format!("malformed cert line: {}", value)))?;
            certs.push((certifier.to_string(), sig.to_string()));
        }

        Ok(StubPublic {
            material,
            uid,
            certs,
        })
    }

    fn to_public(&self, secret: &StubSecret) -> StubPublic {
        StubPublic {
            material: secret.material.to_vec(),
            uid: secret.uid.clone(),
            certs: Vec::new(),
        }
    }

    fn public_fingerprint(&self, key: &StubPublic) -> Fingerprint {
        fingerprint_of(&key.material)
    }

    fn secret_fingerprint(&self, key: &StubSecret) -> Fingerprint {
        fingerprint_of(&key.material)
    }

    fn encrypt_and_sign(
        &self,
        plaintext: &[u8],
        recipients: &[&StubPublic],
        signer: &StubSecret,
    ) -> Result<Armored> {
        if recipients.is_empty() {
            return Err(CipherError::EncryptionFailed("no recipients".to_string()).into());
        }

        let mut lines: Vec<(&str, String)> = recipients
            .iter()
            .map(|r| ("to", fingerprint_of(&r.material).to_string()))
            .collect();
        lines.push(("from", fingerprint_of(&signer.material).to_string()));
        lines.push(("sig", sig_of(&signer.material, plaintext)));
        lines.push(("data", hex::encode(plaintext)));

        Ok(render(MESSAGE_LABEL, &lines))
    }

    fn decrypt(
        &self,
        ciphertext: &str,
        key: &StubSecret,
        candidates: &[&StubPublic],
    ) -> Result<Verified> {
        let fields = fields(ciphertext, MESSAGE_LABEL)
            .ok_or_else(|| CipherError::DecryptionFailed("not a stub message".to_string()))?;

        let own = fingerprint_of(&key.material).to_string();
        if !fields.iter().any(|(n, v)| *n == "to" && *v == own) {
            return Err(
                CipherError::DecryptionFailed("no recipient matches this key".to_string()).into(),
            );
        }

        let payload = field(&fields, "data")
            .and_then(|d| hex::decode(d).ok())
            .ok_or_else(|| CipherError::DecryptionFailed("corrupt payload".to_string()))?;

        let signer = self.check_signature(&fields, &payload, candidates);
        Ok(Verified {
            plaintext: Zeroizing::new(payload),
            signer,
        })
    }

    fn verify_cleartext(&self, signed: &str, candidates: &[&StubPublic]) -> Result<Verified> {
        let fields = fields(signed, SIGNED_LABEL)
            .ok_or_else(|| CipherError::BadSignature("not a stub signed message".to_string()))?;

        let text = field(&fields, "data")
            .and_then(|d| hex::decode(d).ok())
            .ok_or_else(|| CipherError::BadSignature("corrupt signed text".to_string()))?;

        let signer = self.check_signature(&fields, &text, candidates);
        Ok(Verified {
            plaintext: Zeroizing::new(text),
            signer,
        })
    }

    fn verify_certification(&self, subject: &StubPublic, certifier: &StubPublic) -> Result<()> {
        let certifier_fp = fingerprint_of(&certifier.material);
        let expected = cert_of(&certifier.material, &subject.material, &subject.uid);

        let found = subject
            .certs
            .iter()
            .any(|(by, sig)| by == certifier_fp.as_str() && *sig == expected);

        if found {
            return Ok(());
        }

        let reason = if subject.certs.is_empty() {
            "key carries no certifications".to_string()
        } else {
            "no certification verifies under the certifier's key".to_string()
        };
        Err(TrustError::Certification {
            subject: fingerprint_of(&subject.material),
            certifier: certifier_fp,
            reason,
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypair_unlocks_with_its_passphrase() {
        let stub = Stub;
        let (private, public) = stub.keypair("alice", "hunter2");

        let secret = stub.decrypt_private_key(&private, "hunter2").unwrap();
        let parsed = stub.parse_public_key(&public).unwrap();
        assert_eq!(
            stub.secret_fingerprint(&secret),
            stub.public_fingerprint(&parsed)
        );
    }

    #[test]
    fn test_wrong_passphrase_rejected() {
        let stub = Stub;
        let (private, _) = stub.keypair("alice", "hunter2");
        assert!(stub.decrypt_private_key(&private, "hunter3").is_err());
    }

    #[test]
    fn test_public_block_is_not_a_private_key() {
        let stub = Stub;
        let (_, public) = stub.keypair("alice", "pw");
        assert!(stub.decrypt_private_key(&public, "pw").is_err());
        assert!(stub.parse_public_key("garbage").is_err());
    }

    #[test]
    fn test_message_for_other_key_fails() {
        let stub = Stub;
        let (a_priv, _) = stub.keypair("alice", "pw");
        let (b_priv, b_pub) = stub.keypair("bob", "pw");
        let alice = stub.decrypt_private_key(&a_priv, "pw").unwrap();
        let bob = stub.decrypt_private_key(&b_priv, "pw").unwrap();
        let bob_pub = stub.parse_public_key(&b_pub).unwrap();

        let ct = stub.encrypt_and_sign(b"hi", &[&bob_pub], &bob).unwrap();
        assert!(stub.decrypt(&ct, &alice, &[]).is_err());
        let opened = stub.decrypt(&ct, &bob, &[&bob_pub]).unwrap();
        assert_eq!(opened.plaintext.as_slice(), b"hi");
        assert_eq!(opened.signer, Some(stub.public_fingerprint(&bob_pub)));
    }
}
