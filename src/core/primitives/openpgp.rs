//! OpenPGP backend using rPGP.
//!
//! Private keys stay locked inside [`SignedSecretKey`]; the passphrase is
//! kept next to the key (zeroized on drop) and handed to rPGP per operation.

use pgp::composed::{
    CleartextSignedMessage, Deserializable, Message, MessageBuilder, SignedPublicKey,
    SignedPublicSubKey, SignedSecretKey,
};
use pgp::crypto::hash::HashAlgorithm;
use pgp::crypto::sym::SymmetricKeyAlgorithm;
use pgp::packet::{SignatureConfig, SignatureType};
use pgp::types::{KeyDetails, Password, PublicKeyTrait, Tag};
use rand::thread_rng;
use tracing::trace;
use zeroize::Zeroizing;

use super::{Primitives, Verified};
use crate::core::types::{Armored, Fingerprint};
use crate::error::{CipherError, KeyError, Result, TrustError};

/// rPGP-backed primitives.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenPgp;

/// Unlocked OpenPGP private key.
pub struct PgpSecret {
    key: SignedSecretKey,
    passphrase: Zeroizing<String>,
}

impl PgpSecret {
    fn password(&self) -> Password {
        Password::from(self.passphrase.as_str())
    }
}

fn fingerprint_of(key: &impl KeyDetails) -> Fingerprint {
    Fingerprint::from_bytes(key.fingerprint().as_bytes())
}

/// Subkey flagged for encryption, else the first subkey. `None` means the
/// primary key encrypts.
fn encryption_subkey(key: &SignedPublicKey) -> Option<&SignedPublicSubKey> {
    key.public_subkeys
        .iter()
        .find(|sub| {
            sub.signatures.iter().any(|sig| {
                let flags = sig.key_flags();
                flags.encrypt_comms() || flags.encrypt_storage()
            })
        })
        .or_else(|| key.public_subkeys.first())
}

/// Check the signatures a key makes over itself.
///
/// Every user ID needs at least one valid self-certification and every
/// subkey a valid binding. Certifications made by other keys are left alone
/// here; they are checked against their issuer by `verify_certification`.
fn verify_self_signatures(key: &SignedPublicKey) -> std::result::Result<(), String> {
    if key.details.users.is_empty() {
        return Err("key has no user ids".to_string());
    }

    for user in &key.details.users {
        let self_signed = user.signatures.iter().any(|sig| {
            sig.verify_certification(&key.primary_key, Tag::UserId, &user.id)
                .is_ok()
        });
        if !self_signed {
            return Err("user id has no valid self-signature".to_string());
        }
    }

    for sub in &key.public_subkeys {
        sub.verify(&key.primary_key)
            .map_err(|e| format!("invalid subkey binding: {}", e))?;
    }

    Ok(())
}

/// Whether any key of `cert` passes `check`.
fn any_key(cert: &SignedPublicKey, check: impl Fn(&dyn Verifier) -> bool) -> bool {
    check(&cert.primary_key) || cert.public_subkeys.iter().any(|sub| check(&sub.key))
}

/// Object-safe view over the signature checks a key takes part in.
trait Verifier {
    fn message(&self, message: &Message<'_>) -> bool;
    fn cleartext(&self, message: &CleartextSignedMessage) -> bool;
}

impl<K: PublicKeyTrait> Verifier for K {
    fn message(&self, message: &Message<'_>) -> bool {
        message.verify(self).is_ok()
    }

    fn cleartext(&self, message: &CleartextSignedMessage) -> bool {
        message.verify(self).is_ok()
    }
}

fn decrypt_error(e: impl std::fmt::Display) -> crate::error::Error {
    CipherError::DecryptionFailed(e.to_string()).into()
}

impl Primitives for OpenPgp {
    type Secret = PgpSecret;
    type Public = SignedPublicKey;

    fn name(&self) -> &'static str {
        "openpgp"
    }

    fn decrypt_private_key(&self, armored: &str, passphrase: &str) -> Result<PgpSecret> {
        let (key, _) = SignedSecretKey::from_string(armored.trim())
            .map_err(|e| KeyError::Decryption(e.to_string()))?;

        // A throwaway signature proves the passphrase unlocks the key.
        let password = Password::from(passphrase);
        SignatureConfig::from_key(thread_rng(), &key.primary_key, SignatureType::Binary)
            .and_then(|config| config.sign(&key.primary_key, &password, &b""[..]))
            .map_err(|e| KeyError::Decryption(format!("cannot unlock key: {}", e)))?;

        Ok(PgpSecret {
            key,
            passphrase: Zeroizing::new(passphrase.to_string()),
        })
    }

    fn parse_public_key(&self, armored: &str) -> Result<SignedPublicKey> {
        let (key, _) = SignedPublicKey::from_string(armored.trim())
            .map_err(|e| KeyError::Parse(e.to_string()))?;
        verify_self_signatures(&key).map_err(KeyError::Parse)?;
        Ok(key)
    }

    fn to_public(&self, secret: &PgpSecret) -> SignedPublicKey {
        SignedPublicKey::from(secret.key.clone())
    }

    fn public_fingerprint(&self, key: &SignedPublicKey) -> Fingerprint {
        fingerprint_of(key)
    }

    fn secret_fingerprint(&self, key: &PgpSecret) -> Fingerprint {
        fingerprint_of(&key.key.primary_key)
    }

    fn encrypt_and_sign(
        &self,
        plaintext: &[u8],
        recipients: &[&SignedPublicKey],
        signer: &PgpSecret,
    ) -> Result<Armored> {
        if recipients.is_empty() {
            return Err(CipherError::EncryptionFailed("no recipients".to_string()).into());
        }

        let mut rng = thread_rng();
        let mut builder = MessageBuilder::from_bytes("", plaintext.to_vec())
            .seipd_v1(&mut rng, SymmetricKeyAlgorithm::AES256);

        for recipient in recipients {
            match encryption_subkey(recipient) {
                Some(sub) => builder.encrypt_to_key(&mut rng, &sub.key),
                None => builder.encrypt_to_key(&mut rng, &recipient.primary_key),
            }
            .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;
        }

        builder.sign(&signer.key.primary_key, signer.password(), HashAlgorithm::Sha256);

        let armored = builder
            .to_armored_string(&mut rng, Default::default())
            .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;

        trace!(bytes = armored.len(), "openpgp message written");
        Ok(armored)
    }

    fn decrypt(
        &self,
        ciphertext: &str,
        key: &PgpSecret,
        candidates: &[&SignedPublicKey],
    ) -> Result<Verified> {
        let (message, _) =
            Message::from_armor(ciphertext.trim().as_bytes()).map_err(decrypt_error)?;
        let mut message = message
            .decrypt(&key.password(), &key.key)
            .map_err(decrypt_error)?;
        if message.is_compressed() {
            message = message.decompress().map_err(decrypt_error)?;
        }

        let plaintext = Zeroizing::new(message.as_data_vec().map_err(decrypt_error)?);

        let signer = candidates
            .iter()
            .find(|cert| any_key(cert, |k| k.message(&message)))
            .map(|cert| fingerprint_of(*cert));

        Ok(Verified { plaintext, signer })
    }

    fn verify_cleartext(&self, signed: &str, candidates: &[&SignedPublicKey]) -> Result<Verified> {
        let (message, _) = CleartextSignedMessage::from_string(signed.trim())
            .map_err(|e| CipherError::BadSignature(e.to_string()))?;

        let signer = candidates
            .iter()
            .find(|cert| any_key(cert, |k| k.cleartext(&message)))
            .map(|cert| fingerprint_of(*cert));

        Ok(Verified {
            plaintext: Zeroizing::new(message.signed_text().into_bytes()),
            signer,
        })
    }

    fn verify_certification(
        &self,
        subject: &SignedPublicKey,
        certifier: &SignedPublicKey,
    ) -> Result<()> {
        let certified = subject.details.users.iter().any(|user| {
            user.signatures.iter().any(|sig| {
                sig.verify_third_party_certification(
                    &subject.primary_key,
                    &certifier.primary_key,
                    Tag::UserId,
                    &user.id,
                )
                .is_ok()
            })
        });

        if certified {
            return Ok(());
        }

        Err(TrustError::Certification {
            subject: fingerprint_of(subject),
            certifier: fingerprint_of(certifier),
            reason: "no user id carries a valid certification from the certifier".to_string(),
        }
        .into())
    }
}
