//! Hardening tests: malformed input and property checks.

mod support;

use envring::core::types::Fingerprint;
use proptest::prelude::*;

#[test]
fn test_fingerprint_rejects_non_hex() {
    assert!("zz".parse::<Fingerprint>().is_err());
    assert!("".parse::<Fingerprint>().is_err());
    assert!("abc".parse::<Fingerprint>().is_err());
}

#[cfg(feature = "openpgp")]
mod openpgp_inputs {
    use super::support::*;
    use envring::core::keyring::Keyring;
    use envring::core::loader::{decrypt_private_key, parse_public_key};
    use envring::core::primitives::OpenPgp;
    use envring::core::sealed::decrypt_and_verify;
    use envring::error::{Error, KeyError};
    use pgp::composed::{Deserializable, SignedPublicKey};

    #[test]
    fn test_truncated_payload_is_rejected() {
        let key = decrypt_private_key(&OpenPgp, &fixture("env.key.asc"), ENV_PASSPHRASE).unwrap();
        let ring = Keyring::build(OpenPgp, key, [fixture("owner.pub.asc")]).unwrap();

        let sealed = fixture("sealed.asc");
        let truncated = &sealed[..sealed.len() / 2];
        assert!(decrypt_and_verify(truncated, &ring).is_err());
    }

    #[test]
    fn test_private_key_is_not_a_public_key() {
        assert!(parse_public_key(&OpenPgp, &fixture("owner.key.asc")).is_err());
    }

    #[test]
    fn test_third_party_certification_does_not_block_parsing() {
        let key = parse_public_key(&OpenPgp, &fixture("invitee.certified.pub.asc")).unwrap();
        assert_eq!(key.fingerprint().as_str(), INVITEE_FINGERPRINT);
    }

    #[test]
    fn test_grafted_self_signature_is_rejected() {
        let (owner, _) = SignedPublicKey::from_string(&fixture("owner.pub.asc")).unwrap();
        let (mut stranger, _) =
            SignedPublicKey::from_string(&fixture("stranger.pub.asc")).unwrap();

        // stranger's user ids now only carry signatures made by the owner
        for user in &mut stranger.details.users {
            user.signatures = owner.details.users[0].signatures.clone();
        }
        let armored = stranger.to_armored_string(Default::default()).unwrap();

        let err = parse_public_key(&OpenPgp, &armored).unwrap_err();
        assert!(matches!(err, Error::Key(KeyError::Parse(_))));
    }

    #[test]
    fn test_stripped_self_signature_is_rejected() {
        let (mut owner, _) = SignedPublicKey::from_string(&fixture("owner.pub.asc")).unwrap();
        for user in &mut owner.details.users {
            user.signatures.clear();
        }
        let armored = owner.to_armored_string(Default::default()).unwrap();

        let err = parse_public_key(&OpenPgp, &armored).unwrap_err();
        assert!(matches!(err, Error::Key(KeyError::Parse(_))));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(parse_public_key(&OpenPgp, "").is_err());
        assert!(decrypt_private_key(&OpenPgp, "", "").is_err());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn fingerprint_normalizes_case_and_separators(bytes in proptest::collection::vec(any::<u8>(), 1..32)) {
        let lower = hex::encode(&bytes);
        let spaced = lower
            .to_uppercase()
            .as_bytes()
            .chunks(4)
            .map(|c| std::str::from_utf8(c).unwrap())
            .collect::<Vec<_>>()
            .join(" ");

        let a: Fingerprint = lower.parse().unwrap();
        let b: Fingerprint = spaced.parse().unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a, Fingerprint::from_bytes(&bytes));
    }

    #[test]
    fn arbitrary_text_never_panics_as_key(text in "\\PC{0,200}") {
        let _ = text.parse::<Fingerprint>();
        #[cfg(feature = "openpgp")]
        {
            use envring::core::loader::parse_public_key;
            use envring::core::primitives::OpenPgp;
            let _ = parse_public_key(&OpenPgp, &text);
        }
    }
}
