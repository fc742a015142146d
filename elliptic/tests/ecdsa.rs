//! ECDSA and ECDH tests.

use elliptic::{
    BigInt, ByteSource, CurveName, Ec, Error, HashAlgorithm, KeyPairOptions, SignOptions,
    Signature, Validation,
};
use hex_literal::hex;
use proptest::prelude::*;

fn int(bytes: &[u8]) -> BigInt {
    BigInt::from_be_bytes(bytes)
}

fn msg_0_to_10() -> Vec<u8> {
    (0u8..=10).collect()
}

#[test]
fn secp256k1_deterministic_signature() {
    let ec = Ec::new(CurveName::Secp256k1).unwrap();
    let key = ec.key_from_private(&[0x02u8]).unwrap();
    let msg = msg_0_to_10();

    assert_eq!(
        key.encode_public(false).unwrap()[1..],
        hex!(
            "c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5"
            "1ae168fea63dc339a3c58419466ceaeef7f632653266d0e1236431a950cfe52a"
        )
    );

    let sig = key.sign(&msg, &SignOptions::default()).unwrap();
    assert_eq!(
        sig.r(),
        &int(&hex!("ead9545f77a20c4230e2a61d0a7a043e69a6998b77a23348bd6caa6f0c4b1680"))
    );
    assert_eq!(
        sig.s(),
        &int(&hex!("e981b8856abedc3a80889a24993de9bae1d591b6b89422453017b84ab2dd7a5c"))
    );
    assert_eq!(sig.recovery_param(), Some(0));
    assert!(key.verify(&msg, &sig));

    // Signing is deterministic.
    assert_eq!(key.sign(&msg, &SignOptions::default()).unwrap(), sig);
}

#[test]
fn canonical_signature_is_low_s() {
    let ec = Ec::new(CurveName::Secp256k1).unwrap();
    let key = ec.key_from_private(&[0x02u8]).unwrap();
    let msg = msg_0_to_10();

    let opts = SignOptions {
        canonical: true,
        ..Default::default()
    };
    let sig = key.sign(&msg, &opts).unwrap();
    assert_eq!(
        sig.s(),
        &int(&hex!("167e477a954123c57f7765db66c21643d8d94b2ff6b47df68fbaa6421d58c6e5"))
    );
    assert!(sig.s() <= &(ec.n() >> 1));
    assert_eq!(sig.recovery_param(), Some(1));
    assert!(key.verify(&msg, &sig));

    let recovered = ec.recover_public_key(&msg, &sig, 1).unwrap();
    assert_eq!(&recovered, key.get_public().unwrap());
}

#[test]
fn p256_rfc6979_sample() {
    let ec = Ec::new(CurveName::P256).unwrap();
    let key = ec
        .key_from_private("c9afa9d845ba75166b5c215767b1d6934e50c3db36e89b127b8a622b120f6721")
        .unwrap();
    assert_eq!(
        key.encode_public(false).unwrap(),
        hex!(
            "04"
            "60fed4ba255a9d31c961eb74c6356d68c049b8923b61fa6ce669622e60f29fb6"
            "7903fe1008b8bc99a41ae9e95628bc64f2f1b20c2d7e9f5177a3c294d4462299"
        )
    );

    let digest = HashAlgorithm::Sha256.digest(&[b"sample"]);
    let sig = key.sign(&digest, &SignOptions::default()).unwrap();
    assert_eq!(
        sig.to_bytes(32).unwrap(),
        hex!(
            "efd48b2aacb6a8fd1140dd9cd45e81d69d2c877b56aaf991c34d0ea84eaf3716"
            "f7cb1c942d657c41d436c7a1b6e29f65f3e900dbb9aff4064dc4ab2f843acda8"
        )
    );
    assert!(key.verify(&digest, &sig));
    assert!(ec.verify_der(&digest, &sig.to_der().unwrap(), &key));
}

#[test]
fn public_key_recovery() {
    let ec = Ec::new(CurveName::Secp256k1).unwrap();
    let key = ec.key_from_private(&[0x02u8]).unwrap();
    let msg = msg_0_to_10();
    let sig = key.sign(&msg, &SignOptions::default()).unwrap();
    let public = key.get_public().unwrap();

    let j = sig.recovery_param().unwrap();
    assert_eq!(&ec.recover_public_key(&msg, &sig, j).unwrap(), public);
    assert_ne!(&ec.recover_public_key(&msg, &sig, j ^ 1).unwrap(), public);

    // Without a stored parameter the candidates are searched.
    let bare = Signature::new(sig.r().clone(), sig.s().clone(), None);
    assert_eq!(ec.get_key_recovery_param(&msg, &bare, public), Ok(j));

    let other = ec.key_from_private(&[0x03u8]).unwrap();
    assert_eq!(
        ec.get_key_recovery_param(&msg, &bare, other.get_public().unwrap()),
        Err(Error::InvalidEncoding)
    );

    assert_eq!(ec.recover_public_key(&msg, &sig, 4), Err(Error::OutOfRange));
    // r is far above p - n, so there is no second x candidate.
    assert_eq!(ec.recover_public_key(&msg, &sig, 2), Err(Error::OutOfRange));
}

#[test]
fn nonce_override() {
    let ec = Ec::new(CurveName::P256).unwrap();
    let key = ec.key_from_private(&[0x05u8]).unwrap();
    let msg = [0xabu8; 32];

    // The first candidate is out of range and skipped.
    let k = |iter: u32| {
        if iter == 0 {
            BigInt::one()
        } else {
            BigInt::from(7u32)
        }
    };
    let opts = SignOptions {
        k: Some(&k),
        ..Default::default()
    };
    let sig = key.sign(&msg, &opts).unwrap();

    let seven_g = ec.g().mul(&BigInt::from(7u32));
    assert_eq!(sig.r(), &seven_g.get_x().unwrap().rem_euclid(ec.n()));
    assert!(key.verify(&msg, &sig));
}

#[test]
fn personalization_changes_nonce() {
    let ec = Ec::new(CurveName::P256).unwrap();
    let key = ec.key_from_private(&[0x05u8]).unwrap();
    let msg = [0x01u8; 32];

    let plain = key.sign(&msg, &SignOptions::default()).unwrap();
    let opts = SignOptions {
        pers: Some(b"session"),
        ..Default::default()
    };
    let personalized = key.sign(&msg, &opts).unwrap();
    assert_ne!(plain.r(), personalized.r());
    assert!(key.verify(&msg, &personalized));
}

#[test]
fn long_messages_are_truncated() {
    let ec = Ec::new(CurveName::P256).unwrap();
    let key = ec.key_from_private(&[0x09u8]).unwrap();

    let long = [0x5au8; 64];
    let sig = key.sign(&long, &SignOptions::default()).unwrap();
    assert!(key.verify(&long, &sig));
    // Only the leftmost 256 bits are signed.
    assert!(key.verify(&long[..32], &sig));
}

#[test]
fn verify_rejects_out_of_range_components() {
    let ec = Ec::new(CurveName::P256).unwrap();
    let key = ec.key_from_private(&[0x09u8]).unwrap();
    let msg = [0x33u8; 32];
    let sig = key.sign(&msg, &SignOptions::default()).unwrap();

    let zero_s = Signature::new(sig.r().clone(), BigInt::zero(), None);
    assert!(!key.verify(&msg, &zero_s));
    let big_r = Signature::new(sig.r() + ec.n(), sig.s().clone(), None);
    assert!(!key.verify(&msg, &big_r));
    assert!(!ec.verify_der(&msg, &[0x30u8, 0x00], &key));
}

#[test]
fn key_material_errors() {
    let ec = Ec::new(CurveName::P256).unwrap();
    let public_only = ec
        .key_from_public(ec.key_from_private(&[0x09u8]).unwrap().encode_public(true).unwrap())
        .unwrap();
    assert_eq!(public_only.get_private(), Err(Error::MissingKeyMaterial));
    assert_eq!(
        public_only.sign(&[0u8; 32], &SignOptions::default()),
        Err(Error::MissingKeyMaterial)
    );

    let ed = Ec::new(CurveName::Ed25519).unwrap();
    let key = ed.key_from_private(&[0x09u8]).unwrap();
    assert_eq!(
        key.sign(&[0u8; 32], &SignOptions::default()),
        Err(Error::UnsupportedOperation)
    );
}

#[test]
fn key_validation() {
    let ec = Ec::new(CurveName::Secp256k1).unwrap();

    let key = ec.key_from_private(&[0x02u8]).unwrap();
    assert_eq!(
        key.validate(),
        Validation {
            result: true,
            reason: None
        }
    );

    let infinity = ec.key_from_public(&[0x00u8]).unwrap();
    assert_eq!(infinity.validate().reason, Some("Invalid public key"));
    assert!(!infinity.validate().result);

    // The zero scalar has the identity as its public key.
    let zero = ec.key_from_private(ec.n().to_be_bytes()).unwrap();
    assert_eq!(zero.get_private().unwrap(), &BigInt::zero());
    assert!(!zero.validate().result);

    let msg = msg_0_to_10();
    assert_eq!(
        zero.sign(&msg, &SignOptions::default()),
        Err(Error::OutOfRange)
    );
    let zero = ec.key_from_private(&[0u8]).unwrap();
    assert_eq!(
        zero.sign(&msg, &SignOptions::default()),
        Err(Error::OutOfRange)
    );
}

#[test]
fn key_pair_from_both_halves() {
    let ec = Ec::new(CurveName::Secp256k1).unwrap();
    let reference = ec.key_from_private(&[0x05u8]).unwrap();
    let public = reference.encode_public(true).unwrap();

    let key = ec.key_pair(&[0x05u8], &public).unwrap();
    assert_eq!(key.get_private().unwrap(), &BigInt::from(5u32));
    assert_eq!(key.get_public().unwrap(), reference.get_public().unwrap());

    let msg = [0x33u8; 32];
    let sig = key.sign(&msg, &SignOptions::default()).unwrap();
    assert!(reference.verify(&msg, &sig));

    let other = ec.key_from_private(&[0x06u8]).unwrap();
    assert_eq!(
        ec.key_pair(&[0x05u8], &other.encode_public(false).unwrap())
            .unwrap_err(),
        Error::KeyMismatch
    );
    assert_eq!(
        ec.key_pair(&[0x05u8], &[0x02u8, 0x01]).unwrap_err(),
        Error::InvalidEncoding
    );
}

#[test]
fn key_generation() {
    let ec = Ec::new(CurveName::P256).unwrap();
    let opts = KeyPairOptions {
        entropy: Some(ByteSource::from(&[0x42u8; 32])),
        pers: Some(ByteSource::from("0102")),
    };

    let a = ec.gen_key_pair(&opts).unwrap();
    let b = ec.gen_key_pair(&opts).unwrap();
    assert_eq!(a.get_private().unwrap(), b.get_private().unwrap());
    assert!(a.get_private().unwrap() < ec.n());
    assert!(a.validate().result);

    let short = KeyPairOptions {
        entropy: Some(ByteSource::from(&[0x42u8; 16])),
        pers: None,
    };
    assert_eq!(
        ec.gen_key_pair(&short).unwrap_err(),
        Error::InsufficientEntropy
    );

    let random = ec.gen_key_pair(&KeyPairOptions::default()).unwrap();
    assert!(random.validate().result);

    let mut rng = {
        use rand_core::{OsRng, TryRngCore};
        OsRng.unwrap_err()
    };
    let random = ec
        .gen_key_pair_with_rng(&mut rng, &KeyPairOptions::default())
        .unwrap();
    assert_ne!(random.get_private().unwrap(), a.get_private().unwrap());
}

#[test]
fn ecdh_agreement() {
    for name in [
        CurveName::P256,
        CurveName::Secp256k1,
        CurveName::Curve25519,
        CurveName::Ed25519,
    ] {
        let ec = Ec::new(name).unwrap();
        let alice = ec.key_from_private(&[0x11u8; 32]).unwrap();
        let bob = ec.key_from_private(&[0x22u8; 32]).unwrap();

        let ab = alice.derive(bob.get_public().unwrap()).unwrap();
        let ba = bob.derive(alice.get_public().unwrap()).unwrap();
        assert_eq!(ab, ba, "{name}");
    }

    let p256 = Ec::new(CurveName::P256).unwrap();
    let k1 = Ec::new(CurveName::Secp256k1).unwrap();
    let alice = p256.key_from_private(&[0x11u8; 32]).unwrap();
    let stranger = k1.key_from_private(&[0x22u8; 32]).unwrap();
    assert_eq!(
        alice.derive(stranger.get_public().unwrap()),
        Err(Error::PointNotOnCurve)
    );
}

#[test]
fn public_key_encodings() {
    let ec = Ec::new(CurveName::P256).unwrap();
    let key = ec.key_from_private(&[0x09u8]).unwrap();

    let compressed = key.encode_public(true).unwrap();
    let uncompressed = key.encode_public(false).unwrap();
    assert_eq!(compressed.len(), 33);
    assert_eq!(uncompressed.len(), 65);

    let a = ec.key_from_public(&compressed).unwrap();
    let b = ec.key_from_public(&uncompressed).unwrap();
    assert_eq!(a.get_public().unwrap(), b.get_public().unwrap());

    let hex = hex::encode(&uncompressed);
    let c = ec.key_from_public(hex.as_str()).unwrap();
    assert_eq!(c.get_public().unwrap(), key.get_public().unwrap());

    let point = key.get_public().unwrap().clone();
    assert!(ec.key_from_public_point(point).is_ok());
    let foreign = Ec::new(CurveName::P384).unwrap().g().clone();
    assert_eq!(
        ec.key_from_public_point(foreign).unwrap_err(),
        Error::PointNotOnCurve
    );
}

prop_compose! {
    fn private_key()(bytes in any::<[u8; 32]>()) -> [u8; 32] {
        let mut bytes = bytes;
        // Keep the scalar non-zero.
        bytes[31] |= 1;
        bytes
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn sign_verify_round_trip(
        private in private_key(),
        msg in any::<[u8; 32]>(),
        bit in 0usize..256,
    ) {
        for name in [CurveName::P256, CurveName::Secp256k1, CurveName::P384] {
            let ec = Ec::new(name).unwrap();
            let key = ec.key_from_private(&private).unwrap();
            let sig = key.sign(&msg, &SignOptions::default()).unwrap();
            prop_assert!(key.verify(&msg, &sig));

            let der = sig.to_der().unwrap();
            let parsed = Signature::from_der(&der).unwrap();
            prop_assert_eq!(parsed.r(), sig.r());
            prop_assert_eq!(parsed.s(), sig.s());
            prop_assert!(ec.verify_der(&msg, &der, &key));

            let mut tampered = msg;
            tampered[bit / 8] ^= 1 << (bit % 8);
            prop_assert!(!key.verify(&tampered, &sig));

            let flip = BigInt::one() << bit;
            let r = Signature::new(sig.r() ^ &flip, sig.s().clone(), None);
            prop_assert!(!key.verify(&msg, &r));
            let s = Signature::new(sig.r().clone(), sig.s() ^ &flip, None);
            prop_assert!(!key.verify(&msg, &s));

            let j = sig.recovery_param().unwrap();
            let recovered = ec.recover_public_key(&msg, &sig, j).unwrap();
            prop_assert_eq!(&recovered, key.get_public().unwrap());
        }
    }
}
