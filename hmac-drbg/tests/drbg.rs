//! HMAC_DRBG stream properties.

use hmac_drbg::HmacDrbg;
use proptest::prelude::*;
use sha2::{Sha256, Sha512};

fn entropy() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 24..64)
}

#[test]
fn sha512_output_length() {
    let mut drbg = HmacDrbg::<Sha512>::new(&[7u8; 32], b"nonce", &[]).unwrap();
    assert_eq!(drbg.generate(100, None).unwrap().len(), 100);
}

#[test]
fn additional_input_changes_stream() {
    let mut a = HmacDrbg::<Sha256>::new(&[1u8; 32], b"nonce", b"pers").unwrap();
    let mut b = HmacDrbg::<Sha256>::new(&[1u8; 32], b"nonce", b"pers").unwrap();

    assert_ne!(
        a.generate(32, None).unwrap(),
        b.generate(32, Some(b"additional")).unwrap()
    );
}

#[test]
fn empty_additional_input_is_not_absent() {
    let mut a = HmacDrbg::<Sha256>::new(&[1u8; 32], b"nonce", &[]).unwrap();
    let mut b = HmacDrbg::<Sha256>::new(&[1u8; 32], b"nonce", &[]).unwrap();

    assert_ne!(a.generate(32, None).unwrap(), b.generate(32, Some(&[])).unwrap());
}

proptest! {
    #[test]
    fn deterministic(
        entropy in entropy(),
        nonce in proptest::collection::vec(any::<u8>(), 0..32),
        pers in proptest::collection::vec(any::<u8>(), 0..32),
        len in 1usize..200
    ) {
        let mut a = HmacDrbg::<Sha256>::new(&entropy, &nonce, &pers).unwrap();
        let mut b = HmacDrbg::<Sha256>::new(&entropy, &nonce, &pers).unwrap();

        for _ in 0..3 {
            prop_assert_eq!(a.generate(len, None).unwrap(), b.generate(len, None).unwrap());
        }
    }

    #[test]
    fn different_entropy_diverges(a in entropy(), b in entropy()) {
        prop_assume!(a != b);

        let mut da = HmacDrbg::<Sha256>::new(&a, b"nonce", &[]).unwrap();
        let mut db = HmacDrbg::<Sha256>::new(&b, b"nonce", &[]).unwrap();
        prop_assert_ne!(da.generate(32, None).unwrap(), db.generate(32, None).unwrap());
    }

    #[test]
    fn fill_bytes_matches_generate(entropy in entropy(), len in 0usize..150) {
        let mut a = HmacDrbg::<Sha256>::new(&entropy, &[], &[]).unwrap();
        let mut b = HmacDrbg::<Sha256>::new(&entropy, &[], &[]).unwrap();

        let mut out = vec![0u8; len];
        a.fill_bytes(&mut out, None).unwrap();
        prop_assert_eq!(out, b.generate(len, None).unwrap());
    }
}
