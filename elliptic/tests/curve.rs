//! Point arithmetic and encoding tests.

use elliptic::{BigInt, Curve, CurveName, Error, Point, preset};
use hex_literal::hex;
use proptest::prelude::*;

fn int(bytes: &[u8]) -> BigInt {
    BigInt::from_be_bytes(bytes)
}

fn p256() -> (&'static Curve, &'static Point) {
    let p = preset(CurveName::P256).unwrap();
    (p.curve(), p.g())
}

fn affine(p: &Point) -> (BigInt, BigInt) {
    (p.get_x().unwrap(), p.get_y().unwrap())
}

const P256_2G: ([u8; 32], [u8; 32]) = (
    hex!("7cf27b188d034f7e8a52380304b51ac3c08969e277f21b35a60b48fc47669978"),
    hex!("07775510db8ed040293d9ac69f7430dbba7dade63ce982299e04b79d227873d1"),
);
const P256_3G: ([u8; 32], [u8; 32]) = (
    hex!("5ecbe4d1a6330a44c8f7ef951d4bf165e6c6b721efada985fb41661bc6e7fd6c"),
    hex!("8734640c4998ff7e374b06ce1a64a2ecd82ab036384fb83d9a79b127a27d5032"),
);
const P256_5G: ([u8; 32], [u8; 32]) = (
    hex!("51590b7a515140d2d784c85608668fdfef8c82fd1f5be52421554a0dc3d033ed"),
    hex!("e0c17da8904a727d8ae1bf36bf8a79260d012f00d4d80888d1d0bb44fda16da4"),
);

#[test]
fn p256_small_multiples() {
    let (curve, g) = p256();
    let g2 = g.dbl();
    let g3 = g2.add(g).unwrap();
    assert_eq!(affine(&g2), (int(&P256_2G.0), int(&P256_2G.1)));
    assert_eq!(affine(&g3), (int(&P256_3G.0), int(&P256_3G.1)));

    let g5 = curve.point(&int(&P256_5G.0), &int(&P256_5G.1)).unwrap();
    assert_eq!(g.mul(&BigInt::from(5u32)), g5);
    assert_eq!(g3.add(&g2).unwrap(), g5);
    assert_eq!(
        g.mul_add(&BigInt::from(2u32), &g3, &BigInt::one()).unwrap(),
        g5
    );
}

#[test]
fn identity_laws() {
    for name in CurveName::ALL {
        let preset = preset(name).unwrap();
        let g = preset.g();
        assert!(g.mul(preset.n()).is_infinity(), "{name}");
        assert!(g.mul(&BigInt::zero()).is_infinity(), "{name}");
        assert!(g.validate(), "{name}");
    }

    let (curve, g) = p256();
    let inf = curve.infinity();
    assert_eq!(g.add(&inf).unwrap(), *g);
    assert_eq!(inf.add(g).unwrap(), *g);
    assert!(g.add(&g.neg().unwrap()).unwrap().is_infinity());
    assert_eq!(inf.get_x(), Err(Error::PointAtInfinity));
}

#[test]
fn sec1_encodings() {
    let (curve, g) = p256();
    let g2 = g.dbl();

    let compressed = g2.encode(true).unwrap();
    assert_eq!(compressed[0], 0x03);
    assert_eq!(compressed[1..], P256_2G.0);
    assert_eq!(curve.decode_point(&compressed).unwrap(), g2);

    let uncompressed = g2.encode(false).unwrap();
    assert_eq!(uncompressed.len(), 65);
    assert_eq!(curve.decode_point(&uncompressed).unwrap(), g2);

    // Hybrid form carries the parity of y in the tag.
    let mut hybrid = uncompressed.clone();
    hybrid[0] = 0x07;
    assert_eq!(curve.decode_point(&hybrid).unwrap(), g2);
    hybrid[0] = 0x06;
    assert_eq!(curve.decode_point(&hybrid), Err(Error::InvalidEncoding));

    let inf = curve.infinity();
    assert_eq!(inf.encode(true).unwrap(), [0x00u8]);
    assert!(curve.decode_point(&[0x00u8]).unwrap().is_infinity());

    assert_eq!(curve.decode_point(&[]), Err(Error::InvalidEncoding));
    assert_eq!(curve.decode_point(&compressed[..20]), Err(Error::InvalidEncoding));
    assert_eq!(
        curve.decode_point(&[&[0x02u8][..], &[0xffu8; 32][..]].concat()),
        Err(Error::InvalidEncoding)
    );
}

#[test]
fn compressed_x_without_square_root() {
    let (curve, _) = p256();
    let mut bytes = [0u8; 33];
    bytes[0] = 0x02;
    bytes[32] = 1;
    assert_eq!(curve.decode_point(&bytes), Err(Error::PointNotOnCurve));

    let k1 = preset(CurveName::Secp256k1).unwrap().curve();
    assert_eq!(
        k1.point_from_x(&BigInt::from(5u32), false),
        Err(Error::PointNotOnCurve)
    );
    let p = k1.point_from_x(&BigInt::from(1u32), true).unwrap();
    assert!(p.get_y().unwrap().is_odd());
    assert!(p.validate());
}

#[test]
fn off_curve_point_is_rejected() {
    let (curve, _) = p256();
    assert_eq!(
        curve.point(&BigInt::from(1u32), &BigInt::from(1u32)),
        Err(Error::PointNotOnCurve)
    );
    assert_eq!(
        curve.point(curve.p(), &BigInt::from(1u32)),
        Err(Error::OutOfRange)
    );
}

#[test]
fn families_do_not_mix() {
    let (p256, g) = p256();
    let mont = preset(CurveName::Curve25519).unwrap();
    let ed = preset(CurveName::Ed25519).unwrap();

    assert_eq!(mont.g().add(mont.g()), Err(Error::UnsupportedOperation));
    assert_eq!(mont.g().neg(), Err(Error::UnsupportedOperation));
    assert_eq!(g.add(ed.g()), Err(Error::UnsupportedOperation));
    assert!(!p256.validate(ed.g()));
    assert!(!ed.curve().validate(g));

    let p192 = preset(CurveName::P192).unwrap();
    assert!(!p256.validate(p192.g()));
}

#[test]
fn edwards_encoding() {
    let ed = preset(CurveName::Ed25519).unwrap();
    let (curve, g) = (ed.curve(), ed.g());

    let bytes = g.encode(false).unwrap();
    assert_eq!(
        bytes,
        hex!("5866666666666666666666666666666666666666666666666666666666666666")
    );
    assert_eq!(curve.decode_point(&bytes).unwrap(), *g);

    let p = g.mul(&BigInt::from(7u32));
    assert_eq!(curve.decode_point(&p.encode(false).unwrap()).unwrap(), p);

    // y = p is not canonical.
    let mut y_is_p = hex!("edffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f");
    assert_eq!(curve.decode_point(&y_is_p), Err(Error::InvalidEncoding));
    y_is_p[31] = 0xff;
    assert_eq!(curve.decode_point(&y_is_p), Err(Error::InvalidEncoding));
    assert_eq!(curve.decode_point(&bytes[1..]), Err(Error::InvalidEncoding));

    let x = g.get_x().unwrap();
    let from_x = curve.point_from_x(&x, g.get_y().unwrap().is_odd()).unwrap();
    assert_eq!(from_x, *g);
}

#[test]
fn edwards_identity() {
    let ed = preset(CurveName::Ed25519).unwrap();
    let inf = ed.curve().infinity();
    assert!(inf.is_infinity());
    assert_eq!(inf.get_x().unwrap(), BigInt::zero());
    assert_eq!(inf.get_y().unwrap(), BigInt::one());
    assert_eq!(ed.g().add(&inf).unwrap(), *ed.g());
    assert_eq!(inf.dbl(), inf);
}

#[test]
fn montgomery_ladder() {
    let mont = preset(CurveName::Curve25519).unwrap();
    let g = mont.g();
    assert_eq!(g.get_x().unwrap(), BigInt::from(9u32));

    let two = BigInt::from(2u32);
    let three = BigInt::from(3u32);
    assert_eq!(g.mul(&two), g.dbl());
    assert_eq!(g.mul(&three).mul(&two), g.mul(&BigInt::from(6u32)));
    assert_eq!(g.get_y(), Err(Error::UnsupportedOperation));

    let bytes = g.mul(&three).encode(false).unwrap();
    assert_eq!(bytes.len(), 32);
    assert_eq!(mont.curve().decode_point(&bytes).unwrap(), g.mul(&three));
}

#[test]
fn endomorphism_split() {
    let k1 = preset(CurveName::Secp256k1).unwrap();
    let Curve::Short(curve) = k1.curve() else {
        unreachable!()
    };
    let endo = curve.endomorphism().unwrap();
    let n = curve.n();

    let k = n - &BigInt::from(12345u32);
    let (a, b) = curve.endo_split(&k).unwrap();
    assert!(a.abs().bit_length() <= 129);
    assert!(b.abs().bit_length() <= 129);
    assert_eq!((&a + &(&b * endo.lambda())).rem_euclid(n), k);
}

prop_compose! {
    fn scalar()(bytes in any::<[u8; 32]>()) -> BigInt {
        BigInt::from_be_bytes(&bytes)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn short_group_laws(a in scalar(), b in scalar()) {
        for name in [CurveName::P256, CurveName::Secp256k1] {
            let preset = preset(name).unwrap();
            let (g, n) = (preset.g(), preset.n());

            let ag = g.mul(&a);
            let bg = g.mul(&b);
            let sum = (&a + &b).rem_euclid(n);
            prop_assert_eq!(ag.add(&bg).unwrap(), g.mul(&sum));

            // Variable-base multiplication without precomputed tables.
            let prod = (&a * &b).rem_euclid(n);
            prop_assert_eq!(ag.mul(&b), g.mul(&prod));

            prop_assert_eq!(g.mul_add(&a, &bg, &b).unwrap(), ag.add(&bg.mul(&b)).unwrap());
            prop_assert_eq!(g.mul(&-&a), ag.neg().unwrap());
        }
    }

    #[test]
    fn edwards_group_laws(a in scalar(), b in scalar()) {
        let preset = preset(CurveName::Ed25519).unwrap();
        let (g, n) = (preset.g(), preset.n());

        let ag = g.mul(&a);
        let bg = g.mul(&b);
        prop_assert_eq!(ag.add(&bg).unwrap(), g.mul(&(&a + &b).rem_euclid(n)));
        prop_assert_eq!(ag.mul(&b), g.mul(&(&a * &b).rem_euclid(n)));
        prop_assert_eq!(ag.dbl(), ag.add(&ag).unwrap());
        prop_assert!(ag.validate());
    }

    /// curve25519 and ed25519 are birationally equivalent: `u = (1 + y) / (1 - y)`.
    #[test]
    fn montgomery_matches_edwards(k in scalar()) {
        let ed = preset(CurveName::Ed25519).unwrap();
        let mont = preset(CurveName::Curve25519).unwrap();
        let p = ed.curve().p();

        let y = ed.g().mul(&k).get_y().unwrap();
        let one = BigInt::one();
        let den = (&one - &y).rem_euclid(p);
        prop_assume!(!den.is_zero());
        let u = (&(&one + &y) * &den.invm(p).unwrap()).rem_euclid(p);

        let m = mont.g().mul(&k);
        prop_assume!(!m.is_infinity());
        prop_assert_eq!(m.get_x().unwrap(), u);
    }
}
