//! Named curves.
//!
//! Each preset is built on first use and then shared for the life of the
//! process. With the `precomputed-tables` feature the generator's fixed-base
//! tables are built at the same time.

use crate::{
    Error, Result,
    curve::{
        Curve, EdwardsCurve, EdwardsParams, EndoParams, MontCurve, MontParams, Point, ShortCurve,
        ShortParams,
    },
    hash::HashAlgorithm,
};
use alloc::boxed::Box;
use bignum::BigInt;
use core::{fmt, str::FromStr};
use once_cell::race::OnceBox;

/// The preset curves.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CurveName {
    /// NIST P-192.
    P192,
    /// NIST P-224.
    P224,
    /// NIST P-256.
    P256,
    /// NIST P-384.
    P384,
    /// NIST P-521.
    P521,
    /// Curve25519 in Montgomery form.
    Curve25519,
    /// Edwards25519.
    Ed25519,
    /// SECG secp256k1.
    Secp256k1,
}

impl CurveName {
    /// Every preset.
    pub const ALL: [CurveName; 8] = [
        CurveName::P192,
        CurveName::P224,
        CurveName::P256,
        CurveName::P384,
        CurveName::P521,
        CurveName::Curve25519,
        CurveName::Ed25519,
        CurveName::Secp256k1,
    ];

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            CurveName::P192 => "p192",
            CurveName::P224 => "p224",
            CurveName::P256 => "p256",
            CurveName::P384 => "p384",
            CurveName::P521 => "p521",
            CurveName::Curve25519 => "curve25519",
            CurveName::Ed25519 => "ed25519",
            CurveName::Secp256k1 => "secp256k1",
        }
    }
}

impl FromStr for CurveName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CurveName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or(Error::UnknownCurve)
    }
}

impl fmt::Display for CurveName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named curve with its generator, order and hash function.
#[derive(Debug)]
pub struct PresetCurve {
    name: CurveName,
    curve: Curve,
    g: Point,
    n: BigInt,
    hash: HashAlgorithm,
}

impl PresetCurve {
    /// The preset's name.
    pub fn name(&self) -> CurveName {
        self.name
    }

    /// The curve.
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// The generator.
    pub fn g(&self) -> &Point {
        &self.g
    }

    /// Order of the generator.
    pub fn n(&self) -> &BigInt {
        &self.n
    }

    /// Hash function paired with the curve.
    pub fn hash(&self) -> HashAlgorithm {
        self.hash
    }
}

static PRESETS: [OnceBox<PresetCurve>; 8] = [const { OnceBox::new() }; 8];

/// The preset curve `name`, building it on first use.
pub fn preset(name: CurveName) -> Result<&'static PresetCurve> {
    PRESETS[name as usize].get_or_try_init(|| build(name).map(Box::new))
}

/// The preset curve with the given lowercase name.
pub fn preset_by_name(name: &str) -> Result<&'static PresetCurve> {
    preset(name.parse()?)
}

fn build(name: CurveName) -> Result<PresetCurve> {
    let (curve, hash) = match name {
        CurveName::P192 => (short(&P192)?, HashAlgorithm::Sha256),
        CurveName::P224 => (short(&P224)?, HashAlgorithm::Sha256),
        CurveName::P256 => (short(&P256)?, HashAlgorithm::Sha256),
        CurveName::P384 => (short(&P384)?, HashAlgorithm::Sha384),
        CurveName::P521 => (short(&P521)?, HashAlgorithm::Sha512),
        CurveName::Secp256k1 => (short(&SECP256K1)?, HashAlgorithm::Sha256),
        CurveName::Curve25519 => (
            Curve::Mont(MontCurve::new(&CURVE25519)?),
            HashAlgorithm::Sha256,
        ),
        CurveName::Ed25519 => (
            Curve::Edwards(EdwardsCurve::new(&ED25519)?),
            HashAlgorithm::Sha512,
        ),
    };

    let g = curve.g();
    let n = curve.n().clone();

    #[cfg(feature = "precomputed-tables")]
    g.precompute(n.bit_length() + 1);

    if !g.mul(&n).is_infinity() {
        return Err(Error::PointNotOnCurve);
    }

    log::debug!("initialized preset curve {name}");
    Ok(PresetCurve {
        name,
        curve,
        g,
        n,
        hash,
    })
}

fn short(params: &ShortParams) -> Result<Curve> {
    ShortCurve::new(params).map(Curve::Short)
}

const P192: ShortParams = ShortParams {
    p: "fffffffffffffffffffffffffffffffeffffffffffffffff",
    a: "fffffffffffffffffffffffffffffffefffffffffffffffc",
    b: "64210519e59c80e70fa7e9ab72243049feb8deecc146b9b1",
    n: "ffffffffffffffffffffffff99def836146bc9b1b4d22831",
    gx: "188da80eb03090f67cbf20eb43a18800f4ff0afd82ff1012",
    gy: "07192b95ffc8da78631011ed6b24cdd573f977a11e794811",
    endo: None,
};

const P224: ShortParams = ShortParams {
    p: "ffffffffffffffffffffffffffffffff000000000000000000000001",
    a: "fffffffffffffffffffffffffffffffefffffffffffffffffffffffe",
    b: "b4050a850c04b3abf54132565044b0b7d7bfd8ba270b39432355ffb4",
    n: "ffffffffffffffffffffffffffff16a2e0b8f03e13dd29455c5c2a3d",
    gx: "b70e0cbd6bb4bf7f321390b94a03c1d356c21122343280d6115c1d21",
    gy: "bd376388b5f723fb4c22dfe6cd4375a05a07476444d5819985007e34",
    endo: None,
};

const P256: ShortParams = ShortParams {
    p: "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff",
    a: "ffffffff00000001000000000000000000000000fffffffffffffffffffffffc",
    b: "5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b",
    n: "ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551",
    gx: "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296",
    gy: "4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5",
    endo: None,
};

const P384: ShortParams = ShortParams {
    p: "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffe\
        ffffffff0000000000000000ffffffff",
    a: "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffe\
        ffffffff0000000000000000fffffffc",
    b: "b3312fa7e23ee7e4988e056be3f82d19181d9c6efe8141120314088f5013875a\
        c656398d8a2ed19d2a85c8edd3ec2aef",
    n: "ffffffffffffffffffffffffffffffffffffffffffffffffc7634d81f4372ddf\
        581a0db248b0a77aecec196accc52973",
    gx: "aa87ca22be8b05378eb1c71ef320ad746e1d3b628ba79b9859f741e082542a38\
         5502f25dbf55296c3a545e3872760ab7",
    gy: "3617de4a96262c6f5d9e98bf9292dc29f8f41dbd289a147ce9da3113b5f0b8c0\
         0a60b1ce1d7e819d7a431d7c90ea0e5f",
    endo: None,
};

const P521: ShortParams = ShortParams {
    p: "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff\
        ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff\
        ffff",
    a: "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff\
        ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff\
        fffc",
    b: "0051953eb9618e1c9a1f929a21a0b68540eea2da725b99b315f3b8b489918ef1\
        09e156193951ec7e937b1652c0bd3bb1bf073573df883d2c34f1ef451fd46b50\
        3f00",
    n: "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff\
        fffa51868783bf2f966b7fcc0148f709a5d03bb5c9b8899c47aebb6fb71e9138\
        6409",
    gx: "00c6858e06b70404e9cd9e3ecb662395b4429c648139053fb521f828af606b4d\
         3dbaa14b5e77efe75928fe1dc127a2ffa8de3348b3c1856a429bf97e7e31c2e5\
         bd66",
    gy: "011839296a789a3bc0045c8a5fb42c7d1bd998f54449579b446817afbd17273e\
         662c97ee72995ef42640c550b9013fad0761353c7086a272c24088be94769fd1\
         6650",
    endo: None,
};

const SECP256K1: ShortParams = ShortParams {
    p: "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
    a: "0",
    b: "7",
    n: "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141",
    gx: "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
    gy: "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
    endo: Some(EndoParams {
        beta: "7ae96a2b657c07106e64479eac3434e99cf0497512f58995c1396c28719501ee",
        lambda: "5363ad4cc05c30e0a5261c028812645a122e22ea20816678df02967c1b23bd72",
        basis: [
            (
                "3086d221a7d46bcde86c90e49284eb15",
                "-e4437ed6010e88286f547fa90abfe4c3",
            ),
            (
                "114ca50f7a8e2f3f657c1108d9d44cfd8",
                "3086d221a7d46bcde86c90e49284eb15",
            ),
        ],
    }),
};

const CURVE25519: MontParams = MontParams {
    p: "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed",
    a: "76d06",
    b: "1",
    n: "1000000000000000000000000000000014def9dea2f79cd65812631a5cf5d3ed",
    gx: "9",
};

const ED25519: EdwardsParams = EdwardsParams {
    p: "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed",
    a: "-1",
    d: "52036cee2b6ffe738cc740797779e89800700a4d4141d8ab75eb4dca135978a3",
    n: "1000000000000000000000000000000014def9dea2f79cd65812631a5cf5d3ed",
    gx: "216936d3cd6e53fec0a4e231fdd6dc5c692cc7609525a7b2c9562d608f25d51a",
    gy: "6666666666666666666666666666666666666666666666666666666666666658",
};

#[cfg(test)]
mod tests {
    use super::{CurveName, preset};
    use crate::Error;

    #[test]
    fn names_round_trip() {
        for name in CurveName::ALL {
            assert_eq!(name.as_str().parse::<CurveName>(), Ok(name));
        }
        assert_eq!("p257".parse::<CurveName>(), Err(Error::UnknownCurve));
    }

    #[test]
    fn presets_are_shared() {
        let a = preset(CurveName::P256).unwrap();
        let b = preset(CurveName::P256).unwrap();
        assert!(core::ptr::eq(a, b));
        assert_eq!(a.name(), CurveName::P256);
    }
}
