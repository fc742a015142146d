//! EdDSA (RFC 8032) over the Edwards presets.
//!
//! ```
//! use elliptic::{CurveName, EdDsa};
//!
//! let ed = EdDsa::new(CurveName::Ed25519).unwrap();
//! let key = ed.key_from_secret(&[7u8; 32]).unwrap();
//! let sig = key.sign(b"hello").unwrap();
//! assert!(key.verify(b"hello", &sig));
//! ```

mod key;
mod signature;

pub use self::{key::EdKeyPair, signature::EdSignature};

use crate::{
    ByteSource, Error, Result,
    curve::{Curve, EdwardsCurve, EdwardsPoint, Point},
    hash::HashAlgorithm,
    presets::{CurveName, PresetCurve, preset},
};
use alloc::{sync::Arc, vec::Vec};
use bignum::BigInt;

/// EdDSA over one Edwards preset.
#[derive(Clone, Copy, Debug)]
pub struct EdDsa {
    preset: &'static PresetCurve,
    curve: &'static Arc<EdwardsCurve>,
    g: &'static EdwardsPoint,
}

impl EdDsa {
    /// Context for the named preset, which must be an Edwards curve.
    pub fn new(name: CurveName) -> Result<Self> {
        let preset = preset(name)?;
        match (preset.curve(), preset.g()) {
            (Curve::Edwards(curve), Point::Edwards(g)) => Ok(Self { preset, curve, g }),
            _ => Err(Error::UnsupportedOperation),
        }
    }

    /// The curve.
    pub fn curve(&self) -> &'static Arc<EdwardsCurve> {
        self.curve
    }

    /// The base point.
    pub fn g(&self) -> &'static EdwardsPoint {
        self.g
    }

    /// Order of the base point.
    pub fn n(&self) -> &'static BigInt {
        self.preset.n()
    }

    /// Hash function of the scheme.
    pub fn hash(&self) -> HashAlgorithm {
        self.preset.hash()
    }

    /// Length of an encoded point or scalar.
    pub fn encoding_len(&self) -> usize {
        self.curve.byte_len()
    }

    /// Key pair from a secret seed.
    pub fn key_from_secret<'a>(&self, secret: impl Into<ByteSource<'a>>) -> Result<EdKeyPair> {
        EdKeyPair::from_secret(*self, secret.into().to_bytes()?)
    }

    /// Public-only key pair from an encoded point.
    pub fn key_from_public<'a>(&self, public: impl Into<ByteSource<'a>>) -> Result<EdKeyPair> {
        let point = self.decode_point(&public.into().to_bytes()?)?;
        Ok(EdKeyPair::from_public(*self, point))
    }

    /// Public-only key pair from a point on this curve.
    pub fn key_from_public_point(&self, public: EdwardsPoint) -> Result<EdKeyPair> {
        if !self.is_point(&public) {
            return Err(Error::PointNotOnCurve);
        }
        Ok(EdKeyPair::from_public(*self, public))
    }

    /// Sign `msg`.
    ///
    /// `r = H(prefix || M)`, `R = rG` and `S = r + H(R || A || M) a`, all
    /// scalars modulo `n`.
    pub fn sign<'a>(
        &self,
        msg: impl Into<ByteSource<'a>>,
        key: &EdKeyPair,
    ) -> Result<EdSignature> {
        let msg = msg.into().to_bytes()?;
        let private = key.private()?;

        let r = self.hash_int(&[key.message_prefix()?, msg.as_slice()]);
        let big_r = self.g.mul(&r);
        let r_encoded = self.encode_point(&big_r);

        let h = self.hash_int(&[r_encoded.as_slice(), key.pub_bytes(), msg.as_slice()]);
        let s = (&r + &(&h * private)).rem_euclid(self.n());
        EdSignature::new(self, r_encoded, s)
    }

    /// Verify `sig` over `msg` against `key`: `SG == R + H(R || A || M) A`.
    pub fn verify<'a>(
        &self,
        msg: impl Into<ByteSource<'a>>,
        sig: &EdSignature,
        key: &EdKeyPair,
    ) -> bool {
        let Ok(msg) = msg.into().to_bytes() else {
            return false;
        };
        if sig.s() >= self.n() || sig.s().is_neg() {
            return false;
        }
        let Ok(big_r) = self.decode_point(sig.r_encoded()) else {
            return false;
        };

        let h = self.hash_int(&[sig.r_encoded(), key.pub_bytes(), msg.as_slice()]);
        let lhs = self.g.mul(sig.s());
        let rhs = big_r.add(&key.public().mul(&h));
        self.encode_point(&lhs) == self.encode_point(&rhs)
    }

    /// Parse an encoded `R || S` signature.
    pub fn make_signature<'a>(&self, sig: impl Into<ByteSource<'a>>) -> Result<EdSignature> {
        EdSignature::from_bytes(self, &sig.into().to_bytes()?)
    }

    /// Little-endian digest of the concatenated `parts`, reduced modulo `n`.
    pub fn hash_int(&self, parts: &[&[u8]]) -> BigInt {
        let digest = self.hash().digest(parts);
        self.decode_int(&digest).rem_euclid(self.n())
    }

    /// Encode a point as its little-endian y-coordinate and the parity of x.
    pub fn encode_point(&self, point: &EdwardsPoint) -> Vec<u8> {
        point.encode()
    }

    /// Decode a point encoding, rejecting non-canonical y-coordinates.
    pub fn decode_point(&self, bytes: &[u8]) -> Result<EdwardsPoint> {
        self.curve.decode_point(bytes)
    }

    /// Little-endian scalar, [`EdDsa::encoding_len`] bytes long.
    pub fn encode_int(&self, v: &BigInt) -> Result<Vec<u8>> {
        Ok(v.to_le_bytes_padded(self.encoding_len())?)
    }

    /// Scalar from little-endian bytes.
    pub fn decode_int(&self, bytes: &[u8]) -> BigInt {
        BigInt::from_le_bytes(bytes)
    }

    /// Is `point` a valid point of this context's curve?
    pub fn is_point(&self, point: &EdwardsPoint) -> bool {
        Arc::ptr_eq(self.curve, point.curve()) && point.validate()
    }
}
