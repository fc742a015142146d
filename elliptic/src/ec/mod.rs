//! ECDSA over the short Weierstrass presets, and ECDH key pairs for every preset.
//!
//! Nonces are derived with HMAC_DRBG seeded from the private key and the
//! message, in the manner of RFC 6979, so signing never consumes randomness.
//!
//! ```
//! use elliptic::{CurveName, Ec, SignOptions};
//!
//! let ec = Ec::new(CurveName::Secp256k1).unwrap();
//! let key = ec.key_from_private(&[0x02u8]).unwrap();
//! let sig = key.sign(&[0u8, 1, 2, 3], &SignOptions::default()).unwrap();
//! assert!(key.verify(&[0u8, 1, 2, 3], &sig));
//! ```

mod key;
mod signature;

pub use self::{
    key::{KeyPair, KeyPairOptions, Validation},
    signature::Signature,
};

use crate::{
    ByteSource, Error, Result,
    curve::{Curve, Point},
    hash::{Drbg, HashAlgorithm},
    presets::{CurveName, PresetCurve, preset},
};
use alloc::{sync::Arc, vec, vec::Vec};
use bignum::BigInt;
use core::fmt;
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroizing;

/// Options for [`Ec::sign`].
#[derive(Clone, Copy, Default)]
pub struct SignOptions<'a> {
    /// Produce a low-S signature, flipping the recovery parameter to match.
    pub canonical: bool,

    /// Personalization string for the nonce generator.
    pub pers: Option<&'a [u8]>,

    /// Nonce override, called with the attempt number. Candidates outside
    /// `[2, n - 2]` are skipped.
    pub k: Option<&'a dyn Fn(u32) -> BigInt>,
}

impl fmt::Debug for SignOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignOptions")
            .field("canonical", &self.canonical)
            .field("pers", &self.pers)
            .field("k", &self.k.map(|_| "<fn>"))
            .finish()
    }
}

/// ECDSA and ECDH over one preset curve.
#[derive(Clone, Copy, Debug)]
pub struct Ec {
    preset: &'static PresetCurve,
}

impl Ec {
    /// Context for the named preset.
    pub fn new(name: CurveName) -> Result<Self> {
        Ok(Self::from_preset(preset(name)?))
    }

    /// Context for an already resolved preset.
    pub fn from_preset(preset: &'static PresetCurve) -> Self {
        Self { preset }
    }

    /// The preset.
    pub fn preset(&self) -> &'static PresetCurve {
        self.preset
    }

    /// The curve.
    pub fn curve(&self) -> &'static Curve {
        self.preset.curve()
    }

    /// The generator.
    pub fn g(&self) -> &'static Point {
        self.preset.g()
    }

    /// Order of the generator.
    pub fn n(&self) -> &'static BigInt {
        self.preset.n()
    }

    /// Hash function used by the nonce generator.
    pub fn hash(&self) -> HashAlgorithm {
        self.preset.hash()
    }

    /// Key pair for a private scalar, reduced modulo `n`.
    pub fn key_from_private<'a>(&self, private: impl Into<ByteSource<'a>>) -> Result<KeyPair> {
        Ok(KeyPair::from_private(*self, private.into().to_bigint()?))
    }

    /// Public-only key pair from an encoded point.
    pub fn key_from_public<'a>(&self, public: impl Into<ByteSource<'a>>) -> Result<KeyPair> {
        let bytes = public.into().to_bytes()?;
        let point = self.curve().decode_point(&bytes)?;
        Ok(KeyPair::from_public(*self, point))
    }

    /// Public-only key pair from a point on this curve.
    pub fn key_from_public_point(&self, public: Point) -> Result<KeyPair> {
        if !same_curve(self.curve(), &public) {
            return Err(Error::PointNotOnCurve);
        }
        Ok(KeyPair::from_public(*self, public))
    }

    /// Key pair holding both halves. `public` must be `g * private`.
    pub fn key_pair<'a, 'b>(
        &self,
        private: impl Into<ByteSource<'a>>,
        public: impl Into<ByteSource<'b>>,
    ) -> Result<KeyPair> {
        let private = private.into().to_bigint()?.rem_euclid(self.n());
        let public = self.curve().decode_point(&public.into().to_bytes()?)?;
        if self.g().mul(&private) != public {
            return Err(Error::KeyMismatch);
        }
        Ok(KeyPair::from_parts(*self, private, public))
    }

    /// Generate a key pair, seeding the generator from `opts.entropy` or the
    /// operating system.
    pub fn gen_key_pair(&self, opts: &KeyPairOptions<'_>) -> Result<KeyPair> {
        let entropy = match &opts.entropy {
            Some(entropy) => Zeroizing::new(entropy.to_bytes()?),
            None => Zeroizing::new(os_entropy(self.hash().output_size())?),
        };
        self.key_pair_from_entropy(&entropy, opts)
    }

    /// Generate a key pair, seeding the generator from `opts.entropy` or `rng`.
    pub fn gen_key_pair_with_rng<R>(
        &self,
        rng: &mut R,
        opts: &KeyPairOptions<'_>,
    ) -> Result<KeyPair>
    where
        R: CryptoRng + RngCore + ?Sized,
    {
        let entropy = match &opts.entropy {
            Some(entropy) => Zeroizing::new(entropy.to_bytes()?),
            None => {
                let mut buf = Zeroizing::new(vec![0u8; self.hash().output_size()]);
                rng.fill_bytes(&mut buf);
                buf
            }
        };
        self.key_pair_from_entropy(&entropy, opts)
    }

    fn key_pair_from_entropy(&self, entropy: &[u8], opts: &KeyPairOptions<'_>) -> Result<KeyPair> {
        let pers = match &opts.pers {
            Some(pers) => pers.to_bytes()?,
            None => Vec::new(),
        };

        let n = self.n();
        let nonce = n.to_be_bytes();
        let mut drbg = Drbg::new(self.hash(), entropy, &nonce, &pers)?;
        let max = n - &BigInt::from(2u32);

        loop {
            let bytes = Zeroizing::new(drbg.generate(n.byte_length())?);
            let mut private = BigInt::from_be_bytes(&bytes);
            if private > max {
                continue;
            }
            private.add_u32(1);
            return Ok(KeyPair::from_private(*self, private));
        }
    }

    /// Sign `msg`, normally a digest, with a deterministic nonce.
    ///
    /// `msg` is truncated to the bit length of `n` as described in SEC1.
    pub fn sign<'a>(
        &self,
        msg: impl Into<ByteSource<'a>>,
        key: &KeyPair,
        opts: &SignOptions<'_>,
    ) -> Result<Signature> {
        let Point::Short(g) = self.g() else {
            return Err(Error::UnsupportedOperation);
        };

        let private = key.get_private()?;
        if private.is_zero() {
            return Err(Error::OutOfRange);
        }
        let msg = msg.into().to_bytes()?;
        let e = self.truncate_to_n(BigInt::from_be_bytes(&msg), msg.len() * 8, false);

        let n = self.n();
        let len = n.byte_length();
        let entropy = Zeroizing::new(private.to_be_bytes_padded(len)?);
        let nonce = e.to_be_bytes_padded(len)?;
        let mut drbg = Drbg::new(self.hash(), &entropy, &nonce, opts.pers.unwrap_or_default())?;
        let n1 = n - &BigInt::one();

        let mut attempt = 0u32;
        loop {
            let iter = attempt;
            attempt = attempt.wrapping_add(1);

            let k = match opts.k {
                Some(k) => {
                    let k = k(iter);
                    let bits = k.byte_length() * 8;
                    self.truncate_to_n(k, bits, true)
                }
                None => {
                    let bytes = Zeroizing::new(drbg.generate(len)?);
                    self.truncate_to_n(BigInt::from_be_bytes(&bytes), len * 8, true)
                }
            };
            let k = Zeroizing::new(k);

            if k.cmpn(1) != core::cmp::Ordering::Greater || *k >= n1 {
                log::trace!("ecdsa nonce candidate out of range");
                continue;
            }

            let kp = g.mul(&k);
            let (Ok(x), Ok(y)) = (kp.get_x(), kp.get_y()) else {
                log::trace!("ecdsa nonce candidate produced the point at infinity");
                continue;
            };

            let r = x.rem_euclid(n);
            if r.is_zero() {
                log::trace!("ecdsa nonce candidate produced r = 0");
                continue;
            }

            let kinv = k.invm(n)?;
            let s = (&kinv * &(&(&r * private) + &e)).rem_euclid(n);
            if s.is_zero() {
                log::trace!("ecdsa nonce candidate produced s = 0");
                continue;
            }

            let mut recovery = u8::from(y.is_odd()) | (u8::from(x != r) << 1);
            let mut s = s;
            if opts.canonical && s > (n >> 1) {
                s = n - &s;
                recovery ^= 1;
            }

            return Ok(Signature::new(r, s, Some(recovery)));
        }
    }

    /// Verify `sig` over `msg` against `key`. Any malformed input yields `false`.
    pub fn verify<'a>(
        &self,
        msg: impl Into<ByteSource<'a>>,
        sig: &Signature,
        key: &KeyPair,
    ) -> bool {
        self.try_verify(msg.into(), sig, key).unwrap_or(false)
    }

    /// Verify a DER-encoded signature. Malformed DER yields `false`.
    pub fn verify_der<'a, 'b>(
        &self,
        msg: impl Into<ByteSource<'a>>,
        der: impl Into<ByteSource<'b>>,
        key: &KeyPair,
    ) -> bool {
        match Signature::from_der(der) {
            Ok(sig) => self.verify(msg, &sig, key),
            Err(_) => false,
        }
    }

    fn try_verify(&self, msg: ByteSource<'_>, sig: &Signature, key: &KeyPair) -> Result<bool> {
        let Point::Short(g) = self.g() else {
            return Ok(false);
        };
        let Point::Short(q) = key.get_public()? else {
            return Ok(false);
        };
        if !same_curve(self.curve(), key.get_public()?) {
            return Ok(false);
        }

        let msg = msg.to_bytes()?;
        let e = self.truncate_to_n(BigInt::from_be_bytes(&msg), msg.len() * 8, false);
        let (r, s) = (sig.r(), sig.s());
        if !self.in_scalar_range(r) || !self.in_scalar_range(s) {
            return Ok(false);
        }

        let n = self.n();
        let sinv = s.invm(n)?;
        let u1 = (&sinv * &e).rem_euclid(n);
        let u2 = (&sinv * r).rem_euclid(n);

        let p = g.jmul_add(&u1, q, &u2);
        if p.is_infinity() {
            return Ok(false);
        }
        Ok(p.eq_x_to_p(r))
    }

    /// Recover the public key from a signature and the recovery parameter `j`.
    pub fn recover_public_key<'a>(
        &self,
        msg: impl Into<ByteSource<'a>>,
        sig: &Signature,
        j: u8,
    ) -> Result<Point> {
        if j > 3 {
            return Err(Error::OutOfRange);
        }
        let Curve::Short(curve) = self.curve() else {
            return Err(Error::UnsupportedOperation);
        };
        let Point::Short(g) = self.g() else {
            return Err(Error::UnsupportedOperation);
        };

        let (r, s) = (sig.r(), sig.s());
        if !self.in_scalar_range(r) || !self.in_scalar_range(s) {
            return Err(Error::OutOfRange);
        }

        let n = self.n();
        let y_odd = j & 1 == 1;
        let second_key = j >> 1 == 1;
        let x = if second_key {
            if *r >= curve.p().rem_euclid(n) {
                return Err(Error::OutOfRange);
            }
            r + n
        } else {
            r.clone()
        };
        let big_r = curve.point_from_x(&x, y_odd)?;

        let msg = msg.into().to_bytes()?;
        let e = self.truncate_to_n(BigInt::from_be_bytes(&msg), msg.len() * 8, false);
        let rinv = r.invm(n)?;
        let s1 = (&(n - &e) * &rinv).rem_euclid(n);
        let s2 = (s * &rinv).rem_euclid(n);

        Ok(Point::Short(g.mul_add(&s1, &big_r, &s2)))
    }

    /// The recovery parameter that makes [`Ec::recover_public_key`] return `q`.
    ///
    /// Uses the parameter stored in `sig` when present. Otherwise exactly one
    /// candidate must reproduce `q`.
    pub fn get_key_recovery_param<'a>(
        &self,
        msg: impl Into<ByteSource<'a>>,
        sig: &Signature,
        q: &Point,
    ) -> Result<u8> {
        if let Some(j) = sig.recovery_param() {
            return Ok(j);
        }

        let msg = msg.into().to_bytes()?;
        let mut found = None;
        for j in 0..4 {
            let Ok(candidate) = self.recover_public_key(&msg, sig, j) else {
                continue;
            };
            if candidate == *q {
                if found.is_some() {
                    return Err(Error::InvalidEncoding);
                }
                found = Some(j);
            }
        }
        found.ok_or(Error::InvalidEncoding)
    }

    fn in_scalar_range(&self, v: &BigInt) -> bool {
        v.cmpn(1) != core::cmp::Ordering::Less && v < self.n()
    }

    /// Keep the leftmost `bit_len(n)` of the `bits` bits of `v`, then reduce
    /// once unless `trunc_only`.
    fn truncate_to_n(&self, mut v: BigInt, bits: usize, trunc_only: bool) -> BigInt {
        let n = self.n();
        let delta = bits.saturating_sub(n.bit_length());
        if delta > 0 {
            v.shr_in_place(delta);
        }
        if !trunc_only && v >= *n {
            v -= n;
        }
        v
    }
}

fn same_curve(curve: &Curve, point: &Point) -> bool {
    match (curve, point) {
        (Curve::Short(c), Point::Short(p)) => Arc::ptr_eq(c, p.curve()),
        (Curve::Mont(c), Point::Mont(p)) => Arc::ptr_eq(c, p.curve()),
        (Curve::Edwards(c), Point::Edwards(p)) => Arc::ptr_eq(c, p.curve()),
        _ => false,
    }
}

#[cfg(feature = "getrandom")]
fn os_entropy(len: usize) -> Result<Vec<u8>> {
    use rand_core::{OsRng, TryRngCore};

    let mut buf = vec![0u8; len];
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|_| Error::InsufficientEntropy)?;
    Ok(buf)
}

#[cfg(not(feature = "getrandom"))]
fn os_entropy(_len: usize) -> Result<Vec<u8>> {
    Err(Error::InsufficientEntropy)
}
