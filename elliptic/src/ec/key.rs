//! ECDSA and ECDH key pairs.

use super::{Ec, SignOptions, Signature};
use crate::{
    ByteSource, Error, Result,
    curve::{Curve, Point},
};
use alloc::{boxed::Box, sync::Arc, vec::Vec};
use bignum::BigInt;
use core::fmt;
use once_cell::race::OnceBox;
use zeroize::Zeroizing;

/// Options for [`Ec::gen_key_pair`].
#[derive(Clone, Debug, Default)]
pub struct KeyPairOptions<'a> {
    /// Seed entropy for the deterministic generator. Drawn from the random
    /// source when absent.
    pub entropy: Option<ByteSource<'a>>,

    /// Personalization string for the deterministic generator.
    pub pers: Option<ByteSource<'a>>,
}

/// Outcome of [`KeyPair::validate`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Validation {
    /// Is the public key usable?
    pub result: bool,

    /// Why not, when it is not.
    pub reason: Option<&'static str>,
}

/// A private scalar, a public point, or both.
///
/// The public point of a private-only key pair is derived on first use.
pub struct KeyPair {
    ec: Ec,
    private: Option<Zeroizing<BigInt>>,
    public: OnceBox<Point>,
}

impl KeyPair {
    pub(crate) fn from_private(ec: Ec, private: BigInt) -> Self {
        Self {
            ec,
            private: Some(Zeroizing::new(private.rem_euclid(ec.n()))),
            public: OnceBox::new(),
        }
    }

    pub(crate) fn from_public(ec: Ec, public: Point) -> Self {
        let cell = OnceBox::new();
        let _ = cell.set(Box::new(public));
        Self {
            ec,
            private: None,
            public: cell,
        }
    }

    pub(crate) fn from_parts(ec: Ec, private: BigInt, public: Point) -> Self {
        let cell = OnceBox::new();
        let _ = cell.set(Box::new(public));
        Self {
            ec,
            private: Some(Zeroizing::new(private)),
            public: cell,
        }
    }

    /// The context this key belongs to.
    pub fn ec(&self) -> Ec {
        self.ec
    }

    /// The public point.
    pub fn get_public(&self) -> Result<&Point> {
        self.public.get_or_try_init(|| {
            let private = self.get_private()?;
            Ok(Box::new(self.ec.g().mul(private)))
        })
    }

    /// Encoded public point, SEC1 compressed when `compact`.
    pub fn encode_public(&self, compact: bool) -> Result<Vec<u8>> {
        self.get_public()?.encode(compact)
    }

    /// The private scalar.
    pub fn get_private(&self) -> Result<&BigInt> {
        self.private.as_deref().ok_or(Error::MissingKeyMaterial)
    }

    /// Check that the public point is a usable key: not the identity, on the
    /// curve, and of order `n`.
    pub fn validate(&self) -> Validation {
        let invalid = |reason| Validation {
            result: false,
            reason: Some(reason),
        };

        let Ok(public) = self.get_public() else {
            return invalid("Missing public key");
        };
        if public.is_infinity() {
            return invalid("Invalid public key");
        }
        if !public.validate() {
            return invalid("Public key is not a point");
        }
        if !public.mul(self.ec.n()).is_infinity() {
            return invalid("Public key * N != O");
        }

        Validation {
            result: true,
            reason: None,
        }
    }

    /// ECDH: the x-coordinate of `private * peer`.
    ///
    /// Short Weierstrass and Edwards peers must lie on this key's curve.
    /// Montgomery peers are not validated: points on the twist are accepted.
    pub fn derive(&self, peer: &Point) -> Result<BigInt> {
        let same_mont_curve = matches!(
            (self.ec.curve(), peer),
            (Curve::Mont(c), Point::Mont(p)) if Arc::ptr_eq(c, p.curve())
        );
        if !same_mont_curve && !self.ec.curve().validate(peer) {
            return Err(Error::PointNotOnCurve);
        }

        peer.mul(self.get_private()?).get_x()
    }

    /// Sign `msg` with this key.
    pub fn sign<'a>(
        &self,
        msg: impl Into<ByteSource<'a>>,
        opts: &SignOptions<'_>,
    ) -> Result<Signature> {
        self.ec.sign(msg, self, opts)
    }

    /// Verify `sig` over `msg` against this key.
    pub fn verify<'a>(&self, msg: impl Into<ByteSource<'a>>, sig: &Signature) -> bool {
        self.ec.verify(msg, sig, self)
    }
}

impl Clone for KeyPair {
    fn clone(&self) -> Self {
        let public = OnceBox::new();
        if let Some(p) = self.public.get() {
            let _ = public.set(Box::new(p.clone()));
        }
        Self {
            ec: self.ec,
            private: self.private.clone(),
            public,
        }
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("curve", &self.ec.preset().name())
            .field("public", &self.public.get())
            .field("has_private", &self.private.is_some())
            .finish()
    }
}
