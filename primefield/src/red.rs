//! Reduction contexts.

use crate::{
    Error, FieldElement, Result, mersenne::PseudoMersenne, mont::Montgomery, sqrt::SqrtAlgorithm,
};
use alloc::sync::Arc;
use bignum::BigInt;
use core::fmt;

/// Reduction strategy used by a [`Red`] context.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReductionKind {
    /// Division-based reduction.
    Plain,

    /// Folding for primes of the shape `2^n - k`.
    PseudoMersenne,

    /// Montgomery multiplication. Elements are stored as `aR mod m`.
    Montgomery,
}

#[derive(Clone, Debug)]
enum Reducer {
    Plain,
    PseudoMersenne(PseudoMersenne),
    Montgomery(Montgomery),
}

/// Arithmetic context for a fixed modulus.
pub struct Red {
    modulus: BigInt,
    reducer: Reducer,
    sqrt: SqrtAlgorithm,
    name: Option<&'static str>,
}

impl Red {
    /// Context using plain division-based reduction. Requires `m > 1`.
    pub fn new(m: BigInt) -> Result<Arc<Self>> {
        Self::build(m, Reducer::Plain, None)
    }

    /// Context using Montgomery multiplication. Requires an odd `m > 1`.
    pub fn mont(m: BigInt) -> Result<Arc<Self>> {
        if m.is_even() {
            return Err(Error::InvalidModulus);
        }
        let mont = Montgomery::new(&m);
        Self::build(m, Reducer::Montgomery(mont), None)
    }

    /// Context for one of the named pseudo-Mersenne primes:
    /// `k256`, `p224`, `p192` or `p25519`.
    pub fn named(name: &'static str) -> Result<Arc<Self>> {
        let pm = PseudoMersenne::named(name).ok_or(Error::UnknownPrime)?;
        let m = pm.prime();
        Self::build(m, Reducer::PseudoMersenne(pm), Some(name))
    }

    /// Pick the fastest context for `m`: the named pseudo-Mersenne context
    /// when `m` is one of the named primes, Montgomery for other odd moduli,
    /// and plain reduction otherwise.
    pub fn for_modulus(m: BigInt) -> Result<Arc<Self>> {
        for name in ["k256", "p224", "p192", "p25519"] {
            if PseudoMersenne::named(name).is_some_and(|pm| pm.prime() == m) {
                return Self::named(name);
            }
        }

        if m.is_odd() {
            Self::mont(m)
        } else {
            Self::new(m)
        }
    }

    fn build(m: BigInt, reducer: Reducer, name: Option<&'static str>) -> Result<Arc<Self>> {
        if m.is_neg() || m.bit_length() < 2 {
            return Err(Error::InvalidModulus);
        }

        let sqrt = SqrtAlgorithm::for_modulus(&m);
        Ok(Arc::new(Self {
            modulus: m,
            reducer,
            sqrt,
            name,
        }))
    }

    /// The modulus.
    pub fn modulus(&self) -> &BigInt {
        &self.modulus
    }

    /// Name of the prime, for named contexts.
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    /// Reduction strategy.
    pub fn kind(&self) -> ReductionKind {
        match self.reducer {
            Reducer::Plain => ReductionKind::Plain,
            Reducer::PseudoMersenne(_) => ReductionKind::PseudoMersenne,
            Reducer::Montgomery(_) => ReductionKind::Montgomery,
        }
    }

    /// Number of limbs in the modulus.
    pub fn limb_len(&self) -> usize {
        self.modulus.limb_len()
    }

    /// Number of bytes in the modulus.
    pub fn byte_len(&self) -> usize {
        self.modulus.byte_length()
    }

    /// Can elements of `other` be combined with elements of `self`?
    pub fn is_compatible(&self, other: &Red) -> bool {
        core::ptr::eq(self, other)
            || (self.modulus == other.modulus
                && (self.kind() == ReductionKind::Montgomery)
                    == (other.kind() == ReductionKind::Montgomery))
    }

    /// Bring an arbitrary integer into this context.
    pub fn convert_to(self: &Arc<Self>, a: &BigInt) -> FieldElement {
        let value = match &self.reducer {
            Reducer::Montgomery(mont) => mont.to_mont(&self.modulus, a),
            _ => self.imod(a),
        };
        FieldElement::from_raw(value, Arc::clone(self))
    }

    /// Take an element out of this context as a canonical integer in `[0, m)`.
    pub fn convert_from(&self, a: &FieldElement) -> Result<BigInt> {
        if !self.is_compatible(a.red()) {
            return Err(Error::ContextMismatch);
        }
        Ok(self.from_raw(a.raw()))
    }

    /// Additive identity.
    pub fn zero(self: &Arc<Self>) -> FieldElement {
        FieldElement::from_raw(BigInt::zero(), Arc::clone(self))
    }

    /// Multiplicative identity.
    pub fn one(self: &Arc<Self>) -> FieldElement {
        self.convert_to(&BigInt::one())
    }

    /// Reduce any integer into `[0, m)` without changing representation.
    pub(crate) fn imod(&self, a: &BigInt) -> BigInt {
        match &self.reducer {
            Reducer::PseudoMersenne(pm) if !a.is_neg() => pm.reduce(&self.modulus, a.clone()),
            _ => a.rem_euclid(&self.modulus),
        }
    }

    /// Reduce the product of two internal representations.
    pub(crate) fn reduce_product(&self, t: BigInt) -> BigInt {
        match &self.reducer {
            Reducer::Plain => t.rem_euclid(&self.modulus),
            Reducer::PseudoMersenne(pm) => pm.reduce(&self.modulus, t),
            Reducer::Montgomery(mont) => mont.redc(&self.modulus, &t),
        }
    }

    /// Internal representation of the multiplicative inverse.
    pub(crate) fn invert_raw(&self, raw: &BigInt) -> Result<BigInt> {
        if raw.is_zero() {
            return Err(Error::NotInvertible);
        }

        let inv = raw
            .invm(&self.modulus)
            .map_err(|_| Error::NotInvertible)?;

        Ok(match &self.reducer {
            // (aR)^-1 * R^2 = a^-1 R
            Reducer::Montgomery(mont) => (&inv * &mont.r2).rem_euclid(&self.modulus),
            _ => inv,
        })
    }

    /// Canonical integer for an internal representation.
    pub(crate) fn from_raw(&self, raw: &BigInt) -> BigInt {
        match &self.reducer {
            Reducer::Montgomery(mont) => mont.redc(&self.modulus, raw),
            _ => raw.clone(),
        }
    }

    pub(crate) fn sqrt_algorithm(&self) -> &SqrtAlgorithm {
        &self.sqrt
    }
}

impl fmt::Debug for Red {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Red")
            .field("modulus", &self.modulus)
            .field("kind", &self.kind())
            .field("name", &self.name)
            .finish()
    }
}
