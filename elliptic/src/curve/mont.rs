//! Montgomery curves `b y^2 = x^3 + a x^2 + x` with x-only `(X : Z)` arithmetic.

use super::{field_bytes, invert_nonzero, parse};
use crate::{Error, Result};
use alloc::{sync::Arc, vec::Vec};
use bignum::BigInt;
use core::fmt;
use primefield::{FieldElement, Red};
use subtle::Choice;

/// Parameters of a Montgomery curve, as hex strings.
pub(crate) struct MontParams {
    pub(crate) p: &'static str,
    pub(crate) a: &'static str,
    pub(crate) b: &'static str,
    pub(crate) n: &'static str,
    pub(crate) gx: &'static str,
}

/// A Montgomery curve with a base point of order `n`.
pub struct MontCurve {
    red: Arc<Red>,
    n: BigInt,
    a: FieldElement,
    b: FieldElement,

    /// `(a + 2) / 4`.
    a24: FieldElement,
    g_x: FieldElement,
}

impl fmt::Debug for MontCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MontCurve")
            .field("p", self.p())
            .field("a", &self.a)
            .finish_non_exhaustive()
    }
}

impl MontCurve {
    pub(crate) fn new(params: &MontParams) -> Result<Arc<Self>> {
        let red = Red::for_modulus(parse(params.p)?)?;
        let a = red.convert_to(&parse(params.a)?);
        let b = red.convert_to(&parse(params.b)?);
        let four = red.convert_to(&BigInt::from(4u32));
        let a24 = &(&a + &red.convert_to(&BigInt::from(2u32))) * &four.invert()?;
        let g_x = red.convert_to(&parse(params.gx)?);

        let curve = Self {
            n: parse(params.n)?,
            red,
            a,
            b,
            a24,
            g_x,
        };
        if !curve.is_on_curve(&curve.g_x) {
            return Err(Error::PointNotOnCurve);
        }
        Ok(Arc::new(curve))
    }

    /// Reduction context of the base field.
    pub fn red(&self) -> &Arc<Red> {
        &self.red
    }

    /// Field prime.
    pub fn p(&self) -> &BigInt {
        self.red.modulus()
    }

    /// Order of the base point.
    pub fn n(&self) -> &BigInt {
        &self.n
    }

    /// Coefficient `a`.
    pub fn a(&self) -> &FieldElement {
        &self.a
    }

    /// Coefficient `b`.
    pub fn b(&self) -> &FieldElement {
        &self.b
    }

    /// Length of an x-coordinate encoding.
    pub fn byte_len(&self) -> usize {
        self.red.byte_len()
    }

    /// The base point.
    pub fn g(self: &Arc<Self>) -> MontPoint {
        self.wrap(self.g_x.clone(), self.red.one())
    }

    /// The point at infinity, `(1 : 0)`.
    pub fn infinity(self: &Arc<Self>) -> MontPoint {
        self.wrap(self.red.one(), self.red.zero())
    }

    /// Point with affine x-coordinate `x`, which must lie on the curve.
    pub fn point(self: &Arc<Self>, x: &BigInt) -> Result<MontPoint> {
        let point = self.point_unchecked(x)?;
        if !self.is_on_curve(&point.x) {
            return Err(Error::PointNotOnCurve);
        }
        Ok(point)
    }

    /// Point with affine x-coordinate `x`, without the curve check. The
    /// result may lie on the quadratic twist.
    pub fn point_unchecked(self: &Arc<Self>, x: &BigInt) -> Result<MontPoint> {
        if x.is_neg() || x >= self.p() {
            return Err(Error::OutOfRange);
        }
        Ok(self.wrap(self.red.convert_to(x), self.red.one()))
    }

    /// Is the x-coordinate of `point` that of a point on the curve?
    pub fn validate(&self, point: &MontPoint) -> bool {
        if point.is_infinity() {
            return true;
        }
        let x = &point.x * &invert_nonzero(&point.z);
        self.is_on_curve(&x)
    }

    /// Decode a big-endian x-coordinate of exactly [`MontCurve::byte_len`] bytes.
    pub fn decode_point(self: &Arc<Self>, bytes: &[u8]) -> Result<MontPoint> {
        if bytes.len() != self.byte_len() {
            return Err(Error::InvalidEncoding);
        }
        let x = BigInt::from_be_bytes(bytes);
        if &x >= self.p() {
            return Err(Error::InvalidEncoding);
        }
        self.point_unchecked(&x)
    }

    /// `(x^3 + a x^2 + x) / b` is a square, so that some `y` completes the point.
    fn is_on_curve(&self, x: &FieldElement) -> bool {
        let x2 = x.square();
        let rhs = &(&(&(&x2 * x) + &(&self.a * &x2)) + x) * &invert_nonzero(&self.b);
        rhs.sqrt().is_ok_and(|y| y.square() == rhs)
    }

    fn wrap(self: &Arc<Self>, x: FieldElement, z: FieldElement) -> MontPoint {
        MontPoint {
            curve: Arc::clone(self),
            x,
            z,
        }
    }
}

/// Point on a [`MontCurve`], known only by its x-coordinate in projective form.
#[derive(Clone)]
pub struct MontPoint {
    curve: Arc<MontCurve>,
    x: FieldElement,
    z: FieldElement,
}

impl MontPoint {
    /// The curve this point lives on.
    pub fn curve(&self) -> &Arc<MontCurve> {
        &self.curve
    }

    /// Is this the point at infinity?
    pub fn is_infinity(&self) -> bool {
        self.z.is_zero()
    }

    /// Affine x-coordinate.
    pub fn get_x(&self) -> Result<BigInt> {
        if self.is_infinity() {
            return Err(Error::PointAtInfinity);
        }
        Ok((&self.x * &invert_nonzero(&self.z)).to_bigint())
    }

    /// Does the point lie on the curve rather than its twist?
    pub fn validate(&self) -> bool {
        self.curve.validate(self)
    }

    /// The same point with `Z = 1`. The point at infinity is returned as is.
    pub fn normalize(&self) -> MontPoint {
        if self.is_infinity() {
            return self.clone();
        }
        let x = &self.x * &invert_nonzero(&self.z);
        self.curve.wrap(x, self.curve.red.one())
    }

    /// `2 self`.
    pub fn dbl(&self) -> MontPoint {
        let a = &self.x + &self.z;
        let aa = a.square();
        let b = &self.x - &self.z;
        let bb = b.square();
        let c = &aa - &bb;

        let x = &aa * &bb;
        let z = &c * &(&bb + &(&self.curve.a24 * &c));
        self.curve.wrap(x, z)
    }

    /// `self + other`, given `diff = self - other`.
    pub fn diff_add(&self, other: &MontPoint, diff: &MontPoint) -> MontPoint {
        let a = &self.x + &self.z;
        let b = &self.x - &self.z;
        let c = &other.x + &other.z;
        let d = &other.x - &other.z;
        let da = &d * &a;
        let cb = &c * &b;

        let x = &diff.z * &(&da + &cb).square();
        let z = &diff.x * &(&da - &cb).square();
        self.curve.wrap(x, z)
    }

    /// `|k| self` by the Montgomery ladder. `k` is not reduced modulo `n`, so
    /// points outside the prime-order subgroup are multiplied correctly.
    ///
    /// The ladder runs for at least as many steps as the field has bits and
    /// swaps its two registers with [`FieldElement::conditional_swap`].
    pub fn mul(&self, k: &BigInt) -> MontPoint {
        let k = k.abs();
        let bits = k.bit_length().max(self.curve.p().bit_length());

        let mut r0 = self.curve.infinity();
        let mut r1 = self.clone();
        let mut swap = false;
        for i in (0..bits).rev() {
            let bit = k.test_bit(i);
            cswap(&mut r0, &mut r1, swap ^ bit);
            swap = bit;

            r1 = r0.diff_add(&r1, self);
            r0 = r0.dbl();
        }
        cswap(&mut r0, &mut r1, swap);
        r0
    }

    /// Big-endian affine x-coordinate, [`MontCurve::byte_len`] bytes long.
    pub fn encode(&self) -> Result<Vec<u8>> {
        if self.is_infinity() {
            return Err(Error::PointAtInfinity);
        }
        let x = &self.x * &invert_nonzero(&self.z);
        Ok(field_bytes(&x, self.curve.byte_len()))
    }
}

fn cswap(a: &mut MontPoint, b: &mut MontPoint, swap: bool) {
    let choice = Choice::from(u8::from(swap));
    FieldElement::conditional_swap(&mut a.x, &mut b.x, choice);
    FieldElement::conditional_swap(&mut a.z, &mut b.z, choice);
}

impl PartialEq for MontPoint {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.curve, &other.curve)
            && self.is_infinity() == other.is_infinity()
            && &self.x * &other.z == &other.x * &self.z
    }
}

impl Eq for MontPoint {}

impl fmt::Debug for MontPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get_x() {
            Ok(x) => write!(f, "MontPoint {{ x: {x:#x} }}"),
            Err(_) => write!(f, "MontPoint(infinity)"),
        }
    }
}
