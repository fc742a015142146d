//! Curve families and their points.
//!
//! [`Curve`] and [`Point`] wrap the three concrete families behind one
//! interface. Operations a family cannot express, such as adding two
//! x-only Montgomery points, return [`Error::UnsupportedOperation`].

mod edwards;
mod mont;
mod short;
pub(crate) mod wnaf;

pub use self::{
    edwards::{EdwardsCurve, EdwardsPoint},
    mont::{MontCurve, MontPoint},
    short::{Endomorphism, JacobianPoint, ShortCurve, ShortPoint},
    wnaf::{get_jsf, get_naf},
};
pub(crate) use self::{
    edwards::EdwardsParams,
    mont::MontParams,
    short::{EndoParams, ShortParams},
};

use crate::{Error, Result};
use alloc::{sync::Arc, vec::Vec};
use bignum::BigInt;
use primefield::{FieldElement, Red};

/// Curve family.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CurveKind {
    /// `y^2 = x^3 + ax + b`.
    Short,
    /// `b y^2 = x^3 + a x^2 + x`.
    Mont,
    /// `a x^2 + y^2 = 1 + d x^2 y^2`.
    Edwards,
}

/// A curve of any family.
#[derive(Clone, Debug)]
pub enum Curve {
    /// Short Weierstrass curve.
    Short(Arc<ShortCurve>),
    /// Montgomery curve.
    Mont(Arc<MontCurve>),
    /// Twisted Edwards curve.
    Edwards(Arc<EdwardsCurve>),
}

impl Curve {
    /// Family of this curve.
    pub fn kind(&self) -> CurveKind {
        match self {
            Curve::Short(_) => CurveKind::Short,
            Curve::Mont(_) => CurveKind::Mont,
            Curve::Edwards(_) => CurveKind::Edwards,
        }
    }

    /// Reduction context of the base field.
    pub fn red(&self) -> &Arc<Red> {
        match self {
            Curve::Short(c) => c.red(),
            Curve::Mont(c) => c.red(),
            Curve::Edwards(c) => c.red(),
        }
    }

    /// Field prime.
    pub fn p(&self) -> &BigInt {
        self.red().modulus()
    }

    /// Order of the base point.
    pub fn n(&self) -> &BigInt {
        match self {
            Curve::Short(c) => c.n(),
            Curve::Mont(c) => c.n(),
            Curve::Edwards(c) => c.n(),
        }
    }

    /// Length of a field element encoding.
    pub fn byte_len(&self) -> usize {
        self.red().byte_len()
    }

    /// The base point.
    pub fn g(&self) -> Point {
        match self {
            Curve::Short(c) => Point::Short(c.g()),
            Curve::Mont(c) => Point::Mont(c.g()),
            Curve::Edwards(c) => Point::Edwards(c.g()),
        }
    }

    /// The neutral element.
    pub fn infinity(&self) -> Point {
        match self {
            Curve::Short(c) => Point::Short(c.infinity()),
            Curve::Mont(c) => Point::Mont(c.infinity()),
            Curve::Edwards(c) => Point::Edwards(c.infinity()),
        }
    }

    /// Point from affine coordinates. Montgomery points ignore `y`.
    pub fn point(&self, x: &BigInt, y: &BigInt) -> Result<Point> {
        match self {
            Curve::Short(c) => c.point(x, y).map(Point::Short),
            Curve::Mont(c) => c.point(x).map(Point::Mont),
            Curve::Edwards(c) => c.point(x, y).map(Point::Edwards),
        }
    }

    /// Point with x-coordinate `x` and the other coordinate of the requested
    /// parity.
    pub fn point_from_x(&self, x: &BigInt, odd: bool) -> Result<Point> {
        match self {
            Curve::Short(c) => c.point_from_x(x, odd).map(Point::Short),
            Curve::Mont(c) => c.point(x).map(Point::Mont),
            Curve::Edwards(c) => c.point_from_x(x, odd).map(Point::Edwards),
        }
    }

    /// Decode a point in the family's encoding.
    pub fn decode_point(&self, bytes: &[u8]) -> Result<Point> {
        match self {
            Curve::Short(c) => c.decode_point(bytes).map(Point::Short),
            Curve::Mont(c) => c.decode_point(bytes).map(Point::Mont),
            Curve::Edwards(c) => c.decode_point(bytes).map(Point::Edwards),
        }
    }

    /// Does `point` belong to this curve and satisfy its equation?
    pub fn validate(&self, point: &Point) -> bool {
        match (self, point) {
            (Curve::Short(c), Point::Short(p)) => Arc::ptr_eq(c, p.curve()) && p.validate(),
            (Curve::Mont(c), Point::Mont(p)) => Arc::ptr_eq(c, p.curve()) && p.validate(),
            (Curve::Edwards(c), Point::Edwards(p)) => Arc::ptr_eq(c, p.curve()) && p.validate(),
            _ => false,
        }
    }
}

/// A point on a curve of any family.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Point {
    /// Short Weierstrass point.
    Short(ShortPoint),
    /// Montgomery x-only point.
    Mont(MontPoint),
    /// Twisted Edwards point.
    Edwards(EdwardsPoint),
}

impl Point {
    /// The curve this point lives on.
    pub fn curve(&self) -> Curve {
        match self {
            Point::Short(p) => Curve::Short(Arc::clone(p.curve())),
            Point::Mont(p) => Curve::Mont(Arc::clone(p.curve())),
            Point::Edwards(p) => Curve::Edwards(Arc::clone(p.curve())),
        }
    }

    /// Is this the neutral element?
    pub fn is_infinity(&self) -> bool {
        match self {
            Point::Short(p) => p.is_infinity(),
            Point::Mont(p) => p.is_infinity(),
            Point::Edwards(p) => p.is_infinity(),
        }
    }

    /// `self + other`. Fails for Montgomery points and mixed families.
    pub fn add(&self, other: &Point) -> Result<Point> {
        match (self, other) {
            (Point::Short(a), Point::Short(b)) => Ok(Point::Short(a.add(b))),
            (Point::Edwards(a), Point::Edwards(b)) => Ok(Point::Edwards(a.add(b))),
            _ => Err(Error::UnsupportedOperation),
        }
    }

    /// `2 self`.
    pub fn dbl(&self) -> Point {
        match self {
            Point::Short(p) => Point::Short(p.dbl()),
            Point::Mont(p) => Point::Mont(p.dbl()),
            Point::Edwards(p) => Point::Edwards(p.dbl()),
        }
    }

    /// `-self`. Fails for Montgomery points.
    pub fn neg(&self) -> Result<Point> {
        match self {
            Point::Short(p) => Ok(Point::Short(p.neg())),
            Point::Edwards(p) => Ok(Point::Edwards(p.neg())),
            Point::Mont(_) => Err(Error::UnsupportedOperation),
        }
    }

    /// `k self`.
    pub fn mul(&self, k: &BigInt) -> Point {
        match self {
            Point::Short(p) => Point::Short(p.mul(k)),
            Point::Mont(p) => Point::Mont(p.mul(k)),
            Point::Edwards(p) => Point::Edwards(p.mul(k)),
        }
    }

    /// `k1 self + k2 p2`. Fails for Montgomery points and mixed families.
    pub fn mul_add(&self, k1: &BigInt, p2: &Point, k2: &BigInt) -> Result<Point> {
        match (self, p2) {
            (Point::Short(a), Point::Short(b)) => Ok(Point::Short(a.mul_add(k1, b, k2))),
            (Point::Edwards(a), Point::Edwards(b)) => Ok(Point::Edwards(a.mul_add(k1, b, k2))),
            _ => Err(Error::UnsupportedOperation),
        }
    }

    /// Affine x-coordinate.
    pub fn get_x(&self) -> Result<BigInt> {
        match self {
            Point::Short(p) => p.get_x(),
            Point::Mont(p) => p.get_x(),
            Point::Edwards(p) => Ok(p.get_x()),
        }
    }

    /// Affine y-coordinate. Fails for Montgomery points.
    pub fn get_y(&self) -> Result<BigInt> {
        match self {
            Point::Short(p) => p.get_y(),
            Point::Mont(_) => Err(Error::UnsupportedOperation),
            Point::Edwards(p) => Ok(p.get_y()),
        }
    }

    /// Encode the point. `compact` selects SEC1 compression for short
    /// Weierstrass points and is ignored by the other families.
    pub fn encode(&self, compact: bool) -> Result<Vec<u8>> {
        match self {
            Point::Short(p) => Ok(p.encode(compact)),
            Point::Mont(p) => p.encode(),
            Point::Edwards(p) => Ok(p.encode()),
        }
    }

    /// Does the point satisfy its curve equation?
    pub fn validate(&self) -> bool {
        match self {
            Point::Short(p) => p.validate(),
            Point::Mont(p) => p.validate(),
            Point::Edwards(p) => p.validate(),
        }
    }

    /// Build fixed-base tables for scalars of up to `power` bits. Montgomery
    /// points have no tables.
    pub fn precompute(&self, power: usize) {
        match self {
            Point::Short(p) => p.precompute(power),
            Point::Mont(_) => {}
            Point::Edwards(p) => p.precompute(power),
        }
    }
}

impl From<ShortPoint> for Point {
    fn from(p: ShortPoint) -> Point {
        Point::Short(p)
    }
}

impl From<MontPoint> for Point {
    fn from(p: MontPoint) -> Point {
        Point::Mont(p)
    }
}

impl From<EdwardsPoint> for Point {
    fn from(p: EdwardsPoint) -> Point {
        Point::Edwards(p)
    }
}

pub(crate) fn parse(hex: &str) -> Result<BigInt> {
    Ok(BigInt::from_str_radix(hex, 16)?)
}

pub(crate) fn invert_nonzero(fe: &FieldElement) -> FieldElement {
    fe.invert()
        .expect("non-zero elements of a prime field are invertible")
}

/// Big-endian bytes of a field element, left-padded to `len`.
pub(crate) fn field_bytes(fe: &FieldElement, len: usize) -> Vec<u8> {
    fe.to_bigint()
        .to_be_bytes_padded(len)
        .expect("field elements fit in the field byte length")
}
