//! Twisted Edwards curves `a x^2 + y^2 = 1 + d x^2 y^2` in extended coordinates.
//!
//! Addition follows add-2008-hwcd, using the faster `a = -1` variant with a
//! precomputed `2d` when it applies, and doubling follows dbl-2008-hwcd.

use super::{
    invert_nonzero, parse,
    wnaf::{self, NafPoints, Precomputed, WnafCurve},
};
use crate::{Error, Result};
use alloc::{boxed::Box, sync::Arc, vec::Vec};
use bignum::BigInt;
use core::fmt;
use once_cell::race::OnceBox;
use primefield::{FieldElement, Red};

/// Parameters of a twisted Edwards curve, as hex strings.
pub(crate) struct EdwardsParams {
    pub(crate) p: &'static str,
    pub(crate) a: &'static str,
    pub(crate) d: &'static str,
    pub(crate) n: &'static str,
    pub(crate) gx: &'static str,
    pub(crate) gy: &'static str,
}

/// `(X, Y, Z, T)` representing `(X / Z, Y / Z)` with `T = XY / Z`.
#[derive(Clone, Debug)]
pub(crate) struct Extended {
    x: FieldElement,
    y: FieldElement,
    z: FieldElement,
    t: FieldElement,
}

type Table = Precomputed<Extended>;

/// A twisted Edwards curve with a base point of order `n`.
pub struct EdwardsCurve {
    red: Arc<Red>,
    n: BigInt,
    a: FieldElement,
    d: FieldElement,
    dd: FieldElement,
    minus_one_a: bool,
    g: Extended,
    g_table: Arc<OnceBox<Table>>,
}

impl fmt::Debug for EdwardsCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdwardsCurve")
            .field("p", self.p())
            .field("d", &self.d)
            .finish_non_exhaustive()
    }
}

impl EdwardsCurve {
    pub(crate) fn new(params: &EdwardsParams) -> Result<Arc<Self>> {
        let red = Red::for_modulus(parse(params.p)?)?;
        let a = red.convert_to(&parse(params.a)?);
        let d = red.convert_to(&parse(params.d)?);
        let minus_one_a = a == -red.one();

        let x = red.convert_to(&parse(params.gx)?);
        let y = red.convert_to(&parse(params.gy)?);
        let curve = Self {
            n: parse(params.n)?,
            dd: d.double(),
            g: Extended {
                t: &x * &y,
                z: red.one(),
                x,
                y,
            },
            red,
            a,
            d,
            minus_one_a,
            g_table: Arc::new(OnceBox::new()),
        };
        if !curve.on_curve(&curve.g.x, &curve.g.y) {
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

    /// Coefficient `d`.
    pub fn d(&self) -> &FieldElement {
        &self.d
    }

    /// Length of a point encoding: the y-coordinate plus one sign bit.
    pub fn byte_len(&self) -> usize {
        (self.p().bit_length() + 1).div_ceil(8)
    }

    /// The base point. All copies share one precomputation cache.
    pub fn g(self: &Arc<Self>) -> EdwardsPoint {
        EdwardsPoint {
            curve: Arc::clone(self),
            coords: self.g.clone(),
            table: Arc::clone(&self.g_table),
        }
    }

    /// The neutral element `(0, 1)`.
    pub fn infinity(self: &Arc<Self>) -> EdwardsPoint {
        self.wrap(self.identity())
    }

    /// Point with the given affine coordinates.
    pub fn point(self: &Arc<Self>, x: &BigInt, y: &BigInt) -> Result<EdwardsPoint> {
        let x = self.element(x)?;
        let y = self.element(y)?;
        if !self.on_curve(&x, &y) {
            return Err(Error::PointNotOnCurve);
        }
        Ok(self.wrap(self.extended(x, y)))
    }

    /// Point with y-coordinate `y` and an x-coordinate of the requested parity.
    pub fn point_from_y(self: &Arc<Self>, y: &BigInt, odd: bool) -> Result<EdwardsPoint> {
        let y = self.element(y)?;
        let y2 = y.square();
        let num = &y2 - &self.red.one();
        let den = &(&self.d * &y2) - &self.a;
        let x = self.recover_coordinate(&num, &den, odd)?;
        Ok(self.wrap(self.extended(x, y)))
    }

    /// Point with x-coordinate `x` and a y-coordinate of the requested parity.
    pub fn point_from_x(self: &Arc<Self>, x: &BigInt, odd: bool) -> Result<EdwardsPoint> {
        let x = self.element(x)?;
        let x2 = x.square();
        let num = &self.red.one() - &(&self.a * &x2);
        let den = &self.red.one() - &(&self.d * &x2);
        let y = self.recover_coordinate(&num, &den, odd)?;
        Ok(self.wrap(self.extended(x, y)))
    }

    /// Does `point` satisfy the curve equation?
    pub fn validate(&self, point: &EdwardsPoint) -> bool {
        let (x, y) = self.normalize(&point.coords);
        self.on_curve(&x, &y)
    }

    /// Decode the little-endian y-coordinate whose top bit carries the parity
    /// of x. The encoding must be exactly [`EdwardsCurve::byte_len`] bytes
    /// with `y < p`.
    pub fn decode_point(self: &Arc<Self>, bytes: &[u8]) -> Result<EdwardsPoint> {
        let len = self.byte_len();
        if bytes.len() != len {
            return Err(Error::InvalidEncoding);
        }

        let mut normed = bytes.to_vec();
        let odd = normed[len - 1] & 0x80 != 0;
        normed[len - 1] &= !0x80;

        let y = BigInt::from_le_bytes(&normed);
        if &y >= self.p() {
            return Err(Error::InvalidEncoding);
        }
        self.point_from_y(&y, odd)
    }

    /// `sqrt(num / den)` with the requested parity.
    fn recover_coordinate(
        &self,
        num: &FieldElement,
        den: &FieldElement,
        odd: bool,
    ) -> Result<FieldElement> {
        let den_inv = den.invert().map_err(|_| Error::PointNotOnCurve)?;
        let v2 = num * &den_inv;
        if v2.is_zero() {
            return if odd {
                Err(Error::PointNotOnCurve)
            } else {
                Ok(v2)
            };
        }

        let v = v2.sqrt()?;
        Ok(if v.is_odd() == odd { v } else { -v })
    }

    fn element(&self, v: &BigInt) -> Result<FieldElement> {
        if v.is_neg() || v >= self.p() {
            return Err(Error::OutOfRange);
        }
        Ok(self.red.convert_to(v))
    }

    fn on_curve(&self, x: &FieldElement, y: &FieldElement) -> bool {
        let x2 = x.square();
        let y2 = y.square();
        let lhs = &(&self.a * &x2) + &y2;
        let rhs = &self.red.one() + &(&self.d * &(&x2 * &y2));
        lhs == rhs
    }

    fn extended(&self, x: FieldElement, y: FieldElement) -> Extended {
        Extended {
            t: &x * &y,
            z: self.red.one(),
            x,
            y,
        }
    }

    fn normalize(&self, p: &Extended) -> (FieldElement, FieldElement) {
        let zinv = invert_nonzero(&p.z);
        (&p.x * &zinv, &p.y * &zinv)
    }

    fn wrap(self: &Arc<Self>, coords: Extended) -> EdwardsPoint {
        EdwardsPoint {
            curve: Arc::clone(self),
            coords,
            table: Arc::new(OnceBox::new()),
        }
    }

    fn is_identity(&self, p: &Extended) -> bool {
        p.x.is_zero() && p.y == p.z
    }
}

impl WnafCurve for EdwardsCurve {
    type Affine = Extended;
    type Proj = Extended;

    fn order_bits(&self) -> usize {
        self.n.bit_length()
    }

    fn identity(&self) -> Extended {
        Extended {
            x: self.red.zero(),
            y: self.red.one(),
            z: self.red.one(),
            t: self.red.zero(),
        }
    }

    fn dbl(&self, p: &Extended) -> Extended {
        // dbl-2008-hwcd
        let a = p.x.square();
        let b = p.y.square();
        let c = p.z.square().double();
        let d = &self.a * &a;
        let e = (&p.x + &p.y).square() - &a - &b;
        let g = &d + &b;
        let f = &g - &c;
        let h = &d - &b;

        Extended {
            x: &e * &f,
            y: &g * &h,
            t: &e * &h,
            z: &f * &g,
        }
    }

    fn add(&self, p: &Extended, q: &Extended) -> Extended {
        let (e, f, g, h) = if self.minus_one_a {
            // add-2008-hwcd-3
            let a = &(&p.y - &p.x) * &(&q.y - &q.x);
            let b = &(&p.y + &p.x) * &(&q.y + &q.x);
            let c = &(&p.t * &self.dd) * &q.t;
            let d = (&p.z * &q.z).double();
            (&b - &a, &d - &c, &d + &c, &b + &a)
        } else {
            // add-2008-hwcd
            let a = &p.x * &q.x;
            let b = &p.y * &q.y;
            let c = &(&p.t * &self.d) * &q.t;
            let d = &p.z * &q.z;
            let e = &(&p.x + &p.y) * &(&q.x + &q.y) - &a - &b;
            let h = &b - &(&self.a * &a);
            (e, &d - &c, &d + &c, h)
        };

        Extended {
            x: &e * &f,
            y: &g * &h,
            t: &e * &h,
            z: &f * &g,
        }
    }

    fn mixed_add(&self, p: &Extended, q: &Extended) -> Extended {
        self.add(p, q)
    }

    fn affine_neg(&self, p: &Extended) -> Extended {
        Extended {
            x: -&p.x,
            y: p.y.clone(),
            z: p.z.clone(),
            t: -&p.t,
        }
    }

    fn affine_add(&self, a: &Extended, b: &Extended) -> Extended {
        self.add(a, b)
    }

    fn affine_dbl(&self, p: &Extended) -> Extended {
        self.dbl(p)
    }
}

/// Point on an [`EdwardsCurve`].
#[derive(Clone)]
pub struct EdwardsPoint {
    curve: Arc<EdwardsCurve>,
    coords: Extended,
    table: Arc<OnceBox<Table>>,
}

impl EdwardsPoint {
    /// The curve this point lives on.
    pub fn curve(&self) -> &Arc<EdwardsCurve> {
        &self.curve
    }

    /// Is this the neutral element `(0, 1)`?
    pub fn is_infinity(&self) -> bool {
        self.curve.is_identity(&self.coords)
    }

    /// Affine x-coordinate.
    pub fn get_x(&self) -> BigInt {
        self.curve.normalize(&self.coords).0.to_bigint()
    }

    /// Affine y-coordinate.
    pub fn get_y(&self) -> BigInt {
        self.curve.normalize(&self.coords).1.to_bigint()
    }

    /// Does the point satisfy the curve equation?
    pub fn validate(&self) -> bool {
        self.curve.validate(self)
    }

    /// The same point with `Z = 1`.
    pub fn normalize(&self) -> EdwardsPoint {
        let (x, y) = self.curve.normalize(&self.coords);
        EdwardsPoint {
            curve: Arc::clone(&self.curve),
            coords: self.curve.extended(x, y),
            table: Arc::clone(&self.table),
        }
    }

    /// `self + other`.
    pub fn add(&self, other: &EdwardsPoint) -> EdwardsPoint {
        self.check_curve(other);
        self.curve.wrap(self.curve.add(&self.coords, &other.coords))
    }

    /// `2 self`.
    pub fn dbl(&self) -> EdwardsPoint {
        self.curve.wrap(self.curve.dbl(&self.coords))
    }

    /// `-self`.
    pub fn neg(&self) -> EdwardsPoint {
        self.curve.wrap(self.curve.affine_neg(&self.coords))
    }

    /// `k self`.
    pub fn mul(&self, k: &BigInt) -> EdwardsPoint {
        if k.is_neg() {
            return self.mul(&-k).neg();
        }

        let curve = &*self.curve;
        let table = self.table.get();
        if let Some(t) = table.filter(|t| t.has_doubles(k.bit_length())) {
            if let Some(p) = wnaf::fixed_naf_mul(curve, t, k) {
                return self.curve.wrap(p);
            }
        }

        let points = wnaf::naf_points(curve, &self.coords, table);
        self.curve.wrap(wnaf::wnaf_mul(curve, &points, k))
    }

    /// `k1 self + k2 p2`.
    pub fn mul_add(&self, k1: &BigInt, p2: &EdwardsPoint, k2: &BigInt) -> EdwardsPoint {
        self.check_curve(p2);
        let terms = [self.operand(k1), p2.operand(k2)];
        self.curve.wrap(wnaf::wnaf_mul_add(&*self.curve, &terms))
    }

    /// Build the fixed-base tables for scalars of up to `power` bits.
    pub fn precompute(&self, power: usize) {
        self.table
            .get_or_init(|| Box::new(Precomputed::build(&*self.curve, &self.coords, power)));
    }

    /// Little-endian y-coordinate with the parity of x in the top bit of the
    /// last byte.
    pub fn encode(&self) -> Vec<u8> {
        let (x, y) = self.curve.normalize(&self.coords);
        let len = self.curve.byte_len();
        let mut out = y
            .to_bigint()
            .to_le_bytes_padded(len)
            .expect("field elements fit in the encoding length");
        if x.is_odd() {
            out[len - 1] |= 0x80;
        }
        out
    }

    fn operand(&self, k: &BigInt) -> (NafPoints<'_, Extended>, BigInt) {
        let points = match self.table.get() {
            Some(t) => NafPoints::precomputed(t),
            None => NafPoints::single(self.coords.clone()),
        };
        if k.is_neg() {
            (points.negate(&*self.curve), -k)
        } else {
            (points, k.clone())
        }
    }

    fn check_curve(&self, other: &EdwardsPoint) {
        assert!(
            Arc::ptr_eq(&self.curve, &other.curve),
            "points belong to different curves"
        );
    }
}

impl PartialEq for EdwardsPoint {
    fn eq(&self, other: &Self) -> bool {
        if !Arc::ptr_eq(&self.curve, &other.curve) {
            return false;
        }
        let (p, q) = (&self.coords, &other.coords);
        &p.x * &q.z == &q.x * &p.z && &p.y * &q.z == &q.y * &p.z
    }
}

impl Eq for EdwardsPoint {}

impl fmt::Debug for EdwardsPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EdwardsPoint {{ x: {:#x}, y: {:#x} }}",
            self.get_x(),
            self.get_y()
        )
    }
}
