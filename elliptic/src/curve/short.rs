//! Short Weierstrass curves `y^2 = x^3 + ax + b`.
//!
//! Points are kept in affine form and promoted to Jacobian coordinates for
//! scalar multiplication. Doubling picks a specialized formula when `a = 0` or
//! `a = -3`.

use super::{
    field_bytes, invert_nonzero, parse,
    wnaf::{self, NafPoints, Precomputed, WnafCurve},
};
use crate::{Error, Result};
use alloc::{boxed::Box, sync::Arc, vec, vec::Vec};
use bignum::BigInt;
use core::fmt;
use once_cell::race::OnceBox;
use primefield::{FieldElement, Red};

/// Parameters of a short Weierstrass curve, as hex strings.
pub(crate) struct ShortParams {
    pub(crate) p: &'static str,
    pub(crate) a: &'static str,
    pub(crate) b: &'static str,
    pub(crate) n: &'static str,
    pub(crate) gx: &'static str,
    pub(crate) gy: &'static str,
    pub(crate) endo: Option<EndoParams>,
}

/// GLV endomorphism parameters, as hex strings. Basis entries may carry a `-`.
pub(crate) struct EndoParams {
    pub(crate) beta: &'static str,
    pub(crate) lambda: &'static str,
    pub(crate) basis: [(&'static str, &'static str); 2],
}

/// Shape of the `a` coefficient, selecting the doubling formula.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AShape {
    Zero,
    MinusThree,
    Other,
}

/// Efficiently computable endomorphism `(x, y) -> (beta x, y)`, which acts on
/// the group as multiplication by `lambda`.
#[derive(Clone, Debug)]
pub struct Endomorphism {
    beta: FieldElement,
    lambda: BigInt,
    basis: [(BigInt, BigInt); 2],
}

impl Endomorphism {
    /// Cube root of unity in the base field.
    pub fn beta(&self) -> &FieldElement {
        &self.beta
    }

    /// Cube root of unity modulo the group order.
    pub fn lambda(&self) -> &BigInt {
        &self.lambda
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Affine {
    x: FieldElement,
    y: FieldElement,
}

/// `(X, Y, Z)` representing `(X / Z^2, Y / Z^3)`; `Z = 0` is the point at infinity.
#[derive(Clone, Debug)]
pub(crate) struct Jacobian {
    x: FieldElement,
    y: FieldElement,
    z: FieldElement,
}

type Table = Precomputed<Option<Affine>>;

/// A short Weierstrass curve over a prime field, with a base point of order `n`.
pub struct ShortCurve {
    red: Arc<Red>,
    n: BigInt,
    a: FieldElement,
    b: FieldElement,
    a_shape: AShape,

    /// `n` in the field, for comparing `x mod n` without inversion.
    red_n: Option<FieldElement>,
    endo: Option<Endomorphism>,
    g: Affine,
    g_table: Arc<OnceBox<Table>>,
}

impl fmt::Debug for ShortCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortCurve")
            .field("p", self.p())
            .field("n", &self.n)
            .finish_non_exhaustive()
    }
}

impl ShortCurve {
    pub(crate) fn new(params: &ShortParams) -> Result<Arc<Self>> {
        let p = parse(params.p)?;
        let n = parse(params.n)?;
        if n.bit_length() < 2 {
            return Err(Error::InvalidModulus);
        }

        let red = Red::for_modulus(p.clone())?;
        let a = red.convert_to(&parse(params.a)?);
        let b = red.convert_to(&parse(params.b)?);
        let a_shape = if a.is_zero() {
            AShape::Zero
        } else if a.to_bigint() == &p - &BigInt::from(3u32) {
            AShape::MinusThree
        } else {
            AShape::Other
        };

        let red_n = if &p / &n <= BigInt::from(100u32) {
            Some(red.convert_to(&n))
        } else {
            None
        };

        let endo = match &params.endo {
            Some(e) => Some(Endomorphism {
                beta: red.convert_to(&parse(e.beta)?),
                lambda: parse(e.lambda)?,
                basis: [
                    (parse(e.basis[0].0)?, parse(e.basis[0].1)?),
                    (parse(e.basis[1].0)?, parse(e.basis[1].1)?),
                ],
            }),
            None => None,
        };

        let g = Affine {
            x: red.convert_to(&parse(params.gx)?),
            y: red.convert_to(&parse(params.gy)?),
        };

        let curve = Self {
            red,
            n,
            a,
            b,
            a_shape,
            red_n,
            endo,
            g,
            g_table: Arc::new(OnceBox::new()),
        };
        if !curve.on_curve(&curve.g) {
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

    /// Length of a field element encoding.
    pub fn byte_len(&self) -> usize {
        self.red.byte_len()
    }

    /// The GLV endomorphism, for curves that have one.
    pub fn endomorphism(&self) -> Option<&Endomorphism> {
        self.endo.as_ref()
    }

    /// The base point. All copies share one precomputation cache.
    pub fn g(self: &Arc<Self>) -> ShortPoint {
        ShortPoint {
            curve: Arc::clone(self),
            coords: Some(self.g.clone()),
            table: Arc::clone(&self.g_table),
        }
    }

    /// The point at infinity.
    pub fn infinity(self: &Arc<Self>) -> ShortPoint {
        self.wrap(None)
    }

    /// Point with the given affine coordinates.
    pub fn point(self: &Arc<Self>, x: &BigInt, y: &BigInt) -> Result<ShortPoint> {
        let affine = Affine {
            x: self.element(x)?,
            y: self.element(y)?,
        };
        if !self.on_curve(&affine) {
            return Err(Error::PointNotOnCurve);
        }
        Ok(self.wrap(Some(affine)))
    }

    /// Point with x-coordinate `x` whose y-coordinate has the requested parity.
    pub fn point_from_x(self: &Arc<Self>, x: &BigInt, odd: bool) -> Result<ShortPoint> {
        let x = self.element(x)?;
        let y2 = &(&x.square() * &x) + &(&(&self.a * &x) + &self.b);
        let mut y = y2.sqrt()?;
        if y.is_odd() != odd {
            if y.is_zero() {
                return Err(Error::PointNotOnCurve);
            }
            y = -y;
        }
        Ok(self.wrap(Some(Affine { x, y })))
    }

    /// Does `point` satisfy the curve equation?
    pub fn validate(&self, point: &ShortPoint) -> bool {
        point.coords.as_ref().is_none_or(|a| self.on_curve(a))
    }

    /// Decode a SEC1 point: `04`/`06`/`07` uncompressed or hybrid, `02`/`03`
    /// compressed, or a lone `00` for the point at infinity.
    pub fn decode_point(self: &Arc<Self>, bytes: &[u8]) -> Result<ShortPoint> {
        let len = self.byte_len();
        let Some((&tag, rest)) = bytes.split_first() else {
            return Err(Error::InvalidEncoding);
        };

        match tag {
            0x00 if rest.is_empty() => Ok(self.infinity()),
            0x04 | 0x06 | 0x07 if rest.len() == 2 * len => {
                let (x, y) = rest.split_at(len);
                let odd = y[len - 1] & 1 == 1;
                if (tag == 0x06 && odd) || (tag == 0x07 && !odd) {
                    return Err(Error::InvalidEncoding);
                }

                let x = self.coordinate(x)?;
                let y = self.coordinate(y)?;
                self.point(&x, &y)
            }
            0x02 | 0x03 if rest.len() == len => {
                let x = self.coordinate(rest)?;
                self.point_from_x(&x, tag == 0x03)
            }
            _ => Err(Error::InvalidEncoding),
        }
    }

    /// Split `k` into `(k1, k2)` with `k = k1 + k2 lambda (mod n)` and both
    /// halves about half as long as `n`.
    pub fn endo_split(&self, k: &BigInt) -> Option<(BigInt, BigInt)> {
        let endo = self.endo.as_ref()?;
        let [(a1, b1), (a2, b2)] = &endo.basis;

        let c1 = self.div_round(&(b2 * k));
        let c2 = self.div_round(&(&(-b1) * k));
        let k1 = k - &(&c1 * a1) - &(&c2 * a2);
        let k2 = -(&(&c1 * b1) + &(&c2 * b2));
        Some((k1, k2))
    }

    fn div_round(&self, a: &BigInt) -> BigInt {
        a.div_round(&self.n).expect("curve order is non-zero")
    }

    fn coordinate(&self, bytes: &[u8]) -> Result<BigInt> {
        let v = BigInt::from_be_bytes(bytes);
        if &v >= self.p() {
            return Err(Error::InvalidEncoding);
        }
        Ok(v)
    }

    fn element(&self, v: &BigInt) -> Result<FieldElement> {
        if v.is_neg() || v >= self.p() {
            return Err(Error::OutOfRange);
        }
        Ok(self.red.convert_to(v))
    }

    fn wrap(self: &Arc<Self>, coords: Option<Affine>) -> ShortPoint {
        ShortPoint {
            curve: Arc::clone(self),
            coords,
            table: Arc::new(OnceBox::new()),
        }
    }

    fn on_curve(&self, p: &Affine) -> bool {
        let rhs = &(&p.x.square() * &p.x) + &(&(&self.a * &p.x) + &self.b);
        p.y.square() == rhs
    }

    fn jinfinity(&self) -> Jacobian {
        Jacobian {
            x: self.red.one(),
            y: self.red.one(),
            z: self.red.zero(),
        }
    }

    fn to_jacobian(&self, p: &Option<Affine>) -> Jacobian {
        match p {
            Some(p) => Jacobian {
                x: p.x.clone(),
                y: p.y.clone(),
                z: self.red.one(),
            },
            None => self.jinfinity(),
        }
    }

    fn to_affine(&self, p: &Jacobian) -> Option<Affine> {
        if p.z.is_zero() {
            return None;
        }
        let zinv = invert_nonzero(&p.z);
        let zinv2 = zinv.square();
        Some(Affine {
            x: &p.x * &zinv2,
            y: &(&p.y * &zinv2) * &zinv,
        })
    }

    fn beta_image(&self, p: &Option<Affine>) -> Option<Affine> {
        let endo = self.endo.as_ref()?;
        p.as_ref().map(|p| Affine {
            x: &p.x * &endo.beta,
            y: p.y.clone(),
        })
    }

    fn build_table(&self, p: &Option<Affine>, power: usize) -> Table {
        let mut table = Precomputed::build(self, p, power);
        if self.endo.is_some() {
            let beta = table.map(|e| self.beta_image(e));
            table.beta = Some(Box::new(beta));
        }
        table
    }

    fn jdbl_zero_a(&self, p: &Jacobian) -> Jacobian {
        // dbl-2009-l
        let a = p.x.square();
        let b = p.y.square();
        let c = b.square();
        let d = ((&p.x + &b).square() - &a - &c).double();
        let e = &a.double() + &a;
        let f = e.square();
        let c8 = c.double().double().double();

        let x = f - &d - &d;
        let y = &e * &(&d - &x) - &c8;
        let z = (&p.y * &p.z).double();
        Jacobian { x, y, z }
    }

    fn jdbl_minus_three(&self, p: &Jacobian) -> Jacobian {
        // dbl-2001-b
        let delta = p.z.square();
        let gamma = p.y.square();
        let beta = &p.x * &gamma;
        let t = &(&p.x - &delta) * &(&p.x + &delta);
        let alpha = &t.double() + &t;
        let beta4 = beta.double().double();
        let beta8 = beta4.double();
        let gamma8 = gamma.square().double().double().double();

        let x = alpha.square() - &beta8;
        let z = (&p.y + &p.z).square() - &gamma - &delta;
        let y = &alpha * &(&beta4 - &x) - &gamma8;
        Jacobian { x, y, z }
    }

    fn jdbl_general(&self, p: &Jacobian) -> Jacobian {
        let z4 = p.z.square().square();
        let x2 = p.x.square();
        let y2 = p.y.square();
        let m = &x2.double() + &x2 + &(&self.a * &z4);
        let s = &p.x.double().double() * &y2;
        let y8 = y2.square().double().double().double();

        let x = m.square() - &s.double();
        let y = &m * &(&s - &x) - &y8;
        let z = (&p.y * &p.z).double();
        Jacobian { x, y, z }
    }
}

impl WnafCurve for ShortCurve {
    type Affine = Option<Affine>;
    type Proj = Jacobian;

    fn order_bits(&self) -> usize {
        self.n.bit_length()
    }

    fn identity(&self) -> Jacobian {
        self.jinfinity()
    }

    fn dbl(&self, p: &Jacobian) -> Jacobian {
        if p.z.is_zero() {
            return p.clone();
        }
        match self.a_shape {
            AShape::Zero => self.jdbl_zero_a(p),
            AShape::MinusThree => self.jdbl_minus_three(p),
            AShape::Other => self.jdbl_general(p),
        }
    }

    fn add(&self, a: &Jacobian, b: &Jacobian) -> Jacobian {
        if a.z.is_zero() {
            return b.clone();
        }
        if b.z.is_zero() {
            return a.clone();
        }

        // 12M + 4S + 7A
        let z2b = b.z.square();
        let z2a = a.z.square();
        let u1 = &a.x * &z2b;
        let u2 = &b.x * &z2a;
        let s1 = &a.y * &(&z2b * &b.z);
        let s2 = &b.y * &(&z2a * &a.z);

        let h = &u1 - &u2;
        let r = &s1 - &s2;
        if h.is_zero() {
            return if r.is_zero() { self.dbl(a) } else { self.jinfinity() };
        }

        let h2 = h.square();
        let h3 = &h2 * &h;
        let v = &u1 * &h2;

        let x = r.square() + &h3 - &v - &v;
        let y = &r * &(&v - &x) - &(&s1 * &h3);
        let z = &(&a.z * &b.z) * &h;
        Jacobian { x, y, z }
    }

    fn mixed_add(&self, a: &Jacobian, b: &Option<Affine>) -> Jacobian {
        let Some(q) = b else {
            return a.clone();
        };
        if a.z.is_zero() {
            return self.to_jacobian(b);
        }

        // 8M + 3S + 7A
        let z2 = a.z.square();
        let u2 = &q.x * &z2;
        let s2 = &(&q.y * &z2) * &a.z;

        let h = &a.x - &u2;
        let r = &a.y - &s2;
        if h.is_zero() {
            return if r.is_zero() { self.dbl(a) } else { self.jinfinity() };
        }

        let h2 = h.square();
        let h3 = &h2 * &h;
        let v = &a.x * &h2;

        let x = r.square() + &h3 - &v - &v;
        let y = &r * &(&v - &x) - &(&a.y * &h3);
        let z = &a.z * &h;
        Jacobian { x, y, z }
    }

    fn affine_neg(&self, p: &Option<Affine>) -> Option<Affine> {
        p.as_ref().map(|p| Affine {
            x: p.x.clone(),
            y: -&p.y,
        })
    }

    fn affine_add(&self, a: &Option<Affine>, b: &Option<Affine>) -> Option<Affine> {
        let (p, q) = match (a, b) {
            (None, _) => return b.clone(),
            (_, None) => return a.clone(),
            (Some(p), Some(q)) => (p, q),
        };

        if p.x == q.x {
            return if p.y == q.y { self.affine_dbl(a) } else { None };
        }

        let c = &(&p.y - &q.y) * &invert_nonzero(&(&p.x - &q.x));
        let x = c.square() - &p.x - &q.x;
        let y = &c * &(&p.x - &x) - &p.y;
        Some(Affine { x, y })
    }

    fn affine_dbl(&self, a: &Option<Affine>) -> Option<Affine> {
        let p = a.as_ref()?;
        let y2 = p.y.double();
        if y2.is_zero() {
            return None;
        }

        let x2 = p.x.square();
        let num = &x2.double() + &x2 + &self.a;
        let c = &num * &invert_nonzero(&y2);
        let x = c.square() - &p.x.double();
        let y = &c * &(&p.x - &x) - &p.y;
        Some(Affine { x, y })
    }
}

/// Affine point on a [`ShortCurve`].
///
/// Cloning is cheap in the sense that clones share the lazily built
/// precomputation tables created by [`ShortPoint::precompute`].
#[derive(Clone)]
pub struct ShortPoint {
    curve: Arc<ShortCurve>,
    coords: Option<Affine>,
    table: Arc<OnceBox<Table>>,
}

impl ShortPoint {
    /// The curve this point lives on.
    pub fn curve(&self) -> &Arc<ShortCurve> {
        &self.curve
    }

    /// Is this the point at infinity?
    pub fn is_infinity(&self) -> bool {
        self.coords.is_none()
    }

    /// Affine x-coordinate.
    pub fn get_x(&self) -> Result<BigInt> {
        self.coords
            .as_ref()
            .map(|a| a.x.to_bigint())
            .ok_or(Error::PointAtInfinity)
    }

    /// Affine y-coordinate.
    pub fn get_y(&self) -> Result<BigInt> {
        self.coords
            .as_ref()
            .map(|a| a.y.to_bigint())
            .ok_or(Error::PointAtInfinity)
    }

    /// Does the point satisfy the curve equation?
    pub fn validate(&self) -> bool {
        self.curve.validate(self)
    }

    /// `self + other`.
    pub fn add(&self, other: &ShortPoint) -> ShortPoint {
        self.check_curve(other);
        self.curve.wrap(self.curve.affine_add(&self.coords, &other.coords))
    }

    /// `2 self`.
    pub fn dbl(&self) -> ShortPoint {
        self.curve.wrap(self.curve.affine_dbl(&self.coords))
    }

    /// `-self`. A precomputed table, if any, is negated along with the point.
    pub fn neg(&self) -> ShortPoint {
        let curve = &*self.curve;
        let table = OnceBox::new();
        if let Some(t) = self.table.get() {
            let mut negated = t.map(|e| curve.affine_neg(e));
            negated.beta = t.beta.as_ref().map(|b| Box::new(b.map(|e| curve.affine_neg(e))));
            let _ = table.set(Box::new(negated));
        }

        ShortPoint {
            curve: Arc::clone(&self.curve),
            coords: curve.affine_neg(&self.coords),
            table: Arc::new(table),
        }
    }

    /// `k self`.
    pub fn mul(&self, k: &BigInt) -> ShortPoint {
        self.curve.wrap(self.curve.to_affine(&self.jmul(k)))
    }

    /// `k1 self + k2 p2`.
    pub fn mul_add(&self, k1: &BigInt, p2: &ShortPoint, k2: &BigInt) -> ShortPoint {
        self.jmul_add(k1, p2, k2).to_affine()
    }

    /// `k1 self + k2 p2`, left in Jacobian coordinates.
    pub fn jmul_add(&self, k1: &BigInt, p2: &ShortPoint, k2: &BigInt) -> JacobianPoint {
        self.check_curve(p2);
        let curve = &*self.curve;

        let coords = if curve.endo.is_some() {
            curve.endo_mul_add(&[(self, k1), (p2, k2)])
        } else {
            let terms = [self.operand(k1), p2.operand(k2)];
            wnaf::wnaf_mul_add(curve, &terms)
        };

        JacobianPoint {
            curve: Arc::clone(&self.curve),
            coords,
        }
    }

    /// Promote to Jacobian coordinates.
    pub fn to_jacobian(&self) -> JacobianPoint {
        JacobianPoint {
            curve: Arc::clone(&self.curve),
            coords: self.curve.to_jacobian(&self.coords),
        }
    }

    /// Build the fixed-base tables for scalars of up to `power` bits. Later
    /// calls, and calls on clones, reuse the first table built.
    pub fn precompute(&self, power: usize) {
        if self.coords.is_none() {
            return;
        }
        self.table
            .get_or_init(|| Box::new(self.curve.build_table(&self.coords, power)));
    }

    /// SEC1 encoding: `02`/`03 || x` when `compact`, else `04 || x || y`.
    /// The point at infinity encodes as a single `00`.
    pub fn encode(&self, compact: bool) -> Vec<u8> {
        let Some(a) = &self.coords else {
            return vec![0x00];
        };

        let len = self.curve.byte_len();
        let x = field_bytes(&a.x, len);
        if compact {
            let tag = if a.y.is_odd() { 0x03 } else { 0x02 };
            let mut out = Vec::with_capacity(1 + len);
            out.push(tag);
            out.extend_from_slice(&x);
            out
        } else {
            let mut out = Vec::with_capacity(1 + 2 * len);
            out.push(0x04);
            out.extend_from_slice(&x);
            out.extend_from_slice(&field_bytes(&a.y, len));
            out
        }
    }

    fn jmul(&self, k: &BigInt) -> Jacobian {
        let curve = &*self.curve;
        if k.is_neg() {
            return self.neg().jmul(&-k);
        }
        if self.coords.is_none() {
            return curve.jinfinity();
        }

        let table = self.table.get();
        if let Some(t) = table.filter(|t| t.has_doubles(k.bit_length())) {
            if let Some(j) = wnaf::fixed_naf_mul(curve, t, k) {
                return j;
            }
        }

        if curve.endo.is_some() {
            curve.endo_mul_add(&[(self, k)])
        } else {
            let points = wnaf::naf_points(curve, &self.coords, table);
            wnaf::wnaf_mul(curve, &points, k)
        }
    }

    /// Window-1 operand for [`wnaf::wnaf_mul_add`], folding the sign of `k` into the table.
    fn operand(&self, k: &BigInt) -> (NafPoints<'_, Option<Affine>>, BigInt) {
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

    fn check_curve(&self, other: &ShortPoint) {
        assert!(
            Arc::ptr_eq(&self.curve, &other.curve),
            "points belong to different curves"
        );
    }
}

impl ShortCurve {
    /// `sum k_i P_i` with every scalar split through the endomorphism.
    fn endo_mul_add(&self, terms: &[(&ShortPoint, &BigInt)]) -> Jacobian {
        let mut ops = Vec::with_capacity(2 * terms.len());
        let mut beta_points = Vec::with_capacity(terms.len());
        for (p, _) in terms {
            beta_points.push(self.beta_image(&p.coords));
        }

        for ((p, k), beta_point) in terms.iter().zip(&beta_points) {
            let Some((k1, k2)) = self.endo_split(k) else {
                continue;
            };
            let table = p.table.get();

            let base = match table {
                Some(t) => NafPoints::precomputed(t),
                None => NafPoints::single(p.coords.clone()),
            };
            let beta = match table.and_then(|t| t.beta.as_deref()) {
                Some(t) => NafPoints::precomputed(t),
                None => NafPoints::single(beta_point.clone()),
            };

            ops.push(signed(self, base, k1));
            ops.push(signed(self, beta, k2));
        }

        wnaf::wnaf_mul_add(self, &ops)
    }
}

fn signed<'a>(
    curve: &ShortCurve,
    points: NafPoints<'a, Option<Affine>>,
    k: BigInt,
) -> (NafPoints<'a, Option<Affine>>, BigInt) {
    if k.is_neg() {
        (points.negate(curve), -k)
    } else {
        (points, k)
    }
}

impl PartialEq for ShortPoint {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.curve, &other.curve) && self.coords == other.coords
    }
}

impl Eq for ShortPoint {}

impl fmt::Debug for ShortPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.coords {
            Some(a) => write!(
                f,
                "ShortPoint {{ x: {:#x}, y: {:#x} }}",
                a.x.to_bigint(),
                a.y.to_bigint()
            ),
            None => write!(f, "ShortPoint(infinity)"),
        }
    }
}

/// Point on a [`ShortCurve`] in Jacobian coordinates.
#[derive(Clone)]
pub struct JacobianPoint {
    curve: Arc<ShortCurve>,
    coords: Jacobian,
}

impl JacobianPoint {
    /// Is this the point at infinity?
    pub fn is_infinity(&self) -> bool {
        self.coords.z.is_zero()
    }

    /// Normalize to affine coordinates.
    pub fn to_affine(&self) -> ShortPoint {
        self.curve.wrap(self.curve.to_affine(&self.coords))
    }

    /// `self + other`.
    pub fn add(&self, other: &JacobianPoint) -> JacobianPoint {
        self.with(self.curve.add(&self.coords, &other.coords))
    }

    /// `self + other` for an affine `other`.
    pub fn mixed_add(&self, other: &ShortPoint) -> JacobianPoint {
        self.with(self.curve.mixed_add(&self.coords, &other.coords))
    }

    /// `2 self`.
    pub fn dbl(&self) -> JacobianPoint {
        self.with(self.curve.dbl(&self.coords))
    }

    /// `2^k self`.
    pub fn dblp(&self, k: usize) -> JacobianPoint {
        let mut coords = self.coords.clone();
        for _ in 0..k {
            coords = self.curve.dbl(&coords);
        }
        self.with(coords)
    }

    /// `-self`.
    pub fn neg(&self) -> JacobianPoint {
        self.with(Jacobian {
            x: self.coords.x.clone(),
            y: -&self.coords.y,
            z: self.coords.z.clone(),
        })
    }

    /// Is the affine x-coordinate of this point congruent to `x` modulo `n`?
    ///
    /// Avoids the field inversion of [`JacobianPoint::to_affine`] by comparing
    /// `X` against `x Z^2`, then `(x + n) Z^2`, and so on while `x + jn < p`.
    pub fn eq_x_to_p(&self, x: &BigInt) -> bool {
        let curve = &*self.curve;
        let j = &self.coords;
        if j.z.is_zero() || x.is_neg() {
            return false;
        }

        let Some(red_n) = &curve.red_n else {
            return self
                .to_affine()
                .get_x()
                .is_ok_and(|ax| ax.rem_euclid(&curve.n) == *x);
        };

        if x >= curve.p() {
            return false;
        }
        let zs = j.z.square();
        let mut rx = &curve.red.convert_to(x) * &zs;
        if j.x == rx {
            return true;
        }

        let step = red_n * &zs;
        let mut xc = x.clone();
        loop {
            xc += &curve.n;
            if &xc >= curve.p() {
                return false;
            }
            rx += &step;
            if j.x == rx {
                return true;
            }
        }
    }

    fn with(&self, coords: Jacobian) -> JacobianPoint {
        JacobianPoint {
            curve: Arc::clone(&self.curve),
            coords,
        }
    }
}

impl PartialEq for JacobianPoint {
    fn eq(&self, other: &Self) -> bool {
        if !Arc::ptr_eq(&self.curve, &other.curve) {
            return false;
        }
        let (a, b) = (&self.coords, &other.coords);
        match (a.z.is_zero(), b.z.is_zero()) {
            (true, true) => return true,
            (false, false) => {}
            _ => return false,
        }

        let z2a = a.z.square();
        let z2b = b.z.square();
        &a.x * &z2b == &b.x * &z2a && &a.y * &(&z2b * &b.z) == &b.y * &(&z2a * &a.z)
    }
}

impl fmt::Debug for JacobianPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_infinity() {
            return write!(f, "JacobianPoint(infinity)");
        }
        write!(
            f,
            "JacobianPoint {{ x: {:#x}, y: {:#x}, z: {:#x} }}",
            self.coords.x.to_bigint(),
            self.coords.y.to_bigint(),
            self.coords.z.to_bigint()
        )
    }
}
