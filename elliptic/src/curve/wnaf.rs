//! Windowed non-adjacent form scalar multiplication shared by the curve families.
//!
//! Three strategies are provided:
//!
//! - [`fixed_naf_mul`] walks a table of `2^(4j) P` doublings, built once by
//!   [`Precomputed::build`], so that a fixed base needs no doublings at all;
//! - [`wnaf_mul`] uses a table of odd multiples and a width-`w` NAF;
//! - [`wnaf_mul_add`] evaluates `sum k_i P_i` with interleaved NAFs, switching to
//!   the joint sparse form when two operands have no table.

use alloc::{borrow::Cow, boxed::Box, vec, vec::Vec};
use bignum::BigInt;
use core::cmp::Ordering;

/// Step between entries of the doubling table.
pub(crate) const DOUBLES_STEP: usize = 4;

/// Window of the odd-multiple table built by [`Precomputed::build`].
pub(crate) const PRECOMPUTED_WINDOW: usize = 8;

/// Window used by [`wnaf_mul`] for points without a table.
const DEFAULT_WINDOW: usize = 4;

/// Point arithmetic needed by the multiplication strategies.
///
/// `Affine` is what tables store and what mixed addition accepts; `Proj` is the
/// accumulator. They may be the same type.
pub(crate) trait WnafCurve {
    type Affine: Clone;
    type Proj: Clone;

    /// Bit length of the group order.
    fn order_bits(&self) -> usize;

    fn identity(&self) -> Self::Proj;

    fn dbl(&self, p: &Self::Proj) -> Self::Proj;
    fn add(&self, a: &Self::Proj, b: &Self::Proj) -> Self::Proj;
    fn mixed_add(&self, a: &Self::Proj, b: &Self::Affine) -> Self::Proj;

    fn affine_neg(&self, p: &Self::Affine) -> Self::Affine;
    fn affine_add(&self, a: &Self::Affine, b: &Self::Affine) -> Self::Affine;
    fn affine_dbl(&self, p: &Self::Affine) -> Self::Affine;
}

/// Tables of multiples of a single point.
#[derive(Clone, Debug)]
pub(crate) struct Precomputed<A> {
    /// `[P, 2^4 P, 2^8 P, ...]`.
    pub(crate) doubles: Vec<A>,

    /// `[P, 3P, 5P, ...]` for window [`PRECOMPUTED_WINDOW`].
    pub(crate) naf: Vec<A>,

    /// The same tables for the endomorphism image of the point.
    pub(crate) beta: Option<Box<Precomputed<A>>>,
}

impl<A: Clone> Precomputed<A> {
    /// Build the doubling table covering scalars of up to `power` bits and the
    /// odd multiple table.
    pub(crate) fn build<C>(curve: &C, p: &A, power: usize) -> Self
    where
        C: WnafCurve<Affine = A>,
    {
        let mut doubles = vec![p.clone()];
        let mut acc = p.clone();
        for _ in (0..power).step_by(DOUBLES_STEP) {
            for _ in 0..DOUBLES_STEP {
                acc = curve.affine_dbl(&acc);
            }
            doubles.push(acc.clone());
        }

        let naf = odd_multiples(curve, p, PRECOMPUTED_WINDOW);
        log::debug!(
            "precomputed {} doublings and {} odd multiples (window {})",
            doubles.len(),
            naf.len(),
            PRECOMPUTED_WINDOW
        );

        Self {
            doubles,
            naf,
            beta: None,
        }
    }

    /// Apply `f` to every table entry.
    pub(crate) fn map(&self, f: impl Fn(&A) -> A) -> Self {
        Self {
            doubles: self.doubles.iter().map(&f).collect(),
            naf: self.naf.iter().map(&f).collect(),
            beta: None,
        }
    }

    /// Can [`fixed_naf_mul`] handle a scalar of `bits` bits?
    pub(crate) fn has_doubles(&self, bits: usize) -> bool {
        self.doubles.len() >= (bits + 1).div_ceil(DOUBLES_STEP)
    }
}

/// Odd multiples of a point, ready for a NAF of the given window.
#[derive(Clone, Debug)]
pub(crate) struct NafPoints<'a, A: Clone> {
    pub(crate) wnd: usize,
    pub(crate) points: Cow<'a, [A]>,
}

impl<'a, A: Clone> NafPoints<'a, A> {
    /// Table borrowed from a precomputation.
    pub(crate) fn precomputed(table: &'a Precomputed<A>) -> Self {
        Self {
            wnd: PRECOMPUTED_WINDOW,
            points: Cow::Borrowed(&table.naf),
        }
    }

    /// A point on its own, usable only for window 1.
    pub(crate) fn single(p: A) -> Self {
        Self {
            wnd: 1,
            points: Cow::Owned(vec![p]),
        }
    }

    /// The table of `-P`.
    pub(crate) fn negate<C>(&self, curve: &C) -> NafPoints<'static, A>
    where
        C: WnafCurve<Affine = A>,
    {
        NafPoints {
            wnd: self.wnd,
            points: Cow::Owned(self.points.iter().map(|p| curve.affine_neg(p)).collect()),
        }
    }
}

/// `[P, 3P, ..., (2^wnd - 1)P]`, enough for every digit of a width-`wnd` NAF.
pub(crate) fn odd_multiples<C: WnafCurve>(curve: &C, p: &C::Affine, wnd: usize) -> Vec<C::Affine> {
    let count = 1 << (wnd - 1);
    let mut points = Vec::with_capacity(count);
    points.push(p.clone());
    if count > 1 {
        let dbl = curve.affine_dbl(p);
        for i in 1..count {
            let next = curve.affine_add(&points[i - 1], &dbl);
            points.push(next);
        }
    }
    points
}

/// Width-`w` non-adjacent form of a non-negative `num`, least significant digit
/// first, padded to at least `bits + 1` digits.
///
/// Every non-zero digit is odd and `|digit| < 2^w`.
pub fn get_naf(num: &BigInt, w: usize, bits: usize) -> Vec<i32> {
    debug_assert!(!num.is_neg());
    debug_assert!((1..=16).contains(&w));

    let mut naf = vec![0; num.bit_length().max(bits) + 1];
    let ws: i32 = 1 << (w + 1);
    let mut k = num.clone();

    for digit in naf.iter_mut() {
        if k.is_odd() {
            let m = low_bits(&k, w + 1);
            let z = if m > (ws >> 1) - 1 { m - ws } else { m };
            if z > 0 {
                k.sub_u32(z.unsigned_abs());
            } else {
                k.add_u32(z.unsigned_abs());
            }
            *digit = z;
        }
        k.shr_in_place(1);
    }

    naf
}

/// Joint sparse form of two non-negative scalars: two digit rows over
/// `{-1, 0, 1}`, least significant first.
pub fn get_jsf(k1: &BigInt, k2: &BigInt) -> [Vec<i32>; 2] {
    let mut jsf = [Vec::new(), Vec::new()];
    let mut k1 = k1.clone();
    let mut k2 = k2.clone();
    let mut d1 = 0i32;
    let mut d2 = 0i32;

    while k1.cmpn(-i64::from(d1)) == Ordering::Greater
        || k2.cmpn(-i64::from(d2)) == Ordering::Greater
    {
        let mut m14 = (low_bits(&k1, 2) + d1) & 3;
        let mut m24 = (low_bits(&k2, 2) + d2) & 3;
        if m14 == 3 {
            m14 = -1;
        }
        if m24 == 3 {
            m24 = -1;
        }

        let u1 = if m14 & 1 == 0 {
            0
        } else {
            let m8 = (low_bits(&k1, 3) + d1) & 7;
            if (m8 == 3 || m8 == 5) && m24 == 2 { -m14 } else { m14 }
        };
        jsf[0].push(u1);

        let u2 = if m24 & 1 == 0 {
            0
        } else {
            let m8 = (low_bits(&k2, 3) + d2) & 7;
            if (m8 == 3 || m8 == 5) && m14 == 2 { -m24 } else { m24 }
        };
        jsf[1].push(u2);

        if 2 * d1 == u1 + 1 {
            d1 = 1 - d1;
        }
        if 2 * d2 == u2 + 1 {
            d2 = 1 - d2;
        }
        k1.shr_in_place(1);
        k2.shr_in_place(1);
    }

    jsf
}

fn low_bits(k: &BigInt, bits: usize) -> i32 {
    let limb = k.limbs().first().copied().unwrap_or(0);
    (limb & ((1 << bits) - 1)) as i32
}

/// `kP` from the doubling table of `P`, or `None` if the table is too short.
pub(crate) fn fixed_naf_mul<C: WnafCurve>(
    curve: &C,
    table: &Precomputed<C::Affine>,
    k: &BigInt,
) -> Option<C::Proj> {
    let naf = get_naf(k, 1, curve.order_bits());
    let repr: Vec<i32> = naf
        .chunks(DOUBLES_STEP)
        .map(|chunk| chunk.iter().rev().fold(0, |acc, &d| (acc << 1) + d))
        .collect();
    if repr.len() > table.doubles.len() {
        return None;
    }

    // Largest value of a NAF window of DOUBLES_STEP digits.
    let step = DOUBLES_STEP as u32;
    let max_digit = ((1i32 << (step + 1)) - if step % 2 == 0 { 2 } else { 1 }) / 3;

    let mut a = curve.identity();
    let mut b = curve.identity();
    for i in (1..=max_digit).rev() {
        for (w, point) in repr.iter().zip(&table.doubles) {
            if *w == i {
                b = curve.mixed_add(&b, point);
            } else if *w == -i {
                b = curve.mixed_add(&b, &curve.affine_neg(point));
            }
        }
        a = curve.add(&a, &b);
    }

    Some(a)
}

/// `kP` with a width-`w` NAF over the odd multiples of `P`.
pub(crate) fn wnaf_mul<C: WnafCurve>(curve: &C, points: &NafPoints<'_, C::Affine>, k: &BigInt) -> C::Proj {
    let naf = get_naf(k, points.wnd, curve.order_bits());

    let mut acc = curve.identity();
    for &z in naf.iter().rev() {
        acc = curve.dbl(&acc);
        acc = add_digit(curve, &acc, &points.points, z);
    }
    acc
}

/// The odd-multiple table for `p`: the precomputed one when available,
/// otherwise a fresh width-4 table.
pub(crate) fn naf_points<'a, C: WnafCurve>(
    curve: &C,
    p: &C::Affine,
    table: Option<&'a Precomputed<C::Affine>>,
) -> NafPoints<'a, C::Affine> {
    match table {
        Some(table) => NafPoints::precomputed(table),
        None => NafPoints {
            wnd: DEFAULT_WINDOW,
            points: Cow::Owned(odd_multiples(curve, p, DEFAULT_WINDOW)),
        },
    }
}

/// `sum k_i P_i`.
///
/// Consecutive pairs of window-1 operands are combined through their joint
/// sparse form over the comb `[P_a, P_a + P_b, P_a - P_b, P_b]`.
pub(crate) fn wnaf_mul_add<C: WnafCurve>(
    curve: &C,
    terms: &[(NafPoints<'_, C::Affine>, BigInt)],
) -> C::Proj {
    let bits = curve.order_bits();
    let mut tables: Vec<Cow<'_, [C::Affine]>> = terms.iter().map(|(t, _)| t.points.clone()).collect();
    let mut naf: Vec<Vec<i32>> = vec![Vec::new(); terms.len()];

    let mut pairs = terms.len();
    while pairs >= 2 {
        let (a, b) = (pairs - 2, pairs - 1);
        pairs -= 2;

        let (ta, ka) = &terms[a];
        let (tb, kb) = &terms[b];
        if ta.wnd != 1 || tb.wnd != 1 {
            naf[a] = get_naf(ka, ta.wnd, bits);
            naf[b] = get_naf(kb, tb.wnd, bits);
            continue;
        }

        let pa = &ta.points[0];
        let pb = &tb.points[0];
        let comb = vec![
            pa.clone(),
            curve.affine_add(pa, pb),
            curve.affine_add(pa, &curve.affine_neg(pb)),
            pb.clone(),
        ];

        // (ja, jb) digit pairs onto signed comb indices 1, 3, 5, 7.
        const INDEX: [i32; 9] = [-3, -1, -5, -7, 0, 7, 5, 1, 3];
        let [ja, jb] = get_jsf(ka, kb);
        naf[a] = ja
            .iter()
            .zip(&jb)
            .map(|(&da, &db)| INDEX[((da + 1) * 3 + (db + 1)) as usize])
            .collect();
        naf[b] = Vec::new();
        tables[a] = Cow::Owned(comb);
    }
    if pairs == 1 {
        let (t, k) = &terms[0];
        naf[0] = get_naf(k, t.wnd, bits);
    }

    let max = naf.iter().map(Vec::len).max().unwrap_or(0);
    let mut acc = curve.identity();
    for i in (0..max).rev() {
        acc = curve.dbl(&acc);
        for (digits, table) in naf.iter().zip(&tables) {
            let z = digits.get(i).copied().unwrap_or(0);
            acc = add_digit(curve, &acc, table, z);
        }
    }
    acc
}

/// `acc + zP` for an odd digit `z` (or zero) over the odd multiples of `P`.
fn add_digit<C: WnafCurve>(curve: &C, acc: &C::Proj, table: &[C::Affine], z: i32) -> C::Proj {
    match z.cmp(&0) {
        Ordering::Equal => acc.clone(),
        Ordering::Greater => curve.mixed_add(acc, &table[((z - 1) >> 1) as usize]),
        Ordering::Less => {
            let p = curve.affine_neg(&table[((-z - 1) >> 1) as usize]);
            curve.mixed_add(acc, &p)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{get_jsf, get_naf};
    use bignum::BigInt;
    use proptest::prelude::*;

    fn eval(digits: &[i32]) -> BigInt {
        digits.iter().rev().fold(BigInt::zero(), |acc, &d| {
            (acc << 1) + BigInt::from(i64::from(d))
        })
    }

    #[test]
    fn naf_of_small_values() {
        assert_eq!(get_naf(&BigInt::from(7u32), 1, 0), [-1, 0, 0, 1]);
        assert_eq!(get_naf(&BigInt::zero(), 1, 3), [0, 0, 0, 0]);
    }

    proptest! {
        #[test]
        fn naf_reconstructs(bytes in proptest::collection::vec(any::<u8>(), 1..40), w in 1usize..9) {
            let k = BigInt::from_be_bytes(&bytes);
            let naf = get_naf(&k, w, 256);
            prop_assert!(naf.len() > 256);
            prop_assert_eq!(eval(&naf), k);

            for (i, &d) in naf.iter().enumerate() {
                prop_assert!(d == 0 || (d % 2 != 0 && d.unsigned_abs() < 1 << w));
                if d != 0 {
                    // Width-w non-adjacency.
                    let next = &naf[i + 1..(i + 1 + w).min(naf.len())];
                    prop_assert!(next.iter().all(|&x| x == 0));
                }
            }
        }

        #[test]
        fn jsf_reconstructs(
            a in proptest::collection::vec(any::<u8>(), 0..40),
            b in proptest::collection::vec(any::<u8>(), 0..40)
        ) {
            let k1 = BigInt::from_be_bytes(&a);
            let k2 = BigInt::from_be_bytes(&b);
            let [j1, j2] = get_jsf(&k1, &k2);
            prop_assert_eq!(j1.len(), j2.len());
            prop_assert!(j1.iter().chain(&j2).all(|d| (-1..=1).contains(d)));
            prop_assert_eq!(eval(&j1), k1);
            prop_assert_eq!(eval(&j2), k2);
        }
    }
}
