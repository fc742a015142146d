//! Addition, subtraction and negation.

use crate::{BigInt, cmp::mag_cmp, trim};
use alloc::vec::Vec;
use core::{cmp::Ordering, ops::Neg};

/// `a += b` on magnitudes.
pub(crate) fn mag_add_assign(a: &mut Vec<u32>, b: &[u32]) {
    if a.len() < b.len() {
        a.resize(b.len(), 0);
    }

    let mut carry = 0u64;
    for i in 0..a.len() {
        let bi = match b.get(i) {
            Some(&bi) => bi,
            None if carry == 0 => break,
            None => 0,
        };

        let sum = u64::from(a[i]) + u64::from(bi) + carry;
        a[i] = sum as u32;
        carry = sum >> 32;
    }

    if carry != 0 {
        a.push(carry as u32);
    }
}

/// `a -= b` on magnitudes. Requires `a >= b`.
pub(crate) fn mag_sub_assign(a: &mut [u32], b: &[u32]) {
    let mut borrow = 0u32;
    for i in 0..a.len() {
        let bi = match b.get(i) {
            Some(&bi) => bi,
            None if borrow == 0 => break,
            None => 0,
        };

        let (d1, o1) = a[i].overflowing_sub(bi);
        let (d2, o2) = d1.overflowing_sub(borrow);
        a[i] = d2;
        borrow = u32::from(o1 | o2);
    }

    debug_assert_eq!(borrow, 0, "magnitude subtraction underflow");
}

/// `a = b - a` on magnitudes. Requires `b >= a`.
fn mag_rsub_assign(a: &mut Vec<u32>, b: &[u32]) {
    if a.len() < b.len() {
        a.resize(b.len(), 0);
    }

    let mut borrow = 0u32;
    for i in 0..a.len() {
        let bi = b.get(i).copied().unwrap_or(0);
        let (d1, o1) = bi.overflowing_sub(a[i]);
        let (d2, o2) = d1.overflowing_sub(borrow);
        a[i] = d2;
        borrow = u32::from(o1 | o2);
    }

    debug_assert_eq!(borrow, 0, "magnitude subtraction underflow");
}

impl BigInt {
    /// Add a signed magnitude to `self` in place.
    pub(crate) fn add_signed(&mut self, rhs: &[u32], rhs_neg: bool) {
        let rhs = trim(rhs);
        if self.neg == rhs_neg {
            mag_add_assign(&mut self.limbs, rhs);
        } else {
            match mag_cmp(&self.limbs, rhs) {
                Ordering::Greater => mag_sub_assign(&mut self.limbs, rhs),
                Ordering::Less => {
                    mag_rsub_assign(&mut self.limbs, rhs);
                    self.neg = rhs_neg;
                }
                Ordering::Equal => self.limbs.clear(),
            }
        }

        self.normalize();
    }

    fn add_in_place(&mut self, rhs: &BigInt) {
        self.add_signed(&rhs.limbs, rhs.neg);
    }

    fn sub_in_place(&mut self, rhs: &BigInt) {
        self.add_signed(&rhs.limbs, !rhs.neg);
    }

    /// Add a small non-negative integer in place.
    pub fn add_u32(&mut self, n: u32) {
        self.add_signed(&[n], false);
    }

    /// Subtract a small non-negative integer in place.
    pub fn sub_u32(&mut self, n: u32) {
        self.add_signed(&[n], true);
    }
}

forward_binop!(Add, add, AddAssign, add_assign, add_in_place);
forward_binop!(Sub, sub, SubAssign, sub_assign, sub_in_place);

impl Neg for BigInt {
    type Output = BigInt;

    fn neg(mut self) -> BigInt {
        self.negate();
        self
    }
}

impl Neg for &BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        -self.clone()
    }
}

#[cfg(test)]
mod tests {
    use crate::BigInt;

    #[test]
    fn carries_propagate_across_limbs() {
        let mut a = BigInt::from(u64::MAX);
        a.add_u32(1);
        assert_eq!(a.limbs(), &[0, 0, 1]);

        a.sub_u32(1);
        assert_eq!(a, BigInt::from(u64::MAX));
    }

    #[test]
    fn mixed_signs() {
        let a = BigInt::from(5i64);
        let b = BigInt::from(-12i64);

        assert_eq!(&a + &b, BigInt::from(-7i64));
        assert_eq!(&b - &a, BigInt::from(-17i64));
        assert_eq!(&a - &a, BigInt::zero());
        assert_eq!(-&b, BigInt::from(12i64));

        let mut c = b.clone();
        c -= &b;
        assert!(c.is_zero());
        assert!(!c.is_neg());
    }
}
