//! Multiplication.
//!
//! Operands where both sides have at least [`KARATSUBA_THRESHOLD`] limbs are
//! split recursively (Karatsuba); everything below uses the schoolbook product.

use crate::{
    BigInt,
    add::{mag_add_assign, mag_sub_assign},
    trim,
};
use alloc::{vec, vec::Vec};

/// Limb count at which multiplication switches to Karatsuba.
pub const KARATSUBA_THRESHOLD: usize = 32;

/// Product of two magnitudes. The result may carry high zero limbs.
pub(crate) fn mag_mul(a: &[u32], b: &[u32]) -> Vec<u32> {
    let (a, b) = (trim(a), trim(b));
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    if a.len().min(b.len()) >= KARATSUBA_THRESHOLD {
        karatsuba(a, b)
    } else {
        schoolbook(a, b)
    }
}

fn schoolbook(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut out = vec![0u32; a.len() + b.len()];

    for (i, &x) in a.iter().enumerate() {
        if x == 0 {
            continue;
        }

        let mut carry = 0u64;
        for (j, &y) in b.iter().enumerate() {
            let t = u64::from(x) * u64::from(y) + u64::from(out[i + j]) + carry;
            out[i + j] = t as u32;
            carry = t >> 32;
        }
        out[i + b.len()] = carry as u32;
    }

    out
}

fn karatsuba(a: &[u32], b: &[u32]) -> Vec<u32> {
    let m = a.len().max(b.len()) / 2;
    let (a0, a1) = split(a, m);
    let (b0, b1) = split(b, m);

    let z0 = mag_mul(a0, b0);
    let z2 = mag_mul(a1, b1);

    let mut sa = a0.to_vec();
    mag_add_assign(&mut sa, a1);
    let mut sb = b0.to_vec();
    mag_add_assign(&mut sb, b1);

    // z1 = (a0 + a1)(b0 + b1) - z0 - z2 = a0*b1 + a1*b0
    let mut z1 = mag_mul(&sa, &sb);
    mag_sub_assign(&mut z1, &z0);
    mag_sub_assign(&mut z1, &z2);

    let mut out = vec![0u32; a.len() + b.len()];
    add_at(&mut out, &z0, 0);
    add_at(&mut out, &z1, m);
    add_at(&mut out, &z2, 2 * m);
    out
}

/// Split a magnitude into its low `m` limbs and the rest.
fn split(a: &[u32], m: usize) -> (&[u32], &[u32]) {
    if a.len() <= m {
        (a, &[])
    } else {
        (trim(&a[..m]), &a[m..])
    }
}

/// `out += z << (32 * offset)`.
fn add_at(out: &mut Vec<u32>, z: &[u32], offset: usize) {
    let z = trim(z);
    if out.len() < offset + z.len() {
        out.resize(offset + z.len(), 0);
    }

    let mut carry = 0u64;
    let mut i = offset;
    for &limb in z {
        let sum = u64::from(out[i]) + u64::from(limb) + carry;
        out[i] = sum as u32;
        carry = sum >> 32;
        i += 1;
    }

    while carry != 0 {
        if i == out.len() {
            out.push(0);
        }
        let sum = u64::from(out[i]) + carry;
        out[i] = sum as u32;
        carry = sum >> 32;
        i += 1;
    }
}

impl BigInt {
    fn mul_in_place(&mut self, rhs: &BigInt) {
        self.limbs = mag_mul(&self.limbs, &rhs.limbs);
        self.neg ^= rhs.neg;
        self.normalize();
    }

    /// Multiply by a small non-negative integer in place.
    pub fn mul_u32(&mut self, n: u32) {
        let mut carry = 0u64;
        for limb in self.limbs.iter_mut() {
            let t = u64::from(*limb) * u64::from(n) + carry;
            *limb = t as u32;
            carry = t >> 32;
        }

        if carry != 0 {
            self.limbs.push(carry as u32);
        }
        self.normalize();
    }

    /// Square.
    pub fn sqr(&self) -> BigInt {
        self * self
    }

    /// Raise to a native power.
    pub fn pow(&self, mut exp: u32) -> BigInt {
        let mut base = self.clone();
        let mut acc = BigInt::one();

        while exp > 0 {
            if exp & 1 == 1 {
                acc *= &base;
            }
            exp >>= 1;
            if exp > 0 {
                base = base.sqr();
            }
        }

        acc
    }
}

forward_binop!(Mul, mul, MulAssign, mul_assign, mul_in_place);

#[cfg(test)]
mod tests {
    use super::{KARATSUBA_THRESHOLD, karatsuba, schoolbook};
    use crate::BigInt;
    use alloc::vec::Vec;

    #[test]
    fn karatsuba_matches_schoolbook() {
        let a: Vec<u32> = (0..3 * KARATSUBA_THRESHOLD as u32)
            .map(|i| i.wrapping_mul(0x9e37_79b9) ^ 0xdead_beef)
            .collect();
        let b: Vec<u32> = (0..2 * KARATSUBA_THRESHOLD as u32 + 5)
            .map(|i| u32::MAX - i.wrapping_mul(0x85eb_ca6b))
            .collect();

        let expected = BigInt::from_limbs(schoolbook(&a, &b));
        assert_eq!(BigInt::from_limbs(karatsuba(&a, &b)), expected);
        assert_eq!(BigInt::from_limbs(karatsuba(&b, &a)), expected);
    }

    #[test]
    fn all_ones_square() {
        let a = BigInt::from_limbs([u32::MAX; 40].to_vec());
        let expected = BigInt::from_limbs(schoolbook(a.limbs(), a.limbs()));
        assert_eq!(a.sqr(), expected);
    }

    #[test]
    fn signs_and_powers() {
        let a = BigInt::from(-3i64);
        assert_eq!(&a * &a, BigInt::from(9i64));
        assert_eq!(a.pow(3), BigInt::from(-27i64));
        assert_eq!(a.pow(0), BigInt::one());

        let mut b = BigInt::from(u32::MAX);
        b.mul_u32(u32::MAX);
        assert_eq!(b, BigInt::from(0xffff_fffe_0000_0001u64));
    }
}
