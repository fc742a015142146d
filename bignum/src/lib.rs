#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

//! Arbitrary-precision signed integers.
//!
//! [`BigInt`] stores a sign flag and a little-endian vector of 32-bit limbs. The
//! most significant limb is always non-zero and zero is never negative, so
//! every value has exactly one representation.
//!
//! Arithmetic is available both as pure operators on references
//! (`&a + &b`) and as in-place assignment operators (`a += &b`) which reuse the
//! left operand's allocation.
//!
//! ```
//! use bignum::BigInt;
//!
//! let a = BigInt::from_str_radix("ffffffffffffffffffffffff", 16).unwrap();
//! let b = &a * &a;
//! assert_eq!(b.to_str_radix(16), "fffffffffffffffffffffffe000000000000000000000001");
//! ```

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod macros;

mod add;
mod bits;
mod cmp;
mod div;
mod encoding;
mod error;
mod gcd;
mod mul;

pub use crate::{
    div::DivMode,
    error::{Error, Result},
    mul::KARATSUBA_THRESHOLD,
};
pub use zeroize;

use alloc::vec::Vec;
use zeroize::Zeroize;

/// Size of a limb in bits.
pub const LIMB_BITS: usize = 32;

/// Arbitrary-precision signed integer.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BigInt {
    /// Sign flag. Never set for zero.
    neg: bool,

    /// Magnitude, least significant limb first, without trailing zero limbs.
    limbs: Vec<u32>,
}

impl BigInt {
    /// The value `0`.
    pub const fn zero() -> Self {
        Self {
            neg: false,
            limbs: Vec::new(),
        }
    }

    /// The value `1`.
    pub fn one() -> Self {
        Self::from(1u32)
    }

    /// Build a non-negative integer from little-endian limbs.
    pub fn from_limbs(limbs: Vec<u32>) -> Self {
        let mut ret = Self { neg: false, limbs };
        ret.normalize();
        ret
    }

    /// Build an integer from a sign and little-endian magnitude limbs.
    pub fn from_sign_limbs(neg: bool, limbs: Vec<u32>) -> Self {
        let mut ret = Self { neg, limbs };
        ret.normalize();
        ret
    }

    /// Little-endian limbs of the magnitude.
    pub fn limbs(&self) -> &[u32] {
        &self.limbs
    }

    /// Number of limbs in the magnitude.
    pub fn limb_len(&self) -> usize {
        self.limbs.len()
    }

    /// Is this value zero?
    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    /// Is this value strictly negative?
    pub fn is_neg(&self) -> bool {
        self.neg
    }

    /// Is this value odd?
    pub fn is_odd(&self) -> bool {
        self.limbs.first().is_some_and(|l| l & 1 == 1)
    }

    /// Is this value even?
    pub fn is_even(&self) -> bool {
        !self.is_odd()
    }

    /// Is this value equal to one?
    pub fn is_one(&self) -> bool {
        !self.neg && self.limbs.len() == 1 && self.limbs[0] == 1
    }

    /// Absolute value.
    pub fn abs(&self) -> Self {
        Self {
            neg: false,
            limbs: self.limbs.clone(),
        }
    }

    /// Negate in place.
    pub fn negate(&mut self) {
        self.neg = !self.neg && !self.is_zero();
    }

    /// Convert to `u64` if the value is non-negative and fits.
    pub fn to_u64(&self) -> Option<u64> {
        if self.neg || self.limbs.len() > 2 {
            return None;
        }

        Some(
            self.limbs
                .iter()
                .rev()
                .fold(0u64, |acc, &l| (acc << 32) | u64::from(l)),
        )
    }

    /// Convert to `i64` if the value fits.
    pub fn to_i64(&self) -> Option<i64> {
        let magnitude = self.abs().to_u64()?;
        if self.neg {
            if magnitude <= 1 << 63 {
                Some((magnitude as i64).wrapping_neg())
            } else {
                None
            }
        } else {
            i64::try_from(magnitude).ok()
        }
    }

    /// Strip high zero limbs and clear the sign of zero.
    pub(crate) fn normalize(&mut self) {
        while self.limbs.last() == Some(&0) {
            self.limbs.pop();
        }

        if self.limbs.is_empty() {
            self.neg = false;
        }
    }
}

impl Zeroize for BigInt {
    fn zeroize(&mut self) {
        self.limbs.zeroize();
        self.neg = false;
    }
}

impl From<u32> for BigInt {
    fn from(n: u32) -> Self {
        Self::from_limbs(alloc::vec![n])
    }
}

impl From<u64> for BigInt {
    fn from(n: u64) -> Self {
        Self::from_limbs(alloc::vec![n as u32, (n >> 32) as u32])
    }
}

impl From<i32> for BigInt {
    fn from(n: i32) -> Self {
        Self::from(i64::from(n))
    }
}

impl From<i64> for BigInt {
    fn from(n: i64) -> Self {
        let mut ret = Self::from(n.unsigned_abs());
        if n < 0 {
            ret.negate();
        }
        ret
    }
}

impl From<usize> for BigInt {
    fn from(n: usize) -> Self {
        Self::from(n as u64)
    }
}

/// Strip high zero limbs from a borrowed magnitude.
pub(crate) fn trim(limbs: &[u32]) -> &[u32] {
    let len = limbs.iter().rposition(|&l| l != 0).map_or(0, |i| i + 1);
    &limbs[..len]
}

#[cfg(test)]
mod tests {
    use super::BigInt;
    use alloc::vec;

    #[test]
    fn zero_is_never_negative() {
        let mut z = BigInt::from_sign_limbs(true, vec![0, 0]);
        assert!(z.is_zero());
        assert!(!z.is_neg());

        z.negate();
        assert!(!z.is_neg());
    }

    #[test]
    fn native_conversions() {
        assert_eq!(BigInt::from(-5i64).to_i64(), Some(-5));
        assert_eq!(BigInt::from(i64::MIN).to_i64(), Some(i64::MIN));
        assert_eq!(BigInt::from(u64::MAX).to_u64(), Some(u64::MAX));
        assert_eq!(BigInt::from(u64::MAX).to_i64(), None);
        assert_eq!(BigInt::from(-1i32).to_u64(), None);
        assert_eq!(BigInt::from(0x1_0000_0000u64).limbs(), &[0, 1]);
    }
}
