//! Montgomery reduction with `R = 2^(32 * limbs)`.

use alloc::vec::Vec;
use bignum::{BigInt, LIMB_BITS};

/// Precomputed Montgomery constants for an odd modulus.
#[derive(Clone, Debug)]
pub(crate) struct Montgomery {
    /// Number of limbs in the modulus.
    pub(crate) limbs: usize,

    /// `-m^-1 mod 2^32`.
    m_prime: u32,

    /// `R^2 mod m`.
    pub(crate) r2: BigInt,
}

impl Montgomery {
    /// Compute constants for an odd modulus `m > 1`.
    pub(crate) fn new(m: &BigInt) -> Self {
        debug_assert!(m.is_odd());

        let limbs = m.limb_len();
        let m0 = m.limbs()[0];

        // Newton iteration doubles the number of correct low bits each step.
        let mut inv = 1u32;
        for _ in 0..5 {
            inv = inv.wrapping_mul(2u32.wrapping_sub(m0.wrapping_mul(inv)));
        }

        let r2 = (BigInt::one() << (2 * LIMB_BITS * limbs)).rem_euclid(m);

        Self {
            limbs,
            m_prime: inv.wrapping_neg(),
            r2,
        }
    }

    /// Shift applied by [`Montgomery::to_mont`].
    pub(crate) fn shift(&self) -> usize {
        LIMB_BITS * self.limbs
    }

    /// `a * R mod m` for any integer `a`.
    pub(crate) fn to_mont(&self, m: &BigInt, a: &BigInt) -> BigInt {
        (a << self.shift()).rem_euclid(m)
    }

    /// REDC: `t * R^-1 mod m` for `0 <= t < m * R`.
    pub(crate) fn redc(&self, m: &BigInt, t: &BigInt) -> BigInt {
        debug_assert!(!t.is_neg());

        let n = self.limbs;
        let ml = m.limbs();
        let mut a: Vec<u32> = t.limbs().to_vec();
        a.resize(2 * n + 1, 0);

        for i in 0..n {
            let u = a[i].wrapping_mul(self.m_prime);

            let mut carry = 0u64;
            for j in 0..n {
                let s = u64::from(a[i + j]) + u64::from(u) * u64::from(ml[j]) + carry;
                a[i + j] = s as u32;
                carry = s >> 32;
            }

            let mut k = i + n;
            while carry != 0 && k < a.len() {
                let s = u64::from(a[k]) + carry;
                a[k] = s as u32;
                carry = s >> 32;
                k += 1;
            }
        }

        let r = BigInt::from_limbs(a.split_off(n));
        if &r >= m { r - m } else { r }
    }
}
