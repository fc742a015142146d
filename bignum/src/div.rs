//! Division and remainder.
//!
//! Multi-limb division follows Knuth's Algorithm D (TAOCP vol. 2, 4.3.1) in the
//! formulation of Hacker's Delight `divmnu`.

use crate::{BigInt, Error, Result, cmp::mag_cmp, trim};
use alloc::{vec, vec::Vec};
use core::cmp::Ordering;

const BASE: u64 = 1 << 32;

/// Rounding mode for signed division.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DivMode {
    /// Quotient rounded toward zero; the remainder takes the sign of the dividend.
    #[default]
    Truncate,

    /// Quotient rounded toward negative infinity; the remainder takes the sign of the divisor.
    Floor,

    /// Remainder is always non-negative.
    Euclid,
}

/// Divide a magnitude by a single limb, returning quotient and remainder.
pub(crate) fn div_small(u: &[u32], d: u32) -> (Vec<u32>, u32) {
    debug_assert_ne!(d, 0);

    let mut q = vec![0u32; u.len()];
    let mut rem = 0u64;
    for i in (0..u.len()).rev() {
        let cur = (rem << 32) | u64::from(u[i]);
        q[i] = (cur / u64::from(d)) as u32;
        rem = cur % u64::from(d);
    }

    (q, rem as u32)
}

/// Shift a magnitude left by `s < 32` bits, appending `extra` zero limbs of headroom.
fn shl_small(v: &[u32], s: u32, extra: usize) -> Vec<u32> {
    let mut out = vec![0u32; v.len() + extra];
    if s == 0 {
        out[..v.len()].copy_from_slice(v);
        return out;
    }

    let mut carry = 0u32;
    for (i, &limb) in v.iter().enumerate() {
        out[i] = (limb << s) | carry;
        carry = limb >> (32 - s);
    }
    if extra > 0 {
        out[v.len()] = carry;
    }
    out
}

/// Divide magnitudes. `v` must be non-empty and normalized.
pub(crate) fn mag_divmod(u: &[u32], v: &[u32]) -> (Vec<u32>, Vec<u32>) {
    let u = trim(u);
    debug_assert!(!v.is_empty() && v[v.len() - 1] != 0);

    if mag_cmp(u, v) == Ordering::Less {
        return (Vec::new(), u.to_vec());
    }

    if v.len() == 1 {
        let (q, r) = div_small(u, v[0]);
        return (q, vec![r]);
    }

    let n = v.len();
    let m = u.len() - n;
    let s = v[n - 1].leading_zeros();
    let vn = shl_small(v, s, 0);
    let mut un = shl_small(u, s, 1);
    let mut q = vec![0u32; m + 1];

    for j in (0..=m).rev() {
        let num = (u64::from(un[j + n]) << 32) | u64::from(un[j + n - 1]);
        let mut qhat = num / u64::from(vn[n - 1]);
        let mut rhat = num % u64::from(vn[n - 1]);

        while qhat >= BASE
            || qhat * u64::from(vn[n - 2]) > ((rhat << 32) | u64::from(un[j + n - 2]))
        {
            qhat -= 1;
            rhat += u64::from(vn[n - 1]);
            if rhat >= BASE {
                break;
            }
        }

        // Multiply and subtract.
        let mut k = 0i64;
        for i in 0..n {
            let p = qhat * u64::from(vn[i]);
            let t = i64::from(un[i + j]) - k - (p & 0xffff_ffff) as i64;
            un[i + j] = t as u32;
            k = (p >> 32) as i64 - (t >> 32);
        }
        let t = i64::from(un[j + n]) - k;
        un[j + n] = t as u32;

        q[j] = qhat as u32;
        if t < 0 {
            // Estimate was one too large; add back.
            q[j] = q[j].wrapping_sub(1);
            let mut carry = 0u64;
            for i in 0..n {
                let sum = u64::from(un[i + j]) + u64::from(vn[i]) + carry;
                un[i + j] = sum as u32;
                carry = sum >> 32;
            }
            un[j + n] = un[j + n].wrapping_add(carry as u32);
        }
    }

    // Unnormalize the remainder.
    let mut r = vec![0u32; n];
    if s == 0 {
        r.copy_from_slice(&un[..n]);
    } else {
        for i in 0..n {
            r[i] = (un[i] >> s) | (un[i + 1] << (32 - s));
        }
    }

    (q, r)
}

impl BigInt {
    /// Divide with the given rounding mode, returning `(quotient, remainder)`.
    ///
    /// The results always satisfy `self == quotient * rhs + remainder`.
    pub fn div_rem(&self, rhs: &BigInt, mode: DivMode) -> Result<(BigInt, BigInt)> {
        if rhs.is_zero() {
            return Err(Error::DivisionByZero);
        }

        let (q, r) = mag_divmod(&self.limbs, &rhs.limbs);
        let mut q = BigInt::from_sign_limbs(self.neg ^ rhs.neg, q);
        let mut r = BigInt::from_sign_limbs(self.neg, r);

        match mode {
            DivMode::Truncate => {}
            DivMode::Floor => {
                if !r.is_zero() && r.neg != rhs.neg {
                    q.sub_u32(1);
                    r += rhs;
                }
            }
            DivMode::Euclid => {
                if r.neg {
                    if rhs.neg {
                        q.add_u32(1);
                        r -= rhs;
                    } else {
                        q.sub_u32(1);
                        r += rhs;
                    }
                }
            }
        }

        Ok((q, r))
    }

    /// Non-negative remainder modulo `m`.
    pub fn umod(&self, m: &BigInt) -> Result<BigInt> {
        self.div_rem(m, DivMode::Euclid).map(|(_, r)| r)
    }

    /// Quotient rounded to the nearest integer, with halves rounded away from zero.
    pub fn div_round(&self, rhs: &BigInt) -> Result<BigInt> {
        let (mut q, r) = self.div_rem(rhs, DivMode::Truncate)?;
        if r.is_zero() {
            return Ok(q);
        }

        let mut twice = r.abs();
        twice.mul_u32(2);
        if twice.ucmp(rhs) != Ordering::Less {
            if self.neg ^ rhs.neg {
                q.sub_u32(1);
            } else {
                q.add_u32(1);
            }
        }

        Ok(q)
    }

    /// Remainder of the magnitude modulo a small non-zero integer.
    pub fn mod_u32(&self, d: u32) -> Result<u32> {
        if d == 0 {
            return Err(Error::DivisionByZero);
        }
        Ok(div_small(&self.limbs, d).1)
    }

    /// Non-negative remainder modulo `m`.
    ///
    /// # Panics
    ///
    /// If `m` is zero.
    pub fn rem_euclid(&self, m: &BigInt) -> BigInt {
        match self.umod(m) {
            Ok(r) => r,
            Err(_) => panic!("attempt to calculate the remainder with a divisor of zero"),
        }
    }

    fn div_in_place(&mut self, rhs: &BigInt) {
        match self.div_rem(rhs, DivMode::Truncate) {
            Ok((q, _)) => *self = q,
            Err(_) => panic!("attempt to divide by zero"),
        }
    }

    fn rem_in_place(&mut self, rhs: &BigInt) {
        match self.div_rem(rhs, DivMode::Truncate) {
            Ok((_, r)) => *self = r,
            Err(_) => panic!("attempt to calculate the remainder with a divisor of zero"),
        }
    }
}

// Operators truncate like the primitive integer types, and likewise panic on a zero divisor.
forward_binop!(Div, div, DivAssign, div_assign, div_in_place);
forward_binop!(Rem, rem, RemAssign, rem_assign, rem_in_place);
