//! Bit-level operations.
//!
//! Shifts and single-bit accessors act on the magnitude and preserve the sign.
//! The bitwise operators `&`, `|`, `^` and `!` treat negative values as
//! infinitely sign-extended two's complement, matching primitive integers.

use crate::{BigInt, LIMB_BITS};
use alloc::vec::Vec;
use core::ops::Not;

impl BigInt {
    /// Number of bits in the magnitude; zero for zero.
    pub fn bit_length(&self) -> usize {
        match self.limbs.last() {
            Some(&top) => self.limbs.len() * LIMB_BITS - top.leading_zeros() as usize,
            None => 0,
        }
    }

    /// Number of bytes needed to hold the magnitude.
    pub fn byte_length(&self) -> usize {
        self.bit_length().div_ceil(8)
    }

    /// Number of trailing zero bits of the magnitude; zero for zero.
    pub fn zero_bits(&self) -> usize {
        self.limbs
            .iter()
            .position(|&l| l != 0)
            .map_or(0, |i| i * LIMB_BITS + self.limbs[i].trailing_zeros() as usize)
    }

    /// Is bit `bit` of the magnitude set?
    pub fn test_bit(&self, bit: usize) -> bool {
        self.limbs
            .get(bit / LIMB_BITS)
            .is_some_and(|l| (l >> (bit % LIMB_BITS)) & 1 == 1)
    }

    /// Set or clear bit `bit` of the magnitude.
    pub fn set_bit(&mut self, bit: usize, value: bool) {
        let idx = bit / LIMB_BITS;
        if self.limbs.len() <= idx {
            if !value {
                return;
            }
            self.limbs.resize(idx + 1, 0);
        }

        let mask = 1u32 << (bit % LIMB_BITS);
        if value {
            self.limbs[idx] |= mask;
        } else {
            self.limbs[idx] &= !mask;
        }
        self.normalize();
    }

    /// Keep only the lowest `bits` bits of the magnitude.
    pub fn mask_bits(&self, bits: usize) -> BigInt {
        let mut ret = self.clone();
        ret.mask_bits_in_place(bits);
        ret
    }

    /// Keep only the lowest `bits` bits of the magnitude, in place.
    pub fn mask_bits_in_place(&mut self, bits: usize) {
        let full = bits / LIMB_BITS;
        let partial = bits % LIMB_BITS;

        if self.limbs.len() > full {
            if partial == 0 {
                self.limbs.truncate(full);
            } else {
                self.limbs.truncate(full + 1);
                self.limbs[full] &= (1u32 << partial) - 1;
            }
        }
        self.normalize();
    }

    /// Invert the lowest `width` bits of the magnitude. The result is non-negative.
    pub fn not_bits(&self, width: usize) -> BigInt {
        let limbs = width.div_ceil(LIMB_BITS);
        let mut out: Vec<u32> = (0..limbs)
            .map(|i| !self.limbs.get(i).copied().unwrap_or(0))
            .collect();

        let partial = width % LIMB_BITS;
        if partial != 0 {
            if let Some(top) = out.last_mut() {
                *top &= (1u32 << partial) - 1;
            }
        }

        BigInt::from_limbs(out)
    }

    /// Two's complement representation of `self` in `width` bits.
    pub fn to_twos(&self, width: usize) -> BigInt {
        if self.neg {
            let mut ret = self.not_bits(width);
            ret.add_u32(1);
            ret.mask_bits_in_place(width);
            ret
        } else {
            self.clone()
        }
    }

    /// Interpret the lowest `width` bits as a two's complement value.
    pub fn from_twos(&self, width: usize) -> BigInt {
        if width > 0 && self.test_bit(width - 1) {
            let mut ret = self.not_bits(width);
            ret.add_u32(1);
            -ret
        } else {
            self.clone()
        }
    }

    /// Shift the magnitude left in place.
    pub fn shl_in_place(&mut self, bits: usize) {
        if self.is_zero() {
            return;
        }

        let limbs = bits / LIMB_BITS;
        let s = (bits % LIMB_BITS) as u32;

        if s != 0 {
            let mut carry = 0u32;
            for limb in self.limbs.iter_mut() {
                let next = *limb >> (32 - s);
                *limb = (*limb << s) | carry;
                carry = next;
            }
            if carry != 0 {
                self.limbs.push(carry);
            }
        }

        if limbs > 0 {
            self.limbs.splice(0..0, core::iter::repeat_n(0, limbs));
        }
    }

    /// Shift the magnitude right in place, rounding toward zero.
    pub fn shr_in_place(&mut self, bits: usize) {
        let limbs = bits / LIMB_BITS;
        let s = (bits % LIMB_BITS) as u32;

        if limbs >= self.limbs.len() {
            self.limbs.clear();
            self.normalize();
            return;
        }

        self.limbs.drain(..limbs);
        if s != 0 {
            let len = self.limbs.len();
            for i in 0..len {
                let hi = if i + 1 < len { self.limbs[i + 1] << (32 - s) } else { 0 };
                self.limbs[i] = (self.limbs[i] >> s) | hi;
            }
        }
        self.normalize();
    }

    /// Apply a limb-wise operation to the two's complement forms of both operands.
    fn bitwise(&mut self, rhs: &BigInt, op: impl Fn(u32, u32) -> u32) {
        let width = (self.limbs.len().max(rhs.limbs.len()) + 1) * LIMB_BITS;
        let a = self.to_twos(width);
        let b = rhs.to_twos(width);

        let limbs = (0..width / LIMB_BITS)
            .map(|i| {
                op(
                    a.limbs.get(i).copied().unwrap_or(0),
                    b.limbs.get(i).copied().unwrap_or(0),
                )
            })
            .collect();

        *self = BigInt::from_limbs(limbs).from_twos(width);
    }

    fn and_in_place(&mut self, rhs: &BigInt) {
        self.bitwise(rhs, |a, b| a & b);
    }

    fn or_in_place(&mut self, rhs: &BigInt) {
        self.bitwise(rhs, |a, b| a | b);
    }

    fn xor_in_place(&mut self, rhs: &BigInt) {
        self.bitwise(rhs, |a, b| a ^ b);
    }
}

forward_binop!(BitAnd, bitand, BitAndAssign, bitand_assign, and_in_place);
forward_binop!(BitOr, bitor, BitOrAssign, bitor_assign, or_in_place);
forward_binop!(BitXor, bitxor, BitXorAssign, bitxor_assign, xor_in_place);
forward_shift!(Shl, shl, ShlAssign, shl_assign, shl_in_place);
forward_shift!(Shr, shr, ShrAssign, shr_assign, shr_in_place);

impl Not for BigInt {
    type Output = BigInt;

    /// `!x == -x - 1`
    fn not(self) -> BigInt {
        let mut ret = -self;
        ret.sub_u32(1);
        ret
    }
}

impl Not for &BigInt {
    type Output = BigInt;

    fn not(self) -> BigInt {
        !self.clone()
    }
}

#[cfg(test)]
mod tests {
    use crate::BigInt;

    fn int(n: i64) -> BigInt {
        BigInt::from(n)
    }

    #[test]
    fn twos_complement_round_trip() {
        assert_eq!(int(-1).to_twos(8), int(0xff));
        assert_eq!(int(-128).to_twos(8), int(0x80));
        assert_eq!(int(0xff).from_twos(8), int(-1));
        assert_eq!(int(0x7f).from_twos(8), int(0x7f));
        assert_eq!(int(-0x1234_5678_9abc).to_twos(64).from_twos(64), int(-0x1234_5678_9abc));
    }

    #[test]
    fn bitwise_matches_primitives() {
        let values = [-0x1_0000_0001i64, -77, -1, 0, 1, 0xff00, 0x7fff_ffff_ffff];
        for &a in &values {
            for &b in &values {
                assert_eq!(int(a) & int(b), int(a & b), "{a} & {b}");
                assert_eq!(int(a) | int(b), int(a | b), "{a} | {b}");
                assert_eq!(int(a) ^ int(b), int(a ^ b), "{a} ^ {b}");
            }
            assert_eq!(!int(a), int(!a));
        }
    }

    #[test]
    fn shifts_and_masks() {
        let a = int(0x1234_5678_9abc_def0);
        assert_eq!(&a << 36, &a * &int(1 << 36));
        assert_eq!((&a << 36) >> 36, a);
        assert_eq!(&a >> 36, int(0x1234_567));
        assert_eq!(int(-5) >> 1, int(-2));
        assert_eq!(a.mask_bits(12), int(0xef0));
        assert_eq!(int(0b1010).not_bits(4), int(0b0101));
        assert_eq!(a.bit_length(), 61);
        assert_eq!(a.byte_length(), 8);
        assert_eq!(int(0x100).zero_bits(), 8);
    }

    #[test]
    fn single_bits() {
        let mut a = BigInt::zero();
        a.set_bit(70, true);
        assert_eq!(a.bit_length(), 71);
        assert!(a.test_bit(70));
        a.set_bit(70, false);
        assert!(a.is_zero());
    }
}
