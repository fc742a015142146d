//! Field elements bound to a reduction context.

use crate::{Red, Result};
use alloc::{sync::Arc, vec::Vec};
use bignum::BigInt;
use core::{
    fmt,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};
use subtle::{Choice, ConditionallySelectable};
use zeroize::Zeroize;

/// Element of `Z/mZ`, stored in the internal representation of its [`Red`] context.
///
/// Arithmetic between elements of incompatible contexts panics.
#[derive(Clone)]
pub struct FieldElement {
    /// Internal representation in `[0, m)`; `aR mod m` for Montgomery contexts.
    value: BigInt,
    red: Arc<Red>,
}

impl FieldElement {
    pub(crate) fn from_raw(value: BigInt, red: Arc<Red>) -> Self {
        debug_assert!(!value.is_neg() && &value < red.modulus());
        Self { value, red }
    }

    /// Reduction context of this element.
    pub fn red(&self) -> &Arc<Red> {
        &self.red
    }

    pub(crate) fn raw(&self) -> &BigInt {
        &self.value
    }

    /// Canonical integer value in `[0, m)`.
    pub fn to_bigint(&self) -> BigInt {
        self.red.from_raw(&self.value)
    }

    /// Is this the additive identity?
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Is the canonical value odd?
    pub fn is_odd(&self) -> bool {
        self.to_bigint().is_odd()
    }

    /// Element with the same context as `self`.
    fn with_value(&self, value: BigInt) -> Self {
        Self {
            value,
            red: Arc::clone(&self.red),
        }
    }

    fn check_red(&self, other: &Self) {
        assert!(
            self.red.is_compatible(&other.red),
            "field elements belong to different reduction contexts"
        );
    }

    fn add_in_place(&mut self, rhs: &Self) {
        self.check_red(rhs);
        self.value += &rhs.value;
        if &self.value >= self.red.modulus() {
            self.value -= self.red.modulus();
        }
    }

    fn sub_in_place(&mut self, rhs: &Self) {
        self.check_red(rhs);
        self.value -= &rhs.value;
        if self.value.is_neg() {
            self.value += self.red.modulus();
        }
    }

    fn mul_in_place(&mut self, rhs: &Self) {
        self.check_red(rhs);
        let product = &self.value * &rhs.value;
        self.value = self.red.reduce_product(product);
    }

    /// `2 * self`.
    pub fn double(&self) -> Self {
        let mut ret = self.clone();
        ret.add_in_place(self);
        ret
    }

    /// `self^2`.
    pub fn square(&self) -> Self {
        self.with_value(self.red.reduce_product(self.value.sqr()))
    }

    /// `self * 2^bits`.
    pub fn shl(&self, bits: usize) -> Self {
        self.with_value(self.red.imod(&(&self.value << bits)))
    }

    /// Multiplicative inverse. Fails for zero.
    pub fn invert(&self) -> Result<Self> {
        self.red.invert_raw(&self.value).map(|v| self.with_value(v))
    }

    /// `self^exp` for a non-negative exponent, by left-to-right square and multiply.
    pub fn pow(&self, exp: &BigInt) -> Self {
        debug_assert!(!exp.is_neg());

        let mut acc = self.red.one();
        for i in (0..exp.bit_length()).rev() {
            acc = acc.square();
            if exp.test_bit(i) {
                acc.mul_in_place(self);
            }
        }
        acc
    }

    /// Swap `a` and `b` when `choice` is set, touching every limb of both regardless.
    pub fn conditional_swap(a: &mut Self, b: &mut Self, choice: Choice) {
        a.check_red(b);
        let len = a.red.limb_len();

        let mut la = padded_limbs(&a.value, len);
        let mut lb = padded_limbs(&b.value, len);
        for (x, y) in la.iter_mut().zip(lb.iter_mut()) {
            u32::conditional_swap(x, y, choice);
        }

        a.value = BigInt::from_limbs(la);
        b.value = BigInt::from_limbs(lb);
    }
}

fn padded_limbs(value: &BigInt, len: usize) -> Vec<u32> {
    let mut limbs = value.limbs().to_vec();
    limbs.resize(len, 0);
    limbs
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.red.is_compatible(&other.red) && self.value == other.value
    }
}

impl Eq for FieldElement {}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({:#x})", self.to_bigint())
    }
}

impl Zeroize for FieldElement {
    fn zeroize(&mut self) {
        self.value.zeroize();
    }
}

/// Emit `core::ops` wrappers for an in-place method of the form `fn(&mut FieldElement, &FieldElement)`.
macro_rules! field_op {
    ($op:ident, $func:ident, $op_assign:ident, $func_assign:ident, $inner:ident) => {
        impl $op_assign<&FieldElement> for FieldElement {
            #[inline]
            fn $func_assign(&mut self, rhs: &FieldElement) {
                self.$inner(rhs);
            }
        }

        impl $op_assign<FieldElement> for FieldElement {
            #[inline]
            fn $func_assign(&mut self, rhs: FieldElement) {
                self.$inner(&rhs);
            }
        }

        impl $op<&FieldElement> for &FieldElement {
            type Output = FieldElement;

            #[inline]
            fn $func(self, rhs: &FieldElement) -> FieldElement {
                let mut ret = self.clone();
                ret.$inner(rhs);
                ret
            }
        }

        impl $op<&FieldElement> for FieldElement {
            type Output = FieldElement;

            #[inline]
            fn $func(mut self, rhs: &FieldElement) -> FieldElement {
                self.$inner(rhs);
                self
            }
        }

        impl $op<FieldElement> for FieldElement {
            type Output = FieldElement;

            #[inline]
            fn $func(mut self, rhs: FieldElement) -> FieldElement {
                self.$inner(&rhs);
                self
            }
        }
    };
}

field_op!(Add, add, AddAssign, add_assign, add_in_place);
field_op!(Sub, sub, SubAssign, sub_assign, sub_in_place);
field_op!(Mul, mul, MulAssign, mul_assign, mul_in_place);

impl Neg for &FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        if self.is_zero() {
            self.clone()
        } else {
            self.with_value(self.red.modulus() - &self.value)
        }
    }
}

impl Neg for FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        -&self
    }
}
