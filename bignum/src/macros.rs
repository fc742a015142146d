/// Emit `core::ops` trait wrappers for an in-place inherent method of the form
/// `fn(&mut BigInt, &BigInt)`.
///
/// Pure operators on references clone the left operand; operators taking the
/// left operand by value reuse its allocation.
macro_rules! forward_binop {
    ($op:ident, $func:ident, $op_assign:ident, $func_assign:ident, $inner:ident) => {
        impl ::core::ops::$op_assign<&$crate::BigInt> for $crate::BigInt {
            #[inline]
            fn $func_assign(&mut self, rhs: &$crate::BigInt) {
                self.$inner(rhs);
            }
        }

        impl ::core::ops::$op_assign<$crate::BigInt> for $crate::BigInt {
            #[inline]
            fn $func_assign(&mut self, rhs: $crate::BigInt) {
                self.$inner(&rhs);
            }
        }

        impl ::core::ops::$op<&$crate::BigInt> for &$crate::BigInt {
            type Output = $crate::BigInt;

            #[inline]
            fn $func(self, rhs: &$crate::BigInt) -> $crate::BigInt {
                let mut ret = self.clone();
                ret.$inner(rhs);
                ret
            }
        }

        impl ::core::ops::$op<$crate::BigInt> for &$crate::BigInt {
            type Output = $crate::BigInt;

            #[inline]
            fn $func(self, rhs: $crate::BigInt) -> $crate::BigInt {
                let mut ret = self.clone();
                ret.$inner(&rhs);
                ret
            }
        }

        impl ::core::ops::$op<&$crate::BigInt> for $crate::BigInt {
            type Output = $crate::BigInt;

            #[inline]
            fn $func(mut self, rhs: &$crate::BigInt) -> $crate::BigInt {
                self.$inner(rhs);
                self
            }
        }

        impl ::core::ops::$op<$crate::BigInt> for $crate::BigInt {
            type Output = $crate::BigInt;

            #[inline]
            fn $func(mut self, rhs: $crate::BigInt) -> $crate::BigInt {
                self.$inner(&rhs);
                self
            }
        }
    };
}

/// Emit shift operator wrappers for in-place inherent shift methods taking a bit count.
macro_rules! forward_shift {
    ($op:ident, $func:ident, $op_assign:ident, $func_assign:ident, $inner:ident) => {
        impl ::core::ops::$op_assign<usize> for $crate::BigInt {
            #[inline]
            fn $func_assign(&mut self, bits: usize) {
                self.$inner(bits);
            }
        }

        impl ::core::ops::$op<usize> for &$crate::BigInt {
            type Output = $crate::BigInt;

            #[inline]
            fn $func(self, bits: usize) -> $crate::BigInt {
                let mut ret = self.clone();
                ret.$inner(bits);
                ret
            }
        }

        impl ::core::ops::$op<usize> for $crate::BigInt {
            type Output = $crate::BigInt;

            #[inline]
            fn $func(mut self, bits: usize) -> $crate::BigInt {
                self.$inner(bits);
                self
            }
        }
    };
}
