//! Modular square root implementations, adapted from <https://eprint.iacr.org/2012/685.pdf>.

use crate::{Error, FieldElement, Result};
use bignum::BigInt;

/// Upper bound on the search for a quadratic non-residue.
const NON_RESIDUE_SEARCH_LIMIT: u32 = 1 << 10;

/// Square root algorithms, with their exponents precomputed for a modulus.
#[derive(Clone, Debug)]
pub(crate) enum SqrtAlgorithm {
    /// Atkins algorithm for `q ≡ 5 (mod 8)`, with `(q - 5) / 8`.
    Atkins { exp: BigInt },

    /// Shanks algorithm for `q ≡ 3 (mod 4)`, with `(q + 1) / 4`.
    Shanks { exp: BigInt },

    /// Tonelli-Shanks algorithm for `q - 1 = 2^s * t` with `t` odd, given a
    /// quadratic non-residue `z`.
    TonelliShanks { s: usize, t: BigInt, z: BigInt },

    /// No algorithm applies (even modulus, or no non-residue was found).
    Unsupported,
}

impl SqrtAlgorithm {
    /// Determine the best algorithm to use with a particular modulus.
    pub(crate) fn for_modulus(p: &BigInt) -> Self {
        if p.is_even() || p.bit_length() < 2 {
            return Self::Unsupported;
        }

        let residue8 = p.mod_u32(8).unwrap_or(0);
        if residue8 % 4 == 3 {
            let mut exp = p.clone();
            exp.add_u32(1);
            return Self::Shanks { exp: exp >> 2 };
        }

        if residue8 == 5 {
            let mut exp = p.clone();
            exp.sub_u32(5);
            return Self::Atkins { exp: exp >> 3 };
        }

        let mut p_minus_1 = p.clone();
        p_minus_1.sub_u32(1);
        let s = p_minus_1.zero_bits();
        let t = &p_minus_1 >> s;
        let euler = &p_minus_1 >> 1;

        (2..NON_RESIDUE_SEARCH_LIMIT)
            .map(BigInt::from)
            .find(|z| z.pow_mod(&euler, p).is_ok_and(|e| e == p_minus_1))
            .map_or(Self::Unsupported, |z| Self::TonelliShanks { s, t, z })
    }
}

impl FieldElement {
    /// Square root of `self`, or [`Error::NoSquareRoot`] for non-residues.
    ///
    /// Either root may be returned.
    pub fn sqrt(&self) -> Result<Self> {
        if self.is_zero() {
            return Ok(self.clone());
        }

        let root = match self.red().sqrt_algorithm() {
            SqrtAlgorithm::Atkins { exp } => self.sqrt_atkins(exp),
            SqrtAlgorithm::Shanks { exp } => self.pow(exp),
            SqrtAlgorithm::TonelliShanks { s, t, z } => self.sqrt_tonelli_shanks(*s, t, z)?,
            SqrtAlgorithm::Unsupported => return Err(Error::InvalidModulus),
        };

        if root.square() == *self {
            Ok(root)
        } else {
            Err(Error::NoSquareRoot)
        }
    }

    /// Atkins algorithm for `q ≡ 5 (mod 8)`.
    ///
    /// From <https://eprint.iacr.org/2012/685.pdf> (page 10, algorithm 3)
    fn sqrt_atkins(&self, exp: &BigInt) -> Self {
        let two = self.red().convert_to(&BigInt::from(2u32));
        let b = (&two * self).pow(exp);
        let i = &(&two * self) * &b.square();
        let one = self.red().one();
        &(self * &b) * &(&i - &one)
    }

    /// Variable-time Tonelli-Shanks for any odd prime.
    fn sqrt_tonelli_shanks(&self, s: usize, t: &BigInt, z: &BigInt) -> Result<Self> {
        let one = self.red().one();
        let mut m = s;
        let mut c = self.red().convert_to(z).pow(t);
        let mut b = self.pow(t);

        let mut exp = t.clone();
        exp.add_u32(1);
        let mut x = self.pow(&(exp >> 1));

        while b != one {
            // Least i with b^(2^i) == 1.
            let mut i = 0;
            let mut tmp = b.clone();
            while tmp != one {
                tmp = tmp.square();
                i += 1;
                if i == m {
                    return Err(Error::NoSquareRoot);
                }
            }

            let mut d = c.clone();
            for _ in 0..m - i - 1 {
                d = d.square();
            }

            m = i;
            c = d.square();
            b = &b * &c;
            x = &x * &d;
        }

        Ok(x)
    }
}

#[cfg(test)]
mod tests {
    use super::SqrtAlgorithm;
    use crate::{Error, Red};
    use bignum::BigInt;

    /// Generic sqrt test.
    fn sqrt_test(red: &alloc::sync::Arc<Red>) {
        for n in [1u32, 4, 9, 16, 25, 36, 49, 64] {
            let fe = red.convert_to(&BigInt::from(n));
            let root = fe.sqrt().unwrap();
            assert_eq!(root.square(), fe);
        }
    }

    #[test]
    fn algorithm_selection() {
        let k256 = Red::named("k256").unwrap();
        assert!(matches!(k256.sqrt_algorithm(), SqrtAlgorithm::Shanks { .. }));

        let p25519 = Red::named("p25519").unwrap();
        assert!(matches!(p25519.sqrt_algorithm(), SqrtAlgorithm::Atkins { .. }));

        let p224 = Red::named("p224").unwrap();
        assert!(matches!(
            p224.sqrt_algorithm(),
            SqrtAlgorithm::TonelliShanks { s: 96, .. }
        ));
    }

    #[test]
    fn shanks() {
        sqrt_test(&Red::named("k256").unwrap());
        sqrt_test(&Red::mont(BigInt::from(1_000_000_007u32)).unwrap());
    }

    #[test]
    fn atkins() {
        sqrt_test(&Red::named("p25519").unwrap());
    }

    #[test]
    fn tonelli_shanks() {
        sqrt_test(&Red::named("p224").unwrap());
        sqrt_test(&Red::mont(BigInt::from(17u32)).unwrap());
    }

    #[test]
    fn non_residues() {
        for (red, n) in [
            (Red::named("p25519").unwrap(), 2u32),
            (Red::named("p224").unwrap(), 11),
            (Red::new(BigInt::from(1_000_000_007u32)).unwrap(), 5),
            (Red::mont(BigInt::from(17u32)).unwrap(), 3),
        ] {
            let fe = red.convert_to(&BigInt::from(n));
            assert_eq!(fe.sqrt(), Err(Error::NoSquareRoot), "{n} mod {:?}", red.modulus());
        }
    }

    #[test]
    fn unsupported_modulus() {
        let red = Red::new(BigInt::from(10u32)).unwrap();
        let four = red.convert_to(&BigInt::from(4u32));
        assert_eq!(four.sqrt(), Err(Error::InvalidModulus));
    }
}
