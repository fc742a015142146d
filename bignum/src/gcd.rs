//! Greatest common divisor, modular inversion and modular exponentiation.

use crate::{BigInt, Error, Result};

impl BigInt {
    /// Greatest common divisor of the magnitudes. `gcd(0, 0) == 0`.
    pub fn gcd(&self, other: &BigInt) -> BigInt {
        let mut a = self.abs();
        let mut b = other.abs();

        while !b.is_zero() {
            let r = a.rem_euclid(&b);
            a = b;
            b = r;
        }
        a
    }

    /// Extended Euclid: returns `(g, x, y)` with `self * x + other * y == g`
    /// and `g == gcd(self, other)`.
    pub fn egcd(&self, other: &BigInt) -> (BigInt, BigInt, BigInt) {
        let (mut old_r, mut r) = (self.clone(), other.clone());
        let (mut old_x, mut x) = (BigInt::one(), BigInt::zero());
        let (mut old_y, mut y) = (BigInt::zero(), BigInt::one());

        while !r.is_zero() {
            let q = &old_r / &r;
            let rem = &old_r - &(&q * &r);

            old_r = core::mem::replace(&mut r, rem);
            let next_x = &old_x - &(&q * &x);
            old_x = core::mem::replace(&mut x, next_x);
            let next_y = &old_y - &(&q * &y);
            old_y = core::mem::replace(&mut y, next_y);
        }

        if old_r.is_neg() {
            (-old_r, -old_x, -old_y)
        } else {
            (old_r, old_x, old_y)
        }
    }

    /// Inverse of `self` modulo `m`, in `[0, m)`.
    pub fn invm(&self, m: &BigInt) -> Result<BigInt> {
        if m.is_zero() {
            return Err(Error::DivisionByZero);
        }

        let m = m.abs();
        let a = self.umod(&m)?;
        let (g, x, _) = a.egcd(&m);
        if !g.is_one() {
            return Err(Error::NotInvertible);
        }

        x.umod(&m)
    }

    /// `self^exp mod m`, in `[0, m)`. Negative exponents invert the base first.
    pub fn pow_mod(&self, exp: &BigInt, m: &BigInt) -> Result<BigInt> {
        if m.is_zero() {
            return Err(Error::DivisionByZero);
        }

        let base = if exp.is_neg() {
            self.invm(m)?
        } else {
            self.umod(m)?
        };

        let mut acc = BigInt::one().umod(m)?;
        for i in (0..exp.bit_length()).rev() {
            acc = acc.sqr().umod(m)?;
            if exp.test_bit(i) {
                acc = (&acc * &base).umod(m)?;
            }
        }

        Ok(acc)
    }
}

#[cfg(test)]
mod tests {
    use crate::{BigInt, Error};

    fn int(n: i64) -> BigInt {
        BigInt::from(n)
    }

    #[test]
    fn bezout_identity() {
        let a = int(240);
        let b = int(-46);
        let (g, x, y) = a.egcd(&b);

        assert_eq!(g, int(2));
        assert_eq!(&(&a * &x) + &(&b * &y), g);
        assert_eq!(a.gcd(&b), int(2));
        assert_eq!(BigInt::zero().gcd(&BigInt::zero()), BigInt::zero());
    }

    #[test]
    fn modular_inverse() {
        assert_eq!(int(3).invm(&int(11)).unwrap(), int(4));
        assert_eq!(int(-3).invm(&int(11)).unwrap(), int(7));
        assert_eq!(int(6).invm(&int(9)), Err(Error::NotInvertible));
        assert_eq!(int(6).invm(&BigInt::zero()), Err(Error::DivisionByZero));
    }

    #[test]
    fn modular_exponentiation() {
        let p = int(1_000_000_007);
        assert_eq!(int(2).pow_mod(&int(10), &p).unwrap(), int(1024));
        assert_eq!(int(2).pow_mod(&(&p - &int(1)), &p).unwrap(), BigInt::one());
        assert_eq!(int(2).pow_mod(&int(-1), &p).unwrap(), int(500_000_004));
        assert_eq!(int(5).pow_mod(&BigInt::zero(), &int(1)).unwrap(), BigInt::zero());
    }
}
