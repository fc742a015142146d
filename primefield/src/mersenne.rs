//! Reduction modulo pseudo-Mersenne primes `p = 2^n - k`.
//!
//! Since `2^n ≡ k (mod p)`, a value `hi * 2^n + lo` folds to `hi * k + lo`.
//! Folding repeats until the value fits in `n` bits, after which at most one
//! subtraction of `p` is needed.

use bignum::BigInt;
use core::cmp::Ordering;

/// Folding constants for `p = 2^n - k`.
#[derive(Clone, Debug)]
pub(crate) struct PseudoMersenne {
    /// Bit length `n` of the prime.
    pub(crate) bits: usize,

    /// `k = 2^n - p`.
    pub(crate) k: BigInt,
}

impl PseudoMersenne {
    /// Named primes, as `(name, n, k in hex)`.
    const NAMED: [(&'static str, usize, &'static str); 4] = [
        ("k256", 256, "1000003d1"),
        ("p224", 224, "ffffffffffffffffffffffff"),
        ("p192", 192, "10000000000000001"),
        ("p25519", 255, "13"),
    ];

    /// Look up a named prime.
    pub(crate) fn named(name: &str) -> Option<Self> {
        Self::NAMED
            .iter()
            .find(|(n, _, _)| *n == name)
            .and_then(|&(_, bits, k)| {
                BigInt::from_str_radix(k, 16)
                    .ok()
                    .map(|k| Self { bits, k })
            })
    }

    /// The prime `2^n - k`.
    pub(crate) fn prime(&self) -> BigInt {
        (BigInt::one() << self.bits) - &self.k
    }

    /// Reduce a non-negative value into `[0, p)`.
    pub(crate) fn reduce(&self, p: &BigInt, mut r: BigInt) -> BigInt {
        debug_assert!(!r.is_neg());

        while r.bit_length() > self.bits {
            let lo = r.mask_bits(self.bits);
            r >>= self.bits;
            r *= &self.k;
            r += &lo;
        }

        match r.cmp(p) {
            Ordering::Less => r,
            Ordering::Equal => BigInt::zero(),
            Ordering::Greater => r - p,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PseudoMersenne;
    use bignum::BigInt;

    #[test]
    fn named_primes() {
        let k256 = PseudoMersenne::named("k256").unwrap();
        assert_eq!(
            k256.prime().to_str_radix(16),
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f"
        );

        let p224 = PseudoMersenne::named("p224").unwrap();
        assert_eq!(
            p224.prime().to_str_radix(16),
            "ffffffffffffffffffffffffffffffff000000000000000000000001"
        );

        let p192 = PseudoMersenne::named("p192").unwrap();
        assert_eq!(
            p192.prime().to_str_radix(16),
            "fffffffffffffffffffffffffffffffeffffffffffffffff"
        );

        assert!(PseudoMersenne::named("p256").is_none());
    }

    #[test]
    fn folding_matches_division() {
        let red = PseudoMersenne::named("p25519").unwrap();
        let p = red.prime();

        let x = BigInt::from_str_radix(
            "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff\
             fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff5",
            16,
        )
        .unwrap();
        assert_eq!(red.reduce(&p, x.clone()), x.rem_euclid(&p));
        assert!(red.reduce(&p, p.clone()).is_zero());
    }
}
