//! Ordering.

use crate::BigInt;
use core::cmp::Ordering;

/// Compare two normalized magnitudes.
pub(crate) fn mag_cmp(a: &[u32], b: &[u32]) -> Ordering {
    a.len()
        .cmp(&b.len())
        .then_with(|| a.iter().rev().cmp(b.iter().rev()))
}

impl BigInt {
    /// Compare magnitudes, ignoring sign.
    pub fn ucmp(&self, other: &Self) -> Ordering {
        mag_cmp(&self.limbs, &other.limbs)
    }

    /// Compare against a native integer.
    pub fn cmpn(&self, n: i64) -> Ordering {
        self.cmp(&BigInt::from(n))
    }

    /// Is this value equal to the given native integer?
    pub fn eqn(&self, n: i64) -> bool {
        self.cmpn(n) == Ordering::Equal
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.neg, other.neg) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.ucmp(other),
            (true, true) => other.ucmp(self),
        }
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use crate::BigInt;
    use core::cmp::Ordering;

    #[test]
    fn signed_and_unsigned_ordering() {
        let a = BigInt::from(-7i64);
        let b = BigInt::from(3i64);

        assert!(a < b);
        assert_eq!(a.ucmp(&b), Ordering::Greater);
        assert_eq!(BigInt::from(-9i64).cmp(&a), Ordering::Less);
        assert!(b.eqn(3));
        assert_eq!(BigInt::from(u64::MAX).cmpn(i64::MAX), Ordering::Greater);
    }
}
