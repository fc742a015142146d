//! Radix strings and byte encodings.

use crate::{BigInt, Error, Result, div::div_small};
use alloc::{string::String, vec, vec::Vec};
use core::{fmt, str::FromStr};

/// Largest power of `radix` which fits in a limb, and its exponent.
fn chunk(radix: u32) -> (u32, usize) {
    let mut base = radix;
    let mut digits = 1;
    while let Some(next) = base.checked_mul(radix) {
        base = next;
        digits += 1;
    }
    (base, digits)
}

impl BigInt {
    /// Parse a string of digits in the given radix, with an optional leading `-`.
    ///
    /// Letters are accepted in either case. Underscores are not.
    pub fn from_str_radix(s: &str, radix: u32) -> Result<Self> {
        if !(2..=36).contains(&radix) {
            return Err(Error::InvalidRadix);
        }

        let (neg, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        if digits.is_empty() {
            return Err(Error::InvalidDigit);
        }

        let (_, per_chunk) = chunk(radix);
        let mut ret = BigInt::zero();
        let bytes = digits.as_bytes();

        for group in bytes.chunks(per_chunk) {
            let mut word = 0u32;
            for &c in group {
                let d = (c as char).to_digit(radix).ok_or(Error::InvalidDigit)?;
                word = word * radix + d;
            }
            ret.mul_u32(radix.pow(group.len() as u32));
            ret.add_u32(word);
        }

        if neg {
            ret.negate();
        }
        Ok(ret)
    }

    /// Format in the given radix using lowercase letters.
    ///
    /// # Panics
    ///
    /// If `radix` is outside of `2..=36`.
    pub fn to_str_radix(&self, radix: u32) -> String {
        self.to_str_radix_padded(radix, 1)
    }

    /// Format in the given radix, left-padding the digits with zeros to at least `min_digits`.
    ///
    /// # Panics
    ///
    /// If `radix` is outside of `2..=36`.
    pub fn to_str_radix_padded(&self, radix: u32, min_digits: usize) -> String {
        assert!((2..=36).contains(&radix), "radix must be between 2 and 36");

        let (base, per_chunk) = chunk(radix);
        let mut digits = Vec::new();
        let mut mag = self.limbs.clone();

        while !mag.is_empty() {
            let (q, mut rem) = div_small(&mag, base);
            mag = q;
            while mag.last() == Some(&0) {
                mag.pop();
            }

            for _ in 0..per_chunk {
                if mag.is_empty() && rem == 0 {
                    break;
                }
                digits.push(char::from_digit(rem % radix, radix).unwrap_or('0'));
                rem /= radix;
            }
        }

        while digits.len() < min_digits {
            digits.push('0');
        }
        if self.neg {
            digits.push('-');
        }

        digits.iter().rev().collect()
    }

    /// Decode a non-negative integer from big-endian bytes.
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        let limbs = bytes
            .rchunks(4)
            .map(|c| c.iter().fold(0u32, |acc, &b| (acc << 8) | u32::from(b)))
            .collect();
        Self::from_limbs(limbs)
    }

    /// Decode a non-negative integer from little-endian bytes.
    pub fn from_le_bytes(bytes: &[u8]) -> Self {
        let limbs = bytes
            .chunks(4)
            .map(|c| c.iter().rev().fold(0u32, |acc, &b| (acc << 8) | u32::from(b)))
            .collect();
        Self::from_limbs(limbs)
    }

    /// Minimal big-endian encoding of the magnitude. Zero encodes as `[0]`.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        let mut out = self.to_le_bytes();
        out.reverse();
        out
    }

    /// Minimal little-endian encoding of the magnitude. Zero encodes as `[0]`.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        let len = self.byte_length().max(1);
        let mut out: Vec<u8> = self.limbs.iter().flat_map(|l| l.to_le_bytes()).collect();
        out.resize(len, 0);
        out
    }

    /// Big-endian encoding of the magnitude, left-padded with zeros to `len` bytes.
    pub fn to_be_bytes_padded(&self, len: usize) -> Result<Vec<u8>> {
        let mut out = self.to_le_bytes_padded(len)?;
        out.reverse();
        Ok(out)
    }

    /// Little-endian encoding of the magnitude, right-padded with zeros to `len` bytes.
    pub fn to_le_bytes_padded(&self, len: usize) -> Result<Vec<u8>> {
        if self.byte_length() > len {
            return Err(Error::Overflow);
        }

        let mut out = vec![0u8; len];
        for (i, b) in self.limbs.iter().flat_map(|l| l.to_le_bytes()).enumerate() {
            if i < len {
                out[i] = b;
            }
        }
        Ok(out)
    }
}

impl FromStr for BigInt {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_radix(s, 10)
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.neg, "", self.abs().to_str_radix(10).as_str())
    }
}

impl fmt::LowerHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.neg, "0x", self.abs().to_str_radix(16).as_str())
    }
}

impl fmt::UpperHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.abs().to_str_radix(16).to_ascii_uppercase();
        f.pad_integral(!self.neg, "0x", &digits)
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigInt({self:#x})")
    }
}

#[cfg(test)]
mod tests {
    use crate::{BigInt, Error};
    use alloc::{format, string::ToString};
    use hex_literal::hex;

    #[test]
    fn radix_round_trips() {
        let n = BigInt::from_str_radix("-1234567890abcdefABCDEF", 16).unwrap();
        assert_eq!(n.to_str_radix(16), "-1234567890abcdefabcdef");

        for radix in [2, 3, 7, 10, 36] {
            let s = n.to_str_radix(radix);
            assert_eq!(BigInt::from_str_radix(&s, radix).unwrap(), n, "radix {radix}");
        }

        assert_eq!(BigInt::zero().to_str_radix(10), "0");
        assert_eq!(BigInt::from(255u32).to_str_radix_padded(16, 4), "00ff");
        assert_eq!(
            "340282366920938463463374607431768211456".parse::<BigInt>().unwrap(),
            BigInt::one() << 128
        );
    }

    #[test]
    fn rejects_bad_digits() {
        assert_eq!(BigInt::from_str_radix("12z", 16), Err(Error::InvalidDigit));
        assert_eq!(BigInt::from_str_radix("-", 10), Err(Error::InvalidDigit));
        assert_eq!(BigInt::from_str_radix("1", 37), Err(Error::InvalidRadix));
    }

    #[test]
    fn formatting() {
        let n = BigInt::from(-0xbeefi64);
        assert_eq!(n.to_string(), "-48879");
        assert_eq!(format!("{n:x}"), "-beef");
        assert_eq!(format!("{n:#X}"), "-0xBEEF");
        assert_eq!(format!("{n:?}"), "BigInt(-0xbeef)");
    }

    #[test]
    fn byte_encodings() {
        let bytes = hex!("0102030405060708090a");
        let n = BigInt::from_be_bytes(&bytes);

        assert_eq!(n.to_be_bytes(), bytes);
        assert_eq!(BigInt::from_le_bytes(&n.to_le_bytes()), n);
        assert_eq!(n.to_be_bytes_padded(12).unwrap()[..2], [0, 0]);
        assert_eq!(n.to_be_bytes_padded(9), Err(Error::Overflow));
        assert_eq!(BigInt::from_be_bytes(&[0, 0, 7]), BigInt::from(7u32));
        assert_eq!(BigInt::zero().to_be_bytes(), [0]);
    }
}
