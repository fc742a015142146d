//! Byte inputs accepted at the public entry points.

use crate::{Error, Result};
use alloc::{borrow::Cow, string::String, vec::Vec};
use bignum::BigInt;

/// Input that can be normalized into a byte sequence.
///
/// Keys, messages, points and signatures may be given as raw bytes, as a hex
/// string, or as a native integer. Every public operation normalizes its input
/// once with [`ByteSource::to_bytes`] before any arithmetic happens.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ByteSource<'a> {
    /// Raw bytes.
    Bytes(Cow<'a, [u8]>),

    /// Hex digits. An odd number of digits is read with an implicit leading zero.
    Hex(&'a str),

    /// Native integer, encoded big endian without leading zero bytes.
    Integer(u64),
}

impl ByteSource<'_> {
    /// Normalize into an owned byte sequence.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        match self {
            ByteSource::Bytes(bytes) => Ok(bytes.to_vec()),
            ByteSource::Hex(s) => decode_hex(s),
            ByteSource::Integer(n) => Ok(BigInt::from(*n).to_be_bytes()),
        }
    }

    /// Big-endian integer value of the input.
    pub fn to_bigint(&self) -> Result<BigInt> {
        match self {
            ByteSource::Integer(n) => Ok(BigInt::from(*n)),
            _ => Ok(BigInt::from_be_bytes(&self.to_bytes()?)),
        }
    }
}

fn decode_hex(s: &str) -> Result<Vec<u8>> {
    if s.len() % 2 == 0 {
        return hex::decode(s).map_err(|_| Error::InvalidEncoding);
    }

    let mut padded = String::with_capacity(s.len() + 1);
    padded.push('0');
    padded.push_str(s);
    hex::decode(padded).map_err(|_| Error::InvalidEncoding)
}

impl<'a> From<&'a [u8]> for ByteSource<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        ByteSource::Bytes(Cow::Borrowed(bytes))
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for ByteSource<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        ByteSource::Bytes(Cow::Borrowed(bytes))
    }
}

impl<'a> From<&'a Vec<u8>> for ByteSource<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        ByteSource::Bytes(Cow::Borrowed(bytes))
    }
}

impl From<Vec<u8>> for ByteSource<'_> {
    fn from(bytes: Vec<u8>) -> Self {
        ByteSource::Bytes(Cow::Owned(bytes))
    }
}

impl<'a> From<&'a str> for ByteSource<'a> {
    fn from(hex: &'a str) -> Self {
        ByteSource::Hex(hex)
    }
}

impl From<u64> for ByteSource<'_> {
    fn from(n: u64) -> Self {
        ByteSource::Integer(n)
    }
}

#[cfg(test)]
mod tests {
    use super::ByteSource;
    use crate::Error;
    use alloc::vec;

    #[test]
    fn normalizes_every_variant() {
        assert_eq!(ByteSource::from(&[1u8, 2, 3]).to_bytes().unwrap(), [1, 2, 3]);
        assert_eq!(ByteSource::from(vec![9u8]).to_bytes().unwrap(), [9]);
        assert_eq!(ByteSource::from("0a0b").to_bytes().unwrap(), [0x0a, 0x0b]);
        assert_eq!(ByteSource::from("abc").to_bytes().unwrap(), [0x0a, 0xbc]);
        assert_eq!(ByteSource::from(0x1234u64).to_bytes().unwrap(), [0x12, 0x34]);
        assert_eq!(ByteSource::from(0u64).to_bytes().unwrap(), [0]);
    }

    #[test]
    fn rejects_bad_hex() {
        assert_eq!(ByteSource::from("zz").to_bytes(), Err(Error::InvalidEncoding));
    }
}
