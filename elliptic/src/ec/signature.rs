//! ECDSA signatures.

use crate::{ByteSource, Error, Result};
use alloc::vec::Vec;
use bignum::BigInt;
use der::{
    Decode, DecodeValue, Encode, EncodeValue, Header, Length, Reader, Sequence, Writer,
    asn1::UintRef,
};

/// ECDSA signature `(r, s)`, with the optional recovery parameter produced by
/// signing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Signature {
    r: BigInt,
    s: BigInt,
    recovery_param: Option<u8>,
}

impl Signature {
    /// Signature from its components.
    pub fn new(r: BigInt, s: BigInt, recovery_param: Option<u8>) -> Self {
        Self {
            r,
            s,
            recovery_param,
        }
    }

    /// The `r` component.
    pub fn r(&self) -> &BigInt {
        &self.r
    }

    /// The `s` component.
    pub fn s(&self) -> &BigInt {
        &self.s
    }

    /// Bit 0: y-coordinate of `kG` is odd. Bit 1: x-coordinate of `kG`
    /// overflowed the group order.
    pub fn recovery_param(&self) -> Option<u8> {
        self.recovery_param
    }

    /// Parse an ASN.1 DER `SEQUENCE { r INTEGER, s INTEGER }`.
    pub fn from_der<'a>(der: impl Into<ByteSource<'a>>) -> Result<Self> {
        let bytes = der.into().to_bytes()?;
        let SignatureRef { r, s } = SignatureRef::from_der(&bytes)?;
        Ok(Self::new(
            BigInt::from_be_bytes(r.as_bytes()),
            BigInt::from_be_bytes(s.as_bytes()),
            None,
        ))
    }

    /// Serialize as ASN.1 DER. Fails for negative components.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        if self.r.is_neg() || self.s.is_neg() {
            return Err(Error::OutOfRange);
        }

        let r = self.r.to_be_bytes();
        let s = self.s.to_be_bytes();
        let sig = SignatureRef {
            r: UintRef::new(&r)?,
            s: UintRef::new(&s)?,
        };
        Ok(sig.to_der()?)
    }

    /// Parse the fixed-width concatenation `r || s`.
    pub fn from_bytes<'a>(bytes: impl Into<ByteSource<'a>>) -> Result<Self> {
        let bytes = bytes.into().to_bytes()?;
        if bytes.is_empty() || bytes.len() % 2 != 0 {
            return Err(Error::InvalidEncoding);
        }

        let (r, s) = bytes.split_at(bytes.len() / 2);
        Ok(Self::new(
            BigInt::from_be_bytes(r),
            BigInt::from_be_bytes(s),
            None,
        ))
    }

    /// Serialize as `r || s`, each left-padded to `len` bytes.
    pub fn to_bytes(&self, len: usize) -> Result<Vec<u8>> {
        let mut out = self.r.to_be_bytes_padded(len)?;
        out.extend_from_slice(&self.s.to_be_bytes_padded(len)?);
        Ok(out)
    }
}

struct SignatureRef<'a> {
    r: UintRef<'a>,
    s: UintRef<'a>,
}

impl EncodeValue for SignatureRef<'_> {
    fn value_len(&self) -> der::Result<Length> {
        self.r.encoded_len()? + self.s.encoded_len()?
    }

    fn encode_value(&self, encoder: &mut impl Writer) -> der::Result<()> {
        self.r.encode(encoder)?;
        self.s.encode(encoder)?;
        Ok(())
    }
}

impl<'a> DecodeValue<'a> for SignatureRef<'a> {
    fn decode_value<R: Reader<'a>>(reader: &mut R, _header: Header) -> der::Result<Self> {
        Ok(Self {
            r: UintRef::decode(reader)?,
            s: UintRef::decode(reader)?,
        })
    }
}

impl<'a> Sequence<'a> for SignatureRef<'a> {}

#[cfg(test)]
mod tests {
    use super::Signature;
    use crate::Error;
    use bignum::BigInt;
    use hex_literal::hex;

    #[test]
    fn der_with_high_bit_components() {
        let sig = Signature::new(BigInt::from(0x80u32), BigInt::from(1u32), None);
        let der = sig.to_der().unwrap();
        assert_eq!(der, hex!("3007020200800201 01"));
        assert_eq!(Signature::from_der(&der).unwrap(), sig);
    }

    #[test]
    fn rejects_malformed_der() {
        // Trailing garbage.
        assert_eq!(
            Signature::from_der(&hex!("300602010102010100")),
            Err(Error::InvalidEncoding)
        );
        // Negative integer.
        assert_eq!(
            Signature::from_der(&hex!("3006020181020101")),
            Err(Error::InvalidEncoding)
        );
        assert_eq!(Signature::from_der("zz"), Err(Error::InvalidEncoding));
    }

    #[test]
    fn fixed_width_bytes() {
        let sig = Signature::new(BigInt::from(1u32), BigInt::from(2u32), None);
        let bytes = sig.to_bytes(4).unwrap();
        assert_eq!(bytes, hex!("00000001 00000002"));
        assert_eq!(Signature::from_bytes(&bytes).unwrap(), sig);
        assert_eq!(Signature::from_bytes(&[1u8, 2, 3]), Err(Error::InvalidEncoding));
    }
}
