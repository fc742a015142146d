//! EdDSA signatures.

use super::EdDsa;
use crate::{Error, Result};
use alloc::{string::String, vec::Vec};
use bignum::BigInt;

/// EdDSA signature: the encoded commitment `R` and the scalar `S`.
///
/// `R` is kept in its encoded form and decoded during verification, where an
/// encoding that fails to decode rejects the signature.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct EdSignature {
    r_encoded: Vec<u8>,
    s: BigInt,
    s_encoded: Vec<u8>,
}

impl EdSignature {
    pub(crate) fn new(eddsa: &EdDsa, r_encoded: Vec<u8>, s: BigInt) -> Result<Self> {
        let s_encoded = eddsa.encode_int(&s)?;
        Ok(Self {
            r_encoded,
            s,
            s_encoded,
        })
    }

    /// Parse `R || S`. Both halves are [`EdDsa::encoding_len`] bytes and `S`
    /// must be below the group order.
    pub fn from_bytes(eddsa: &EdDsa, bytes: &[u8]) -> Result<Self> {
        let len = eddsa.encoding_len();
        if bytes.len() != 2 * len {
            return Err(Error::InvalidEncoding);
        }

        let (r, s) = bytes.split_at(len);
        let s_int = eddsa.decode_int(s);
        if &s_int >= eddsa.n() {
            return Err(Error::OutOfRange);
        }
        Ok(Self {
            r_encoded: r.to_vec(),
            s: s_int,
            s_encoded: s.to_vec(),
        })
    }

    /// Encoded `R`.
    pub fn r_encoded(&self) -> &[u8] {
        &self.r_encoded
    }

    /// The scalar `S`.
    pub fn s(&self) -> &BigInt {
        &self.s
    }

    /// Little-endian `S`.
    pub fn s_encoded(&self) -> &[u8] {
        &self.s_encoded
    }

    /// `R || S`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.r_encoded.len() + self.s_encoded.len());
        out.extend_from_slice(&self.r_encoded);
        out.extend_from_slice(&self.s_encoded);
        out
    }

    /// Uppercase hex of [`EdSignature::to_bytes`].
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.to_bytes())
    }
}
