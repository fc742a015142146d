//! EdDSA key pairs.

use super::{EdDsa, EdSignature};
use crate::{ByteSource, Error, Result, curve::EdwardsPoint};
use alloc::{string::String, vec::Vec};
use bignum::BigInt;
use core::fmt;
use zeroize::Zeroizing;

/// Material derived from a secret seed.
#[derive(Clone)]
struct Expanded {
    secret: Zeroizing<Vec<u8>>,
    hash: Zeroizing<Vec<u8>>,
    priv_bytes: Zeroizing<Vec<u8>>,
    private: Zeroizing<BigInt>,
}

/// An EdDSA public key, with the secret seed when signing is possible.
#[derive(Clone)]
pub struct EdKeyPair {
    eddsa: EdDsa,
    expanded: Option<Expanded>,
    public: EdwardsPoint,
    pub_bytes: Vec<u8>,
}

impl EdKeyPair {
    /// Expand a secret seed of [`EdDsa::encoding_len`] bytes.
    ///
    /// The seed is hashed; the first half of the digest, clamped, is the
    /// private scalar and the second half prefixes every signed message.
    pub(crate) fn from_secret(eddsa: EdDsa, secret: Vec<u8>) -> Result<Self> {
        let len = eddsa.encoding_len();
        if secret.len() != len {
            return Err(Error::InvalidEncoding);
        }
        let secret = Zeroizing::new(secret);

        let hash = Zeroizing::new(eddsa.hash().digest(&[secret.as_slice()]));
        let mut priv_bytes = Zeroizing::new(hash[..len].to_vec());
        priv_bytes[0] &= 0xf8;
        priv_bytes[len - 1] &= 0x7f;
        priv_bytes[len - 1] |= 0x40;

        let private = Zeroizing::new(eddsa.decode_int(&priv_bytes));
        let public = eddsa.g().mul(&private);
        let pub_bytes = eddsa.encode_point(&public);

        Ok(Self {
            eddsa,
            expanded: Some(Expanded {
                secret,
                hash,
                priv_bytes,
                private,
            }),
            public,
            pub_bytes,
        })
    }

    pub(crate) fn from_public(eddsa: EdDsa, public: EdwardsPoint) -> Self {
        let pub_bytes = eddsa.encode_point(&public);
        Self {
            eddsa,
            expanded: None,
            public,
            pub_bytes,
        }
    }

    /// The context this key belongs to.
    pub fn eddsa(&self) -> EdDsa {
        self.eddsa
    }

    fn expanded(&self) -> Result<&Expanded> {
        self.expanded.as_ref().ok_or(Error::MissingKeyMaterial)
    }

    /// The secret seed.
    pub fn secret(&self) -> Result<&[u8]> {
        Ok(self.expanded()?.secret.as_slice())
    }

    /// Digest of the secret seed.
    pub fn hash(&self) -> Result<&[u8]> {
        Ok(self.expanded()?.hash.as_slice())
    }

    /// Clamped little-endian private scalar.
    pub fn priv_bytes(&self) -> Result<&[u8]> {
        Ok(self.expanded()?.priv_bytes.as_slice())
    }

    /// The private scalar.
    pub fn private(&self) -> Result<&BigInt> {
        Ok(&*self.expanded()?.private)
    }

    /// Second half of the seed digest, hashed ahead of each message to
    /// derive the nonce.
    pub fn message_prefix(&self) -> Result<&[u8]> {
        let len = self.eddsa.encoding_len();
        Ok(&self.expanded()?.hash[len..])
    }

    /// Encoded public point.
    pub fn pub_bytes(&self) -> &[u8] {
        &self.pub_bytes
    }

    /// The public point.
    pub fn public(&self) -> &EdwardsPoint {
        &self.public
    }

    /// Hex of the secret seed.
    pub fn get_secret(&self) -> Result<String> {
        Ok(hex::encode(self.secret()?))
    }

    /// Hex of the encoded public point.
    pub fn get_public(&self) -> String {
        hex::encode(&self.pub_bytes)
    }

    /// Sign `msg` with this key.
    pub fn sign<'a>(&self, msg: impl Into<ByteSource<'a>>) -> Result<EdSignature> {
        self.eddsa.sign(msg, self)
    }

    /// Verify `sig` over `msg` against this key.
    pub fn verify<'a>(&self, msg: impl Into<ByteSource<'a>>, sig: &EdSignature) -> bool {
        self.eddsa.verify(msg, sig, self)
    }
}

impl fmt::Debug for EdKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdKeyPair")
            .field("public", &self.get_public())
            .field("has_secret", &self.expanded.is_some())
            .finish()
    }
}
