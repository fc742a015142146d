//! Hash functions attached to the preset curves.

use crate::Result;
use alloc::vec::Vec;
use core::fmt;
use digest::Digest;
use hmac_drbg::HmacDrbg;
use sha2::{Sha224, Sha256, Sha384, Sha512};

/// Hash function used for message digests and nonce derivation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum HashAlgorithm {
    /// SHA-224.
    Sha224,
    /// SHA-256.
    Sha256,
    /// SHA-384.
    Sha384,
    /// SHA-512.
    Sha512,
}

impl HashAlgorithm {
    /// Digest length in bytes.
    pub fn output_size(self) -> usize {
        match self {
            HashAlgorithm::Sha224 => 28,
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }

    /// Digest of the concatenation of `parts`.
    pub fn digest(self, parts: &[&[u8]]) -> Vec<u8> {
        fn run<D: Digest>(parts: &[&[u8]]) -> Vec<u8> {
            let mut hasher = D::new();
            for part in parts {
                hasher.update(part);
            }
            hasher.finalize().to_vec()
        }

        match self {
            HashAlgorithm::Sha224 => run::<Sha224>(parts),
            HashAlgorithm::Sha256 => run::<Sha256>(parts),
            HashAlgorithm::Sha384 => run::<Sha384>(parts),
            HashAlgorithm::Sha512 => run::<Sha512>(parts),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HashAlgorithm::Sha224 => "sha224",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
        })
    }
}

/// [`HmacDrbg`] over the digest selected at runtime.
pub(crate) enum Drbg {
    Sha224(HmacDrbg<Sha224>),
    Sha256(HmacDrbg<Sha256>),
    Sha384(HmacDrbg<Sha384>),
    Sha512(HmacDrbg<Sha512>),
}

macro_rules! dispatch {
    ($self:expr, $drbg:ident => $body:expr) => {
        match $self {
            Drbg::Sha224($drbg) => $body,
            Drbg::Sha256($drbg) => $body,
            Drbg::Sha384($drbg) => $body,
            Drbg::Sha512($drbg) => $body,
        }
    };
}

impl Drbg {
    pub(crate) fn new(
        hash: HashAlgorithm,
        entropy: &[u8],
        nonce: &[u8],
        pers: &[u8],
    ) -> Result<Self> {
        Ok(match hash {
            HashAlgorithm::Sha224 => Drbg::Sha224(HmacDrbg::new(entropy, nonce, pers)?),
            HashAlgorithm::Sha256 => Drbg::Sha256(HmacDrbg::new(entropy, nonce, pers)?),
            HashAlgorithm::Sha384 => Drbg::Sha384(HmacDrbg::new(entropy, nonce, pers)?),
            HashAlgorithm::Sha512 => Drbg::Sha512(HmacDrbg::new(entropy, nonce, pers)?),
        })
    }

    pub(crate) fn generate(&mut self, len: usize) -> Result<Vec<u8>> {
        dispatch!(self, drbg => Ok(drbg.generate(len, None)?))
    }
}

#[cfg(test)]
mod tests {
    use super::HashAlgorithm;
    use hex_literal::hex;

    #[test]
    fn digests_concatenation() {
        assert_eq!(
            HashAlgorithm::Sha256.digest(&[b"ab", b"c"]),
            hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
        for hash in [
            HashAlgorithm::Sha224,
            HashAlgorithm::Sha256,
            HashAlgorithm::Sha384,
            HashAlgorithm::Sha512,
        ] {
            assert_eq!(hash.digest(&[]).len(), hash.output_size());
        }
    }
}
