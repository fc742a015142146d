#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

//! HMAC_DRBG deterministic random bit generator.
//!
//! The generator state is a key `K` and a chaining value `V`, each the size of
//! the digest output. Instantiating with identical entropy, nonce and
//! personalization inputs always reproduces the same output stream, which is
//! what makes the generator suitable for deterministic signature nonces.
//!
//! ```
//! use hmac_drbg::HmacDrbg;
//! use sha2::Sha256;
//!
//! let mut drbg = HmacDrbg::<Sha256>::new(b"totally random0123456789", b"secret nonce", b"my drbg")
//!     .unwrap();
//! let bytes = drbg.generate(32, None).unwrap();
//! assert_eq!(bytes.len(), 32);
//! ```

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod error;

pub use crate::error::{Error, Result};
pub use digest;

use alloc::{vec, vec::Vec};
use core::marker::PhantomData;
use digest::{Digest, core_api::BlockSizeUser};
use hmac::{Mac, SimpleHmac};
use zeroize::Zeroize;

/// Default number of `generate` calls allowed between reseeds.
pub const DEFAULT_RESEED_INTERVAL: u64 = 1 << 48;

/// HMAC_DRBG over the digest `D`.
pub struct HmacDrbg<D>
where
    D: Digest + BlockSizeUser + Clone,
{
    k: Vec<u8>,
    v: Vec<u8>,
    reseed_counter: u64,
    reseed_interval: u64,
    min_entropy: usize,
    digest: PhantomData<D>,
}

impl<D> HmacDrbg<D>
where
    D: Digest + BlockSizeUser + Clone,
{
    /// Minimum entropy input, in bits, for digest `D`: 80 bits for digests
    /// shorter than 192 bits, 192 bits otherwise.
    pub fn default_min_entropy_bits() -> usize {
        if <D as Digest>::output_size() < 24 { 80 } else { 192 }
    }

    /// Instantiate from entropy, a nonce and a personalization string.
    ///
    /// `entropy` must carry at least [`HmacDrbg::default_min_entropy_bits`] bits.
    pub fn new(entropy: &[u8], nonce: &[u8], pers: &[u8]) -> Result<Self> {
        Self::with_min_entropy(entropy, nonce, pers, Self::default_min_entropy_bits())
    }

    /// Instantiate with an explicit minimum entropy requirement in bits.
    pub fn with_min_entropy(
        entropy: &[u8],
        nonce: &[u8],
        pers: &[u8],
        min_entropy_bits: usize,
    ) -> Result<Self> {
        let min_entropy = min_entropy_bits.div_ceil(8);
        check_entropy(entropy, min_entropy)?;

        let out_len = <D as Digest>::output_size();
        let mut drbg = Self {
            k: vec![0x00; out_len],
            v: vec![0x01; out_len],
            reseed_counter: 1,
            reseed_interval: DEFAULT_RESEED_INTERVAL,
            min_entropy,
            digest: PhantomData,
        };

        let mut seed = Vec::with_capacity(entropy.len() + nonce.len() + pers.len());
        seed.extend_from_slice(entropy);
        seed.extend_from_slice(nonce);
        seed.extend_from_slice(pers);
        drbg.update(Some(&seed));
        seed.zeroize();

        Ok(drbg)
    }

    /// Override the number of `generate` calls allowed between reseeds.
    pub fn with_reseed_interval(mut self, interval: u64) -> Self {
        self.reseed_interval = interval;
        self
    }

    /// Number of `generate` calls since instantiation or the last reseed, plus one.
    pub fn reseed_counter(&self) -> u64 {
        self.reseed_counter
    }

    /// Mix fresh entropy (and optional additional input) into the state.
    pub fn reseed(&mut self, entropy: &[u8], add: Option<&[u8]>) -> Result<()> {
        check_entropy(entropy, self.min_entropy)?;

        let mut seed = entropy.to_vec();
        if let Some(add) = add {
            seed.extend_from_slice(add);
        }
        self.update(Some(&seed));
        seed.zeroize();

        self.reseed_counter = 1;
        log::debug!("hmac-drbg reseeded");
        Ok(())
    }

    /// Produce `len` pseudorandom bytes.
    pub fn generate(&mut self, len: usize, add: Option<&[u8]>) -> Result<Vec<u8>> {
        let mut out = vec![0u8; len];
        self.fill_bytes(&mut out, add)?;
        Ok(out)
    }

    /// Fill `out` with pseudorandom bytes.
    pub fn fill_bytes(&mut self, out: &mut [u8], add: Option<&[u8]>) -> Result<()> {
        if self.reseed_counter > self.reseed_interval {
            log::warn!(
                "hmac-drbg refused to generate: {} requests since last reseed",
                self.reseed_counter - 1
            );
            return Err(Error::ReseedRequired);
        }

        if add.is_some() {
            self.update(add);
        }

        for chunk in out.chunks_mut(self.v.len()) {
            self.v = self.hmac().chain_update(&self.v).finalize().into_bytes().to_vec();
            chunk.copy_from_slice(&self.v[..chunk.len()]);
        }

        self.update(add);
        self.reseed_counter += 1;
        Ok(())
    }

    /// HMAC keyed with the current `K`.
    fn hmac(&self) -> SimpleHmac<D> {
        <SimpleHmac<D> as Mac>::new_from_slice(&self.k).expect("HMAC accepts keys of any size")
    }

    /// The HMAC_DRBG update function. The second round only runs when seed
    /// material was provided, even if it is empty.
    fn update(&mut self, seed: Option<&[u8]>) {
        let mut mac = self.hmac().chain_update(&self.v).chain_update([0x00u8]);
        if let Some(seed) = seed {
            mac.update(seed);
        }
        self.replace_k(mac.finalize().into_bytes().to_vec());
        self.v = self.hmac().chain_update(&self.v).finalize().into_bytes().to_vec();

        let Some(seed) = seed else {
            return;
        };

        let mac = self
            .hmac()
            .chain_update(&self.v)
            .chain_update([0x01u8])
            .chain_update(seed);
        self.replace_k(mac.finalize().into_bytes().to_vec());
        self.v = self.hmac().chain_update(&self.v).finalize().into_bytes().to_vec();
    }

    fn replace_k(&mut self, k: Vec<u8>) {
        self.k.zeroize();
        self.k = k;
    }
}

impl<D> Drop for HmacDrbg<D>
where
    D: Digest + BlockSizeUser + Clone,
{
    fn drop(&mut self) {
        self.k.zeroize();
        self.v.zeroize();
    }
}

fn check_entropy(entropy: &[u8], required: usize) -> Result<()> {
    if entropy.len() < required {
        return Err(Error::InsufficientEntropy { required });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Error, HmacDrbg};
    use hex_literal::hex;
    use sha2::Sha256;

    const ENTROPY: &[u8] = b"totally random0123456789";
    const NONCE: &[u8] = b"secret nonce";

    #[test]
    fn known_answer_with_personalization() {
        let mut drbg = HmacDrbg::<Sha256>::new(ENTROPY, NONCE, b"my drbg").unwrap();
        assert_eq!(
            drbg.generate(32, None).unwrap(),
            hex!("018ec5f8e08c41e5ac974eb129ac297c5388ee1864324fa13d9b15cf98d9a157")
        );
    }

    #[test]
    fn known_answer_without_personalization() {
        let mut drbg = HmacDrbg::<Sha256>::new(ENTROPY, NONCE, &[]).unwrap();
        assert_eq!(
            drbg.generate(32, None).unwrap(),
            hex!("ed5d61ecf0ef38258e62f03bbb49f19f2cd07ba5145a840d83b134d5963b3633")
        );
    }

    #[test]
    fn rejects_short_entropy() {
        let err = HmacDrbg::<Sha256>::new(b"too short", NONCE, &[]).err();
        assert_eq!(err, Some(Error::InsufficientEntropy { required: 24 }));

        let mut drbg = HmacDrbg::<Sha256>::new(ENTROPY, NONCE, &[]).unwrap();
        assert!(drbg.reseed(b"short", None).is_err());
    }

    #[test]
    fn reseed_interval() {
        let mut drbg = HmacDrbg::<Sha256>::new(ENTROPY, NONCE, &[])
            .unwrap()
            .with_reseed_interval(2);

        assert!(drbg.generate(8, None).is_ok());
        assert!(drbg.generate(8, None).is_ok());
        assert_eq!(drbg.generate(8, None), Err(Error::ReseedRequired));

        drbg.reseed(ENTROPY, Some(b"more")).unwrap();
        assert_eq!(drbg.reseed_counter(), 1);
        assert!(drbg.generate(8, None).is_ok());
    }
}
