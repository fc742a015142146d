#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

//! Elliptic curve cryptography over runtime-sized integers.
//!
//! Three curve families share one arithmetic core built on [`bignum`] and
//! [`primefield`]:
//!
//! - short Weierstrass curves `y^2 = x^3 + ax + b` with Jacobian coordinates,
//!   windowed NAF and joint sparse form scalar multiplication, and the GLV
//!   endomorphism on secp256k1;
//! - Montgomery curves, x-only with the ladder;
//! - twisted Edwards curves in extended coordinates.
//!
//! On top of them sit ECDSA with RFC 6979 style deterministic nonces,
//! public key recovery and DER signatures ([`Ec`]), EdDSA ([`EdDsa`]), ECDH
//! through [`KeyPair::derive`], and the RFC 7748 [`x25519`] function.
//!
//! ## Usage
//!
//! ```
//! use elliptic::{CurveName, Ec, KeyPairOptions, SignOptions};
//!
//! let ec = Ec::new(CurveName::P256)?;
//! let opts = KeyPairOptions {
//!     entropy: Some([0x42u8; 32].to_vec().into()),
//!     ..Default::default()
//! };
//! let key = ec.gen_key_pair(&opts)?;
//!
//! let digest = [0x11u8; 32];
//! let sig = key.sign(&digest, &SignOptions::default())?;
//! assert!(key.verify(&digest, &sig));
//!
//! let der = sig.to_der()?;
//! assert!(ec.verify_der(&digest, &der, &key));
//! # Ok::<(), elliptic::Error>(())
//! ```
//!
//! Messages passed to ECDSA are expected to be digests already; they are
//! truncated to the bit length of the group order, never hashed.

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod curve;
mod ec;
mod eddsa;
mod error;
mod hash;
mod presets;
mod source;
mod x25519;

pub use crate::{
    curve::{
        Curve, CurveKind, EdwardsCurve, EdwardsPoint, Endomorphism, JacobianPoint, MontCurve,
        MontPoint, Point, ShortCurve, ShortPoint, get_jsf, get_naf,
    },
    ec::{Ec, KeyPair, KeyPairOptions, SignOptions, Signature, Validation},
    eddsa::{EdDsa, EdKeyPair, EdSignature},
    error::{Error, Result},
    hash::HashAlgorithm,
    presets::{CurveName, PresetCurve, preset, preset_by_name},
    source::ByteSource,
    x25519::{X25519_BASEPOINT_BYTES, clamp_scalar, x25519, x25519_base},
};
pub use bignum::{self, BigInt};
pub use primefield::{self, FieldElement, Red};
