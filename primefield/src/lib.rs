#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

//! Arithmetic modulo a prime chosen at runtime.
//!
//! A [`Red`] reduction context owns the modulus together with whatever
//! precomputation its reduction strategy needs:
//!
//! - plain division-based reduction for arbitrary moduli,
//! - pseudo-Mersenne folding for primes of the shape `2^n - k` with small `k`
//!   (the named contexts `k256`, `p224`, `p192` and `p25519`),
//! - Montgomery multiplication for any other odd modulus.
//!
//! Values enter a context through [`Red::convert_to`], which yields a
//! [`FieldElement`]. Field elements always carry their context, so plain
//! [`BigInt`]s and reduced values cannot be mixed by accident, and combining
//! elements from two different contexts panics.
//!
//! ```
//! use bignum::BigInt;
//! use primefield::Red;
//!
//! let red = Red::named("p25519").unwrap();
//! let x = red.convert_to(&BigInt::from(4u32));
//! let root = x.sqrt().unwrap();
//! assert_eq!(root.square(), x);
//! ```

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod element;
mod error;
mod mersenne;
mod mont;
mod red;
mod sqrt;

pub use crate::{
    element::FieldElement,
    error::{Error, Result},
    red::{Red, ReductionKind},
};
pub use bignum::{self, BigInt};
pub use subtle;
pub use zeroize;
