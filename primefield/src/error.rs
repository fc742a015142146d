//! Error types.

use core::fmt;

/// Field arithmetic errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// Modulus is not usable for the requested reduction strategy.
    InvalidModulus,

    /// Element is a quadratic non-residue.
    NoSquareRoot,

    /// Element has no multiplicative inverse (it is zero).
    NotInvertible,

    /// Element belongs to a different reduction context.
    ContextMismatch,

    /// No named prime with the requested name.
    UnknownPrime,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidModulus => write!(f, "invalid modulus"),
            Error::NoSquareRoot => write!(f, "element has no square root"),
            Error::NotInvertible => write!(f, "element is not invertible"),
            Error::ContextMismatch => write!(f, "element belongs to another reduction context"),
            Error::UnknownPrime => write!(f, "unknown named prime"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;
