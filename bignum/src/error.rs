//! Error types.

use core::fmt;

/// Errors raised by fallible integer operations.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// Division or reduction by zero.
    DivisionByZero,

    /// A string contained a character which is not a digit in the requested radix.
    InvalidDigit,

    /// Radix outside of `2..=36`.
    InvalidRadix,

    /// The value has no inverse modulo the given modulus.
    NotInvertible,

    /// The value does not fit in the requested width.
    Overflow,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DivisionByZero => write!(f, "division by zero"),
            Error::InvalidDigit => write!(f, "invalid digit for radix"),
            Error::InvalidRadix => write!(f, "radix must be between 2 and 36"),
            Error::NotInvertible => write!(f, "value is not invertible"),
            Error::Overflow => write!(f, "value does not fit in the requested width"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;
