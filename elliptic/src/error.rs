//! Error types.

use core::fmt;

/// Errors raised by curve arithmetic, encodings and the signature schemes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// Malformed bytes, hex, DER or point encoding.
    InvalidEncoding,

    /// A decoded or constructed point does not satisfy the curve equation.
    PointNotOnCurve,

    /// Affine coordinates were requested for the point at infinity.
    PointAtInfinity,

    /// Division or reduction by zero.
    DivisionByZero,

    /// The modulus is not usable for the requested operation.
    InvalidModulus,

    /// The value has no modular inverse.
    NotInvertible,

    /// A scalar or signature component is outside of its valid range.
    OutOfRange,

    /// The deterministic bit generator must be reseeded.
    ReseedRequired,

    /// Not enough entropy was supplied to seed the deterministic bit generator.
    InsufficientEntropy,

    /// The key pair lacks the private scalar needed for this operation.
    MissingKeyMaterial,

    /// The public key is not the public key of the private scalar.
    KeyMismatch,

    /// No preset curve has this name.
    UnknownCurve,

    /// The operation is not defined for this curve family.
    UnsupportedOperation,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidEncoding => write!(f, "invalid encoding"),
            Error::PointNotOnCurve => write!(f, "point is not on the curve"),
            Error::PointAtInfinity => write!(f, "point at infinity has no affine coordinates"),
            Error::DivisionByZero => write!(f, "division by zero"),
            Error::InvalidModulus => write!(f, "invalid modulus"),
            Error::NotInvertible => write!(f, "value is not invertible"),
            Error::OutOfRange => write!(f, "value out of range"),
            Error::ReseedRequired => write!(f, "deterministic bit generator needs a reseed"),
            Error::InsufficientEntropy => write!(f, "insufficient entropy"),
            Error::MissingKeyMaterial => write!(f, "private key required"),
            Error::KeyMismatch => write!(f, "public key does not match private key"),
            Error::UnknownCurve => write!(f, "unknown curve"),
            Error::UnsupportedOperation => write!(f, "operation not supported for this curve"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<bignum::Error> for Error {
    fn from(err: bignum::Error) -> Error {
        match err {
            bignum::Error::DivisionByZero => Error::DivisionByZero,
            bignum::Error::InvalidDigit | bignum::Error::InvalidRadix => Error::InvalidEncoding,
            bignum::Error::NotInvertible => Error::NotInvertible,
            bignum::Error::Overflow => Error::OutOfRange,
        }
    }
}

impl From<primefield::Error> for Error {
    fn from(err: primefield::Error) -> Error {
        match err {
            primefield::Error::InvalidModulus | primefield::Error::UnknownPrime => {
                Error::InvalidModulus
            }
            primefield::Error::NoSquareRoot => Error::PointNotOnCurve,
            primefield::Error::NotInvertible => Error::NotInvertible,
            primefield::Error::ContextMismatch => Error::UnsupportedOperation,
        }
    }
}

impl From<hmac_drbg::Error> for Error {
    fn from(err: hmac_drbg::Error) -> Error {
        match err {
            hmac_drbg::Error::InsufficientEntropy { .. } => Error::InsufficientEntropy,
            hmac_drbg::Error::ReseedRequired => Error::ReseedRequired,
        }
    }
}

impl From<der::Error> for Error {
    fn from(_: der::Error) -> Error {
        Error::InvalidEncoding
    }
}

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;
