//! Error types.

use core::fmt;

/// DRBG errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// Entropy input shorter than the minimum entropy of the generator.
    InsufficientEntropy {
        /// Minimum number of bytes required.
        required: usize,
    },

    /// The reseed interval has elapsed; call `reseed` before generating more output.
    ReseedRequired,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InsufficientEntropy { required } => {
                write!(f, "not enough entropy: at least {required} bytes are required")
            }
            Error::ReseedRequired => write!(f, "reseed is required"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;
