//! Standard error and result types for the library.
use hex::FromHexError;
use secp256k1::Error as Secp256k1Error;
use std::io;

/// Standard error type used in the library
#[derive(Debug)]
pub enum Error {
    /// A hash, key, digest or list has the wrong size
    InvalidParameterLength {
        /// Name of the offending parameter
        field: &'static str,
        /// Required length
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },
    /// The synod failed size or membership validation
    InvalidSynod(String),
    /// A voter has a non-positive weight or an undecodable key
    InvalidVoter(String),
    /// Key material could not be used to sign
    SigningFailure(String),
    /// A compressed point whose x-coordinate has no square root on the curve
    DecompressionAmbiguous(String),
    /// The data given is not valid
    BadData(String),
    /// Error evaluating the script
    ScriptError(String),
    /// The entropy source failed while generating a key
    KeyGeneration(String),
    /// Hex string could not be decoded
    FromHexError(FromHexError),
    /// Standard library IO error
    IOError(io::Error),
    /// Error in the Secp256k1 library
    Secp256k1Error(Secp256k1Error),
}

impl Error {
    /// Shorthand for a length mismatch on a named parameter.
    pub(crate) fn length(field: &'static str, expected: usize, actual: usize) -> Error {
        Error::InvalidParameterLength { field, expected, actual }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::InvalidParameterLength { field, expected, actual } => {
                write!(f, "Invalid parameter length: {} expected {} bytes, got {}", field, expected, actual)
            }
            Error::InvalidSynod(s) => write!(f, "Invalid synod: {}", s),
            Error::InvalidVoter(s) => write!(f, "Invalid voter: {}", s),
            Error::SigningFailure(s) => write!(f, "Signing failure: {}", s),
            Error::DecompressionAmbiguous(s) => write!(f, "Decompression ambiguous: {}", s),
            Error::BadData(s) => write!(f, "Bad data: {}", s),
            Error::ScriptError(s) => write!(f, "Script error: {}", s),
            Error::KeyGeneration(s) => write!(f, "Key generation error: {}", s),
            Error::FromHexError(e) => write!(f, "Hex decoding error: {}", e),
            Error::IOError(e) => write!(f, "IO error: {}", e),
            Error::Secp256k1Error(e) => write!(f, "Secp256k1 error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FromHexError(e) => Some(e),
            Error::IOError(e) => Some(e),
            Error::Secp256k1Error(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FromHexError> for Error {
    fn from(e: FromHexError) -> Self {
        Error::FromHexError(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::IOError(e)
    }
}

impl From<Secp256k1Error> for Error {
    fn from(e: Secp256k1Error) -> Self {
        Error::Secp256k1Error(e)
    }
}

/// Standard Result used in the library
pub type Result<T> = std::result::Result<T, Error>;
