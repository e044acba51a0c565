//! 32-byte digests: signature hashes handed in by the transaction codec and
//! SHA-256 commitments embedded in scripts.
use crate::util::{Error, Result};
use bitcoin_hashes::{sha256 as bh_sha256, Hash as BHHash};
use std::fmt;

/// 32-byte digest.
///
/// Unlike block and transaction ids this is displayed in natural byte order.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest(pub [u8; 32]);

impl Digest {
    /// Copies a 32-byte slice, naming `field` in the error if the length is wrong.
    pub fn from_slice(field: &'static str, bytes: &[u8]) -> Result<Digest> {
        let array: [u8; 32] = bytes.try_into().map_err(|_| Error::length(field, 32, bytes.len()))?;
        Ok(Digest(array))
    }

    /// Converts the digest into a hex string.
    #[must_use]
    #[inline]
    pub fn encode(&self) -> String {
        hex::encode(self.0)
    }

    /// Converts a string of 64 hex characters into a digest.
    pub fn decode(s: &str) -> Result<Digest> {
        let decoded_bytes = hex::decode(s)?;
        Digest::from_slice("digest", &decoded_bytes)
    }
}

/// Hashes a data array once using SHA256.
#[must_use]
#[inline]
pub fn sha256(data: &[u8]) -> Digest {
    Digest(bh_sha256::Hash::hash(data).to_byte_array())
}

impl From<[u8; 32]> for Digest {
    fn from(bytes: [u8; 32]) -> Self {
        Digest(bytes)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sha256_test() {
        let e = sha256(b"abc").encode();
        assert_eq!(e, "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
    }

    #[test]
    fn digest_decode() {
        let s1 = "0000000000000000000000000000000000000000000000000000000000000000";
        let s2 = "abcdef0000112233445566778899abcdef000011223344556677889912345678";
        assert_eq!(Digest::decode(s1).unwrap(), Digest([0; 32]));
        assert_eq!(Digest::decode(s2).unwrap().encode(), s2);
        // Invalid
        let s3 = "00000000000000000000000000000000000000000000000000000000000000";
        let s4 = "000000000000000000000000000000000000000000000000000000000000000g";
        assert!(matches!(
            Digest::decode(s3),
            Err(Error::InvalidParameterLength { field: "digest", expected: 32, actual: 31 })
        ));
        assert!(matches!(Digest::decode(s4), Err(Error::FromHexError(_))));
    }
}
