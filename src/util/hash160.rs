//! Public key hash (SHA256 then RIPEMD160).

use crate::util::{Error, Result};
use bitcoin_hashes::{hash160 as bh_hash160, Hash as BHHash};
use std::fmt;

/// 20-byte public key hash, as committed to by P2WPKH programs and HTLC branches.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hash160(pub [u8; 20]);

impl Hash160 {
    /// Copies a 20-byte slice, naming `field` in the error if the length is wrong.
    pub fn from_slice(field: &'static str, bytes: &[u8]) -> Result<Hash160> {
        let array: [u8; 20] = bytes.try_into().map_err(|_| Error::length(field, 20, bytes.len()))?;
        Ok(Hash160(array))
    }
}

/// Computes Hash160 (RIPEMD160(SHA256(data))).
#[must_use]
#[inline]
pub fn hash160(data: &[u8]) -> Hash160 {
    let h = bh_hash160::Hash::hash(data).to_byte_array();
    Hash160(h)
}

impl From<[u8; 20]> for Hash160 {
    fn from(bytes: [u8; 20]) -> Self {
        Hash160(bytes)
    }
}

impl fmt::Debug for Hash160 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
