//! secp256k1 key handling: public key derivation, point compression and
//! decompression, and private key generation.
//!
//! Public keys cross the crate boundary in two forms: the 33-byte compressed
//! encoding embedded in scripts and witnesses, and the 64-byte raw `x ‖ y`
//! encoding.
//!
//! # Examples
//! ```
//! use eris::keys::{compress, decompress, derive_public_key};
//! let public_key = derive_public_key(&[1; 32]).unwrap();
//! let raw = decompress(&public_key.0).unwrap();
//! assert_eq!(compress(&raw.0).unwrap(), public_key);
//! ```
use crate::util::{Error, Result};
use log::trace;
use num_bigint::BigUint;
use rand::rngs::OsRng;
use rand::RngCore;
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use std::fmt;

mod point;

use self::point::{curve_rhs, field_prime, sqrt_candidate, to_be_32};

/// Even-y prefix of a compressed point.
pub const PREFIX_EVEN: u8 = 0x02;
/// Odd-y prefix of a compressed point.
pub const PREFIX_ODD: u8 = 0x03;

/// Upper bound on draws in `generate_private_key` before giving up.
const MAX_KEYGEN_ATTEMPTS: usize = 16;

/// 32-byte secp256k1 secret scalar. Its `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey(pub [u8; 32]);

impl PrivateKey {
    /// Copies a 32-byte slice.
    pub fn from_slice(bytes: &[u8]) -> Result<PrivateKey> {
        let array: [u8; 32] = bytes.try_into().map_err(|_| Error::length("private_key", 32, bytes.len()))?;
        Ok(PrivateKey(array))
    }

    /// Derives the compressed public key.
    pub fn public_key(&self) -> Result<CompressedPublicKey> {
        derive_public_key(&self.0)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

/// 33-byte compressed public key: parity prefix then x.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompressedPublicKey(pub [u8; 33]);

impl CompressedPublicKey {
    /// Copies a 33-byte slice without checking that it is on the curve.
    pub fn from_slice(bytes: &[u8]) -> Result<CompressedPublicKey> {
        let array: [u8; 33] = bytes.try_into().map_err(|_| Error::length("pubkey", 33, bytes.len()))?;
        Ok(CompressedPublicKey(array))
    }

    /// Whether the key decodes to a point on the curve.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        PublicKey::from_slice(&self.0).is_ok()
    }
}

impl AsRef<[u8]> for CompressedPublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for CompressedPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// 64-byte raw public key: x then y, both big-endian.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawPublicKey(pub [u8; 64]);

impl RawPublicKey {
    /// The x-coordinate.
    #[must_use]
    pub fn x(&self) -> &[u8] {
        &self.0[..32]
    }

    /// The y-coordinate.
    #[must_use]
    pub fn y(&self) -> &[u8] {
        &self.0[32..]
    }
}

impl fmt::Debug for RawPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Computes `private_key·G` and returns it compressed.
///
/// # Errors
/// - `Error::InvalidParameterLength` if `private_key` is not 32 bytes.
/// - `Error::SigningFailure` if it is zero or not below the curve order.
pub fn derive_public_key(private_key: &[u8]) -> Result<CompressedPublicKey> {
    let private_key = PrivateKey::from_slice(private_key)?;
    let secp = Secp256k1::signing_only();
    let secret_key = SecretKey::from_byte_array(private_key.0)
        .map_err(|_| Error::SigningFailure("Invalid private key".to_string()))?;
    let uncompressed = PublicKey::from_secret_key(&secp, &secret_key).serialize_uncompressed();
    compress(&uncompressed[1..])
}

/// Compresses a raw `x ‖ y` key: prefix 0x02 for even y, 0x03 for odd, then x.
///
/// The point is not checked against the curve equation.
///
/// # Errors
/// `Error::InvalidParameterLength` if `raw` is not 64 bytes.
pub fn compress(raw: &[u8]) -> Result<CompressedPublicKey> {
    if raw.len() != 64 {
        return Err(Error::length("raw_pubkey", 64, raw.len()));
    }
    let mut out = [0u8; 33];
    out[0] = if raw[63] & 1 == 0 { PREFIX_EVEN } else { PREFIX_ODD };
    out[1..].copy_from_slice(&raw[..32]);
    Ok(CompressedPublicKey(out))
}

/// Recovers the raw `x ‖ y` key from its compressed form.
///
/// y is the square root of x^3 + 7 whose parity matches the prefix; the other
/// root is p - y.
///
/// # Errors
/// - `Error::InvalidParameterLength` if `compressed` is not 33 bytes.
/// - `Error::BadData` if the prefix is not 0x02 or 0x03.
/// - `Error::DecompressionAmbiguous` if x is not a field element or x^3 + 7 has
///   no square root, so no curve point has this x.
pub fn decompress(compressed: &[u8]) -> Result<RawPublicKey> {
    let compressed = CompressedPublicKey::from_slice(compressed)?;
    let want_odd = match compressed.0[0] {
        PREFIX_EVEN => false,
        PREFIX_ODD => true,
        prefix => return Err(Error::BadData(format!("Invalid pubkey prefix: {:#04x}", prefix))),
    };
    let p = field_prime();
    let x = BigUint::from_bytes_be(&compressed.0[1..]);
    if x >= p {
        return Err(Error::DecompressionAmbiguous("x is not below the field prime".to_string()));
    }
    let a = curve_rhs(&x, &p);
    let root = sqrt_candidate(&a, &p);
    if &root * &root % &p != a {
        return Err(Error::DecompressionAmbiguous("x^3 + 7 has no square root".to_string()));
    }
    let y = if root.bit(0) == want_odd { root } else { &p - root };
    let mut raw = [0u8; 64];
    raw[..32].copy_from_slice(&compressed.0[1..]);
    raw[32..].copy_from_slice(&to_be_32(&y));
    Ok(RawPublicKey(raw))
}

/// Draws a fresh private key from the operating system's CSPRNG.
///
/// Candidates outside `[1, n)` are discarded and redrawn.
///
/// # Errors
/// `Error::KeyGeneration` if the entropy source fails.
pub fn generate_private_key() -> Result<PrivateKey> {
    let mut rng = OsRng;
    for _ in 0..MAX_KEYGEN_ATTEMPTS {
        let mut candidate = [0u8; 32];
        rng.try_fill_bytes(&mut candidate)
            .map_err(|e| Error::KeyGeneration(e.to_string()))?;
        if SecretKey::from_byte_array(candidate).is_ok() {
            return Ok(PrivateKey(candidate));
        }
        trace!("discarding out-of-range private key candidate");
    }
    Err(Error::KeyGeneration("No valid scalar drawn".to_string()))
}
