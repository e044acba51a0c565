//! Signing and witness assembly for spends of the crate's script templates.
//!
//! The signature hash is computed by an external transaction codec; this module
//! signs a supplied 32-byte digest and arranges the resulting signature, public
//! key and script into the witness stack for each spending path.
//!
//! # Examples
//!
//! Sign a digest and build a P2WPKH witness:
//! ```
//! use eris::keys::derive_public_key;
//! use eris::transaction::{generate_signature, witness::wpkh_witness, SIGHASH_ALL};
//!
//! let private_key = [1; 32];
//! let digest = [7; 32]; // from the transaction codec
//! let public_key = derive_public_key(&private_key).unwrap();
//! let signature = generate_signature(&private_key, &digest, SIGHASH_ALL).unwrap();
//! let witness = wpkh_witness(&signature, &public_key.0).unwrap();
//! assert_eq!(witness.len(), 2);
//! ```
pub mod p2wpkh;
pub mod witness;

pub use self::witness::Witness;

use crate::util::{Digest, Error, Result};
use crate::keys::PrivateKey;
use log::trace;
use secp256k1::{Message, Secp256k1, SecretKey};

/// Signs all inputs and outputs.
pub const SIGHASH_ALL: u8 = 0x01;
/// Signs no outputs.
pub const SIGHASH_NONE: u8 = 0x02;
/// Signs the output at the same index as the input.
pub const SIGHASH_SINGLE: u8 = 0x03;
/// Signs only this input.
pub const SIGHASH_ANYONECANPAY: u8 = 0x80;

/// Signs a 32-byte digest, returning the DER-encoded low-S signature.
///
/// The nonce is derived from the key and digest (RFC 6979), so the same inputs
/// always produce the same bytes.
///
/// # Errors
/// - `Error::InvalidParameterLength` naming `digest` or `private_key`.
/// - `Error::SigningFailure` if the key is zero or not below the curve order.
pub fn sign(digest: &[u8], private_key: &[u8]) -> Result<Vec<u8>> {
    let digest = Digest::from_slice("digest", digest)?;
    let private_key = PrivateKey::from_slice(private_key)?;
    let secp = Secp256k1::signing_only();
    let secret_key = SecretKey::from_byte_array(private_key.0)
        .map_err(|_| Error::SigningFailure("Invalid private key".to_string()))?;
    let message = Message::from_digest(digest.0);
    let mut signature = secp.sign_ecdsa(message, &secret_key);
    signature.normalize_s();
    let der = signature.serialize_der().to_vec();
    trace!("signed digest {:?}, {} byte signature", digest, der.len());
    Ok(der)
}

/// Generates a DER-encoded signature with the sighash type byte appended, as
/// it appears in a witness.
///
/// # Errors
/// Same as `sign`.
pub fn generate_signature(private_key: &[u8], digest: &[u8], sighash_type: u8) -> Result<Vec<u8>> {
    let mut der = sign(digest, private_key)?;
    der.push(sighash_type);
    Ok(der)
}
