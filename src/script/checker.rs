//! Script checkers for signature and locktime validation.
use crate::util::{Digest, Error, Result};
use secp256k1::{ecdsa::Signature, Message, PublicKey, Secp256k1};

const LOCKTIME_THRESHOLD: i64 = 500_000_000;
const SEQUENCE_FINAL: u32 = 0xffffffff;

/// Trait for script validation callbacks during evaluation.
pub trait Checker {
    /// Verifies a signature against pubkey and script (for CHECKSIG).
    ///
    /// An empty signature is a failed check, not an error.
    ///
    /// # Errors
    /// `Error::ScriptError` for an undecodable signature or pubkey.
    fn check_sig(&mut self, sig: &[u8], pubkey: &[u8], script: &[u8]) -> Result<bool>;

    /// Checks locktime value (for CLTV, BIP-65).
    ///
    /// # Errors
    /// `Error::ScriptError` if invalid.
    fn check_locktime(&self, locktime: i64) -> Result<bool>;
}

/// Dummy checker for scripts that never reach a signature or locktime check.
///
/// Always errors to prevent invalid ops.
#[derive(Default, Clone, Debug)]
pub struct TransactionlessChecker;

impl Checker for TransactionlessChecker {
    fn check_sig(&mut self, _sig: &[u8], _pubkey: &[u8], _script: &[u8]) -> Result<bool> {
        Err(Error::ScriptError("No transaction context".to_string()))
    }

    fn check_locktime(&self, _locktime: i64) -> Result<bool> {
        Err(Error::ScriptError("No transaction context".to_string()))
    }
}

/// Checker bound to a signature hash computed by the transaction codec.
///
/// Every signature is verified against `digest`; the trailing sighash type byte
/// is stripped before DER decoding. `OP_CHECKLOCKTIMEVERIFY` is checked against
/// the spending transaction's `lock_time` and input `sequence`.
#[derive(Debug, Clone)]
pub struct DigestChecker {
    /// Signature hash of the input being spent.
    pub digest: Digest,
    /// nLockTime of the spending transaction.
    pub lock_time: u32,
    /// nSequence of the input being spent.
    pub sequence: u32,
}

impl DigestChecker {
    /// Creates a checker with a non-final sequence, so lock times are enforced.
    #[must_use]
    pub fn new(digest: Digest, lock_time: u32) -> Self {
        Self {
            digest,
            lock_time,
            sequence: SEQUENCE_FINAL - 1,
        }
    }
}

impl Checker for DigestChecker {
    fn check_sig(&mut self, sig: &[u8], pubkey: &[u8], _script: &[u8]) -> Result<bool> {
        if sig.is_empty() {
            return Ok(false);
        }
        let der_sig = &sig[..sig.len() - 1];
        let secp = Secp256k1::verification_only();
        let signature =
            Signature::from_der(der_sig).map_err(|_| Error::ScriptError("Invalid DER".to_string()))?;
        let message = Message::from_digest(self.digest.0);
        let public_key =
            PublicKey::from_slice(pubkey).map_err(|_| Error::ScriptError("Invalid pubkey".to_string()))?;
        Ok(secp.verify_ecdsa(message, &signature, &public_key).is_ok())
    }

    fn check_locktime(&self, locktime: i64) -> Result<bool> {
        if locktime < 0 {
            return Err(Error::ScriptError("Negative locktime".to_string()));
        }
        let tx_locktime = self.lock_time as i64;
        if (locktime >= LOCKTIME_THRESHOLD) != (tx_locktime >= LOCKTIME_THRESHOLD) {
            return Ok(false);
        }
        if locktime > tx_locktime {
            return Ok(false);
        }
        Ok(self.sequence != SEQUENCE_FINAL)
    }
}
