//! Hash-timelock contract script.
//!
//! ```text
//! OP_IF
//!     OP_SHA256 <secret_hash> OP_EQUALVERIFY OP_DUP OP_HASH160 <sha256(redeemer_pkh)>
//! OP_ELSE
//!     <timeout> OP_CHECKLOCKTIMEVERIFY OP_DROP OP_DUP OP_HASH160 <sha256(funder_pkh)>
//! OP_ENDIF
//! OP_EQUALVERIFY OP_CHECKSIG
//! ```
//!
//! The embedded key hashes are the SHA-256 of the supplied PKHs, so the
//! `OP_HASH160` comparison can never succeed.
use crate::script::op_codes::*;
use crate::script::Script;
use crate::util::{sha256, Digest, Hash160, Result};
use log::debug;

/// Typed HTLC parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Htlc {
    /// SHA-256 of the secret that unlocks the execute path.
    pub secret_hash: Digest,
    /// Key hash of the party who may spend with the secret.
    pub redeemer_pkh: Hash160,
    /// Absolute lock time after which the funder may refund.
    pub timeout: u32,
    /// Key hash of the party who may refund after the timeout.
    pub funder_pkh: Hash160,
}

impl Htlc {
    /// Validates parameter lengths.
    ///
    /// # Errors
    /// `Error::InvalidParameterLength` naming `secret_hash`, `redeemer_pkh` or `funder_pkh`.
    pub fn new(secret_hash: &[u8], redeemer_pkh: &[u8], timeout: u32, funder_pkh: &[u8]) -> Result<Htlc> {
        Ok(Htlc {
            secret_hash: Digest::from_slice("secret_hash", secret_hash)?,
            redeemer_pkh: Hash160::from_slice("redeemer_pkh", redeemer_pkh)?,
            timeout,
            funder_pkh: Hash160::from_slice("funder_pkh", funder_pkh)?,
        })
    }

    /// Emits the script.
    pub fn script(&self) -> Result<Script> {
        let mut script = Script::new();
        script.append(OP_IF);
        script.append(OP_SHA256);
        script.append_data(&self.secret_hash.0)?;
        script.append(OP_EQUALVERIFY);
        script.append(OP_DUP);
        script.append(OP_HASH160);
        script.append_data(&sha256(&self.redeemer_pkh.0).0)?;
        script.append(OP_ELSE);
        script.append_num(self.timeout as i64)?;
        script.append(OP_CHECKLOCKTIMEVERIFY);
        script.append(OP_DROP);
        script.append(OP_DUP);
        script.append(OP_HASH160);
        script.append_data(&sha256(&self.funder_pkh.0).0)?;
        script.append(OP_ENDIF);
        script.append(OP_EQUALVERIFY);
        script.append(OP_CHECKSIG);
        debug!("htlc script, timeout {}, {} bytes", self.timeout, script.0.len());
        Ok(script)
    }
}

/// Builds the HTLC script from raw parameters.
///
/// # Errors
/// `Error::InvalidParameterLength` if `secret_hash` is not 32 bytes or either
/// PKH is not 20 bytes.
pub fn create_htlc_script(secret_hash: &[u8], redeemer_pkh: &[u8], timeout: u32, funder_pkh: &[u8]) -> Result<Script> {
    Htlc::new(secret_hash, redeemer_pkh, timeout, funder_pkh)?.script()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::Token;
    use crate::util::Error;
    use hex_literal::hex;
    use pretty_assertions::assert_eq;

    const REDEEMER_PKH_SHA: [u8; 32] = hex!("7c854a55ff3b6a65ccb68b366a6b39756d8f2994aa41c45f94627209da86806f");
    const FUNDER_PKH_SHA: [u8; 32] = hex!("cec72f26f7325b41f0688a5152f9f9430ac607e010aba5be0e2984ad1531690d");

    #[test]
    fn golden_script() {
        let script = create_htlc_script(&[0; 32], &[0x11; 20], 500_000, &[0x22; 20]).unwrap();
        let mut expected = vec![OP_IF, OP_SHA256, 32];
        expected.extend_from_slice(&[0; 32]);
        expected.extend_from_slice(&[OP_EQUALVERIFY, OP_DUP, OP_HASH160, 32]);
        expected.extend_from_slice(&REDEEMER_PKH_SHA);
        expected.extend_from_slice(&[OP_ELSE, 3, 0x20, 0xa1, 0x07, OP_CHECKLOCKTIMEVERIFY, OP_DROP]);
        expected.extend_from_slice(&[OP_DUP, OP_HASH160, 32]);
        expected.extend_from_slice(&FUNDER_PKH_SHA);
        expected.extend_from_slice(&[OP_ENDIF, OP_EQUALVERIFY, OP_CHECKSIG]);
        assert_eq!(script.0, expected);
        assert_eq!(script.0.len(), 116);
    }

    #[test]
    fn golden_text() {
        let script = create_htlc_script(&[0; 32], &[0x11; 20], 500_000, &[0x22; 20]).unwrap();
        let text = format!(
            "OP_IF OP_SHA256 {} OP_EQUALVERIFY OP_DUP OP_HASH160 {} OP_ELSE 20a107 OP_CHECKLOCKTIMEVERIFY OP_DROP \
             OP_DUP OP_HASH160 {} OP_ENDIF OP_EQUALVERIFY OP_CHECKSIG",
            "00".repeat(32),
            hex::encode(REDEEMER_PKH_SHA),
            hex::encode(FUNDER_PKH_SHA)
        );
        assert_eq!(script.to_asm(), text);
        assert_eq!(Script::from_asm(&text).unwrap(), script);
    }

    #[test]
    fn topology() {
        let script = create_htlc_script(&[1; 32], &[2; 20], 0, &[3; 20]).unwrap();
        let tokens = script.tokens().unwrap();
        assert_eq!(tokens.len(), 17);
        assert_eq!(tokens[8], Token::Op(OP_0));
        assert_eq!(tokens[9], Token::Op(OP_CHECKLOCKTIMEVERIFY));
    }

    #[test]
    fn length_errors() {
        assert!(matches!(
            create_htlc_script(&[0; 31], &[0x11; 20], 500_000, &[0x22; 20]),
            Err(Error::InvalidParameterLength { field: "secret_hash", expected: 32, actual: 31 })
        ));
        assert!(matches!(
            create_htlc_script(&[0; 32], &[0x11; 21], 500_000, &[0x22; 20]),
            Err(Error::InvalidParameterLength { field: "redeemer_pkh", .. })
        ));
        assert_eq!(
            create_htlc_script(&[0; 32], &[0x11; 20], 500_000, &[]).unwrap_err().to_string(),
            "Invalid parameter length: funder_pkh expected 20 bytes, got 0"
        );
    }
}
