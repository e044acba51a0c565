//! Pay-to-Witness-Public-Key-Hash (P2WPKH) programs and script codes.
//!
//! The witness program is `OP_0 <20-byte pkh>`; when signing, BIP-143 commits to
//! the equivalent P2PKH script as the script code.
use crate::script::op_codes::{OP_0, OP_CHECKSIG, OP_DUP, OP_EQUALVERIFY, OP_HASH160, OP_PUSH};
use crate::script::{next_op, Script};
use crate::util::{Error, Hash160, Result};

/// Creates the script code signed for a P2WPKH input (DUP HASH160 [hash] EQUALVERIFY CHECKSIG).
#[must_use]
#[inline]
pub fn create_script_code(pkh: &Hash160) -> Script {
    let mut script = Script::new();
    script.append(OP_DUP);
    script.append(OP_HASH160);
    script.append(OP_PUSH + 20);
    script.append_slice(&pkh.0);
    script.append(OP_EQUALVERIFY);
    script.append(OP_CHECKSIG);
    script
}

/// Creates the version 0 witness program (OP_0 [hash]).
#[must_use]
#[inline]
pub fn create_witness_program(pkh: &Hash160) -> Script {
    let mut script = Script::new();
    script.append(OP_0);
    script.append(OP_PUSH + 20);
    script.append_slice(&pkh.0);
    script
}

/// Checks if script is a P2WPKH witness program (len=22).
#[must_use]
#[inline]
pub fn check_witness_program(program: &[u8]) -> bool {
    program.len() == 22 && program[0] == OP_0 && program[1] == OP_PUSH + 20 && next_op(1, program) == 22
}

/// Extracts the public key hash from a P2WPKH witness program.
pub fn extract_pubkeyhash(program: &[u8]) -> Result<Hash160> {
    if !check_witness_program(program) {
        return Err(Error::BadData("Not P2WPKH program".to_string()));
    }
    Hash160::from_slice("pkh", &program[2..22])
}
