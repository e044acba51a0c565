//! Weighted synod script.
//!
//! One block per voter accumulates the weight of every valid signature, then
//! the total is compared against the quorum:
//!
//! ```text
//! <pk_1> OP_CHECKSIG OP_IF <w_1> OP_ELSE OP_0 OP_ENDIF
//! OP_SWAP <pk_i> OP_CHECKSIG OP_IF <w_i> OP_ADD OP_ENDIF      (for i = 2..n)
//! <quorum> OP_GREATERTHAN
//! ```
use crate::script::op_codes::*;
use crate::script::Script;
use crate::synod::{quorum_weight_with_policy, validate_synod, QuorumPolicy, Synod, Voter};
use crate::util::{Error, Result};
use log::debug;

/// Builds the synod script with the default 3/5 quorum.
///
/// # Errors
/// `Error::InvalidSynod` if the synod fails `validate_synod`.
pub fn create_synod_script(synod: &Synod) -> Result<Script> {
    create_synod_script_with_policy(synod, &QuorumPolicy::default())
}

/// Builds the synod script with an explicit quorum policy.
///
/// # Errors
/// `Error::InvalidSynod` if the synod fails `validate_synod`, `Error::BadData`
/// for an invalid policy.
pub fn create_synod_script_with_policy(synod: &Synod, policy: &QuorumPolicy) -> Result<Script> {
    policy.validate()?;
    validate_synod(synod)?;
    let (first, rest) = synod
        .voters()
        .split_first()
        .ok_or_else(|| Error::InvalidSynod("Empty synod".to_string()))?;
    let quorum = quorum_weight_with_policy(synod, policy)?;

    let mut script = Script::new();
    append_first_voter(&mut script, first)?;
    for voter in rest {
        append_voter(&mut script, voter)?;
    }
    script.append_num(quorum)?;
    script.append(OP_GREATERTHAN);
    debug!("synod script, {} voters, quorum {}, {} bytes", synod.len(), quorum, script.0.len());
    Ok(script)
}

/// Seeds the running total: the weight if the signature checks, else zero.
fn append_first_voter(script: &mut Script, voter: &Voter) -> Result<()> {
    script.append_data(&voter.pubkey.0)?;
    script.append(OP_CHECKSIG);
    script.append(OP_IF);
    script.append_num(voter.weight)?;
    script.append(OP_ELSE);
    script.append(OP_0);
    script.append(OP_ENDIF);
    Ok(())
}

/// Brings the next signature above the running total and adds the weight if it checks.
fn append_voter(script: &mut Script, voter: &Voter) -> Result<()> {
    script.append(OP_SWAP);
    script.append_data(&voter.pubkey.0)?;
    script.append(OP_CHECKSIG);
    script.append(OP_IF);
    script.append_num(voter.weight)?;
    script.append(OP_ADD);
    script.append(OP_ENDIF);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::derive_public_key;
    use crate::script::Token;
    use pretty_assertions::assert_eq;

    fn key(n: u8) -> [u8; 33] {
        derive_public_key(&[n; 32]).unwrap().0
    }

    fn three() -> Synod {
        Synod::new(vec![Voter::new(10, key(1)), Voter::new(10, key(2)), Voter::new(10, key(3))])
    }

    #[test]
    fn golden_text() {
        let script = create_synod_script(&three()).unwrap();
        let text = format!(
            "{} OP_CHECKSIG OP_IF 0a OP_ELSE OP_0 OP_ENDIF \
             OP_SWAP {} OP_CHECKSIG OP_IF 0a OP_ADD OP_ENDIF \
             OP_SWAP {} OP_CHECKSIG OP_IF 0a OP_ADD OP_ENDIF \
             12 OP_GREATERTHAN",
            hex::encode(key(1)),
            hex::encode(key(2)),
            hex::encode(key(3))
        );
        assert_eq!(script.to_asm(), text);
        assert_eq!(script.0.len(), 126);
    }

    #[test]
    fn golden_bytes() {
        let script = create_synod_script(&Synod::new(vec![Voter::new(200, key(1))])).unwrap();
        let mut expected = vec![33];
        expected.extend_from_slice(&key(1));
        expected.extend_from_slice(&[OP_CHECKSIG, OP_IF, 2, 0xc8, 0x00, OP_ELSE, OP_0, OP_ENDIF]);
        expected.extend_from_slice(&[1, 0x78, OP_GREATERTHAN]);
        assert_eq!(script.0, expected);
    }

    #[test]
    fn zero_quorum_is_op_0() {
        let script = create_synod_script(&Synod::new(vec![Voter::new(1, key(1))])).unwrap();
        let tokens = script.tokens().unwrap();
        assert_eq!(tokens[tokens.len() - 2..].to_vec(), vec![Token::Op(OP_0), Token::Op(OP_GREATERTHAN)]);
    }

    #[test]
    fn block_topology() {
        let script = create_synod_script(&three()).unwrap();
        let tokens = script.tokens().unwrap();
        assert_eq!(tokens.len(), 7 + 7 + 7 + 2);
        assert_eq!(tokens[0], Token::Push(key(1).to_vec()));
        assert_eq!(tokens[7], Token::Op(OP_SWAP));
        assert_eq!(tokens[14], Token::Op(OP_SWAP));
        assert_eq!(tokens.iter().filter(|t| **t == Token::Op(OP_ADD)).count(), 2);
    }

    #[test]
    fn member_limit() {
        let voters: Vec<Voter> = (0..78).map(|i| Voter::new(1, key(1 + (i % 5) as u8))).collect();
        assert!(create_synod_script(&Synod::new(voters[..77].to_vec())).is_ok());
        assert!(matches!(create_synod_script(&Synod::new(voters)), Err(Error::InvalidSynod(_))));
    }

    #[test]
    fn invalid_members() {
        assert!(matches!(create_synod_script(&Synod::default()), Err(Error::InvalidSynod(_))));
        let bad_key = Synod::new(vec![Voter::new(1, key(1)), Voter::new(1, [9; 33])]);
        assert!(matches!(create_synod_script(&bad_key), Err(Error::InvalidSynod(_))));
    }

    #[test]
    fn policy_changes_quorum() {
        let policy = QuorumPolicy::new(1, 2).unwrap();
        let script = create_synod_script_with_policy(&three(), &policy).unwrap();
        assert!(script.to_asm().ends_with("0f OP_GREATERTHAN"));
        let bad = QuorumPolicy { numerator: 1, denominator: 0 };
        assert!(matches!(create_synod_script_with_policy(&three(), &bad), Err(Error::BadData(_))));
    }
}
