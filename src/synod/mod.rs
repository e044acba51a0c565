//! Synods: ordered, weighted voter sets whose signing weight must exceed a
//! quorum to spend.
//!
//! Member order matters: it fixes the block order of the synod script and the
//! order of signatures in its witness.
use crate::keys::CompressedPublicKey;
use crate::script::stack::{decode_num, encode_num};
use crate::util::{Error, Result};
use serde::{Deserialize, Serialize};

mod ledger;
mod policy;

pub use self::ledger::{
    diff, estimate_spend_weight, quorum_weight, quorum_weight_with_policy, total_weight, SynodDiff,
};
pub use self::policy::QuorumPolicy;

/// Maximum number of voters in a synod.
pub const SYNOD_MEMBER_LIMIT: usize = 77;

/// Largest running total `OP_ADD` can produce from 4-byte operands.
pub const MAX_TOTAL_WEIGHT: i64 = i32::MAX as i64;

/// A synod member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Voter {
    /// Voting weight, positive in a valid synod.
    pub weight: i64,
    /// Compressed key the voter signs with.
    pub pubkey: CompressedPublicKey,
}

impl Voter {
    /// Creates a voter without validating it.
    #[must_use]
    pub fn new(weight: i64, pubkey: [u8; 33]) -> Voter {
        Voter {
            weight,
            pubkey: CompressedPublicKey(pubkey),
        }
    }

    /// Encodes to the hex boundary format.
    #[must_use]
    pub fn to_hex(&self) -> HexVoter {
        HexVoter {
            weight: hex::encode(encode_num(self.weight)),
            pubkey: hex::encode(self.pubkey.0),
        }
    }
}

/// Voter as exchanged with other tools: weight as little-endian script-number
/// hex, pubkey as 66 hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexVoter {
    /// Little-endian script-number hex, e.g. `"f401"` for 500.
    pub weight: String,
    /// Compressed pubkey hex.
    pub pubkey: String,
}

impl TryFrom<&HexVoter> for Voter {
    type Error = Error;

    fn try_from(v: &HexVoter) -> Result<Voter> {
        let weight_bytes = hex::decode(&v.weight).map_err(|e| Error::InvalidVoter(format!("Weight is not hex: {}", e)))?;
        let weight = decode_num(&weight_bytes, 8).map_err(|e| Error::InvalidVoter(format!("Bad weight: {}", e)))?;
        if v.pubkey.len() != 66 {
            let msg = format!("Pubkey must be 66 hex characters, got {}", v.pubkey.len());
            return Err(Error::InvalidVoter(msg));
        }
        let pubkey_bytes = hex::decode(&v.pubkey).map_err(|e| Error::InvalidVoter(format!("Pubkey is not hex: {}", e)))?;
        let pubkey = CompressedPublicKey::from_slice(&pubkey_bytes)?;
        Ok(Voter { weight, pubkey })
    }
}

/// Ordered voter set.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Synod(pub Vec<Voter>);

impl Synod {
    /// Creates a synod in the given member order.
    #[must_use]
    pub fn new(voters: Vec<Voter>) -> Synod {
        Synod(voters)
    }

    /// Members in order.
    #[must_use]
    pub fn voters(&self) -> &[Voter] {
        &self.0
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the synod has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parses voters from the hex boundary format.
    pub fn from_hex(voters: &[HexVoter]) -> Result<Synod> {
        let voters = voters.iter().map(Voter::try_from).collect::<Result<Vec<_>>>()?;
        Ok(Synod(voters))
    }

    /// Encodes every member to the hex boundary format.
    #[must_use]
    pub fn to_hex(&self) -> Vec<HexVoter> {
        self.0.iter().map(Voter::to_hex).collect()
    }
}

/// Checks that a voter has positive weight and a pubkey on the curve.
///
/// # Errors
/// `Error::InvalidVoter`.
pub fn validate_voter(voter: &Voter) -> Result<()> {
    if voter.weight <= 0 {
        return Err(Error::InvalidVoter(format!("Non-positive weight: {}", voter.weight)));
    }
    if !voter.pubkey.is_valid() {
        return Err(Error::InvalidVoter(format!("Pubkey is not a curve point: {:?}", voter.pubkey)));
    }
    Ok(())
}

/// Checks size and membership of a synod.
///
/// # Errors
/// `Error::InvalidSynod` if the synod is empty, has more than
/// `SYNOD_MEMBER_LIMIT` voters, contains an invalid voter, or its total weight
/// exceeds `MAX_TOTAL_WEIGHT`.
pub fn validate_synod(synod: &Synod) -> Result<()> {
    if synod.is_empty() {
        return Err(Error::InvalidSynod("Empty synod".to_string()));
    }
    if synod.len() > SYNOD_MEMBER_LIMIT {
        let msg = format!("{} voters exceeds limit of {}", synod.len(), SYNOD_MEMBER_LIMIT);
        return Err(Error::InvalidSynod(msg));
    }
    let mut total: i64 = 0;
    for (i, voter) in synod.voters().iter().enumerate() {
        validate_voter(voter).map_err(|e| Error::InvalidSynod(format!("Voter {}: {}", i, e)))?;
        total = total.saturating_add(voter.weight);
    }
    if total > MAX_TOTAL_WEIGHT {
        let msg = format!("Total weight {} exceeds {}", total, MAX_TOTAL_WEIGHT);
        return Err(Error::InvalidSynod(msg));
    }
    Ok(())
}
