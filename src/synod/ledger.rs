//! Weight bookkeeping over synod membership.
use super::{QuorumPolicy, Synod, Voter};
use crate::util::Result;

/// Per-signer witness bytes: script block, pubkey, signature and two length prefixes.
const SIGNER_WITNESS_BYTES: u64 = 42 + 33 + 75 + 2;
/// Fixed witness padding.
const WITNESS_PADDING: u64 = 10;
/// Outpoint, empty script sig and sequence, at four weight units per byte.
const INPUT_WEIGHT: u64 = (36 + 1 + 4) * 4;
/// One output: value, script length and a 32-byte program.
const OUTPUT_WEIGHT: u64 = 1 + 8 + 3 + 32;

/// Voters that left and joined between two synods.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SynodDiff {
    /// In the old synod but not the proposed one.
    pub departed: Vec<Voter>,
    /// In the proposed synod but not the old one.
    pub admitted: Vec<Voter>,
}

/// Compares membership by `(weight, pubkey)`.
///
/// A voter whose weight changed shows up as both departed and admitted.
/// Duplicates are matched one for one, so
/// `total(proposed) == total(old) - total(departed) + total(admitted)`.
#[must_use]
pub fn diff(old: &Synod, proposed: &Synod) -> SynodDiff {
    SynodDiff {
        departed: difference(old.voters(), proposed.voters()),
        admitted: difference(proposed.voters(), old.voters()),
    }
}

/// Members of `a` left over after removing one matching member of `b` for each.
fn difference(a: &[Voter], b: &[Voter]) -> Vec<Voter> {
    let mut unmatched: Vec<Option<&Voter>> = b.iter().map(Some).collect();
    let mut out = Vec::new();
    for voter in a {
        match unmatched.iter_mut().find(|v| **v == Some(voter)) {
            Some(slot) => *slot = None,
            None => out.push(*voter),
        }
    }
    out
}

/// Sum of voter weights, saturating at the `i64` bounds.
///
/// Synods that pass `validate_synod` never come near saturation.
#[must_use]
pub fn total_weight(synod: &Synod) -> i64 {
    sum(synod.voters())
}

fn sum(voters: &[Voter]) -> i64 {
    voters.iter().fold(0i64, |total, v| total.saturating_add(v.weight))
}

/// `floor(total_weight * 3 / 5)`.
#[must_use]
pub fn quorum_weight(synod: &Synod) -> i64 {
    QuorumPolicy::default().scale(total_weight(synod))
}

/// Quorum weight under an explicit policy.
///
/// # Errors
/// `Error::BadData` if the policy has a zero denominator or exceeds one.
pub fn quorum_weight_with_policy(synod: &Synod, policy: &QuorumPolicy) -> Result<i64> {
    policy.threshold(total_weight(synod))
}

/// Estimated weight units of a transaction spending one synod output into one
/// output, assuming every voter signs.
#[must_use]
pub fn estimate_spend_weight(synod: &Synod) -> u64 {
    let witness_weight = SIGNER_WITNESS_BYTES * synod.len() as u64 + WITNESS_PADDING;
    witness_weight + INPUT_WEIGHT + OUTPUT_WEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::CompressedPublicKey;
    use crate::util::Error;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn voter(weight: i64, key: u8) -> Voter {
        Voter {
            weight,
            pubkey: CompressedPublicKey([key; 33]),
        }
    }

    #[test]
    fn weights() {
        let synod = Synod::new(vec![voter(10, 1), voter(10, 2), voter(10, 3)]);
        assert_eq!(total_weight(&synod), 30);
        assert_eq!(quorum_weight(&synod), 18);
        let synod = Synod::new(vec![voter(10, 1), voter(5, 2), voter(15, 3)]);
        assert_eq!(quorum_weight(&synod), 18);
        assert_eq!(quorum_weight_with_policy(&synod, &QuorumPolicy::new(1, 2).unwrap()).unwrap(), 15);
        assert_eq!(quorum_weight(&Synod::default()), 0);
    }

    #[test]
    fn weights_saturate() {
        let synod = Synod::new(vec![voter(i64::MAX, 1), voter(1, 2)]);
        assert_eq!(total_weight(&synod), i64::MAX);
        assert_eq!(quorum_weight(&synod), i64::MAX / 5 * 3 + 1);
        let synod = Synod::new(vec![voter(i64::MIN, 1), voter(-1, 2)]);
        assert_eq!(total_weight(&synod), i64::MIN);
    }

    #[test]
    fn quorum_rejects_invalid_policy() {
        let synod = Synod::new(vec![voter(10, 1), voter(10, 2)]);
        let zero = QuorumPolicy { numerator: 1, denominator: 0 };
        assert!(matches!(quorum_weight_with_policy(&synod, &zero), Err(Error::BadData(_))));
        let above_one = QuorumPolicy { numerator: 4, denominator: 3 };
        assert!(matches!(quorum_weight_with_policy(&synod, &above_one), Err(Error::BadData(_))));
    }

    #[test]
    fn spend_weight() {
        assert_eq!(estimate_spend_weight(&Synod::default()), 10 + 164 + 44);
        let synod = Synod::new(vec![voter(1, 1), voter(1, 2), voter(1, 3)]);
        assert_eq!(estimate_spend_weight(&synod), 152 * 3 + 218);
    }

    #[test]
    fn diff_membership() {
        let old = Synod::new(vec![voter(10, 1), voter(10, 2), voter(10, 3)]);
        let proposed = Synod::new(vec![voter(10, 1), voter(20, 2), voter(5, 4)]);
        let d = diff(&old, &proposed);
        assert_eq!(d.departed, vec![voter(10, 2), voter(10, 3)]);
        assert_eq!(d.admitted, vec![voter(20, 2), voter(5, 4)]);
        assert_eq!(diff(&old, &old), SynodDiff::default());
    }

    #[test]
    fn diff_duplicates() {
        let old = Synod::new(vec![voter(1, 1), voter(1, 1)]);
        let proposed = Synod::new(vec![voter(1, 1)]);
        let d = diff(&old, &proposed);
        assert_eq!(d.departed, vec![voter(1, 1)]);
        assert!(d.admitted.is_empty());
    }

    fn arb_synod() -> impl Strategy<Value = Synod> {
        prop::collection::vec((1i64..5, 0u8..4), 0..10)
            .prop_map(|vs| Synod::new(vs.into_iter().map(|(w, k)| voter(w, k)).collect()))
    }

    proptest! {
        #[test]
        fn weight_conserved(old in arb_synod(), proposed in arb_synod()) {
            let d = diff(&old, &proposed);
            prop_assert_eq!(
                total_weight(&proposed),
                total_weight(&old) - sum(&d.departed) + sum(&d.admitted)
            );
        }
    }
}
