//! Quorum threshold configuration.
use crate::util::{Error, Result};
use serde::{Deserialize, Serialize};

/// Fraction of total synod weight that the signing weight must strictly exceed.
///
/// Deserializes from e.g. `{"numerator": 2, "denominator": 3}`; missing fields
/// fall back to the 3/5 default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct QuorumPolicy {
    /// Numerator of the threshold fraction.
    pub numerator: u32,
    /// Denominator of the threshold fraction, non-zero.
    pub denominator: u32,
}

impl Default for QuorumPolicy {
    fn default() -> Self {
        QuorumPolicy {
            numerator: 3,
            denominator: 5,
        }
    }
}

impl QuorumPolicy {
    /// Creates a validated policy.
    pub fn new(numerator: u32, denominator: u32) -> Result<QuorumPolicy> {
        let policy = QuorumPolicy { numerator, denominator };
        policy.validate()?;
        Ok(policy)
    }

    /// Rejects a zero denominator or a fraction above one.
    pub fn validate(&self) -> Result<()> {
        if self.denominator == 0 {
            return Err(Error::BadData("Quorum denominator is zero".to_string()));
        }
        if self.numerator > self.denominator {
            let msg = format!("Quorum {}/{} exceeds total weight", self.numerator, self.denominator);
            return Err(Error::BadData(msg));
        }
        Ok(())
    }

    /// Threshold for `total_weight`, rounded down.
    ///
    /// # Errors
    /// `Error::BadData` if the policy fails [`QuorumPolicy::validate`].
    pub fn threshold(&self, total_weight: i64) -> Result<i64> {
        self.validate()?;
        Ok(self.scale(total_weight))
    }

    /// Floor of `total_weight * numerator / denominator` for a validated policy.
    pub(super) fn scale(&self, total_weight: i64) -> i64 {
        // numerator <= denominator keeps the result within i64
        (total_weight as i128 * self.numerator as i128 / self.denominator as i128) as i64
    }
}
