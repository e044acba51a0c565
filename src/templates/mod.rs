//! Script templates for the two spending conditions.
//!
//! # Examples
//! ```
//! use eris::templates::{Condition, Htlc};
//! let htlc = Htlc::new(&[0; 32], &[0x11; 20], 500_000, &[0x22; 20]).unwrap();
//! let script = Condition::Htlc(htlc).script().unwrap();
//! assert!(script.to_asm().starts_with("OP_IF OP_SHA256"));
//! ```
use crate::script::Script;
use crate::synod::{QuorumPolicy, Synod};
use crate::util::Result;

pub mod htlc;
pub mod synod;

pub use self::htlc::{create_htlc_script, Htlc};
pub use self::synod::{create_synod_script, create_synod_script_with_policy};

/// A spending condition that can be rendered to a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Hash-timelock contract.
    Htlc(Htlc),
    /// Weighted synod vote.
    Synod(Synod),
}

impl Condition {
    /// Builds the witness script, using the default quorum for synods.
    pub fn script(&self) -> Result<Script> {
        self.script_with_policy(&QuorumPolicy::default())
    }

    /// Builds the witness script; `policy` only applies to synods.
    pub fn script_with_policy(&self, policy: &QuorumPolicy) -> Result<Script> {
        match self {
            Condition::Htlc(htlc) => htlc.script(),
            Condition::Synod(synod) => create_synod_script_with_policy(synod, policy),
        }
    }
}

impl From<Htlc> for Condition {
    fn from(htlc: Htlc) -> Self {
        Condition::Htlc(htlc)
    }
}

impl From<Synod> for Condition {
    fn from(synod: Synod) -> Self {
        Condition::Synod(synod)
    }
}
