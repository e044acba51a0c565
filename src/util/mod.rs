//! Miscellaneous helpers: errors, hashes and var-int encoding.

mod digest;
pub mod hash160;
mod result;
mod serdes;
pub mod var_int;

pub use self::digest::{Digest, sha256};
pub use self::hash160::{Hash160, hash160};
pub use self::result::{Error, Result};
pub use self::serdes::Serializable;
