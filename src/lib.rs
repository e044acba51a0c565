#![deny(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

/*! # Eris

Spending conditions for segwit outputs: hash-timelock contracts and weighted
"synod" voting scripts. Builds the witness script for each condition, signs
externally computed signature hashes, and assembles the witness stack for each
spending path.

Transaction serialization, sighash computation and address encoding belong to
the caller's transaction codec. This crate consumes a 32-byte digest and
produces scripts and witness items.

## Usage
```
use eris::keys::derive_public_key;
use eris::synod::{Synod, Voter};
use eris::templates::create_synod_script;
use eris::transaction::{generate_signature, witness::synod_witness, SIGHASH_ALL};

let keys = [[1u8; 32], [2u8; 32], [3u8; 32]];
let voters = keys.iter().map(|k| Voter::new(10, derive_public_key(k).unwrap().0)).collect();
let synod = Synod::new(voters);
let script = create_synod_script(&synod).unwrap();

let digest = [7u8; 32]; // from the transaction codec
let sigs = vec![
    Some(generate_signature(&keys[0], &digest, SIGHASH_ALL).unwrap()),
    None,
    Some(generate_signature(&keys[2], &digest, SIGHASH_ALL).unwrap()),
];
let witness = synod_witness(&synod, &sigs).unwrap();
assert_eq!(witness.items().last(), Some(&script.0));
```

## Security
- Signatures use RFC 6979 nonces and are normalized to low-S.
- Private keys, secrets and signatures are never logged.
- Not intended for consensus validation; the script evaluator only covers the
  opcodes these templates emit.
*/

pub mod keys;
pub mod script;
pub mod synod;
pub mod templates;
pub mod transaction;
pub mod util;
