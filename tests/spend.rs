use eris::keys::derive_public_key;
use eris::script::{eval_witness, DigestChecker};
use eris::synod::{quorum_weight, Synod, Voter};
use eris::templates::{create_htlc_script, create_synod_script};
use eris::transaction::p2wpkh::create_script_code;
use eris::transaction::witness::{htlc_execute_witness, htlc_refund_witness, synod_witness, wpkh_witness};
use eris::transaction::{generate_signature, Witness, SIGHASH_ALL};
use eris::util::{hash160, sha256, Digest, Serializable};
use pretty_assertions::assert_eq;
use std::io::Cursor;

const DIGEST: [u8; 32] = [0x5a; 32];

fn synod(weights: &[i64]) -> (Synod, Vec<[u8; 32]>) {
    let keys: Vec<[u8; 32]> = (1..=weights.len() as u8).map(|i| [i; 32]).collect();
    let voters = weights
        .iter()
        .zip(keys.iter())
        .map(|(w, k)| Voter::new(*w, derive_public_key(k).unwrap().0))
        .collect();
    (Synod::new(voters), keys)
}

fn votes(keys: &[[u8; 32]], signers: &[usize], digest: &[u8; 32]) -> Vec<Option<Vec<u8>>> {
    (0..keys.len())
        .map(|i| {
            if signers.contains(&i) {
                Some(generate_signature(&keys[i], digest, SIGHASH_ALL).unwrap())
            } else {
                None
            }
        })
        .collect()
}

fn spend_synod(synod: &Synod, sigs: &[Option<Vec<u8>>]) -> eris::util::Result<()> {
    let witness = synod_witness(synod, sigs)?;
    eval_witness(&witness, &mut DigestChecker::new(Digest(DIGEST), 0))
}

#[test]
fn synod_equal_weights() {
    let (synod, keys) = synod(&[10, 10, 10]);
    assert_eq!(quorum_weight(&synod), 18);
    assert!(spend_synod(&synod, &votes(&keys, &[0, 1, 2], &DIGEST)).is_ok());
    assert!(spend_synod(&synod, &votes(&keys, &[0, 2], &DIGEST)).is_ok());
    assert!(spend_synod(&synod, &votes(&keys, &[1, 2], &DIGEST)).is_ok());
    assert_eq!(
        spend_synod(&synod, &votes(&keys, &[1], &DIGEST)).unwrap_err().to_string(),
        "Script error: Top of stack is false"
    );
    assert!(spend_synod(&synod, &votes(&keys, &[], &DIGEST)).is_err());
}

#[test]
fn synod_unequal_weights() {
    let (synod, keys) = synod(&[10, 5, 15]);
    assert_eq!(quorum_weight(&synod), 18);
    // 10 + 5 = 15
    assert!(spend_synod(&synod, &votes(&keys, &[0, 1], &DIGEST)).is_err());
    // 5 + 15 = 20
    assert!(spend_synod(&synod, &votes(&keys, &[1, 2], &DIGEST)).is_ok());
    // 10 + 15 = 25
    assert!(spend_synod(&synod, &votes(&keys, &[0, 2], &DIGEST)).is_ok());
}

#[test]
fn synod_rejects_foreign_signature() {
    let (synod, keys) = synod(&[10, 10, 10]);
    let mut sigs = votes(&keys, &[0, 1], &DIGEST);
    sigs[2] = Some(generate_signature(&keys[2], &[0x11; 32], SIGHASH_ALL).unwrap());
    assert_eq!(
        spend_synod(&synod, &sigs).unwrap_err().to_string(),
        "Script error: Non-empty signature failed"
    );
    // signatures swapped between voters
    let mut sigs = votes(&keys, &[0, 1], &DIGEST);
    sigs.swap(0, 1);
    assert!(spend_synod(&synod, &sigs).is_err());
}

#[test]
fn synod_witness_serializes() {
    let (synod, keys) = synod(&[3, 4]);
    let witness = synod_witness(&synod, &votes(&keys, &[0, 1], &DIGEST)).unwrap();
    assert_eq!(witness.items().last().unwrap(), &create_synod_script(&synod).unwrap().0);
    let mut v = Vec::new();
    witness.write(&mut v).unwrap();
    let read = Witness::read(&mut Cursor::new(&v)).unwrap();
    assert_eq!(read, witness);
    assert!(eval_witness(&read, &mut DigestChecker::new(Digest(DIGEST), 0)).is_ok());
}

#[test]
fn htlc_paths() {
    let secret = b"correct horse battery staple";
    let key = [7u8; 32];
    let pubkey = derive_public_key(&key).unwrap();
    let pkh = hash160(&pubkey.0);
    let script = create_htlc_script(&sha256(secret).0, &pkh.0, 500_000, &pkh.0).unwrap();
    let sig = generate_signature(&key, &DIGEST, SIGHASH_ALL).unwrap();

    let wrong = htlc_execute_witness(&script, &sig, &pubkey.0, b"wrong").unwrap();
    assert_eq!(
        eval_witness(&wrong, &mut DigestChecker::new(Digest(DIGEST), 0)).unwrap_err().to_string(),
        "Script error: OP_EQUALVERIFY failed"
    );

    let execute = htlc_execute_witness(&script, &sig, &pubkey.0, secret).unwrap();
    assert_eq!(execute.len(), 5);
    assert_eq!(execute.items()[3], vec![1]);

    let refund = htlc_refund_witness(&script, &sig, &pubkey.0).unwrap();
    assert_eq!(
        eval_witness(&refund, &mut DigestChecker::new(Digest(DIGEST), 499_999)).unwrap_err().to_string(),
        "Script error: OP_CHECKLOCKTIMEVERIFY failed"
    );
    // past the timeout, the key hash comparison is reached
    assert_eq!(
        eval_witness(&refund, &mut DigestChecker::new(Digest(DIGEST), 500_000)).unwrap_err().to_string(),
        "Script error: OP_EQUALVERIFY failed"
    );
}

#[test]
fn wpkh_spend() {
    let key = [9u8; 32];
    let pubkey = derive_public_key(&key).unwrap();
    let script_code = create_script_code(&hash160(&pubkey.0));
    let sig = generate_signature(&key, &DIGEST, SIGHASH_ALL).unwrap();
    let witness = wpkh_witness(&sig, &pubkey.0).unwrap();
    let mut checker = DigestChecker::new(Digest(DIGEST), 0);
    assert!(script_code.eval(witness.0.clone(), &mut checker).is_ok());
    let other = derive_public_key(&[8u8; 32]).unwrap();
    let witness = wpkh_witness(&sig, &other.0).unwrap();
    assert!(script_code.eval(witness.0, &mut checker).is_err());
}
