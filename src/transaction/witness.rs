//! Witness stacks for each spending path.
//!
//! Items are listed bottom first: the last item is pushed last and popped first
//! by the script. For script-hash spends the serialized script is the final item.
use crate::script::Script;
use crate::synod::Synod;
use crate::templates::create_synod_script;
use crate::util::{var_int, Error, Result, Serializable};
use log::debug;
use std::io;
use std::io::{Read, Write};

/// Maximum item size accepted when reading a serialized witness.
const MAX_WITNESS_ITEM_LEN: usize = 4_000_000;

/// Witness flag selecting the `OP_IF` branch.
pub const FLAG_TRUE: &[u8] = &[0x01];
/// Witness flag selecting the `OP_ELSE` branch: the empty item, never `0x00`.
pub const FLAG_FALSE: &[u8] = &[];

/// Ordered witness stack items.
#[derive(Default, PartialEq, Eq, Hash, Clone, Debug)]
pub struct Witness(pub Vec<Vec<u8>>);

impl Witness {
    /// Items bottom first.
    #[must_use]
    pub fn items(&self) -> &[Vec<u8>] {
        &self.0
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the witness has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serialized size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        var_int::size(self.0.len() as u64)
            + self.0.iter().map(|item| var_int::size(item.len() as u64) + item.len()).sum::<usize>()
    }
}

impl Serializable<Witness> for Witness {
    fn read(reader: &mut dyn Read) -> Result<Witness> {
        let count = var_int::read(reader)? as usize;
        let mut items = Vec::with_capacity(count.min(512));
        for _ in 0..count {
            let len = var_int::read(reader)? as usize;
            if len > MAX_WITNESS_ITEM_LEN {
                return Err(Error::BadData(format!("Witness item too long: {}", len)));
            }
            let mut item = vec![0; len];
            reader.read_exact(&mut item)?;
            items.push(item);
        }
        Ok(Witness(items))
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        var_int::write(self.0.len() as u64, writer)?;
        for item in self.0.iter() {
            var_int::write(item.len() as u64, writer)?;
            writer.write_all(item)?;
        }
        Ok(())
    }
}

fn check_signer(signature: &[u8], pubkey: &[u8]) -> Result<()> {
    if signature.is_empty() {
        return Err(Error::BadData("Empty signature".to_string()));
    }
    if pubkey.len() != 33 {
        return Err(Error::length("pubkey", 33, pubkey.len()));
    }
    Ok(())
}

/// Witness for the HTLC timeout path: `[signature, pubkey, FALSE, script]`.
pub fn htlc_refund_witness(script: &Script, signature: &[u8], pubkey: &[u8]) -> Result<Witness> {
    check_signer(signature, pubkey)?;
    let items = vec![signature.to_vec(), pubkey.to_vec(), FLAG_FALSE.to_vec(), script.0.clone()];
    debug!("htlc refund witness, script {} bytes", script.0.len());
    Ok(Witness(items))
}

/// Witness for the HTLC secret path: `[signature, pubkey, secret, TRUE, script]`.
///
/// # Errors
/// `Error::BadData` for an empty signature, `Error::InvalidParameterLength` if
/// the pubkey is not 33 bytes.
pub fn htlc_execute_witness(script: &Script, signature: &[u8], pubkey: &[u8], secret: &[u8]) -> Result<Witness> {
    check_signer(signature, pubkey)?;
    let items = vec![
        signature.to_vec(),
        pubkey.to_vec(),
        secret.to_vec(),
        FLAG_TRUE.to_vec(),
        script.0.clone(),
    ];
    debug!("htlc execute witness, script {} bytes", script.0.len());
    Ok(Witness(items))
}

/// Witness for a P2WPKH spend: `[signature, pubkey]`.
pub fn wpkh_witness(signature: &[u8], pubkey: &[u8]) -> Result<Witness> {
    check_signer(signature, pubkey)?;
    Ok(Witness(vec![signature.to_vec(), pubkey.to_vec()]))
}

/// Witness for a synod spend.
///
/// `signatures` holds one entry per voter in synod order; `None` marks a voter
/// who did not sign and becomes the empty item, which `OP_CHECKSIG` treats as a
/// failed check. The first voter's signature ends up on top of the stack, under
/// the serialized synod script.
///
/// # Errors
/// - `Error::InvalidParameterLength` naming `signatures` if the count differs
///   from the number of voters.
/// - `Error::BadData` if a supplied signature is empty.
/// - Any error from building the synod script.
pub fn synod_witness(synod: &Synod, signatures: &[Option<Vec<u8>>]) -> Result<Witness> {
    if signatures.len() != synod.len() {
        return Err(Error::length("signatures", synod.len(), signatures.len()));
    }
    let script = create_synod_script(synod)?;
    let mut items = Vec::with_capacity(signatures.len() + 1);
    for signature in signatures.iter().rev() {
        match signature {
            Some(sig) if sig.is_empty() => return Err(Error::BadData("Empty signature".to_string())),
            Some(sig) => items.push(sig.clone()),
            None => items.push(FLAG_FALSE.to_vec()),
        }
    }
    items.push(script.0);
    debug!(
        "synod witness, {} of {} voters signed",
        signatures.iter().filter(|s| s.is_some()).count(),
        signatures.len()
    );
    Ok(Witness(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synod::Voter;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn pubkey(n: u8) -> [u8; 33] {
        crate::keys::derive_public_key(&[n; 32]).unwrap().0
    }

    #[test]
    fn htlc_paths() {
        let script = Script(vec![1, 2, 3]);
        let w = htlc_execute_witness(&script, &[0x30, 1], &[2; 33], b"secret").unwrap();
        assert_eq!(
            w.0,
            vec![vec![0x30, 1], vec![2; 33], b"secret".to_vec(), vec![1], vec![1, 2, 3]]
        );
        let w = htlc_refund_witness(&script, &[0x30, 1], &[2; 33]).unwrap();
        assert_eq!(w.len(), 4);
        assert_eq!(w.0[2], Vec::<u8>::new());
        assert_eq!(w.0[3], vec![1, 2, 3]);
    }

    #[test]
    fn signer_checks() {
        let script = Script::new();
        assert!(matches!(
            htlc_refund_witness(&script, &[0x30], &[2; 65]),
            Err(Error::InvalidParameterLength { field: "pubkey", expected: 33, actual: 65 })
        ));
        assert!(matches!(wpkh_witness(&[], &[2; 33]), Err(Error::BadData(_))));
        assert_eq!(wpkh_witness(&[7], &[2; 33]).unwrap().0, vec![vec![7], vec![2; 33]]);
    }

    #[test]
    fn synod_order() {
        let synod = Synod::new(vec![
            Voter::new(10, pubkey(1)),
            Voter::new(10, pubkey(2)),
            Voter::new(10, pubkey(3)),
        ]);
        let script = create_synod_script(&synod).unwrap();
        let w = synod_witness(&synod, &[Some(vec![0xa1]), None, Some(vec![0xa3])]).unwrap();
        assert_eq!(w.0, vec![vec![0xa3], vec![], vec![0xa1], script.0]);
        assert!(matches!(
            synod_witness(&synod, &[None, None]),
            Err(Error::InvalidParameterLength { field: "signatures", expected: 3, actual: 2 })
        ));
        assert!(synod_witness(&synod, &[Some(vec![]), None, None]).is_err());
    }

    #[test]
    fn serialization() {
        let w = Witness(vec![vec![], vec![0xab; 3], vec![1; 300]]);
        let mut v = Vec::new();
        w.write(&mut v).unwrap();
        assert_eq!(v.len(), w.size());
        assert_eq!(v[..6].to_vec(), vec![3, 0, 3, 0xab, 0xab, 0xab]);
        assert_eq!(v[6..9].to_vec(), vec![0xfd, 0x2c, 0x01]);
        assert_eq!(Witness::read(&mut Cursor::new(&v)).unwrap(), w);
        assert!(Witness::read(&mut Cursor::new(&v[..v.len() - 1])).is_err());
    }
}
