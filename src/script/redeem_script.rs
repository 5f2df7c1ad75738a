/*
    Multisig redeem scripts.

    Keys are always compressed and sorted lexicographically before the
    script is built (BIP67), so the same set of keys produces the same
    script whatever order they are supplied in.
*/

use crate::{
    key::PubKey,
    script::{
        opcodes,
        Script,
        ScriptBuilder,
        ScriptErr
    }
};
use log::trace;

/// Largest key count expressible with OP_1..OP_16
pub const MAX_MULTISIG_KEYS: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultisigRedeemScript {
    required: usize,
    keys: Vec<PubKey>,
    script: Script
}

impl MultisigRedeemScript {
    ///Creates the redeem script for a m-of-n multisig wallet
    ///BIP-11 and BIP-67 compliant
    pub fn new(required: usize, keys: &[PubKey]) -> Result<Self, ScriptErr> {
        let total = keys.len();
        if required == 0 || required > total || total > MAX_MULTISIG_KEYS {
            return Err(ScriptErr::InvalidMultisigParams { required, total });
        }

        let mut keys: Vec<PubKey> = keys.iter().map(PubKey::compressed).collect();
        keys.sort_by_key(PubKey::compressed_bytes);

        let mut builder = ScriptBuilder::new().push_int(required as u8)?;
        for key in &keys {
            builder = builder.push_slice(&key.compressed_bytes())?;
        }
        let script = builder
            .push_int(total as u8)?
            .push_opcode(opcodes::OP_CHECKMULTISIG)
            .into_script();

        trace!("built {}-of-{} multisig script {}", required, total, hex::encode(script.as_bytes()));
        Ok(Self { required, keys, script })
    }

    /**
        Builds `OP_1 <key> <key> OP_2 OP_CHECKMULTISIG` from two serialized
        public keys, compressed or not.
    */
    pub fn one_of_two(first: &[u8], second: &[u8]) -> Result<Self, ScriptErr> {
        let keys = [PubKey::from_slice(first)?, PubKey::from_slice(second)?];
        Self::new(1, &keys)
    }

    /**
        Recognizes a tokenized `OP_m <key>... OP_n OP_CHECKMULTISIG` script.
    */
    pub fn from_script(script: &Script) -> Result<Self, ScriptErr> {
        let chunks = script.chunks();
        if chunks.len() < 4 || chunks[chunks.len() - 1].opcode() != opcodes::OP_CHECKMULTISIG {
            return Err(ScriptErr::NotMultisig);
        }

        let small_int = |i: usize| {
            chunks[i].opcode()
                .to_small_int()
                .filter(|n| *n > 0)
                .map(|n| n as usize)
                .ok_or(ScriptErr::NotMultisig)
        };
        let required = small_int(0)?;
        let total = small_int(chunks.len() - 2)?;
        if total != chunks.len() - 3 {
            return Err(ScriptErr::NotMultisig);
        }

        let keys = (1..=total)
            .map(|i| -> Result<PubKey, ScriptErr> {
                let data = script.chunk_data(i).ok_or(ScriptErr::MissingData(i))?;
                Ok(PubKey::from_slice(data)?)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(required, &keys)
    }

    pub fn required(&self) -> usize {
        self.required
    }

    /// Compressed keys in script order
    pub fn keys(&self) -> &[PubKey] {
        &self.keys
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.script.as_bytes()
    }

    /// Payload of the P2SH address
    pub fn hash160(&self) -> [u8; 20] {
        self.script.hash160()
    }

    /// Program of the P2WSH address
    pub fn sha256(&self) -> [u8; 32] {
        self.script.sha256()
    }
}
