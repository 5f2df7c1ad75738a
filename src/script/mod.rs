/*
    Bitcoin script tokenizer.

    A `Script` owns its byte buffer. Decoding splits the buffer into
    chunks, where each chunk is an opcode plus an optional byte range
    into that buffer for pushed data. Chunks never copy the payload.
*/

pub mod opcodes;
pub mod builder;
pub mod witness_program;
pub mod redeem_script;

pub use builder::Builder as ScriptBuilder;
pub use opcodes::Opcode;
pub use redeem_script::MultisigRedeemScript;
pub use witness_program::WitnessProgram;

use crate::{hash, key::KeyError};
use log::trace;
use std::ops::Range;
use thiserror::Error;

/// Standard script templates an address can be derived for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptType {
    /// Pay to pubkey hash
    P2PKH,
    /// Pay to pubkey
    P2PK,
    /// Pay to script hash
    P2SH,
    /// Pay to witness pubkey hash
    P2WPKH,
    /// Pay to witness script hash
    P2WSH,
    /// Pay to witness pubkey hash nested in pay to script hash
    P2WPKHSH
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptErr {
    #[error("script length error: chunk at offset {offset} needs {needed} bytes, {available} available")]
    PushDataOutOfBounds { offset: usize, needed: usize, available: usize },
    #[error("wrong script length: expected {expected} chunks, found {found}")]
    WrongScriptLength { expected: usize, found: usize },
    #[error("wrong opcode at chunk {index}: expected {expected}, found {found}")]
    WrongSequence { index: usize, expected: Opcode, found: Opcode },
    #[error("push of {0} bytes does not fit in a single push opcode")]
    PushTooLarge(usize),
    #[error("{0} cannot be pushed as a small integer")]
    IntOutOfRange(u8),
    #[error("chunk {0} does not carry data")]
    MissingData(usize),
    #[error("witness version {0} is out of range")]
    InvalidWitnessVersion(u8),
    #[error("witness program of {0} bytes is out of range")]
    InvalidWitnessProgramLength(usize),
    #[error("script is not a witness program")]
    NotWitnessProgram,
    #[error("invalid multisig parameters: {required}-of-{total}")]
    InvalidMultisigParams { required: usize, total: usize },
    #[error("script is not a standard multisig script")]
    NotMultisig,
    #[error("failed to create multisig script: {0}")]
    MultisigKey(#[from] KeyError)
}

/// One opcode of a script, optionally referencing the data it pushes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    opcode: Opcode,
    data: Option<Range<usize>>
}

impl Chunk {
    pub(crate) fn new(opcode: Opcode, data: Option<Range<usize>>) -> Self {
        Self { opcode, data }
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// Byte range of the pushed data inside the owning script
    pub fn data_range(&self) -> Option<Range<usize>> {
        self.data.clone()
    }

    pub fn is_push(&self) -> bool {
        self.data.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    bytes: Vec<u8>,
    chunks: Vec<Chunk>
}

impl Script {
    pub(crate) fn from_parts(bytes: Vec<u8>, chunks: Vec<Chunk>) -> Self {
        Self { bytes, chunks }
    }

    /**
        Splits raw script bytes into chunks.

        Every push length is checked against the remaining buffer, a
        truncated length field or payload is reported as an error.
    */
    pub fn decode(bytes: &[u8]) -> Result<Self, ScriptErr> {
        let mut chunks = Vec::new();
        let mut i = 0;

        while i < bytes.len() {
            let offset = i;
            let opcode = Opcode::from(bytes[i]);
            i += 1;

            let len = if opcode.is_direct_push() {
                opcode.into_u8() as usize
            } else if let Some(size) = opcode.pushdata_len_size() {
                let field = take(bytes, i, size, offset)?;
                i += size;
                read_le(field)
            } else {
                chunks.push(Chunk::new(opcode, None));
                continue;
            };

            take(bytes, i, len, offset)?;
            chunks.push(Chunk::new(opcode, Some(i..i + len)));
            i += len;
        }

        trace!("decoded script of {} bytes into {} chunks", bytes.len(), chunks.len());
        Ok(Self::from_parts(bytes.to_vec(), chunks))
    }

    /**
        Serializes the chunks again. Data chunks are written with the
        shortest push opcode for their length, other chunks as their opcode byte.
    */
    pub fn encode(&self) -> Result<Vec<u8>, ScriptErr> {
        let mut out = Vec::with_capacity(self.bytes.len());
        for chunk in &self.chunks {
            match &chunk.data {
                Some(range) => {
                    let data = &self.bytes[range.clone()];
                    builder::write_push_prefix(&mut out, data.len())?;
                    out.extend_from_slice(data);
                }
                None => out.push(chunk.opcode.into_u8())
            }
        }
        Ok(out)
    }

    /**
        Checks that the script consists of exactly the expected opcodes, in order.
    */
    pub fn validate(&self, expected: &[Opcode]) -> Result<(), ScriptErr> {
        if self.chunks.len() != expected.len() {
            return Err(ScriptErr::WrongScriptLength {
                expected: expected.len(),
                found: self.chunks.len()
            });
        }

        for (index, (chunk, expected)) in self.chunks.iter().zip(expected).enumerate() {
            if chunk.opcode != *expected {
                return Err(ScriptErr::WrongSequence { index, expected: *expected, found: chunk.opcode });
            }
        }
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Data pushed by the chunk at `index`
    pub fn chunk_data(&self, index: usize) -> Option<&[u8]> {
        self.chunks
            .get(index)
            .and_then(|c| c.data.clone())
            .map(|range| &self.bytes[range])
    }

    /// Hash160 of the script, the payload of a P2SH address
    pub fn hash160(&self) -> [u8; 20] {
        hash::hash160(&self.bytes)
    }

    /// Sha256 of the script, the program of a P2WSH address
    pub fn sha256(&self) -> [u8; 32] {
        hash::sha256(&self.bytes)
    }
}

/// Bounds checked view of `len` bytes starting at `start`
fn take(bytes: &[u8], start: usize, len: usize, offset: usize) -> Result<&[u8], ScriptErr> {
    let available = bytes.len().saturating_sub(start);
    match start.checked_add(len) {
        Some(end) if end <= bytes.len() => Ok(&bytes[start..end]),
        _ => Err(ScriptErr::PushDataOutOfBounds { offset, needed: len, available })
    }
}

/// Little endian length field of 1, 2 or 4 bytes
fn read_le(field: &[u8]) -> usize {
    let mut buf = [0u8; 4];
    buf[..field.len()].copy_from_slice(field);
    u32::from_le_bytes(buf) as usize
}

/// Standard P2PKH locking script: OP_DUP OP_HASH160 <hash> OP_EQUALVERIFY OP_CHECKSIG
pub fn p2pkh(hash: &[u8]) -> Result<Script, ScriptErr> {
    Ok(ScriptBuilder::new()
        .push_opcode(opcodes::OP_DUP)
        .push_opcode(opcodes::OP_HASH160)
        .push_slice(hash)?
        .push_opcode(opcodes::OP_EQUALVERIFY)
        .push_opcode(opcodes::OP_CHECKSIG)
        .into_script())
}

/// Standard P2SH locking script: OP_HASH160 <hash> OP_EQUAL
pub fn p2sh(hash: &[u8]) -> Result<Script, ScriptErr> {
    Ok(ScriptBuilder::new()
        .push_opcode(opcodes::OP_HASH160)
        .push_slice(hash)?
        .push_opcode(opcodes::OP_EQUAL)
        .into_script())
}

impl std::convert::TryFrom<&[u8]> for Script {
    type Error = ScriptErr;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Script::decode(bytes)
    }
}
