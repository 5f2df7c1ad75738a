/*
    Address values and the converters producing them.

    An address is classified purely from what it encodes: the version byte
    and payload length for Base58Check, the witness version and program
    length for SegWit.
*/

pub mod base58;
pub mod segwit;

pub use base58::Base58Converter;
pub use segwit::SegWitConverter;

use crate::{
    encoding::{base58::Base58Error, bech32::Bech32Err},
    key::{KeyError, PubKey},
    script::{self, Script, ScriptErr, ScriptType, WitnessProgram}
};
use thiserror::Error;

/// Length of a hash160 key or script hash
pub const HASH160_LEN: usize = 20;
/// Length of a sha256 witness script hash
pub const SHA256_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error(transparent)]
    Base58(#[from] Base58Error),
    #[error(transparent)]
    Bech32(#[from] Bech32Err),
    #[error(transparent)]
    Script(#[from] ScriptErr),
    #[error(transparent)]
    Key(#[from] KeyError),
    #[error("invalid address length {0}")]
    InvalidAddressLength(usize),
    #[error("wrong address prefix {0:#04x}")]
    WrongAddressPrefix(u8),
    #[error("unsupported script type {0:?}")]
    UnsupportedScriptType(ScriptType),
    #[error("key hash of {0} bytes does not fit the script type")]
    InvalidKeyHashLength(usize),
    #[error(transparent)]
    MultisigCreation(ScriptErr)
}

/// What the payload of an address is the hash of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashType {
    PubKeyHash,
    ScriptHash
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressType {
    Legacy(HashType),
    /// `hash_type` is only known for version 0 programs
    SegWit { version: u8, hash_type: Option<HashType> }
}

impl AddressType {
    /**
        Classifies a witness program. Version 0 programs of 20 bytes are
        key hashes, of 32 bytes script hashes. Other versions pass through
        unclassified.
    */
    pub fn segwit(version: u8, program_len: usize) -> Self {
        let hash_type = match (version, program_len) {
            (0, HASH160_LEN) => Some(HashType::PubKeyHash),
            (0, SHA256_LEN) => Some(HashType::ScriptHash),
            _ => None
        };
        AddressType::SegWit { version, hash_type }
    }
}

/**
    A decoded or derived address.

    Two addresses are equal when their type and key hash match, the
    display string is derived and not compared.
*/
#[derive(Debug, Clone)]
pub struct Address {
    address_type: AddressType,
    key_hash: Vec<u8>,
    display: String
}

impl Address {
    pub(crate) fn new(address_type: AddressType, key_hash: Vec<u8>, display: String) -> Self {
        Self { address_type, key_hash, display }
    }

    pub fn address_type(&self) -> AddressType {
        self.address_type
    }

    pub fn key_hash(&self) -> &[u8] {
        &self.key_hash
    }

    pub fn as_str(&self) -> &str {
        &self.display
    }

    /**
        The script an output paying to this address must carry.
    */
    pub fn locking_script(&self) -> Result<Script, AddressError> {
        let script = match self.address_type {
            AddressType::Legacy(HashType::PubKeyHash) => script::p2pkh(&self.key_hash)?,
            AddressType::Legacy(HashType::ScriptHash) => script::p2sh(&self.key_hash)?,
            AddressType::SegWit { version, .. } => {
                WitnessProgram::new(version, self.key_hash.clone())?.to_script()?
            }
        };
        Ok(script)
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.address_type == other.address_type && self.key_hash == other.key_hash
    }
}

impl Eq for Address {}

/// The address encodings a network can use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressConverter {
    Base58(Base58Converter),
    SegWit(SegWitConverter)
}

impl AddressConverter {
    /// Decodes and classifies an address string
    pub fn decode(&self, address: &str) -> Result<Address, AddressError> {
        match self {
            AddressConverter::Base58(c) => c.decode(address),
            AddressConverter::SegWit(c) => c.decode(address)
        }
    }

    /// Encodes a key or script hash for the given script type
    pub fn from_script_hash(&self, key_hash: &[u8], script_type: ScriptType) -> Result<Address, AddressError> {
        match self {
            AddressConverter::Base58(c) => c.from_script_hash(key_hash, script_type),
            AddressConverter::SegWit(c) => c.from_script_hash(key_hash, script_type)
        }
    }

    /// Hashes a public key as the script type requires and encodes it
    pub fn from_public_key(&self, key: &PubKey, script_type: ScriptType) -> Result<Address, AddressError> {
        match self {
            AddressConverter::Base58(c) => c.from_public_key(key, script_type),
            AddressConverter::SegWit(c) => c.from_public_key(key, script_type)
        }
    }
}
