use super::{Address, AddressError, AddressType, HashType, HASH160_LEN};
use crate::{
    encoding::base58,
    key::PubKey,
    network::NetworkParams,
    script::ScriptType
};
use std::ops::RangeInclusive;

/// Character lengths a Base58Check address can have
const ADDRESS_CHARS: RangeInclusive<usize> = 25..=35;

/**
    Converts between key or script hashes and Base58Check addresses.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Base58Converter {
    pub_key_hash_version: u8,
    script_hash_version: u8
}

impl Base58Converter {
    pub fn new(params: &NetworkParams) -> Self {
        Self {
            pub_key_hash_version: params.pub_key_hash_version,
            script_hash_version: params.script_hash_version
        }
    }

    /**
        Decodes an address and classifies it by its version byte.
    */
    pub fn decode(&self, address: &str) -> Result<Address, AddressError> {
        if !ADDRESS_CHARS.contains(&address.len()) {
            return Err(AddressError::InvalidAddressLength(address.len()));
        }

        let (version, payload) = base58::check_decode(address)?;
        let hash_type = if version == self.pub_key_hash_version {
            HashType::PubKeyHash
        } else if version == self.script_hash_version {
            HashType::ScriptHash
        } else {
            return Err(AddressError::WrongAddressPrefix(version));
        };

        Ok(Address::new(AddressType::Legacy(hash_type), payload, address.to_string()))
    }

    /**
        P2PKH and P2PK use the pubkey hash version, P2SH and P2WPKH-in-P2SH
        the script hash version.
    */
    pub fn from_script_hash(&self, key_hash: &[u8], script_type: ScriptType) -> Result<Address, AddressError> {
        let (version, hash_type) = match script_type {
            ScriptType::P2PKH | ScriptType::P2PK => (self.pub_key_hash_version, HashType::PubKeyHash),
            ScriptType::P2SH | ScriptType::P2WPKHSH => (self.script_hash_version, HashType::ScriptHash),
            other => return Err(AddressError::UnsupportedScriptType(other))
        };
        if key_hash.len() != HASH160_LEN {
            return Err(AddressError::InvalidKeyHashLength(key_hash.len()));
        }

        let display = base58::check_encode(version, key_hash);
        Ok(Address::new(AddressType::Legacy(hash_type), key_hash.to_vec(), display))
    }

    /**
        Hashes the key bytes as supplied. For P2WPKH-in-P2SH the hash of the
        `OP_0 <key hash>` witness script is encoded instead of the key hash.
    */
    pub fn from_public_key(&self, key: &PubKey, script_type: ScriptType) -> Result<Address, AddressError> {
        let hash = match script_type {
            ScriptType::P2PKH | ScriptType::P2PK => key.hash160(),
            ScriptType::P2WPKHSH => key.script_hash_for_p2wpkh_in_p2sh(),
            other => return Err(AddressError::UnsupportedScriptType(other))
        };
        self.from_script_hash(&hash, script_type)
    }
}
