use crate::{
    hash,
    script::opcodes
};
use secp256k1::PublicKey;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("invalid secp256k1 public key: {0}")]
    InvalidPublicKey(#[from] secp256k1::Error)
}

/**
    A secp256k1 public key that remembers the serialization it was created with.

    Legacy addresses hash the key bytes exactly as supplied, so an uncompressed
    key and its compressed form map to different addresses.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PubKey {
    key: PublicKey,
    compressed: bool
}

impl PubKey {
    /**
        Parses a 33 byte compressed or 65 byte uncompressed public key.
    */
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        let key = PublicKey::from_slice(bytes)?;
        Ok(Self {
            key,
            compressed: bytes.len() == secp256k1::constants::PUBLIC_KEY_SIZE
        })
    }

    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// The same point in 33 byte form
    pub fn compressed(&self) -> Self {
        Self { key: self.key, compressed: true }
    }

    /// The same point in 65 byte form
    pub fn decompressed(&self) -> Self {
        Self { key: self.key, compressed: false }
    }

    /**
        Returns the key in the serialization it was created with.
    */
    pub fn to_bytes(&self) -> Vec<u8> {
        if self.compressed {
            self.key.serialize().to_vec()
        } else {
            self.key.serialize_uncompressed().to_vec()
        }
    }

    /// Compressed serialization regardless of the original form
    pub fn compressed_bytes(&self) -> [u8; 33] {
        self.key.serialize()
    }

    /**
        Ripemd160(Sha256(key bytes))
    */
    pub fn hash160(&self) -> [u8; 20] {
        hash::hash160(self.to_bytes())
    }

    /**
        Hash160 of the P2WPKH witness script `OP_0 <hash160>`.
        This is the payload of a P2WPKH-in-P2SH (BIP49) address.

        Witness programs only commit to compressed keys, so the key is
        compressed before hashing.
    */
    pub fn script_hash_for_p2wpkh_in_p2sh(&self) -> [u8; 20] {
        let mut witness_script = vec![
            opcodes::OP_0.into_u8(),
            opcodes::OP_PUSHBYTES_20.into_u8()
        ];
        witness_script.extend_from_slice(&self.compressed().hash160());
        hash::hash160(witness_script)
    }

    pub fn as_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}
