/*
    Base58Check encoding of version prefixed payloads.

    The base58 alphabet conversion itself is delegated to the bs58 crate,
    the versioning and checksum layer is implemented here.
*/

use crate::hash;
use thiserror::Error;

/// Length of the checksum appended to Base58Check payloads
pub const CHECKSUM_LEN: usize = 4;

/// version (1) | hash (20) | checksum (4)
pub const ADDRESS_LEN: usize = 1 + 20 + CHECKSUM_LEN;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Base58Error {
    #[error("invalid base58 character {0:?} at index {1}")]
    BadChar(char, usize),
    #[error("non-ascii character at index {0}")]
    NonAsciiChar(usize),
    #[error("invalid address length {0}")]
    InvalidLength(usize),
    #[error("invalid checksum")]
    BadChecksum,
    #[error("base58 decoding failed: {0}")]
    Unknown(String)
}

/**
    Encodes a byte slice in base 58 without a checksum.
    Leading zero bytes become leading '1' characters.
*/
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data).into_string()
}

/**
    Decodes a base 58 string into bytes.
    DOES NOT remove the checksum or version prefix if present.
*/
pub fn decode(encoded: &str) -> Result<Vec<u8>, Base58Error> {
    bs58::decode(encoded).into_vec().map_err(|e| match e {
        bs58::decode::Error::InvalidCharacter { character, index } => Base58Error::BadChar(character, index),
        bs58::decode::Error::NonAsciiCharacter { index } => Base58Error::NonAsciiChar(index),
        e => Base58Error::Unknown(e.to_string())
    })
}

/// First four bytes of Sha256(Sha256(data))
fn checksum(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&hash::sha256d(data)[..CHECKSUM_LEN]);
    out
}

/**
    Returns the Base58Check encoded value of `version | payload | checksum`.
*/
pub fn check_encode(version: u8, payload: &[u8]) -> String {
    let mut bytes: Vec<u8> = Vec::with_capacity(1 + payload.len() + CHECKSUM_LEN);
    bytes.push(version);
    bytes.extend_from_slice(payload);
    let checksum = checksum(&bytes);
    bytes.extend_from_slice(&checksum);

    encode(&bytes)
}

/**
    Decodes a Base58Check encoded address into its version byte and 20 byte payload.

    The decoded data must be exactly 25 bytes long and carry a valid checksum.
*/
pub fn check_decode(encoded: &str) -> Result<(u8, Vec<u8>), Base58Error> {
    let bytes = decode(encoded)?;
    if bytes.len() != ADDRESS_LEN {
        return Err(Base58Error::InvalidLength(bytes.len()));
    }

    let (versioned, given) = bytes.split_at(ADDRESS_LEN - CHECKSUM_LEN);
    if checksum(versioned) != given {
        return Err(Base58Error::BadChecksum);
    }

    Ok((versioned[0], versioned[1..].to_vec()))
}
