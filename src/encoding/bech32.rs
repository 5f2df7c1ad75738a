/*
    Module implements bech32 (BIP173) and bech32m (BIP350) encoding,
    and the SegWit address layer on top of it.

    The character set and the checksum are handled by the bech32 crate.
    The SegWit functions handle the witness version, the 8 <-> 5 bit
    regrouping and the program size rules.
*/

use bech32::{
    primitives::{decode::CheckedHrpstring, iter::Fe32IterExt},
    Bech32,
    Bech32m,
    Fe32,
    Hrp
};
use log::error;
use std::convert::TryFrom;
use thiserror::Error;

const SEPARATOR: char = '1';
const CHECKSUM_LEN: usize = 6;
const MAX_LEN: usize = 90;

/// Highest witness version expressible as OP_0..OP_16
pub const MAX_WITNESS_VERSION: u8 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// BIP173 checksum, used for witness version 0
    Bech32,
    /// BIP350 checksum, used for witness versions 1 to 16
    Bech32m
}

impl Variant {
    /// The checksum variant a witness version must be encoded with
    pub fn for_witness_version(version: u8) -> Self {
        if version == 0 { Variant::Bech32 } else { Variant::Bech32m }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Bech32Err {
    #[error("invalid character {0:?}")]
    InvalidChar(char),
    #[error("mixed case string")]
    MixedCase,
    #[error("invalid string length {0}")]
    InvalidLength(usize),
    #[error("missing separator")]
    MissingSeparator,
    #[error("invalid human readable part")]
    InvalidHrp,
    #[error("value {0} does not fit in 5 bits")]
    InvalidInt(u8),
    #[error("invalid checksum")]
    BadChecksum,
    #[error("human readable part mismatch: expected {expected:?}, found {found:?}")]
    HrpMismatch { expected: String, found: String },
    #[error("empty witness data")]
    EmptyData,
    #[error("segwit version {0} not supported")]
    SegwitVersionNotSupported(u8),
    #[error("bits conversion failed")]
    BitsConversionFailed,
    #[error("witness program size {0} out of range")]
    DataSizeMismatch(usize),
    #[error("segwit v0 program must be 20 or 32 bytes, found {0}")]
    SegwitV0ProgramSizeMismatch(usize),
    #[error("witness version {version} encoded with wrong checksum variant {variant:?}")]
    WrongVariant { version: u8, variant: Variant },
    #[error("encoding check failed")]
    EncodingCheckFailed
}

/**
    Encodes 5 bit values under the given human readable part.
    The output is always lowercase.
*/
pub fn encode(hrp: &str, data: &[u8], variant: Variant) -> Result<String, Bech32Err> {
    let hrp_lower = hrp.to_lowercase();
    let hrp = Hrp::parse(&hrp_lower).map_err(|_| Bech32Err::InvalidHrp)?;
    let fes = data
        .iter()
        .map(|v| Fe32::try_from(*v).map_err(|_| Bech32Err::InvalidInt(*v)))
        .collect::<Result<Vec<Fe32>, Bech32Err>>()?;

    let len = hrp_lower.len() + 1 + fes.len() + CHECKSUM_LEN;
    if len > MAX_LEN {
        return Err(Bech32Err::InvalidLength(len));
    }

    let encoded: String = match variant {
        Variant::Bech32 => fes.into_iter().with_checksum::<Bech32>(&hrp).chars().collect(),
        Variant::Bech32m => fes.into_iter().with_checksum::<Bech32m>(&hrp).chars().collect()
    };
    Ok(encoded)
}

/**
    Decodes a bech32 or bech32m string into its lowercase human readable part,
    the 5 bit data values (checksum removed) and the detected checksum variant.
*/
pub fn decode(s: &str) -> Result<(String, Vec<u8>, Variant), Bech32Err> {
    if s.len() > MAX_LEN {
        return Err(Bech32Err::InvalidLength(s.len()));
    }
    if let Some(c) = s.chars().find(|c| !(33..=126).contains(&(*c as u32))) {
        return Err(Bech32Err::InvalidChar(c));
    }

    let has_lower = s.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = s.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(Bech32Err::MixedCase);
    }
    let s = s.to_ascii_lowercase();

    let pos = s.rfind(SEPARATOR).ok_or(Bech32Err::MissingSeparator)?;
    let (hrp, rest) = s.split_at(pos);
    let rest = &rest[1..];
    if hrp.is_empty() {
        return Err(Bech32Err::InvalidHrp);
    }
    if rest.len() < CHECKSUM_LEN {
        return Err(Bech32Err::InvalidLength(rest.len()));
    }

    let mut data = rest
        .chars()
        .map(|c| Fe32::from_char(c).map(|fe| fe.to_u8()).map_err(|_| Bech32Err::InvalidChar(c)))
        .collect::<Result<Vec<u8>, Bech32Err>>()?;

    let variant = if CheckedHrpstring::new::<Bech32>(&s).is_ok() {
        Variant::Bech32
    } else if CheckedHrpstring::new::<Bech32m>(&s).is_ok() {
        Variant::Bech32m
    } else {
        return Err(Bech32Err::BadChecksum);
    };
    data.truncate(data.len() - CHECKSUM_LEN);

    Ok((hrp.to_string(), data, variant))
}

/**
    Regroups a sequence of `from` bit values into `to` bit values.

    With `pad` set, the trailing bits are zero padded into a last group.
    Without it, leftover bits must be fewer than `from` and all zero.
*/
pub fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Result<Vec<u8>, Bech32Err> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let max_value: u32 = (1 << to) - 1;
    let mut result = Vec::with_capacity(data.len() * from as usize / to as usize + 1);

    for &value in data {
        let v = value as u32;
        if (v >> from) != 0 {
            return Err(Bech32Err::BitsConversionFailed);
        }
        acc = (acc << from) | v;
        bits += from;
        while bits >= to {
            bits -= to;
            result.push(((acc >> bits) & max_value) as u8);
        }
    }

    if pad {
        if bits > 0 {
            result.push(((acc << (to - bits)) & max_value) as u8);
        }
    } else if bits >= from || ((acc << (to - bits)) & max_value) != 0 {
        return Err(Bech32Err::BitsConversionFailed);
    }

    Ok(result)
}

/**
    Decodes a SegWit address into its witness version and program.
*/
pub fn decode_segwit(hrp: &str, address: &str) -> Result<(u8, Vec<u8>), Bech32Err> {
    let (found, data, variant) = decode(address)?;
    if found != hrp.to_lowercase() {
        return Err(Bech32Err::HrpMismatch { expected: hrp.to_string(), found });
    }

    let (version, rest) = data.split_first().ok_or(Bech32Err::EmptyData)?;
    let version = *version;
    if version > MAX_WITNESS_VERSION {
        return Err(Bech32Err::SegwitVersionNotSupported(version));
    }

    let program = convert_bits(rest, 5, 8, false)?;
    if program.len() < 2 || program.len() > 40 {
        return Err(Bech32Err::DataSizeMismatch(program.len()));
    }
    if version == 0 && program.len() != 20 && program.len() != 32 {
        return Err(Bech32Err::SegwitV0ProgramSizeMismatch(program.len()));
    }
    if variant != Variant::for_witness_version(version) {
        return Err(Bech32Err::WrongVariant { version, variant });
    }

    Ok((version, program))
}

/**
    Encodes a witness version and program as a SegWit address.

    The result is decoded again before it is returned and must reproduce
    the same version and program.
*/
pub fn encode_segwit(hrp: &str, version: u8, program: &[u8]) -> Result<String, Bech32Err> {
    if version > MAX_WITNESS_VERSION {
        return Err(Bech32Err::SegwitVersionNotSupported(version));
    }

    let mut data = vec![version];
    data.extend(convert_bits(program, 8, 5, true)?);
    let address = encode(hrp, &data, Variant::for_witness_version(version))?;

    match decode_segwit(hrp, &address) {
        Ok((v, p)) if v == version && p == program => Ok(address),
        other => {
            error!("segwit encoding self-check failed for {}: {:?}", address, other);
            Err(Bech32Err::EncodingCheckFailed)
        }
    }
}
