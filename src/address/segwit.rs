use super::{Address, AddressError, AddressType, HASH160_LEN, SHA256_LEN};
use crate::{
    encoding::bech32,
    key::PubKey,
    network::NetworkParams,
    script::{Script, ScriptType, WitnessProgram}
};

/**
    Converts between witness programs and Bech32/Bech32m addresses.

    Programs travel through their witness script `OP_n <program>` in both
    directions, so the version and program are always read back from a
    tokenized script.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegWitConverter {
    hrp: &'static str
}

impl SegWitConverter {
    pub fn new(hrp: &'static str) -> Self {
        Self { hrp }
    }

    /**
        Builds the converter for a network, `None` when the network has no
        Bech32 human readable part.
    */
    pub fn for_network(params: &NetworkParams) -> Option<Self> {
        params.bech32_hrp.map(Self::new)
    }

    pub fn hrp(&self) -> &str {
        self.hrp
    }

    /// Decodes an address, version 0 programs are classified by length
    pub fn decode(&self, address: &str) -> Result<Address, AddressError> {
        let (version, program) = bech32::decode_segwit(self.hrp, address)?;
        let witness = round_trip(&WitnessProgram::new(version, program)?)?;

        Ok(Address::new(
            AddressType::segwit(witness.version(), witness.program().len()),
            witness.program().to_vec(),
            address.to_lowercase()
        ))
    }

    /**
        Encodes a version 0 program. P2WPKH takes a 20 byte key hash,
        P2WSH a 32 byte script hash.
    */
    pub fn from_script_hash(&self, key_hash: &[u8], script_type: ScriptType) -> Result<Address, AddressError> {
        let expected = match script_type {
            ScriptType::P2WPKH => HASH160_LEN,
            ScriptType::P2WSH => SHA256_LEN,
            other => return Err(AddressError::UnsupportedScriptType(other))
        };
        if key_hash.len() != expected {
            return Err(AddressError::InvalidKeyHashLength(key_hash.len()));
        }

        self.from_witness_program(0, key_hash)
    }

    /**
        P2WPKH address of a public key. Witness programs only commit to
        compressed keys, an uncompressed key is compressed first.
    */
    pub fn from_public_key(&self, key: &PubKey, script_type: ScriptType) -> Result<Address, AddressError> {
        match script_type {
            ScriptType::P2WPKH => self.from_script_hash(&key.compressed().hash160(), script_type),
            other => Err(AddressError::UnsupportedScriptType(other))
        }
    }

    /// Encodes a program of any witness version
    pub fn from_witness_program(&self, version: u8, program: &[u8]) -> Result<Address, AddressError> {
        let witness = round_trip(&WitnessProgram::new(version, program.to_vec())?)?;
        let display = witness.to_address(self.hrp)?;

        Ok(Address::new(
            AddressType::segwit(witness.version(), witness.program().len()),
            witness.program().to_vec(),
            display
        ))
    }
}

/// Builds the witness script and reads the program back from its tokens
fn round_trip(witness: &WitnessProgram) -> Result<WitnessProgram, AddressError> {
    let script = Script::decode(witness.to_script()?.as_bytes())?;
    Ok(WitnessProgram::from_script(&script)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        address::HashType,
        encoding::bech32::Bech32Err,
        hash
    };

    const KEY: &str = "0241dcd64b5f4a039fc339a16300a833a883b218909f2ebcaf3906651c76842c45";

    fn key() -> PubKey {
        PubKey::from_slice(&hex::decode(KEY).unwrap()).unwrap()
    }

    #[test]
    fn public_key_addresses() {
        let cases = [
            (NetworkParams::BITCOIN, "bc1qc2zwqqucrqvvtyxfn78ajm8w2sgyjf5edc40am"),
            (NetworkParams::TESTNET, "tb1qc2zwqqucrqvvtyxfn78ajm8w2sgyjf5e87wuxg"),
            (NetworkParams::LITECOIN, "ltc1qc2zwqqucrqvvtyxfn78ajm8w2sgyjf5efy0t9t")
        ];

        for (params, expected) in cases.iter() {
            let converter = SegWitConverter::for_network(params).unwrap();
            let address = converter.from_public_key(&key(), ScriptType::P2WPKH).unwrap();
            assert_eq!(address.as_str(), *expected);
            assert_eq!(address.key_hash(), &key().hash160()[..]);
            assert_eq!(converter.decode(expected).unwrap(), address);
        }
    }

    #[test]
    fn no_converter_without_hrp() {
        assert_eq!(SegWitConverter::for_network(&NetworkParams::DOGECOIN), None);
        assert_eq!(SegWitConverter::for_network(&NetworkParams::DASH), None);
        assert_eq!(SegWitConverter::for_network(&NetworkParams::LITECOIN).map(|c| c.hrp().to_string()), Some("ltc".to_string()));
    }

    #[test]
    fn uncompressed_key_is_compressed_first() {
        let converter = SegWitConverter::new("bc");
        let address = converter.from_public_key(&key().decompressed(), ScriptType::P2WPKH).unwrap();
        assert_eq!(address.as_str(), "bc1qc2zwqqucrqvvtyxfn78ajm8w2sgyjf5edc40am");
    }

    #[test]
    fn script_hash_addresses() {
        let script_hash = hash::sha256([0x6a, 0x29, 0x05, 0x20, 0x03]);

        let mainnet = SegWitConverter::new("bc");
        let address = mainnet.from_script_hash(&script_hash, ScriptType::P2WSH).unwrap();
        assert_eq!(address.as_str(), "bc1q4sr2gyed4ww8zm0t9ktn47qxlu2nhl5ejkf6fjzfttnsjvxdkqjqe7yhq9");
        assert_eq!(address.address_type(), AddressType::SegWit { version: 0, hash_type: Some(HashType::ScriptHash) });

        let testnet = SegWitConverter::new("tb");
        let address = testnet.from_script_hash(&script_hash, ScriptType::P2WSH).unwrap();
        assert_eq!(address.as_str(), "tb1q4sr2gyed4ww8zm0t9ktn47qxlu2nhl5ejkf6fjzfttnsjvxdkqjqwkjc62");
    }

    #[test]
    fn decode_classification() {
        let converter = SegWitConverter::new("bc");

        let p2wpkh = converter.decode("BC1QW508D6QEJXTDG4Y5R3ZARVARY0C5XW7KV8F3T4").unwrap();
        assert_eq!(p2wpkh.address_type(), AddressType::SegWit { version: 0, hash_type: Some(HashType::PubKeyHash) });
        assert_eq!(p2wpkh.as_str(), "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4");

        let taproot = converter.decode("bc1pyzns9j3llzxar0dd50nrus6p0cdqjxxqz6y33cmml3qsedlejsyq867kcg").unwrap();
        assert_eq!(taproot.address_type(), AddressType::SegWit { version: 1, hash_type: None });
        assert_eq!(taproot.key_hash().len(), 32);
    }

    #[test]
    fn decode_errors() {
        let converter = SegWitConverter::new("bc");
        assert_eq!(
            converter.decode("bc1q2ddhp55sq2l4xnqhpdv9xazg02v9dr7uu8c2p2"),
            Err(AddressError::Bech32(Bech32Err::BadChecksum))
        );
        assert!(matches!(
            converter.decode("tb1qc2zwqqucrqvvtyxfn78ajm8w2sgyjf5e87wuxg"),
            Err(AddressError::Bech32(Bech32Err::HrpMismatch { .. }))
        ));
        assert!(converter.decode("1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2").is_err());
    }

    #[test]
    fn rejects_unsupported_inputs() {
        let converter = SegWitConverter::new("bc");
        assert_eq!(
            converter.from_script_hash(&[0u8; 20], ScriptType::P2WSH),
            Err(AddressError::InvalidKeyHashLength(20))
        );
        assert_eq!(
            converter.from_script_hash(&[0u8; 20], ScriptType::P2PKH),
            Err(AddressError::UnsupportedScriptType(ScriptType::P2PKH))
        );
        assert_eq!(
            converter.from_public_key(&key(), ScriptType::P2WSH),
            Err(AddressError::UnsupportedScriptType(ScriptType::P2WSH))
        );
        assert!(converter.from_witness_program(17, &[0u8; 32]).is_err());
    }
}
