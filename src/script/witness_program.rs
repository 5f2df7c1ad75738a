use crate::{
    encoding::bech32::{self, Bech32Err, MAX_WITNESS_VERSION},
    script::{
        Opcode,
        Script,
        ScriptBuilder,
        ScriptErr
    }
};

/// Smallest and largest witness program in bytes
pub const MIN_PROGRAM_LEN: usize = 2;
pub const MAX_PROGRAM_LEN: usize = 40;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WitnessProgram {
    version: u8,
    program: Vec<u8>
}

impl WitnessProgram {
    /**
        Creates a new witness program given a version and data.

        For P2WPKH, version is 0 and data is the Hash160 of the public key.
        For P2WSH, version is 0 and data is the SHA256 of the redeem script.
    */
    pub fn new(version: u8, program: Vec<u8>) -> Result<Self, ScriptErr> {
        if version > MAX_WITNESS_VERSION { return Err(ScriptErr::InvalidWitnessVersion(version)) }
        if program.len() < MIN_PROGRAM_LEN || program.len() > MAX_PROGRAM_LEN {
            return Err(ScriptErr::InvalidWitnessProgramLength(program.len()))
        }

        Ok(Self { version, program })
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn program(&self) -> &[u8] {
        &self.program
    }

    /**
        The witness locking script `<version opcode> <program push>`.
    */
    pub fn to_script(&self) -> Result<Script, ScriptErr> {
        Ok(ScriptBuilder::new()
            .push_int(self.version)?
            .push_slice(&self.program)?
            .into_script())
    }

    /**
        Reads a witness program back out of a tokenized locking script.
    */
    pub fn from_script(script: &Script) -> Result<Self, ScriptErr> {
        let chunks = script.chunks();
        if chunks.len() != 2 {
            return Err(ScriptErr::WrongScriptLength { expected: 2, found: chunks.len() });
        }

        let version_op: Opcode = chunks[0].opcode();
        let version = version_op.to_small_int().ok_or(ScriptErr::NotWitnessProgram)?;
        let program = script.chunk_data(1).ok_or(ScriptErr::MissingData(1))?;

        Self::new(version, program.to_vec())
    }

    /// Bech32 (v0) or Bech32m (v1+) address under the given hrp
    pub fn to_address(&self, hrp: &str) -> Result<String, Bech32Err> {
        bech32::encode_segwit(hrp, self.version, &self.program)
    }

    pub fn from_address(hrp: &str, address: &str) -> Result<Self, Bech32Err> {
        let (version, program) = bech32::decode_segwit(hrp, address)?;
        Ok(Self { version, program })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::opcodes;

    #[test]
    fn p2wpkh_script() {
        let program = hex::decode("751e76e8199196d454941c45d1b3a323f1433bd6").unwrap();
        let wp = WitnessProgram::new(0, program.clone()).unwrap();
        let script = wp.to_script().unwrap();

        assert_eq!(hex::encode(script.as_bytes()), "0014751e76e8199196d454941c45d1b3a323f1433bd6");
        script.validate(&[opcodes::OP_0, opcodes::OP_PUSHBYTES_20]).unwrap();

        let decoded = Script::decode(script.as_bytes()).unwrap();
        assert_eq!(WitnessProgram::from_script(&decoded).unwrap(), wp);
        assert_eq!(wp.to_address("bc").unwrap(), "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4");
    }

    #[test]
    fn taproot_script_uses_op_1() {
        let address = "bc1pyzns9j3llzxar0dd50nrus6p0cdqjxxqz6y33cmml3qsedlejsyq867kcg";
        let wp = WitnessProgram::from_address("bc", address).unwrap();
        assert_eq!(wp.version(), 1);
        assert_eq!(wp.program().len(), 32);

        let script = wp.to_script().unwrap();
        assert_eq!(script.as_bytes()[..2], [0x51, 0x20]);
        assert_eq!(wp.to_address("bc").unwrap(), address);
    }

    #[test]
    fn rejects_invalid_programs() {
        assert_eq!(WitnessProgram::new(17, vec![0; 20]), Err(ScriptErr::InvalidWitnessVersion(17)));
        assert_eq!(WitnessProgram::new(0, vec![0; 1]), Err(ScriptErr::InvalidWitnessProgramLength(1)));
        assert_eq!(WitnessProgram::new(0, vec![0; 41]), Err(ScriptErr::InvalidWitnessProgramLength(41)));

        // P2PKH is not a witness script
        let p2pkh = crate::script::p2pkh(&[0u8; 20]).unwrap();
        assert!(WitnessProgram::from_script(&p2pkh).is_err());

        // OP_DUP in version position
        let script = Script::decode(&[0x76, 0x02, 0xab, 0xcd]).unwrap();
        assert_eq!(WitnessProgram::from_script(&script), Err(ScriptErr::NotWitnessProgram));
    }
}
