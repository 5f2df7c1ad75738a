/*

    Script builder module.

*/

use super::{
    opcodes::{self, Opcode},
    Chunk,
    Script,
    ScriptErr
};
use std::convert::TryFrom;

#[derive(Debug, Clone, Default)]
pub struct Builder {
    code: Vec<u8>,
    chunks: Vec<Chunk>
}

impl Builder {
    /// Return a new instance of self
    pub fn new() -> Self  {
        Self::default()
    }

    /// Push an opcode that carries no data
    pub fn push_opcode(mut self, opcode: Opcode) -> Self {
        self.code.push(opcode.into_u8());
        self.chunks.push(Chunk::new(opcode, None));
        self
    }

    /// Push a small integer (0 to 16) as OP_0/OP_1..OP_16
    pub fn push_int(self, n: u8) -> Result<Self, ScriptErr> {
        let opcode = Opcode::from_small_int(n).ok_or(ScriptErr::IntOutOfRange(n))?;
        Ok(self.push_opcode(opcode))
    }

    /// Push a slice of data using the shortest push opcode for its length
    pub fn push_slice(mut self, data: &[u8]) -> Result<Self, ScriptErr> {
        let opcode = write_push_prefix(&mut self.code, data.len())?;
        let start = self.code.len();
        self.code.extend_from_slice(data);
        self.chunks.push(Chunk::new(opcode, Some(start..self.code.len())));
        Ok(self)
    }

    /// Convert self into a script
    pub fn into_script(self) -> Script {
        Script::from_parts(self.code, self.chunks)
    }
}

/**
    Writes the opcode (and length bytes) announcing a push of `len` bytes.

    0..=75 bytes use the length itself as opcode, longer data uses
    OP_PUSHDATA1, OP_PUSHDATA2 or OP_PUSHDATA4 followed by a little endian length.
*/
pub(crate) fn write_push_prefix(out: &mut Vec<u8>, len: usize) -> Result<Opcode, ScriptErr> {
    let opcode = if len <= opcodes::OP_PUSHBYTES_75.into_u8() as usize {
        let opcode = Opcode::from(len as u8);
        out.push(opcode.into_u8());
        opcode
    } else if let Ok(n) = u8::try_from(len) {
        out.push(opcodes::OP_PUSHDATA1.into_u8());
        out.push(n);
        opcodes::OP_PUSHDATA1
    } else if let Ok(n) = u16::try_from(len) {
        out.push(opcodes::OP_PUSHDATA2.into_u8());
        out.extend_from_slice(&n.to_le_bytes());
        opcodes::OP_PUSHDATA2
    } else if let Ok(n) = u32::try_from(len) {
        out.push(opcodes::OP_PUSHDATA4.into_u8());
        out.extend_from_slice(&n.to_le_bytes());
        opcodes::OP_PUSHDATA4
    } else {
        return Err(ScriptErr::PushTooLarge(len));
    };

    Ok(opcode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_prefixes() {
        let cases: [(usize, &str); 6] = [
            (0, "00"),
            (1, "01"),
            (75, "4b"),
            (76, "4c4c"),
            (256, "4d0001"),
            (65536, "4e00000100")
        ];

        for (len, prefix) in cases.iter() {
            let mut out = Vec::new();
            write_push_prefix(&mut out, *len).unwrap();
            assert_eq!(hex::encode(out), *prefix);
        }
    }

    #[test]
    fn build_p2pkh_template() {
        let hash = [0xabu8; 20];
        let script = Builder::new()
            .push_opcode(opcodes::OP_DUP)
            .push_opcode(opcodes::OP_HASH160)
            .push_slice(&hash).unwrap()
            .push_opcode(opcodes::OP_EQUALVERIFY)
            .push_opcode(opcodes::OP_CHECKSIG)
            .into_script();

        assert_eq!(script.len(), 25);
        assert_eq!(script.chunks().len(), 5);
        assert_eq!(script.chunk_data(2), Some(&hash[..]));
        assert_eq!(script.as_bytes()[..3], [0x76, 0xa9, 0x14]);
    }

    #[test]
    fn push_int_range() {
        let script = Builder::new().push_int(0).unwrap().push_int(16).unwrap().into_script();
        assert_eq!(script.as_bytes(), &[0x00, 0x60]);
        assert!(matches!(Builder::new().push_int(17), Err(ScriptErr::IntOutOfRange(17))));
    }
}
