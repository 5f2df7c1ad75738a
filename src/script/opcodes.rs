/*
    Opcodes used by the standard address scripts.
*/

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Opcode {
    code: u8
}

impl Opcode {
    pub fn into_u8(self) -> u8 {
        self.code
    }

    /// Opcodes 0x01..=0x4b push that many bytes
    pub fn is_direct_push(self) -> bool {
        self.code >= OP_PUSHBYTES_1.code && self.code <= OP_PUSHBYTES_75.code
    }

    /// Number of little endian length bytes following a PUSHDATA opcode
    pub fn pushdata_len_size(self) -> Option<usize> {
        match self {
            OP_PUSHDATA1 => Some(1),
            OP_PUSHDATA2 => Some(2),
            OP_PUSHDATA4 => Some(4),
            _ => None
        }
    }

    /**
        The opcode pushing a small integer: OP_0 for 0, OP_1..OP_16 for 1 to 16.
    */
    pub fn from_small_int(n: u8) -> Option<Self> {
        match n {
            0 => Some(OP_0),
            1..=16 => Some(Opcode { code: OP_1.code + n - 1 }),
            _ => None
        }
    }

    /// Inverse of `from_small_int`
    pub fn to_small_int(self) -> Option<u8> {
        match self.code {
            0x00 => Some(0),
            c if c >= OP_1.code && c <= OP_16.code => Some(c - OP_1.code + 1),
            _ => None
        }
    }
}

impl From<u8> for Opcode {
    fn from(code: u8) -> Self {
        Self { code }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            OP_0 => "OP_0",
            OP_PUSHDATA1 => "OP_PUSHDATA1",
            OP_PUSHDATA2 => "OP_PUSHDATA2",
            OP_PUSHDATA4 => "OP_PUSHDATA4",
            OP_DUP => "OP_DUP",
            OP_EQUAL => "OP_EQUAL",
            OP_EQUALVERIFY => "OP_EQUALVERIFY",
            OP_HASH160 => "OP_HASH160",
            OP_CHECKSIG => "OP_CHECKSIG",
            OP_CHECKMULTISIG => "OP_CHECKMULTISIG",
            op => match op.to_small_int() {
                Some(n) => return write!(f, "OP_{}", n),
                None if op.is_direct_push() => return write!(f, "OP_PUSHBYTES_{}", op.code),
                None => return write!(f, "OP_UNKNOWN_{:#04x}", op.code)
            }
        };
        f.write_str(name)
    }
}

/// Push an empty array onto the stack
pub const OP_0: Opcode = Opcode {code: 0x00};
/// Push the next byte as an array onto the stack
pub const OP_PUSHBYTES_1: Opcode = Opcode {code: 0x01};
/// Push the next 20 bytes as an array onto the stack
pub const OP_PUSHBYTES_20: Opcode = Opcode {code: 0x14};
/// Push the next 32 bytes as an array onto the stack
pub const OP_PUSHBYTES_32: Opcode = Opcode {code: 0x20};
/// Push the next 33 bytes as an array onto the stack
pub const OP_PUSHBYTES_33: Opcode = Opcode {code: 0x21};
/// Push the next 75 bytes as an array onto the stack
pub const OP_PUSHBYTES_75: Opcode = Opcode {code: 0x4b};
/// Read the next byte as N; push the next N bytes as an array onto the stack
pub const OP_PUSHDATA1: Opcode = Opcode {code: 0x4c};
/// Read the next 2 bytes as N; push the next N bytes as an array onto the stack
pub const OP_PUSHDATA2: Opcode = Opcode {code: 0x4d};
/// Read the next 4 bytes as N; push the next N bytes as an array onto the stack
pub const OP_PUSHDATA4: Opcode = Opcode {code: 0x4e};
/// Push the number 1 onto the stack
pub const OP_1: Opcode = Opcode {code: 0x51};
/// Push the number 2 onto the stack
pub const OP_2: Opcode = Opcode {code: 0x52};
/// Push the number 16 onto the stack
pub const OP_16: Opcode = Opcode {code: 0x60};
/// Duplicates the top stack item
pub const OP_DUP: Opcode = Opcode {code: 0x76};
/// Pushes 1 if the inputs are exactly equal, 0 otherwise
pub const OP_EQUAL: Opcode = Opcode {code: 0x87};
/// Returns success if the inputs are exactly equal, failure otherwise
pub const OP_EQUALVERIFY: Opcode = Opcode {code: 0x88};
/// Pop the top stack item and push its RIPEMD(SHA256) hash
pub const OP_HASH160: Opcode = Opcode {code: 0xa9};
/// <https://en.bitcoin.it/wiki/OP_CHECKSIG> pushing 1/0 for success/failure
pub const OP_CHECKSIG: Opcode = Opcode {code: 0xac};
/// Pop N, N pubkeys, M, M signatures, a dummy (due to bug in reference code), and verify that all M signatures are valid.
/// Push 1 for "all valid", 0 otherwise
pub const OP_CHECKMULTISIG: Opcode = Opcode {code: 0xae};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_int_opcodes() {
        assert_eq!(Opcode::from_small_int(0), Some(OP_0));
        assert_eq!(Opcode::from_small_int(1), Some(OP_1));
        assert_eq!(Opcode::from_small_int(2), Some(OP_2));
        assert_eq!(Opcode::from_small_int(16), Some(OP_16));
        assert_eq!(Opcode::from_small_int(17), None);

        for n in 0..=16u8 {
            assert_eq!(Opcode::from_small_int(n).and_then(Opcode::to_small_int), Some(n));
        }
        assert_eq!(OP_PUSHBYTES_20.to_small_int(), None);
        assert_eq!(OP_CHECKMULTISIG.to_small_int(), None);
    }

    #[test]
    fn display_names() {
        assert_eq!(OP_HASH160.to_string(), "OP_HASH160");
        assert_eq!(OP_2.to_string(), "OP_2");
        assert_eq!(OP_PUSHBYTES_33.to_string(), "OP_PUSHBYTES_33");
        assert_eq!(Opcode::from(0xff).to_string(), "OP_UNKNOWN_0xff");
    }
}
