//! Minimal Bitcoin-style script building.
//!
//! Only the encodings chain-identity construction needs: small-integer
//! opcodes, explicit number pushes and raw data pushes. Script execution
//! lives outside this workspace.

use std::fmt;

pub const OP_0: u8 = 0x00;
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_1NEGATE: u8 = 0x4f;
pub const OP_1: u8 = 0x51;
pub const OP_16: u8 = 0x60;
pub const OP_RETURN: u8 = 0x6a;
pub const OP_CHECKSIG: u8 = 0xac;

/// A serialized script.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Script(Vec<u8>);

impl Script {
    pub fn new() -> Script {
        Script(Vec::new())
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Script {
        Script(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push_opcode(mut self, opcode: u8) -> Script {
        self.0.push(opcode);
        self
    }

    /// Push an integer with streaming semantics: -1 and 1..=16 become their
    /// dedicated opcodes, everything else a minimal little-endian number push.
    pub fn push_int(self, value: i64) -> Script {
        match value {
            -1 => self.push_opcode(OP_1NEGATE),
            0 => self.push_opcode(OP_0),
            1..=16 => {
                let opcode = OP_1 + (value as u8 - 1);
                self.push_opcode(opcode)
            }
            _ => self.push_num(value),
        }
    }

    /// Push an integer as an explicit minimal little-endian number, even for
    /// values that have a dedicated opcode.
    pub fn push_num(self, value: i64) -> Script {
        self.push_data(&encode_num(value))
    }

    /// Push raw bytes with the shortest length prefix.
    pub fn push_data(mut self, data: &[u8]) -> Script {
        match data.len() {
            n if n < OP_PUSHDATA1 as usize => self.0.push(n as u8),
            n if n <= 0xff => {
                self.0.push(OP_PUSHDATA1);
                self.0.push(n as u8);
            }
            n if n <= 0xffff => {
                self.0.push(OP_PUSHDATA2);
                self.0.extend_from_slice(&(n as u16).to_le_bytes());
            }
            n => panic!("script push of {} bytes exceeds the supported range", n),
        }
        self.0.extend_from_slice(data);
        self
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", hex::encode(&self.0))
    }
}

/// Minimal signed little-endian number encoding. The sign lives in the high
/// bit of the final byte, so a padding byte is appended when that bit is
/// already used by the magnitude.
fn encode_num(value: i64) -> Vec<u8> {
    if value == 0 {
        return Vec::new();
    }
    let negative = value < 0;
    let mut abs = value.unsigned_abs();
    let mut out = Vec::new();
    while abs > 0 {
        out.push((abs & 0xff) as u8);
        abs >>= 8;
    }
    let last = *out.last().expect("non-zero magnitude has bytes");
    if last & 0x80 != 0 {
        out.push(if negative { 0x80 } else { 0x00 });
    } else if negative {
        let idx = out.len() - 1;
        out[idx] |= 0x80;
    }
    out
}
