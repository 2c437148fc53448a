use super::prelude::*;

/// The full register file, in the target's `g` packet layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRegisters {
    pub data: Vec<u8>,
}

impl ParseCommand for WriteRegisters {
    fn from_packet(body: &[u8], _endian: Endianness) -> Option<Self> {
        let data = decode_hex_buf(body).ok().filter(|d| !d.is_empty())?;
        Some(WriteRegisters { data })
    }
}
