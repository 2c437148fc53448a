use super::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadRegister {
    pub reg: u32,
}

impl ParseCommand for ReadRegister {
    fn from_packet(body: &[u8], _endian: Endianness) -> Option<Self> {
        let reg = decode_hex(body).ok()?;
        Some(ReadRegister { reg })
    }
}
