use super::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detach {
    pub pid: Option<u64>,
}

impl ParseCommand for Detach {
    fn from_packet(body: &[u8], _endian: Endianness) -> Option<Self> {
        let pid = match body {
            [] => None,
            [b';', pid @ ..] => Some(decode_hex(pid).ok()?),
            _ => return None,
        };
        Some(Detach { pid })
    }
}
