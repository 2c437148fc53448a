use super::prelude::*;

/// Search backwards from `addr` for a 32-bit word `w` with
/// `w & mask == pattern`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBack {
    pub addr: u64,
    pub pattern: u32,
    pub mask: u32,
}

impl ParseCommand for SearchBack {
    fn from_packet(body: &[u8], _endian: Endianness) -> Option<Self> {
        let body = body_str(body)?;
        let (addr, rest) = body.split_once(':')?;
        let (pattern, mask) = rest.split_once(',')?;

        Some(SearchBack {
            addr: decode_hex(addr.as_bytes()).ok()?,
            pattern: decode_hex(pattern.as_bytes()).ok()?,
            mask: decode_hex(mask.as_bytes()).ok()?,
        })
    }
}
