use super::prelude::*;

/// Shared by `M` (hex data) and `X` (binary data).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteMemory {
    pub addr: u64,
    pub len: usize,
    pub data: Vec<u8>,
}

/// Parse the `addr,length` header shared by `M` and `X`.
pub(super) fn parse_addr_len(header: &[u8]) -> Option<(u64, usize)> {
    let mut header = header.splitn(2, |&b| b == b',');
    let addr = decode_hex(header.next()?).ok()?;
    let len = decode_hex(header.next()?).ok()?;
    Some((addr, len))
}

impl ParseCommand for WriteMemory {
    fn from_packet(body: &[u8], _endian: Endianness) -> Option<Self> {
        let mut body = body.splitn(2, |&b| b == b':');
        let (addr, len) = parse_addr_len(body.next()?)?;
        let data = decode_hex_buf(body.next()?).ok()?;
        if data.len() != len {
            return None;
        }

        Some(WriteMemory { addr, len, data })
    }
}

#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use super::*;

    fn parse(body: &[u8]) -> Option<WriteMemory> {
        WriteMemory::from_packet(body, Endianness::Little)
    }

    #[test]
    fn valid_M() {
        let pkt = parse(b"2000,4:deadbeef").unwrap();
        assert_eq!(pkt.addr, 0x2000);
        assert_eq!(pkt.len, 4);
        assert_eq!(pkt.data, [0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn length_mismatch() {
        assert_eq!(parse(b"2000,4:dead"), None);
        assert_eq!(parse(b"2000,1:dead"), None);
    }

    #[test]
    fn missing_data() {
        assert_eq!(parse(b"2000,4"), None);
        assert_eq!(parse(b"2000:dead"), None);
    }
}
