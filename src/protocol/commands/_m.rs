use super::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadMemory {
    pub addr: u64,
    pub len: usize,
}

impl ParseCommand for ReadMemory {
    fn from_packet(body: &[u8], _endian: Endianness) -> Option<Self> {
        let body = body_str(body)?;
        let mut body = body.split(',');
        let addr = decode_hex(body.next()?.as_bytes()).ok()?;
        let len = decode_hex(body.next()?.as_bytes()).ok()?;
        if body.next().is_some() {
            return None;
        }

        Some(ReadMemory { addr, len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &[u8]) -> Option<ReadMemory> {
        ReadMemory::from_packet(body, Endianness::Big)
    }

    #[test]
    fn valid_m() {
        assert_eq!(
            parse(b"ffff0000,10"),
            Some(ReadMemory {
                addr: 0xffff_0000,
                len: 16
            })
        );
    }

    #[test]
    fn invalid_m() {
        assert_eq!(parse(b"1000"), None);
        assert_eq!(parse(b"1000,"), None);
        assert_eq!(parse(b",4"), None);
        assert_eq!(parse(b"1000,4,4"), None);
    }
}
