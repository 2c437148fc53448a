use super::prelude::*;
use crate::protocol::common::hex::decode_num;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRegister {
    pub reg: u32,
    /// The register value, interpreted in target byte order. Registers wider
    /// than 64 bits keep only their low 64 bits here.
    pub value: i64,
    /// The raw register contents, in target byte order.
    pub data: Vec<u8>,
}

impl ParseCommand for WriteRegister {
    fn from_packet(body: &[u8], endian: Endianness) -> Option<Self> {
        let mut body = body.splitn(2, |&b| b == b'=');
        let reg = decode_hex(body.next()?).ok()?;
        let raw = body.next()?;
        let data = decode_hex_buf(raw).ok().filter(|d| !d.is_empty())?;

        // the low 64 bits sit at the front of a little-endian value
        let low = match endian {
            Endianness::Little => &raw[..raw.len().min(16)],
            Endianness::Big => &raw[raw.len().saturating_sub(16)..],
        };
        let value = decode_num(low, endian).ok()? as i64;

        Some(WriteRegister { reg, value, data })
    }
}

#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use super::*;

    #[test]
    fn value_follows_endianness() {
        let le = WriteRegister::from_packet(b"1f=78563412", Endianness::Little).unwrap();
        assert_eq!(le.reg, 0x1f);
        assert_eq!(le.value, 0x1234_5678);
        assert_eq!(le.data, [0x78, 0x56, 0x34, 0x12]);

        let be = WriteRegister::from_packet(b"1f=78563412", Endianness::Big).unwrap();
        assert_eq!(be.value, 0x7856_3412);
    }

    #[test]
    fn wide_register() {
        let raw = b"0=0100000000000000ffffffffffffffff";
        let le = WriteRegister::from_packet(raw, Endianness::Little).unwrap();
        assert_eq!(le.value, 1);
        assert_eq!(le.data.len(), 16);

        let be = WriteRegister::from_packet(raw, Endianness::Big).unwrap();
        assert_eq!(be.value, -1);
    }

    #[test]
    fn invalid_P() {
        assert!(WriteRegister::from_packet(b"1f", Endianness::Little).is_none());
        assert!(WriteRegister::from_packet(b"1f=", Endianness::Little).is_none());
        assert!(WriteRegister::from_packet(b"=00", Endianness::Little).is_none());
        assert!(WriteRegister::from_packet(b"1f=0", Endianness::Little).is_none());
    }
}
