use super::_m_upcase::parse_addr_len;
use super::WriteMemory;
use crate::protocol::common::hex::decode_bin_buf;

/// `X addr,length:XX...`, where the data is raw binary with `#`, `$`, `}` and
/// `*` escaped.
///
/// The data may contain any byte (including `:` and `0x03`), so only the
/// first `:` separates header from data.
pub fn parse_binary_write(body: &[u8]) -> Option<WriteMemory> {
    let mut body = body.splitn(2, |&b| b == b':');
    let (addr, len) = parse_addr_len(body.next()?)?;
    let data = decode_bin_buf(body.next()?)?;
    if data.len() != len {
        return None;
    }

    Some(WriteMemory { addr, len, data })
}

#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use super::*;

    #[test]
    fn valid_X() {
        let pkt = parse_binary_write(b"1000,5:\x00:}\x03\x03}]").unwrap();
        assert_eq!(pkt.addr, 0x1000);
        assert_eq!(pkt.data, [0x00, b':', b'#', 0x03, b'}']);
    }

    #[test]
    fn zero_length_probe() {
        let pkt = parse_binary_write(b"1000,0:").unwrap();
        assert!(pkt.data.is_empty());
    }

    #[test]
    fn invalid_X() {
        assert!(parse_binary_write(b"1000,2:\x00").is_none());
        assert!(parse_binary_write(b"1000,1:}").is_none());
        assert!(parse_binary_write(b"zz,1:\x00").is_none());
    }
}
