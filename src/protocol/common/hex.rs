//! ASCII-hex conversions used on both sides of the wire.
//!
//! Numbers embedded in packets (addresses, lengths, register numbers) are
//! always written most-significant digit first. Register and memory _values_
//! are written in target byte order, which is what the [`Endianness`] aware
//! `*_num` functions are for.

use num_traits::{CheckedAdd, CheckedMul, FromPrimitive, Zero};

use crate::common::Endianness;

/// Lowercase hex digits, indexed by nibble value.
pub const HEX_DIGITS: [u8; 16] = *b"0123456789abcdef";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeHexError {
    /// A character outside of `[0-9a-fA-F]` was encountered.
    NotHex(u8),
    Empty,
    Overflow,
    InvalidOutput,
    /// Byte strings must be made up of whole digit pairs.
    OddLength,
}

/// Convert a single ASCII hex digit into its value.
pub fn char_to_nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Convert the low nibble of `n` into a lowercase ASCII hex digit. The high
/// nibble is ignored.
pub fn nibble_to_char(n: u8) -> u8 {
    HEX_DIGITS[(n & 0x0f) as usize]
}

/// Check if the byte `c` is a valid hex digit `[0-9a-fA-F]`
pub fn is_hex(c: u8) -> bool {
    char_to_nibble(c).is_some()
}

/// Decode a most-significant-digit-first hex string into the specified
/// integer.
pub fn decode_hex<I>(buf: &[u8]) -> Result<I, DecodeHexError>
where
    I: FromPrimitive + Zero + CheckedAdd + CheckedMul,
{
    use DecodeHexError::*;

    let radix = I::from_u8(16).ok_or(InvalidOutput)?;

    if buf.is_empty() {
        return Err(Empty);
    }

    let mut result = I::zero();

    for &digit in buf {
        let x = I::from_u8(char_to_nibble(digit).ok_or(NotHex(digit))?).ok_or(InvalidOutput)?;
        result = result.checked_mul(&radix).ok_or(Overflow)?;
        result = result.checked_add(&x).ok_or(Overflow)?
    }

    Ok(result)
}

/// Decode a hex string into the bytes it spells out, preserving order.
pub fn decode_hex_buf(buf: &[u8]) -> Result<Vec<u8>, DecodeHexError> {
    if buf.len() % 2 != 0 {
        return Err(DecodeHexError::OddLength);
    }

    buf.chunks_exact(2)
        .map(|pair| {
            let hi = char_to_nibble(pair[0]).ok_or(DecodeHexError::NotHex(pair[0]))?;
            let lo = char_to_nibble(pair[1]).ok_or(DecodeHexError::NotHex(pair[1]))?;
            Ok(hi << 4 | lo)
        })
        .collect()
}

/// Encode a byte buffer as a hex string (two digits per byte, in order).
pub fn encode_hex_buf(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 2);
    for &b in data {
        out.push(nibble_to_char(b >> 4) as char);
        out.push(nibble_to_char(b) as char);
    }
    out
}

/// Decode a hex string into bytes, and interpret them as UTF-8 text.
///
/// Used for human readable text which GDB hex-encodes on the wire (e.g: the
/// payload of `qRcmd`). Invalid sequences become U+FFFD.
pub fn decode_hex_to_ascii(buf: &[u8]) -> Result<String, DecodeHexError> {
    let bytes = decode_hex_buf(buf)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Undo the escaping used by binary payloads (`X` packets): `}` followed by
/// `b` stands for `b ^ 0x20`.
///
/// Returns `None` if the buffer ends with a dangling escape character.
pub fn decode_bin_buf(buf: &[u8]) -> Option<Vec<u8>> {
    let mut out = Vec::with_capacity(buf.len());
    let mut bytes = buf.iter();
    while let Some(&b) = bytes.next() {
        if b == b'}' {
            out.push(bytes.next()? ^ 0x20);
        } else {
            out.push(b);
        }
    }
    Some(out)
}

/// Render `value` as hex, with digit pairs laid out in `endian` byte order.
///
/// When `digits` is `None`, the minimal whole-byte representation is used
/// (i.e: only the significant bytes, but at least one). Otherwise, exactly
/// `digits` digits are emitted, zero-padded or truncated from the most
/// significant end.
///
/// For little-endian targets the least-significant byte's digit pair comes
/// first. If `digits` is odd, the lone most-significant nibble forms its own
/// group, and ends up last.
pub fn encode_num(value: u64, digits: Option<usize>, endian: Endianness) -> String {
    let width = match digits {
        Some(d) => d,
        None => {
            let significant_bytes = 8 - value.leading_zeros() as usize / 8;
            significant_bytes.max(1) * 2
        }
    };

    let be = (0..width)
        .rev()
        .map(|i| {
            let nibble = value.checked_shr(i as u32 * 4).unwrap_or(0) as u8;
            nibble_to_char(nibble)
        })
        .collect::<Vec<u8>>();

    let digits = match endian {
        Endianness::Big => be,
        Endianness::Little => be.rchunks(2).flatten().copied().collect(),
    };

    // every byte came out of HEX_DIGITS
    digits.into_iter().map(char::from).collect()
}

/// Inverse of [`encode_num`].
pub fn decode_num(buf: &[u8], endian: Endianness) -> Result<u64, DecodeHexError> {
    match endian {
        Endianness::Big => decode_hex(buf),
        Endianness::Little => {
            let be = buf.chunks(2).rev().flatten().copied().collect::<Vec<u8>>();
            decode_hex(&be)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_hex_simple() {
        assert_eq!(encode_hex_buf(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
    }

    #[test]
    fn encode_hex_all_bytes() {
        let payload = (0..=255).collect::<Vec<u8>>();
        let expect = (0..=255).map(|b| format!("{:02x}", b)).collect::<String>();

        assert_eq!(encode_hex_buf(&payload), expect)
    }

    #[test]
    fn decode_hex_buf_mixed_case() {
        let res = decode_hex_buf(b"DeAdbeEF").unwrap();
        assert_eq!(res, [0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn decode_hex_buf_odd() {
        assert_eq!(decode_hex_buf(b"12345"), Err(DecodeHexError::OddLength));
    }

    #[test]
    fn decode_hex_buf_bad_digit() {
        assert_eq!(decode_hex_buf(b"12zz"), Err(DecodeHexError::NotHex(b'z')));
    }

    #[test]
    fn decode_hex_overflow() {
        assert_eq!(decode_hex::<u8>(b"100"), Err(DecodeHexError::Overflow));
        assert_eq!(decode_hex::<u8>(b"0ff"), Ok(0xff));
        assert_eq!(decode_hex::<u64>(b""), Err(DecodeHexError::Empty));
    }

    #[test]
    fn nibbles() {
        assert_eq!(char_to_nibble(b'7'), Some(7));
        assert_eq!(char_to_nibble(b'B'), Some(11));
        assert_eq!(char_to_nibble(b'g'), None);
        assert_eq!(nibble_to_char(0xa), b'a');
        // high nibble is masked off
        assert_eq!(nibble_to_char(0x3f), b'f');
    }

    #[test]
    fn hex_to_text() {
        assert_eq!(decode_hex_to_ascii(b"726573756d65").unwrap(), "resume");
        assert_eq!(decode_hex_to_ascii(b"c3a9").unwrap(), "\u{e9}");
        assert_eq!(decode_hex_to_ascii(b"ff41").unwrap(), "\u{fffd}A");
        assert!(decode_hex_to_ascii(b"72657").is_err());
    }

    #[test]
    fn bin_buf_escapes() {
        assert_eq!(
            decode_bin_buf(b"a}\x03}]b").unwrap(),
            [b'a', b'#', b'}', b'b']
        );
        assert_eq!(decode_bin_buf(b"abc}"), None);
    }

    #[test]
    fn encode_num_endianness() {
        assert_eq!(encode_num(0x01020304, Some(8), Endianness::Little), "04030201");
        assert_eq!(encode_num(0x01020304, Some(8), Endianness::Big), "01020304");
        assert_eq!(encode_num(0x01020304, None, Endianness::Little), "04030201");
    }

    #[test]
    fn encode_num_minimal() {
        assert_eq!(encode_num(0, None, Endianness::Big), "00");
        assert_eq!(encode_num(0x5, None, Endianness::Big), "05");
        assert_eq!(encode_num(0x1234, None, Endianness::Little), "3412");
    }

    #[test]
    fn encode_num_pad_and_truncate() {
        assert_eq!(encode_num(0x5, Some(4), Endianness::Big), "0005");
        assert_eq!(encode_num(0x5, Some(4), Endianness::Little), "0500");
        assert_eq!(encode_num(0x12345, Some(4), Endianness::Big), "2345");
        assert_eq!(encode_num(0x123, Some(3), Endianness::Little), "231");
        assert_eq!(encode_num(u64::MAX, Some(20), Endianness::Big), "0000ffffffffffffffff");
    }

    #[test]
    fn num_round_trip() {
        let values = [0, 1, 0xff, 0x100, 0x1234, 0xdead_beef, u64::MAX, 0x0102_0304_0506];
        for &endian in &[Endianness::Little, Endianness::Big] {
            for &v in &values {
                let min = encode_num(v, None, endian);
                for d in min.len()..=20 {
                    let text = encode_num(v, Some(d), endian);
                    assert_eq!(text.len(), d);
                    assert_eq!(decode_num(text.as_bytes(), endian), Ok(v), "{} {:?}", text, endian);
                }
            }
        }
    }

    #[test]
    fn decode_num_rejects_junk() {
        assert_eq!(
            decode_num(b"12x4", Endianness::Little),
            Err(DecodeHexError::NotHex(b'x'))
        );
    }
}
