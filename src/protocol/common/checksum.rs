//! The modulo-256 additive checksum terminating every packet.

use super::hex::{decode_hex, encode_num};
use crate::common::Endianness;

/// Sum of all payload bytes, modulo 256.
pub fn compute(payload: &[u8]) -> u8 {
    payload.iter().fold(0u8, |a, x| a.wrapping_add(*x))
}

/// Check the two checksum digits following a packet's `#` against `payload`.
///
/// Digits may be in either case. Malformed digits never match.
pub fn verify(payload: &[u8], checksum: [u8; 2]) -> bool {
    matches_sum(compute(payload), checksum)
}

/// Like [`verify`], for a sum that was accumulated while the payload streamed
/// in.
pub fn matches_sum(sum: u8, checksum: [u8; 2]) -> bool {
    match decode_hex::<u8>(&checksum) {
        Ok(expected) => expected == sum,
        Err(_) => false,
    }
}

/// The two lowercase digits GDB expects after `#`.
pub fn to_digits(checksum: u8) -> [u8; 2] {
    let s = encode_num(checksum as u64, Some(2), Endianness::Big);
    let s = s.as_bytes();
    [s[0], s[1]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_checksums() {
        assert_eq!(compute(b"OK"), 0x9a);
        assert_eq!(compute(b"S05"), 0xb8);
        assert_eq!(compute(b""), 0);
        assert_eq!(to_digits(0x9a), *b"9a");
        assert_eq!(to_digits(0x0b), *b"0b");
    }

    #[test]
    fn verify_accepts_either_case() {
        assert!(verify(b"OK", *b"9a"));
        assert!(verify(b"OK", *b"9A"));
        assert!(!verify(b"OK", *b"9b"));
        assert!(!verify(b"OK", *b"9#"));
    }

    #[test]
    fn verify_matches_compute() {
        let payloads: [&[u8]; 4] = [b"", b"m1000,4", b"qSupported:multiprocess+", &[0xff; 300]];
        for p in payloads.iter() {
            assert!(verify(p, to_digits(compute(p))));
        }
    }

    #[test]
    fn single_byte_flip_breaks_checksum() {
        let payload = b"M1000,4:deadbeef".to_vec();
        let digits = to_digits(compute(&payload));
        for i in 0..payload.len() {
            let mut corrupted = payload.clone();
            corrupted[i] ^= 0x01;
            assert!(!verify(&corrupted, digits));
        }
    }
}
