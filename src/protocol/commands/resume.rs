use super::prelude::*;

/// Body of `c` and `s`: an optional address to resume at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeAt {
    pub addr: Option<u64>,
}

impl ParseCommand for ResumeAt {
    fn from_packet(body: &[u8], _endian: Endianness) -> Option<Self> {
        let addr = match body {
            [] => None,
            addr => Some(decode_hex(addr).ok()?),
        };
        Some(ResumeAt { addr })
    }
}

/// Body of `C` and `S`: a signal to deliver, and an optional address to
/// resume at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeWithSignal {
    pub signal: Signal,
    pub addr: Option<u64>,
}

impl ParseCommand for ResumeWithSignal {
    fn from_packet(body: &[u8], _endian: Endianness) -> Option<Self> {
        let mut body = body.splitn(2, |&b| b == b';');
        let signal = Signal(decode_hex(body.next()?).ok()?);
        let addr = match body.next() {
            Some(addr) => Some(decode_hex(addr).ok()?),
            None => None,
        };
        Some(ResumeWithSignal { signal, addr })
    }
}
