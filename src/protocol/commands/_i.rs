use super::prelude::*;

// i [addr[,nnn]]
fn parse_addr_count(body: &[u8]) -> Option<(Option<u64>, Option<u64>)> {
    if body.is_empty() {
        return Some((None, None));
    }

    let mut body = body.splitn(2, |&b| b == b',');
    let addr = decode_hex(body.next()?).ok()?;
    let count = match body.next() {
        Some(count) => Some(decode_hex(count).ok()?),
        None => None,
    };
    Some((Some(addr), count))
}

/// Body of `i`: step the target by a number of clock cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleStep {
    pub addr: Option<u64>,
    pub count: Option<u64>,
}

impl ParseCommand for CycleStep {
    fn from_packet(body: &[u8], _endian: Endianness) -> Option<Self> {
        let (addr, count) = parse_addr_count(body)?;
        Some(CycleStep { addr, count })
    }
}

/// Body of `I`: cycle step while delivering a signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleStepWithSignal {
    pub signal: Signal,
    pub addr: Option<u64>,
    pub count: Option<u64>,
}

impl ParseCommand for CycleStepWithSignal {
    fn from_packet(body: &[u8], _endian: Endianness) -> Option<Self> {
        let mut body = body.splitn(2, |&b| b == b';');
        let signal = Signal(decode_hex(body.next()?).ok()?);
        let (addr, count) = match body.next() {
            Some(rest) if !rest.is_empty() => parse_addr_count(rest)?,
            Some(_) => return None,
            None => (None, None),
        };
        Some(CycleStepWithSignal {
            signal,
            addr,
            count,
        })
    }
}
