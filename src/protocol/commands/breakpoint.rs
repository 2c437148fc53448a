use super::prelude::*;

// Breakpoint packets look like this:
//
// z0,addr,kind[;cond_list…][;cmds:persist,cmd_list…]
//
// Conditions and commands are target-side agent bytecode, which isn't
// supported. Anything after `kind` is ignored.

/// The `type` field of `z`/`Z` packets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakpointType {
    Software,
    Hardware,
    WriteWatch,
    ReadWatch,
    AccessWatch,
}

impl BreakpointType {
    fn from_raw(raw: u8) -> Option<BreakpointType> {
        let ty = match raw {
            0 => BreakpointType::Software,
            1 => BreakpointType::Hardware,
            2 => BreakpointType::WriteWatch,
            3 => BreakpointType::ReadWatch,
            4 => BreakpointType::AccessWatch,
            _ => return None,
        };
        Some(ty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakpoint {
    pub type_: BreakpointType,
    pub addr: u64,
    /// Architecture dependent. Usually the length of the breakpoint
    /// instruction, or the number of bytes to watch.
    pub kind: u64,
}

impl ParseCommand for Breakpoint {
    fn from_packet(body: &[u8], _endian: Endianness) -> Option<Self> {
        let mut body = body.splitn(4, |&b| matches!(b, b',' | b';'));
        let type_ = BreakpointType::from_raw(decode_hex(body.next()?).ok()?)?;
        let addr = decode_hex(body.next()?).ok()?;
        let kind = decode_hex(body.next()?).ok()?;

        Some(Breakpoint { type_, addr, kind })
    }
}
