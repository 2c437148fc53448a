//! Decoding of checksum-validated packet payloads into [`Request`]s.

use crate::common::Endianness;
use crate::protocol::PacketParseError;

mod prelude {
    pub use super::ParseCommand;
    pub use crate::common::{Endianness, Signal};
    pub use crate::protocol::common::hex::{decode_hex, decode_hex_buf};

    /// Most commands are plain ASCII; binary bodies are parsed as raw bytes.
    pub fn body_str(body: &[u8]) -> Option<&str> {
        core::str::from_utf8(body).ok().filter(|s| s.is_ascii())
    }
}

mod breakpoint;
mod resume;
mod thread_id;

mod _d_upcase;
mod _g_upcase;
mod _h_upcase;
mod _i;
mod _m;
mod _m_upcase;
mod _p;
mod _p_upcase;
mod _q;
mod _t;
mod _t_upcase;
mod _x_upcase;

pub use self::_d_upcase::Detach;
pub use self::_g_upcase::WriteRegisters;
pub use self::_h_upcase::SetThread;
pub use self::_m_upcase::WriteMemory;
pub use self::_p_upcase::WriteRegister;
pub use self::_t_upcase::ThreadAlive;
pub use self::_i::{CycleStep, CycleStepWithSignal};
pub use self::_m::ReadMemory;
pub use self::_p::ReadRegister;
pub use self::_q::Query;
pub use self::_t::SearchBack;
pub use self::breakpoint::{Breakpoint, BreakpointType};
pub use self::resume::{ResumeAt, ResumeWithSignal};
pub use self::thread_id::ThreadId;

/// Parse a command from the portion of the payload following its command
/// letter.
///
/// Implementations return `None` whenever the body doesn't match the
/// command's grammar. They never panic.
pub trait ParseCommand: Sized {
    fn from_packet(body: &[u8], endian: Endianness) -> Option<Self>;
}

/// A single decoded request from the GDB client.
///
/// Every variant carries exactly the fields the corresponding command
/// defines. Apart from [`Request::Interrupt`] (which is synthesized by the
/// packet framer), each variant corresponds to one command letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// `?`
    QueryLastSignal,
    /// `!`
    EnableExtended,
    /// `c [addr]`
    Continue(ResumeAt),
    /// `C sig[;addr]`
    ContinueWithSignal(ResumeWithSignal),
    /// `D[;pid]`
    Detach(Detach),
    /// `i [addr[,nnn]]` - step a number of clock cycles
    StepInstruction(CycleStep),
    /// `I sig[;addr[,nnn]]` - cycle step with a signal
    StepWithSignal(CycleStepWithSignal),
    /// `g`
    ReadRegisters,
    /// `G XX...`
    WriteRegisters(WriteRegisters),
    /// `H op thread-id`
    SetThread(SetThread),
    /// `k`
    Kill,
    /// `m addr,length`
    ReadMemory(ReadMemory),
    /// `M addr,length:XX...`
    WriteMemory(WriteMemory),
    /// `p n`
    ReadRegister(ReadRegister),
    /// `P n=r...`
    WriteRegister(WriteRegister),
    /// `q name[:ext]` / `Q name[:ext]`
    Query(Query),
    /// `s [addr]`
    Step(ResumeAt),
    /// `S sig[;addr]`
    StepSignal(ResumeWithSignal),
    /// `t addr:PP,MM`
    SearchBack(SearchBack),
    /// `T thread-id`
    ThreadAlive(ThreadAlive),
    /// `X addr,length:XX...` (binary data)
    WriteMemoryBinary(WriteMemory),
    /// `z type,addr,kind`
    RemoveBreakpoint(Breakpoint),
    /// `Z type,addr,kind`
    InsertBreakpoint(Breakpoint),
    /// Payload started with a character outside of the command set.
    Unknown(String),
    /// Empty payload, or a payload which doesn't fit its command's grammar.
    Malformed(String),
    /// The client sent a raw `0x03` outside of any packet.
    Interrupt,
}

/// The fieldless discriminant of a [`Request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    QueryLastSignal,
    EnableExtended,
    Continue,
    ContinueWithSignal,
    Detach,
    StepInstruction,
    StepWithSignal,
    ReadRegisters,
    WriteRegisters,
    SetThread,
    Kill,
    ReadMemory,
    WriteMemory,
    ReadRegister,
    WriteRegister,
    Query,
    Step,
    StepSignal,
    SearchBack,
    ThreadAlive,
    WriteMemoryBinary,
    RemoveBreakpoint,
    InsertBreakpoint,
    Unknown,
    Malformed,
    Interrupt,
}

fn parse<C: ParseCommand>(body: &[u8], endian: Endianness) -> Option<C> {
    C::from_packet(body, endian)
}

impl Request {
    /// Decode a checksum-validated payload (the bytes between `$` and `#`).
    ///
    /// Never fails: payloads which can't be decoded turn into
    /// [`Request::Unknown`] or [`Request::Malformed`], leaving it up to the
    /// caller to decide how to respond.
    pub fn from_payload(payload: &[u8], endian: Endianness) -> Request {
        match Request::parse(payload, endian) {
            Ok(request) => request,
            Err(e) => {
                debug!("{}: {:?}", e, String::from_utf8_lossy(payload));
                Request::Malformed(String::from_utf8_lossy(payload).into_owned())
            }
        }
    }

    /// Strict version of [`from_payload`](Self::from_payload), reporting why
    /// a payload couldn't be decoded. Unrecognized command letters still
    /// decode to [`Request::Unknown`].
    pub fn parse(payload: &[u8], endian: Endianness) -> Result<Request, PacketParseError> {
        let (&letter, body) = payload.split_first().ok_or(PacketParseError::EmptyBuf)?;

        let request = match letter {
            b'?' => Some(Request::QueryLastSignal),
            b'!' => Some(Request::EnableExtended),
            b'c' => parse(body, endian).map(Request::Continue),
            b'C' => parse(body, endian).map(Request::ContinueWithSignal),
            b'D' => parse(body, endian).map(Request::Detach),
            b'g' => Some(Request::ReadRegisters),
            b'G' => parse(body, endian).map(Request::WriteRegisters),
            b'H' => parse(body, endian).map(Request::SetThread),
            b'i' => parse(body, endian).map(Request::StepInstruction),
            b'I' => parse(body, endian).map(Request::StepWithSignal),
            b'k' => Some(Request::Kill),
            b'm' => parse(body, endian).map(Request::ReadMemory),
            b'M' => parse(body, endian).map(Request::WriteMemory),
            b'p' => parse(body, endian).map(Request::ReadRegister),
            b'P' => parse(body, endian).map(Request::WriteRegister),
            // the query letter is part of the query's name
            b'q' | b'Q' => parse(payload, endian).map(Request::Query),
            b's' => parse(body, endian).map(Request::Step),
            b'S' => parse(body, endian).map(Request::StepSignal),
            b't' => parse(body, endian).map(Request::SearchBack),
            b'T' => parse(body, endian).map(Request::ThreadAlive),
            b'X' => _x_upcase::parse_binary_write(body).map(Request::WriteMemoryBinary),
            b'z' => parse(body, endian).map(Request::RemoveBreakpoint),
            b'Z' => parse(body, endian).map(Request::InsertBreakpoint),
            _ => Some(Request::Unknown(String::from_utf8_lossy(payload).into_owned())),
        };

        request.ok_or(PacketParseError::MalformedCommand)
    }

    pub fn kind(&self) -> RequestKind {
        use RequestKind as K;
        match self {
            Request::QueryLastSignal => K::QueryLastSignal,
            Request::EnableExtended => K::EnableExtended,
            Request::Continue(_) => K::Continue,
            Request::ContinueWithSignal(_) => K::ContinueWithSignal,
            Request::Detach(_) => K::Detach,
            Request::StepInstruction(_) => K::StepInstruction,
            Request::StepWithSignal(_) => K::StepWithSignal,
            Request::ReadRegisters => K::ReadRegisters,
            Request::WriteRegisters(_) => K::WriteRegisters,
            Request::SetThread(_) => K::SetThread,
            Request::Kill => K::Kill,
            Request::ReadMemory(_) => K::ReadMemory,
            Request::WriteMemory(_) => K::WriteMemory,
            Request::ReadRegister(_) => K::ReadRegister,
            Request::WriteRegister(_) => K::WriteRegister,
            Request::Query(_) => K::Query,
            Request::Step(_) => K::Step,
            Request::StepSignal(_) => K::StepSignal,
            Request::SearchBack(_) => K::SearchBack,
            Request::ThreadAlive(_) => K::ThreadAlive,
            Request::WriteMemoryBinary(_) => K::WriteMemoryBinary,
            Request::RemoveBreakpoint(_) => K::RemoveBreakpoint,
            Request::InsertBreakpoint(_) => K::InsertBreakpoint,
            Request::Unknown(_) => K::Unknown,
            Request::Malformed(_) => K::Malformed,
            Request::Interrupt => K::Interrupt,
        }
    }

    /// `k` and `D` end the debugging session.
    pub fn ends_session(&self) -> bool {
        matches!(self, Request::Kill | Request::Detach(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Signal;

    fn decode(payload: &[u8]) -> Request {
        Request::from_payload(payload, Endianness::Little)
    }

    #[test]
    fn unit_commands() {
        assert_eq!(decode(b"?"), Request::QueryLastSignal);
        assert_eq!(decode(b"!"), Request::EnableExtended);
        assert_eq!(decode(b"g"), Request::ReadRegisters);
        assert_eq!(decode(b"k"), Request::Kill);
        assert!(decode(b"k").ends_session());
    }

    #[test]
    fn read_memory() {
        let req = decode(b"m1000,4");
        assert_eq!(req.kind(), RequestKind::ReadMemory);
        assert_eq!(req, Request::ReadMemory(ReadMemory { addr: 0x1000, len: 4 }));
    }

    #[test]
    fn write_registers() {
        assert_eq!(
            decode(b"G00112233aabbccdd"),
            Request::WriteRegisters(WriteRegisters {
                data: vec![0x00, 0x11, 0x22, 0x33, 0xaa, 0xbb, 0xcc, 0xdd]
            })
        );
        assert_eq!(decode(b"G0").kind(), RequestKind::Malformed);
    }

    #[test]
    fn query_supported() {
        assert_eq!(
            decode(b"qSupported"),
            Request::Query(Query {
                command: "qSupported".into(),
                extension: "".into()
            })
        );
    }

    #[test]
    fn malformed_breakpoint() {
        assert_eq!(decode(b"zzz"), Request::Malformed("zzz".into()));
    }

    #[test]
    fn strict_parse_reports_reason() {
        let e = Endianness::Little;
        assert_eq!(Request::parse(b"", e), Err(PacketParseError::EmptyBuf));
        assert_eq!(Request::parse(b"m10", e), Err(PacketParseError::MalformedCommand));
        assert_eq!(Request::parse(b"k", e), Ok(Request::Kill));
    }

    #[test]
    fn empty_is_malformed() {
        assert_eq!(decode(b""), Request::Malformed(String::new()));
    }

    #[test]
    fn unknown_letters() {
        assert_eq!(decode(b"vCont?"), Request::Unknown("vCont?".into()));
        assert_eq!(decode(b"R00").kind(), RequestKind::Unknown);
    }

    #[test]
    fn resume_family() {
        assert_eq!(decode(b"c"), Request::Continue(ResumeAt { addr: None }));
        assert_eq!(decode(b"s400"), Request::Step(ResumeAt { addr: Some(0x400) }));
        assert_eq!(
            decode(b"C0b;2000"),
            Request::ContinueWithSignal(ResumeWithSignal {
                signal: Signal::SIGSEGV,
                addr: Some(0x2000),
            })
        );
        assert_eq!(
            decode(b"S05"),
            Request::StepSignal(ResumeWithSignal {
                signal: Signal::SIGTRAP,
                addr: None,
            })
        );
    }

    #[test]
    fn kinds_match_letters() {
        let cases: &[(&[u8], RequestKind)] = &[
            (b"D", RequestKind::Detach),
            (b"Hg0", RequestKind::SetThread),
            (b"i", RequestKind::StepInstruction),
            (b"I05", RequestKind::StepWithSignal),
            (b"M10,1:ff", RequestKind::WriteMemory),
            (b"p1f", RequestKind::ReadRegister),
            (b"P1f=78563412", RequestKind::WriteRegister),
            (b"QStartNoAckMode", RequestKind::Query),
            (b"t1000:01,ff", RequestKind::SearchBack),
            (b"T1", RequestKind::ThreadAlive),
            (b"X10,0:", RequestKind::WriteMemoryBinary),
            (b"z0,1000,4", RequestKind::RemoveBreakpoint),
            (b"Z1,1000,4", RequestKind::InsertBreakpoint),
        ];
        for (payload, kind) in cases {
            assert_eq!(decode(payload).kind(), *kind, "{:?}", payload);
        }
    }

    #[test]
    fn non_ascii_text_is_malformed() {
        assert_eq!(decode(b"m\xff,4").kind(), RequestKind::Malformed);
    }
}
