use super::prelude::*;
use super::ThreadId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetThread {
    /// The operation the thread is selected for (`c` for step/continue,
    /// `g` for everything else).
    pub op: char,
    pub thread: ThreadId,
}

impl ParseCommand for SetThread {
    fn from_packet(body: &[u8], _endian: Endianness) -> Option<Self> {
        let (&op, thread) = body.split_first()?;
        if !op.is_ascii_alphabetic() {
            return None;
        }
        Some(SetThread {
            op: op as char,
            thread: ThreadId::parse(thread)?,
        })
    }
}
