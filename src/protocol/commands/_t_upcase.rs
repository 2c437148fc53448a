use super::prelude::*;
use super::ThreadId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadAlive {
    pub thread: ThreadId,
}

impl ParseCommand for ThreadAlive {
    fn from_packet(body: &[u8], _endian: Endianness) -> Option<Self> {
        Some(ThreadAlive {
            thread: ThreadId::parse(body)?,
        })
    }
}
