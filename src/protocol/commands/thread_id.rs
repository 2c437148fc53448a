use super::prelude::*;

/// Thread selector used by `H` and `T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadId {
    /// `-1`
    All,
    /// `0`
    Any,
    Id(u64),
}

impl ThreadId {
    pub fn parse(body: &[u8]) -> Option<ThreadId> {
        match body {
            b"-1" => Some(ThreadId::All),
            _ => match decode_hex::<u64>(body).ok()? {
                0 => Some(ThreadId::Any),
                id => Some(ThreadId::Id(id)),
            },
        }
    }
}
