//! Wire-level pieces of the GDB Remote Serial Protocol: hex and checksum
//! helpers, packet framing, request decoding and response encoding.

use core::fmt::{self, Display};

pub(crate) mod common;

mod commands;
mod recv_packet;
mod response;
mod response_writer;

pub use commands::*;
pub use recv_packet::{Frame, RecvPacketBlocking, INTERRUPT};
pub use response::{Response, ResponseFormat};

/// Reasons an inbound packet couldn't be turned into a [`Request`].
///
/// These never escape the engine: a packet which fails to parse is surfaced
/// as [`Request::Malformed`] (or [`Request::Unknown`]) instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PacketParseError {
    /// Packet had no payload.
    EmptyBuf,
    /// Packet checksum didn't match its payload.
    MismatchedChecksum,
    /// Packet was larger than the configured packet buffer.
    Oversize { dropped: usize },
    /// Packet arguments didn't match the command's grammar.
    MalformedCommand,
}

impl Display for PacketParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use self::PacketParseError::*;
        match self {
            EmptyBuf => write!(f, "empty packet"),
            MismatchedChecksum => write!(f, "packet checksum mismatch"),
            Oversize { dropped } => write!(f, "packet too big for buffer ({} bytes dropped)", dropped),
            MalformedCommand => write!(f, "malformed command"),
        }
    }
}

impl std::error::Error for PacketParseError {}
