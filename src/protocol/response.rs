//! Replies sent back to the GDB client.

use crate::common::{Endianness, Signal};
use crate::conn::Connection;
use crate::protocol::common::hex::{encode_num, is_hex};
use crate::protocol::response_writer::{Error, ResponseWriter};

/// A reply to a single [`Request`](crate::Request).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// `Sxx`: the target stopped with the given signal.
    SignalStop(Signal),
    /// `Txx key:value;...`: the target stopped with the given signal, with
    /// additional stop information.
    ///
    /// A key made up only of hex digits is a register number, and its value
    /// is sent in target byte order. Any other key (`thread`, `watch`,
    /// `swbreak`, ...) has its value sent as a plain hex number.
    ///
    /// Pairs whose key is empty or contains `:` or `;` are left out.
    ThreadStop {
        signal: Signal,
        info: Vec<(String, u64)>,
    },
    /// `Wxx`: the target exited with the given exit code.
    Exited(u8),
    /// `Xxx`: the target was terminated by the given signal.
    ExitedBySignal(Signal),
    /// `O...`: text to print on the GDB console.
    ConsoleOutput(String),
    /// `OK`
    Ok,
    /// `Exx`: an errno-style error code.
    Error(u8),
    /// Memory contents, in the order they appear in target memory.
    MemoryReadResult(Vec<u8>),
    /// Register contents, already laid out in target byte order.
    RegisterReadResult(Vec<u8>),
    /// The empty reply, telling GDB the request isn't supported.
    NotSupported,
    /// A free-form reply to a `q`/`Q` query (e.g: `PacketSize=1000`).
    ///
    /// Characters which would break packet framing are escaped.
    QueryReply(String),
}

/// Target specific knobs affecting how a [`Response`] is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseFormat {
    pub endian: Endianness,
    /// Width (in bytes) of the registers reported in `T` stop replies.
    pub register_width: usize,
}

impl Response {
    /// Write the response as a single packet.
    pub fn write<C: Connection>(
        &self,
        res: &mut ResponseWriter<'_, C>,
        format: ResponseFormat,
    ) -> Result<(), Error<C::Error>> {
        match self {
            Response::Ok => res.write_str("OK")?,
            Response::Error(code) => {
                res.write_str("E")?;
                res.write_hex(*code)?;
            }
            Response::SignalStop(signal) => {
                res.write_str("S")?;
                res.write_hex(signal.0)?;
            }
            Response::ThreadStop { signal, info } => {
                res.write_str("T")?;
                res.write_hex(signal.0)?;
                for (key, value) in info {
                    if key.is_empty() || key.contains(|c| matches!(c, ':' | ';')) {
                        warn!("dropping stop reply entry with invalid key {:?}", key);
                        continue;
                    }
                    let value = if key.bytes().all(is_hex) {
                        encode_num(*value, Some(format.register_width * 2), format.endian)
                    } else {
                        encode_num(*value, None, Endianness::Big)
                    };
                    res.write_escaped(key.as_bytes())?;
                    res.write_str(":")?;
                    res.write_str(&value)?;
                    res.write_str(";")?;
                }
            }
            Response::Exited(code) => {
                res.write_str("W")?;
                res.write_hex(*code)?;
            }
            Response::ExitedBySignal(signal) => {
                res.write_str("X")?;
                res.write_hex(signal.0)?;
            }
            Response::ConsoleOutput(msg) => {
                res.write_str("O")?;
                res.write_hex_buf(msg.as_bytes())?;
            }
            Response::MemoryReadResult(data) | Response::RegisterReadResult(data) => {
                res.write_hex_buf(data)?
            }
            Response::NotSupported => {}
            Response::QueryReply(text) => res.write_escaped(text.as_bytes())?,
        }

        Ok(())
    }

    /// Render the response as a complete `$<payload>#<checksum>` packet.
    pub fn to_packet(&self, format: ResponseFormat) -> Vec<u8> {
        let mut packet = Vec::new();
        let mut res = ResponseWriter::new(&mut packet);
        // writing into a Vec can't fail
        let _ = self.write(&mut res, format).and_then(|()| res.flush());
        packet
    }
}
