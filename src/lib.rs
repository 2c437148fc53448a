//! An implementation of the server side of the
//! [GDB Remote Serial Protocol](https://sourceware.org/gdb/onlinedocs/gdb/Remote-Protocol.html)
//! in Rust.
//!
//! `gdbconn` is the protocol engine sitting between a GDB client and a
//! simulated (or real) target. It owns the connection, and takes care of
//! everything on the wire: packet framing, checksums, the `+`/`-` ack
//! handshake, hex encoding in the target's byte order, and the out-of-band
//! 0x03 interrupt byte. Requests are handed to the caller as a structured
//! [`Request`], and the caller answers with a structured [`Response`].
//!
//! What a request actually _does_ (reading registers, stepping a CPU,
//! managing breakpoints) is entirely up to the caller.
//!
//! ## Getting Started
//!
//! ```no_run
//! use gdbconn::{Endianness, GdbConnection, Request, Response, Signal};
//!
//! let mut conn: GdbConnection = GdbConnection::builder()
//!     .endianness(Endianness::Little)
//!     .build()?;
//! conn.initialize(9001)?;
//!
//! loop {
//!     let response = match conn.process_request()? {
//!         Request::QueryLastSignal => Response::SignalStop(Signal::SIGTRAP),
//!         Request::ReadMemory(req) => Response::MemoryReadResult(vec![0; req.len]),
//!         Request::Kill => Response::Ok,
//!         _ => Response::NotSupported,
//!     };
//!     conn.send_response(&response)?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Interrupts can be sent to the client from other threads via an
//! [`InterruptHandle`] (see [`GdbConnection::interrupt_handle`]).
//!
//! ## Feature flags
//!
//! - `trace-pkt` (default): log every inbound and outbound packet at the
//!   `trace` level.

#[macro_use]
extern crate log;

mod common;
mod protocol;
mod stub;

pub mod conn;

pub use common::{Endianness, Signal};
pub use protocol::{
    Breakpoint, BreakpointType, CycleStep, CycleStepWithSignal, Detach, PacketParseError, Query,
    ReadMemory, ReadRegister, Request, RequestKind, Response, ResumeAt, ResumeWithSignal,
    SearchBack, SetThread, ThreadAlive, ThreadId, WriteMemory, WriteRegister, WriteRegisters,
};
pub use stub::{
    GdbConnection, GdbConnectionBuilder, GdbConnectionBuilderError, GdbConnectionError,
    InterruptHandle, SessionState,
};
