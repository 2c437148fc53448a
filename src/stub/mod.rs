//! The core [`GdbConnection`] type, used to run the server side of a GDB
//! debugging session over a given [`Connection`].

use std::io;
use std::mem;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::common::Endianness;
use crate::conn::{Connection, SplitConnection};
use crate::protocol::{
    Frame, PacketParseError, RecvPacketBlocking, Request, Response, ResponseFormat, INTERRUPT,
};

mod builder;
mod error;
mod state;

pub use builder::{GdbConnectionBuilder, GdbConnectionBuilderError};
pub use error::GdbConnectionError;
pub use state::SessionState;

use builder::Config;
use state::Session;
use GdbConnectionError as Error;

/// The write half of the active session, shared with every
/// [`InterruptHandle`]. `None` whenever there is no live session.
type SharedWriter<W> = Arc<Mutex<Option<W>>>;

/// Write `bytes` while holding the write lock, so that nothing else can be
/// interleaved with them.
///
/// A failed write kills the writer, which every other user of the lock then
/// observes as [`GdbConnectionError::Closed`].
fn write_locked<W: Connection>(
    writer: &Mutex<Option<W>>,
    bytes: &[u8],
) -> Result<(), Error<W::Error>> {
    let mut guard = writer.lock();
    let w = guard.as_mut().ok_or(Error::Closed)?;

    let res = w.write_all(bytes).and_then(|()| w.flush());
    if let Err(e) = res {
        if let Some(mut w) = guard.take() {
            let _ = w.shutdown();
        }
        return Err(Error::ConnectionWrite(e));
    }

    Ok(())
}

/// Drives the protocol side of a single GDB session at a time.
///
/// The engine turns inbound packets into [`Request`]s and [`Response`]s into
/// outbound packets, taking care of framing, checksums and the ack/nak
/// handshake. What the requests _mean_ is entirely up to the caller.
///
/// The receive / decode / respond cycle must be driven from a single thread.
/// Interrupts can be sent from any thread via an [`InterruptHandle`].
pub struct GdbConnection<C: SplitConnection = TcpStream> {
    config: Config,
    session: Session<C>,
    writer: SharedWriter<C::Writer>,
    recv: RecvPacketBlocking,
    // 0x03 received while waiting for an ack
    pending_interrupt: bool,
}

impl<C: SplitConnection> GdbConnection<C> {
    /// Helper method to construct a new [`GdbConnectionBuilder`].
    pub fn builder() -> GdbConnectionBuilder<C> {
        GdbConnectionBuilder::new()
    }

    /// Create a new `GdbConnection` for a target with the given byte order,
    /// using the default configuration.
    pub fn new(endian: Endianness) -> GdbConnection<C> {
        GdbConnection::from_config(Config::new(endian))
    }

    pub(crate) fn from_config(config: Config) -> GdbConnection<C> {
        GdbConnection {
            recv: RecvPacketBlocking::new(config.packet_buffer_size),
            config,
            session: Session::Unbound,
            writer: Arc::new(Mutex::new(None)),
            pending_interrupt: false,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// Byte order used for multi-byte values.
    pub fn endianness(&self) -> Endianness {
        self.config.endian
    }

    /// Start a session over an already established connection.
    pub fn attach(&mut self, mut conn: C) -> Result<(), Error<C::Error>> {
        if let Session::Connected { .. } = self.session {
            return Err(Error::AlreadyConnected);
        }

        let writer = match conn.on_session_start().and_then(|()| conn.split_writer()) {
            Ok(writer) => writer,
            Err(e) => {
                self.close();
                return Err(Error::ConnectionInit(e));
            }
        };

        *self.writer.lock() = Some(writer);
        self.pending_interrupt = false;
        self.session = Session::Connected {
            conn,
            ending: false,
        };
        info!("GDB session started");

        Ok(())
    }

    /// Obtain a handle which can interrupt the GDB client from any thread.
    ///
    /// Handles stay valid across sessions: they always target whichever
    /// session is currently active.
    pub fn interrupt_handle(&self) -> InterruptHandle<C::Writer> {
        InterruptHandle {
            writer: Arc::clone(&self.writer),
        }
    }

    /// Block until the client sends a request.
    ///
    /// Packets with a bad checksum are nack'd and never surfaced. A raw 0x03
    /// byte from the client is returned as [`Request::Interrupt`].
    pub fn process_request(&mut self) -> Result<Request, Error<C::Error>> {
        if let Session::Connected { ending: true, .. } = self.session {
            // the `k`/`D` request went unanswered
            self.close();
            return Err(Error::Closed);
        }
        self.check_connected()?;

        if self.pending_interrupt {
            self.pending_interrupt = false;
            return Ok(Request::Interrupt);
        }

        let res = self.recv_request();
        self.close_on_fatal(res)
    }

    /// Send a response, blocking until the client acknowledges it.
    ///
    /// Responses the client nacks are sent again, up to the configured
    /// `max_retransmits`.
    pub fn send_response(&mut self, response: &Response) -> Result<(), Error<C::Error>> {
        self.check_connected()?;

        let packet = response.to_packet(self.format());
        let res = self.send_packet(&packet);

        if let Session::Connected { ending: true, .. } = self.session {
            self.close();
            return match res {
                // clients usually hang up right after `k`
                Err(Error::ConnectionRead(_)) | Err(Error::ConnectionWrite(_)) => {
                    debug!("client hung up without acking the final response");
                    Ok(())
                }
                res => res,
            };
        }

        self.close_on_fatal(res)
    }

    /// Send the asynchronous interrupt byte (0x03). Does not wait for an ack.
    pub fn send_interrupt(&mut self) -> Result<(), Error<C::Error>> {
        self.check_connected()?;

        #[cfg(feature = "trace-pkt")]
        trace!("--> interrupt");

        let res = write_locked(&self.writer, &[INTERRUPT]);
        self.close_on_fatal(res)
    }

    /// End the current session (if any), shutting down the transport.
    ///
    /// Calling `disconnect` more than once is harmless.
    pub fn disconnect(&mut self) {
        self.close();
    }

    fn format(&self) -> ResponseFormat {
        ResponseFormat {
            endian: self.config.endian,
            register_width: self.config.register_width,
        }
    }

    fn check_connected(&self) -> Result<(), Error<C::Error>> {
        match self.session {
            Session::Connected { .. } => Ok(()),
            Session::Closed => Err(Error::Closed),
            Session::Unbound | Session::Listening(_) => Err(Error::NotConnected),
        }
    }

    fn close(&mut self) {
        if let Some(mut writer) = self.writer.lock().take() {
            let _ = writer.shutdown();
        }

        let prev = mem::replace(&mut self.session, Session::Closed);
        if let Session::Connected { mut conn, .. } = prev {
            let _ = conn.shutdown();
            info!("GDB session closed");
        }
    }

    fn close_on_fatal<T>(&mut self, res: Result<T, Error<C::Error>>) -> Result<T, Error<C::Error>> {
        if let Err(ref e) = res {
            if e.is_fatal() {
                self.close();
            }
        }
        res
    }

    fn write_raw(&self, bytes: &[u8]) -> Result<(), Error<C::Error>> {
        write_locked(&self.writer, bytes)
    }

    fn recv_frame(&mut self) -> Result<Frame, Error<C::Error>> {
        let conn = match &mut self.session {
            Session::Connected { conn, .. } => conn,
            _ => return Err(Error::Closed),
        };

        self.recv
            .recv(|| conn.read())
            .map_err(Error::ConnectionRead)
    }

    fn recv_request(&mut self) -> Result<Request, Error<C::Error>> {
        let mut naks = 0usize;
        loop {
            let pkt = match self.recv_frame()? {
                Frame::Interrupt => return Ok(Request::Interrupt),
                Frame::Packet(pkt) => pkt,
            };

            if !pkt.checksum_ok() {
                naks += 1;
                debug!(
                    "{}, requesting retransmission (#{})",
                    PacketParseError::MismatchedChecksum,
                    naks
                );
                self.write_raw(b"-")?;
                continue;
            }

            self.write_raw(b"+")?;

            if pkt.is_truncated() {
                warn!("{}", PacketParseError::Oversize { dropped: pkt.dropped });
                return Ok(Request::Malformed(
                    String::from_utf8_lossy(&pkt.payload).into_owned(),
                ));
            }

            let request = Request::from_payload(&pkt.payload, self.config.endian);
            if request.ends_session() {
                if let Session::Connected { ending, .. } = &mut self.session {
                    *ending = true;
                }
            }

            return Ok(request);
        }
    }

    fn send_packet(&mut self, packet: &[u8]) -> Result<(), Error<C::Error>> {
        let mut retransmits = 0;
        loop {
            self.write_raw(packet)?;
            if self.wait_for_ack()? {
                return Ok(());
            }

            retransmits += 1;
            if retransmits > self.config.max_retransmits {
                warn!("client nack'd the same packet {} times, giving up", retransmits);
                return Err(Error::TooManyRetransmits);
            }
            debug!(
                "client nack'd response, retransmitting ({}/{})",
                retransmits, self.config.max_retransmits
            );
        }
    }

    /// Returns `true` on `+`, `false` on `-`.
    fn wait_for_ack(&mut self) -> Result<bool, Error<C::Error>> {
        let conn = match &mut self.session {
            Session::Connected { conn, .. } => conn,
            _ => return Err(Error::Closed),
        };

        loop {
            match conn.read().map_err(Error::ConnectionRead)? {
                b'+' => return Ok(true),
                b'-' => return Ok(false),
                INTERRUPT => {
                    debug!("interrupt received while waiting for ack");
                    self.pending_interrupt = true;
                }
                #[cfg(feature = "trace-pkt")]
                other => trace!("ignoring {:#04x} while waiting for ack", other),
                #[cfg(not(feature = "trace-pkt"))]
                _ => {}
            }
        }
    }
}

impl GdbConnection<TcpStream> {
    /// Listen on `port` and block until a GDB client connects, returning the
    /// client's address.
    ///
    /// Passing port 0 picks an ephemeral port.
    pub fn initialize(&mut self, port: u16) -> Result<SocketAddr, Error<io::Error>> {
        if let Session::Connected { .. } = self.session {
            return Err(Error::AlreadyConnected);
        }

        let sockaddr = SocketAddr::new(self.config.bind_addr, port);
        let listener = TcpListener::bind(sockaddr).map_err(Error::Bind)?;
        let local = listener.local_addr().map_err(Error::Bind)?;

        self.session = Session::Listening(local.port());
        info!("Waiting for a GDB connection on {}...", local);

        let res = listener.accept().and_then(|(stream, addr)| {
            stream.set_read_timeout(self.config.read_timeout)?;
            Ok((stream, addr))
        });
        let (stream, addr) = match res {
            Ok(accepted) => accepted,
            Err(e) => {
                self.close();
                return Err(Error::ConnectionInit(e));
            }
        };
        info!("Debugger connected from {}", addr);

        self.attach(stream)?;
        Ok(addr)
    }
}

impl<C: SplitConnection> Drop for GdbConnection<C> {
    fn drop(&mut self) {
        self.close();
    }
}

/// A cloneable handle used to send interrupts to the GDB client from any
/// thread, e.g: while the session thread is blocked in
/// [`GdbConnection::process_request`].
pub struct InterruptHandle<W> {
    writer: SharedWriter<W>,
}

impl<W> Clone for InterruptHandle<W> {
    fn clone(&self) -> Self {
        InterruptHandle {
            writer: Arc::clone(&self.writer),
        }
    }
}

impl<W: Connection> InterruptHandle<W> {
    /// Send the asynchronous interrupt byte (0x03) to the client.
    ///
    /// Returns [`GdbConnectionError::Closed`] if there is no live session.
    pub fn send_interrupt(&self) -> Result<(), Error<W::Error>> {
        #[cfg(feature = "trace-pkt")]
        trace!("--> interrupt");

        write_locked(&self.writer, &[INTERRUPT])
    }
}
