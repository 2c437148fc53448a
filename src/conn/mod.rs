//! Traits to perform in-order, serial, byte-wise I/O.

mod impls;

/// A trait to perform in-order, serial, byte-wise I/O.
///
/// This trait is implemented for [`TcpStream`](std::net::TcpStream) and
/// [`UnixStream`](std::os::unix::net::UnixStream) (on unix systems), as well
/// as for `Vec<u8>` (which simply collects everything written to it).
pub trait Connection {
    /// Transport-specific error type.
    type Error;

    /// Write a single byte.
    fn write(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Write the entire buffer, blocking until complete.
    ///
    /// This method's default implementation calls `self.write()` on each byte
    /// in the buffer. This can be quite inefficient, so if a more efficient
    /// implementation exists (such as calling `write_all()` on an underlying
    /// `std::io::Write` object), this method should be overwritten.
    fn write_all(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
        for b in buf {
            self.write(*b)?;
        }
        Ok(())
    }

    /// Flush this Connection, ensuring that all intermediately buffered
    /// contents reach their destination.
    ///
    /// _Note:_ Not all `Connection`s have internal buffering. In these cases,
    /// it's fine to simply return `Ok(())`.
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Called at the start of a debugging session _before_ any GDB packets have
    /// been sent/received.
    ///
    /// This method's default implementation is a no-op.
    ///
    /// # Example
    ///
    /// The `on_session_start` implementation for `TcpStream` ensures that
    /// [`set_nodelay(true)`](std::net::TcpStream::set_nodelay)
    /// is called. The GDB remote serial protocol requires sending/receiving
    /// many small packets, so forgetting to enable `TCP_NODELAY` can result in
    /// a massively degraded debugging experience.
    fn on_session_start(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Tear down the underlying transport, unblocking any pending reads.
    ///
    /// Called when a session ends. This method's default implementation is a
    /// no-op.
    fn shutdown(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Extends [`Connection`] with a blocking `read` method.
pub trait ConnectionExt: Connection {
    /// Read a single byte, blocking until one is available.
    fn read(&mut self) -> Result<u8, Self::Error>;
}

/// A [`ConnectionExt`] which can hand out an independent write half.
///
/// A [`GdbConnection`](crate::GdbConnection) keeps the original connection
/// for reading, and moves the write half behind a lock shared with any
/// [`InterruptHandle`](crate::InterruptHandle)s, so that interrupts can be
/// delivered from other threads while the session is blocked in a read.
pub trait SplitConnection: ConnectionExt {
    /// The write half.
    type Writer: Connection<Error = Self::Error> + Send + 'static;

    /// Obtain a write half for the connection.
    fn split_writer(&mut self) -> Result<Self::Writer, Self::Error>;
}
