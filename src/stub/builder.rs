use core::fmt::{self, Display};
use core::marker::PhantomData;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use crate::common::Endianness;
use crate::conn::SplitConnection;

use super::GdbConnection;

/// An error which may occur when building a [`GdbConnection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GdbConnectionBuilderError {
    /// `packet_buffer_size` must be non-zero.
    ZeroPacketBuffer,
    /// `register_width` must be between 1 and 8 bytes.
    InvalidRegisterWidth(usize),
    /// `read_timeout` must be non-zero (use `None` to disable it).
    ZeroReadTimeout,
}

impl Display for GdbConnectionBuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use self::GdbConnectionBuilderError::*;
        match self {
            ZeroPacketBuffer => write!(f, "`packet_buffer_size` must be non-zero."),
            InvalidRegisterWidth(n) => write!(
                f,
                "`register_width` must be between 1 and 8 bytes (got {}).",
                n
            ),
            ZeroReadTimeout => write!(f, "`read_timeout` must be non-zero."),
        }
    }
}

impl std::error::Error for GdbConnectionBuilderError {}

/// Knobs fixed for the lifetime of a [`GdbConnection`].
#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub endian: Endianness,
    pub packet_buffer_size: usize,
    pub max_retransmits: usize,
    pub register_width: usize,
    pub read_timeout: Option<Duration>,
    pub bind_addr: IpAddr,
}

impl Config {
    pub fn new(endian: Endianness) -> Config {
        Config {
            endian,
            // need to pick some arbitrary value to report to GDB
            // 4096 seems reasonable?
            packet_buffer_size: 4096,
            max_retransmits: 8,
            register_width: 4,
            read_timeout: None,
            bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
        }
    }
}

/// Helper to construct and customize [`GdbConnection`].
pub struct GdbConnectionBuilder<C> {
    config: Config,

    _conn: PhantomData<C>,
}

impl<C: SplitConnection> GdbConnectionBuilder<C> {
    /// Create a new `GdbConnectionBuilder` for a target with the host's byte
    /// order.
    pub fn new() -> GdbConnectionBuilder<C> {
        GdbConnectionBuilder {
            config: Config::new(Endianness::native()),

            _conn: PhantomData,
        }
    }

    /// Byte order used to render multi-byte values in packets. Defaults to
    /// the host's byte order.
    pub fn endianness(mut self, endian: Endianness) -> Self {
        self.config.endian = endian;
        self
    }

    /// Maximum payload size accepted from the client. Defaults to 4096 bytes.
    ///
    /// Larger packets are still acknowledged (if their checksum is valid),
    /// but are reported as [`Request::Malformed`](crate::Request::Malformed).
    pub fn packet_buffer_size(mut self, size: usize) -> Self {
        self.config.packet_buffer_size = size;
        self
    }

    /// How many times a response is re-sent after being nack'd before the
    /// session is abandoned. Defaults to 8.
    pub fn max_retransmits(mut self, n: usize) -> Self {
        self.config.max_retransmits = n;
        self
    }

    /// Width (in bytes) of the register values carried in
    /// [`Response::ThreadStop`](crate::Response::ThreadStop). Defaults to 4.
    pub fn register_width(mut self, bytes: usize) -> Self {
        self.config.register_width = bytes;
        self
    }

    /// Read timeout applied to connections accepted by
    /// [`initialize`](GdbConnection::initialize). An expired read ends the
    /// session. Defaults to no timeout.
    pub fn read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.read_timeout = timeout;
        self
    }

    /// Address [`initialize`](GdbConnection::initialize) listens on.
    /// Defaults to `127.0.0.1`.
    pub fn bind_addr(mut self, addr: IpAddr) -> Self {
        self.config.bind_addr = addr;
        self
    }

    /// Build the GdbConnection, returning an error if something went wrong.
    pub fn build(self) -> Result<GdbConnection<C>, GdbConnectionBuilderError> {
        if self.config.packet_buffer_size == 0 {
            return Err(GdbConnectionBuilderError::ZeroPacketBuffer);
        }
        if !(1..=8).contains(&self.config.register_width) {
            return Err(GdbConnectionBuilderError::InvalidRegisterWidth(
                self.config.register_width,
            ));
        }

        if self.config.read_timeout == Some(Duration::ZERO) {
            return Err(GdbConnectionBuilderError::ZeroReadTimeout);
        }

        Ok(GdbConnection::from_config(self.config))
    }
}

impl<C: SplitConnection> Default for GdbConnectionBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpStream;

    #[test]
    fn defaults() {
        let conn = GdbConnectionBuilder::<TcpStream>::new().build().unwrap();
        assert_eq!(conn.endianness(), Endianness::native());
        assert_eq!(conn.config.packet_buffer_size, 4096);
        assert_eq!(conn.config.max_retransmits, 8);
        assert_eq!(conn.config.register_width, 4);
    }

    #[test]
    fn rejects_bad_config() {
        let err = GdbConnectionBuilder::<TcpStream>::new()
            .packet_buffer_size(0)
            .build()
            .err();
        assert_eq!(err, Some(GdbConnectionBuilderError::ZeroPacketBuffer));

        let err = GdbConnectionBuilder::<TcpStream>::new()
            .register_width(16)
            .build()
            .err();
        assert_eq!(err, Some(GdbConnectionBuilderError::InvalidRegisterWidth(16)));

        let err = GdbConnectionBuilder::<TcpStream>::new()
            .read_timeout(Some(Duration::from_secs(0)))
            .build()
            .err();
        assert_eq!(err, Some(GdbConnectionBuilderError::ZeroReadTimeout));

        let ok = GdbConnectionBuilder::<TcpStream>::new()
            .read_timeout(Some(Duration::from_millis(1)))
            .build();
        assert!(ok.is_ok());
    }

    #[test]
    fn endianness_is_kept() {
        let conn = GdbConnectionBuilder::<TcpStream>::new()
            .endianness(Endianness::Big)
            .build()
            .unwrap();
        assert_eq!(conn.endianness(), Endianness::Big);
    }
}
