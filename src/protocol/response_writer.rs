use crate::conn::Connection;
use crate::protocol::common::checksum;
use crate::protocol::common::hex::{encode_hex_buf, nibble_to_char};

/// Newtype around a Connection error.
#[derive(Debug, Clone)]
pub struct Error<C>(pub C);

/// A wrapper around [`Connection`] that frames outgoing data as a
/// `$<payload>#<checksum>` packet, computing the checksum on the fly.
pub struct ResponseWriter<'a, C: Connection> {
    inner: &'a mut C,
    started: bool,
    checksum: u8,

    // buffer to log outgoing packets. only allocates if logging is enabled.
    #[cfg(feature = "trace-pkt")]
    msg: Vec<u8>,
}

impl<'a, C: Connection + 'a> ResponseWriter<'a, C> {
    /// Creates a new ResponseWriter
    pub fn new(inner: &'a mut C) -> Self {
        Self {
            inner,
            started: false,
            checksum: 0,

            #[cfg(feature = "trace-pkt")]
            msg: Vec::new(),
        }
    }

    /// Consumes self, writing out the final '#' and checksum
    pub fn flush(mut self) -> Result<(), Error<C::Error>> {
        // don't include the '#' in checksum calculation
        let checksum = self.checksum;
        self.start()?;
        self.inner.write(b'#').map_err(Error)?;
        self.inner
            .write_all(&checksum::to_digits(checksum))
            .map_err(Error)?;

        #[cfg(feature = "trace-pkt")]
        trace!("--> ${}#{:02x}", String::from_utf8_lossy(&self.msg), checksum);

        self.inner.flush().map_err(Error)?;

        Ok(())
    }

    fn start(&mut self) -> Result<(), Error<C::Error>> {
        if !self.started {
            self.started = true;
            self.inner.write(b'$').map_err(Error)?;
        }
        Ok(())
    }

    fn write(&mut self, byte: u8) -> Result<(), Error<C::Error>> {
        self.start()?;

        #[cfg(feature = "trace-pkt")]
        if log_enabled!(log::Level::Trace) {
            self.msg.push(byte)
        }

        self.checksum = self.checksum.wrapping_add(byte);
        self.inner.write(byte).map_err(Error)
    }

    /// Write an entire string over the connection.
    ///
    /// The string must not contain any of the packet's structural characters
    /// (`$`, `#`). Use [`write_escaped`](Self::write_escaped) for arbitrary
    /// text.
    pub fn write_str(&mut self, s: &str) -> Result<(), Error<C::Error>> {
        for b in s.as_bytes().iter() {
            self.write(*b)?;
        }
        Ok(())
    }

    /// Write a single byte as a hex string (two ascii chars)
    pub fn write_hex(&mut self, byte: u8) -> Result<(), Error<C::Error>> {
        self.write(nibble_to_char(byte >> 4))?;
        self.write(nibble_to_char(byte))
    }

    /// Write a byte-buffer as a hex string (i.e: two ascii chars / byte).
    pub fn write_hex_buf(&mut self, data: &[u8]) -> Result<(), Error<C::Error>> {
        self.write_str(&encode_hex_buf(data))
    }

    /// Write data with `#`, `$`, `}` and `*` escaped as `}` followed by the
    /// original byte xor 0x20.
    pub fn write_escaped(&mut self, data: &[u8]) -> Result<(), Error<C::Error>> {
        for &b in data.iter() {
            match b {
                b'#' | b'$' | b'}' | b'*' => {
                    self.write(b'}')?;
                    self.write(b ^ 0x20)?
                }
                _ => self.write(b)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_payload() {
        let mut out = Vec::new();
        let mut w = ResponseWriter::new(&mut out);
        w.write_str("OK").unwrap();
        w.flush().unwrap();
        assert_eq!(out, b"$OK#9a");
    }

    #[test]
    fn empty_payload() {
        let mut out = Vec::new();
        ResponseWriter::new(&mut out).flush().unwrap();
        assert_eq!(out, b"$#00");
    }

    #[test]
    fn escaped_data_is_checksummed_as_sent() {
        let mut out = Vec::new();
        let mut w = ResponseWriter::new(&mut out);
        w.write_escaped(b"a#b").unwrap();
        w.flush().unwrap();

        let body = b"a}\x03b";
        let mut expected = b"$".to_vec();
        expected.extend_from_slice(body);
        expected.push(b'#');
        expected.extend_from_slice(&checksum::to_digits(checksum::compute(body)));
        assert_eq!(out, expected);
    }
}
