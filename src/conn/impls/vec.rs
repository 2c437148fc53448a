use core::convert::Infallible;

use crate::conn::Connection;

/// Collects everything written to it, e.g: to render a packet into memory.
impl Connection for Vec<u8> {
    type Error = Infallible;

    fn write(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.push(byte);
        Ok(())
    }

    fn write_all(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
        self.extend_from_slice(buf);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
