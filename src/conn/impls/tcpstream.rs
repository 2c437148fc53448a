use std::net::{Shutdown, TcpStream};

use crate::conn::{Connection, ConnectionExt, SplitConnection};

impl Connection for TcpStream {
    type Error = std::io::Error;

    fn write(&mut self, byte: u8) -> Result<(), Self::Error> {
        use std::io::Write;

        Write::write_all(self, &[byte])
    }

    fn write_all(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
        use std::io::Write;

        Write::write_all(self, buf)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        use std::io::Write;

        Write::flush(self)
    }

    fn on_session_start(&mut self) -> Result<(), Self::Error> {
        self.set_nodelay(true)
    }

    fn shutdown(&mut self) -> Result<(), Self::Error> {
        match TcpStream::shutdown(self, Shutdown::Both) {
            // the peer may have already hung up
            Err(ref e) if e.kind() == std::io::ErrorKind::NotConnected => Ok(()),
            res => res,
        }
    }
}

impl ConnectionExt for TcpStream {
    fn read(&mut self) -> Result<u8, Self::Error> {
        use std::io::Read;

        let mut buf = [0u8];
        Read::read_exact(self, &mut buf)?;
        Ok(buf[0])
    }
}

impl SplitConnection for TcpStream {
    type Writer = TcpStream;

    fn split_writer(&mut self) -> Result<TcpStream, Self::Error> {
        self.try_clone()
    }
}
