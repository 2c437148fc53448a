use std::net::Shutdown;
use std::os::unix::net::UnixStream;

use crate::conn::{Connection, ConnectionExt, SplitConnection};

impl Connection for UnixStream {
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

    fn shutdown(&mut self) -> Result<(), Self::Error> {
        match UnixStream::shutdown(self, Shutdown::Both) {
            Err(ref e) if e.kind() == std::io::ErrorKind::NotConnected => Ok(()),
            res => res,
        }
    }
}

impl ConnectionExt for UnixStream {
    fn read(&mut self) -> Result<u8, Self::Error> {
        use std::io::Read;

        let mut buf = [0u8];
        Read::read_exact(self, &mut buf)?;
        Ok(buf[0])
    }
}

impl SplitConnection for UnixStream {
    type Writer = UnixStream;

    fn split_writer(&mut self) -> Result<UnixStream, Self::Error> {
        self.try_clone()
    }
}

#[cfg(test)]
mod tests {
    use crate::{GdbConnection, Request, Response};
    use std::io::{Read, Write};
    use std::os::unix::net::UnixStream;

    #[test]
    fn session_over_socketpair() {
        let (stub_side, mut gdb_side) = UnixStream::pair().unwrap();

        let mut conn = GdbConnection::<UnixStream>::builder().build().unwrap();
        conn.attach(stub_side).unwrap();

        gdb_side.write_all(b"$?#3f").unwrap();
        assert_eq!(conn.process_request().unwrap(), Request::QueryLastSignal);

        gdb_side.write_all(b"+").unwrap();
        conn.send_response(&Response::Ok).unwrap();

        let mut buf = [0u8; 7];
        gdb_side.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"+$OK#9a");
    }
}
