use crate::protocol::common::checksum;

/// The out-of-band byte GDB sends to interrupt a running target.
pub const INTERRUPT: u8 = 0x03;

/// A single unit of inbound traffic.
#[derive(Debug, PartialEq, Eq)]
pub enum Frame {
    /// A raw 0x03 byte, received outside of any packet.
    Interrupt,
    /// A `$<payload>#<checksum>` packet. The checksum has _not_ been checked.
    Packet(RecvPacket),
}

/// A packet as received off the wire.
#[derive(Debug, PartialEq, Eq)]
pub struct RecvPacket {
    /// Payload bytes, up to the configured packet size limit.
    pub payload: Vec<u8>,
    /// Number of payload bytes which didn't fit and were dropped.
    pub dropped: usize,
    sum: u8,
    checksum: [u8; 2],
}

impl RecvPacket {
    /// Whether the trailing checksum digits match the payload that was sent
    /// (including any dropped bytes).
    pub fn checksum_ok(&self) -> bool {
        if self.is_truncated() {
            checksum::matches_sum(self.sum, self.checksum)
        } else {
            checksum::verify(&self.payload, self.checksum)
        }
    }

    pub fn is_truncated(&self) -> bool {
        self.dropped != 0
    }
}

/// Receives a packet by pulling data from a callback (typically backed by a
/// blocking `ConnectionExt::read`).
pub struct RecvPacketBlocking {
    max_len: usize,
}

impl RecvPacketBlocking {
    pub fn new(max_len: usize) -> Self {
        RecvPacketBlocking { max_len }
    }

    pub fn recv<C>(&mut self, mut get_byte: impl FnMut() -> Result<u8, C>) -> Result<Frame, C> {
        // hunt for the start of a packet
        loop {
            match get_byte()? {
                b'$' => break,
                INTERRUPT => {
                    #[cfg(feature = "trace-pkt")]
                    trace!("<-- interrupt");

                    return Ok(Frame::Interrupt);
                }
                #[cfg(feature = "trace-pkt")]
                other => trace!("discarding {:#04x} outside of a packet", other),
                #[cfg(not(feature = "trace-pkt"))]
                _ => {}
            }
        }

        // read the packet body
        let mut payload = Vec::new();
        let mut dropped = 0;
        let mut sum = 0u8;
        loop {
            let c = get_byte()?;
            if c == b'#' {
                break;
            }
            sum = sum.wrapping_add(c);
            if payload.len() < self.max_len {
                payload.push(c);
            } else {
                dropped += 1;
            }
        }

        // read the checksum as well
        let checksum = [get_byte()?, get_byte()?];

        #[cfg(feature = "trace-pkt")]
        trace!(
            "<-- ${}#{}",
            String::from_utf8_lossy(&payload),
            String::from_utf8_lossy(&checksum)
        );

        Ok(Frame::Packet(RecvPacket {
            payload,
            dropped,
            sum,
            checksum,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recv_all(input: &[u8], max_len: usize) -> Vec<Frame> {
        let mut bytes = input.iter().copied();
        let mut recv = RecvPacketBlocking::new(max_len);
        let mut frames = Vec::new();
        while let Ok(frame) = recv.recv(|| bytes.next().ok_or(())) {
            frames.push(frame);
        }
        frames
    }

    fn packet(frame: &Frame) -> &RecvPacket {
        match frame {
            Frame::Packet(pkt) => pkt,
            Frame::Interrupt => panic!("expected a packet"),
        }
    }

    #[test]
    fn skips_noise_before_packet() {
        let frames = recv_all(b"+-xyz$OK#9a", 64);
        assert_eq!(frames.len(), 1);
        let pkt = packet(&frames[0]);
        assert_eq!(pkt.payload, b"OK");
        assert!(pkt.checksum_ok());
    }

    #[test]
    fn interrupt_outside_packet() {
        let frames = recv_all(b"\x03$OK#9a\x03", 64);
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0], Frame::Interrupt);
        assert_eq!(packet(&frames[1]).payload, b"OK");
        assert_eq!(frames[2], Frame::Interrupt);
    }

    #[test]
    fn dollar_and_interrupt_inside_packet_are_payload() {
        let body = b"a$b\x03c";
        let mut input = b"$".to_vec();
        input.extend_from_slice(body);
        input.push(b'#');
        input.extend_from_slice(&checksum::to_digits(checksum::compute(body)));

        let frames = recv_all(&input, 64);
        assert_eq!(frames.len(), 1);
        let pkt = packet(&frames[0]);
        assert_eq!(pkt.payload, body);
        assert!(pkt.checksum_ok());
    }

    #[test]
    fn bad_checksum_is_reported() {
        let frames = recv_all(b"$OK#00", 64);
        assert!(!packet(&frames[0]).checksum_ok());

        let frames = recv_all(b"$OK#zz", 64);
        assert!(!packet(&frames[0]).checksum_ok());
    }

    #[test]
    fn oversize_packet_is_still_checksummed() {
        let frames = recv_all(b"$OK#9a", 1);
        let pkt = packet(&frames[0]);
        assert_eq!(pkt.payload, b"O");
        assert_eq!(pkt.dropped, 1);
        assert!(pkt.is_truncated());
        assert!(pkt.checksum_ok());
    }

    #[test]
    fn checksum_covers_payload_and_dropped_bytes() {
        let frames = recv_all(b"$m1000,4#8e", 64);
        let pkt = packet(&frames[0]);
        assert_eq!(pkt.payload, b"m1000,4");
        assert!(!pkt.is_truncated());
        assert!(pkt.checksum_ok());

        let frames = recv_all(b"$OK#9b", 1);
        assert!(packet(&frames[0]).is_truncated());
        assert!(!packet(&frames[0]).checksum_ok());
    }

    #[test]
    fn eof_mid_packet_is_an_error() {
        let mut bytes = b"$OK#9".iter().copied();
        let mut recv = RecvPacketBlocking::new(64);
        assert_eq!(recv.recv(|| bytes.next().ok_or("eof")), Err("eof"));
    }
}
