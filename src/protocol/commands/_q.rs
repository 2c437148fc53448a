use super::prelude::*;
use crate::protocol::common::hex::decode_hex_to_ascii;

/// A general query (`q`) or set (`Q`) packet.
///
/// `command` is the query's name, including the leading `q`/`Q` (e.g:
/// `qSupported`). `extension` is whatever follows the first `:`, `,` or `;`
/// after the name, or empty if there is nothing.
///
/// The hex-encoded argument of `qRcmd` (i.e: `monitor` commands) is decoded
/// into plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub command: String,
    pub extension: String,
}

impl ParseCommand for Query {
    /// Unlike other commands, `body` includes the leading `q`/`Q`.
    fn from_packet(body: &[u8], _endian: Endianness) -> Option<Self> {
        let body = body_str(body)?;
        if body.len() < 2 {
            return None;
        }

        let (command, extension) = match body.find(|c| matches!(c, ':' | ',' | ';')) {
            Some(idx) => (&body[..idx], &body[idx + 1..]),
            None => (body, ""),
        };

        let extension = match command {
            "qRcmd" => decode_hex_to_ascii(extension.as_bytes()).ok()?,
            _ => extension.to_owned(),
        };

        Some(Query {
            command: command.to_owned(),
            extension,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &[u8]) -> Option<Query> {
        Query::from_packet(body, Endianness::Little)
    }

    fn query(command: &str, extension: &str) -> Option<Query> {
        Some(Query {
            command: command.into(),
            extension: extension.into(),
        })
    }

    #[test]
    fn plain_queries() {
        assert_eq!(parse(b"qSupported"), query("qSupported", ""));
        assert_eq!(parse(b"qfThreadInfo"), query("qfThreadInfo", ""));
        assert_eq!(parse(b"QStartNoAckMode"), query("QStartNoAckMode", ""));
    }

    #[test]
    fn queries_with_arguments() {
        assert_eq!(
            parse(b"qSupported:multiprocess+;swbreak+"),
            query("qSupported", "multiprocess+;swbreak+")
        );
        assert_eq!(
            parse(b"qXfer:features:read:target.xml:0,fff"),
            query("qXfer", "features:read:target.xml:0,fff")
        );
        assert_eq!(parse(b"qCRC,1000,4"), query("qCRC", "1000,4"));
    }

    #[test]
    fn monitor_command_is_decoded() {
        assert_eq!(parse(b"qRcmd,7265736574"), query("qRcmd", "reset"));
        assert_eq!(parse(b"qRcmd,6563686f20c3a9"), query("qRcmd", "echo \u{e9}"));
        assert_eq!(parse(b"qRcmd,72657"), None);
    }

    #[test]
    fn bare_letter_is_invalid() {
        assert_eq!(parse(b"q"), None);
    }
}
