use core::fmt::{self, Debug, Display};

/// An error which may occur during a GDB debugging session.
///
/// Aside from `Bind`, `AlreadyConnected` and `NotConnected`, every error ends
/// the session: the connection transitions to
/// [`SessionState::Closed`](crate::SessionState::Closed) and all further
/// calls return [`GdbConnectionError::Closed`].
#[derive(Debug)]
#[non_exhaustive]
pub enum GdbConnectionError<C> {
    /// Could not bind the listening socket.
    Bind(std::io::Error),
    /// Connection Error while initializing the session.
    ConnectionInit(C),
    /// Connection Error while reading request.
    ConnectionRead(C),
    /// Connection Error while writing response.
    ConnectionWrite(C),
    /// Client nack'd the same packet more times than allowed.
    TooManyRetransmits,
    /// The session has been closed (explicitly, by the client, or because of
    /// an earlier error).
    Closed,
    /// Tried to start a session while one is still active.
    AlreadyConnected,
    /// No session has been started yet.
    NotConnected,
}

impl<C> GdbConnectionError<C> {
    /// Whether this error ended the session.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            GdbConnectionError::Bind(_)
                | GdbConnectionError::AlreadyConnected
                | GdbConnectionError::NotConnected
        )
    }
}

impl<C> Display for GdbConnectionError<C>
where
    C: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use self::GdbConnectionError::*;
        match self {
            Bind(e) => write!(f, "Could not bind listening socket: {}", e),
            ConnectionInit(e) => write!(f, "Connection Error while initializing the session: {:?}", e),
            ConnectionRead(e) => write!(f, "Connection Error while reading request: {:?}", e),
            ConnectionWrite(e) => write!(f, "Connection Error while writing response: {:?}", e),
            TooManyRetransmits => write!(f, "Client nack'd the same packet too many times."),
            Closed => write!(f, "The GDB session has been closed."),
            AlreadyConnected => write!(f, "A GDB session is already active."),
            NotConnected => write!(f, "No GDB session has been started."),
        }
    }
}

impl<C> std::error::Error for GdbConnectionError<C> where C: Debug {}
