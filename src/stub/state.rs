/// Lifecycle of a [`GdbConnection`](crate::GdbConnection).
///
/// ```text
/// Unbound --initialize--> Listening --accept--> Connected --> Closed
///                                                  ^             |
///                                                  +--initialize-+
/// ```
///
/// `Closed` is entered on `disconnect()`, after a `k`/`D` request has been
/// answered, or after any transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session has been started.
    Unbound,
    /// Waiting for GDB to connect on the given TCP port.
    Listening(u16),
    /// A GDB client is attached.
    Connected,
    /// The session is over. A new one can be started with `initialize` or
    /// `attach`.
    Closed,
}

/// The engine's private view of the session, owning the read half.
pub(crate) enum Session<C> {
    Unbound,
    Listening(u16),
    Connected {
        conn: C,
        /// Set once a `k` or `D` request has been handed out. The session
        /// closes after the next response.
        ending: bool,
    },
    Closed,
}

impl<C> Session<C> {
    pub fn state(&self) -> SessionState {
        match self {
            Session::Unbound => SessionState::Unbound,
            Session::Listening(port) => SessionState::Listening(*port),
            Session::Connected { .. } => SessionState::Connected,
            Session::Closed => SessionState::Closed,
        }
    }
}
