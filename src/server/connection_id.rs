use std::net::SocketAddr;

use uuid::Uuid;

/// Identifier attached to every log line emitted while serving a connection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    /// Creates a new random connection ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Creates the tracing span a connection's handler runs in
pub fn connection_span(connection_id: ConnectionId, peer: SocketAddr) -> tracing::Span {
    tracing::info_span!(
        "connection",
        connection_id = %connection_id,
        peer = %peer,
    )
}
