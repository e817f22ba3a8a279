use std::net::SocketAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisconnectReason {
    /// The peer closed the connection, or sent a chunk that was empty once
    /// trimmed.
    Closed,
    /// The connection was reset or the pipe broke.
    Interrupted,
}

/// Progress reports from the serve loop, for whoever holds the receiver.
#[derive(Debug, Clone, PartialEq)]
pub enum ListenerUpdate {
    Listening { addr: SocketAddr },
    ClientConnected { peer: SocketAddr },
    ChunkReceived { peer: SocketAddr, text: String },
    ClientDisconnected {
        peer: SocketAddr,
        reason: DisconnectReason,
    },
    Fault { message: String },
}
