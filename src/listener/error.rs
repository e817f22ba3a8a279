use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to accept a connection: {0}")]
    Accept(#[source] io::Error),
    #[error("failed to start the listener thread: {0}")]
    Spawn(#[source] io::Error),
    #[error("connection with {peer} failed: {source}")]
    Connection {
        peer: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Faults that mean the peer went away mid-session rather than a server
/// failure.
pub(crate) fn is_disconnect(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::ConnectionReset | io::ErrorKind::BrokenPipe
    )
}
