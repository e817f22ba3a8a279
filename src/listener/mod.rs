// Blocking TCP chunk listener.
//
// One thread, one client at a time: `Listener::run` accepts a connection,
// hands it to a `Session` that reads, prints and acknowledges chunks until
// the client leaves, then goes back to `accept`. A second client waits in
// the kernel backlog until the first session ends. Reset and broken-pipe
// faults end only the session; anything else ends the serve loop.

mod config;
mod error;
mod events;
mod payload;
mod server;
mod session;

pub use config::{DEFAULT_ACK, DEFAULT_BUFFER_SIZE, DEFAULT_HOST, DEFAULT_PORT, ListenerConfig};
pub use error::ListenerError;
pub use events::{DisconnectReason, ListenerUpdate};
pub use payload::{Decoded, PayloadMode, decode, note_names, parse_note_numbers};
pub use server::{Listener, ListenerHandle, spawn_listener};
pub use session::SessionSummary;
