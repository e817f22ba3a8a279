// One accepted client, served to completion on the calling thread.
//
// Each `read` is treated as a whole chunk: it is decoded (lossily) as text,
// trimmed, printed, and answered with the configured acknowledgment. Nothing
// realigns reads with message boundaries, so a chunk may hold part of a
// message or several of them. A chunk that trims to nothing ends the session
// the same way EOF does.

use crossbeam::channel::Sender;
use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream};
use tracing::{debug, info, warn};

use super::error::is_disconnect;
use super::payload::{self, Decoded};
use super::{DisconnectReason, ListenerConfig, ListenerError, ListenerUpdate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub peer: SocketAddr,
    /// Chunks acknowledged before the session ended.
    pub chunks: usize,
    pub reason: DisconnectReason,
}

pub(crate) struct Session<'a> {
    stream: TcpStream,
    peer: SocketAddr,
    config: &'a ListenerConfig,
    updates: Option<&'a Sender<ListenerUpdate>>,
}

impl<'a> Session<'a> {
    pub fn new(
        stream: TcpStream,
        peer: SocketAddr,
        config: &'a ListenerConfig,
        updates: Option<&'a Sender<ListenerUpdate>>,
    ) -> Self {
        Self {
            stream,
            peer,
            config,
            updates,
        }
    }

    pub fn run(mut self) -> Result<SessionSummary, ListenerError> {
        let mut buffer = vec![0u8; self.config.buffer_size];
        let mut chunks = 0;

        let reason = loop {
            match self.exchange(&mut buffer) {
                Ok(Some(text)) => {
                    chunks += 1;
                    self.notify(ListenerUpdate::ChunkReceived {
                        peer: self.peer,
                        text,
                    });
                }
                Ok(None) => {
                    info!(peer = %self.peer, "client disconnected");
                    break DisconnectReason::Closed;
                }
                Err(e) => break end_reason(self.peer, e)?,
            }
        };

        self.notify(ListenerUpdate::ClientDisconnected {
            peer: self.peer,
            reason,
        });

        Ok(SessionSummary {
            peer: self.peer,
            chunks,
            reason,
        })
    }

    /// Read one chunk and answer it. `None` means the session is over.
    fn exchange(&mut self, buffer: &mut [u8]) -> io::Result<Option<String>> {
        let len = self.read_chunk(buffer)?;
        let decoded = String::from_utf8_lossy(&buffer[..len]);
        let text = decoded.trim();
        if text.is_empty() {
            return Ok(None);
        }

        println!("{text}");
        self.inspect(text);

        self.stream.write_all(self.config.ack.as_bytes())?;
        Ok(Some(text.to_owned()))
    }

    fn read_chunk(&mut self, buffer: &mut [u8]) -> io::Result<usize> {
        loop {
            match self.stream.read(buffer) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                result => return result,
            }
        }
    }

    fn inspect(&self, text: &str) {
        match payload::decode(text, self.config.payload_mode) {
            Ok(None) => {}
            Ok(Some(Decoded::Notes(pitches))) => {
                info!(peer = %self.peer, "received notes: {}", payload::note_names(&pitches));
            }
            Ok(Some(Decoded::Document(document))) => {
                info!(
                    peer = %self.peer,
                    kind = %document.kind,
                    notes = document.notes.len(),
                    "received note document"
                );
            }
            Err(e) => {
                warn!(peer = %self.peer, error = %e, "chunk is not a note document");
            }
        }
        debug!(peer = %self.peer, bytes = text.len(), "chunk received");
    }

    fn notify(&self, update: ListenerUpdate) {
        if let Some(tx) = self.updates {
            let _ = tx.send(update);
        }
    }
}

/// A peer that resets or vanishes ends only its own session. Any other I/O
/// fault is the listener's problem.
fn end_reason(peer: SocketAddr, error: io::Error) -> Result<DisconnectReason, ListenerError> {
    if is_disconnect(&error) {
        warn!(%peer, %error, "client connection interrupted");
        Ok(DisconnectReason::Interrupted)
    } else {
        Err(ListenerError::Connection {
            peer,
            source: error,
        })
    }
}
