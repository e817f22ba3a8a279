use crossbeam::channel::{Receiver, Sender};
use std::convert::Infallible;
use std::net::{SocketAddr, TcpListener};
use std::thread;
use tracing::{error, info};

use super::session::{Session, SessionSummary};
use super::{ListenerConfig, ListenerError, ListenerUpdate};

/// A bound socket that serves clients strictly one after another.
pub struct Listener {
    socket: TcpListener,
    addr: SocketAddr,
    config: ListenerConfig,
    updates: Option<Sender<ListenerUpdate>>,
}

impl Listener {
    pub fn bind(config: ListenerConfig) -> Result<Self, ListenerError> {
        config.validate()?;
        let addr = config.address();
        let socket = TcpListener::bind(&addr).map_err(|source| ListenerError::Bind {
            addr: addr.clone(),
            source,
        })?;
        let addr = socket
            .local_addr()
            .map_err(|source| ListenerError::Bind { addr, source })?;

        Ok(Self {
            socket,
            addr,
            config,
            updates: None,
        })
    }

    pub fn with_updates(mut self, tx: Sender<ListenerUpdate>) -> Self {
        self.updates = Some(tx);
        self
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn config(&self) -> &ListenerConfig {
        &self.config
    }

    /// Accept one client and serve it until it leaves. Accepting the next
    /// client only happens on the following call.
    pub fn serve_one(&self) -> Result<SessionSummary, ListenerError> {
        info!("waiting for a client connection");
        let (stream, peer) = self.socket.accept().map_err(ListenerError::Accept)?;
        info!(%peer, "client connected");
        self.notify(ListenerUpdate::ClientConnected { peer });

        Session::new(stream, peer, &self.config, self.updates.as_ref()).run()
    }

    /// Serve clients forever. Only returns when a fault other than a client
    /// disconnect occurs.
    pub fn run(&self) -> Result<Infallible, ListenerError> {
        info!(addr = %self.addr, "listening");
        self.notify(ListenerUpdate::Listening { addr: self.addr });

        loop {
            if let Err(e) = self.serve_one() {
                error!(error = %e, "listener stopped");
                self.notify(ListenerUpdate::Fault {
                    message: e.to_string(),
                });
                return Err(e);
            }
        }
    }

    fn notify(&self, update: ListenerUpdate) {
        if let Some(tx) = &self.updates {
            let _ = tx.send(update);
        }
    }
}

/// A serve loop running on its own thread.
pub struct ListenerHandle {
    pub local_addr: SocketAddr,
    pub update_rx: Receiver<ListenerUpdate>,
    thread: thread::JoinHandle<Result<Infallible, ListenerError>>,
}

impl ListenerHandle {
    /// Block until the serve loop dies and return the fault that stopped it.
    pub fn wait(self) -> ListenerError {
        match self.thread.join() {
            Ok(Err(e)) => e,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

/// Bind on the calling thread, so bind errors surface here, then serve on a
/// background thread.
pub fn spawn_listener(config: ListenerConfig) -> Result<ListenerHandle, ListenerError> {
    let (update_tx, update_rx) = crossbeam::channel::unbounded();
    let listener = Listener::bind(config)?.with_updates(update_tx);
    let local_addr = listener.local_addr();

    let thread = thread::Builder::new()
        .name("noteroll-listener".into())
        .spawn(move || listener.run())
        .map_err(ListenerError::Spawn)?;

    Ok(ListenerHandle {
        local_addr,
        update_rx,
        thread,
    })
}
