// Integration tests for the chunk listener.
//
// Each test binds a listener on an OS-chosen localhost port and talks to it
// with plain `TcpStream`s, waiting for every acknowledgment before sending
// the next chunk so each write arrives as its own read on the server side.

use std::io::{ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::thread;
use std::time::Duration;

use crossbeam::channel::Receiver;
use noteroll::listener::{
    DisconnectReason, Listener, ListenerConfig, ListenerUpdate, PayloadMode, spawn_listener,
};

const TIMEOUT: Duration = Duration::from_secs(5);

fn local_config() -> ListenerConfig {
    ListenerConfig {
        host: "127.0.0.1".into(),
        port: 0,
        ..ListenerConfig::default()
    }
}

fn connect(addr: SocketAddr) -> TcpStream {
    let stream = TcpStream::connect(addr).unwrap();
    stream.set_read_timeout(Some(TIMEOUT)).unwrap();
    stream
}

/// Send one chunk and return the reply.
fn exchange(stream: &mut TcpStream, text: &str) -> String {
    stream.write_all(text.as_bytes()).unwrap();
    read_ack(stream)
}

fn read_ack(stream: &mut TcpStream) -> String {
    let mut reply = [0u8; 9];
    stream.read_exact(&mut reply).unwrap();
    String::from_utf8(reply.to_vec()).unwrap()
}

fn next_update(rx: &Receiver<ListenerUpdate>) -> ListenerUpdate {
    rx.recv_timeout(TIMEOUT).expect("listener went quiet")
}

/// Skip updates until one matches, failing after the timeout.
fn wait_for(rx: &Receiver<ListenerUpdate>, matches: impl Fn(&ListenerUpdate) -> bool) -> ListenerUpdate {
    loop {
        let update = next_update(rx);
        if matches(&update) {
            return update;
        }
    }
}

#[test]
fn one_ack_per_chunk() {
    let handle = spawn_listener(local_config()).unwrap();
    let mut client = connect(handle.local_addr);

    assert_eq!(exchange(&mut client, "60,64,67"), "received\n");
    assert_eq!(exchange(&mut client, "  {\"type\": \"midi\"}\n"), "received\n");
    assert_eq!(exchange(&mut client, "third"), "received\n");

    assert!(matches!(
        next_update(&handle.update_rx),
        ListenerUpdate::Listening { .. }
    ));
    assert!(matches!(
        next_update(&handle.update_rx),
        ListenerUpdate::ClientConnected { .. }
    ));

    let mut texts = Vec::new();
    for _ in 0..3 {
        match next_update(&handle.update_rx) {
            ListenerUpdate::ChunkReceived { text, .. } => texts.push(text),
            other => panic!("expected ChunkReceived, got {other:?}"),
        }
    }
    // surrounding whitespace is stripped before printing
    assert_eq!(texts, vec!["60,64,67", "{\"type\": \"midi\"}", "third"]);
}

#[test]
fn closing_client_returns_to_accept() {
    let handle = spawn_listener(local_config()).unwrap();

    let mut first = connect(handle.local_addr);
    assert_eq!(exchange(&mut first, "hello"), "received\n");
    drop(first);

    let update = wait_for(&handle.update_rx, |u| {
        matches!(u, ListenerUpdate::ClientDisconnected { .. })
    });
    assert!(matches!(
        update,
        ListenerUpdate::ClientDisconnected {
            reason: DisconnectReason::Closed,
            ..
        }
    ));

    let mut second = connect(handle.local_addr);
    assert_eq!(exchange(&mut second, "hello again"), "received\n");

    // the serve loop is still alive and did not report a fault
    while let Ok(update) = handle.update_rx.try_recv() {
        assert!(!matches!(update, ListenerUpdate::Fault { .. }), "{update:?}");
    }
}

#[test]
fn reset_client_ends_only_its_session() {
    let handle = spawn_listener(local_config()).unwrap();

    let mut first = connect(handle.local_addr);
    first.write_all(b"hello").unwrap();
    wait_for(&handle.update_rx, |u| {
        matches!(u, ListenerUpdate::ChunkReceived { .. })
    });
    // Closing with the ack still unread makes the kernel send RST, not FIN.
    thread::sleep(Duration::from_millis(200));
    drop(first);

    let update = wait_for(&handle.update_rx, |u| {
        matches!(u, ListenerUpdate::ClientDisconnected { .. })
    });
    assert!(matches!(
        update,
        ListenerUpdate::ClientDisconnected {
            reason: DisconnectReason::Interrupted,
            ..
        }
    ));

    let mut second = connect(handle.local_addr);
    assert_eq!(exchange(&mut second, "still here"), "received\n");
    while let Ok(update) = handle.update_rx.try_recv() {
        assert!(!matches!(update, ListenerUpdate::Fault { .. }), "{update:?}");
    }
}

#[test]
fn second_client_waits_for_first() {
    let handle = spawn_listener(local_config()).unwrap();

    let mut first = connect(handle.local_addr);
    assert_eq!(exchange(&mut first, "first"), "received\n");

    // The kernel completes the handshake, but nobody reads from the second
    // connection until the first session is over.
    let mut second = connect(handle.local_addr);
    second.write_all(b"second").unwrap();
    second
        .set_read_timeout(Some(Duration::from_millis(300)))
        .unwrap();
    let mut reply = [0u8; 9];
    let err = second.read(&mut reply).unwrap_err();
    assert!(
        matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut),
        "unexpected error: {err}"
    );

    drop(first);

    second.set_read_timeout(Some(TIMEOUT)).unwrap();
    assert_eq!(read_ack(&mut second), "received\n");
}

#[test]
fn whitespace_only_chunk_ends_session() {
    let handle = spawn_listener(local_config()).unwrap();
    let mut client = connect(handle.local_addr);

    assert_eq!(exchange(&mut client, "notes"), "received\n");
    client.write_all(b"  \r\n\t").unwrap();

    let mut buf = [0u8; 16];
    assert_eq!(client.read(&mut buf).unwrap(), 0, "server should hang up");

    let update = wait_for(&handle.update_rx, |u| {
        matches!(u, ListenerUpdate::ClientDisconnected { .. })
    });
    assert!(matches!(
        update,
        ListenerUpdate::ClientDisconnected {
            reason: DisconnectReason::Closed,
            ..
        }
    ));
}

#[test]
fn serve_one_reports_session_summary() {
    let listener = Listener::bind(local_config()).unwrap();
    let addr = listener.local_addr();
    let server = thread::spawn(move || listener.serve_one());

    let mut client = connect(addr);
    assert_eq!(exchange(&mut client, "one"), "received\n");
    assert_eq!(exchange(&mut client, "two"), "received\n");
    let client_addr = client.local_addr().unwrap();
    drop(client);

    let summary = server.join().unwrap().unwrap();
    assert_eq!(summary.peer, client_addr);
    assert_eq!(summary.chunks, 2);
    assert_eq!(summary.reason, DisconnectReason::Closed);
}

#[test]
fn configured_ack_and_payload_mode() {
    let config = ListenerConfig {
        ack: "ok!!!!!!\n".into(),
        payload_mode: PayloadMode::Document,
        ..local_config()
    };
    let handle = spawn_listener(config).unwrap();
    let mut client = connect(handle.local_addr);

    // not a valid document, still acknowledged
    assert_eq!(exchange(&mut client, "60,64"), "ok!!!!!!\n");
    assert_eq!(
        exchange(
            &mut client,
            r#"{"metadata": {"bpm": 120, "ppq_resolution": 960}, "type": "midi", "data": []}"#
        ),
        "ok!!!!!!\n"
    );
}

#[test]
fn bind_conflict_is_reported() {
    let first = Listener::bind(local_config()).unwrap();
    let taken = ListenerConfig {
        port: first.local_addr().port(),
        ..local_config()
    };

    let err = Listener::bind(taken).err().expect("port should be in use");
    assert!(err.to_string().contains("failed to bind"), "{err}");
}
