// Blocking chunk listener.
//
// Usage:
//   noteroll-listener [CONFIG]
//     CONFIG    RON listener config (default: 0.0.0.0:12345, ack "received\n")

use std::path::Path;

use noteroll::{Listener, ListenerConfig, trace};

fn main() {
    trace::setup();

    let config = match parse_args() {
        Some(path) => ListenerConfig::load(Path::new(&path)).unwrap_or_else(|e| {
            eprintln!("{e}");
            std::process::exit(1);
        }),
        None => ListenerConfig::default(),
    };

    let listener = Listener::bind(config).unwrap_or_else(|e| {
        eprintln!("Failed to start listener: {e}");
        std::process::exit(1);
    });

    println!("Listening on {}", listener.local_addr());

    let Err(e) = listener.run();
    eprintln!("Listener stopped: {e}");
    std::process::exit(1);
}

fn parse_args() -> Option<String> {
    let mut config = None;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
            path if config.is_none() => config = Some(path.to_owned()),
            _ => {
                eprintln!("Only one config file can be given");
                std::process::exit(1);
            }
        }
    }

    config
}

fn print_usage() {
    println!("Usage: noteroll-listener [CONFIG]");
    println!();
    println!("Options:");
    println!("  CONFIG        RON listener config (default: 0.0.0.0:12345)");
    println!("  --help, -h    Show this help");
}
