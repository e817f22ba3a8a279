// Piano-roll viewer.
//
// Usage:
//   noteroll [--fixed | --fill] [DOCUMENT]
//     --fixed     Show two semitones around the notes
//     --fill      Also grow the pitch range to fill the window (default)
//     DOCUMENT    A .ron or .json note document (default: built-in melody)

use std::path::PathBuf;

use noteroll::{NoteDocument, NoteRollApp, RangeMode, trace};
use tracing::info;

struct Args {
    mode: RangeMode,
    document: Option<PathBuf>,
}

fn main() {
    trace::setup();
    let args = parse_args();

    let document = match &args.document {
        Some(path) => match NoteDocument::load(path) {
            Ok(document) => document,
            Err(e) => {
                eprintln!("Failed to load {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => NoteDocument::demo(),
    };
    info!(
        notes = document.notes.len(),
        mode = ?args.mode,
        "opening piano roll"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 600.0])
            .with_title("Piano Roll"),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "noteroll",
        options,
        Box::new(move |_cc| Ok(Box::new(NoteRollApp::new(document, args.mode)))),
    ) {
        eprintln!("Failed to open window: {e}");
        std::process::exit(1);
    }
}

fn parse_args() -> Args {
    let mut args = Args {
        mode: RangeMode::FillViewport,
        document: None,
    };

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--fixed" => args.mode = RangeMode::Fixed,
            "--fill" => args.mode = RangeMode::FillViewport,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
            path => {
                if args.document.is_some() {
                    eprintln!("Only one document can be shown");
                    std::process::exit(1);
                }
                args.document = Some(PathBuf::from(path));
            }
        }
    }

    args
}

fn print_usage() {
    println!("Usage: noteroll [--fixed | --fill] [DOCUMENT]");
    println!();
    println!("Options:");
    println!("  --fixed       Show two semitones around the notes");
    println!("  --fill        Grow the pitch range to fill the window (default)");
    println!("  DOCUMENT      .ron or .json note document (default: built-in melody)");
    println!("  --help, -h    Show this help");
}
