pub mod listener;
pub mod notes;
pub mod roll;
pub mod trace;
mod ui;

pub use listener::{Listener, ListenerConfig, ListenerError, spawn_listener};
pub use notes::{NoteDocument, NoteEvent, TrackMetadata, pitch_name};
pub use roll::RangeMode;
pub use ui::NoteRollApp;
