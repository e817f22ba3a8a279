mod document;
mod event;
mod pitch;

pub use document::{DocumentError, NoteDocument};
pub use event::{NoteEvent, TrackMetadata};
pub use pitch::{MAX_PITCH, is_black_key, octave, pitch_class, pitch_name};
