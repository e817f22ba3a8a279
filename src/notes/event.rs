use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    pub pitch: u8,
    #[serde(rename = "start_ppq")]
    pub start: u32,
    #[serde(rename = "end_ppq")]
    pub end: u32,
    pub velocity: u8,
    #[serde(rename = "mute", default)]
    pub muted: bool,
}

impl NoteEvent {
    pub fn new(pitch: u8, start: u32, end: u32) -> Self {
        Self {
            pitch,
            start,
            end,
            velocity: 127,
            muted: false,
        }
    }

    pub fn duration(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackMetadata {
    #[serde(rename = "bpm")]
    pub tempo: f32,
    /// Ticks per quarter note.
    #[serde(rename = "ppq_resolution")]
    pub ppq: u32,
}

impl Default for TrackMetadata {
    fn default() -> Self {
        Self {
            tempo: 120.0,
            ppq: 960,
        }
    }
}
