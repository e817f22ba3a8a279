use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::{MAX_PITCH, NoteEvent, TrackMetadata};

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid RON document: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("failed to encode RON document: {0}")]
    RonEncode(#[from] ron::Error),
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported document format for {0} (expected .ron or .json)")]
    UnsupportedFormat(PathBuf),
    #[error("note {index}: {reason}")]
    InvalidNote { index: usize, reason: String },
    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Ron,
    Json,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self, DocumentError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("ron") => Ok(Format::Ron),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Format::Json),
            _ => Err(DocumentError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// A track's worth of notes plus the timing metadata needed to place them.
///
/// The serialized shape matches the payload the DAW-side script sends:
/// `{"metadata": {"bpm", "ppq_resolution"}, "type": "midi", "data": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteDocument {
    pub metadata: TrackMetadata,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    #[serde(rename = "data")]
    pub notes: Vec<NoteEvent>,
}

fn default_kind() -> String {
    "midi".into()
}

impl NoteDocument {
    pub fn new(metadata: TrackMetadata, notes: Vec<NoteEvent>) -> Self {
        Self {
            metadata,
            kind: default_kind(),
            notes,
        }
    }

    /// Two bars of C-G-F-E, played twice.
    pub fn demo() -> Self {
        let notes = [
            (60, 0, 2744),
            (67, 2880, 3659),
            (65, 3840, 6708),
            (64, 6720, 7703),
            (60, 7680, 10547),
            (67, 10560, 11338),
            (65, 11520, 14346),
            (64, 14400, 15360),
        ]
        .into_iter()
        .map(|(pitch, start, end)| NoteEvent::new(pitch, start, end))
        .collect();

        Self::new(TrackMetadata::default(), notes)
    }

    pub fn pitch_span(&self) -> Option<(u8, u8)> {
        let min = self.notes.iter().map(|n| n.pitch).min()?;
        let max = self.notes.iter().map(|n| n.pitch).max()?;
        Some((min, max))
    }

    pub fn validate(&self) -> Result<(), DocumentError> {
        if !(self.metadata.tempo.is_finite() && self.metadata.tempo > 0.0) {
            return Err(DocumentError::InvalidMetadata(format!(
                "tempo must be positive, got {}",
                self.metadata.tempo
            )));
        }
        if self.metadata.ppq == 0 {
            return Err(DocumentError::InvalidMetadata(
                "ppq_resolution must be positive".into(),
            ));
        }

        for (index, note) in self.notes.iter().enumerate() {
            let reason = if note.pitch > MAX_PITCH {
                format!("pitch {} is out of range 0-127", note.pitch)
            } else if note.velocity > 127 {
                format!("velocity {} is out of range 0-127", note.velocity)
            } else if note.start >= note.end {
                format!("start {} is not before end {}", note.start, note.end)
            } else {
                continue;
            };
            return Err(DocumentError::InvalidNote { index, reason });
        }

        Ok(())
    }

    pub fn from_json_str(text: &str) -> Result<Self, DocumentError> {
        let document: NoteDocument = serde_json::from_str(text)?;
        document.validate()?;
        Ok(document)
    }

    pub fn from_ron_str(text: &str) -> Result<Self, DocumentError> {
        let document: NoteDocument = ron::from_str(text)?;
        document.validate()?;
        Ok(document)
    }

    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let format = Format::from_path(path)?;
        let text = fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match format {
            Format::Ron => Self::from_ron_str(&text),
            Format::Json => Self::from_json_str(&text),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        let text = match Format::from_path(path)? {
            Format::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?,
            Format::Json => serde_json::to_string_pretty(self)?,
        };

        fs::write(path, text).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
