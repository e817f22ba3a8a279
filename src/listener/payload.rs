use serde::{Deserialize, Serialize};

use crate::notes::{DocumentError, MAX_PITCH, NoteDocument, pitch_name};

/// What, beyond printing it, the listener does with a received chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadMode {
    #[default]
    Raw,
    /// Comma-separated MIDI note numbers, e.g. `60,64,67`.
    NoteNumbers,
    /// A JSON note document.
    Document,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Notes(Vec<u8>),
    Document(NoteDocument),
}

pub fn decode(text: &str, mode: PayloadMode) -> Result<Option<Decoded>, DocumentError> {
    match mode {
        PayloadMode::Raw => Ok(None),
        PayloadMode::NoteNumbers => Ok(Some(Decoded::Notes(parse_note_numbers(text)))),
        PayloadMode::Document => NoteDocument::from_json_str(text).map(|d| Some(Decoded::Document(d))),
    }
}

/// Tokens that are not plain digits, or are above 127, are skipped.
pub fn parse_note_numbers(text: &str) -> Vec<u8> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|token| token.parse::<u8>().ok())
        .filter(|&pitch| pitch <= MAX_PITCH)
        .collect()
}

pub fn note_names(pitches: &[u8]) -> String {
    pitches
        .iter()
        .map(|&pitch| pitch_name(pitch))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_note_numbers() {
        assert_eq!(parse_note_numbers("60,64,67"), vec![60, 64, 67]);
        assert_eq!(parse_note_numbers(" 60 , 62,"), vec![60, 62]);
        assert_eq!(parse_note_numbers("60,-1,x,300,128,127"), vec![60, 127]);
        assert!(parse_note_numbers("hello").is_empty());
    }

    #[test]
    fn test_note_names() {
        assert_eq!(note_names(&[60, 64, 67]), "C4, E4, G4");
        assert_eq!(note_names(&[]), "");
    }

    #[test]
    fn test_raw_mode_decodes_nothing() {
        assert_eq!(decode("60,64", PayloadMode::Raw).unwrap(), None);
    }

    #[test]
    fn test_document_mode() {
        let text = r#"{"metadata": {"bpm": 100, "ppq_resolution": 480}, "type": "midi",
            "data": [{"pitch": 72, "start_ppq": 0, "end_ppq": 480, "velocity": 90, "mute": false}]}"#;
        match decode(text, PayloadMode::Document).unwrap() {
            Some(Decoded::Document(doc)) => {
                assert_eq!(doc.notes.len(), 1);
                assert_eq!(doc.metadata.ppq, 480);
            }
            other => panic!("expected a document, got {other:?}"),
        }

        assert!(decode("60,64", PayloadMode::Document).is_err());
    }
}
