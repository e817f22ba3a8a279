const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

pub const MAX_PITCH: u8 = 127;

pub fn pitch_class(pitch: u8) -> u8 {
    pitch % 12
}

pub fn octave(pitch: u8) -> i32 {
    (pitch / 12) as i32 - 1
}

/// Letter name plus octave, with middle C (60) as "C4".
pub fn pitch_name(pitch: u8) -> String {
    format!("{}{}", NOTE_NAMES[pitch_class(pitch) as usize], octave(pitch))
}

pub fn is_black_key(pitch: u8) -> bool {
    matches!(pitch_class(pitch), 1 | 3 | 6 | 8 | 10)
}
