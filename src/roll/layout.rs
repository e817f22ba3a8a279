use crate::notes::{MAX_PITCH, NoteDocument};

pub const KEY_HEIGHT: f32 = 20.0;
pub const NOTE_HEIGHT: f32 = 18.0;
/// Horizontal pixels per tick.
pub const TICK_SCALE: f32 = 0.1;
pub const GRID_WIDTH: f32 = 1600.0;

/// Margin, in semitones, around the notes in `RangeMode::Fixed`.
const FIXED_MARGIN: u8 = 2;
/// Pitch the window centers on when there are no notes.
const EMPTY_CENTER: u8 = 60;

/// How the visible pitch window is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeMode {
    /// A fixed margin around the lowest and highest note.
    Fixed,
    /// A margin that also grows to fill the viewport height.
    #[default]
    FillViewport,
}

/// Inclusive range of pitches that get a background row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PitchWindow {
    pub lower: u8,
    pub upper: u8,
}

impl PitchWindow {
    pub fn for_document(document: &NoteDocument, mode: RangeMode, viewport_height: f32) -> Self {
        let (min, max) = document
            .pitch_span()
            .unwrap_or((EMPTY_CENTER, EMPTY_CENTER));
        Self::around(min, max, mode, viewport_height)
    }

    pub fn around(min: u8, max: u8, mode: RangeMode, viewport_height: f32) -> Self {
        let (min, max) = (min.min(max), min.max(max));

        match mode {
            RangeMode::Fixed => Self {
                lower: min.saturating_sub(FIXED_MARGIN),
                upper: max.saturating_add(FIXED_MARGIN).min(MAX_PITCH),
            },
            RangeMode::FillViewport => {
                let rows_in_view = (viewport_height.max(0.0) / KEY_HEIGHT).floor() as u32;
                let visible = rows_in_view.max((max - min) as u32 + 4);
                let half = (visible / 2).min(u8::MAX as u32) as u8;
                Self {
                    lower: min.saturating_sub(half),
                    upper: max.saturating_add(half).min(MAX_PITCH),
                }
            }
        }
    }

    pub fn contains(&self, pitch: u8) -> bool {
        (self.lower..=self.upper).contains(&pitch)
    }

    pub fn row_count(&self) -> usize {
        (self.upper - self.lower) as usize + 1
    }

    /// Pitches top to bottom, the order rows appear on screen.
    pub fn rows(&self) -> impl Iterator<Item = u8> {
        (self.lower..=self.upper).rev()
    }
}

/// Top edge of a pitch's row. Higher pitches sit higher on screen.
pub fn row_top(pitch: u8) -> f32 {
    (MAX_PITCH - pitch.min(MAX_PITCH)) as f32 * KEY_HEIGHT
}

pub fn tick_to_x(tick: u32) -> f32 {
    tick as f32 * TICK_SCALE
}

/// Width of one beat in whole pixels, never zero.
pub fn beat_width(ppq: u32) -> u32 {
    ((ppq as f32 * TICK_SCALE) as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_window_adds_two_semitones() {
        let window = PitchWindow::around(60, 67, RangeMode::Fixed, 0.0);
        assert_eq!(window, PitchWindow { lower: 58, upper: 69 });
        assert_eq!(window.row_count(), 12);
    }

    #[test]
    fn test_fixed_window_ignores_viewport() {
        let small = PitchWindow::around(60, 67, RangeMode::Fixed, 100.0);
        let large = PitchWindow::around(60, 67, RangeMode::Fixed, 5000.0);
        assert_eq!(small, large);
    }

    #[test]
    fn test_fill_window_small_viewport_uses_span() {
        // span 7 + 4 = 11 rows beats 100 / 20 = 5 rows; half = 5
        let window = PitchWindow::around(60, 67, RangeMode::FillViewport, 100.0);
        assert_eq!(window, PitchWindow { lower: 55, upper: 72 });
    }

    #[test]
    fn test_fill_window_uses_viewport_rows() {
        // 600 / 20 = 30 rows; half = 15
        let window = PitchWindow::around(60, 67, RangeMode::FillViewport, 600.0);
        assert_eq!(window, PitchWindow { lower: 45, upper: 82 });
    }

    #[test]
    fn test_fill_window_grows_with_height() {
        let mut previous = PitchWindow::around(60, 67, RangeMode::FillViewport, 0.0);
        for height in (0..4000).step_by(7) {
            let window = PitchWindow::around(60, 67, RangeMode::FillViewport, height as f32);
            assert!(window.lower <= previous.lower);
            assert!(window.upper >= previous.upper);
            assert!(window.contains(58) && window.contains(69));
            previous = window;
        }
    }

    #[test]
    fn test_windows_clamp_to_midi_range() {
        let low = PitchWindow::around(0, 3, RangeMode::Fixed, 0.0);
        assert_eq!(low, PitchWindow { lower: 0, upper: 5 });

        let high = PitchWindow::around(120, 127, RangeMode::FillViewport, 10_000.0);
        assert_eq!(high.upper, 127);
        assert_eq!(high.lower, 0);
    }

    #[test]
    fn test_empty_document_centers_on_middle_c() {
        let doc = NoteDocument::new(Default::default(), Vec::new());
        let window = PitchWindow::for_document(&doc, RangeMode::Fixed, 0.0);
        assert_eq!(window, PitchWindow { lower: 58, upper: 62 });
    }

    #[test]
    fn test_rows_run_top_to_bottom() {
        let window = PitchWindow { lower: 58, upper: 60 };
        assert_eq!(window.rows().collect::<Vec<_>>(), vec![60, 59, 58]);
        assert!(row_top(60) < row_top(59));
        assert_eq!(row_top(127), 0.0);
        assert_eq!(row_top(60), 67.0 * KEY_HEIGHT);
    }

    #[test]
    fn test_beat_width() {
        assert_eq!(beat_width(960), 96);
        assert_eq!(beat_width(480), 48);
        assert_eq!(beat_width(1), 1);
    }
}
