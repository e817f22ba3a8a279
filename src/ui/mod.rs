mod piano_roll;

use crate::notes::NoteDocument;
use crate::roll::{self, PitchWindow, RangeMode, Viewport};
use eframe::egui;
use piano_roll::{PianoRoll, PianoRollState};
use tracing::debug;

/// Shows one note document as a read-only piano roll. The scene is laid out
/// again every frame, so `RangeMode::FillViewport` follows window resizes.
pub struct NoteRollApp {
    document: NoteDocument,
    mode: RangeMode,
    state: PianoRollState,
    last_window: Option<PitchWindow>,
}

impl NoteRollApp {
    pub fn new(document: NoteDocument, mode: RangeMode) -> Self {
        Self {
            document,
            mode,
            state: PianoRollState::for_mode(mode),
            last_window: None,
        }
    }
}

impl eframe::App for NoteRollApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let viewport = Viewport {
                    height: ui.available_height(),
                };
                let scene = roll::render(&self.document, self.mode, viewport);

                if self.last_window != Some(scene.window) {
                    debug!(
                        lower = scene.window.lower,
                        upper = scene.window.upper,
                        "pitch window changed"
                    );
                    self.last_window = Some(scene.window);
                }

                PianoRoll::new(&scene, &mut self.state).show(ui);
            });
    }
}
