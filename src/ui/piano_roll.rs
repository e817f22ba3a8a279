use crate::roll::{DrawCommand, RangeMode, Rect, Rgb, Scene};
use eframe::egui;

const MIN_ZOOM: f32 = 0.25;
const MAX_ZOOM: f32 = 8.0;

#[derive(Clone)]
pub struct PianoRollState {
    pub zoom: f32,
    /// Scroll to the scene's focus point on the next frame.
    pub center_pending: bool,
}

impl PianoRollState {
    pub fn for_mode(mode: RangeMode) -> Self {
        let zoom = match mode {
            RangeMode::Fixed => 1.2,
            RangeMode::FillViewport => 1.0,
        };
        Self {
            zoom,
            center_pending: mode == RangeMode::FillViewport,
        }
    }
}

pub struct PianoRoll<'a> {
    scene: &'a Scene,
    state: &'a mut PianoRollState,
}

impl<'a> PianoRoll<'a> {
    pub fn new(scene: &'a Scene, state: &'a mut PianoRollState) -> Self {
        Self { scene, state }
    }

    pub fn show(mut self, ui: &mut egui::Ui) -> egui::Response {
        self.handle_zoom(ui);

        let extent = self.scene.extent();
        let zoom = self.state.zoom;
        let viewport_height = ui.available_height();

        let mut area = egui::ScrollArea::both()
            .auto_shrink([false, false])
            .scroll_bar_visibility(egui::scroll_area::ScrollBarVisibility::AlwaysVisible);

        if self.state.center_pending {
            let focus_y = (self.scene.focus.y - extent.y) * zoom - viewport_height / 2.0;
            area = area.scroll_offset(egui::Vec2::new(0.0, focus_y.max(0.0)));
            self.state.center_pending = false;
        }

        area.show(ui, |ui| {
            let size = egui::Vec2::new(extent.width * zoom, extent.height * zoom);
            let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
            let canvas = Canvas {
                origin: response.rect.min,
                extent,
                zoom,
            };

            painter.rect_filled(response.rect, 0.0, egui::Color32::WHITE);
            for command in &self.scene.commands {
                canvas.paint(&painter, command);
            }

            response
        })
        .inner
    }

    fn handle_zoom(&mut self, ui: &egui::Ui) {
        let zoom_delta = ui.input(|i| i.zoom_delta());
        if zoom_delta != 1.0 {
            self.state.zoom = (self.state.zoom * zoom_delta).clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }
}

/// Maps scene coordinates onto the allocated painter area.
struct Canvas {
    origin: egui::Pos2,
    extent: Rect,
    zoom: f32,
}

impl Canvas {
    fn paint(&self, painter: &egui::Painter, command: &DrawCommand) {
        match command {
            DrawCommand::Rect { rect, fill, stroke } => {
                let screen_rect = egui::Rect::from_min_size(
                    self.to_screen(rect.x, rect.y),
                    egui::Vec2::new(rect.width * self.zoom, rect.height * self.zoom),
                );
                painter.rect_filled(screen_rect, 0.0, color(*fill));
                if let Some(stroke) = stroke {
                    painter.rect_stroke(
                        screen_rect,
                        0.0,
                        egui::Stroke::new(stroke.width * self.zoom, color(stroke.color)),
                        egui::StrokeKind::Inside,
                    );
                }
            }
            DrawCommand::Line { from, to, stroke } => {
                painter.line_segment(
                    [self.to_screen(from.x, from.y), self.to_screen(to.x, to.y)],
                    egui::Stroke::new(stroke.width * self.zoom, color(stroke.color)),
                );
            }
            DrawCommand::Text {
                pos,
                text,
                size,
                color: text_color,
            } => {
                painter.text(
                    self.to_screen(pos.x, pos.y),
                    egui::Align2::LEFT_TOP,
                    text,
                    egui::FontId::proportional(size * self.zoom),
                    color(*text_color),
                );
            }
        }
    }

    fn to_screen(&self, x: f32, y: f32) -> egui::Pos2 {
        egui::Pos2::new(
            self.origin.x + (x - self.extent.x) * self.zoom,
            self.origin.y + (y - self.extent.y) * self.zoom,
        )
    }
}

fn color(rgb: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(rgb.r, rgb.g, rgb.b)
}
