use super::layout::{
    GRID_WIDTH, KEY_HEIGHT, NOTE_HEIGHT, PitchWindow, RangeMode, beat_width, row_top, tick_to_x,
};
use crate::notes::{NoteDocument, is_black_key, pitch_name};

pub const PITCH_LABEL_X: f32 = -40.0;
pub const LABEL_SIZE: f32 = 10.0;
pub const NOTE_LABEL_SIZE: f32 = 8.0;
/// Distance of beat numbers above the top row.
const BEAT_LABEL_RISE: f32 = 20.0;
const NOTE_LABEL_INSET: f32 = 2.0;

const BLACK_KEY_ROW: Rgb = Rgb::new(220, 220, 220);
const WHITE_KEY_ROW: Rgb = Rgb::new(240, 240, 240);
const BEAT_LINE: Rgb = Rgb::new(180, 180, 180);

/// Note fill, indexed by `pitch % 5`.
pub const NOTE_PALETTE: [Rgb; 5] = [
    Rgb::new(0xff, 0x59, 0x5e),
    Rgb::new(0xff, 0xca, 0x3a),
    Rgb::new(0x8a, 0xc9, 0x26),
    Rgb::new(0x19, 0x82, 0xc4),
    Rgb::new(0x6a, 0x4c, 0x93),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect: Rect,
        fill: Rgb,
        stroke: Option<Stroke>,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Text {
        pos: Point,
        text: String,
        size: f32,
        color: Rgb,
    },
}

impl DrawCommand {
    /// Approximate area covered, in scene units. Text uses a rough glyph box.
    pub fn extent(&self) -> Rect {
        match self {
            DrawCommand::Rect { rect, .. } => *rect,
            DrawCommand::Line { from, to, .. } => Rect::new(
                from.x.min(to.x),
                from.y.min(to.y),
                (from.x - to.x).abs(),
                (from.y - to.y).abs(),
            ),
            DrawCommand::Text {
                pos, text, size, ..
            } => Rect::new(
                pos.x,
                pos.y,
                text.chars().count() as f32 * size * 0.6,
                size * 1.2,
            ),
        }
    }
}

/// Height of the widget the scene is shown in, in screen points. The grid
/// width is fixed, so only the height affects layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub height: f32,
}

/// Everything needed to paint one frame of the piano roll, independent of
/// any UI toolkit. Commands are in paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub window: PitchWindow,
    /// Region the view scrolls over.
    pub bounds: Rect,
    /// Point the view should start centered on.
    pub focus: Point,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    /// Bounds grown to cover every command, including labels left of x = 0.
    pub fn extent(&self) -> Rect {
        self.commands
            .iter()
            .fold(self.bounds, |acc, command| acc.union(&command.extent()))
    }

    pub fn note_rects(&self) -> impl Iterator<Item = &Rect> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Rect {
                rect,
                stroke: Some(_),
                ..
            } => Some(rect),
            _ => None,
        })
    }
}

pub fn render(document: &NoteDocument, mode: RangeMode, viewport: Viewport) -> Scene {
    let window = PitchWindow::for_document(document, mode, viewport.height);
    let mut commands = Vec::with_capacity(window.row_count() * 2 + document.notes.len() * 2 + 40);

    draw_rows(&mut commands, window);
    draw_beats(&mut commands, window, document.metadata.ppq);
    draw_notes(&mut commands, document);

    let (min, max) = document.pitch_span().unwrap_or((window.lower, window.upper));
    let focus = Point::new(0.0, row_top(((min as u16 + max as u16) / 2) as u8));

    let grid = Rect::new(
        0.0,
        row_top(window.upper),
        GRID_WIDTH,
        (window.upper - window.lower) as f32 * KEY_HEIGHT,
    );
    let bounds = match mode {
        RangeMode::Fixed => grid,
        RangeMode::FillViewport => commands
            .iter()
            .fold(grid, |acc, command| acc.union(&command.extent())),
    };

    Scene {
        window,
        bounds,
        focus,
        commands,
    }
}

fn draw_rows(commands: &mut Vec<DrawCommand>, window: PitchWindow) {
    for pitch in window.rows() {
        let y = row_top(pitch);
        let fill = if is_black_key(pitch) {
            BLACK_KEY_ROW
        } else {
            WHITE_KEY_ROW
        };

        commands.push(DrawCommand::Rect {
            rect: Rect::new(0.0, y, GRID_WIDTH, KEY_HEIGHT),
            fill,
            stroke: None,
        });
        commands.push(DrawCommand::Text {
            pos: Point::new(PITCH_LABEL_X, y + (KEY_HEIGHT - LABEL_SIZE) / 2.0),
            text: pitch_name(pitch),
            size: LABEL_SIZE,
            color: Rgb::BLACK,
        });
    }
}

fn draw_beats(commands: &mut Vec<DrawCommand>, window: PitchWindow, ppq: u32) {
    let step = beat_width(ppq);
    let top = row_top(window.upper);
    let bottom = row_top(window.lower);

    for x in (0..GRID_WIDTH as u32).step_by(step as usize) {
        let xf = x as f32;
        commands.push(DrawCommand::Line {
            from: Point::new(xf, top),
            to: Point::new(xf, bottom),
            stroke: Stroke {
                width: 1.0,
                color: BEAT_LINE,
            },
        });
        commands.push(DrawCommand::Text {
            pos: Point::new(xf, top - BEAT_LABEL_RISE),
            text: (x / step).to_string(),
            size: LABEL_SIZE,
            color: Rgb::BLACK,
        });
    }
}

fn draw_notes(commands: &mut Vec<DrawCommand>, document: &NoteDocument) {
    for note in &document.notes {
        let x = tick_to_x(note.start);
        let y = row_top(note.pitch) + (KEY_HEIGHT - NOTE_HEIGHT) / 2.0;

        commands.push(DrawCommand::Rect {
            rect: Rect::new(x, y, tick_to_x(note.duration()), NOTE_HEIGHT),
            fill: NOTE_PALETTE[note.pitch as usize % NOTE_PALETTE.len()],
            stroke: Some(Stroke {
                width: 0.5,
                color: Rgb::BLACK,
            }),
        });
        commands.push(DrawCommand::Text {
            pos: Point::new(x + NOTE_LABEL_INSET, y + NOTE_LABEL_INSET),
            text: pitch_name(note.pitch),
            size: NOTE_LABEL_SIZE,
            color: Rgb::WHITE,
        });
    }
}
